//! Error types for building Graphs and running Searches

use crate::NodeID;
use thiserror::Error;

/// Errors raised while building a [`Graph`](crate::Graph) or reading one from its text format.
#[derive(Debug, Error)]
pub enum GraphError {
    /// reading the input failed
    #[error("failed to read graph: {0}")]
    Io(#[from] std::io::Error),
    /// the input ended before the Graph was complete
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof {
        /// what the parser was looking for
        expected: String,
    },
    /// a token could not be parsed as the required number
    #[error("line {line}: invalid number `{token}`")]
    InvalidNumber {
        /// 1-based line number in the input
        line: usize,
        /// the offending token
        token: String,
    },
    /// a line had the wrong number of entries
    #[error("line {line}: expected {expected} values, found {found}")]
    WrongTokenCount {
        /// 1-based line number in the input
        line: usize,
        /// number of values required on this line
        expected: usize,
        /// number of values actually present
        found: usize,
    },
    /// a neighbor list referenced a node that does not exist (indices are 1-based in the input)
    #[error("line {line}: neighbor index {index} is outside of 1..={len}")]
    NeighborOutOfRange {
        /// 1-based line number in the input
        line: usize,
        /// the 1-based index as written in the input
        index: usize,
        /// number of nodes in the Graph
        len: usize,
    },
    /// an edge from a node to itself
    #[error("node {node} is connected to itself")]
    SelfLoop {
        /// the node
        node: NodeID,
    },
    /// an edge referenced a node that does not exist
    #[error("node {node} does not exist in a graph of {len} nodes")]
    NodeOutOfRange {
        /// the requested node
        node: NodeID,
        /// number of nodes in the Graph
        len: usize,
    },
    /// a position was NaN or infinite
    #[error("node {node} has a non-finite position")]
    NonFinitePosition {
        /// the node
        node: usize,
    },
    /// more nodes than a [`NodeID`] can address
    #[error("{len} nodes cannot be addressed by a NodeID")]
    TooManyNodes {
        /// the requested number of nodes
        len: usize,
    },
}

/// Errors raised by a [`Search`](crate::Search).
///
/// An unreachable goal is **not** an error, see [`StepKind::Exhausted`](crate::StepKind::Exhausted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// start or goal is not a node of the Graph
    #[error("node {node} does not exist in a graph of {len} nodes")]
    NodeOutOfRange {
        /// the requested node
        node: NodeID,
        /// number of nodes in the Graph
        len: usize,
    },
    /// `step` was called after the Search already produced its terminal step
    #[error("the search has already finished")]
    Finished,
    /// the goal was reached, but its parent links do not lead back to the start
    #[error("parent links from {goal} do not lead back to {start}")]
    BrokenParentChain {
        /// start of the Search
        start: NodeID,
        /// goal of the Search
        goal: NodeID,
    },
}

/// The error returned when parsing a [`Strategy`](crate::Strategy) from an unknown name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy `{0}`, expected `astar` or `best`")]
pub struct ParseStrategyError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_error_is_copy() {
        let err = SearchError::NodeOutOfRange { node: 3, len: 2 };
        let copied = err;
        assert_eq!(err, copied);
        assert_eq!(
            err.to_string(),
            "node 3 does not exist in a graph of 2 nodes"
        );
    }
}
