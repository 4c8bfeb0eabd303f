use crate::{NodeID, NodeIDSet, Path};

/// The phase a [`Search`](crate::Search) is in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchState {
    /// created, nothing was observed yet
    Ready,
    /// at least one Step was taken and the Search is not finished
    Expanding,
    /// the goal was expanded and the Path was produced
    Found,
    /// every reachable Node was expanded without reaching the goal
    Exhausted,
}

impl SearchState {
    /// `true` for [`Found`](SearchState::Found) and [`Exhausted`](SearchState::Exhausted)
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchState::Found | SearchState::Exhausted)
    }
}

/// What happened during a [`Step`]
#[derive(Clone, Debug, PartialEq)]
pub enum StepKind {
    /// The first Step: only the start is in the frontier
    Started,
    /// A Node was taken from the frontier and closed
    Expanded(NodeID),
    /// The neighbors of the last expanded Node were added to (or updated in) the frontier
    FrontierUpdated,
    /// The goal was reached. Terminal.
    Found(Path<NodeID>),
    /// The frontier ran empty before the goal was reached. Terminal.
    Exhausted,
}

/// A snapshot of a [`Search`](crate::Search), as produced by a single call to
/// [`step`](crate::Search::step).
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    /// what this Step did
    pub kind: StepKind,
    /// all Nodes that were expanded so far
    pub closed: NodeIDSet,
    /// all Nodes waiting to be expanded
    pub frontier: NodeIDSet,
}

impl Step {
    /// The Node that was expanded in this Step, if any
    pub fn current(&self) -> Option<NodeID> {
        match self.kind {
            StepKind::Expanded(node) => Some(node),
            _ => None,
        }
    }

    /// The Path, if this Step found the goal
    pub fn path(&self) -> Option<&Path<NodeID>> {
        match &self.kind {
            StepKind::Found(path) => Some(path),
            _ => None,
        }
    }

    /// `true` if no more Steps follow this one
    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, StepKind::Found(_) | StepKind::Exhausted)
    }
}

/// The result of running a [`Search`](crate::Search) to its end
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The goal was reached along the contained Path
    Found(Path<NodeID>),
    /// No Path to the goal exists
    Exhausted,
}

impl Outcome {
    /// The Path, if the goal was reached
    pub fn path(&self) -> Option<&Path<NodeID>> {
        match self {
            Outcome::Found(path) => Some(path),
            Outcome::Exhausted => None,
        }
    }

    /// Converts into the Path, if the goal was reached
    pub fn into_path(self) -> Option<Path<NodeID>> {
        match self {
            Outcome::Found(path) => Some(path),
            Outcome::Exhausted => None,
        }
    }
}
