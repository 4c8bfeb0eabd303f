//! The Graph that Searches run on.
//!
//! A [`Graph`] is a set of Nodes with positions on a plane and undirected Edges between them.
//! The weight of every Edge is the Euclidean distance between its endpoints, which makes the
//! straight-line distance an admissible and consistent heuristic for any Search on the Graph.

mod node;
pub use node::Node;

mod edge;
pub use edge::Edge;

mod parse;

use crate::{path::Cost, GraphError, NodeID, Point};
use hashbrown::HashSet;

/// An immutable, undirected Graph with Euclidean Edge weights.
///
/// Once built, a Graph is never modified, so it can be shared by any number of
/// [`Search`](crate::Search)es, including ones running on other threads.
///
/// ## Examples
/// ```
/// # use stepped_pathfinding::Graph;
/// //  3 ---- 2
/// //  |    / |
/// //  |  /   |
/// //  0 ---- 1
/// let graph = Graph::new(
///     vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
///     [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)],
/// )
/// .unwrap();
///
/// assert_eq!(graph.node_count(), 4);
/// assert_eq!(graph.edge_count(), 5);
/// let diagonal = graph.edge_weight(2, 0).unwrap();
/// assert!((diagonal - 2f64.sqrt()).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Creates a new Graph from the positions of its Nodes and pairs of connected Nodes.
    ///
    /// The NodeID of a Node is its index in `positions`. Pairs may be given in any order and
    /// may contain duplicates (including reversed duplicates), only the first occurrence of
    /// every unordered pair creates an Edge.
    ///
    /// ## Errors
    /// - [`GraphError::NodeOutOfRange`] if a pair references a Node that does not exist
    /// - [`GraphError::SelfLoop`] if a pair connects a Node to itself
    /// - [`GraphError::NonFinitePosition`] if a position is NaN or infinite
    /// - [`GraphError::TooManyNodes`] if there are more Nodes than NodeIDs
    pub fn new(
        positions: Vec<Point>,
        pairs: impl IntoIterator<Item = (NodeID, NodeID)>,
    ) -> Result<Graph, GraphError> {
        let len = positions.len();
        if NodeID::try_from(len).is_err() {
            return Err(GraphError::TooManyNodes { len });
        }
        if let Some(node) = positions
            .iter()
            .position(|&(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(GraphError::NonFinitePosition { node });
        }

        let mut graph = Graph {
            nodes: positions.into_iter().map(Node::new).collect(),
            edges: Vec::new(),
        };

        let mut seen = HashSet::new();
        for (a, b) in pairs {
            for node in [a, b] {
                if node as usize >= len {
                    return Err(GraphError::NodeOutOfRange { node, len });
                }
            }
            let weight = graph.distance(a, b);
            let edge = Edge::new(a, b, weight).ok_or(GraphError::SelfLoop { node: a })?;
            if !seen.insert(edge.endpoints()) {
                continue;
            }
            graph.nodes[a as usize].connect(b, weight);
            graph.nodes[b as usize].connect(a, weight);
            graph.edges.push(edge);
        }

        log::debug!(
            "built graph with {} nodes and {} edges",
            graph.nodes.len(),
            graph.edges.len()
        );

        Ok(graph)
    }

    /// The number of Nodes. Valid NodeIDs are `0..node_count()`
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The number of (undirected) Edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// `true` if the Graph has no Nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `true` if `node` is a valid NodeID for this Graph
    pub fn contains_node(&self, node: NodeID) -> bool {
        (node as usize) < self.nodes.len()
    }

    /// The position of a Node
    ///
    /// ## Panics
    /// if `node` is not part of the Graph
    #[track_caller]
    pub fn position(&self, node: NodeID) -> Point {
        self[node].pos()
    }

    /// All Nodes, indexed by their NodeID
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All Edges in canonical form, in the order they were added
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The neighbors of `node` together with the weight of the connecting Edge.
    ///
    /// Every Edge touching `node` yields exactly one entry, in the order the Edges were added to
    /// the Graph.
    ///
    /// ## Panics
    /// if `node` is not part of the Graph
    #[track_caller]
    pub fn neighbors(&self, node: NodeID) -> impl Iterator<Item = (NodeID, Cost)> + '_ {
        self[node].neighbors().iter().copied()
    }

    /// The straight-line distance between two Nodes
    #[track_caller]
    pub fn distance(&self, a: NodeID, b: NodeID) -> Cost {
        let (ax, ay) = self.position(a);
        let (bx, by) = self.position(b);
        (ax - bx).hypot(ay - by)
    }

    /// The heuristic estimate for the remaining Cost from `node` to `goal`: the straight-line
    /// distance, or `0` if there is no goal.
    ///
    /// ## Examples
    /// ```
    /// # use stepped_pathfinding::Graph;
    /// let graph = Graph::new(vec![(0.0, 0.0), (3.0, 4.0)], []).unwrap();
    ///
    /// assert_eq!(graph.heuristic(0, Some(1)), 5.0);
    /// assert_eq!(graph.heuristic(0, None), 0.0);
    /// ```
    #[track_caller]
    pub fn heuristic(&self, node: NodeID, goal: Option<NodeID>) -> Cost {
        goal.map_or(0.0, |goal| self.distance(node, goal))
    }

    /// The weight of the Edge between `a` and `b`, if there is one
    pub fn edge_weight(&self, a: NodeID, b: NodeID) -> Option<Cost> {
        self.nodes
            .get(a as usize)?
            .neighbors()
            .iter()
            .find(|(other, _)| *other == b)
            .map(|(_, weight)| *weight)
    }

    /// `true` if there is an Edge between `a` and `b`
    pub fn has_edge(&self, a: NodeID, b: NodeID) -> bool {
        self.edge_weight(a, b).is_some()
    }

    /// The total weight of walking along `nodes`, or `None` if two consecutive Nodes are not
    /// connected.
    pub fn path_cost(&self, nodes: &[NodeID]) -> Option<Cost> {
        nodes
            .windows(2)
            .try_fold(0.0, |cost, pair| Some(cost + self.edge_weight(pair[0], pair[1])?))
    }
}

use std::ops::Index;
impl Index<NodeID> for Graph {
    type Output = Node;
    #[track_caller]
    fn index(&self, index: NodeID) -> &Node {
        &self.nodes[index as usize]
    }
}
