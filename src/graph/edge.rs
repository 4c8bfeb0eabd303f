use crate::{path::Cost, NodeID};

/// An undirected, weighted Edge between two distinct Nodes.
///
/// Edges are stored in canonical form: the smaller NodeID always comes first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    a: NodeID,
    b: NodeID,
    weight: Cost,
}

impl Edge {
    /// Creates the canonical Edge between `a` and `b`, or `None` if `a == b`
    /// ## Examples
    /// Basic usage:
    /// ```
    /// # use stepped_pathfinding::graph::Edge;
    /// let edge = Edge::new(5, 2, 1.0).unwrap();
    ///
    /// assert_eq!(edge.endpoints(), (2, 5));
    /// assert_eq!(edge.other(5), Some(2));
    /// assert!(Edge::new(3, 3, 0.0).is_none());
    /// ```
    pub fn new(a: NodeID, b: NodeID, weight: Cost) -> Option<Edge> {
        if a == b {
            return None;
        }
        Some(Edge {
            a: a.min(b),
            b: a.max(b),
            weight,
        })
    }

    /// The two endpoints, smaller NodeID first
    pub fn endpoints(&self) -> (NodeID, NodeID) {
        (self.a, self.b)
    }

    /// The weight of the Edge, which is the distance between its endpoints
    pub fn weight(&self) -> Cost {
        self.weight
    }

    /// `true` if `node` is one of the endpoints
    pub fn touches(&self, node: NodeID) -> bool {
        self.a == node || self.b == node
    }

    /// The endpoint opposite to `node`, or `None` if `node` is not part of the Edge
    pub fn other(&self, node: NodeID) -> Option<NodeID> {
        if node == self.a {
            Some(self.b)
        } else if node == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}
