use crate::{path::Cost, NodeID, Point};

/// A Node of the [`Graph`](super::Graph): a position and the Edges touching it.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pos: Point,
    edges: Vec<(NodeID, Cost)>,
}

impl Node {
    pub(crate) fn new(pos: Point) -> Node {
        Node {
            pos,
            edges: Vec::new(),
        }
    }

    pub(crate) fn connect(&mut self, other: NodeID, weight: Cost) {
        self.edges.push((other, weight));
    }

    /// The position of the Node
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// The Nodes connected to this Node, with the weight of the connecting Edge,
    /// in the order the Edges were added to the Graph
    pub fn neighbors(&self) -> &[(NodeID, Cost)] {
        &self.edges
    }

    /// The number of Edges touching this Node
    pub fn degree(&self) -> usize {
        self.edges.len()
    }
}
