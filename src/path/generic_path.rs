use super::Cost;

/// A Path through the Graph
///
/// Stores a sequence of Nodes from start to goal and the total Cost of walking along them.
/// Note that the individual costs of the steps within the Path cannot be retrieved through this
/// struct, use [`Graph::edge_weight`](crate::Graph::edge_weight) for that.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<P> {
    path: Vec<P>,
    cost: Cost,
}

impl<P> Path<P> {
    /// creates a new Path with the given sequence of Nodes and total Cost
    /// ## Examples
    /// Basic usage:
    /// ```
    /// # use stepped_pathfinding::Path;
    /// let path = Path::new(vec![4, 2, 0], 1.5);
    ///
    /// assert_eq!(path.cost(), 1.5);
    /// assert_eq!(path.len(), 3);
    /// ```
    pub fn new(path: Vec<P>, cost: Cost) -> Path<P> {
        Path { path, cost }
    }

    /// the total Cost of the Path
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// The number of Nodes in the Path, including start and goal
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// `true` if the Path contains no Nodes
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// The Nodes of the Path, starting with the start Node
    pub fn nodes(&self) -> &[P] {
        &self.path
    }

    /// Consumes the Path, returning the Nodes
    pub fn into_nodes(self) -> Vec<P> {
        self.path
    }
}

use std::ops::{Deref, Index};

impl<P> Index<usize> for Path<P> {
    type Output = P;
    fn index(&self, index: usize) -> &P {
        &self.path[index]
    }
}

impl<P> Deref for Path<P> {
    type Target = [P];
    fn deref(&self) -> &[P] {
        &self.path
    }
}

impl<P: PartialEq> PartialEq<Vec<P>> for Path<P> {
    fn eq(&self, rhs: &Vec<P>) -> bool {
        self.path == *rhs
    }
}

impl<'a, P: PartialEq> PartialEq<&'a [P]> for Path<P> {
    fn eq(&self, rhs: &&'a [P]) -> bool {
        self.path == *rhs
    }
}

use std::cmp::Ordering;

impl<P: PartialEq> PartialOrd for Path<P> {
    fn partial_cmp(&self, other: &Path<P>) -> Option<Ordering> {
        Some(self.cost.total_cmp(&other.cost))
    }
}

use std::fmt;
impl<P: fmt::Display> fmt::Display for Path<P> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Path[Cost = {}]: ", self.cost)?;
        if self.path.is_empty() {
            write!(fmt, "<empty>")
        } else {
            write!(fmt, "{}", self.path[0])?;
            for p in self.path.iter().skip(1) {
                write!(fmt, " -> {}", p)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {

    use super::Path;
    #[test]
    fn index() {
        let path = Path::new(vec![4, 2, 0], 42.0);

        assert_eq!(path[0], 4);
        assert_eq!(path[1], 2);
        assert_eq!(path[2], 0);
        assert_eq!(path, vec![4, 2, 0]);
    }

    #[test]
    fn ordering() {
        let short = Path::new(vec![0, 2], std::f64::consts::SQRT_2);
        let long = Path::new(vec![0, 1, 2], 2.0);

        assert!(short < long);
    }

    #[test]
    fn display() {
        let path = Path::new(vec![4, 2, 0], 42.5);

        assert_eq!(&format!("{}", path), "Path[Cost = 42.5]: 4 -> 2 -> 0");
    }

    #[test]
    fn display_empty() {
        let path = Path::new(Vec::<i32>::new(), 0.0);

        assert_eq!(&format!("{}", path), "Path[Cost = 0]: <empty>");
    }
}
