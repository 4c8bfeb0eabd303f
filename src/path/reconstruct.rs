use crate::{NodeID, NodeIDMap};

/// Walks the parent links in `came_from` backwards from `goal` until `start` is reached.
///
/// Returns the Nodes in order from `start` to `goal`. If the chain of parents is broken before
/// reaching `start`, an empty Vec is returned instead.
///
/// ## Examples
/// Basic usage:
/// ```
/// # use stepped_pathfinding::{path::reconstruct, NodeIDMap};
/// let mut came_from = NodeIDMap::default();
/// came_from.insert(1, 0);
/// came_from.insert(3, 1);
///
/// assert_eq!(reconstruct(&came_from, 0, 3), vec![0, 1, 3]);
/// assert!(reconstruct(&came_from, 0, 2).is_empty());
/// ```
pub fn reconstruct(came_from: &NodeIDMap<NodeID>, start: NodeID, goal: NodeID) -> Vec<NodeID> {
    let mut steps = vec![goal];
    let mut current = goal;

    while current != start {
        // a chain can never be longer than the number of parent links plus the goal
        if steps.len() > came_from.len() + 1 {
            return vec![];
        }
        match came_from.get(&current) {
            Some(&prev) => {
                steps.push(prev);
                current = prev;
            }
            None => return vec![],
        }
    }
    steps.reverse();
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parents(links: &[(NodeID, NodeID)]) -> NodeIDMap<NodeID> {
        links.iter().copied().collect()
    }

    #[test]
    fn start_is_goal() {
        assert_eq!(reconstruct(&NodeIDMap::default(), 4, 4), vec![4]);
    }

    #[test]
    fn chain() {
        let came_from = parents(&[(1, 0), (2, 1), (5, 2), (7, 1)]);
        assert_eq!(reconstruct(&came_from, 0, 5), vec![0, 1, 2, 5]);
        assert_eq!(reconstruct(&came_from, 0, 7), vec![0, 1, 7]);
    }

    #[test]
    fn broken_chain() {
        let came_from = parents(&[(2, 1), (5, 2)]);
        assert!(reconstruct(&came_from, 0, 5).is_empty());
    }

    #[test]
    fn cycle_without_start() {
        let came_from = parents(&[(1, 2), (2, 1)]);
        assert!(reconstruct(&came_from, 0, 1).is_empty());
    }
}
