//! The priority queue of Nodes waiting to be expanded.

use crate::{
    node_id::{node_id_map_with_cap, NodeIDMap, NodeIDSet},
    path::Cost,
    NodeID,
};
use slab::Slab;
use std::cmp::Ordering;

/// An entry of the [`OpenSet`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpenEntry {
    /// the value the queue is ordered by (`f` of the Search)
    pub priority: Cost,
    /// insertion order, used to break ties between equal priorities
    pub sequence: u64,
    /// the Node waiting to be expanded
    pub node: NodeID,
    /// the Cost of the best known Path from the start to `node`
    pub cost: Cost,
}

impl OpenEntry {
    /// lower priority first, earlier insertion first on ties
    fn order(&self, other: &OpenEntry) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then(self.sequence.cmp(&other.sequence))
    }
}

#[derive(Clone, Debug)]
struct Slot {
    entry: OpenEntry,
    heap_pos: usize,
}

/// A min-priority queue of pending Nodes with stable tie-breaking and decrease-key.
///
/// Entries are kept in a [`Slab`] and ordered by an indexed binary heap of slab keys, so the
/// priority of a pending entry can be lowered in place with [`try_improve`](OpenSet::try_improve).
///
/// There is at most one *current* entry per Node. Pushing a Node that already has an entry
/// supersedes the older one, which stays in the heap and is skipped when it reaches the top.
/// Entries of Nodes that were closed in the meantime are skipped the same way.
///
/// ## Examples
/// ```
/// # use stepped_pathfinding::{open_set::OpenSet, NodeIDSet};
/// let mut open = OpenSet::new();
/// open.push(2.0, 7, 1.0);
/// open.push(1.0, 3, 1.0);
/// open.push(1.0, 5, 0.5);
///
/// let closed = NodeIDSet::default();
/// // equal priorities are returned in insertion order
/// assert_eq!(open.pop_min(&closed).unwrap().node, 3);
/// assert_eq!(open.pop_min(&closed).unwrap().node, 5);
/// assert_eq!(open.pop_min(&closed).unwrap().node, 7);
/// assert!(open.pop_min(&closed).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct OpenSet {
    slots: Slab<Slot>,
    heap: Vec<usize>,
    current: NodeIDMap<usize>,
    next_sequence: u64,
}

impl OpenSet {
    /// Creates an empty OpenSet
    pub fn new() -> OpenSet {
        OpenSet::default()
    }

    /// Creates an empty OpenSet with space for `capacity` entries
    pub fn with_capacity(capacity: usize) -> OpenSet {
        OpenSet {
            slots: Slab::with_capacity(capacity),
            heap: Vec::with_capacity(capacity),
            current: node_id_map_with_cap(capacity),
            next_sequence: 0,
        }
    }

    /// The number of entries in the queue, including stale ones that will be skipped
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// `true` if there are no entries left, not even stale ones
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// `true` if `node` has a current entry
    pub fn contains(&self, node: NodeID) -> bool {
        self.current.contains_key(&node)
    }

    /// The current entry of `node`, if there is one
    pub fn get(&self, node: NodeID) -> Option<&OpenEntry> {
        self.current.get(&node).map(|&key| &self.slots[key].entry)
    }

    /// All Nodes that have a current entry, in no particular order
    pub fn nodes(&self) -> impl Iterator<Item = NodeID> + '_ {
        self.current.keys().copied()
    }

    /// Adds a new entry for `node` and returns its sequence number.
    ///
    /// If `node` already had an entry, that entry is superseded and will never be returned.
    pub fn push(&mut self, priority: Cost, node: NodeID, cost: Cost) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let heap_pos = self.heap.len();
        let key = self.slots.insert(Slot {
            entry: OpenEntry {
                priority,
                sequence,
                node,
                cost,
            },
            heap_pos,
        });
        self.heap.push(key);
        self.current.insert(node, key);
        self.sift_up(heap_pos);

        sequence
    }

    /// Removes and returns the entry with the lowest priority, ties going to the earliest
    /// insertion.
    ///
    /// Superseded entries and entries whose Node is in `closed` are discarded on the way.
    pub fn pop_min(&mut self, closed: &NodeIDSet) -> Option<OpenEntry> {
        while let Some((key, entry)) = self.remove_top() {
            let is_current = self.current.get(&entry.node) == Some(&key);
            if is_current {
                self.current.remove(&entry.node);
            }
            if !is_current || closed.contains(&entry.node) {
                log::trace!("skipping stale entry for node {}", entry.node);
                continue;
            }
            return Some(entry);
        }
        None
    }

    /// Lowers the priority of the current entry of `node` to `priority` and sets its cost to
    /// `cost`, if `priority` is strictly lower than the existing one.
    ///
    /// The entry keeps its original sequence number. Returns `false` without changing anything
    /// if `node` has no current entry or the new priority is not an improvement.
    pub fn try_improve(&mut self, node: NodeID, priority: Cost, cost: Cost) -> bool {
        let key = match self.current.get(&node) {
            Some(&key) => key,
            None => return false,
        };
        let slot = &mut self.slots[key];
        if priority.partial_cmp(&slot.entry.priority) != Some(Ordering::Less) {
            return false;
        }
        slot.entry.priority = priority;
        slot.entry.cost = cost;
        let pos = slot.heap_pos;
        self.sift_up(pos);
        true
    }

    fn remove_top(&mut self) -> Option<(usize, OpenEntry)> {
        let last = self.heap.len().checked_sub(1)?;
        self.swap(0, last);
        let key = self.heap.pop()?;
        debug_assert_eq!(self.slots[key].heap_pos, last);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((key, self.slots.remove(key).entry))
    }

    fn less(&self, a: usize, b: usize) -> bool {
        let a = &self.slots[self.heap[a]].entry;
        let b = &self.slots[self.heap[b]].entry;
        a.order(b) == Ordering::Less
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        let key_a = self.heap[a];
        self.slots[key_a].heap_pos = a;
        let key_b = self.heap[b];
        self.slots[key_b].heap_pos = b;
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.less(pos, parent) {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.less(right, left) {
                right
            } else {
                left
            };
            if !self.less(child, pos) {
                break;
            }
            self.swap(child, pos);
            pos = child;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_heap(open: &OpenSet) {
        for pos in 1..open.heap.len() {
            assert!(!open.less(pos, (pos - 1) / 2), "heap order broken at {}", pos);
        }
        for (pos, &key) in open.heap.iter().enumerate() {
            assert_eq!(open.slots[key].heap_pos, pos);
        }
    }

    fn drain(open: &mut OpenSet, closed: &NodeIDSet) -> Vec<NodeID> {
        let mut nodes = vec![];
        while let Some(entry) = open.pop_min(closed) {
            assert_heap(open);
            nodes.push(entry.node);
        }
        nodes
    }

    #[test]
    fn priority_order() {
        let mut open = OpenSet::new();
        for (i, priority) in [5.0, 1.0, 4.0, 2.0, 3.0, 0.5].iter().enumerate() {
            open.push(*priority, i as NodeID, 0.0);
            assert_heap(&open);
        }
        assert_eq!(drain(&mut open, &NodeIDSet::default()), vec![5, 1, 3, 4, 2, 0]);
    }

    #[test]
    fn ties_go_to_earlier_insertion() {
        let mut open = OpenSet::new();
        for node in [9, 4, 6, 1, 8] {
            open.push(1.0, node, 0.0);
        }
        assert_eq!(drain(&mut open, &NodeIDSet::default()), vec![9, 4, 6, 1, 8]);
    }

    #[test]
    fn closed_entries_are_skipped() {
        let mut open = OpenSet::new();
        open.push(1.0, 0, 0.0);
        open.push(2.0, 1, 0.0);
        open.push(3.0, 2, 0.0);

        let closed: NodeIDSet = [0, 2].iter().copied().collect();
        assert_eq!(drain(&mut open, &closed), vec![1]);
        assert!(open.is_empty());
    }

    #[test]
    fn superseded_entries_are_skipped() {
        let mut open = OpenSet::new();
        open.push(1.0, 0, 1.0);
        open.push(2.0, 1, 1.0);
        open.push(3.0, 0, 3.0);
        assert_eq!(open.len(), 3);
        assert_eq!(open.get(0).map(|e| e.cost), Some(3.0));

        let closed = NodeIDSet::default();
        let first = open.pop_min(&closed).unwrap();
        assert_eq!((first.node, first.priority), (1, 2.0));
        let second = open.pop_min(&closed).unwrap();
        assert_eq!((second.node, second.priority), (0, 3.0));
        assert!(open.pop_min(&closed).is_none());
    }

    #[test]
    fn improve_keeps_sequence() {
        let mut open = OpenSet::new();
        open.push(1.0, 0, 0.0);
        let seq = open.push(5.0, 1, 4.0);
        open.push(2.0, 2, 0.0);

        // improving node 1 to the same priority as node 0 must not make it win the tie,
        // since node 0 was discovered first
        assert!(open.try_improve(1, 1.0, 0.5));
        assert_heap(&open);
        let entry = *open.get(1).unwrap();
        assert_eq!(entry.sequence, seq);
        assert_eq!(entry.cost, 0.5);

        assert_eq!(drain(&mut open, &NodeIDSet::default()), vec![0, 1, 2]);
    }

    #[test]
    fn improve_requires_strictly_better() {
        let mut open = OpenSet::new();
        open.push(2.0, 0, 1.0);

        assert!(!open.try_improve(0, 2.0, 0.0));
        assert!(!open.try_improve(0, 3.0, 0.0));
        assert!(!open.try_improve(0, f64::NAN, 0.0));
        assert!(!open.try_improve(1, 0.0, 0.0));
        assert!(!open.contains(1));
        assert_eq!(open.get(0).map(|e| (e.priority, e.cost)), Some((2.0, 1.0)));
    }

    #[test]
    fn improve_after_pop_is_noop() {
        let mut open = OpenSet::new();
        open.push(1.0, 0, 0.0);
        open.pop_min(&NodeIDSet::default());

        assert!(!open.contains(0));
        assert!(!open.try_improve(0, 0.0, 0.0));
        assert!(open.is_empty());
    }

    #[test]
    fn many_improvements() {
        let mut open = OpenSet::new();
        for node in 0..50 {
            open.push(100.0 + node as f64, node, 0.0);
        }
        for node in (0..50).step_by(3) {
            assert!(open.try_improve(node, 50.0 - node as f64, 0.0));
            assert_heap(&open);
        }
        let order = drain(&mut open, &NodeIDSet::default());
        assert_eq!(order.len(), 50);
        assert_eq!(order[0], 48);
        assert_eq!(order[16], 0);
        assert_eq!(order[17], 1);
    }
}
