//! A Module with some utilities for working with NodeIDs

use crate::NodeID;
use std::hash::{BuildHasherDefault, Hasher};

/// A specialized [`HashMap`](hashbrown::HashMap) for NodeIDs with a faster Hasher
pub type NodeIDMap<V> = hashbrown::HashMap<NodeID, V, BuildNodeIDHasher>;
/// A specialized [`HashSet`](hashbrown::HashSet) for NodeIDs with a faster Hasher
pub type NodeIDSet = hashbrown::HashSet<NodeID, BuildNodeIDHasher>;

/// A [`BuildHasher`](std::hash::BuildHasher) specialized on NodeIDs
pub type BuildNodeIDHasher = BuildHasherDefault<NodeIDHasher>;

/// A [`Hasher`](Hasher) specialized on NodeIDs
///
/// NodeIDs are dense indices, so the id itself is already a good hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct NodeIDHasher(u64);

impl Hasher for NodeIDHasher {
    /// panics, since only NodeIDs are supposed to be used
    fn write(&mut self, _: &[u8]) {
        unreachable!("This Hasher only works with NodeIDs")
    }
    /// Writes a single NodeID into this hasher.
    fn write_u32(&mut self, id: NodeID) {
        // spread the bits a little, hashbrown uses the top 7 bits as a tag
        self.0 = (id as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
    fn finish(&self) -> u64 {
        self.0
    }
}

/// create a new [`NodeIDMap`] with space for at least `capacity` entries
pub fn node_id_map_with_cap<V>(capacity: usize) -> NodeIDMap<V> {
    NodeIDMap::with_capacity_and_hasher(capacity, BuildNodeIDHasher::default())
}
/// create a new [`NodeIDSet`] with space for at least `capacity` entries
pub fn node_id_set_with_cap(capacity: usize) -> NodeIDSet {
    NodeIDSet::with_capacity_and_hasher(capacity, BuildNodeIDHasher::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_and_set() {
        let mut map = node_id_map_with_cap(4);
        map.insert(3, "three");
        map.insert(0, "zero");
        assert_eq!(map[&3], "three");
        assert_eq!(map.get(&1), None);

        let set: NodeIDSet = [5, 1, 5, 9].iter().copied().collect();
        assert_eq!(set.len(), 3);
        assert!(set.contains(&9));
    }
}
