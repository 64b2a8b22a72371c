//! Arena storage for heap nodes
//!
//! Every node record lives in a single [`SlotMap`], and every structural
//! reference between nodes (parent, child, left and right siblings) is a
//! [`NodeKey`] into that arena rather than a pointer. This keeps the cyclic
//! sibling rings and the parent back-links free of ownership cycles.
//!
//! # Generational keys
//!
//! `slotmap` keys carry a generation counter. Once a node is destroyed its
//! key never resolves again, even after the slot has been reused for a new
//! node, so a stale caller handle is always detected instead of silently
//! aliasing another element.
//!
//! The store performs no structural policy: it allocates and frees records
//! and nothing else. Callers must unlink a node from every ring before
//! destroying it.

use slotmap::{new_key_type, SlotMap};
use std::ops::{Index, IndexMut};

new_key_type! {
    /// Generational index of a node slot in a [`NodeStore`]
    pub struct NodeKey;
}

/// Growable arena of node records addressed by [`NodeKey`]
#[derive(Debug)]
pub(crate) struct NodeStore<N> {
    slots: SlotMap<NodeKey, N>,
}

impl<N> NodeStore<N> {
    pub(crate) fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Allocates a record; `init` receives the key the record will live at,
    /// which lets a node point its sibling links at itself.
    pub(crate) fn create_with(&mut self, init: impl FnOnce(NodeKey) -> N) -> NodeKey {
        self.slots.insert_with_key(init)
    }

    /// Releases a record and returns its contents.
    ///
    /// # Panics
    ///
    /// Panics if `key` is stale. Only internal, invariant-guaranteed keys may
    /// be passed here; caller handles are validated with [`contains`] first.
    ///
    /// [`contains`]: NodeStore::contains
    pub(crate) fn destroy(&mut self, key: NodeKey) -> N {
        match self.slots.remove(key) {
            Some(node) => node,
            None => panic!("node store: destroy of stale key {key:?}"),
        }
    }

    pub(crate) fn contains(&self, key: NodeKey) -> bool {
        self.slots.contains_key(key)
    }

    pub(crate) fn get(&self, key: NodeKey) -> Option<&N> {
        self.slots.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: NodeKey) -> Option<&mut N> {
        self.slots.get_mut(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &N> {
        self.slots.values()
    }

    /// Empties the store, yielding every record with the key it lived at.
    pub(crate) fn drain(&mut self) -> impl Iterator<Item = (NodeKey, N)> + '_ {
        self.slots.drain()
    }
}

impl<N> Index<NodeKey> for NodeStore<N> {
    type Output = N;

    #[inline]
    fn index(&self, key: NodeKey) -> &N {
        &self.slots[key]
    }
}

impl<N> IndexMut<NodeKey> for NodeStore<N> {
    #[inline]
    fn index_mut(&mut self, key: NodeKey) -> &mut N {
        &mut self.slots[key]
    }
}
