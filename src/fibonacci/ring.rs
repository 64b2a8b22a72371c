//! Circular sibling rings
//!
//! The same primitives serve the root ring and every child ring: a ring is
//! identified only by any one of its members.

use super::FibonacciHeap;
use crate::storage::NodeKey;

impl<K: Ord, V> FibonacciHeap<K, V> {
    /// Splices the singleton `node` into `anchor`'s ring, just left of `anchor`.
    pub(super) fn ring_insert(&mut self, anchor: NodeKey, node: NodeKey) {
        let left = self.nodes[anchor].left;
        {
            let n = &mut self.nodes[node];
            n.left = left;
            n.right = anchor;
        }
        self.nodes[left].right = node;
        self.nodes[anchor].left = node;
    }

    /// Unlinks `node` from its ring and leaves it a singleton.
    ///
    /// Returns a remaining member of the old ring, or `None` if `node` was
    /// its only member.
    pub(super) fn ring_remove(&mut self, node: NodeKey) -> Option<NodeKey> {
        let (left, right) = {
            let n = &mut self.nodes[node];
            let neighbours = (n.left, n.right);
            n.left = node;
            n.right = node;
            neighbours
        };
        if right == node {
            return None;
        }
        self.nodes[left].right = right;
        self.nodes[right].left = left;
        Some(right)
    }

    /// Joins two disjoint rings into one in O(1).
    pub(super) fn ring_splice(&mut self, a: NodeKey, b: NodeKey) {
        let a_left = self.nodes[a].left;
        let b_left = self.nodes[b].left;
        self.nodes[a_left].right = b;
        self.nodes[b].left = a_left;
        self.nodes[b_left].right = a;
        self.nodes[a].left = b_left;
    }

    /// Snapshot of a ring, starting at `start` and walking rightwards.
    pub(super) fn ring_members(&self, start: NodeKey) -> Vec<NodeKey> {
        let mut members = Vec::new();
        let mut current = start;
        loop {
            members.push(current);
            current = self.nodes[current].right;
            if current == start {
                break;
            }
        }
        members
    }

    /// Adds the singleton `node` to the root ring and refreshes the minimum.
    pub(super) fn add_root(&mut self, node: NodeKey) {
        match self.min {
            None => self.min = Some(node),
            Some(min) => {
                self.ring_insert(min, node);
                if self.nodes[node].key < self.nodes[min].key {
                    self.min = Some(node);
                }
            }
        }
    }

    /// Moves every child of `parent` into the root ring.
    ///
    /// `parent` must itself be a root. Promoted children lose their parent
    /// link and their mark; `parent` is left childless. The minimum pointer
    /// is not touched.
    pub(super) fn promote_children(&mut self, parent: NodeKey) {
        let Some(first) = self.nodes[parent].child.take() else {
            return;
        };
        self.nodes[parent].degree = 0;

        let mut current = first;
        let mut promoted = 0usize;
        loop {
            let n = &mut self.nodes[current];
            n.parent = None;
            n.marked = false;
            promoted += 1;
            current = n.right;
            if current == first {
                break;
            }
        }
        self.ring_splice(parent, first);
        log::trace!("promoted {promoted} children to the root ring");
    }
}
