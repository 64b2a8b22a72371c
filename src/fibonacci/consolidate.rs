//! Linking and consolidation of the root ring
//!
//! After an extraction the root ring may hold many trees. Consolidation
//! links roots of equal degree (the larger key becomes a child of the
//! smaller) until every root degree is distinct, then rebuilds the ring and
//! the minimum pointer from the degree table.

use super::FibonacciHeap;
use crate::degree::{checked_increment, max_degree_bound};
use crate::storage::NodeKey;
use smallvec::{smallvec, SmallVec};

/// Degree tables up to this size stay on the stack; covers heaps of
/// roughly φ³² ≈ 4.9 million nodes.
const INLINE_DEGREES: usize = 32;

impl<K: Ord, V> FibonacciHeap<K, V> {
    /// Makes `child` a child of `parent`. Both must be roots.
    pub(super) fn link(&mut self, child: NodeKey, parent: NodeKey) {
        self.ring_remove(child);
        {
            let c = &mut self.nodes[child];
            c.parent = Some(parent);
            c.marked = false;
        }
        match self.nodes[parent].child {
            Some(first) => self.ring_insert(first, child),
            None => self.nodes[parent].child = Some(child),
        }
        let p = &mut self.nodes[parent];
        p.degree = checked_increment(p.degree);
    }

    /// Links equal-degree roots until all root degrees are distinct.
    ///
    /// `self.min` must point at some member of the root ring, not
    /// necessarily the minimum; it is recomputed from scratch.
    pub(super) fn consolidate(&mut self) {
        let Some(start) = self.min else {
            return;
        };

        // Linking unlinks roots from the ring, so walk a snapshot instead
        let roots = self.ring_members(start);
        let bound = max_degree_bound(self.len);
        let mut table: SmallVec<[Option<NodeKey>; INLINE_DEGREES]> = smallvec![None; bound + 1];
        let mut links = 0usize;

        for root in roots.iter().copied() {
            let mut x = root;
            let mut d = self.nodes[x].degree as usize;
            loop {
                if d >= table.len() {
                    table.resize(d + 1, None);
                }
                match table[d].take() {
                    None => {
                        table[d] = Some(x);
                        break;
                    }
                    Some(mut y) => {
                        if self.nodes[y].key < self.nodes[x].key {
                            std::mem::swap(&mut x, &mut y);
                        }
                        self.link(y, x);
                        links += 1;
                        d += 1;
                    }
                }
            }
        }

        self.min = None;
        for root in table.into_iter().flatten() {
            let r = &mut self.nodes[root];
            r.left = root;
            r.right = root;
            self.add_root(root);
        }

        log::trace!(
            "consolidated {} roots into {} with {} links (degree bound {})",
            roots.len(),
            roots.len() - links,
            links,
            bound
        );
    }
}
