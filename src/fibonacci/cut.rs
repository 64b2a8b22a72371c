//! Cuts and cascading cuts
//!
//! A node whose key drops below its parent's is cut loose and promoted to
//! the root ring. Its parent is then marked; a parent that was already
//! marked has now lost two children and is cut as well, and so on upward.
//! This keeps every subtree of degree `d` at least `F(d+2)` nodes large.

use super::FibonacciHeap;
use crate::degree::saturating_decrement;
use crate::storage::NodeKey;

impl<K: Ord, V> FibonacciHeap<K, V> {
    /// Detaches `node` from `parent` and moves it to the root ring, unmarked.
    pub(super) fn cut(&mut self, node: NodeKey, parent: NodeKey) {
        let next = self.ring_remove(node);
        {
            let p = &mut self.nodes[parent];
            if p.child == Some(node) {
                p.child = next;
            }
            p.degree = saturating_decrement(p.degree);
        }
        {
            let n = &mut self.nodes[node];
            n.parent = None;
            n.marked = false;
        }
        self.add_root(node);
    }

    /// Walks up from `node`, marking the first unmarked non-root ancestor
    /// and cutting every marked one on the way.
    pub(super) fn cascading_cut(&mut self, mut node: NodeKey) {
        let mut cuts = 0usize;
        while let Some(parent) = self.nodes[node].parent {
            if !self.nodes[node].marked {
                self.nodes[node].marked = true;
                break;
            }
            self.cut(node, parent);
            cuts += 1;
            node = parent;
        }
        if cuts > 0 {
            log::trace!("cascading cut promoted {cuts} marked ancestors");
        }
    }

    /// Restores heap order around `node` after its key was lowered.
    pub(super) fn sift_after_decrease(&mut self, node: NodeKey) {
        if let Some(parent) = self.nodes[node].parent {
            if self.nodes[node].key < self.nodes[parent].key {
                self.cut(node, parent);
                self.cascading_cut(parent);
            }
        }
        if let Some(min) = self.min {
            if self.nodes[node].key < self.nodes[min].key {
                self.min = Some(node);
            }
        }
    }

    /// Treats `node` as if its key were below every other key: promotes it
    /// to the root ring through the cut path and makes it the minimum.
    ///
    /// Between this call and the next structural update the minimum pointer
    /// does not reflect actual keys.
    pub(super) fn lift_to_min(&mut self, node: NodeKey) {
        if let Some(parent) = self.nodes[node].parent {
            self.cut(node, parent);
            self.cascading_cut(parent);
        }
        self.min = Some(node);
    }
}

#[cfg(test)]
mod tests {
    use crate::FibonacciHeap;

    /// Builds one tree of degree 3 rooted at key 1 over keys 1..=8.
    fn binomial_tree() -> FibonacciHeap<i32, ()> {
        let mut heap = FibonacciHeap::new();
        for k in 0..9 {
            heap.insert(k, ());
        }
        heap.extract_min().unwrap();
        assert_eq!(heap.root_degrees(), vec![3]);
        heap
    }

    #[test]
    fn test_cut_moves_node_to_root_ring() {
        let mut heap = binomial_tree();
        let root = heap.min.unwrap();
        let child = heap.nodes[root].child.unwrap();

        heap.cut(child, root);
        assert_eq!(heap.nodes[root].degree, 2);
        assert!(heap.nodes[child].parent.is_none());
        assert_eq!(heap.root_count(), 2);
        assert_eq!(heap.check_invariants(), Ok(()));
    }

    #[test]
    fn test_cut_only_child_empties_child_ring() {
        let mut heap = FibonacciHeap::new();
        let a = heap.insert(1, ()).node;
        let b = heap.insert(2, ()).node;
        heap.link(b, a);

        heap.cut(b, a);
        assert!(heap.nodes[a].child.is_none());
        assert_eq!(heap.nodes[a].degree, 0);
        assert_eq!(heap.root_count(), 2);
        assert_eq!(heap.check_invariants(), Ok(()));
    }

    #[test]
    fn test_first_loss_marks_second_loss_cuts() {
        let mut heap = binomial_tree();
        let root = heap.min.unwrap();

        // Find a child of the root that has two children of its own
        let mid = heap
            .ring_members(heap.nodes[root].child.unwrap())
            .into_iter()
            .find(|&c| heap.nodes[c].degree == 2)
            .unwrap();
        let grandchildren = heap.ring_members(heap.nodes[mid].child.unwrap());

        heap.cut(grandchildren[0], mid);
        heap.cascading_cut(mid);
        assert!(heap.nodes[mid].marked);
        assert_eq!(heap.nodes[mid].parent, Some(root));

        heap.cut(grandchildren[1], mid);
        heap.cascading_cut(mid);
        assert!(!heap.nodes[mid].marked);
        assert!(heap.nodes[mid].parent.is_none());
        // Root never gets marked
        assert!(!heap.nodes[root].marked);
        assert_eq!(heap.check_invariants(), Ok(()));
    }

    #[test]
    fn test_lift_to_min_overrides_minimum() {
        let mut heap = binomial_tree();
        let root = heap.min.unwrap();
        let deepest = {
            let mut n = root;
            while let Some(c) = heap.nodes[n].child {
                n = c;
            }
            n
        };

        heap.lift_to_min(deepest);
        assert_eq!(heap.min, Some(deepest));
        assert!(heap.nodes[deepest].parent.is_none());
    }
}
