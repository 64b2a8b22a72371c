//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a priority queue with:
//! - O(1) amortized insert, peek, decrease_key, and meld
//! - O(log n) amortized extract_min and delete
//!
//! The structure is a collection of heap-ordered trees whose roots are
//! linked in a circular doubly linked list (the root ring); the heap keeps a
//! pointer to the minimum root. Work is deferred: insert and meld only touch
//! the root ring, and trees are merged by degree during `extract_min`.
//!
//! Nodes live in a generational `slotmap` arena, so handles
//! are plain `Copy` keys that can be checked for liveness.

mod consolidate;
mod cut;
mod inspect;
mod node;
mod ring;

pub use inspect::{InvariantViolation, TreeView};

use crate::storage::{NodeKey, NodeStore};
use crate::traits::{AddressableQueue, Handle, HeapError, PriorityQueue};
use node::Node;
use slotmap::SecondaryMap;
use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

static NEXT_HEAP_ID: AtomicU64 = AtomicU64::new(0);

/// Process-wide identity of a heap instance.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct HeapId(u64);

impl HeapId {
    fn fresh() -> Self {
        HeapId(NEXT_HEAP_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

/// Handle to an element in a Fibonacci heap
///
/// A handle is tied to the heap that issued it. It stops resolving once its
/// element is extracted or deleted; using it with any other heap yields
/// [`HeapError::InvalidHandle`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle {
    heap: HeapId,
    node: NodeKey,
}

impl Handle for FibonacciHandle {}

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use fibonacci_pq::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.insert(5, "item");
/// heap.insert(3, "other");
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.peek_min(), Ok((&1, &"item")));
/// assert_eq!(heap.extract_min(), Ok((1, "item")));
/// ```
pub struct FibonacciHeap<K, V> {
    nodes: NodeStore<Node<K, V>>,
    /// Minimum root, doubling as the entry point into the root ring.
    min: Option<NodeKey>,
    len: usize,
    id: HeapId,
}

impl<K: Ord, V> FibonacciHeap<K, V> {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self {
            nodes: NodeStore::new(),
            min: None,
            len: 0,
            id: HeapId::fresh(),
        }
    }

    /// Creates an empty heap with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: NodeStore::with_capacity(capacity),
            min: None,
            len: 0,
            id: HeapId::fresh(),
        }
    }

    /// Reserves room for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Number of elements in the heap.
    pub fn size(&self) -> usize {
        self.len
    }

    /// Same as [`size`](Self::size).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Inserts `key` with its satellite `value` and returns a handle to it.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn insert(&mut self, key: K, value: V) -> FibonacciHandle {
        let node = self
            .nodes
            .create_with(|at| Node::singleton(at, key, value));
        self.add_root(node);
        self.len += 1;
        FibonacciHandle { heap: self.id, node }
    }

    /// Returns the minimum key and its value.
    ///
    /// # Errors
    /// [`HeapError::EmptyQueue`] if the heap is empty.
    pub fn peek_min(&self) -> Result<(&K, &V), HeapError> {
        let min = self.min.ok_or(HeapError::EmptyQueue)?;
        let node = &self.nodes[min];
        Ok((&node.key, &node.value))
    }

    /// Removes and returns the minimum key and its value.
    ///
    /// The children of the minimum join the root ring, after which the ring
    /// is consolidated so that no two roots share a degree.
    ///
    /// # Errors
    /// [`HeapError::EmptyQueue`] if the heap is empty.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn extract_min(&mut self) -> Result<(K, V), HeapError> {
        let z = self.min.ok_or(HeapError::EmptyQueue)?;

        self.promote_children(z);
        match self.ring_remove(z) {
            None => self.min = None,
            Some(next) => {
                self.min = Some(next);
                self.consolidate();
            }
        }

        let node = self.nodes.destroy(z);
        self.len -= 1;
        Ok((node.key, node.value))
    }

    /// Lowers the key of the element behind `handle` to `new_key`.
    ///
    /// A `new_key` equal to the current key is accepted and changes nothing.
    ///
    /// # Errors
    /// - [`HeapError::InvalidHandle`] if the handle is stale or foreign
    /// - [`HeapError::InvalidKey`] if `new_key` is greater than the current key
    ///
    /// On error the heap is left untouched.
    ///
    /// # Time Complexity
    /// O(1) amortized
    pub fn decrease_key(&mut self, handle: &FibonacciHandle, new_key: K) -> Result<(), HeapError> {
        let node = self.resolve(handle)?;
        if new_key > self.nodes[node].key {
            return Err(HeapError::InvalidKey);
        }
        self.nodes[node].key = new_key;
        self.sift_after_decrease(node);
        Ok(())
    }

    /// Removes the element behind `handle` and returns it.
    ///
    /// The element is first promoted to the minimum position through the
    /// cut path, as if its key were below every other key, then extracted.
    ///
    /// # Errors
    /// [`HeapError::InvalidHandle`] if the handle is stale or foreign.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn delete(&mut self, handle: &FibonacciHandle) -> Result<(K, V), HeapError> {
        let node = self.resolve(handle)?;
        self.lift_to_min(node);
        self.extract_min()
    }

    /// Sets the key of the element behind `handle`, in either direction.
    ///
    /// Lowering is exactly [`decrease_key`](Self::decrease_key). Raising
    /// promotes the element to the root ring through the cut path, assigns
    /// the new key, and moves all of its former children into the root ring,
    /// since it may no longer dominate them. The root ring can grow by the
    /// element's degree; the next `extract_min` consolidates it again.
    ///
    /// # Errors
    /// - [`HeapError::InvalidHandle`] if the handle is stale or foreign
    /// - [`HeapError::InvalidKey`] if `new_key` equals the current key
    pub fn change_key(&mut self, handle: &FibonacciHandle, new_key: K) -> Result<(), HeapError> {
        let node = self.resolve(handle)?;
        match new_key.cmp(&self.nodes[node].key) {
            Ordering::Equal => Err(HeapError::InvalidKey),
            Ordering::Less => {
                self.nodes[node].key = new_key;
                self.sift_after_decrease(node);
                Ok(())
            }
            Ordering::Greater => {
                self.increase_key(node, new_key);
                Ok(())
            }
        }
    }

    fn increase_key(&mut self, node: NodeKey, new_key: K) {
        let previous_min = self.min;

        self.lift_to_min(node);
        self.nodes[node].key = new_key;
        self.promote_children(node);

        // Every other key is unchanged, so the old minimum still holds
        // unless it was this very node.
        match previous_min {
            Some(min) if min != node => self.min = Some(min),
            _ => self.min = Some(self.min_root(node)),
        }
    }

    /// Smallest-key member of the root ring containing `start`.
    fn min_root(&self, start: NodeKey) -> NodeKey {
        let mut best = start;
        let mut current = self.nodes[start].right;
        while current != start {
            if self.nodes[current].key < self.nodes[best].key {
                best = current;
            }
            current = self.nodes[current].right;
        }
        best
    }

    /// Merges `other` into this heap, consuming it.
    ///
    /// The two root rings are spliced in O(1) and the smaller minimum wins.
    /// The node records of `other` move into this heap's arena, so handles
    /// issued by `other` are foreign here afterwards. If this heap is empty
    /// it takes over `other` wholesale and those handles stay valid.
    ///
    /// Otherwise the melded elements can no longer be reached through
    /// `decrease_key`, `delete` or `change_key`; keep handles only for
    /// elements inserted into the receiving heap.
    ///
    /// # Time Complexity
    /// O(m) in the size of `other`, for moving its records
    pub fn meld(&mut self, mut other: Self) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = other;
            return;
        }

        let moved = other.len;
        let (Some(self_min), Some(other_min)) = (self.min, other.min) else {
            return;
        };

        self.nodes.reserve(moved);
        let mut remap: SecondaryMap<NodeKey, NodeKey> = SecondaryMap::with_capacity(moved);
        for (old, node) in other.nodes.drain() {
            let new = self.nodes.create_with(|_| node);
            remap.insert(old, new);
        }
        for new in remap.values().copied() {
            let n = &mut self.nodes[new];
            n.left = remap[n.left];
            n.right = remap[n.right];
            n.parent = n.parent.map(|p| remap[p]);
            n.child = n.child.map(|c| remap[c]);
        }
        let other_min = remap[other_min];
        self.ring_splice(self_min, other_min);
        if self.nodes[other_min].key < self.nodes[self_min].key {
            self.min = Some(other_min);
        }
        self.len += moved;
        log::debug!("melded {moved} nodes; heap now holds {}", self.len);
    }

    /// Returns the key and value behind `handle`.
    ///
    /// # Errors
    /// [`HeapError::InvalidHandle`] if the handle is stale or foreign.
    pub fn get(&self, handle: &FibonacciHandle) -> Result<(&K, &V), HeapError> {
        let node = &self.nodes[self.resolve(handle)?];
        Ok((&node.key, &node.value))
    }

    /// Mutable access to the value behind `handle`; the key stays fixed.
    ///
    /// # Errors
    /// [`HeapError::InvalidHandle`] if the handle is stale or foreign.
    pub fn value_mut(&mut self, handle: &FibonacciHandle) -> Result<&mut V, HeapError> {
        let node = self.resolve(handle)?;
        Ok(&mut self.nodes[node].value)
    }

    /// True if `handle` was issued by this heap and its element is still here.
    pub fn contains(&self, handle: &FibonacciHandle) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Removes every element. All outstanding handles become stale.
    pub fn clear(&mut self) {
        log::debug!("clearing heap of {} nodes", self.len);
        self.nodes.clear();
        self.min = None;
        self.len = 0;
    }

    /// Iterates over all `(key, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.nodes.values().map(|n| (&n.key, &n.value))
    }

    /// Drains the heap in ascending key order.
    pub fn into_sorted_vec(mut self) -> Vec<(K, V)> {
        let mut sorted = Vec::with_capacity(self.len);
        while let Ok(entry) = self.extract_min() {
            sorted.push(entry);
        }
        sorted
    }

    fn resolve(&self, handle: &FibonacciHandle) -> Result<NodeKey, HeapError> {
        if handle.heap == self.id && self.nodes.contains(handle.node) {
            Ok(handle.node)
        } else {
            Err(HeapError::InvalidHandle)
        }
    }
}

impl<K: Ord, V> Default for FibonacciHeap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> Extend<(K, V)> for FibonacciHeap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for FibonacciHeap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

impl<K: Ord, V> PriorityQueue<K, V> for FibonacciHeap<K, V> {
    fn new() -> Self {
        FibonacciHeap::new()
    }

    fn is_empty(&self) -> bool {
        FibonacciHeap::is_empty(self)
    }

    fn size(&self) -> usize {
        self.len
    }

    fn push(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn peek_min(&self) -> Result<(&K, &V), HeapError> {
        FibonacciHeap::peek_min(self)
    }

    fn extract_min(&mut self) -> Result<(K, V), HeapError> {
        FibonacciHeap::extract_min(self)
    }

    fn meld(&mut self, other: Self) {
        FibonacciHeap::meld(self, other)
    }
}

impl<K: Ord, V> AddressableQueue<K, V> for FibonacciHeap<K, V> {
    type Handle = FibonacciHandle;

    fn push_with_handle(&mut self, key: K, value: V) -> FibonacciHandle {
        self.insert(key, value)
    }

    fn decrease_key(&mut self, handle: &FibonacciHandle, new_key: K) -> Result<(), HeapError> {
        FibonacciHeap::decrease_key(self, handle, new_key)
    }

    fn delete(&mut self, handle: &FibonacciHandle) -> Result<(K, V), HeapError> {
        FibonacciHeap::delete(self, handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut heap = FibonacciHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.size(), 0);

        heap.insert(5, "a");
        heap.insert(3, "b");
        heap.insert(7, "c");

        assert_eq!(heap.size(), 3);
        assert_eq!(heap.peek_min(), Ok((&3, &"b")));

        assert_eq!(heap.extract_min(), Ok((3, "b")));
        assert_eq!(heap.peek_min(), Ok((&5, &"a")));
        assert_eq!(heap.check_invariants(), Ok(()));
    }

    #[test]
    fn test_empty_errors() {
        let mut heap: FibonacciHeap<i32, ()> = FibonacciHeap::new();
        assert_eq!(heap.peek_min(), Err(HeapError::EmptyQueue));
        assert_eq!(heap.extract_min(), Err(HeapError::EmptyQueue));
        assert_eq!(heap.size(), 0);
    }

    #[test]
    fn test_heap_sort_example() {
        let mut heap = FibonacciHeap::new();
        for k in [23, 7, 21, 3, 17, 24] {
            heap.insert(k, ());
        }
        let keys: Vec<i32> = (0..6).map(|_| heap.extract_min().unwrap().0).collect();
        assert_eq!(keys, vec![3, 7, 17, 21, 23, 24]);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_decrease_key() {
        let mut heap = FibonacciHeap::new();
        let _h1 = heap.insert(10, "a");
        let h2 = heap.insert(20, "b");
        let h3 = heap.insert(30, "c");

        assert_eq!(heap.peek_min(), Ok((&10, &"a")));

        heap.decrease_key(&h2, 5).unwrap();
        assert_eq!(heap.peek_min(), Ok((&5, &"b")));

        heap.decrease_key(&h3, 1).unwrap();
        assert_eq!(heap.peek_min(), Ok((&1, &"c")));

        // Equal key is accepted
        heap.decrease_key(&h3, 1).unwrap();
        assert_eq!(heap.check_invariants(), Ok(()));
    }

    #[test]
    fn test_decrease_key_rejects_larger_key_without_mutation() {
        let mut heap = FibonacciHeap::new();
        for k in 0..10 {
            heap.insert(k, k);
        }
        let h = heap.insert(50, 50);
        heap.extract_min().unwrap();
        let before = heap.root_degrees();

        assert_eq!(heap.decrease_key(&h, 51), Err(HeapError::InvalidKey));
        assert_eq!(heap.get(&h), Ok((&50, &50)));
        assert_eq!(heap.root_degrees(), before);
        assert_eq!(heap.check_invariants(), Ok(()));
    }

    #[test]
    fn test_decrease_key_inside_tree_cuts() {
        let mut heap = FibonacciHeap::new();
        let handles: Vec<_> = (0..17).map(|k| heap.insert(k * 10, k)).collect();
        heap.extract_min().unwrap();
        assert_eq!(heap.root_count(), 1);

        heap.decrease_key(&handles[16], -1).unwrap();
        assert_eq!(heap.peek_min(), Ok((&-1, &16)));
        assert_eq!(heap.root_count(), 2);
        assert_eq!(heap.check_invariants(), Ok(()));
    }

    #[test]
    fn test_stale_and_foreign_handles() {
        let mut heap = FibonacciHeap::new();
        let mut other = FibonacciHeap::new();
        let h = heap.insert(1, ());
        let foreign = other.insert(1, ());

        assert_eq!(heap.extract_min(), Ok((1, ())));
        assert!(!heap.contains(&h));
        assert_eq!(heap.decrease_key(&h, 0), Err(HeapError::InvalidHandle));
        assert_eq!(heap.delete(&h), Err(HeapError::InvalidHandle));
        assert_eq!(heap.change_key(&h, 5), Err(HeapError::InvalidHandle));

        // Slot reuse must not revive the old handle
        let fresh = heap.insert(2, ());
        assert_eq!(heap.get(&h), Err(HeapError::InvalidHandle));
        assert_eq!(heap.get(&fresh), Ok((&2, &())));

        // Same slot index in another heap is still foreign
        assert_eq!(heap.get(&foreign), Err(HeapError::InvalidHandle));
    }

    #[test]
    fn test_delete() {
        let mut heap = FibonacciHeap::new();
        let handles: Vec<_> = (0..10).map(|k| heap.insert(k, k)).collect();
        heap.extract_min().unwrap();

        assert_eq!(heap.delete(&handles[6]), Ok((6, 6)));
        assert_eq!(heap.size(), 8);
        assert!(heap.iter().all(|(k, _)| *k != 6));
        assert_eq!(heap.check_invariants(), Ok(()));

        // Deleting the minimum
        assert_eq!(heap.delete(&handles[1]), Ok((1, 1)));
        assert_eq!(heap.peek_min(), Ok((&2, &2)));

        let rest: Vec<i32> = heap.into_sorted_vec().into_iter().map(|(k, _)| k).collect();
        assert_eq!(rest, vec![2, 3, 4, 5, 7, 8, 9]);
    }

    #[test]
    fn test_change_key_both_directions() {
        let mut heap = FibonacciHeap::new();
        let handles: Vec<_> = (0..9).map(|k| heap.insert(k, k)).collect();
        heap.extract_min().unwrap();
        // Key 1 roots a degree-3 tree
        assert_eq!(heap.root_degrees(), vec![3]);

        assert_eq!(heap.change_key(&handles[1], 1), Err(HeapError::InvalidKey));

        heap.change_key(&handles[1], 100).unwrap();
        assert_eq!(heap.peek_min(), Ok((&2, &2)));
        assert_eq!(heap.root_count(), 4);
        assert_eq!(heap.check_invariants(), Ok(()));

        heap.change_key(&handles[8], -5).unwrap();
        assert_eq!(heap.peek_min(), Ok((&-5, &8)));
        assert_eq!(heap.check_invariants(), Ok(()));

        let keys: Vec<i32> = heap.into_sorted_vec().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![-5, 2, 3, 4, 5, 6, 7, 100]);
    }

    #[test]
    fn test_increase_key_of_inner_node() {
        let mut heap = FibonacciHeap::new();
        let handles: Vec<_> = (0..17).map(|k| heap.insert(k, k)).collect();
        heap.extract_min().unwrap();

        // Key 2 sits directly under the root
        heap.change_key(&handles[2], 50).unwrap();
        assert_eq!(heap.peek_min(), Ok((&1, &1)));
        assert_eq!(heap.get(&handles[2]), Ok((&50, &2)));
        assert_eq!(heap.check_invariants(), Ok(()));

        let keys: Vec<i32> = heap.into_sorted_vec().into_iter().map(|(k, _)| k).collect();
        let mut expected: Vec<i32> = (1..17).filter(|&k| k != 2).collect();
        expected.push(50);
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_meld() {
        let mut a = FibonacciHeap::new();
        for k in [1, 5, 9] {
            a.insert(k, ());
        }
        let mut b = FibonacciHeap::new();
        for k in [2, 4] {
            b.insert(k, ());
        }

        a.meld(b);
        assert_eq!(a.size(), 5);
        assert_eq!(a.check_invariants(), Ok(()));
        let keys: Vec<i32> = a.into_sorted_vec().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![1, 2, 4, 5, 9]);
    }

    #[test]
    fn test_meld_preserves_structure_and_own_handles() {
        let mut a = FibonacciHeap::new();
        let ha: Vec<_> = (0..9).map(|k| a.insert(k * 2, k)).collect();
        a.extract_min().unwrap();

        let mut b = FibonacciHeap::new();
        let hb: Vec<_> = (0..9).map(|k| b.insert(k * 2 + 1, k)).collect();
        b.extract_min().unwrap();

        a.meld(b);
        assert_eq!(a.size(), 16);
        assert_eq!(a.peek_min(), Ok((&2, &1)));
        assert_eq!(a.check_invariants(), Ok(()));

        assert!(a.contains(&ha[4]));
        assert_eq!(a.get(&hb[4]), Err(HeapError::InvalidHandle));
        // Melded elements are no longer addressable, and refusing them
        // leaves the heap untouched
        assert_eq!(a.decrease_key(&hb[4], -10), Err(HeapError::InvalidHandle));
        assert_eq!(a.change_key(&hb[4], -10), Err(HeapError::InvalidHandle));
        assert_eq!(a.delete(&hb[4]), Err(HeapError::InvalidHandle));
        assert_eq!(a.size(), 16);
        assert_eq!(a.peek_min(), Ok((&2, &1)));
        a.decrease_key(&ha[8], -1).unwrap();
        assert_eq!(a.peek_min(), Ok((&-1, &8)));
        assert_eq!(a.check_invariants(), Ok(()));
    }

    #[test]
    fn test_meld_into_empty_adopts_other() {
        let mut a: FibonacciHeap<i32, &str> = FibonacciHeap::new();
        let mut b = FibonacciHeap::new();
        let h = b.insert(3, "x");

        a.meld(b);
        assert_eq!(a.size(), 1);
        assert_eq!(a.get(&h), Ok((&3, &"x")));

        a.meld(FibonacciHeap::new());
        assert_eq!(a.size(), 1);
    }

    #[test]
    fn test_value_mut_and_clear() {
        let mut heap = FibonacciHeap::new();
        let h = heap.insert(1, String::from("one"));
        heap.value_mut(&h).unwrap().push('!');
        assert_eq!(heap.get(&h), Ok((&1, &String::from("one!"))));

        let gone = heap.insert(0, String::from("zero"));
        heap.extract_min().unwrap();
        assert_eq!(heap.value_mut(&gone), Err(HeapError::InvalidHandle));

        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.value_mut(&h), Err(HeapError::InvalidHandle));
    }

    #[test]
    fn test_from_iterator() {
        let heap: FibonacciHeap<u8, char> = [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
        assert_eq!(heap.size(), 3);
        assert_eq!(
            heap.into_sorted_vec(),
            vec![(1, 'a'), (2, 'b'), (3, 'c')]
        );
    }
}
