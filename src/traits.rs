//! Common traits for priority queues
//!
//! This module provides a two-tier trait hierarchy:
//!
//! - [`PriorityQueue`]: Base contract for a min-queue of `(key, value)` pairs
//! - [`AddressableQueue`]: Extends it with handles, `decrease_key` and `delete`
//!
//! Clients such as single-source shortest-path routines only need
//! [`AddressableQueue`]: seed every vertex with `push_with_handle`, keep the
//! handles indexed by vertex, repeatedly `extract_min`, and `decrease_key`
//! whenever a shorter tentative distance shows up.

use std::fmt;

/// Error type for queue operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeapError {
    /// `peek_min` or `extract_min` on a queue holding no elements
    EmptyQueue,
    /// The new key is greater than the current key (or, for `change_key`,
    /// equal to it)
    InvalidKey,
    /// The handle was never issued by this queue, or its element has
    /// already been extracted or deleted
    InvalidHandle,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyQueue => write!(f, "queue is empty"),
            HeapError::InvalidKey => {
                write!(f, "new key is not a valid replacement for the current key")
            }
            HeapError::InvalidHandle => {
                write!(f, "handle is not live in this queue (removed or foreign)")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A handle to an element in a queue, used for `decrease_key` and `delete`
///
/// Handles are non-owning: they stay cheap to copy around and simply stop
/// resolving once their element leaves the queue.
pub trait Handle: Clone + PartialEq + Eq {}

/// Base trait for min-priority queues of `(key, value)` pairs
///
/// The value is an opaque payload; only the key participates in ordering.
///
/// # Example
///
/// ```rust
/// use fibonacci_pq::{FibonacciHeap, HeapError, PriorityQueue};
///
/// let mut queue: FibonacciHeap<i32, &str> = PriorityQueue::new();
/// queue.push(3, "three");
/// queue.push(1, "one");
///
/// assert_eq!(queue.peek_min(), Ok((&1, &"one")));
/// assert_eq!(queue.extract_min(), Ok((1, "one")));
/// assert_eq!(queue.extract_min(), Ok((3, "three")));
/// assert_eq!(queue.extract_min(), Err(HeapError::EmptyQueue));
/// ```
pub trait PriorityQueue<K: Ord, V> {
    /// Creates a new empty queue
    fn new() -> Self;

    /// Returns true if the queue holds no elements
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the queue
    fn size(&self) -> usize;

    /// Inserts an element, discarding its handle
    fn push(&mut self, key: K, value: V);

    /// Returns the minimum key and its value without removing them
    ///
    /// # Errors
    /// [`HeapError::EmptyQueue`] if the queue is empty.
    fn peek_min(&self) -> Result<(&K, &V), HeapError>;

    /// Removes and returns the minimum key and its value
    ///
    /// # Errors
    /// [`HeapError::EmptyQueue`] if the queue is empty.
    fn extract_min(&mut self) -> Result<(K, V), HeapError>;

    /// Merges another queue into this one, consuming it
    fn meld(&mut self, other: Self);
}

/// Extended queue trait with handle-based operations
///
/// # Example
///
/// ```rust
/// use fibonacci_pq::{AddressableQueue, FibonacciHeap, HeapError, PriorityQueue};
///
/// let mut queue: FibonacciHeap<u32, char> = PriorityQueue::new();
/// let a = queue.push_with_handle(10, 'a');
/// let b = queue.push_with_handle(20, 'b');
///
/// queue.decrease_key(&b, 5).unwrap();
/// assert_eq!(queue.peek_min(), Ok((&5, &'b')));
/// assert_eq!(queue.decrease_key(&a, 11), Err(HeapError::InvalidKey));
///
/// queue.delete(&b).unwrap();
/// assert_eq!(queue.delete(&b), Err(HeapError::InvalidHandle));
/// assert_eq!(queue.size(), 1);
/// ```
pub trait AddressableQueue<K: Ord, V>: PriorityQueue<K, V> {
    /// The handle type for this queue
    type Handle: Handle;

    /// Inserts an element, returning a handle to it
    ///
    /// # Time Complexity
    /// O(1) for the Fibonacci heap
    fn push_with_handle(&mut self, key: K, value: V) -> Self::Handle;

    /// Lowers the key of the element identified by `handle`
    ///
    /// A new key equal to the current key is accepted and leaves the
    /// structure unchanged.
    ///
    /// # Errors
    /// - [`HeapError::InvalidKey`] if `new_key` is greater than the current key
    /// - [`HeapError::InvalidHandle`] if the handle is stale or foreign
    ///
    /// # Time Complexity
    /// O(1) amortized for the Fibonacci heap
    fn decrease_key(&mut self, handle: &Self::Handle, new_key: K) -> Result<(), HeapError>;

    /// Removes the element identified by `handle`, returning it
    ///
    /// # Errors
    /// [`HeapError::InvalidHandle`] if the handle is stale or foreign.
    ///
    /// # Time Complexity
    /// O(log n) amortized for the Fibonacci heap
    fn delete(&mut self, handle: &Self::Handle) -> Result<(K, V), HeapError>;
}
