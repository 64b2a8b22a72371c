//! Fibonacci heap priority queue with decrease-key support
//!
//! This crate provides a mergeable min-priority queue over `(key, value)`
//! pairs, implemented as a Fibonacci heap on top of a generational arena.
//!
//! # Complexity
//!
//! | Operation | Cost |
//! |---|---|
//! | `insert`, `peek_min`, `decrease_key` | O(1) amortized |
//! | `extract_min`, `delete` | O(log n) amortized |
//! | `meld` | O(1) ring splice, plus moving the consumed heap's records |
//!
//! # Example
//!
//! ```rust
//! use fibonacci_pq::FibonacciHeap;
//!
//! let mut heap = FibonacciHeap::new();
//! let handle1 = heap.insert(5, "item1");
//! let _handle2 = heap.insert(3, "item2");
//! heap.decrease_key(&handle1, 1).unwrap();
//! assert_eq!(heap.peek_min(), Ok((&1, &"item1")));
//! ```
//!
//! Handles are non-owning and checked: once their element is extracted or
//! deleted, or when used with a different heap, operations report
//! [`HeapError::InvalidHandle`] instead of touching memory they do not own.
//!
//! The heap is single-threaded; share it behind a lock if needed.

pub mod degree;
pub mod fibonacci;
mod storage;
pub mod traits;

// Re-export the main types for convenience
pub use fibonacci::{FibonacciHandle, FibonacciHeap, InvariantViolation, TreeView};
pub use traits::{AddressableQueue, Handle, HeapError, PriorityQueue};
