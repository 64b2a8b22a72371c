//! Node degree type and the golden-ratio degree bound.
//!
//! # Why u8?
//!
//! The degree of any node in a Fibonacci heap of `n` elements is at most
//! `log_φ(n)`, where φ is the golden ratio: a subtree whose root has degree
//! `d` contains at least `F(d+2) ≥ φ^d` nodes thanks to cascading cuts.
//! With 2⁶⁴ elements that is still below 93, so a `u8` leaves ample
//! headroom and keeps the node record small.

/// Type alias for the child count of a node.
pub type Degree = u8;

/// The golden ratio, `(1 + √5) / 2`.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Safely increment a degree, panicking on overflow.
///
/// # Panics
///
/// Panics if `degree == Degree::MAX`, which would require a heap with more
/// than φ²⁵⁵ elements and therefore indicates a broken degree bound.
///
/// # Example
///
/// ```rust
/// use fibonacci_pq::degree::checked_increment;
///
/// assert_eq!(checked_increment(5), 6);
/// ```
#[inline]
pub fn checked_increment(degree: Degree) -> Degree {
    degree
        .checked_add(1)
        .expect("degree overflow: the golden-ratio bound keeps degrees far below u8::MAX")
}

/// Decrement a degree, saturating at zero.
///
/// # Example
///
/// ```rust
/// use fibonacci_pq::degree::saturating_decrement;
///
/// assert_eq!(saturating_decrement(3), 2);
/// assert_eq!(saturating_decrement(0), 0);
/// ```
#[inline]
pub fn saturating_decrement(degree: Degree) -> Degree {
    degree.saturating_sub(1)
}

/// Upper bound on the root degree after consolidating a heap of `len` nodes.
///
/// Returns the smallest integer `D` with `D ≥ log_φ(len)`, floored at 1 so
/// that heaps with zero or one node still get a usable degree table.
///
/// # Example
///
/// ```rust
/// use fibonacci_pq::degree::max_degree_bound;
///
/// assert_eq!(max_degree_bound(0), 1);
/// assert_eq!(max_degree_bound(1), 1);
/// assert_eq!(max_degree_bound(100), 10);
/// ```
pub fn max_degree_bound(len: usize) -> usize {
    if len <= 1 {
        return 1;
    }
    let bound = ((len as f64).ln() / PHI.ln()).ceil() as usize;
    bound.max(1)
}
