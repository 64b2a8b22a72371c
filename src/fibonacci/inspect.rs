//! Read-only observers over the heap arena
//!
//! Nothing here mutates the heap. [`FibonacciHeap::check_invariants`] walks
//! every tree with an explicit work-list and reports the first structural
//! violation it finds; [`FibonacciHeap::tree_view`] renders the root ring and
//! the nested child rings for debugging.

use super::FibonacciHeap;
use crate::storage::NodeKey;
use std::fmt;

/// A broken structural invariant, as found by
/// [`FibonacciHeap::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A child's key is smaller than its parent's.
    HeapOrder,
    /// `left`/`right` are not mutual inverses somewhere in a ring.
    BrokenRing,
    /// A child's `parent` link does not point at the node owning its ring.
    WrongParent,
    /// A node's `degree` differs from the size of its child ring.
    DegreeMismatch { expected: usize, actual: usize },
    /// A root carries a mark.
    MarkedRoot,
    /// The minimum pointer is missing, or a root has a smaller key.
    StaleMinimum,
    /// The element count disagrees with the number of reachable nodes.
    CountMismatch { counted: usize, len: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::HeapOrder => write!(f, "child key below parent key"),
            InvariantViolation::BrokenRing => write!(f, "sibling links are not mutual inverses"),
            InvariantViolation::WrongParent => write!(f, "child ring member has wrong parent link"),
            InvariantViolation::DegreeMismatch { expected, actual } => {
                write!(f, "degree is {actual} but child ring holds {expected}")
            }
            InvariantViolation::MarkedRoot => write!(f, "root node is marked"),
            InvariantViolation::StaleMinimum => write!(f, "minimum pointer is not the minimum root"),
            InvariantViolation::CountMismatch { counted, len } => {
                write!(f, "reached {counted} nodes but len is {len}")
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

impl<K: Ord, V> FibonacciHeap<K, V> {
    /// Number of trees in the root ring.
    pub fn root_count(&self) -> usize {
        self.min.map_or(0, |min| self.ring_members(min).len())
    }

    /// Degrees of the roots, in ring order starting from the minimum.
    ///
    /// Immediately after an `extract_min` these are pairwise distinct.
    pub fn root_degrees(&self) -> Vec<usize> {
        self.min.map_or_else(Vec::new, |min| {
            self.ring_members(min)
                .into_iter()
                .map(|n| self.nodes[n].degree as usize)
                .collect()
        })
    }

    /// Verifies heap order, ring links, parent links, degrees, marks, the
    /// minimum pointer and the element count.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let Some(min) = self.min else {
            return match (self.len, self.nodes.len()) {
                (0, 0) => Ok(()),
                (len, counted) => Err(InvariantViolation::CountMismatch { counted, len }),
            };
        };

        let roots = self.ring_checked(min)?;
        let mut counted = 0usize;
        let mut stack: Vec<NodeKey> = Vec::with_capacity(roots.len());
        for &root in &roots {
            let r = &self.nodes[root];
            if r.parent.is_some() {
                return Err(InvariantViolation::WrongParent);
            }
            if r.marked {
                return Err(InvariantViolation::MarkedRoot);
            }
            if r.key < self.nodes[min].key {
                return Err(InvariantViolation::StaleMinimum);
            }
            stack.push(root);
        }

        while let Some(n) = stack.pop() {
            counted += 1;
            let node = &self.nodes[n];
            let children = match node.child {
                Some(first) => self.ring_checked(first)?,
                None => Vec::new(),
            };
            if children.len() != node.degree as usize {
                return Err(InvariantViolation::DegreeMismatch {
                    expected: children.len(),
                    actual: node.degree as usize,
                });
            }
            for c in children {
                let child = &self.nodes[c];
                if child.parent != Some(n) {
                    return Err(InvariantViolation::WrongParent);
                }
                if child.key < node.key {
                    return Err(InvariantViolation::HeapOrder);
                }
                stack.push(c);
            }
        }

        if counted != self.len || counted != self.nodes.len() {
            return Err(InvariantViolation::CountMismatch {
                counted,
                len: self.len,
            });
        }
        Ok(())
    }

    /// Like `ring_members`, but refuses to loop on a ring that never
    /// returns to its start and checks every `right`/`left` pair.
    fn ring_checked(&self, start: NodeKey) -> Result<Vec<NodeKey>, InvariantViolation> {
        let mut members = Vec::new();
        let mut current = start;
        loop {
            let right = self
                .nodes
                .get(current)
                .map(|n| n.right)
                .ok_or(InvariantViolation::BrokenRing)?;
            match self.nodes.get(right) {
                Some(r) if r.left == current => {}
                _ => return Err(InvariantViolation::BrokenRing),
            }
            members.push(current);
            if members.len() > self.nodes.len() {
                return Err(InvariantViolation::BrokenRing);
            }
            current = right;
            if current == start {
                return Ok(members);
            }
        }
    }

    /// Returns a [`Display`](fmt::Display) rendering of the whole forest.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fibonacci_pq::FibonacciHeap;
    ///
    /// let mut heap = FibonacciHeap::new();
    /// heap.insert(2, 'b');
    /// heap.insert(1, 'a');
    /// heap.insert(3, 'c');
    /// heap.extract_min().unwrap();
    ///
    /// let text = heap.tree_view().to_string();
    /// assert!(text.starts_with("heap: 2 nodes, 1 roots"));
    /// assert!(text.contains("- 2 'b' degree=1"));
    /// assert!(text.contains("  - 3 'c' degree=0"));
    /// ```
    pub fn tree_view(&self) -> TreeView<'_, K, V> {
        TreeView {
            heap: self,
            max_depth: None,
        }
    }
}

/// Indented text rendering of a [`FibonacciHeap`], one node per line:
/// key, value, degree and (when set) the mark.
pub struct TreeView<'a, K, V> {
    heap: &'a FibonacciHeap<K, V>,
    max_depth: Option<usize>,
}

impl<K, V> TreeView<'_, K, V> {
    /// Stops descending below `depth` levels; roots are at depth 0.
    /// Truncated child rings are summarised by their size.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Display for TreeView<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heap = self.heap;
        let Some(min) = heap.min else {
            return writeln!(f, "heap: empty");
        };
        let roots = heap.ring_members(min);
        writeln!(f, "heap: {} nodes, {} roots", heap.len, roots.len())?;

        // Reverse pushes keep ring order when popping
        let mut stack: Vec<(NodeKey, usize)> = roots.into_iter().rev().map(|r| (r, 0)).collect();
        while let Some((n, depth)) = stack.pop() {
            let node = &heap.nodes[n];
            write!(
                f,
                "{:indent$}- {:?} {:?} degree={}",
                "",
                node.key,
                node.value,
                node.degree,
                indent = depth * 2
            )?;
            if node.marked {
                write!(f, " marked")?;
            }
            writeln!(f)?;

            let Some(first) = node.child else {
                continue;
            };
            if self.max_depth.is_some_and(|max| depth >= max) {
                writeln!(f, "{:indent$}  ... {} children", "", node.degree, indent = depth * 2)?;
                continue;
            }
            let children = heap.ring_members(first);
            stack.extend(children.into_iter().rev().map(|c| (c, depth + 1)));
        }
        Ok(())
    }
}
