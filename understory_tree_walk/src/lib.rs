// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tree_walk --heading-base-level=0

//! Understory Tree Walk: storage-agnostic tree capabilities and pre-order traversal.
//!
//! UI code often needs to walk a hierarchy without caring how that hierarchy
//! is stored. Children may live contiguously in a `Vec`, in a linked list, or
//! in some bespoke container. This crate describes a tree by two capabilities
//! only, a value accessor and an ordered child accessor, and builds traversal
//! on top of them.
//!
//! - [`TreeNode`]: shared access to a node's value and its children, in order.
//! - [`TreeNodeMut`]: the mutable counterpart, used by code that updates nodes
//!   while it walks them (for example a recursive layout pass).
//! - [`depth_first`]: a lazy pre-order sequence over node values.
//! - [`depth_first_nodes`]: the same order, yielding each node with its depth.
//!
//! Traversal keeps a path of open sibling ranges, one per depth level with the
//! innermost last. Advancing pulls the next sibling from the innermost range;
//! exhausted ranges are popped so the parent range advances, and the walk ends
//! when the path is empty. Each node's value is produced before any of its
//! descendants, and siblings are visited left to right.
//!
//! A traversal is single-pass: once drained it stays drained. Call
//! [`depth_first`] again for a fresh walk.
//!
//! ## Example
//!
//! ```rust
//! use understory_tree_walk::{TreeNode, depth_first};
//!
//! struct Item {
//!     name: &'static str,
//!     children: Vec<Item>,
//! }
//!
//! impl TreeNode for Item {
//!     type Value = str;
//!     type Children<'a> = core::slice::Iter<'a, Item>;
//!
//!     fn value(&self) -> &str {
//!         self.name
//!     }
//!
//!     fn children(&self) -> Self::Children<'_> {
//!         self.children.iter()
//!     }
//! }
//!
//! let leaf = |name| Item { name, children: Vec::new() };
//! let tree = Item {
//!     name: "root",
//!     children: vec![
//!         Item { name: "A", children: vec![leaf("A1"), leaf("A2")] },
//!         leaf("B"),
//!     ],
//! };
//!
//! let order: Vec<&str> = depth_first(&tree).collect();
//! assert_eq!(order, ["root", "A", "A1", "A2", "B"]);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

use core::iter::FusedIterator;

use smallvec::SmallVec;

/// Shared access to a tree-shaped container.
///
/// Implement this for your node type to make it walkable. The only
/// requirements are a value and an ordered sequence of child nodes; how the
/// children are stored is up to the implementation.
pub trait TreeNode {
    /// The payload carried by each node.
    type Value: ?Sized;

    /// Iterator over the direct children, in order.
    type Children<'a>: Iterator<Item = &'a Self>
    where
        Self: 'a;

    /// This node's value.
    fn value(&self) -> &Self::Value;

    /// This node's direct children, in order.
    fn children(&self) -> Self::Children<'_>;
}

/// Mutable access to a tree-shaped container.
///
/// Implementors provide [`TreeNodeMut::split_mut`]; the single-purpose
/// accessors are derived from it.
pub trait TreeNodeMut: TreeNode {
    /// Iterator over mutable references to the direct children, in order.
    type ChildrenMut<'a>: Iterator<Item = &'a mut Self>
    where
        Self: 'a;

    /// Borrow this node's value and its children mutably at the same time.
    fn split_mut(&mut self) -> (&mut Self::Value, Self::ChildrenMut<'_>);

    /// This node's value.
    fn value_mut(&mut self) -> &mut Self::Value {
        self.split_mut().0
    }

    /// This node's direct children, in order.
    fn children_mut(&mut self) -> Self::ChildrenMut<'_> {
        self.split_mut().1
    }
}

/// A node produced by [`DepthFirstNodes`], with its distance from the root.
#[derive(Debug)]
pub struct Visit<'a, T: ?Sized> {
    /// The visited node.
    pub node: &'a T,
    /// Depth below the traversal root; the root itself is at depth `0`.
    pub depth: usize,
}

impl<T: ?Sized> Clone for Visit<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Visit<'_, T> {}

/// Lazy pre-order traversal yielding nodes and their depths.
///
/// Created by [`depth_first_nodes`].
pub struct DepthFirstNodes<'a, T: TreeNode + 'a> {
    root: Option<&'a T>,
    // One open sibling range per level, innermost last. Most UI trees are
    // shallow enough to stay inline.
    path: SmallVec<[T::Children<'a>; 8]>,
}

impl<'a, T: TreeNode + 'a> core::fmt::Debug for DepthFirstNodes<'a, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DepthFirstNodes")
            .field("started", &self.root.is_none())
            .field("open_levels", &self.path.len())
            .finish_non_exhaustive()
    }
}

impl<'a, T: TreeNode + 'a> Iterator for DepthFirstNodes<'a, T> {
    type Item = Visit<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            self.path.push(root.children());
            return Some(Visit {
                node: root,
                depth: 0,
            });
        }

        while let Some(range) = self.path.last_mut() {
            if let Some(child) = range.next() {
                let depth = self.path.len();
                self.path.push(child.children());
                return Some(Visit { node: child, depth });
            }
            self.path.pop();
        }
        None
    }
}

impl<'a, T: TreeNode + 'a> FusedIterator for DepthFirstNodes<'a, T> {}

/// Lazy pre-order traversal yielding node values.
///
/// Created by [`depth_first`].
pub struct DepthFirst<'a, T: TreeNode + 'a> {
    inner: DepthFirstNodes<'a, T>,
}

impl<'a, T: TreeNode + 'a> core::fmt::Debug for DepthFirst<'a, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("DepthFirst").field(&self.inner).finish()
    }
}

impl<'a, T: TreeNode + 'a> DepthFirst<'a, T> {
    /// Continue the walk yielding nodes with their depths instead of values.
    #[must_use]
    pub fn with_depth(self) -> DepthFirstNodes<'a, T> {
        self.inner
    }
}

impl<'a, T: TreeNode + 'a> Iterator for DepthFirst<'a, T> {
    type Item = &'a T::Value;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|visit| visit.node.value())
    }
}

impl<'a, T: TreeNode + 'a> FusedIterator for DepthFirst<'a, T> {}

/// Walk `root` and its descendants in pre-order, yielding values.
pub fn depth_first<T: TreeNode>(root: &T) -> DepthFirst<'_, T> {
    DepthFirst {
        inner: depth_first_nodes(root),
    }
}

/// Walk `root` and its descendants in pre-order, yielding [`Visit`]s.
pub fn depth_first_nodes<T: TreeNode>(root: &T) -> DepthFirstNodes<'_, T> {
    DepthFirstNodes {
        root: Some(root),
        path: SmallVec::new(),
    }
}
