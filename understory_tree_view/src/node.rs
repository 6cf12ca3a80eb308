// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The owned tree shipped with the crate.

use alloc::string::String;
use alloc::vec::Vec;

use understory_tree_walk::{TreeNode, TreeNodeMut, depth_first_nodes};

use crate::Expander;

/// What the tree view needs from each node: a label and an expander.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Item {
    /// Text shown in the header row.
    pub label: String,
    /// Expand/collapse state of this node.
    pub expander: Expander,
}

impl Item {
    /// A collapsed item with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            expander: Expander::collapsed(),
        }
    }
}

/// A tree node that owns its children, stored contiguously in insertion order.
///
/// Any other container works with the layout pass as long as it implements
/// [`TreeNodeMut`] with [`Item`] values; this is just the common case.
///
/// ```
/// use understory_tree_view::Node;
/// use understory_tree_walk::depth_first;
///
/// let tree = Node::new("root").with_children([
///     Node::new("A").with_children([Node::new("A1"), Node::new("A2")]),
///     Node::new("B"),
/// ]);
///
/// let labels: Vec<&str> = depth_first(&tree).map(|item| item.label.as_str()).collect();
/// assert_eq!(labels, ["root", "A", "A1", "A2", "B"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    /// This node's payload.
    pub item: Item,
    /// Owned children, in display order.
    pub children: Vec<Node>,
}

impl Node {
    /// A collapsed leaf.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            item: Item::new(label),
            children: Vec::new(),
        }
    }

    /// Append `children` after any existing ones.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Start out fully expanded instead of collapsed.
    #[must_use]
    pub fn expanded(mut self) -> Self {
        self.item.expander = Expander::expanded();
        self
    }

    /// Append a child and return it for further building.
    pub fn push(&mut self, child: Self) -> &mut Self {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// The header label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.item.label
    }

    /// This node's expander.
    #[must_use]
    pub fn expander(&self) -> &Expander {
        &self.item.expander
    }

    /// The first node in pre-order whose label equals `label`.
    #[must_use]
    pub fn find(&self, label: &str) -> Option<&Self> {
        depth_first_nodes(self)
            .map(|visit| visit.node)
            .find(|node| node.item.label == label)
    }

    /// Follow child indices from this node.
    #[must_use]
    pub fn descendant_mut(&mut self, path: &[usize]) -> Option<&mut Self> {
        let mut node = self;
        for &index in path {
            node = node.children.get_mut(index)?;
        }
        Some(node)
    }
}

impl TreeNode for Node {
    type Value = Item;
    type Children<'a> = core::slice::Iter<'a, Self>;

    fn value(&self) -> &Item {
        &self.item
    }

    fn children(&self) -> Self::Children<'_> {
        self.children.iter()
    }
}

impl TreeNodeMut for Node {
    type ChildrenMut<'a> = core::slice::IterMut<'a, Self>;

    fn split_mut(&mut self) -> (&mut Item, Self::ChildrenMut<'_>) {
        (&mut self.item, self.children.iter_mut())
    }
}
