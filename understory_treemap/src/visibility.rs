// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expand/collapse state transitions.
//!
//! The `expanded` flag marks a node as part of the displayed treemap. [`Tree::collapse`] and
//! [`Tree::collapse_all`] act on the whole tree containing the node rather than on the node's own
//! subtree; interactive clients depend on that behavior.

use alloc::vec;

use crate::tree::Tree;
use crate::types::{Flavor, NodeId};

impl<F: Flavor> Tree<F> {
    /// Mark `id` and its direct children as expanded.
    ///
    /// Grandchildren are unaffected.
    pub fn expand(&mut self, id: NodeId) {
        self.node_mut(id).expanded = true;
        let children = self.node(id).children.clone();
        for child in children {
            self.node_mut(child).expanded = true;
        }
    }

    /// Mark `id` and its entire subtree as expanded.
    pub fn expand_all(&mut self, id: NodeId) {
        self.set_subtree_expanded(id, true);
    }

    /// Collapse the tree containing `id` down to `id`'s parent.
    ///
    /// Every node of the containing tree is collapsed, root down, and then only the parent of
    /// `id` is re-expanded. Afterwards the parent is the only expanded node, so even `id`'s
    /// siblings and the parent's ancestors are collapsed.
    ///
    /// Does nothing for roots.
    pub fn collapse(&mut self, id: NodeId) {
        let Some(parent) = self.parent_of(id) else {
            return;
        };
        let root = self.root_of(id);
        self.set_subtree_expanded(root, false);
        self.node_mut(parent).expanded = true;
    }

    /// Collapse from the root's first child.
    ///
    /// This walks to the root of the tree containing `id` and calls [`Tree::collapse`] on the
    /// root's first child only, leaving the root as the single expanded node.
    ///
    /// Does nothing for roots.
    pub fn collapse_all(&mut self, id: NodeId) {
        if self.parent_of(id).is_none() {
            return;
        }
        let root = self.root_of(id);
        if let Some(&first) = self.children_of(root).first() {
            self.collapse(first);
        }
    }

    fn set_subtree_expanded(&mut self, id: NodeId, expanded: bool) {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let node = self.node_mut(next);
            node.expanded = expanded;
            stack.extend(node.children.iter().rev().copied());
        }
    }
}
