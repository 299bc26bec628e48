// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural and size edits.

use alloc::vec::Vec;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::tree::Tree;
use crate::types::{Flavor, NodeId};

impl<F: Flavor> Tree<F> {
    /// Move `leaf` to the end of `destination`'s children.
    ///
    /// Applies only when `leaf` is a non-root leaf and `destination` has at least one child;
    /// otherwise nothing happens. Returns whether the move was applied.
    ///
    /// Only the old and new parents' sizes are adjusted. Ancestors further up keep their old
    /// sizes until [`Tree::recompute_sizes`] is called on one of them. The moved leaf is
    /// collapsed.
    pub fn move_leaf(&mut self, leaf: NodeId, destination: NodeId) -> bool {
        if !self.is_leaf(leaf) || self.is_leaf(destination) {
            return false;
        }
        let Some(old_parent) = self.parent_of(leaf) else {
            return false;
        };

        let size = self.size(leaf);
        let old = self.node_mut(old_parent);
        old.size = old.size.saturating_sub(size);
        self.unlink_parent(leaf, old_parent);

        self.link_parent(leaf, destination);
        let dest = self.node_mut(destination);
        dest.size = dest.size.saturating_add(size);
        self.node_mut(leaf).expanded = false;
        true
    }

    /// Scale a leaf's size by `factor`, rounding the change away from zero.
    ///
    /// The change is `ceil(size * |factor|)`, applied with the sign of `factor`, so any non-zero
    /// product moves the size by at least one unit. Shrinking saturates at zero.
    ///
    /// Nodes with children are never changed. Returns whether `id` was a leaf.
    pub fn change_size(&mut self, id: NodeId, factor: f64) -> bool {
        if !self.is_leaf(id) {
            return false;
        }
        let node = self.node_mut(id);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "The product is non-negative and saturates on conversion."
        )]
        let magnitude = (node.size as f64 * factor.abs()).ceil() as u64;
        node.size = if factor.is_sign_negative() {
            node.size.saturating_sub(magnitude)
        } else {
            node.size.saturating_add(magnitude)
        };
        true
    }

    /// Recompute every category size under `id` from its leaves and return `id`'s new size.
    ///
    /// A leaf's size is returned unchanged. Calling this again without intervening edits
    /// changes nothing.
    pub fn recompute_sizes(&mut self, id: NodeId) -> u64 {
        // Reverse pre-order visits every child before its parent.
        let order: Vec<NodeId> = self.descendants(id).collect();
        for &node in order.iter().rev() {
            if self.is_leaf(node) {
                continue;
            }
            let total = self
                .children_of(node)
                .iter()
                .fold(0_u64, |acc, &c| acc.saturating_add(self.size(c)));
            self.node_mut(node).size = total;
        }
        self.size(id)
    }
}

#[cfg(test)]
mod tests {
    use crate::Tree;
    use crate::testing::{Dotted, leaf_row};
    use proptest::prelude::*;

    #[test]
    fn move_adjusts_only_direct_parents() {
        let mut tree = Tree::new(Dotted);
        let root = tree.insert_category(None, "root", []);
        let a = tree.insert_category(Some(root), "a", []);
        let leaf = tree.insert_leaf(Some(a), "l", 5, "m");
        let _keep = tree.insert_leaf(Some(a), "k", 1, "m");
        let g = tree.insert_category(Some(root), "g", []);
        let b = tree.insert_category(Some(g), "b", []);
        let _b1 = tree.insert_leaf(Some(b), "b1", 2, "m");
        assert_eq!(tree.recompute_sizes(root), 8);
        tree.expand_all(root);

        assert!(tree.move_leaf(leaf, b));
        assert_eq!(tree.size(a), 1);
        assert_eq!(tree.size(b), 7);
        assert_eq!(tree.size(g), 2, "grandparent is stale until recompute");
        assert_eq!(tree.parent_of(leaf), Some(b));
        assert_eq!(tree.children_of(b).last(), Some(&leaf));
        assert!(!tree.children_of(a).contains(&leaf));
        assert!(!tree.is_expanded(leaf));

        assert_eq!(tree.recompute_sizes(root), 8);
        assert_eq!(tree.size(g), 7);
    }

    #[test]
    fn move_after_growth_clamps_old_parent() {
        let mut tree = Tree::new(Dotted);
        let root = tree.insert_category(None, "root", []);
        let a = tree.insert_category(Some(root), "a", []);
        let leaf = tree.insert_leaf(Some(a), "l", 4, "m");
        let b = tree.insert_category(Some(root), "b", []);
        let _b1 = tree.insert_leaf(Some(b), "b1", 1, "m");
        assert_eq!(tree.recompute_sizes(root), 5);

        assert!(tree.change_size(leaf, 1.0));
        assert_eq!(tree.size(leaf), 8);
        assert_eq!(tree.size(a), 4, "parent is stale after a resize");

        assert!(tree.move_leaf(leaf, b));
        assert_eq!(tree.size(a), 0, "stale parent saturates instead of wrapping");
        assert_eq!(tree.size(b), 9);
        assert_eq!(tree.recompute_sizes(root), 9);
    }

    #[test]
    fn move_rejects_invalid_targets() {
        let (mut tree, root, leaves) = leaf_row(&[1, 2]);
        assert!(!tree.move_leaf(leaves[0], leaves[1]), "destination must have children");
        assert!(!tree.move_leaf(root, root), "only leaves move");
        let lone = tree.insert_leaf(None, "lone", 3, "m");
        assert!(!tree.move_leaf(lone, root), "roots have no parent to leave");
        assert_eq!(tree.size(root), 3);
        assert_eq!(tree.children_of(root), &leaves[..]);
    }

    #[test]
    fn change_size_rounds_away_from_zero() {
        let (mut tree, _, leaves) = leaf_row(&[100, 3]);
        assert!(tree.change_size(leaves[0], -0.5));
        assert_eq!(tree.size(leaves[0]), 50);

        assert!(tree.change_size(leaves[1], 0.01));
        assert_eq!(tree.size(leaves[1]), 4, "a tiny factor still moves one unit");
        assert!(tree.change_size(leaves[1], -0.01));
        assert_eq!(tree.size(leaves[1]), 3);
    }

    #[test]
    fn change_size_clamps_at_zero() {
        let (mut tree, _, leaves) = leaf_row(&[10]);
        assert!(tree.change_size(leaves[0], -3.0));
        assert_eq!(tree.size(leaves[0]), 0);
    }

    #[test]
    fn change_size_ignores_categories() {
        let (mut tree, root, _) = leaf_row(&[10, 20]);
        assert!(!tree.change_size(root, 2.0));
        assert_eq!(tree.size(root), 30);
    }

    #[test]
    fn recompute_on_leaf_is_identity() {
        let (mut tree, _, leaves) = leaf_row(&[9]);
        assert_eq!(tree.recompute_sizes(leaves[0]), 9);
    }

    proptest! {
        #[test]
        fn recompute_restores_sum_invariant(
            sizes in proptest::collection::vec(0_u64..10_000, 1..10),
            factors in proptest::collection::vec(-2.0_f64..2.0, 1..10),
        ) {
            let (mut tree, root, leaves) = leaf_row(&sizes);
            for (leaf, factor) in leaves.iter().zip(&factors) {
                tree.change_size(*leaf, *factor);
            }
            let total = tree.recompute_sizes(root);
            let sum: u64 = leaves.iter().map(|&l| tree.size(l)).sum();
            prop_assert_eq!(total, sum);
            prop_assert_eq!(tree.recompute_sizes(root), total);
        }
    }
}
