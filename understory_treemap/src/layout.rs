// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slice-and-dice treemap layout.

use alloc::{vec, vec::Vec};
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Rect;

use crate::tree::Tree;
use crate::types::{Flavor, NodeId};

/// How close a strip's trailing edge must land to the container's trailing edge to be snapped
/// onto it.
const CLOSE_TOLERANCE: f64 = 0.001;

impl<F: Flavor> Tree<F> {
    /// Lay out the subtree rooted at `id` inside `rect`.
    ///
    /// `id` receives `rect`. If it has children and a non-zero size, `rect` is cut into
    /// contiguous strips, one per child in stored order, each proportional to the child's share
    /// of `id`'s size:
    ///
    /// - when `rect` is at least as wide as it is tall, strips are vertical and run left to right;
    /// - otherwise strips are horizontal and run top to bottom.
    ///
    /// Strip extents are floored to whole units and the discarded fractions are carried forward,
    /// so the strip whose trailing edge reaches the container's edge (within 0.001) is stretched
    /// to close it exactly. Each child is then laid out inside its strip.
    ///
    /// A node with size 0 is not subdivided, even if it has children; their rectangles keep
    /// whatever the previous layout gave them.
    ///
    /// Degenerate rectangles are accepted and produce degenerate strips.
    pub fn layout(&mut self, id: NodeId, rect: Rect) {
        // Pending (node, rect) assignments. Children are pushed in reverse so that they pop in
        // stored order, matching a recursive pre-order walk.
        let mut stack = vec![(id, rect)];
        let mut strips: Vec<(NodeId, Rect)> = Vec::new();

        while let Some((id, rect)) = stack.pop() {
            self.node_mut(id).rect = rect;
            let node = self.node(id);
            if node.children.is_empty() || node.size == 0 {
                continue;
            }

            let total = node.size as f64;
            let vertical_strips = rect.width() >= rect.height();
            let (origin, extent) = if vertical_strips {
                (rect.x0, rect.width())
            } else {
                (rect.y0, rect.height())
            };
            let end = origin + extent;

            let mut leading = origin;
            let mut delta = 0.0;
            strips.clear();
            for &child in &node.children {
                let ideal = self.node(child).size as f64 / total * extent;
                let len = if (leading + ideal + delta - end).abs() < CLOSE_TOLERANCE {
                    delta = 0.0;
                    end - leading
                } else {
                    let floored = ideal.floor();
                    delta += ideal - floored;
                    floored
                };
                let strip = if vertical_strips {
                    Rect::new(leading, rect.y0, leading + len, rect.y1)
                } else {
                    Rect::new(rect.x0, leading, rect.x1, leading + len)
                };
                strips.push((child, strip));
                leading += len;
            }
            stack.extend(strips.drain(..).rev());
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{Dotted, leaf_row};
    use crate::{NodeId, Tree};
    use alloc::{format, vec::Vec};
    use kurbo::Rect;
    use proptest::prelude::*;

    #[test]
    fn three_strips_close_exactly() {
        let (mut tree, root, leaves) = leaf_row(&[10, 20, 30]);
        tree.layout(root, Rect::new(0.0, 0.0, 60.0, 10.0));

        assert_eq!(tree.rect(root), Rect::new(0.0, 0.0, 60.0, 10.0));
        assert_eq!(tree.rect(leaves[0]), Rect::from_origin_size((0.0, 0.0), (10.0, 10.0)));
        assert_eq!(tree.rect(leaves[1]), Rect::from_origin_size((10.0, 0.0), (20.0, 10.0)));
        assert_eq!(tree.rect(leaves[2]), Rect::from_origin_size((30.0, 0.0), (30.0, 10.0)));
    }

    #[test]
    fn tall_rect_splits_horizontally() {
        let (mut tree, root, leaves) = leaf_row(&[1, 3]);
        tree.layout(root, Rect::new(5.0, 5.0, 15.0, 45.0));

        assert_eq!(tree.rect(leaves[0]), Rect::new(5.0, 5.0, 15.0, 15.0));
        assert_eq!(tree.rect(leaves[1]), Rect::new(5.0, 15.0, 15.0, 45.0));
    }

    #[test]
    fn rounding_error_is_carried() {
        let (mut tree, root, leaves) = leaf_row(&[1, 1, 1]);
        tree.layout(root, Rect::new(0.0, 0.0, 10.0, 2.0));

        let widths: Vec<f64> = leaves.iter().map(|&l| tree.rect(l).width()).collect();
        assert_eq!(widths, [3.0, 3.0, 4.0]);
        assert_eq!(tree.rect(leaves[2]).x1, 10.0);
    }

    #[test]
    fn nested_layout_alternates_with_shape() {
        let mut tree = Tree::new(Dotted);
        let a1 = tree.insert_leaf(None, "a1", 1, "m");
        let a2 = tree.insert_leaf(None, "a2", 1, "m");
        let a = tree.insert_category(None, "a", [a1, a2]);
        let b = tree.insert_leaf(None, "b", 2, "m");
        let root = tree.insert_category(None, "root", [a, b]);

        tree.layout(root, Rect::new(0.0, 0.0, 40.0, 20.0));
        // Root is wide: a and b are side by side. Each half is square, so a splits left/right.
        assert_eq!(tree.rect(a), Rect::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(tree.rect(b), Rect::new(20.0, 0.0, 40.0, 20.0));
        assert_eq!(tree.rect(a1), Rect::new(0.0, 0.0, 10.0, 20.0));
        assert_eq!(tree.rect(a2), Rect::new(10.0, 0.0, 20.0, 20.0));
    }

    #[test]
    fn zero_size_node_keeps_stale_children() {
        let (mut tree, root, leaves) = leaf_row(&[5, 5]);
        tree.layout(root, Rect::new(0.0, 0.0, 10.0, 10.0));
        let before = tree.rect(leaves[1]);

        tree.node_mut(root).size = 0;
        tree.layout(root, Rect::new(100.0, 100.0, 200.0, 200.0));
        assert_eq!(tree.rect(root), Rect::new(100.0, 100.0, 200.0, 200.0));
        assert_eq!(tree.rect(leaves[1]), before, "children of a zero-size node stay stale");
    }

    #[test]
    fn zero_size_child_gets_empty_strip() {
        let (mut tree, root, leaves) = leaf_row(&[4, 0, 6]);
        tree.layout(root, Rect::new(0.0, 0.0, 10.0, 1.0));

        assert_eq!(tree.rect(leaves[1]), Rect::new(4.0, 0.0, 4.0, 1.0));
        assert_eq!(tree.rect(leaves[2]), Rect::new(4.0, 0.0, 10.0, 1.0));
    }

    #[test]
    fn degenerate_rect_is_accepted() {
        let (mut tree, root, leaves) = leaf_row(&[1, 2]);
        tree.layout(root, Rect::ZERO);
        for leaf in leaves {
            assert_eq!(tree.rect(leaf).area(), 0.0);
        }
    }

    fn strips_tile(tree: &Tree<Dotted>, parent: NodeId) -> bool {
        let outer = tree.rect(parent);
        let vertical = outer.width() >= outer.height();
        let (mut cursor, end) = if vertical {
            (outer.x0, outer.x1)
        } else {
            (outer.y0, outer.y1)
        };
        for &child in tree.children_of(parent) {
            let r = tree.rect(child);
            let (lead, trail, cross) = if vertical {
                (r.x0, r.x1, (r.y0, r.y1) == (outer.y0, outer.y1))
            } else {
                (r.y0, r.y1, (r.x0, r.x1) == (outer.x0, outer.x1))
            };
            if lead != cursor || trail < lead || !cross {
                return false;
            }
            cursor = trail;
        }
        cursor == end
    }

    proptest! {
        #[test]
        fn children_tile_parent(
            sizes in proptest::collection::vec(0_u64..1_000, 1..12),
            w in 0_u32..500,
            h in 0_u32..500,
        ) {
            prop_assume!(sizes.iter().sum::<u64>() > 0);
            let (mut tree, root, _) = leaf_row(&sizes);
            tree.layout(root, Rect::new(0.0, 0.0, f64::from(w), f64::from(h)));
            prop_assert!(strips_tile(&tree, root));
        }

        #[test]
        fn every_sized_category_tiles_its_rect(
            groups in proptest::collection::vec(proptest::collection::vec(0_u64..100, 0..5), 1..6),
            x0 in -400_i32..400,
            y0 in -400_i32..400,
            w in 0_u32..300,
            h in 0_u32..300,
        ) {
            let mut tree = Tree::new(Dotted);
            let categories: Vec<NodeId> = groups
                .iter()
                .enumerate()
                .map(|(i, sizes)| {
                    let leaves: Vec<NodeId> = sizes
                        .iter()
                        .map(|&size| tree.insert_leaf(None, "leaf", size, "m"))
                        .collect();
                    tree.insert_category(None, format!("g{i}"), leaves)
                })
                .collect();
            let root = tree.insert_category(None, "root", categories);

            // Quarter-unit origins keep every edge exactly representable.
            let origin = (f64::from(x0) / 4.0, f64::from(y0) / 4.0);
            let rect = Rect::from_origin_size(origin, (f64::from(w), f64::from(h)));
            tree.layout(root, rect);

            let internal: Vec<NodeId> = tree
                .descendants(root)
                .filter(|&n| !tree.is_leaf(n) && tree.size(n) > 0)
                .collect();
            for node in internal {
                prop_assert!(strips_tile(&tree, node), "{} does not tile", tree.name(node).unwrap());
            }
        }
    }
}
