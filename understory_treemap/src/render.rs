// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy enumeration of the rectangles that make up the displayed treemap.

use alloc::{vec, vec::Vec};
use kurbo::Rect;

use crate::tree::Tree;
use crate::types::{Flavor, NodeId, Rgb};

impl<F: Flavor> Tree<F> {
    /// Iterate the nodes drawn for `id`'s displayed subtree, depth-first in stored child order.
    ///
    /// An expanded leaf is drawn as itself. A category is drawn as the union of what its
    /// children draw; when that is nothing and the category is expanded, the category itself is
    /// drawn as a single rectangle. The whole subtree is walked regardless of expansion, so
    /// expanded nodes below a collapsed ancestor are still reported.
    pub fn visible_nodes(&self, id: NodeId) -> VisibleNodes<'_, F> {
        VisibleNodes {
            tree: self,
            stack: vec![Frame::new(id, 0)],
            emitted: 0,
        }
    }

    /// Iterate `(rect, colour)` pairs for every node in [`Tree::visible_nodes`].
    ///
    /// This is the display list consumed by a renderer, in paint order.
    pub fn visible_rects(&self, id: NodeId) -> impl Iterator<Item = (Rect, Rgb)> + '_ {
        self.visible_nodes(id).map(|n| {
            let node = self.node(n);
            (node.rect, node.colour)
        })
    }
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    id: NodeId,
    next_child: usize,
    /// Value of the emitted counter when this frame was entered.
    emitted_before: usize,
}

impl Frame {
    fn new(id: NodeId, emitted_before: usize) -> Self {
        Self {
            id,
            next_child: 0,
            emitted_before,
        }
    }
}

/// Iterator returned by [`Tree::visible_nodes`].
#[derive(Debug)]
pub struct VisibleNodes<'a, F: Flavor> {
    tree: &'a Tree<F>,
    stack: Vec<Frame>,
    emitted: usize,
}

impl<F: Flavor> Iterator for VisibleNodes<'_, F> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            let frame = self.stack.last_mut()?;
            let node = self.tree.node(frame.id);

            if let Some(&child) = node.children.get(frame.next_child) {
                frame.next_child += 1;
                self.stack.push(Frame::new(child, self.emitted));
                continue;
            }

            // All children done (or none): decide whether this node draws itself.
            let frame = *frame;
            self.stack.pop();
            if node.expanded && self.emitted == frame.emitted_before {
                self.emitted += 1;
                return Some(frame.id);
            }
        }
    }
}
