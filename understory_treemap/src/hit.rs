// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point to displayed-leaf resolution.

use kurbo::Point;
use smallvec::SmallVec;

use crate::tree::Tree;
use crate::types::{Flavor, NodeId};
use crate::util::contains_inclusive;

/// A category being resolved: the next child to try and the best hit among those tried.
#[derive(Clone, Copy, Debug)]
struct Frame {
    id: NodeId,
    next_child: usize,
    best: Option<NodeId>,
}

impl<F: Flavor> Tree<F> {
    /// Return the displayed leaf of `id`'s subtree whose rectangle contains `point`.
    ///
    /// Rectangles are edge-inclusive and are those of the last [layout](Tree::layout) pass.
    /// Nothing is found unless `id` is expanded and its rectangle contains `point`.
    ///
    /// - A leaf resolves to itself.
    /// - A category resolves to whatever its children resolve to. When a point sits on the
    ///   boundary shared by two strips, the strip on the left wins for a vertical boundary and
    ///   the strip above wins for a horizontal one.
    /// - A category with no expanded descendants is drawn as one rectangle and resolves to
    ///   itself.
    pub fn locate(&self, id: NodeId, point: Point) -> Option<NodeId> {
        if !self.is_candidate(id, point) {
            return None;
        }
        if self.is_leaf(id) {
            return Some(id);
        }

        let mut stack: SmallVec<[Frame; 16]> = SmallVec::new();
        stack.push(Frame {
            id,
            next_child: 0,
            best: None,
        });
        loop {
            let frame = stack.last_mut()?;
            let children = &self.node(frame.id).children;

            if let Some(&child) = children.get(frame.next_child) {
                frame.next_child += 1;
                if !self.is_candidate(child, point) {
                    continue;
                }
                if self.is_leaf(child) {
                    frame.best = Some(self.fold_hit(frame.best, child));
                } else {
                    stack.push(Frame {
                        id: child,
                        next_child: 0,
                        best: None,
                    });
                }
                continue;
            }

            // Every child tried: settle this category.
            let done = *frame;
            stack.pop();
            let resolved = done
                .best
                .or_else(|| self.draws_only_itself(done.id).then_some(done.id));
            match (stack.last_mut(), resolved) {
                (None, _) => return resolved,
                (Some(parent), Some(hit)) => parent.best = Some(self.fold_hit(parent.best, hit)),
                (Some(_), None) => {}
            }
        }
    }

    fn is_candidate(&self, id: NodeId, point: Point) -> bool {
        let node = self.node(id);
        node.expanded && contains_inclusive(node.rect, point)
    }

    /// Whether an expanded category with children is drawn as a single rectangle.
    ///
    /// Only holds when no strict descendant is expanded. An expanded child fails it at once, so
    /// only the subtrees of collapsed children are ever scanned.
    fn draws_only_itself(&self, id: NodeId) -> bool {
        self.children_of(id)
            .iter()
            .all(|&child| self.descendants(child).all(|n| !self.is_expanded(n)))
    }

    /// Merge a later sibling's hit into the best hit so far.
    fn fold_hit(&self, best: Option<NodeId>, hit: NodeId) -> NodeId {
        match best {
            Some(earlier) => self.break_tie(earlier, hit),
            None => hit,
        }
    }

    /// Pick one of two hits that share a boundary.
    fn break_tie(&self, a: NodeId, b: NodeId) -> NodeId {
        let ra = self.node(a).rect;
        let rb = self.node(b).rect;
        if ra.x1 == rb.x0 {
            a
        } else if rb.x1 == ra.x0 {
            b
        } else if ra.y1 == rb.y0 {
            a
        } else if rb.y1 == ra.y0 {
            b
        } else {
            a
        }
    }
}
