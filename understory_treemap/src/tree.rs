// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: storage, insertion, accessors, and path strings.

use alloc::{string::String, vec, vec::Vec};
use kurbo::Rect;

use crate::types::{ColourSeq, Flavor, NodeId, Rgb};

const DEFAULT_COLOUR_SEED: u64 = 0x5EED_CAFE;

/// Arena of sized nodes that can be laid out as a treemap.
///
/// The type parameter `F` supplies the [`Flavor`]: path separator, path suffixes, and the
/// metadata type stored on nodes. There is no default flavor.
///
/// Every node is owned by the arena. A node's children are listed in insertion order and that
/// order drives both [layout](Tree::layout) and [hit-test](Tree::locate) tie-breaks. The parent
/// link is a plain back-reference used for upward walks.
///
/// A single arena may hold several independent roots.
///
/// ## Example
///
/// ```rust
/// use kurbo::Rect;
/// use understory_treemap::{Flavor, Tree};
///
/// struct Dotted;
///
/// impl Flavor for Dotted {
///     type Meta = ();
///     fn separator(&self) -> &str {
///         "."
///     }
///     fn suffix(&self, is_leaf: bool) -> &str {
///         if is_leaf { "" } else { "/" }
///     }
/// }
///
/// let mut tree = Tree::new(Dotted);
/// let a = tree.insert_leaf(None, "a", 10, ());
/// let b = tree.insert_leaf(None, "b", 30, ());
/// let root = tree.insert_category(None, "root", [a, b]);
/// assert_eq!(tree.size(root), 40);
///
/// tree.layout(root, Rect::new(0.0, 0.0, 40.0, 10.0));
/// assert_eq!(tree.rect(b), Rect::new(10.0, 0.0, 40.0, 10.0));
/// assert_eq!(tree.path_string(b, true), "root.b");
/// ```
pub struct Tree<F: Flavor> {
    flavor: F,
    nodes: Vec<Node<F::Meta>>,
    colours: ColourSeq,
}

impl<F: Flavor> core::fmt::Debug for Tree<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let roots = self.nodes.iter().filter(|n| n.parent.is_none()).count();
        let expanded = self.nodes.iter().filter(|n| n.expanded).count();
        f.debug_struct("Tree")
            .field("nodes_total", &self.nodes.len())
            .field("roots", &roots)
            .field("expanded", &expanded)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<M> {
    /// `None` marks the empty tree.
    pub(crate) name: Option<String>,
    pub(crate) size: u64,
    pub(crate) colour: Rgb,
    pub(crate) rect: Rect,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) expanded: bool,
    pub(crate) meta: Option<M>,
}

impl<M> Node<M> {
    fn new(name: Option<String>, size: u64, colour: Rgb, meta: Option<M>) -> Self {
        Self {
            name,
            size,
            colour,
            rect: Rect::ZERO,
            parent: None,
            children: Vec::new(),
            expanded: false,
            meta,
        }
    }
}

impl<F: Flavor> Tree<F> {
    /// Create an empty arena for the given flavor.
    pub fn new(flavor: F) -> Self {
        Self::with_colour_seed(flavor, DEFAULT_COLOUR_SEED)
    }

    /// Create an empty arena whose node colours come from a sequence seeded with `seed`.
    ///
    /// Two trees built with the same seed and the same insertion order get the same colours.
    pub fn with_colour_seed(flavor: F, seed: u64) -> Self {
        Self {
            flavor,
            nodes: Vec::new(),
            colours: ColourSeq::new(seed),
        }
    }

    /// The flavor this tree was created with.
    pub fn flavor(&self) -> &F {
        &self.flavor
    }

    /// Number of nodes ever inserted into this arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Insert a leaf with an externally supplied size.
    ///
    /// The new leaf is appended to `parent`'s children (or becomes a root when `parent` is
    /// `None`). Ancestor sizes are not touched; use [`TreeBuilder`](crate::TreeBuilder) for
    /// size-maintaining insertion, or call [`Tree::recompute_sizes`] afterwards.
    ///
    /// Attaching children to the empty-marker node is a logic error.
    pub fn insert_leaf(
        &mut self,
        parent: Option<NodeId>,
        name: impl Into<String>,
        size: u64,
        meta: F::Meta,
    ) -> NodeId {
        self.push(parent, Some(name.into()), size, Some(meta))
    }

    /// Insert a category node that adopts `children`, deriving its size from theirs.
    ///
    /// Each child must currently be a root of this arena; children that already have a parent,
    /// or that would close a cycle through `parent`, are left where they are.
    pub fn insert_category(
        &mut self,
        parent: Option<NodeId>,
        name: impl Into<String>,
        children: impl IntoIterator<Item = NodeId>,
    ) -> NodeId {
        let id = self.push(parent, Some(name.into()), 0, None);
        let enclosing_root = self.root_of(id);
        let mut size = 0_u64;
        for child in children {
            let c = self.node(child);
            if c.parent.is_some() || c.name.is_none() || child == enclosing_root {
                continue;
            }
            size = size.saturating_add(c.size);
            self.link_parent(child, id);
        }
        self.node_mut(id).size = size;
        id
    }

    /// Insert the empty-marker node: no name, no children, no parent, size 0.
    pub fn insert_empty(&mut self) -> NodeId {
        self.push(None, None, 0, None)
    }

    /// Returns true iff `id` is the empty-marker node.
    pub fn is_empty(&self, id: NodeId) -> bool {
        self.node(id).name.is_none()
    }

    /// Returns true iff `id` has no children.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node(id).children.is_empty()
    }

    /// Name of a node, or `None` for the empty marker.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.node(id).name.as_deref()
    }

    /// Current size metric of a node.
    pub fn size(&self, id: NodeId) -> u64 {
        self.node(id).size
    }

    /// Fill colour assigned at insertion.
    pub fn colour(&self, id: NodeId) -> Rgb {
        self.node(id).colour
    }

    /// Rectangle from the most recent layout pass that reached this node.
    ///
    /// This is [`Rect::ZERO`] before any layout, and stays stale for nodes below a zero-size
    /// ancestor.
    pub fn rect(&self, id: NodeId) -> Rect {
        self.node(id).rect
    }

    /// Whether the node is part of the currently displayed treemap.
    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.node(id).expanded
    }

    /// Metadata attached at insertion, if any.
    pub fn meta(&self, id: NodeId) -> Option<&F::Meta> {
        self.node(id).meta.as_ref()
    }

    /// Children of a node in stored order.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Parent of a node, or `None` for roots.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Topmost ancestor of a node (the node itself for roots).
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            current = parent;
        }
        current
    }

    /// Find a direct child of `parent` by exact name.
    pub fn child_named(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.node(parent)
            .children
            .iter()
            .copied()
            .find(|&c| self.node(c).name.as_deref() == Some(name))
    }

    /// Iterate `id` and all of its descendants in depth-first pre-order.
    pub fn descendants(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![id];
        core::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(self.node(next).children.iter().rev().copied());
            Some(next)
        })
    }

    /// Build the path string from the root down to `id`.
    ///
    /// Names are joined with the flavor's separator. The flavor's suffix is appended when
    /// `include_suffix` is set, and always for a non-root leaf.
    pub fn path_string(&self, id: NodeId, include_suffix: bool) -> String {
        let mut chain = vec![id];
        while let Some(parent) = self.node(chain[chain.len() - 1]).parent {
            chain.push(parent);
        }

        let separator = self.flavor.separator();
        let mut out = String::new();
        for (i, &node) in chain.iter().rev().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            out.push_str(self.node(node).name.as_deref().unwrap_or(""));
        }

        let is_leaf = self.is_leaf(id);
        let is_root = chain.len() == 1;
        if include_suffix || (is_leaf && !is_root) {
            out.push_str(self.flavor.suffix(is_leaf));
        }
        out
    }

    // --- internals ---

    pub(crate) fn node(&self, id: NodeId) -> &Node<F::Meta> {
        &self.nodes[id.idx()]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<F::Meta> {
        &mut self.nodes[id.idx()]
    }

    fn push(
        &mut self,
        parent: Option<NodeId>,
        name: Option<String>,
        size: u64,
        meta: Option<F::Meta>,
    ) -> NodeId {
        let colour = self.colours.next_colour();
        self.nodes.push(Node::new(name, size, colour, meta));
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let id = NodeId::new((self.nodes.len() - 1) as u32);
        if let Some(p) = parent {
            debug_assert!(
                self.node(p).name.is_some(),
                "the empty-marker node cannot have children"
            );
            self.link_parent(id, p);
        }
        id
    }

    pub(crate) fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    pub(crate) fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}
