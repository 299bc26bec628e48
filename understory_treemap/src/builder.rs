// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Growing a tree from flat `(labels, name, size, meta)` records.

use alloc::string::String;

use crate::tree::Tree;
use crate::types::{Flavor, NodeId};

/// Inserts flat records under a fixed root, creating category levels on first reference.
///
/// Every data source (tabular records, directory scans, ...) reduces a record to an ordered list
/// of category labels plus a leaf, and feeds it through the same [`TreeBuilder::insert_along_path`].
/// Sizes along the path are kept consistent as records arrive, so no
/// [`Tree::recompute_sizes`] pass is needed afterwards.
///
/// ```rust
/// use understory_treemap::{Flavor, Tree, TreeBuilder};
///
/// struct Colon;
///
/// impl Flavor for Colon {
///     type Meta = u32;
///     fn separator(&self) -> &str {
///         ":"
///     }
///     fn suffix(&self, _is_leaf: bool) -> &str {
///         ""
///     }
/// }
///
/// let mut tree = Tree::new(Colon);
/// let root = tree.insert_category(None, "papers", []);
/// let mut builder = TreeBuilder::new(&mut tree, root);
/// builder.insert_along_path(["A", "B"], "first", 3, 2019);
/// let second = builder.insert_along_path(["A", "B"], "second", 4, 2020);
///
/// assert_eq!(tree.size(root), 7);
/// assert_eq!(tree.path_string(second, false), "papers:A:B:second");
/// ```
#[derive(Debug)]
pub struct TreeBuilder<'a, F: Flavor> {
    tree: &'a mut Tree<F>,
    root: NodeId,
}

impl<'a, F: Flavor> TreeBuilder<'a, F> {
    /// Start inserting records under `root`.
    ///
    /// `root` must not be the empty-marker node.
    pub fn new(tree: &'a mut Tree<F>, root: NodeId) -> Self {
        debug_assert!(!tree.is_empty(root), "cannot grow the empty tree");
        Self { tree, root }
    }

    /// The root records are inserted under.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Read access to the tree being built.
    pub fn tree(&self) -> &Tree<F> {
        self.tree
    }

    /// Walk `labels` from the root, creating missing category nodes, and return the last one.
    ///
    /// Existing children are matched by exact name, first match wins. No sizes change.
    pub fn ensure_path<I, S>(&mut self, labels: I) -> NodeId
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.walk(labels, 0)
    }

    /// Insert one record: walk (or create) the category path, then append a new leaf.
    ///
    /// `size` is added once to the root and once to every category on the path.
    /// Returns the new leaf.
    pub fn insert_along_path<I, S>(
        &mut self,
        labels: I,
        leaf_name: impl Into<String>,
        size: u64,
        meta: F::Meta,
    ) -> NodeId
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parent = self.walk(labels, size);
        self.tree.insert_leaf(Some(parent), leaf_name, size, meta)
    }

    fn walk<I, S>(&mut self, labels: I, size: u64) -> NodeId
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut current = self.root;
        self.grow(current, size);
        for label in labels {
            let label = label.as_ref();
            current = match self.tree.child_named(current, label) {
                Some(existing) => existing,
                None => self.tree.insert_category(Some(current), label, []),
            };
            self.grow(current, size);
        }
        current
    }

    fn grow(&mut self, id: NodeId, size: u64) {
        let node = self.tree.node_mut(id);
        node.size = node.size.saturating_add(size);
    }
}
