// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for unit tests.

use alloc::{format, vec::Vec};

use crate::{Flavor, NodeId, Tree};

/// Dot-separated flavor with `&'static str` metadata.
#[derive(Debug)]
pub(crate) struct Dotted;

impl Flavor for Dotted {
    type Meta = &'static str;

    fn separator(&self) -> &str {
        "."
    }

    fn suffix(&self, is_leaf: bool) -> &str {
        if is_leaf { " (leaf)" } else { " (node)" }
    }
}

/// A root category over one leaf per entry of `sizes`, named `l0`, `l1`, ...
pub(crate) fn leaf_row(sizes: &[u64]) -> (Tree<Dotted>, NodeId, Vec<NodeId>) {
    let mut tree = Tree::new(Dotted);
    let leaves: Vec<NodeId> = sizes
        .iter()
        .enumerate()
        .map(|(i, &size)| tree.insert_leaf(None, format!("l{i}"), size, "m"))
        .collect();
    let root = tree.insert_category(None, "root", leaves.iter().copied());
    (tree, root, leaves)
}
