// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_treemap --heading-base-level=0

//! Understory Treemap: a sized hierarchy that lays itself out as nested rectangles.
//!
//! Understory Treemap models hierarchical, sized data (file trees, publication taxonomies, ...)
//! and turns it into a treemap: each node owns a rectangle whose area is proportional to its
//! size, nested inside its parent's rectangle.
//!
//! - Stores nodes in an arena with parent back-references and ordered children.
//! - Computes slice-and-dice layouts with integer strip extents that tile their parent exactly.
//! - Tracks which nodes are displayed and resolves points to the displayed leaf under them.
//! - Supports moving leaves between categories and rescaling leaf sizes.
//!
//! ## Not a renderer
//!
//! This crate does not draw and does not handle input. A renderer consumes
//! [`Tree::visible_rects`], and input code translates clicks and key presses into calls such as
//! [`Tree::locate`], [`Tree::expand`], or [`Tree::move_leaf`].
//!
//! Loading data from concrete sources (CSV records, directory scans) lives in
//! `understory_treemap_ingest`; every source goes through [`TreeBuilder`].
//!
//! ## API overview
//!
//! - [`Tree`]: arena of nodes, parameterized by a [`Flavor`].
//! - [`Flavor`]: per-variant path separator, path suffix, and metadata type.
//! - [`NodeId`]: handle of a node.
//! - [`Rgb`]: fill colour assigned to each node on insertion.
//! - [`TreeBuilder`]: path-insertion of flat records.
//! - [`VisibleNodes`]: depth-first iterator over the displayed nodes.
//!
//! Key operations:
//! - [`Tree::insert_leaf`], [`Tree::insert_category`], [`Tree::insert_empty`]
//! - [`Tree::layout`]: recursive proportional partitioning.
//! - [`Tree::expand`], [`Tree::expand_all`], [`Tree::collapse`], [`Tree::collapse_all`]
//! - [`Tree::locate`]: point to displayed leaf, with a left/upper tie-break on shared edges.
//! - [`Tree::move_leaf`], [`Tree::change_size`], [`Tree::recompute_sizes`]
//! - [`Tree::path_string`]: breadcrumb text for a node.
//!
//! ## Sizes and layout freshness
//!
//! A category's size equals the sum of its children's sizes, except between a
//! [`Tree::move_leaf`] or [`Tree::change_size`] and the next [`Tree::recompute_sizes`] on an
//! ancestor. Rectangles are only as fresh as the last [`Tree::layout`] call that reached them; a
//! zero-size category does not pass its rectangle on.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

// Property tests format their failure messages with std macros.
#[cfg(test)]
#[macro_use]
extern crate std;

mod builder;
mod edit;
mod hit;
mod layout;
mod render;
mod tree;
mod types;
mod util;
mod visibility;

#[cfg(test)]
mod testing;

pub use builder::TreeBuilder;
pub use render::VisibleNodes;
pub use tree::Tree;
pub use types::{Flavor, NodeId, Rgb};
