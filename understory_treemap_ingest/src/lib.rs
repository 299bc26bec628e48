// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_treemap_ingest --heading-base-level=0

//! Understory Treemap Ingest: load [`understory_treemap`] trees from concrete data sources.
//!
//! Two sources are provided, each with its own [`Flavor`](understory_treemap::Flavor):
//!
//! - [`papers`]: publication records from CSV, grouped by year (optional) and by a
//!   colon-separated category path. Leaves are articles sized by citation count.
//! - [`files`]: a directory scan. Folders become categories, files become leaves sized in bytes.
//!
//! Every record is fed through [`TreeBuilder`](understory_treemap::TreeBuilder), so category
//! sizes are consistent as soon as loading returns. A freshly loaded tree has only its root
//! expanded; no layout has been computed yet.
//!
//! ```rust
//! use understory_treemap_ingest::papers::{PaperOptions, papers_from_csv};
//!
//! let csv = "Author,Title,Year,Category,Url,Citations\n\
//!            Ada,Notes,1843,Engines:Analytical,https://example.org,12\n";
//! let loaded = papers_from_csv("papers", csv.as_bytes(), PaperOptions::default())?;
//! assert_eq!(loaded.tree.size(loaded.root), 12);
//! # Ok::<(), understory_treemap_ingest::IngestError>(())
//! ```
//!
//! Loading reports progress through `tracing` at `info` (per source) and `debug` (per record).

mod error;
pub mod files;
pub mod papers;

pub use error::IngestError;

use understory_treemap::{Flavor, NodeId, Tree};

/// A freshly loaded tree and the root its records were inserted under.
#[derive(Debug)]
pub struct Ingested<F: Flavor> {
    /// The arena holding the loaded nodes.
    pub tree: Tree<F>,
    /// Root of the loaded hierarchy.
    pub root: NodeId,
}

/// Leave `root` as the only displayed node.
pub(crate) fn show_root_only<F: Flavor>(tree: &mut Tree<F>, root: NodeId) {
    match tree.children_of(root).first() {
        Some(&first) => tree.collapse(first),
        None => tree.expand(root),
    }
}
