// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Publication records grouped by year and colon-separated category.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};
use understory_treemap::{Flavor, NodeId, Tree, TreeBuilder};

use crate::{IngestError, Ingested, show_root_only};

/// Flavor of publication trees: `:`-joined paths ending in `(Article)` or `(Category)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PaperFlavor;

impl Flavor for PaperFlavor {
    type Meta = PaperMeta;

    fn separator(&self) -> &str {
        ":"
    }

    fn suffix(&self, is_leaf: bool) -> &str {
        if is_leaf { " (Article)" } else { " (Category)" }
    }
}

/// Details kept on each article leaf.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaperMeta {
    /// Author list as written in the source.
    pub authors: String,
    /// Link to the article (usually a DOI URL).
    pub url: String,
    /// Citation count; also the leaf's size.
    pub citations: u64,
    /// Publication year token.
    pub year: String,
}

/// One publication record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaperRecord {
    /// Colon-separated category path, outermost first (for example `"Assessment:Tools"`).
    pub category: String,
    /// Article title; becomes the leaf name.
    pub title: String,
    /// Link to the article.
    pub url: String,
    /// Citation count; becomes the leaf size.
    pub citations: u64,
    /// Author list.
    pub author: String,
    /// Publication year token.
    pub year: String,
}

/// Options for building a publication tree.
#[derive(Clone, Copy, Debug)]
pub struct PaperOptions {
    /// Put a year level above the categories.
    pub by_year: bool,
}

impl Default for PaperOptions {
    fn default() -> Self {
        Self { by_year: true }
    }
}

impl PaperRecord {
    /// Category labels for this record, outermost first.
    pub fn path_labels(&self, options: PaperOptions) -> Vec<&str> {
        let year = options.by_year.then_some(self.year.as_str());
        year.into_iter().chain(self.category.split(':')).collect()
    }
}

/// Raw CSV row. `Citations` is kept as text so a bad value can be reported with its line.
#[derive(Debug, Deserialize)]
struct PaperRow {
    #[serde(rename = "Author")]
    author: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Url")]
    url: String,
    #[serde(rename = "Citations")]
    citations: String,
}

/// Build a publication tree named `root_name` from in-memory records.
pub fn papers_from_records(
    root_name: &str,
    records: impl IntoIterator<Item = PaperRecord>,
    options: PaperOptions,
) -> Ingested<PaperFlavor> {
    let mut tree = Tree::new(PaperFlavor);
    let root = tree.insert_category(None, root_name, []);
    let mut builder = TreeBuilder::new(&mut tree, root);
    let mut count = 0_usize;
    for record in records {
        insert_paper(&mut builder, record, options);
        count += 1;
    }
    finish(tree, root, count)
}

/// Build a publication tree from CSV text with `Author`, `Title`, `Year`, `Category`, `Url`,
/// and `Citations` columns (any order, extra columns ignored).
///
/// A non-numeric `Citations` value fails the whole load with [`IngestError::Parse`].
pub fn papers_from_csv<R: Read>(
    root_name: &str,
    input: R,
    options: PaperOptions,
) -> Result<Ingested<PaperFlavor>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    let headers = reader.headers()?.clone();

    let mut tree = Tree::new(PaperFlavor);
    let root = tree.insert_category(None, root_name, []);
    let mut builder = TreeBuilder::new(&mut tree, root);
    let mut count = 0_usize;
    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line);
        let row: PaperRow = record.deserialize(Some(&headers))?;
        let citations = row
            .citations
            .parse::<u64>()
            .map_err(|_| IngestError::Parse {
                line,
                field: "Citations",
                value: row.citations.clone(),
            })?;
        insert_paper(
            &mut builder,
            PaperRecord {
                category: row.category,
                title: row.title,
                url: row.url,
                citations,
                author: row.author,
                year: row.year,
            },
            options,
        );
        count += 1;
    }
    Ok(finish(tree, root, count))
}

/// Build a publication tree from a CSV file on disk. See [`papers_from_csv`].
pub fn papers_from_path(
    root_name: &str,
    path: impl AsRef<Path>,
    options: PaperOptions,
) -> Result<Ingested<PaperFlavor>, IngestError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "loading paper records");
    papers_from_csv(root_name, file, options)
}

fn insert_paper(
    builder: &mut TreeBuilder<'_, PaperFlavor>,
    record: PaperRecord,
    options: PaperOptions,
) {
    debug!(
        title = %record.title,
        category = %record.category,
        citations = record.citations,
        "paper"
    );
    let labels: Vec<String> = record
        .path_labels(options)
        .into_iter()
        .map(str::to_owned)
        .collect();
    let meta = PaperMeta {
        authors: record.author,
        url: record.url,
        citations: record.citations,
        year: record.year,
    };
    builder.insert_along_path(labels, record.title, record.citations, meta);
}

fn finish(mut tree: Tree<PaperFlavor>, root: NodeId, count: usize) -> Ingested<PaperFlavor> {
    show_root_only(&mut tree, root);
    info!(records = count, total_citations = tree.size(root), "paper tree built");
    Ingested { tree, root }
}
