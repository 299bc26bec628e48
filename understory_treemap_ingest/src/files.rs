// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directory scans: folders become categories, files become leaves sized in bytes.

use std::path::{Component, MAIN_SEPARATOR_STR, Path, PathBuf};

use tracing::{debug, info, trace};
use understory_treemap::{Flavor, Tree, TreeBuilder};
use walkdir::WalkDir;

use crate::{IngestError, Ingested, show_root_only};

/// Flavor of file-system trees: paths joined with the platform separator.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileFlavor;

impl Flavor for FileFlavor {
    type Meta = FileMeta;

    fn separator(&self) -> &str {
        MAIN_SEPARATOR_STR
    }

    fn suffix(&self, is_leaf: bool) -> &str {
        if is_leaf { " (file)" } else { " (folder)" }
    }
}

/// Details kept on each file leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileMeta {
    /// Location of the file on disk.
    pub path: PathBuf,
}

/// Options for [`scan`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ScanOptions {
    /// Descend into symlinked directories and size symlinks by their targets.
    pub follow_links: bool,
}

/// Build a tree mirroring the file or directory at `path`.
///
/// A plain file yields a single leaf. A directory yields a category whose children are its
/// entries in file-name order; empty directories are leaves of size 0. Each folder's size is the
/// total byte count of the files below it.
///
/// Names that are not valid UTF-8 are converted lossily. If two siblings end up with the same
/// label the scan fails with [`IngestError::NameCollision`] rather than merging them.
pub fn scan(
    path: impl AsRef<Path>,
    options: ScanOptions,
) -> Result<Ingested<FileFlavor>, IngestError> {
    let path = path.as_ref();
    let metadata = if options.follow_links {
        std::fs::metadata(path)
    } else {
        std::fs::symlink_metadata(path)
    }
    .map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root_name = display_name(path);
    info!(path = %path.display(), "scanning");

    let mut tree = Tree::new(FileFlavor);
    if !metadata.is_dir() {
        let meta = FileMeta {
            path: path.to_path_buf(),
        };
        let root = tree.insert_leaf(None, root_name, metadata.len(), meta);
        show_root_only(&mut tree, root);
        return Ok(Ingested { tree, root });
    }

    let root = tree.insert_category(None, root_name, []);
    let mut builder = TreeBuilder::new(&mut tree, root);
    let mut files = 0_usize;
    let walker = WalkDir::new(path)
        .min_depth(1)
        .follow_links(options.follow_links)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry?;
        let relative = entry.path().strip_prefix(path).unwrap_or(entry.path());
        let labels = labels_of(relative);
        let Some((name, parents)) = labels.split_last() else {
            continue;
        };

        // Names are unique on disk, so a second match only comes from lossy conversion.
        let parent = builder.ensure_path(parents);
        if builder.tree().child_named(parent, name).is_some() {
            return Err(IngestError::NameCollision {
                path: entry.path().to_path_buf(),
            });
        }

        if entry.file_type().is_dir() {
            trace!(path = %entry.path().display(), "folder");
            builder.ensure_path(&labels);
            continue;
        }

        let size = entry.metadata()?.len();
        debug!(path = %entry.path().display(), size, "file");
        let meta = FileMeta {
            path: entry.path().to_path_buf(),
        };
        builder.insert_along_path(parents, name.clone(), size, meta);
        files += 1;
    }

    show_root_only(&mut tree, root);
    info!(files, bytes = tree.size(root), "scan complete");
    Ok(Ingested { tree, root })
}

fn labels_of(relative: &Path) -> Vec<String> {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
