// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while loading a tree from a data source.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while ingesting records. Ingestion stops at the first error.
#[derive(Error, Debug)]
pub enum IngestError {
    /// A size field could not be read as a non-negative integer.
    #[error("line {line}: invalid {field} value {value:?}")]
    Parse {
        /// 1-based line of the offending record in its source.
        line: u64,
        /// Name of the column that failed to parse.
        field: &'static str,
        /// The raw text found in that column.
        value: String,
    },
    /// The tabular source was not well-formed CSV or lacked a required column.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// A directory entry could not be read during a scan.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    /// Two sibling entries map to the same label once their names are converted to UTF-8.
    #[error("{} has the same name as a sibling after UTF-8 conversion", path.display())]
    NameCollision {
        /// The entry that was found second.
        path: PathBuf,
    },
    /// A source path could not be opened or inspected.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}
