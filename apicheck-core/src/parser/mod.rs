//! Go source parsing.
//!
//! Provides parallel parsing of source files using the tree-sitter Go
//! grammar, producing body-free [`SourceFile`]s, and build-constraint file
//! selection in [`constraints`].

use rayon::prelude::*;

use crate::error::ParseError;
use crate::types::SourceFile;

pub mod constraints;
pub mod go;

mod helpers;

pub use constraints::BuildTarget;

/// One file to parse: its display path and contents.
#[derive(Debug, Clone)]
pub struct FileInput {
    pub path: String,
    pub source: String,
}

impl FileInput {
    pub fn new(path: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Parse multiple files in parallel using rayon.
///
/// The first error aborts the batch. Output order matches input order.
pub fn parse_files_parallel(
    inputs: &[FileInput],
    num_threads: Option<usize>,
) -> Result<Vec<SourceFile>, ParseError> {
    // Configure thread pool if specified
    let pool = match num_threads {
        Some(n) if n > 0 => rayon::ThreadPoolBuilder::new().num_threads(n).build().ok(),
        _ => None,
    };

    let parse_fn = |input: &FileInput| parse_source(&input.source, &input.path);

    match pool {
        Some(pool) => pool.install(|| inputs.par_iter().map(parse_fn).collect()),
        None => inputs.par_iter().map(parse_fn).collect(),
    }
}

/// Parse one Go source file.
pub fn parse_source(source: &str, path: &str) -> Result<SourceFile, ParseError> {
    go::parse(source, path)
}
