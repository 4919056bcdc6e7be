//! apicheck core - Go API compatibility checking.
//!
//! Compares the exported surface of a Go package between two revisions and
//! classifies every difference as non-breaking or breaking for callers.
//!
//! # Pipeline
//!
//! - **vcs**: list and read files at a revision (git, directories, memory)
//! - **parser**: build-constraint file selection and body-free tree-sitter parsing
//! - **resolver**: per-revision type identity and interface method sets
//! - **extractor**: public declarations, with private types promoted through results
//! - **differ**: per-declaration classification
//! - **checker**: runs the above for two revisions
//!
//! # Usage
//!
//! ```no_run
//! use apicheck_core::{Checker, vcs::Git};
//!
//! let changes = Checker::new(Git::new(".")).check("./pkg", "HEAD", ".")?;
//! for change in changes.iter().filter(|c| c.is_breaking()) {
//!     println!("{}", apicheck_core::exporter::text::export_change(change, &Default::default()));
//! }
//! # Ok::<(), apicheck_core::CheckError>(())
//! ```

pub mod checker;
pub mod differ;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod parser;
pub mod resolver;
pub mod types;
pub mod vcs;

pub use checker::{Checker, Package};
pub use differ::{Change, CheckSummary, Classification, DeclChange, DeclChecker};
pub use error::{CheckError, ParseError, ResolveError, Result, VcsError};
pub use extractor::{extract, Extraction};
pub use parser::BuildTarget;
pub use types::{DeclKind, Declaration};

/// Get the version of apicheck-core.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
