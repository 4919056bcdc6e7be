//! Revision access.
//!
//! A [`Vcs`] lists and reads files of a directory as they were at a named
//! revision. Backends:
//!
//! - [`Git`]: committed revisions through the `git` executable, plus the
//!   working tree as revision [`REVISION_FS`]
//! - [`Filesystem`]: each revision is a directory root
//! - [`Memory`]: an in-memory file table

use std::path::Path;

use crate::error::VcsError;

mod fs;
mod git;
mod memory;

pub use fs::Filesystem;
pub use git::Git;
pub use memory::Memory;

/// Revision name of the working tree.
pub const REVISION_FS: &str = ".";

/// Read-only access to files at a revision.
pub trait Vcs: Send + Sync {
    /// Names of the files directly inside `dir`. A missing directory is empty.
    fn read_dir(&self, revision: &str, dir: &str) -> Result<Vec<String>, VcsError>;

    /// Contents of the file at `path`.
    fn open_file(&self, revision: &str, path: &str) -> Result<String, VcsError>;

    /// Revisions compared when the caller gives none, as `(before, after)`.
    fn default_revisions(&self) -> Result<(String, String), VcsError>;
}

/// Join a directory and a file name with `/`, dropping a `.` directory.
pub fn join_path(dir: &str, name: &str) -> String {
    let dir = normalize_dir(dir);
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

/// `./a/b/` and `a/b` both become `a/b`; `.` becomes empty.
pub fn normalize_dir(dir: &str) -> &str {
    let mut dir = dir.trim_end_matches('/');
    while let Some(rest) = dir.strip_prefix("./") {
        dir = rest;
    }
    if dir == "." {
        ""
    } else {
        dir
    }
}

/// Final component of a `/`-separated path.
pub fn file_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}
