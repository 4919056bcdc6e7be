//! Directory-backed revisions.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{normalize_dir, Vcs};
use crate::error::VcsError;

/// Each revision names a directory; paths are resolved beneath it.
///
/// Relative revisions are taken relative to `base`.
#[derive(Debug, Clone, Default)]
pub struct Filesystem {
    base: PathBuf,
}

impl Filesystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn resolve(&self, revision: &str, path: &str) -> PathBuf {
        let root = self.base.join(revision);
        match normalize_dir(path) {
            "" => root,
            rel => root.join(rel),
        }
    }
}

impl Vcs for Filesystem {
    fn read_dir(&self, revision: &str, dir: &str) -> Result<Vec<String>, VcsError> {
        list_files(&self.resolve(revision, dir))
    }

    fn open_file(&self, revision: &str, path: &str) -> Result<String, VcsError> {
        read_file(&self.resolve(revision, path)).map_err(|e| match e {
            VcsError::NotFound { path, .. } => VcsError::NotFound {
                revision: revision.to_string(),
                path,
            },
            other => other,
        })
    }

    fn default_revisions(&self) -> Result<(String, String), VcsError> {
        Err(VcsError::NoDefaultRevision {
            message: "both revisions must name a directory".to_string(),
        })
    }
}

/// Sorted names of the regular files in `dir`. A missing directory is empty.
pub(super) fn list_files(dir: &Path) -> Result<Vec<String>, VcsError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("{} does not exist, treating as empty", dir.display());
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(VcsError::Read {
                path: dir.display().to_string(),
                source: e,
            })
        }
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| VcsError::Read {
            path: dir.display().to_string(),
            source: e,
        })?;
        if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// UTF-8 contents of `path`.
pub(super) fn read_file(path: &Path) -> Result<String, VcsError> {
    let display = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            VcsError::NotFound {
                revision: super::REVISION_FS.to_string(),
                path: display.clone(),
            }
        } else {
            VcsError::Read {
                path: display.clone(),
                source: e,
            }
        }
    })?;
    String::from_utf8(bytes).map_err(|_| VcsError::Encoding { path: display })
}
