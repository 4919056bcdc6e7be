//! In-memory revisions.

use std::collections::BTreeMap;

use super::{file_name, normalize_dir, Vcs};
use crate::error::VcsError;

/// File table keyed by revision and path.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    files: BTreeMap<(String, String), String>,
    defaults: Option<(String, String)>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file at a revision.
    pub fn insert(&mut self, revision: &str, path: &str, contents: impl Into<String>) {
        self.files
            .insert((revision.to_string(), normalize_dir(path).to_string()), contents.into());
    }

    pub fn with_file(mut self, revision: &str, path: &str, contents: impl Into<String>) -> Self {
        self.insert(revision, path, contents);
        self
    }

    pub fn with_defaults(mut self, before: &str, after: &str) -> Self {
        self.defaults = Some((before.to_string(), after.to_string()));
        self
    }
}

impl Vcs for Memory {
    fn read_dir(&self, revision: &str, dir: &str) -> Result<Vec<String>, VcsError> {
        let dir = normalize_dir(dir);
        Ok(self
            .files
            .keys()
            .filter(|(rev, path)| rev == revision && parent(path) == dir)
            .map(|(_, path)| file_name(path).to_string())
            .collect())
    }

    fn open_file(&self, revision: &str, path: &str) -> Result<String, VcsError> {
        self.files
            .get(&(revision.to_string(), normalize_dir(path).to_string()))
            .cloned()
            .ok_or_else(|| VcsError::NotFound {
                revision: revision.to_string(),
                path: path.to_string(),
            })
    }

    fn default_revisions(&self) -> Result<(String, String), VcsError> {
        self.defaults.clone().ok_or_else(|| VcsError::NoDefaultRevision {
            message: "no default revisions configured".to_string(),
        })
    }
}

fn parent(path: &str) -> &str {
    path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_dir_is_not_recursive() {
        let vcs = Memory::new()
            .with_file("v1", "a.go", "package a\n")
            .with_file("v1", "sub/b.go", "package sub\n")
            .with_file("v2", "c.go", "package a\n");
        assert_eq!(vcs.read_dir("v1", ".").unwrap(), vec!["a.go"]);
        assert_eq!(vcs.read_dir("v1", "./sub").unwrap(), vec!["b.go"]);
        assert!(vcs.read_dir("v1", "missing").unwrap().is_empty());
    }

    #[test]
    fn test_open_file() {
        let vcs = Memory::new().with_file("v1", "./sub/b.go", "package sub\n");
        assert_eq!(vcs.open_file("v1", "sub/b.go").unwrap(), "package sub\n");
        assert!(matches!(
            vcs.open_file("v2", "sub/b.go"),
            Err(VcsError::NotFound { .. })
        ));
    }

    #[test]
    fn test_defaults() {
        assert!(Memory::new().default_revisions().is_err());
        let vcs = Memory::new().with_defaults("v1", "v2");
        assert_eq!(
            vcs.default_revisions().unwrap(),
            ("v1".to_string(), "v2".to_string())
        );
    }
}
