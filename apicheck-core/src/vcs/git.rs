//! Git-backed revisions.

use std::path::PathBuf;
use std::process::Command;

use super::{file_name, fs, normalize_dir, Vcs, REVISION_FS};
use crate::error::VcsError;

/// Reads committed revisions with `git ls-tree` and `git show`; revision
/// [`REVISION_FS`] reads the working tree under `root`.
#[derive(Debug, Clone)]
pub struct Git {
    root: PathBuf,
}

impl Default for Git {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Git {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn git(&self, args: &[&str]) -> Result<Vec<u8>, VcsError> {
        tracing::trace!("git {}", args.join(" "));
        let output = Command::new("git").arg("-C").arg(&self.root).args(args).output()?;
        if !output.status.success() {
            return Err(VcsError::Git {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}

impl Vcs for Git {
    fn read_dir(&self, revision: &str, dir: &str) -> Result<Vec<String>, VcsError> {
        if revision == REVISION_FS {
            return fs::list_files(&self.root.join(normalize_dir(dir)));
        }

        // Paths given to ls-tree are relative to the current directory.
        let prefix = match normalize_dir(dir) {
            "" => String::new(),
            dir => format!("{}/", dir),
        };
        let mut args = vec!["ls-tree", "--name-only", revision];
        if !prefix.is_empty() {
            args.push("--");
            args.push(prefix.as_str());
        }
        let stdout = self.git(&args)?;
        let mut names: Vec<String> = String::from_utf8_lossy(&stdout)
            .lines()
            .map(|line| file_name(line).to_string())
            .filter(|name| !name.is_empty())
            .collect();
        names.sort();
        Ok(names)
    }

    fn open_file(&self, revision: &str, path: &str) -> Result<String, VcsError> {
        if revision == REVISION_FS {
            return fs::read_file(&self.root.join(normalize_dir(path)));
        }

        // `rev:./path` is resolved against the current directory, not the top level.
        let object = format!("{}:./{}", revision, normalize_dir(path));
        let stdout = self.git(&["show", &object]).map_err(|e| match e {
            VcsError::Git { stderr, .. }
                if stderr.contains("does not exist") || stderr.contains("exists on disk") =>
            {
                VcsError::NotFound {
                    revision: revision.to_string(),
                    path: path.to_string(),
                }
            }
            other => other,
        })?;
        String::from_utf8(stdout).map_err(|_| VcsError::Encoding {
            path: object.clone(),
        })
    }

    fn default_revisions(&self) -> Result<(String, String), VcsError> {
        Ok(("HEAD".to_string(), REVISION_FS.to_string()))
    }
}
