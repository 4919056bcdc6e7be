//! CLI command implementations.

pub mod check;
pub mod decls;

use std::path::PathBuf;

use anyhow::{bail, Result};
use apicheck_core::parser::BuildTarget;
use apicheck_core::vcs::{Filesystem, Git};
use apicheck_core::Checker;
use clap::{Args, ValueEnum};

use crate::config::ApicheckConfig;

/// Where revisions are read from.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum VcsKind {
    /// Git revisions; `.` is the working tree
    Git,
    /// Each revision is a directory under the repository root
    Fs,
}

/// Flags shared by every command that reads a repository.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Revision backend (default: config, then git)
    #[arg(long, value_enum)]
    pub vcs: Option<VcsKind>,

    /// Repository root
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,

    /// Target operating system for file selection
    #[arg(long)]
    pub goos: Option<String>,

    /// Target architecture for file selection
    #[arg(long)]
    pub goarch: Option<String>,

    /// Extra build tags, comma separated
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
}

impl SourceArgs {
    fn vcs_kind(&self, config: &ApicheckConfig) -> Result<VcsKind> {
        if let Some(kind) = self.vcs {
            return Ok(kind);
        }
        match config.check.vcs.as_deref() {
            None | Some("git") => Ok(VcsKind::Git),
            Some("fs") => Ok(VcsKind::Fs),
            Some(other) => bail!("Unknown vcs '{}' in config, expected git or fs", other),
        }
    }

    /// Flags first, then config, then the host platform.
    pub fn target(&self, config: &ApicheckConfig) -> BuildTarget {
        let host = BuildTarget::default();
        let goos = self
            .goos
            .clone()
            .or_else(|| config.build.goos.clone())
            .unwrap_or(host.goos);
        let goarch = self
            .goarch
            .clone()
            .or_else(|| config.build.goarch.clone())
            .unwrap_or(host.goarch);
        let tags = if self.tags.is_empty() {
            config.build.tags.clone()
        } else {
            self.tags.clone()
        };
        BuildTarget::new(goos, goarch).with_tags(tags)
    }

    pub fn checker(&self, config: &ApicheckConfig) -> Result<Checker> {
        let checker = match self.vcs_kind(config)? {
            VcsKind::Git => Checker::new(Git::new(&self.repo)),
            VcsKind::Fs => Checker::new(Filesystem::with_base(&self.repo)),
        };
        Ok(checker.with_target(self.target(config)))
    }
}
