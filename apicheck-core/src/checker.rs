//! Two-revision API check.
//!
//! Loads a package directory at two revisions, extracts the public surface of
//! every package found there, and compares matching declarations.

use std::collections::BTreeMap;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::differ::{Change, Classification, DeclChecker};
use crate::error::{CheckError, DiffError, Result};
use crate::extractor::{extract, Extraction};
use crate::parser::{parse_files_parallel, BuildTarget, FileInput};
use crate::resolver::PackageResolver;
use crate::types::{Declaration, SourceFile};
use crate::vcs::{join_path, Vcs, REVISION_FS};

/// One package at one revision.
#[derive(Debug)]
pub struct Package {
    pub name: String,
    pub resolver: PackageResolver,
    pub extraction: Extraction,
}

impl Package {
    pub fn new(import_path: &str, files: &[SourceFile]) -> Self {
        let name = files.first().map(|f| f.package.clone()).unwrap_or_default();
        let path = match import_path {
            "" | "." => name.as_str(),
            path => path,
        };
        Self {
            resolver: PackageResolver::new(path, files),
            extraction: extract(files),
            name,
        }
    }
}

/// Compares the API of a package directory between revisions.
pub struct Checker {
    vcs: Box<dyn Vcs>,
    target: BuildTarget,
    threads: Option<usize>,
}

impl Checker {
    pub fn new(vcs: impl Vcs + 'static) -> Self {
        Self {
            vcs: Box::new(vcs),
            target: BuildTarget::default(),
            threads: None,
        }
    }

    /// Platform and tags used to select files.
    pub fn with_target(mut self, target: BuildTarget) -> Self {
        self.target = target;
        self
    }

    /// Parser thread count, defaults to the number of CPUs.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn target(&self) -> &BuildTarget {
        &self.target
    }

    /// Compare `path` between two revisions.
    ///
    /// Blank revisions fall back to the backend's defaults and a blank path
    /// means the current directory. Returned changes are sorted by id, with
    /// unchanged declarations omitted.
    pub fn check(&self, path: &str, before: &str, after: &str) -> Result<Vec<Change>> {
        let (before, after) = self.revisions(before, after)?;
        let path = if path.is_empty() { REVISION_FS } else { path };
        info!("Checking {} between {:?} and {:?}", path, before, after);

        let start = Instant::now();
        let bpkgs = self.packages(path, &before)?;
        let apkgs = self.packages(path, &after)?;
        let parse = start.elapsed();

        if bpkgs.is_empty() && apkgs.is_empty() {
            return Err(CheckError::NoGoFiles {
                path: path.to_string(),
            });
        }

        let start = Instant::now();
        let mut changes = compare_packages(&bpkgs, &apkgs)?;
        let diff = start.elapsed();

        let start = Instant::now();
        sort_changes(&mut changes);
        let sort = start.elapsed();

        debug!(
            "Timing: parse: {:?}, diff: {:?}, sort: {:?}, total: {:?}",
            parse,
            diff,
            sort,
            parse + diff + sort
        );
        debug!("Changes detected: {}", changes.len());
        Ok(changes)
    }

    /// Packages found in `path` at `revision`, keyed by package name.
    pub fn packages(&self, path: &str, revision: &str) -> Result<BTreeMap<String, Package>> {
        let files = self.parse_revision(path, revision)?;

        let mut grouped: BTreeMap<String, Vec<SourceFile>> = BTreeMap::new();
        for file in files {
            grouped.entry(file.package.clone()).or_default().push(file);
        }

        Ok(grouped
            .into_iter()
            .map(|(name, files)| (name, Package::new(path, &files)))
            .collect())
    }

    fn revisions(&self, before: &str, after: &str) -> Result<(String, String)> {
        if !before.is_empty() && !after.is_empty() {
            return Ok((before.to_string(), after.to_string()));
        }
        let (default_before, default_after) = self.vcs.default_revisions()?;
        let pick = |given: &str, default: String| {
            if given.is_empty() {
                default
            } else {
                given.to_string()
            }
        };
        Ok((pick(before, default_before), pick(after, default_after)))
    }

    fn parse_revision(&self, path: &str, revision: &str) -> Result<Vec<SourceFile>> {
        debug!("Parsing revision: {}", revision);

        let mut inputs = Vec::new();
        for name in self.vcs.read_dir(revision, path)? {
            if !self.target.matches_file_name(&name) {
                continue;
            }
            let source = self.vcs.open_file(revision, &join_path(path, &name))?;
            if !self.target.matches_constraints(&name, &source)? {
                debug!("Skipping {} at {}: build constraints", name, revision);
                continue;
            }
            let display = if revision == REVISION_FS {
                name
            } else {
                format!("{}:{}", revision, name)
            };
            inputs.push(FileInput::new(display, source));
        }

        debug!("Selected {} files at {}", inputs.len(), revision);
        Ok(parse_files_parallel(&inputs, self.threads)?)
    }
}

/// Changes between two package sets, unsorted.
pub fn compare_packages(
    before: &BTreeMap<String, Package>,
    after: &BTreeMap<String, Package>,
) -> Result<Vec<Change>> {
    let mut changes = Vec::new();
    for (name, bpkg) in before {
        match after.get(name) {
            Some(apkg) => changes.extend(compare_package(name, bpkg, apkg)?),
            None => changes.push(Change::package_removed(name)),
        }
    }
    Ok(changes)
}

fn compare_package(name: &str, before: &Package, after: &Package) -> Result<Vec<Change>> {
    let checker = DeclChecker::new(&before.resolver, &after.resolver);
    let bdecls = &before.extraction.public;
    let adecls = &after.extraction.public;

    let mut changes: Vec<Change> = bdecls
        .iter()
        .filter(|(id, _)| !adecls.contains_key(*id))
        .map(|(_, decl)| Change::removed(name, decl.clone()))
        .collect();

    let pairs: Vec<(&Declaration, &Declaration)> = bdecls
        .iter()
        .filter_map(|(id, bdecl)| adecls.get(id).map(|adecl| (bdecl, adecl)))
        .collect();

    let compared: Vec<Option<Change>> = pairs
        .par_iter()
        .map(|(bdecl, adecl)| -> std::result::Result<_, Box<DiffError>> {
            let change = checker.check(bdecl, adecl).map_err(|source| {
                Box::new(DiffError {
                    package: name.to_string(),
                    before: (*bdecl).clone(),
                    after: (*adecl).clone(),
                    source,
                })
            })?;
            if change.classification == Classification::None {
                return Ok(None);
            }
            Ok(Some(Change::changed(
                name,
                change,
                (*bdecl).clone(),
                (*adecl).clone(),
            )))
        })
        .collect::<std::result::Result<_, _>>()?;
    changes.extend(compared.into_iter().flatten());

    changes.extend(
        adecls
            .iter()
            .filter(|(id, _)| !bdecls.contains_key(*id))
            .map(|(_, decl)| Change::added(name, decl.clone())),
    );
    Ok(changes)
}

/// Order by id, ties by package. Records without an id sort first.
pub fn sort_changes(changes: &mut [Change]) {
    changes.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.package.cmp(&b.package)));
}
