//! `apicheck decls`: show the declarations extracted at one revision.

use anyhow::{bail, Result};
use apicheck_core::exporter::json::DeclarationRecord;
use apicheck_core::exporter::text::export_extraction;
use apicheck_core::vcs::REVISION_FS;
use apicheck_core::Extraction;
use clap::Args;
use serde::Serialize;

use super::SourceArgs;
use crate::config::ApicheckConfig;
use crate::output::{Column, Output, OutputConfig, OutputFormat, Outputter, TableOutput};

#[derive(Args, Debug)]
pub struct DeclsArgs {
    /// Package directory, relative to the repository root
    #[arg(default_value = ".")]
    pub path: String,

    /// Revision to read (default: config `after`, then the working tree)
    #[arg(short, long)]
    pub rev: Option<String>,

    /// Also list declarations that are never compared
    #[arg(long)]
    pub private: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Serialize)]
pub struct PackageDecls {
    pub package: String,
    pub declarations: Vec<DeclarationRecord>,
    #[serde(skip)]
    extraction: Extraction,
}

/// Result of `apicheck decls`.
#[derive(Debug, Serialize)]
pub struct DeclsReport {
    pub revision: String,
    pub packages: Vec<PackageDecls>,
    #[serde(skip)]
    include_private: bool,
}

impl DeclsReport {
    pub fn new<I>(revision: &str, packages: I, include_private: bool) -> Self
    where
        I: IntoIterator<Item = (String, Extraction)>,
    {
        let packages = packages
            .into_iter()
            .map(|(package, extraction)| {
                let private = include_private.then_some(extraction.private.values());
                let declarations = extraction
                    .public
                    .values()
                    .chain(private.into_iter().flatten())
                    .map(DeclarationRecord::from)
                    .collect();
                PackageDecls {
                    package,
                    declarations,
                    extraction,
                }
            })
            .collect();
        Self {
            revision: revision.to_string(),
            packages,
            include_private,
        }
    }
}

impl Outputter for DeclsReport {
    fn to_text(&self, _config: &OutputConfig) -> String {
        self.packages
            .iter()
            .map(|pkg| export_extraction(&pkg.package, &pkg.extraction, self.include_private))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn to_table(&self, config: &OutputConfig) -> String {
        let rows: Vec<Vec<String>> = self
            .packages
            .iter()
            .flat_map(|pkg| {
                pkg.declarations.iter().map(move |decl| {
                    let visibility = match (decl.public, decl.promoted) {
                        (true, _) => "public",
                        (false, true) => "promoted",
                        (false, false) => "internal",
                    };
                    vec![
                        pkg.package.clone(),
                        decl.id.clone(),
                        decl.kind.clone(),
                        visibility.to_string(),
                        decl.position.clone(),
                    ]
                })
            })
            .collect();
        let columns = [
            Column::new("Package", "package"),
            Column::new("Id", "id"),
            Column::new("Kind", "kind"),
            Column::new("Visibility", "visibility"),
            Column::new("Position", "position"),
        ];
        let headers: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        TableOutput::from_rows(&headers, &rows, config)
    }
}

pub fn run(args: DeclsArgs, config: &ApicheckConfig, format: OutputFormat) -> Result<()> {
    let checker = args.source.checker(config)?;
    let revision = args
        .rev
        .clone()
        .or_else(|| config.check.after.clone())
        .unwrap_or_else(|| REVISION_FS.to_string());

    let packages = checker.packages(&args.path, &revision)?;
    if packages.is_empty() {
        bail!("No Go files in {} at {}", args.path, revision);
    }
    tracing::debug!("Extracted {} packages at {}", packages.len(), revision);

    let report = DeclsReport::new(
        &revision,
        packages
            .into_iter()
            .map(|(name, package)| (name, package.extraction)),
        args.private,
    );
    Output::new(report, format)
        .compact(config.output.compact)
        .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use apicheck_core::extract;
    use apicheck_core::parser::parse_source;

    const SOURCE: &str = "package shop\n\ntype cart struct {\n\tItems []string\n}\n\nfunc NewCart() *cart { return nil }\n\nfunc total() int { return 0 }\n";

    fn report(include_private: bool) -> DeclsReport {
        let file = parse_source(SOURCE, "shop.go").unwrap();
        DeclsReport::new(".", vec![("shop".to_string(), extract(&[file]))], include_private)
    }

    #[test]
    fn test_public_declarations() {
        let report = report(false);
        let ids: Vec<&str> = report.packages[0]
            .declarations
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, vec!["NewCart", "cart"]);
    }

    #[test]
    fn test_private_declarations_listed() {
        let report = report(true);
        assert_eq!(report.packages[0].declarations.len(), 3);
        let text = report.to_text(&OutputConfig::new(OutputFormat::Text));
        assert!(text.contains("// internal"));
        assert!(text.contains("func total() int"));
    }

    #[test]
    fn test_table_marks_promoted() {
        let table = report(false).to_table(&OutputConfig::new(OutputFormat::Table));
        assert!(table.contains("promoted"));
        assert!(table.contains("shop.go:7"));
    }

    #[test]
    fn test_json_records() {
        let json = report(false).to_json(&OutputConfig::new(OutputFormat::Json).compact());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["packages"][0]["package"], "shop");
        assert_eq!(value["packages"][0]["declarations"][1]["promoted"], true);
    }
}
