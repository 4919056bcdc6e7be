//! `apicheck check`: compare a package between two revisions.

use anyhow::{anyhow, Context, Result};
use apicheck_core::error::DiffError;
use apicheck_core::exporter::json::ChangeRecord;
use apicheck_core::exporter::render_declaration;
use apicheck_core::{Change, CheckError, CheckSummary, Classification};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::SourceArgs;
use crate::config::ApicheckConfig;
use crate::output::{Column, Output, OutputConfig, OutputFormat, Outputter, TableOutput};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Package directory, relative to the repository root
    #[arg(default_value = ".")]
    pub path: String,

    /// Revision to compare from (default: config, then the backend default)
    #[arg(short, long)]
    pub before: Option<String>,

    /// Revision to compare to (default: config, then the backend default)
    #[arg(short, long)]
    pub after: Option<String>,

    /// Report non-breaking changes too
    #[arg(long)]
    pub all: bool,

    /// Print the declarations involved in each change
    #[arg(long)]
    pub show_decls: bool,

    /// Exit 0 even when breaking changes are found
    #[arg(long)]
    pub no_fail: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Result of `apicheck check`.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub path: String,
    /// Counts over every change, including those not listed.
    pub summary: CheckSummary,
    pub changes: Vec<ChangeRecord>,
    #[serde(skip)]
    show_decls: bool,
}

impl CheckReport {
    /// Breaking changes only, unless `all` is set.
    pub fn new(path: &str, changes: &[Change], all: bool) -> Self {
        Self {
            path: path.to_string(),
            summary: CheckSummary::from_changes(changes),
            changes: changes
                .iter()
                .filter(|change| all || change.is_breaking())
                .map(ChangeRecord::from)
                .collect(),
            show_decls: false,
        }
    }

    pub fn with_declarations(mut self, show: bool) -> Self {
        self.show_decls = show;
        self
    }

    fn label(record: &ChangeRecord, config: &OutputConfig) -> String {
        let label = record.change.as_str();
        if !config.use_colors() {
            return label.to_string();
        }
        match record.classification {
            Classification::Breaking => label.red().bold().to_string(),
            Classification::NonBreaking => label.green().to_string(),
            Classification::None => label.dimmed().to_string(),
        }
    }
}

impl Outputter for CheckReport {
    fn to_text(&self, config: &OutputConfig) -> String {
        let mut out = String::new();
        for record in &self.changes {
            let location = record.position.as_deref().unwrap_or(&record.package);
            out.push_str(&format!(
                "{}: {} {}\n",
                location,
                Self::label(record, config),
                record.message
            ));
            if self.show_decls {
                for decl in record.before.iter().chain(record.after.iter()) {
                    for line in decl.lines() {
                        out.push_str(&format!("    {}\n", line));
                    }
                }
            }
        }

        let summary = self.summary.text();
        let summary = if !config.use_colors() {
            summary
        } else if self.summary.has_breaking() {
            summary.red().to_string()
        } else {
            summary.green().to_string()
        };
        out.push_str(&format!("{}: {}\n", self.path, summary));
        out
    }

    fn to_table(&self, config: &OutputConfig) -> String {
        let columns = vec![
            Column::new("Position", "position"),
            Column::new("Id", "id"),
            Column::new("Change", "change"),
            Column::new("Message", "message"),
        ];
        let mut out = TableOutput::format_with_columns(&self.changes, &columns, config);
        out.push_str(&format!("\n{}: {}", self.path, self.summary.text()));
        out
    }
}

/// Run the check and print the report. Returns whether the command should fail.
pub fn run(args: CheckArgs, config: &ApicheckConfig, format: OutputFormat) -> Result<bool> {
    let checker = args.source.checker(config)?;
    let before = args
        .before
        .clone()
        .or_else(|| config.check.before.clone())
        .unwrap_or_default();
    let after = args
        .after
        .clone()
        .or_else(|| config.check.after.clone())
        .unwrap_or_default();

    let changes = match checker.check(&args.path, &before, &after) {
        Ok(changes) => changes,
        Err(CheckError::Compare(err)) => {
            return Err(anyhow!(describe_compare_error(&err))
                .context(format!("Failed to check {}", args.path)));
        }
        Err(err) => return Err(err).with_context(|| format!("Failed to check {}", args.path)),
    };

    let report = CheckReport::new(&args.path, &changes, args.all || config.check.all)
        .with_declarations(args.show_decls);
    let breaking = report.summary.has_breaking();
    Output::new(report, format)
        .compact(config.output.compact)
        .render()?;

    Ok(breaking && !args.no_fail)
}

/// The error followed by both declarations, so the failing pair can be inspected.
fn describe_compare_error(err: &DiffError) -> String {
    let mut out = err.to_string();
    for (label, decl) in [("before", &err.before), ("after", &err.after)] {
        out.push_str(&format!("\n{} ({}):\n", label, decl.position));
        for line in render_declaration(decl).lines() {
            out.push_str(&format!("    {}\n", line));
        }
    }
    out
}
