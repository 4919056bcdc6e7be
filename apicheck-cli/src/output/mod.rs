//! Output formatting for apicheck CLI
//!
//! Every report renders as text (Go-like, for terminals and CI logs), table
//! (`tabled`) or JSON (machine-readable).

use clap::ValueEnum;
use serde::Serialize;
use std::io::IsTerminal;
use std::str::FromStr;

mod json;
mod table;

pub use self::json::JsonOutput;
pub use self::table::{Column, TableOutput};

/// Output format for CLI results
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Change lines followed by the declarations involved (default)
    #[default]
    Text,
    /// Human-readable table
    Table,
    /// JSON for machine consumption
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: '{}'", s)),
        }
    }
}

/// Configuration for output rendering
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Disable colored output
    pub no_color: bool,
    /// Compact mode (minified JSON, borderless tables)
    pub compact: bool,
}

impl OutputConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            no_color: false,
            compact: false,
        }
    }

    /// Disable colors when stdout is not a terminal or colors are turned off.
    pub fn auto_detect(format: OutputFormat) -> Self {
        let config = Self::new(format);
        if std::io::stdout().is_terminal() && colored::control::SHOULD_COLORIZE.should_colorize() {
            config
        } else {
            config.without_colors()
        }
    }

    pub fn use_colors(&self) -> bool {
        !self.no_color
    }

    pub fn without_colors(mut self) -> Self {
        self.no_color = true;
        self
    }

    pub fn compact(mut self) -> Self {
        self.compact = true;
        self
    }
}

/// Types that can be rendered in every output format.
pub trait Outputter: Serialize {
    fn to_text(&self, config: &OutputConfig) -> String;

    fn to_table(&self, config: &OutputConfig) -> String;

    fn to_json(&self, config: &OutputConfig) -> String {
        JsonOutput::format(self, config)
    }

    /// Render using the format specified in config
    fn render(&self, config: &OutputConfig) -> String {
        match config.format {
            OutputFormat::Text => self.to_text(config),
            OutputFormat::Table => self.to_table(config),
            OutputFormat::Json => self.to_json(config),
        }
    }
}

/// Result wrapper for formatted output
pub struct Output<T> {
    data: T,
    config: OutputConfig,
}

impl<T: Outputter> Output<T> {
    pub fn new(data: T, format: OutputFormat) -> Self {
        Self {
            data,
            config: OutputConfig::auto_detect(format),
        }
    }

    /// Minified JSON and borderless tables.
    pub fn compact(mut self, compact: bool) -> Self {
        if compact {
            self.config = self.config.compact();
        }
        self
    }

    /// Render the output to stdout
    pub fn render(&self) -> anyhow::Result<()> {
        let rendered = self.render_to_string();
        if rendered.ends_with('\n') {
            print!("{}", rendered);
        } else {
            println!("{}", rendered);
        }
        Ok(())
    }

    pub fn render_to_string(&self) -> String {
        self.data.render(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Greeting {
        text: String,
    }

    impl Outputter for Greeting {
        fn to_text(&self, _config: &OutputConfig) -> String {
            self.text.clone()
        }

        fn to_table(&self, config: &OutputConfig) -> String {
            TableOutput::from_rows(&["Text"], &[vec![self.text.clone()]], config)
        }
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_dispatch() {
        let greeting = Greeting {
            text: "hello".to_string(),
        };
        assert_eq!(greeting.render(&OutputConfig::new(OutputFormat::Text)), "hello");
        assert!(greeting
            .render(&OutputConfig::new(OutputFormat::Json))
            .contains("\"text\": \"hello\""));
        assert!(greeting
            .render(&OutputConfig::new(OutputFormat::Table))
            .contains("hello"));
    }
}
