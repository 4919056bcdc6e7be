//! Table output formatting using the `tabled` crate

use super::OutputConfig;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::style::Style,
    Table,
};

/// Column definition: header text and the serialized field it shows.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub key: String,
}

impl Column {
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }
}

/// Table output formatter
pub struct TableOutput;

impl TableOutput {
    /// One row per item, cells taken from the serialized fields named by `columns`.
    pub fn format_with_columns<T: Serialize>(
        data: &[T],
        columns: &[Column],
        config: &OutputConfig,
    ) -> String {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|item| {
                let json = serde_json::to_value(item).unwrap_or_default();
                columns
                    .iter()
                    .map(|col| Self::value_to_string(json.get(&col.key)))
                    .collect()
            })
            .collect();
        let headers: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        Self::from_rows(&headers, &rows, config)
    }

    /// Create a table from rows of strings
    pub fn from_rows(headers: &[&str], rows: &[Vec<String>], config: &OutputConfig) -> String {
        if rows.is_empty() {
            return "(no results)".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(headers.iter().copied());
        for row in rows {
            builder.push_record(row.iter().map(|s| s.as_str()));
        }

        let mut table = builder.build();
        Self::style(&mut table, config);
        table.to_string()
    }

    fn style(table: &mut Table, config: &OutputConfig) {
        if config.compact {
            table.with(Style::blank());
        } else {
            table.with(Style::rounded());
        }
    }

    fn value_to_string(value: Option<&serde_json::Value>) -> String {
        match value {
            None | Some(serde_json::Value::Null) => "-".to_string(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::OutputFormat;
    use super::*;

    #[derive(Serialize)]
    struct Row {
        id: String,
        position: Option<String>,
    }

    #[test]
    fn test_format_with_columns() {
        let data = vec![
            Row {
                id: "Reader".to_string(),
                position: Some("a.go:3".to_string()),
            },
            Row {
                id: "Writer".to_string(),
                position: None,
            },
        ];
        let columns = vec![Column::new("ID", "id"), Column::new("Position", "position")];
        let output =
            TableOutput::format_with_columns(&data, &columns, &OutputConfig::new(OutputFormat::Table));

        assert!(output.contains("ID"));
        assert!(output.contains("Reader"));
        assert!(output.contains("a.go:3"));
        assert!(output.contains('-'));
    }

    #[test]
    fn test_empty_data() {
        let data: Vec<Row> = vec![];
        let columns = vec![Column::new("ID", "id")];
        let output =
            TableOutput::format_with_columns(&data, &columns, &OutputConfig::new(OutputFormat::Table));
        assert_eq!(output, "(no results)");
    }

    #[test]
    fn test_compact_has_no_borders() {
        let config = OutputConfig::new(OutputFormat::Table).compact();
        let output = TableOutput::from_rows(&["A"], &[vec!["x".to_string()]], &config);
        assert!(!output.contains('╭'));
    }
}
