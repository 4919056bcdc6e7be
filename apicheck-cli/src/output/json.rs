//! JSON output formatting.

use super::OutputConfig;
use serde::Serialize;

/// JSON output formatter
pub struct JsonOutput;

impl JsonOutput {
    /// Pretty-printed unless `config.compact` is set.
    pub fn format<T: Serialize + ?Sized>(data: &T, config: &OutputConfig) -> String {
        if config.compact {
            serde_json::to_string(data).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        } else {
            serde_json::to_string_pretty(data)
                .unwrap_or_else(|e| format!("{{\n  \"error\": \"{}\"\n}}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::OutputFormat;
    use super::*;

    #[derive(Serialize)]
    struct Record {
        id: String,
        breaking: bool,
    }

    fn record() -> Record {
        Record {
            id: "Client.Dial".to_string(),
            breaking: true,
        }
    }

    #[test]
    fn test_format_pretty() {
        let output = JsonOutput::format(&record(), &OutputConfig::new(OutputFormat::Json));
        assert!(output.contains("\"id\": \"Client.Dial\""));
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_format_compact() {
        let config = OutputConfig::new(OutputFormat::Json).compact();
        let output = JsonOutput::format(&record(), &config);
        assert_eq!(output, "{\"id\":\"Client.Dial\",\"breaking\":true}");
    }

    #[test]
    fn test_format_slice() {
        let records = [record(), record()];
        let output = JsonOutput::format(&records[..], &OutputConfig::new(OutputFormat::Json));
        assert!(output.starts_with('['));
        assert!(output.ends_with(']'));
    }
}
