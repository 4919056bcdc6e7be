//! JSON format exporter.

use serde::{Deserialize, Serialize};

use super::text::render_declaration;
use super::ExportConfig;
use crate::differ::{Change, Classification};
use crate::types::Declaration;

/// Serialized form of a [`Change`], declarations rendered as Go text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub package: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub classification: Classification,
    pub change: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

impl From<&Change> for ChangeRecord {
    fn from(change: &Change) -> Self {
        Self {
            package: change.package.clone(),
            id: change.id.clone(),
            classification: change.classification,
            change: change.classification.as_str().to_string(),
            message: change.message.clone(),
            position: change.position.clone(),
            before: change.before.as_ref().map(render_declaration),
            after: change.after.as_ref().map(render_declaration),
        }
    }
}

/// Serialized form of a [`Declaration`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeclarationRecord {
    pub id: String,
    pub kind: String,
    pub public: bool,
    pub promoted: bool,
    pub position: String,
    pub declaration: String,
}

impl From<&Declaration> for DeclarationRecord {
    fn from(decl: &Declaration) -> Self {
        Self {
            id: decl.id.clone(),
            kind: decl.kind().as_str().to_string(),
            public: decl.visibility.is_public(),
            promoted: decl.promoted,
            position: decl.position.to_string(),
            declaration: render_declaration(decl),
        }
    }
}

/// Export changes to JSON.
pub fn export(changes: &[Change], config: &ExportConfig) -> Result<String, serde_json::Error> {
    let records: Vec<ChangeRecord> = changes.iter().map(ChangeRecord::from).collect();
    to_string(&records, config)
}

/// Export declarations to JSON.
pub fn export_declarations<'a, I>(decls: I, config: &ExportConfig) -> Result<String, serde_json::Error>
where
    I: IntoIterator<Item = &'a Declaration>,
{
    let records: Vec<DeclarationRecord> = decls.into_iter().map(DeclarationRecord::from).collect();
    to_string(&records, config)
}

fn to_string<T: Serialize>(value: &T, config: &ExportConfig) -> Result<String, serde_json::Error> {
    if config.pretty_print {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::extract;
    use crate::parser::parse_source;

    fn decl(source: &str, id: &str) -> Declaration {
        let ex = extract(&[parse_source(source, "a.go").unwrap()]);
        ex.public[id].clone()
    }

    #[test]
    fn test_export_json() {
        let change = Change::added("a", decl("package a\n\nfunc F(x int) {}\n", "F"));
        let output = export(&[change], &ExportConfig::default()).unwrap();
        assert!(output.contains("\"classification\":\"non-breaking\""));
        assert!(output.contains("\"change\":\"non-breaking change\""));
        assert!(output.contains("\"after\":\"func F(x int)\""));
        assert!(!output.contains("\"before\""));
    }

    #[test]
    fn test_export_json_pretty() {
        let config = ExportConfig {
            pretty_print: true,
            ..Default::default()
        };
        let output = export(&[Change::package_removed("a")], &config).unwrap();
        assert!(output.contains('\n'));
        assert!(!output.contains("\"id\""));
    }

    #[test]
    fn test_export_declarations() {
        let d = decl("package a\n\ntype T struct{}\n", "T");
        let output = export_declarations([&d], &ExportConfig::default()).unwrap();
        let parsed: Vec<DeclarationRecord> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0].kind, "struct");
        assert_eq!(parsed[0].declaration, "type T struct{}");
    }
}
