//! Classification and change records.

use serde::{Deserialize, Serialize};

use crate::types::Declaration;

/// How a change affects downstream callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    None,
    NonBreaking,
    Breaking,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::None => "no change",
            Classification::NonBreaking => "non-breaking change",
            Classification::Breaking => "breaking change",
        }
    }

    pub fn is_breaking(&self) -> bool {
        matches!(self, Classification::Breaking)
    }
}

/// Result of comparing one declaration pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclChange {
    pub classification: Classification,
    pub message: String,
}

impl DeclChange {
    pub fn none() -> Self {
        Self {
            classification: Classification::None,
            message: String::new(),
        }
    }

    pub fn non_breaking(message: &str) -> Self {
        Self {
            classification: Classification::NonBreaking,
            message: message.to_string(),
        }
    }

    pub fn breaking(message: &str) -> Self {
        Self {
            classification: Classification::Breaking,
            message: message.to_string(),
        }
    }

    pub fn is_breaking(&self) -> bool {
        self.classification.is_breaking()
    }
}

/// One reported change between two revisions of a package.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
    /// Package name.
    pub package: String,

    /// Declaration id, absent for package-level records.
    pub id: Option<String>,

    pub classification: Classification,

    /// Human-readable reason.
    pub message: String,

    /// `file:line`, after position for added/changed, before for removed.
    pub position: Option<String>,

    pub before: Option<Declaration>,
    pub after: Option<Declaration>,
}

impl Change {
    pub fn removed(package: &str, before: Declaration) -> Self {
        Self {
            package: package.to_string(),
            id: Some(before.id.clone()),
            classification: Classification::Breaking,
            message: "declaration removed".to_string(),
            position: Some(before.position.to_string()),
            before: Some(before),
            after: None,
        }
    }

    pub fn added(package: &str, after: Declaration) -> Self {
        Self {
            package: package.to_string(),
            id: Some(after.id.clone()),
            classification: Classification::NonBreaking,
            message: "declaration added".to_string(),
            position: Some(after.position.to_string()),
            before: None,
            after: Some(after),
        }
    }

    pub fn changed(package: &str, change: DeclChange, before: Declaration, after: Declaration) -> Self {
        Self {
            package: package.to_string(),
            id: Some(after.id.clone()),
            classification: change.classification,
            message: change.message,
            position: Some(after.position.to_string()),
            before: Some(before),
            after: Some(after),
        }
    }

    pub fn package_removed(package: &str) -> Self {
        Self {
            package: package.to_string(),
            id: None,
            classification: Classification::Breaking,
            message: "package removed".to_string(),
            position: None,
            before: None,
            after: None,
        }
    }

    pub fn is_breaking(&self) -> bool {
        self.classification.is_breaking()
    }
}

/// Counts of changes per classification.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub breaking: usize,
    pub non_breaking: usize,
    pub unchanged: usize,
}

impl CheckSummary {
    pub fn from_changes(changes: &[Change]) -> Self {
        let mut summary = Self::default();
        for change in changes {
            summary.record(change.classification);
        }
        summary
    }

    pub fn record(&mut self, classification: Classification) {
        match classification {
            Classification::Breaking => self.breaking += 1,
            Classification::NonBreaking => self.non_breaking += 1,
            Classification::None => self.unchanged += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.breaking + self.non_breaking
    }

    pub fn has_breaking(&self) -> bool {
        self.breaking > 0
    }

    /// Generate human-readable summary text.
    pub fn text(&self) -> String {
        if self.total() == 0 {
            return "No API changes".to_string();
        }
        let mut parts = Vec::new();
        if self.breaking > 0 {
            parts.push(format!("{} breaking", self.breaking));
        }
        if self.non_breaking > 0 {
            parts.push(format!("{} non-breaking", self.non_breaking));
        }
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Classification::None.as_str(), "no change");
        assert_eq!(Classification::NonBreaking.as_str(), "non-breaking change");
        assert_eq!(Classification::Breaking.as_str(), "breaking change");
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&Classification::NonBreaking).unwrap();
        assert_eq!(json, "\"non-breaking\"");
    }

    #[test]
    fn test_package_removed_has_no_id() {
        let change = Change::package_removed("widget");
        assert!(change.id.is_none());
        assert!(change.is_breaking());
        assert_eq!(change.message, "package removed");
    }

    #[test]
    fn test_summary_text() {
        let mut summary = CheckSummary::default();
        assert_eq!(summary.text(), "No API changes");
        summary.record(Classification::Breaking);
        summary.record(Classification::NonBreaking);
        summary.record(Classification::NonBreaking);
        assert_eq!(summary.text(), "1 breaking, 2 non-breaking");
        assert!(summary.has_breaking());
    }
}
