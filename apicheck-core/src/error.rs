//! Error types for apicheck-core.

use thiserror::Error;

use crate::types::Declaration;

/// Result type alias for checker operations.
pub type Result<T> = std::result::Result<T, CheckError>;

/// Errors raised while reading revisions.
#[derive(Error, Debug)]
pub enum VcsError {
    /// The `git` executable could not be started.
    #[error("Failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    /// A git command ran but reported failure.
    #[error("git {command} failed: {stderr}")]
    Git { command: String, stderr: String },

    /// File or directory missing at the revision.
    #[error("{path} not found at revision {revision}")]
    NotFound { revision: String, path: String },

    /// Filesystem read failure.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// File content is not UTF-8.
    #[error("{path} is not valid UTF-8")]
    Encoding { path: String },

    /// The backend cannot pick a revision by itself.
    #[error("No default revision: {message}")]
    NoDefaultRevision { message: String },
}

/// Errors raised while parsing a Go source file. Fatal for a run.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Tree-sitter language could not be loaded.
    #[error("Failed to set language: {message}")]
    Language { message: String },

    /// Tree-sitter produced no tree.
    #[error("Failed to parse {path}")]
    Failed { path: String },

    /// The file contains a syntax error.
    #[error("{path}:{line}: syntax error")]
    Syntax { path: String, line: u32 },

    /// A declaration or type uses a construct the extractor has no shape for.
    #[error("{path}:{line}: unsupported {kind}")]
    Unsupported {
        path: String,
        line: u32,
        kind: String,
    },

    /// A build constraint line could not be evaluated.
    #[error("{path}: invalid build constraint {expr:?}")]
    Constraint { path: String, expr: String },
}

/// Errors raised when an interface method set cannot be materialized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("unknown interface {name}")]
    UnknownInterface { name: String },

    #[error("{name} is not an interface")]
    NotAnInterface { name: String },

    #[error("interface embedding too deep at {name}")]
    TooDeep { name: String },
}

/// Comparison failure for one declaration pair, with both sides attached
/// so the caller can print them.
#[derive(Error, Debug)]
#[error("{package}: comparing {}: {source}", .before.id)]
pub struct DiffError {
    pub package: String,
    pub before: Declaration,
    pub after: Declaration,
    #[source]
    pub source: ResolveError,
}

/// Errors returned by [`crate::checker::Checker`].
#[derive(Error, Debug)]
pub enum CheckError {
    #[error(transparent)]
    Vcs(#[from] VcsError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Compare(#[from] Box<DiffError>),

    /// Neither revision contains Go files at the path.
    #[error("no Go files in {path}")]
    NoGoFiles { path: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Position, Shape, TypeExpr, Visibility};

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::Syntax {
            path: "HEAD:a.go".into(),
            line: 4,
        };
        assert_eq!(err.to_string(), "HEAD:a.go:4: syntax error");
    }

    #[test]
    fn test_diff_error_names_declaration() {
        let decl = Declaration {
            id: "F".into(),
            name: "F".into(),
            visibility: Visibility::Public,
            promoted: false,
            shape: Shape::TypeAlias {
                ty: TypeExpr::Ident("int".into()),
                alias: false,
            },
            position: Position {
                file: "a.go".into(),
                line: 1,
            },
        };
        let err = CheckError::from(Box::new(DiffError {
            package: "p".into(),
            before: decl.clone(),
            after: decl,
            source: ResolveError::UnknownInterface {
                name: "x.Y".into(),
            },
        }));
        assert_eq!(err.to_string(), "p: comparing F: unknown interface x.Y");
    }
}
