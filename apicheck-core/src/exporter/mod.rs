//! Exporters for declarations and change lists.
//!
//! - [`text`]: Go-like declarations and the `pos: label message` change form
//! - [`json`]: serde records with declarations rendered as Go text

pub mod json;
pub mod text;

pub use text::render_declaration;

/// Export configuration.
#[derive(Clone, Debug, Default)]
pub struct ExportConfig {
    /// Print the before/after declarations under each change.
    pub include_declarations: bool,
    pub pretty_print: bool,
}

impl ExportConfig {
    pub fn new(include_declarations: bool, pretty_print: bool) -> Self {
        Self {
            include_declarations,
            pretty_print,
        }
    }
}
