//! Go-like text exporter.

use crate::differ::Change;
use crate::exporter::ExportConfig;
use crate::extractor::Extraction;
use crate::types::{Declaration, Field, Shape, TypeExpr};

/// Render a declaration as Go source without a body.
pub fn render_declaration(decl: &Declaration) -> String {
    match &decl.shape {
        Shape::Value { keyword, ty } => match ty {
            Some(ty) => format!("{} {} {}", keyword.as_str(), decl.name, ty),
            None => format!("{} {}", keyword.as_str(), decl.name),
        },
        Shape::TypeAlias { ty, alias: true } => format!("type {} = {}", decl.name, ty),
        Shape::TypeAlias { ty, alias: false } => format!("type {} {}", decl.name, ty),
        Shape::Struct(fields) => render_block(&decl.name, "struct", fields),
        Shape::Interface(fields) => render_block(&decl.name, "interface", fields),
        Shape::Function { receiver, ty } => match receiver {
            Some(recv) => {
                let star = if recv.pointer { "*" } else { "" };
                match &recv.name {
                    Some(name) => {
                        format!("func ({} {}{}) {}{}", name, star, recv.type_name, decl.name, ty)
                    }
                    None => format!("func ({}{}) {}{}", star, recv.type_name, decl.name, ty),
                }
            }
            None => format!("func {}{}", decl.name, ty),
        },
    }
}

fn render_block(name: &str, keyword: &str, fields: &[Field]) -> String {
    if fields.is_empty() {
        return format!("type {} {}{{}}", name, keyword);
    }
    let mut lines = vec![format!("type {} {} {{", name, keyword)];
    for field in fields {
        let member = match (&field.name, &field.ty) {
            (Some(name), TypeExpr::Func(sig)) if keyword == "interface" => {
                format!("{}{}", name, sig)
            }
            _ => field.to_string(),
        };
        lines.push(format!("\t{}", member));
    }
    lines.push("}".to_string());
    lines.join("\n")
}

/// Export one change: the summary line, then the declarations when configured.
pub fn export_change(change: &Change, config: &ExportConfig) -> String {
    let location = change.position.as_deref().unwrap_or(&change.package);
    let mut output = format!(
        "{}: {} {}\n",
        location,
        change.classification.as_str(),
        change.message
    );
    if config.include_declarations {
        for decl in change.before.iter().chain(change.after.iter()) {
            output.push_str(&render_declaration(decl));
            output.push('\n');
        }
    }
    output
}

/// Export a change list.
pub fn export_all(changes: &[Change], config: &ExportConfig) -> String {
    let mut output = String::new();
    for change in changes {
        output.push_str(&export_change(change, config));
    }
    output
}

/// Export the extracted surface of a package.
pub fn export_extraction(package: &str, extraction: &Extraction, include_private: bool) -> String {
    let mut lines = vec![format!("package {}", package)];

    for decl in extraction.public.values() {
        lines.push(String::new());
        if decl.promoted {
            lines.push(format!("// promoted from {}", decl.position));
        }
        lines.push(render_declaration(decl));
    }

    if include_private && !extraction.private.is_empty() {
        lines.push(String::new());
        lines.push("// internal".to_string());
        for decl in extraction.private.values() {
            lines.push(String::new());
            lines.push(render_declaration(decl));
        }
    }

    lines.push(String::new());
    lines.join("\n")
}
