//! Public surface extraction.
//!
//! Reduces the parsed files of one package into an id → [`Declaration`] map.
//! Exported declarations go to the public map; private types named in the
//! results of exported functions are promoted into it together with their
//! exported methods.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::types::{
    is_exported, DeclKind, Declaration, FuncDecl, Position, Shape, SourceFile, TopDecl, TypeExpr,
    TypeSpec, ValueSpec, Visibility,
};

/// Declarations of one package at one revision.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// Declarations compared across revisions.
    pub public: BTreeMap<String, Declaration>,
    /// Everything else. Never compared.
    pub private: BTreeMap<String, Declaration>,
}

impl Extraction {
    pub fn len(&self) -> usize {
        self.public.len()
    }

    pub fn is_empty(&self) -> bool {
        self.public.is_empty()
    }

    pub fn promoted(&self) -> impl Iterator<Item = &Declaration> {
        self.public.values().filter(|decl| decl.promoted)
    }
}

/// Extract the declaration maps of a package from its parsed files.
pub fn extract(files: &[SourceFile]) -> Extraction {
    let mut extraction = Extraction::default();
    let mut returned = BTreeSet::new();

    for file in files {
        for decl in &file.decls {
            match decl {
                TopDecl::Value(spec) => {
                    for decl in value_declarations(spec, &file.path) {
                        insert(&mut extraction, decl);
                    }
                }
                TopDecl::Type(spec) => insert(&mut extraction, type_declaration(spec, &file.path)),
                TopDecl::Func(func) => {
                    let decl = func_declaration(func, &file.path);
                    if decl.visibility.is_public() {
                        returned.extend(
                            func.ty
                                .results
                                .iter()
                                .filter_map(|field| field.ty.local_type_name())
                                .map(str::to_string),
                        );
                    }
                    insert(&mut extraction, decl);
                }
            }
        }
    }

    promote(&mut extraction, &returned);
    extraction
}

fn insert(extraction: &mut Extraction, decl: Declaration) {
    let map = if decl.visibility.is_public() {
        &mut extraction.public
    } else {
        &mut extraction.private
    };
    map.insert(decl.id.clone(), decl);
}

/// Move returned private types, and exported methods on them, into the public map.
fn promote(extraction: &mut Extraction, returned: &BTreeSet<String>) {
    let promoted: Vec<String> = extraction
        .private
        .iter()
        .filter(|(_, decl)| match decl.receiver() {
            None => returned.contains(&decl.id) && decl.kind() != DeclKind::Function,
            Some(receiver) => returned.contains(&receiver.type_name) && is_exported(&decl.name),
        })
        .map(|(id, _)| id.clone())
        .collect();

    for id in promoted {
        if let Some(mut decl) = extraction.private.remove(&id) {
            tracing::trace!("Promoting {} through a public result", id);
            decl.promoted = true;
            extraction.public.insert(id, decl);
        }
    }
}

fn value_declarations<'a>(
    spec: &'a ValueSpec,
    file: &'a str,
) -> impl Iterator<Item = Declaration> + 'a {
    spec.names
        .iter()
        .filter(|name| name.as_str() != "_")
        .map(move |name| Declaration {
            id: name.clone(),
            name: name.clone(),
            visibility: Visibility::of(name),
            promoted: false,
            shape: Shape::Value {
                keyword: spec.keyword,
                ty: spec.ty.clone(),
            },
            position: position(file, spec.line),
        })
}

fn type_declaration(spec: &TypeSpec, file: &str) -> Declaration {
    let shape = match &spec.ty {
        TypeExpr::Struct(fields) => Shape::Struct(fields.clone()),
        TypeExpr::Interface(fields) => Shape::Interface(fields.clone()),
        ty => Shape::TypeAlias {
            ty: ty.clone(),
            alias: spec.alias,
        },
    };
    Declaration {
        id: spec.name.clone(),
        name: spec.name.clone(),
        visibility: Visibility::of(&spec.name),
        promoted: false,
        shape,
        position: position(file, spec.line),
    }
}

fn func_declaration(func: &FuncDecl, file: &str) -> Declaration {
    let (id, public) = match &func.receiver {
        Some(receiver) => (
            format!("{}.{}", receiver.type_name, func.name),
            is_exported(&func.name) && is_exported(&receiver.type_name),
        ),
        None => (func.name.clone(), is_exported(&func.name)),
    };
    Declaration {
        id,
        name: func.name.clone(),
        visibility: if public {
            Visibility::Public
        } else {
            Visibility::Private
        },
        promoted: false,
        shape: Shape::Function {
            receiver: func.receiver.clone(),
            ty: func.ty.clone(),
        },
        position: position(file, func.line),
    }
}

fn position(file: &str, line: u32) -> Position {
    Position {
        file: file.to_string(),
        line,
    }
}
