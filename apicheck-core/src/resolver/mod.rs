//! Syntactic type resolution.
//!
//! A [`TypeResolver`] answers identity questions for one package at one
//! revision: what a type expression denotes, what type a package-level value
//! has, and what methods an interface carries once embedded interfaces are
//! expanded. Resolvers are built once and only read afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ResolveError;
use crate::types::{write_joined, ChanDir, Field, TypeExpr};

mod package;
pub mod stdlib;

pub use package::PackageResolver;

/// Which resolver produced a named type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// Predeclared: `error`, `comparable`.
    Universe,
    /// Built-in standard-library table.
    Stdlib,
    /// A package outside the table, known only by path and name.
    External,
    /// One resolved package at one revision.
    Revision(u64),
}

/// A member of a resolved struct or interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub name: Option<String>,
    pub ty: Type,
    pub embedded: bool,
}

/// A resolved type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    /// Predeclared basic type, or an untyped constant kind (`untyped int`).
    Basic(String),
    Named {
        path: String,
        name: String,
        origin: Origin,
    },
    Pointer(Box<Type>),
    Slice(Box<Type>),
    Array {
        len: String,
        elem: Box<Type>,
    },
    Map {
        key: Box<Type>,
        value: Box<Type>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<Type>,
    },
    Func {
        params: Vec<Type>,
        results: Vec<Type>,
    },
    Struct(Vec<Member>),
    Interface(Vec<Member>),
    Variadic(Box<Type>),
    Generic {
        base: Box<Type>,
        args: Vec<Type>,
    },
    Constraint(String),
    /// Could not be resolved; carries the source text.
    Unresolved(String),
}

impl Type {
    pub fn basic(name: &str) -> Self {
        Type::Basic(name.to_string())
    }

    pub fn is_untyped(&self) -> bool {
        matches!(self, Type::Basic(name) if name.starts_with("untyped "))
    }

    /// Default type of an untyped constant, as a `var` would receive it.
    pub fn defaulted(self) -> Self {
        match &self {
            Type::Basic(name) => match name.as_str() {
                "untyped int" => Type::basic("int"),
                "untyped float" => Type::basic("float64"),
                "untyped complex" => Type::basic("complex128"),
                "untyped rune" => Type::basic("int32"),
                "untyped string" => Type::basic("string"),
                "untyped bool" => Type::basic("bool"),
                _ => self,
            },
            _ => self,
        }
    }
}

fn write_signature(f: &mut fmt::Formatter<'_>, params: &[Type], results: &[Type]) -> fmt::Result {
    f.write_str("(")?;
    write_joined(f, params, ", ")?;
    f.write_str(")")?;
    match results {
        [] => Ok(()),
        [single] => write!(f, " {}", single),
        many => {
            f.write_str(" (")?;
            write_joined(f, many, ", ")?;
            f.write_str(")")
        }
    }
}

/// Canonical text. Ignores origins and import aliases.
impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Basic(name) | Type::Constraint(name) | Type::Unresolved(name) => {
                f.write_str(name)
            }
            Type::Named { path, name, .. } if path.is_empty() => f.write_str(name),
            Type::Named { path, name, .. } => write!(f, "{}.{}", path, name),
            Type::Pointer(inner) => write!(f, "*{}", inner),
            Type::Slice(elem) => write!(f, "[]{}", elem),
            Type::Array { len, elem } => write!(f, "[{}]{}", len, elem),
            Type::Map { key, value } => write!(f, "map[{}]{}", key, value),
            Type::Chan { dir, elem } => write!(f, "{} {}", dir, elem),
            Type::Func { params, results } => {
                f.write_str("func")?;
                write_signature(f, params, results)
            }
            Type::Struct(members) => {
                f.write_str("struct{")?;
                for (i, m) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    match &m.name {
                        Some(name) if !m.embedded => write!(f, "{} {}", name, m.ty)?,
                        _ => write!(f, "{}", m.ty)?,
                    }
                }
                f.write_str("}")
            }
            Type::Interface(members) => {
                f.write_str("interface{")?;
                for (i, m) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    match (&m.name, &m.ty) {
                        (Some(name), Type::Func { params, results }) => {
                            f.write_str(name)?;
                            write_signature(f, params, results)?;
                        }
                        _ => write!(f, "{}", m.ty)?,
                    }
                }
                f.write_str("}")
            }
            Type::Variadic(elem) => write!(f, "...{}", elem),
            Type::Generic { base, args } => {
                write!(f, "{}[", base)?;
                write_joined(f, args, ", ")?;
                f.write_str("]")
            }
        }
    }
}

/// Type identity across two revisions: nominal first, then canonical text.
pub fn identical(before: &Type, after: &Type) -> bool {
    before == after || before.to_string() == after.to_string()
}

/// Type information for one package at one revision.
pub trait TypeResolver: Send + Sync {
    /// What a type expression denotes. Unknown names become [`Type::Unresolved`].
    fn resolve(&self, expr: &TypeExpr) -> Type;

    /// Declared or inferred type of a package-level value.
    fn value_type(&self, name: &str) -> Option<Type>;

    /// Full method set of an interface type, `Ok(None)` for non-interfaces.
    ///
    /// Embedded interfaces are expanded and local names qualified, so the
    /// returned fields can be compared against another revision's.
    fn interface_methods(&self, expr: &TypeExpr) -> Result<Option<Vec<Field>>, ResolveError>;

    fn is_interface(&self, expr: &TypeExpr) -> bool {
        !matches!(self.interface_methods(expr), Ok(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_ignores_origin() {
        let a = Type::Named {
            path: "example.com/p".into(),
            name: "Config".into(),
            origin: Origin::Revision(1),
        };
        let b = Type::Named {
            path: "example.com/p".into(),
            name: "Config".into(),
            origin: Origin::Revision(2),
        };
        assert_ne!(a, b);
        assert!(identical(&a, &b));
        assert!(!identical(&a, &Type::basic("int")));
    }

    #[test]
    fn test_display_func_and_interface() {
        let read = Type::Func {
            params: vec![Type::Slice(Box::new(Type::basic("uint8")))],
            results: vec![Type::basic("int"), Type::Named {
                path: String::new(),
                name: "error".into(),
                origin: Origin::Universe,
            }],
        };
        let iface = Type::Interface(vec![Member {
            name: Some("Read".into()),
            ty: read.clone(),
            embedded: false,
        }]);
        assert_eq!(read.to_string(), "func([]uint8) (int, error)");
        assert_eq!(iface.to_string(), "interface{Read([]uint8) (int, error)}");
    }

    #[test]
    fn test_defaulted() {
        assert_eq!(Type::basic("untyped float").defaulted(), Type::basic("float64"));
        assert_eq!(Type::basic("untyped rune").defaulted(), Type::basic("int32"));
        assert_eq!(Type::basic("uint").defaulted(), Type::basic("uint"));
    }
}
