//! Data models for parsed Go source and extracted declarations.
//!
//! The parser produces [`SourceFile`]s: package clause, imports and the
//! top-level declarations of one file with every function body dropped.
//! The extractor turns those into [`Declaration`]s, the body-free units the
//! comparator classifies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Returns true if a Go identifier is exported (starts with an upper-case letter).
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Direction of a channel type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChanDir {
    /// `chan T`
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

/// A syntactic Go type expression.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeExpr {
    /// Unqualified name: predeclared, package-level or type parameter.
    Ident(String),
    /// `pkg.Name`. `path` is the import path the file bound `package` to.
    Qualified {
        package: String,
        path: String,
        name: String,
    },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Array {
        len: String,
        elem: Box<TypeExpr>,
    },
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<TypeExpr>,
    },
    Func(FuncType),
    Struct(Vec<Field>),
    Interface(Vec<Field>),
    /// `...T`, only valid as the last parameter.
    Variadic(Box<TypeExpr>),
    /// Instantiated generic type, `List[int]`.
    Generic {
        base: Box<TypeExpr>,
        args: Vec<TypeExpr>,
    },
    /// Type-set element inside a constraint interface (`~int | ~string`).
    Constraint(String),
}

impl TypeExpr {
    /// Syntactic category, used to detect shape changes such as struct to interface.
    pub fn category(&self) -> &'static str {
        match self {
            TypeExpr::Ident(_) => "ident",
            TypeExpr::Qualified { .. } => "qualified",
            TypeExpr::Pointer(_) => "pointer",
            TypeExpr::Slice(_) => "slice",
            TypeExpr::Array { .. } => "array",
            TypeExpr::Map { .. } => "map",
            TypeExpr::Chan { .. } => "chan",
            TypeExpr::Func(_) => "func",
            TypeExpr::Struct(_) => "struct",
            TypeExpr::Interface(_) => "interface",
            TypeExpr::Variadic(_) => "variadic",
            TypeExpr::Generic { .. } => "generic",
            TypeExpr::Constraint(_) => "constraint",
        }
    }

    /// Name of the local named type this expression refers to, looking
    /// through one pointer level and generic instantiation.
    pub fn local_type_name(&self) -> Option<&str> {
        match self {
            TypeExpr::Ident(name) => Some(name),
            TypeExpr::Pointer(inner) => match inner.as_ref() {
                TypeExpr::Ident(name) => Some(name),
                TypeExpr::Generic { base, .. } => base.local_type_name(),
                _ => None,
            },
            TypeExpr::Generic { base, .. } => match base.as_ref() {
                TypeExpr::Ident(name) => Some(name),
                _ => None,
            },
            _ => None,
        }
    }

    /// The name an embedded field of this type is known by.
    pub fn embedded_name(&self) -> Option<&str> {
        match self {
            TypeExpr::Ident(name) => Some(name),
            TypeExpr::Qualified { name, .. } => Some(name),
            TypeExpr::Pointer(inner) => inner.embedded_name(),
            TypeExpr::Generic { base, .. } => base.embedded_name(),
            _ => None,
        }
    }
}

/// Parameter and result lists of a function type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncType {
    pub params: Vec<Field>,
    pub results: Vec<Field>,
}

/// A struct or interface member, or a function parameter or result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: Option<String>,
    pub ty: TypeExpr,
    pub embedded: bool,
}

impl Field {
    pub fn named(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: Some(name.into()),
            ty,
            embedded: false,
        }
    }

    pub fn unnamed(ty: TypeExpr) -> Self {
        Self {
            name: None,
            ty,
            embedded: false,
        }
    }

    pub fn embedded(ty: TypeExpr) -> Self {
        Self {
            name: None,
            ty,
            embedded: true,
        }
    }

    /// Name this member is addressed by: its own name, or the type name for
    /// an embedded member.
    pub fn key_name(&self) -> Option<&str> {
        match &self.name {
            Some(name) => Some(name),
            None if self.embedded => self.ty.embedded_name(),
            None => None,
        }
    }

    /// Correlation key used when diffing two field lists.
    pub fn match_key(&self, index: usize) -> String {
        match self.key_name() {
            Some(name) => name.to_string(),
            None => index.to_string(),
        }
    }

    pub fn is_exported(&self) -> bool {
        self.key_name().is_some_and(is_exported)
    }
}

/// `var` or `const`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKeyword {
    Var,
    Const,
}

impl ValueKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKeyword::Var => "var",
            ValueKeyword::Const => "const",
        }
    }
}

/// Kind of a basic literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiteralKind {
    Int,
    Float,
    Imaginary,
    Rune,
    String,
    Bool,
    Nil,
}

/// Initializer expression of a package-level value, kept only as far as
/// needed to infer the value's type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueExpr {
    Literal(LiteralKind),
    Iota,
    /// Reference to a package-level or predeclared name.
    Name(String),
    /// `pkg.Name` where `pkg` is an imported package.
    Qualified {
        package: String,
        path: String,
        name: String,
    },
    /// Composite literal `T{...}`.
    Composite(TypeExpr),
    /// `&x`
    AddressOf(Box<ValueExpr>),
    Unary {
        op: String,
        operand: Box<ValueExpr>,
    },
    Binary {
        op: String,
        left: Box<ValueExpr>,
        right: Box<ValueExpr>,
    },
    /// Function call or conversion.
    Call {
        callee: Box<ValueExpr>,
        args: Vec<ValueExpr>,
    },
    /// A type in expression position: conversion callee or `make`/`new` argument.
    Type(TypeExpr),
    FuncLit(FuncType),
    /// Anything else, as normalized source text.
    Other(String),
}

/// One `var`/`const` spec, possibly declaring several names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueSpec {
    pub keyword: ValueKeyword,
    pub names: Vec<String>,
    pub ty: Option<TypeExpr>,
    pub values: Vec<ValueExpr>,
    pub line: u32,
}

/// A `type` spec, either a definition or an alias (`type A = B`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSpec {
    pub name: String,
    pub type_params: Vec<Field>,
    pub alias: bool,
    pub ty: TypeExpr,
    pub line: u32,
}

/// Method receiver, `(r *T)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
    pub name: Option<String>,
    pub type_name: String,
    pub pointer: bool,
}

/// A function or method signature. Bodies are never kept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncDecl {
    pub name: String,
    pub receiver: Option<Receiver>,
    pub type_params: Vec<Field>,
    pub ty: FuncType,
    pub line: u32,
}

/// A top-level declaration of a source file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopDecl {
    Value(ValueSpec),
    Type(TypeSpec),
    Func(FuncDecl),
}

/// An import spec.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDef {
    pub path: String,
    pub alias: Option<String>,
}

/// A parsed Go source file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Display name used in positions, may carry a revision prefix.
    pub path: String,
    pub package: String,
    pub imports: Vec<ImportDef>,
    pub decls: Vec<TopDecl>,
}

/// Source location of a declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub file: String,
    pub line: u32,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Whether a declaration is exported by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn of(name: &str) -> Self {
        if is_exported(name) {
            Visibility::Public
        } else {
            Visibility::Private
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Visibility::Public)
    }
}

/// Kind of a declaration. A kind change between revisions is always breaking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclKind {
    Value,
    TypeAlias,
    Struct,
    Interface,
    Function,
}

impl DeclKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclKind::Value => "value",
            DeclKind::TypeAlias => "type",
            DeclKind::Struct => "struct",
            DeclKind::Interface => "interface",
            DeclKind::Function => "function",
        }
    }
}

/// Kind-specific payload of a declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Value {
        keyword: ValueKeyword,
        ty: Option<TypeExpr>,
    },
    TypeAlias {
        ty: TypeExpr,
        alias: bool,
    },
    Struct(Vec<Field>),
    Interface(Vec<Field>),
    Function {
        receiver: Option<Receiver>,
        ty: FuncType,
    },
}

/// One named, body-free unit of a package's surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// `Name`, or `Receiver.Name` for methods.
    pub id: String,
    pub name: String,
    pub visibility: Visibility,
    /// Private declaration exposed through a public function's result.
    pub promoted: bool,
    pub shape: Shape,
    pub position: Position,
}

impl Declaration {
    pub fn kind(&self) -> DeclKind {
        match self.shape {
            Shape::Value { .. } => DeclKind::Value,
            Shape::TypeAlias { .. } => DeclKind::TypeAlias,
            Shape::Struct(_) => DeclKind::Struct,
            Shape::Interface(_) => DeclKind::Interface,
            Shape::Function { .. } => DeclKind::Function,
        }
    }

    pub fn receiver(&self) -> Option<&Receiver> {
        match &self.shape {
            Shape::Function { receiver, .. } => receiver.as_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for ChanDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChanDir::Both => "chan",
            ChanDir::Send => "chan<-",
            ChanDir::Recv => "<-chan",
        })
    }
}

/// Writes `items` separated by `sep`.
pub(crate) fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    sep: &str,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Ident(name) => f.write_str(name),
            TypeExpr::Qualified { package, name, .. } => write!(f, "{}.{}", package, name),
            TypeExpr::Pointer(inner) => write!(f, "*{}", inner),
            TypeExpr::Slice(elem) => write!(f, "[]{}", elem),
            TypeExpr::Array { len, elem } => write!(f, "[{}]{}", len, elem),
            TypeExpr::Map { key, value } => write!(f, "map[{}]{}", key, value),
            TypeExpr::Chan { dir, elem } => write!(f, "{} {}", dir, elem),
            TypeExpr::Func(sig) => write!(f, "func{}", sig),
            TypeExpr::Struct(fields) => {
                f.write_str("struct{")?;
                write_joined(f, fields, "; ")?;
                f.write_str("}")
            }
            TypeExpr::Interface(fields) => {
                f.write_str("interface{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    match (&field.name, &field.ty) {
                        (Some(name), TypeExpr::Func(sig)) => write!(f, "{}{}", name, sig)?,
                        _ => write!(f, "{}", field)?,
                    }
                }
                f.write_str("}")
            }
            TypeExpr::Variadic(elem) => write!(f, "...{}", elem),
            TypeExpr::Generic { base, args } => {
                write!(f, "{}[", base)?;
                write_joined(f, args, ", ")?;
                f.write_str("]")
            }
            TypeExpr::Constraint(text) => f.write_str(text),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} {}", name, self.ty),
            None => write!(f, "{}", self.ty),
        }
    }
}

/// Renders the signature part of a function type: `(a int) (int, error)`.
impl fmt::Display for FuncType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        write_joined(f, &self.params, ", ")?;
        f.write_str(")")?;
        match self.results.as_slice() {
            [] => Ok(()),
            [single] if single.name.is_none() => write!(f, " {}", single.ty),
            results => {
                f.write_str(" (")?;
                write_joined(f, results, ", ")?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for ValueExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueExpr::Literal(kind) => write!(f, "{:?} literal", kind),
            ValueExpr::Iota => f.write_str("iota"),
            ValueExpr::Name(name) => f.write_str(name),
            ValueExpr::Qualified { package, name, .. } => write!(f, "{}.{}", package, name),
            ValueExpr::Composite(ty) => write!(f, "{}{{}}", ty),
            ValueExpr::AddressOf(inner) => write!(f, "&{}", inner),
            ValueExpr::Unary { op, operand } => write!(f, "{}{}", op, operand),
            ValueExpr::Binary { op, left, right } => write!(f, "{} {} {}", left, op, right),
            ValueExpr::Call { callee, args } => {
                write!(f, "{}(", callee)?;
                write_joined(f, args, ", ")?;
                f.write_str(")")
            }
            ValueExpr::Type(ty) => write!(f, "{}", ty),
            ValueExpr::FuncLit(sig) => write!(f, "func{}", sig),
            ValueExpr::Other(text) => f.write_str(text),
        }
    }
}
