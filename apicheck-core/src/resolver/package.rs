use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{stdlib, Member, Origin, Type, TypeResolver};
use crate::error::ResolveError;
use crate::types::{
    Field, FuncType, LiteralKind, SourceFile, TopDecl, TypeExpr, TypeSpec, ValueExpr,
    ValueKeyword,
};

/// Guards alias chains, value references and interface embedding.
const MAX_DEPTH: usize = 32;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

const BASIC_TYPES: &[&str] = &[
    "bool", "string", "int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16",
    "uint32", "uint64", "uintptr", "float32", "float64", "complex64", "complex128",
];

/// Predeclared type names.
fn universe(name: &str) -> Option<Type> {
    match name {
        "byte" => Some(Type::basic("uint8")),
        "rune" => Some(Type::basic("int32")),
        "any" => Some(Type::Interface(Vec::new())),
        "error" | "comparable" => Some(Type::Named {
            path: String::new(),
            name: name.to_string(),
            origin: Origin::Universe,
        }),
        _ if BASIC_TYPES.contains(&name) => Some(Type::basic(name)),
        _ => None,
    }
}

fn error_method() -> Field {
    Field::named(
        "Error",
        TypeExpr::Func(FuncType {
            params: Vec::new(),
            results: vec![Field::unnamed(TypeExpr::Ident("string".into()))],
        }),
    )
}

fn untyped_rank(ty: &Type) -> Option<u8> {
    match ty {
        Type::Basic(name) => match name.as_str() {
            "untyped int" => Some(0),
            "untyped rune" => Some(1),
            "untyped float" => Some(2),
            "untyped complex" => Some(3),
            _ => None,
        },
        _ => None,
    }
}

/// Result type of a binary arithmetic expression.
fn combine(left: Type, right: Type) -> Type {
    match (left.is_untyped(), right.is_untyped()) {
        (true, false) => right,
        (true, true) => match (untyped_rank(&left), untyped_rank(&right)) {
            (Some(l), Some(r)) if r > l => right,
            _ => left,
        },
        _ => left,
    }
}

#[derive(Debug, Clone)]
struct ValueInfo {
    keyword: ValueKeyword,
    ty: Option<TypeExpr>,
    init: Option<ValueExpr>,
    /// Position in a multi-value initializer: `a, b = f()`.
    tuple_index: Option<usize>,
}

enum Lookup {
    Interface(Vec<Field>),
    NotInterface,
    Unknown,
}

/// Resolver for one package at one revision.
#[derive(Debug)]
pub struct PackageResolver {
    path: String,
    name: String,
    origin: Origin,
    types: HashMap<String, TypeSpec>,
    values: HashMap<String, ValueInfo>,
    funcs: HashMap<String, FuncType>,
}

impl PackageResolver {
    /// Index the package-level declarations of `files`.
    ///
    /// `path` qualifies named types; each call gets a fresh origin, so named
    /// types of two resolvers are never nominally identical.
    pub fn new(path: impl Into<String>, files: &[SourceFile]) -> Self {
        let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
        Self::build(path.into(), files, Origin::Revision(generation))
    }

    pub(crate) fn stdlib(path: &str, files: &[SourceFile]) -> Self {
        Self::build(path.to_string(), files, Origin::Stdlib)
    }

    fn build(path: String, files: &[SourceFile], origin: Origin) -> Self {
        let mut resolver = Self {
            name: files.first().map(|f| f.package.clone()).unwrap_or_default(),
            path,
            origin,
            types: HashMap::new(),
            values: HashMap::new(),
            funcs: HashMap::new(),
        };

        for decl in files.iter().flat_map(|f| &f.decls) {
            match decl {
                TopDecl::Type(spec) => {
                    resolver.types.insert(spec.name.clone(), spec.clone());
                }
                TopDecl::Func(func) if func.receiver.is_none() => {
                    resolver.funcs.insert(func.name.clone(), func.ty.clone());
                }
                TopDecl::Func(_) => {}
                TopDecl::Value(spec) => {
                    let tuple = spec.names.len() > 1 && spec.values.len() == 1;
                    for (i, name) in spec.names.iter().enumerate() {
                        if name == "_" {
                            continue;
                        }
                        let (init, tuple_index) = if tuple {
                            (spec.values.first().cloned(), Some(i))
                        } else {
                            (spec.values.get(i).cloned(), None)
                        };
                        resolver.values.insert(
                            name.clone(),
                            ValueInfo {
                                keyword: spec.keyword,
                                ty: spec.ty.clone(),
                                init,
                                tuple_index,
                            },
                        );
                    }
                }
            }
        }
        resolver
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    // ---- types ----

    fn resolve_depth(&self, expr: &TypeExpr, depth: usize) -> Type {
        if depth > MAX_DEPTH {
            return Type::Unresolved(expr.to_string());
        }
        let next = depth + 1;
        let boxed = |t: &TypeExpr| Box::new(self.resolve_depth(t, next));
        let members = |fields: &[Field]| -> Vec<Member> {
            fields
                .iter()
                .map(|f| Member {
                    name: f.key_name().map(str::to_string),
                    ty: self.resolve_depth(&f.ty, next),
                    embedded: f.embedded,
                })
                .collect()
        };

        match expr {
            TypeExpr::Ident(name) => self.resolve_name(name, depth),
            TypeExpr::Qualified { path, name, .. } if *path == self.path => {
                self.resolve_name(name, depth)
            }
            TypeExpr::Qualified { path, name, .. } => match stdlib::lookup(path) {
                Some(pkg) if pkg.has_type(name) => pkg.resolve_name(name, next),
                _ => Type::Named {
                    path: path.clone(),
                    name: name.clone(),
                    origin: Origin::External,
                },
            },
            TypeExpr::Pointer(inner) => Type::Pointer(boxed(inner)),
            TypeExpr::Slice(elem) => Type::Slice(boxed(elem)),
            TypeExpr::Array { len, elem } => Type::Array {
                len: len.clone(),
                elem: boxed(elem),
            },
            TypeExpr::Map { key, value } => Type::Map {
                key: boxed(key),
                value: boxed(value),
            },
            TypeExpr::Chan { dir, elem } => Type::Chan {
                dir: *dir,
                elem: boxed(elem),
            },
            TypeExpr::Func(sig) => Type::Func {
                params: sig.params.iter().map(|f| self.resolve_depth(&f.ty, next)).collect(),
                results: sig.results.iter().map(|f| self.resolve_depth(&f.ty, next)).collect(),
            },
            TypeExpr::Struct(fields) => Type::Struct(members(fields)),
            TypeExpr::Interface(fields) => Type::Interface(members(fields)),
            TypeExpr::Variadic(elem) => Type::Variadic(boxed(elem)),
            TypeExpr::Generic { base, args } => Type::Generic {
                base: boxed(base),
                args: args.iter().map(|a| self.resolve_depth(a, next)).collect(),
            },
            TypeExpr::Constraint(text) => Type::Constraint(text.clone()),
        }
    }

    fn resolve_name(&self, name: &str, depth: usize) -> Type {
        match self.types.get(name) {
            Some(spec) if spec.alias => self.resolve_depth(&spec.ty, depth + 1),
            Some(_) => Type::Named {
                path: self.path.clone(),
                name: name.to_string(),
                origin: self.origin,
            },
            None => universe(name).unwrap_or_else(|| Type::Unresolved(name.to_string())),
        }
    }

    /// Rewrite names of this package's types as qualified references.
    fn qualify(&self, expr: &TypeExpr) -> TypeExpr {
        let boxed = |t: &TypeExpr| Box::new(self.qualify(t));
        let fields = |fs: &[Field]| -> Vec<Field> {
            fs.iter()
                .map(|f| Field {
                    ty: self.qualify(&f.ty),
                    ..f.clone()
                })
                .collect()
        };
        match expr {
            TypeExpr::Ident(name) if self.types.contains_key(name) => TypeExpr::Qualified {
                package: self.name.clone(),
                path: self.path.clone(),
                name: name.clone(),
            },
            TypeExpr::Ident(_) | TypeExpr::Qualified { .. } | TypeExpr::Constraint(_) => {
                expr.clone()
            }
            TypeExpr::Pointer(inner) => TypeExpr::Pointer(boxed(inner)),
            TypeExpr::Slice(elem) => TypeExpr::Slice(boxed(elem)),
            TypeExpr::Array { len, elem } => TypeExpr::Array {
                len: len.clone(),
                elem: boxed(elem),
            },
            TypeExpr::Map { key, value } => TypeExpr::Map {
                key: boxed(key),
                value: boxed(value),
            },
            TypeExpr::Chan { dir, elem } => TypeExpr::Chan {
                dir: *dir,
                elem: boxed(elem),
            },
            TypeExpr::Func(sig) => TypeExpr::Func(FuncType {
                params: fields(&sig.params),
                results: fields(&sig.results),
            }),
            TypeExpr::Struct(fs) => TypeExpr::Struct(fields(fs)),
            TypeExpr::Interface(fs) => TypeExpr::Interface(fields(fs)),
            TypeExpr::Variadic(elem) => TypeExpr::Variadic(boxed(elem)),
            TypeExpr::Generic { base, args } => TypeExpr::Generic {
                base: boxed(base),
                args: args.iter().map(|a| self.qualify(a)).collect(),
            },
        }
    }

    // ---- interfaces ----

    fn lookup_interface(&self, expr: &TypeExpr, depth: usize) -> Result<Lookup, ResolveError> {
        if depth > MAX_DEPTH {
            return Err(ResolveError::TooDeep {
                name: expr.to_string(),
            });
        }
        match expr {
            TypeExpr::Interface(fields) => Ok(Lookup::Interface(self.expand(fields, depth)?)),
            TypeExpr::Ident(name) => self.lookup_named(name, depth),
            TypeExpr::Qualified { path, name, .. } if *path == self.path => {
                self.lookup_named(name, depth)
            }
            TypeExpr::Qualified { path, name, .. } => match stdlib::lookup(path) {
                Some(pkg) if pkg.has_type(name) => pkg.lookup_named(name, depth + 1),
                _ => Ok(Lookup::Unknown),
            },
            TypeExpr::Generic { base, .. } => self.lookup_interface(base, depth + 1),
            _ => Ok(Lookup::NotInterface),
        }
    }

    fn lookup_named(&self, name: &str, depth: usize) -> Result<Lookup, ResolveError> {
        if let Some(spec) = self.types.get(name) {
            return self.lookup_interface(&spec.ty, depth + 1);
        }
        Ok(match name {
            "error" => Lookup::Interface(vec![error_method()]),
            "any" => Lookup::Interface(Vec::new()),
            _ if universe(name).is_some() => Lookup::NotInterface,
            _ => Lookup::Unknown,
        })
    }

    /// Flatten embedded interfaces; the first declaration of a method name wins.
    fn expand(&self, fields: &[Field], depth: usize) -> Result<Vec<Field>, ResolveError> {
        let mut methods: Vec<Field> = Vec::new();
        let push = |method: Field, methods: &mut Vec<Field>| {
            if !methods.iter().any(|m| m.name == method.name) {
                methods.push(method);
            }
        };

        for field in fields {
            if field.embedded {
                match self.lookup_interface(&field.ty, depth + 1)? {
                    Lookup::Interface(embedded) => {
                        for method in embedded {
                            push(method, &mut methods);
                        }
                    }
                    Lookup::NotInterface => {
                        return Err(ResolveError::NotAnInterface {
                            name: field.ty.to_string(),
                        })
                    }
                    Lookup::Unknown => {
                        return Err(ResolveError::UnknownInterface {
                            name: field.ty.to_string(),
                        })
                    }
                }
            } else if field.name.is_some() {
                let method = Field {
                    ty: self.qualify(&field.ty),
                    ..field.clone()
                };
                push(method, &mut methods);
            }
        }
        Ok(methods)
    }

    // ---- values ----

    fn value_type_depth(&self, name: &str, depth: usize) -> Option<Type> {
        let info = self.values.get(name)?;
        if let Some(ty) = &info.ty {
            return Some(self.resolve_depth(ty, depth));
        }
        let init = info.init.as_ref()?;
        let ty = match info.tuple_index {
            Some(i) => self
                .call_results(init, depth)
                .and_then(|results| results.get(i).cloned())
                .unwrap_or_else(|| match unresolved_call(init) {
                    Type::Unresolved(text) => Type::Unresolved(format!("{}[{}]", text, i)),
                    other => other,
                }),
            None => self.infer(init, depth),
        };
        Some(match info.keyword {
            ValueKeyword::Var => ty.defaulted(),
            ValueKeyword::Const => ty,
        })
    }

    /// Result types of a package function.
    pub fn function_results(&self, name: &str) -> Option<Vec<Type>> {
        let sig = self.funcs.get(name)?;
        Some(sig.results.iter().map(|f| self.resolve(&f.ty)).collect())
    }

    fn infer(&self, expr: &ValueExpr, depth: usize) -> Type {
        if depth > MAX_DEPTH {
            return Type::Unresolved(expr.to_string());
        }
        let next = depth + 1;
        match expr {
            ValueExpr::Literal(kind) => Type::basic(match kind {
                LiteralKind::Int => "untyped int",
                LiteralKind::Float => "untyped float",
                LiteralKind::Imaginary => "untyped complex",
                LiteralKind::Rune => "untyped rune",
                LiteralKind::String => "untyped string",
                LiteralKind::Bool => "untyped bool",
                LiteralKind::Nil => "untyped nil",
            }),
            ValueExpr::Iota => Type::basic("untyped int"),
            ValueExpr::Name(name) => self.infer_name(name, next),
            ValueExpr::Qualified { path, name, .. } if *path == self.path => {
                self.infer_name(name, next)
            }
            ValueExpr::Qualified { path, name, .. } => stdlib::lookup(path)
                .and_then(|pkg| {
                    pkg.value_type(name).or_else(|| {
                        pkg.funcs
                            .get(name)
                            .map(|sig| pkg.resolve(&TypeExpr::Func(sig.clone())))
                    })
                })
                .unwrap_or_else(|| Type::Unresolved(expr.to_string())),
            ValueExpr::Composite(ty) => self.resolve_depth(ty, next),
            ValueExpr::AddressOf(inner) => Type::Pointer(Box::new(self.infer(inner, next))),
            ValueExpr::Unary { op, operand } => {
                let inner = self.infer(operand, next);
                match (op.as_str(), inner) {
                    ("<-", Type::Chan { elem, .. }) => *elem,
                    ("*", Type::Pointer(elem)) => *elem,
                    ("<-" | "*", _) => Type::Unresolved(expr.to_string()),
                    (_, inner) => inner,
                }
            }
            ValueExpr::Binary { op, left, right } => match op.as_str() {
                "==" | "!=" | "<" | "<=" | ">" | ">=" => Type::basic("untyped bool"),
                "<<" | ">>" | "&&" | "||" => self.infer(left, next),
                _ => combine(self.infer(left, next), self.infer(right, next)),
            },
            ValueExpr::Call { .. } => match self.call_results(expr, next).as_deref() {
                Some([single]) => single.clone(),
                _ => unresolved_call(expr),
            },
            ValueExpr::Type(ty) => self.resolve_depth(ty, next),
            ValueExpr::FuncLit(sig) => self.resolve_depth(&TypeExpr::Func(sig.clone()), next),
            ValueExpr::Other(text) => Type::Unresolved(text.clone()),
        }
    }

    fn infer_name(&self, name: &str, depth: usize) -> Type {
        if let Some(ty) = self.value_type_depth(name, depth) {
            return ty;
        }
        if let Some(sig) = self.funcs.get(name) {
            return self.resolve_depth(&TypeExpr::Func(sig.clone()), depth);
        }
        match name {
            "true" | "false" => Type::basic("untyped bool"),
            _ => Type::Unresolved(name.to_string()),
        }
    }

    /// Type denoted by an argument in type position (`new(T)`, `make(T)`).
    fn type_argument(&self, arg: Option<&ValueExpr>, depth: usize) -> Option<Type> {
        match arg? {
            ValueExpr::Type(ty) => Some(self.resolve_depth(ty, depth)),
            ValueExpr::Name(name) => Some(self.resolve_name(name, depth)),
            ValueExpr::Qualified {
                package,
                path,
                name,
            } => Some(self.resolve_depth(
                &TypeExpr::Qualified {
                    package: package.clone(),
                    path: path.clone(),
                    name: name.clone(),
                },
                depth,
            )),
            _ => None,
        }
    }

    /// Result types of a call or conversion expression.
    fn call_results(&self, expr: &ValueExpr, depth: usize) -> Option<Vec<Type>> {
        let ValueExpr::Call { callee, args } = expr else {
            return None;
        };
        let next = depth + 1;
        match callee.as_ref() {
            ValueExpr::Type(ty) => Some(vec![self.resolve_depth(ty, next)]),
            ValueExpr::Name(name) if self.types.contains_key(name) => {
                Some(vec![self.resolve_name(name, next)])
            }
            ValueExpr::Name(name) if self.funcs.contains_key(name) => self.function_results(name),
            ValueExpr::Name(name) => match name.as_str() {
                "new" => self
                    .type_argument(args.first(), next)
                    .map(|t| vec![Type::Pointer(Box::new(t))]),
                "make" => self.type_argument(args.first(), next).map(|t| vec![t]),
                "len" | "cap" | "copy" => Some(vec![Type::basic("int")]),
                "complex" => Some(vec![Type::basic("complex128")]),
                "real" | "imag" => Some(vec![Type::basic("float64")]),
                "append" | "min" | "max" => args.first().map(|a| vec![self.infer(a, next)]),
                _ if universe(name).is_some() => Some(vec![self.resolve_name(name, next)]),
                _ => match self.value_type_depth(name, next) {
                    Some(Type::Func { results, .. }) => Some(results),
                    _ => None,
                },
            },
            ValueExpr::Qualified { path, name, .. } if *path == self.path => {
                let local = ValueExpr::Call {
                    callee: Box::new(ValueExpr::Name(name.clone())),
                    args: args.clone(),
                };
                self.call_results(&local, next)
            }
            ValueExpr::Qualified { path, name, .. } => {
                let pkg = stdlib::lookup(path)?;
                if pkg.has_type(name) {
                    Some(vec![pkg.resolve_name(name, next)])
                } else {
                    pkg.function_results(name)
                }
            }
            other => match self.infer(other, next) {
                Type::Func { results, .. } => Some(results),
                _ => None,
            },
        }
    }
}

impl TypeResolver for PackageResolver {
    fn resolve(&self, expr: &TypeExpr) -> Type {
        self.resolve_depth(expr, 0)
    }

    fn value_type(&self, name: &str) -> Option<Type> {
        self.value_type_depth(name, 0)
    }

    fn interface_methods(&self, expr: &TypeExpr) -> Result<Option<Vec<Field>>, ResolveError> {
        match self.lookup_interface(expr, 0)? {
            Lookup::Interface(methods) => Ok(Some(methods)),
            Lookup::NotInterface | Lookup::Unknown => Ok(None),
        }
    }
}

/// Unknown call results are keyed on the callee alone; arguments do not
/// change the result type of a non-generic function.
fn unresolved_call(expr: &ValueExpr) -> Type {
    match expr {
        ValueExpr::Call { callee, .. } => Type::Unresolved(format!("{}(..)", callee)),
        other => Type::Unresolved(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    fn resolver(source: &str) -> PackageResolver {
        let file = parse_source(source, "a.go").expect("parse");
        PackageResolver::new("example.com/p", &[file])
    }

    fn value(r: &PackageResolver, name: &str) -> String {
        r.value_type(name).expect("value").to_string()
    }

    #[test]
    fn test_resolve_local_and_universe() {
        let r = resolver("package p\n\ntype Config struct{}\ntype Bytes = []byte\n");
        assert_eq!(
            r.resolve(&TypeExpr::Ident("Config".into())).to_string(),
            "example.com/p.Config"
        );
        assert_eq!(r.resolve(&TypeExpr::Ident("Bytes".into())).to_string(), "[]uint8");
        assert_eq!(r.resolve(&TypeExpr::Ident("rune".into())), Type::basic("int32"));
        assert_eq!(
            r.resolve(&TypeExpr::Ident("Missing".into())),
            Type::Unresolved("Missing".into())
        );
    }

    #[test]
    fn test_fresh_origin_per_resolver() {
        let a = resolver("package p\n\ntype T int\n");
        let b = resolver("package p\n\ntype T int\n");
        let ta = a.resolve(&TypeExpr::Ident("T".into()));
        let tb = b.resolve(&TypeExpr::Ident("T".into()));
        assert_ne!(ta, tb);
        assert!(super::super::identical(&ta, &tb));
    }

    #[test]
    fn test_value_inference() {
        let r = resolver(
            "package p\n\nimport (\n\t\"errors\"\n\t\"time\"\n)\n\ntype Level int\n\nconst Max = 10\nconst Ratio = Max * 1.5\nconst Debug Level = 3\nvar Count = Max\nvar Name = \"x\"\nvar Cfg = &Config{}\nvar Buf = make([]byte, 0)\nvar Ptr = new(Level)\nvar Err = errors.New(\"boom\")\nvar Wait = 5 * time.Second\nvar Lvl = Level(2)\nvar Ok = Count > 3\nvar Built = build()\nvar A, B = pair()\n\ntype Config struct{}\n\nfunc build() *Config { return nil }\nfunc pair() (int, string) { return 0, \"\" }\n",
        );
        assert_eq!(value(&r, "Max"), "untyped int");
        assert_eq!(value(&r, "Ratio"), "untyped float");
        assert_eq!(value(&r, "Debug"), "example.com/p.Level");
        assert_eq!(value(&r, "Count"), "int");
        assert_eq!(value(&r, "Name"), "string");
        assert_eq!(value(&r, "Cfg"), "*example.com/p.Config");
        assert_eq!(value(&r, "Buf"), "[]uint8");
        assert_eq!(value(&r, "Ptr"), "*example.com/p.Level");
        assert_eq!(value(&r, "Err"), "error");
        assert_eq!(value(&r, "Wait"), "time.Duration");
        assert_eq!(value(&r, "Lvl"), "example.com/p.Level");
        assert_eq!(value(&r, "Ok"), "bool");
        assert_eq!(value(&r, "Built"), "*example.com/p.Config");
        assert_eq!(value(&r, "A"), "int");
        assert_eq!(value(&r, "B"), "string");
    }

    #[test]
    fn test_unresolved_call_keyed_on_callee() {
        let r = resolver(
            "package p\n\nimport \"example.com/dep\"\n\nvar X = dep.Make(1)\nvar Y = dep.Make(\"a\", 2)\nvar A, B = dep.Pair()\n",
        );
        assert_eq!(value(&r, "X"), "dep.Make(..)");
        assert_eq!(value(&r, "X"), value(&r, "Y"));
        assert_eq!(value(&r, "B"), "dep.Pair(..)[1]");
    }

    #[test]
    fn test_interface_methods_expand_embedded() {
        let r = resolver(
            "package p\n\nimport \"io\"\n\ntype Store interface {\n\tio.ReadCloser\n\tName() string\n}\n",
        );
        let methods = r
            .interface_methods(&TypeExpr::Ident("Store".into()))
            .unwrap()
            .expect("interface");
        let names: Vec<&str> = methods.iter().filter_map(|m| m.name.as_deref()).collect();
        assert_eq!(names, vec!["Read", "Close", "Name"]);
    }

    #[test]
    fn test_interface_methods_qualifies_local_names() {
        let r = resolver(
            "package p\n\ntype Item struct{}\n\ntype Source interface {\n\tNext() Item\n}\n",
        );
        let methods = r
            .interface_methods(&TypeExpr::Ident("Source".into()))
            .unwrap()
            .expect("interface");
        let TypeExpr::Func(sig) = &methods[0].ty else {
            panic!("expected func");
        };
        assert_eq!(
            sig.results[0].ty,
            TypeExpr::Qualified {
                package: "p".into(),
                path: "example.com/p".into(),
                name: "Item".into(),
            }
        );
    }

    #[test]
    fn test_interface_methods_non_interface_and_unknown() {
        let r = resolver(
            "package p\n\nimport \"example.com/dep\"\n\ntype S struct{}\n\ntype Bad interface {\n\tdep.Thing\n}\n",
        );
        assert_eq!(r.interface_methods(&TypeExpr::Ident("S".into())).unwrap(), None);
        assert!(!r.is_interface(&TypeExpr::Ident("int".into())));
        assert!(r.is_interface(&TypeExpr::Ident("error".into())));
        assert_eq!(
            r.interface_methods(&TypeExpr::Ident("Bad".into())),
            Err(ResolveError::UnknownInterface {
                name: "dep.Thing".into()
            })
        );
    }

    #[test]
    fn test_self_embedding_is_too_deep() {
        let r = resolver("package p\n\ntype Loop interface {\n\tLoop\n}\n");
        assert!(matches!(
            r.interface_methods(&TypeExpr::Ident("Loop".into())),
            Err(ResolveError::TooDeep { .. })
        ));
    }
}
