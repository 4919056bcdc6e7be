//! Declaration comparator.
//!
//! Classifies a before/after pair of declarations with the same id as no
//! change, non-breaking or breaking. Names of parameters and results are
//! never compared; struct and interface members are matched by name.

use super::changes::DeclChange;
use super::fields::{strip_names, FieldDiff};
use crate::error::ResolveError;
use crate::resolver::{identical, Type, TypeResolver};
use crate::types::{ChanDir, Declaration, Field, FuncType, Shape, TypeExpr};

/// Nesting limit for interface compatibility checks inside signatures.
pub const MAX_INTERFACE_DEPTH: usize = 8;

/// Compares declarations from two revisions using each revision's resolver.
#[derive(Clone, Copy)]
pub struct DeclChecker<'r> {
    before: &'r dyn TypeResolver,
    after: &'r dyn TypeResolver,
    depth: usize,
}

impl<'r> DeclChecker<'r> {
    pub fn new(before: &'r dyn TypeResolver, after: &'r dyn TypeResolver) -> Self {
        Self {
            before,
            after,
            depth: 0,
        }
    }

    pub fn before(&self) -> &'r dyn TypeResolver {
        self.before
    }

    pub fn after(&self) -> &'r dyn TypeResolver {
        self.after
    }

    /// Checker one interface level deeper, `None` past the limit.
    pub(crate) fn nested(&self) -> Option<Self> {
        (self.depth < MAX_INTERFACE_DEPTH).then(|| Self {
            depth: self.depth + 1,
            ..*self
        })
    }

    /// Classify a declaration pair.
    pub fn check(&self, before: &Declaration, after: &Declaration) -> Result<DeclChange, ResolveError> {
        if before.kind() != after.kind() {
            return Ok(DeclChange::breaking("changed declaration"));
        }

        match (&before.shape, &after.shape) {
            (Shape::Value { .. }, Shape::Value { .. }) => {
                Ok(self.check_value(&before.name, &after.name))
            }
            (Shape::TypeAlias { ty: b, .. }, Shape::TypeAlias { ty: a, .. }) => {
                self.check_type_spec(b, a)
            }
            (Shape::Struct(b), Shape::Struct(a)) => self.check_struct(b, a),
            (Shape::Interface(b), Shape::Interface(a)) => self.check_interface(b, a),
            (Shape::Function { ty: b, .. }, Shape::Function { ty: a, .. }) => self.check_func(b, a),
            _ => Ok(DeclChange::breaking("changed declaration")),
        }
    }

    fn check_value(&self, before: &str, after: &str) -> DeclChange {
        let btype = self
            .before
            .value_type(before)
            .unwrap_or_else(|| Type::Unresolved(before.to_string()));
        let atype = self
            .after
            .value_type(after)
            .unwrap_or_else(|| Type::Unresolved(after.to_string()));
        if identical(&btype, &atype) {
            DeclChange::none()
        } else {
            DeclChange::breaking("changed type")
        }
    }

    /// Defined types and aliases whose underlying shape is not a struct or interface.
    pub fn check_type_spec(&self, before: &TypeExpr, after: &TypeExpr) -> Result<DeclChange, ResolveError> {
        if before.category() != after.category() {
            return Ok(DeclChange::breaking("changed type of value spec"));
        }
        match (before, after) {
            (TypeExpr::Func(b), TypeExpr::Func(a)) => self.check_func(b, a),
            (TypeExpr::Chan { dir: bd, elem: be }, TypeExpr::Chan { dir: ad, elem: ae }) => {
                self.check_chan(*bd, be, *ad, ae)
            }
            (TypeExpr::Ident(b), TypeExpr::Ident(a)) if b != a => {
                Ok(DeclChange::breaking("alias changed its underlying type"))
            }
            _ if self.types_identical(before, after) => Ok(DeclChange::none()),
            _ => Ok(DeclChange::breaking("alias changed its underlying type")),
        }
    }

    pub fn check_chan(
        &self,
        before_dir: ChanDir,
        before_elem: &TypeExpr,
        after_dir: ChanDir,
        after_elem: &TypeExpr,
    ) -> Result<DeclChange, ResolveError> {
        if !self.expr_equal(before_elem, after_elem)? {
            return Ok(DeclChange::breaking("changed channel's type"));
        }
        if before_dir != after_dir {
            if after_dir == ChanDir::Both {
                return Ok(DeclChange::non_breaking("removed channel's direction"));
            }
            return Ok(DeclChange::breaking("changed channel's direction"));
        }
        Ok(DeclChange::none())
    }

    /// Added methods break implementers; removed methods do not.
    pub fn check_interface(&self, before: &[Field], after: &[Field]) -> Result<DeclChange, ResolveError> {
        let diff = self.diff_fields(before, after)?;
        Ok(if !diff.added.is_empty() {
            DeclChange::breaking("members added")
        } else if !diff.modified.is_empty() {
            DeclChange::breaking("members changed types")
        } else if !diff.removed.is_empty() {
            DeclChange::non_breaking("members removed")
        } else {
            DeclChange::none()
        })
    }

    pub fn check_struct(&self, before: &[Field], after: &[Field]) -> Result<DeclChange, ResolveError> {
        let mut diff = self.diff_fields(before, after)?;
        diff.remove_unexported();
        Ok(if !diff.removed.is_empty() {
            DeclChange::breaking("members removed")
        } else if !diff.modified.is_empty() {
            DeclChange::breaking("members changed types")
        } else if !diff.added.is_empty() {
            DeclChange::non_breaking("members added")
        } else {
            DeclChange::none()
        })
    }

    /// Functions, methods, and func-typed fields and aliases.
    pub fn check_func(&self, before: &FuncType, after: &FuncType) -> Result<DeclChange, ResolveError> {
        let bparams = strip_names(&before.params);
        let aparams = strip_names(&after.params);

        let mut params = self.diff_fields(&bparams, &aparams)?;
        let variadic = params.remove_variadic_compatible(self);
        let interface = params.remove_interface_compatible(self)?;
        if params.changed() {
            return Ok(DeclChange::breaking("parameter types changed"));
        }

        // Adding results to a function that had none is allowed.
        if !before.results.is_empty() {
            if after.results.is_empty() {
                return Ok(DeclChange::breaking("removed return parameter"));
            }
            let bresults = strip_names(&before.results);
            let aresults = strip_names(&after.results);
            if self.diff_fields(&bresults, &aresults)?.changed() {
                return Ok(DeclChange::breaking("return parameters changed"));
            }
        }

        Ok(match interface.or(variadic) {
            Some(message) => DeclChange::non_breaking(message),
            None => DeclChange::none(),
        })
    }

    fn diff_fields<'f>(&self, before: &'f [Field], after: &'f [Field]) -> Result<FieldDiff<'f>, ResolveError> {
        FieldDiff::compute(before, after, |b, a| self.expr_equal(&b.ty, &a.ty))
    }

    /// Type equality of two field types: syntactic category first, channel and
    /// function types by their own rules, everything else by type identity.
    pub fn expr_equal(&self, before: &TypeExpr, after: &TypeExpr) -> Result<bool, ResolveError> {
        if before.category() != after.category() {
            return Ok(false);
        }
        match (before, after) {
            (TypeExpr::Chan { dir: bd, elem: be }, TypeExpr::Chan { dir: ad, elem: ae }) => {
                Ok(!self.check_chan(*bd, be, *ad, ae)?.is_breaking())
            }
            (TypeExpr::Func(b), TypeExpr::Func(a)) => Ok(!self.check_func(b, a)?.is_breaking()),
            _ => Ok(self.types_identical(before, after)),
        }
    }

    /// Nominal identity of the resolved types, falling back to canonical text.
    pub fn types_identical(&self, before: &TypeExpr, after: &TypeExpr) -> bool {
        identical(&self.before.resolve(before), &self.after.resolve(after))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::differ::changes::Classification;
    use crate::parser::parse_source;
    use crate::resolver::PackageResolver;
    use crate::types::{Position, Visibility};

    fn resolver(source: &str) -> PackageResolver {
        let file = parse_source(source, "a.go").expect("parse");
        PackageResolver::new("example.com/p", &[file])
    }

    fn ident(name: &str) -> TypeExpr {
        TypeExpr::Ident(name.into())
    }

    fn func(params: Vec<Field>, results: Vec<Field>) -> FuncType {
        FuncType { params, results }
    }

    fn decl(name: &str, shape: Shape) -> Declaration {
        Declaration {
            id: name.into(),
            name: name.into(),
            visibility: Visibility::Public,
            promoted: false,
            shape,
            position: Position {
                file: "a.go".into(),
                line: 1,
            },
        }
    }

    fn check_funcs(before: FuncType, after: FuncType) -> DeclChange {
        let r = resolver("package p\n");
        DeclChecker::new(&r, &r).check_func(&before, &after).unwrap()
    }

    #[test]
    fn test_kind_change_is_breaking() {
        let r = resolver("package p\n");
        let before = decl("X", Shape::Struct(vec![]));
        let after = decl("X", Shape::Interface(vec![]));
        let change = DeclChecker::new(&r, &r).check(&before, &after).unwrap();
        assert_eq!(change, DeclChange::breaking("changed declaration"));
    }

    #[test]
    fn test_identical_declaration_is_none() {
        let r = resolver("package p\n");
        let d = decl(
            "F",
            Shape::Function {
                receiver: None,
                ty: func(vec![Field::named("a", ident("int"))], vec![Field::unnamed(ident("error"))]),
            },
        );
        let change = DeclChecker::new(&r, &r).check(&d, &d.clone()).unwrap();
        assert_eq!(change.classification, Classification::None);
    }

    #[test]
    fn test_parameter_names_ignored() {
        let change = check_funcs(
            func(vec![Field::named("a", ident("int"))], vec![]),
            func(vec![Field::named("renamed", ident("int"))], vec![]),
        );
        assert_eq!(change, DeclChange::none());
    }

    #[test]
    fn test_interface_asymmetry() {
        let r = resolver("package p\n");
        let c = DeclChecker::new(&r, &r);
        let method = |name: &str| Field::named(name, TypeExpr::Func(FuncType::default()));
        let one = vec![method("A")];
        let two = vec![method("A"), method("B")];
        assert_eq!(
            c.check_interface(&one, &two).unwrap(),
            DeclChange::breaking("members added")
        );
        assert_eq!(
            c.check_interface(&two, &one).unwrap(),
            DeclChange::non_breaking("members removed")
        );
    }

    #[test]
    fn test_struct_asymmetry() {
        let r = resolver("package p\n");
        let c = DeclChecker::new(&r, &r);
        let x = vec![Field::named("X", ident("int"))];
        let xy = vec![Field::named("X", ident("int")), Field::named("Y", ident("int"))];
        assert_eq!(
            c.check_struct(&x, &xy).unwrap(),
            DeclChange::non_breaking("members added")
        );
        assert_eq!(
            c.check_struct(&xy, &x).unwrap(),
            DeclChange::breaking("members removed")
        );
    }

    #[test]
    fn test_unexported_field_type_change_is_none() {
        let r = resolver("package p\n");
        let c = DeclChecker::new(&r, &r);
        let before = vec![Field::named("X", ident("int")), Field::named("cache", ident("int"))];
        let after = vec![Field::named("X", ident("int")), Field::named("cache", ident("string"))];
        assert_eq!(c.check_struct(&before, &after).unwrap(), DeclChange::none());
    }

    #[test]
    fn test_variadic_rules() {
        let t = || ident("string");
        let variadic = || TypeExpr::Variadic(Box::new(ident("string")));

        assert_eq!(
            check_funcs(
                func(vec![Field::named("a", t())], vec![]),
                func(vec![Field::named("a", variadic())], vec![]),
            ),
            DeclChange::non_breaking("change parameter to variadic")
        );
        assert_eq!(
            check_funcs(
                func(vec![Field::named("a", t())], vec![]),
                func(vec![Field::named("a", t()), Field::named("b", variadic())], vec![]),
            ),
            DeclChange::non_breaking("added a variadic parameter")
        );
        assert_eq!(
            check_funcs(
                func(vec![Field::named("a", t())], vec![]),
                func(vec![Field::named("a", t()), Field::named("b", ident("int"))], vec![]),
            ),
            DeclChange::breaking("parameter types changed")
        );
        assert_eq!(
            check_funcs(
                func(vec![Field::named("a", ident("int"))], vec![]),
                func(vec![Field::named("a", variadic())], vec![]),
            ),
            DeclChange::breaking("parameter types changed")
        );
    }

    #[test]
    fn test_result_rules() {
        let err = || Field::unnamed(ident("error"));
        assert_eq!(
            check_funcs(func(vec![], vec![]), func(vec![], vec![err()])),
            DeclChange::none()
        );
        assert_eq!(
            check_funcs(func(vec![], vec![err()]), func(vec![], vec![])),
            DeclChange::breaking("removed return parameter")
        );
        assert_eq!(
            check_funcs(
                func(vec![], vec![err()]),
                func(vec![], vec![Field::unnamed(ident("int")), err()]),
            ),
            DeclChange::breaking("return parameters changed")
        );
    }

    #[test]
    fn test_channel_direction() {
        let r = resolver("package p\n");
        let c = DeclChecker::new(&r, &r);
        let int = ident("int");
        assert_eq!(
            c.check_chan(ChanDir::Both, &int, ChanDir::Send, &int).unwrap(),
            DeclChange::breaking("changed channel's direction")
        );
        assert_eq!(
            c.check_chan(ChanDir::Send, &int, ChanDir::Both, &int).unwrap(),
            DeclChange::non_breaking("removed channel's direction")
        );
        assert_eq!(
            c.check_chan(ChanDir::Recv, &int, ChanDir::Send, &int).unwrap(),
            DeclChange::breaking("changed channel's direction")
        );
        assert_eq!(
            c.check_chan(ChanDir::Both, &int, ChanDir::Both, &ident("string")).unwrap(),
            DeclChange::breaking("changed channel's type")
        );
    }

    #[test]
    fn test_interface_widening_parameter() {
        let r = resolver("package p\n\nimport \"io\"\n");
        let c = DeclChecker::new(&r, &r);
        let io = |name: &str| TypeExpr::Qualified {
            package: "io".into(),
            path: "io".into(),
            name: name.into(),
        };
        let rw = func(vec![Field::named("r", io("ReadWriter"))], vec![]);
        let rd = func(vec![Field::named("r", io("Reader"))], vec![]);
        assert_eq!(
            c.check_func(&rw, &rd).unwrap(),
            DeclChange::non_breaking("compatible interface change")
        );
        assert_eq!(
            c.check_func(&rd, &rw).unwrap(),
            DeclChange::breaking("parameter types changed")
        );
    }

    #[test]
    fn test_variadic_rule_requires_sole_difference() {
        let r = resolver("package p\n");
        let c = DeclChecker::new(&r, &r);
        let io = |name: &str| TypeExpr::Qualified {
            package: "io".into(),
            path: "io".into(),
            name: name.into(),
        };
        let before = func(vec![Field::unnamed(io("ReadCloser"))], vec![]);
        let after = func(
            vec![
                Field::unnamed(io("Reader")),
                Field::unnamed(TypeExpr::Variadic(Box::new(ident("int")))),
            ],
            vec![],
        );
        // The interface pair is compatible but the added variadic is not alone.
        assert_eq!(
            c.check_func(&before, &after).unwrap(),
            DeclChange::breaking("parameter types changed")
        );
    }

    #[test]
    fn test_unknown_embedded_interface_is_an_error() {
        let before = resolver(
            "package p\n\nimport \"example.com/dep\"\n\ntype A interface {\n\tdep.Missing\n}\ntype B interface{}\n",
        );
        let c = DeclChecker::new(&before, &before);
        let f = |name: &str| func(vec![Field::unnamed(ident(name))], vec![]);
        assert!(matches!(
            c.check_func(&f("A"), &f("B")),
            Err(ResolveError::UnknownInterface { .. })
        ));
    }

    #[test]
    fn test_type_spec_rules() {
        let r = resolver("package p\n\ntype Celsius float64\ntype Kelvin float64\n");
        let c = DeclChecker::new(&r, &r);
        assert_eq!(
            c.check_type_spec(&ident("Celsius"), &ident("Kelvin")).unwrap(),
            DeclChange::breaking("alias changed its underlying type")
        );
        assert_eq!(
            c.check_type_spec(&ident("int"), &TypeExpr::Pointer(Box::new(ident("int"))))
                .unwrap(),
            DeclChange::breaking("changed type of value spec")
        );
        assert_eq!(
            c.check_type_spec(
                &TypeExpr::Slice(Box::new(ident("byte"))),
                &TypeExpr::Slice(Box::new(ident("uint8"))),
            )
            .unwrap(),
            DeclChange::none()
        );
        let handler = |t: &str| TypeExpr::Func(func(vec![Field::unnamed(ident(t))], vec![]));
        assert_eq!(
            c.check_type_spec(&handler("int"), &handler("string")).unwrap(),
            DeclChange::breaking("parameter types changed")
        );
    }
}
