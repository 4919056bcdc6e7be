//! Field-list diffing shared by structs, interfaces and signatures.

use std::collections::HashMap;

use super::comparator::DeclChecker;
use crate::error::ResolveError;
use crate::types::{Field, TypeExpr};

pub const ADDED_VARIADIC: &str = "added a variadic parameter";
pub const CHANGED_TO_VARIADIC: &str = "change parameter to variadic";
pub const COMPATIBLE_INTERFACE: &str = "compatible interface change";

/// Partition of two field lists correlated by [`Field::match_key`].
///
/// `added`, `removed` and `modified` are disjoint; `unchanged` holds the keys
/// matched with identical types.
#[derive(Debug, Default)]
pub struct FieldDiff<'f> {
    pub added: Vec<&'f Field>,
    pub removed: Vec<&'f Field>,
    pub modified: Vec<(&'f Field, &'f Field)>,
    pub unchanged: Vec<String>,
}

impl<'f> FieldDiff<'f> {
    /// Diff `before` against `after`, deciding type equality with `equal`.
    ///
    /// Added fields are reported in after-list order.
    pub fn compute<E>(before: &'f [Field], after: &'f [Field], mut equal: E) -> Result<Self, ResolveError>
    where
        E: FnMut(&Field, &Field) -> Result<bool, ResolveError>,
    {
        let mut lookup: HashMap<String, usize> = after
            .iter()
            .enumerate()
            .map(|(i, field)| (field.match_key(i), i))
            .collect();
        let mut consumed = vec![false; after.len()];
        let mut diff = FieldDiff::default();

        for (i, bfield) in before.iter().enumerate() {
            let key = bfield.match_key(i);
            match lookup.remove(&key) {
                Some(j) => {
                    consumed[j] = true;
                    let afield = &after[j];
                    if equal(bfield, afield)? {
                        diff.unchanged.push(key);
                    } else {
                        diff.modified.push((bfield, afield));
                    }
                }
                None => diff.removed.push(bfield),
            }
        }

        diff.added = after
            .iter()
            .zip(consumed)
            .filter(|(_, used)| !used)
            .map(|(field, _)| field)
            .collect();
        Ok(diff)
    }

    pub fn changed(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty() || !self.modified.is_empty()
    }

    /// Drop modified pairs whose before field is not exported.
    pub fn remove_unexported(&mut self) {
        self.modified.retain(|(before, _)| before.is_exported());
    }

    /// Consume the difference if it is only a variadic extension.
    pub fn remove_variadic_compatible(&mut self, checker: &DeclChecker<'_>) -> Option<&'static str> {
        if self.added.len() == 1 && self.removed.is_empty() && self.modified.is_empty() {
            if let TypeExpr::Variadic(_) = self.added[0].ty {
                self.added.clear();
                return Some(ADDED_VARIADIC);
            }
        }

        if self.added.is_empty() && self.removed.is_empty() && self.modified.len() == 1 {
            let (before, after) = self.modified[0];
            if let TypeExpr::Variadic(elem) = &after.ty {
                if checker.types_identical(&before.ty, elem) {
                    self.modified.clear();
                    return Some(CHANGED_TO_VARIADIC);
                }
            }
        }
        None
    }

    /// Consume modified pairs where both sides are interfaces and the after
    /// interface asks nothing more of callers than the before one.
    pub fn remove_interface_compatible(
        &mut self,
        checker: &DeclChecker<'_>,
    ) -> Result<Option<&'static str>, ResolveError> {
        let Some(nested) = checker.nested() else {
            return Ok(None);
        };

        let mut message = None;
        let mut kept = Vec::with_capacity(self.modified.len());
        for (before, after) in std::mem::take(&mut self.modified) {
            if checker.before().is_interface(&before.ty) && checker.after().is_interface(&after.ty) {
                let bmethods = checker.before().interface_methods(&before.ty)?;
                let amethods = checker.after().interface_methods(&after.ty)?;
                if let (Some(bmethods), Some(amethods)) = (bmethods, amethods) {
                    if !nested.check_interface(&bmethods, &amethods)?.is_breaking() {
                        message = Some(COMPATIBLE_INTERFACE);
                        continue;
                    }
                }
            }
            kept.push((before, after));
        }
        self.modified = kept;
        Ok(message)
    }
}

/// Copy of a parameter or result list without names, so fields correlate by position.
pub fn strip_names(fields: &[Field]) -> Vec<Field> {
    fields
        .iter()
        .map(|field| Field::unnamed(field.ty.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn int(name: &str) -> Field {
        Field::named(name, TypeExpr::Ident("int".into()))
    }

    fn string(name: &str) -> Field {
        Field::named(name, TypeExpr::Ident("string".into()))
    }

    fn by_text(a: &Field, b: &Field) -> Result<bool, ResolveError> {
        Ok(a.ty == b.ty)
    }

    #[test]
    fn test_partition_is_disjoint_and_complete() {
        let before = vec![int("a"), int("b"), int("c")];
        let after = vec![string("b"), int("c"), int("d"), int("e")];
        let diff = FieldDiff::compute(&before, &after, by_text).unwrap();

        let removed: Vec<&str> = diff.removed.iter().filter_map(|f| f.name.as_deref()).collect();
        let added: Vec<&str> = diff.added.iter().filter_map(|f| f.name.as_deref()).collect();
        assert_eq!(removed, vec!["a"]);
        assert_eq!(added, vec!["d", "e"]);
        assert_eq!(diff.modified.len(), 1);
        assert_eq!(diff.unchanged, vec!["c".to_string()]);

        let mut keys = HashSet::new();
        for f in diff.removed.iter().chain(diff.added.iter()) {
            assert!(keys.insert(f.match_key(0)));
        }
        for (b, _) in &diff.modified {
            assert!(keys.insert(b.match_key(0)));
        }
        for k in &diff.unchanged {
            assert!(keys.insert(k.clone()));
        }
        assert_eq!(keys.len(), 5);
    }

    #[test]
    fn test_positional_keys() {
        let before = strip_names(&[int("x"), int("y")]);
        let after = strip_names(&[int("p"), int("q"), string("r")]);
        let diff = FieldDiff::compute(&before, &after, by_text).unwrap();
        assert!(diff.removed.is_empty());
        assert!(diff.modified.is_empty());
        assert_eq!(diff.added.len(), 1);
        assert_eq!(diff.unchanged, vec!["0".to_string(), "1".to_string()]);
    }

    #[test]
    fn test_remove_unexported() {
        let before = vec![int("Public"), int("private")];
        let after = vec![string("Public"), string("private")];
        let mut diff = FieldDiff::compute(&before, &after, by_text).unwrap();
        assert_eq!(diff.modified.len(), 2);
        diff.remove_unexported();
        assert_eq!(diff.modified.len(), 1);
        assert_eq!(diff.modified[0].0.name.as_deref(), Some("Public"));
    }

    #[test]
    fn test_equality_errors_propagate() {
        let before = vec![int("a")];
        let after = vec![string("a")];
        let err = FieldDiff::compute(&before, &after, |_, _| {
            Err(ResolveError::UnknownInterface { name: "x".into() })
        })
        .unwrap_err();
        assert_eq!(err, ResolveError::UnknownInterface { name: "x".into() });
    }
}
