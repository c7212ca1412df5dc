//! Validation of object literal expressions against a target type.
//!
//! An object literal written directly at an assignment, argument or return
//! position is checked more strictly than a value flowing through a
//! variable: besides missing and mistyped properties, properties the target
//! does not declare are reported as excess. The type of such a literal is an
//! object shape carrying `ObjectFlags::FRESH_LITERAL`; `widen_freshness`
//! removes the flag once the literal is bound to a variable, and from then on
//! only ordinary compatibility applies.
//!
//! `validate` is the literal boundary itself: its top-level argument is always
//! checked as a literal. Nested property values are checked as literals only
//! when they are fresh; anything else nested goes through compatibility.
//!
//! Findings for one literal, in order:
//! 1. `Missing property 'name'` for every required target property the
//!    literal lacks, in target declaration order;
//! 2. for every literal property, in literal order, either
//!    `Property 'path' has type X but expected Y` or `Excess property 'path'`.
//!
//! Nested object literals are validated recursively and report dotted paths
//! (`user.userType`).

use crate::alias_map::TypeAliasMap;
use crate::diagnostics::DiagnosticBuilder;
use crate::objects::{MergeResult, merge, object_view};
use crate::subtype::CompatibilityChecker;
use crate::subtype_rules::declared_property_type;
use crate::types::*;
use tracing::{debug, trace};
use tyck_common::{CheckerOptions, Diagnostic};

#[derive(Clone, Debug)]
enum Finding {
    Missing(String),
    Excess(String),
    PropertyMismatch {
        path: String,
        actual: Type,
        expected: Type,
    },
    NotAssignable {
        source: Type,
        target: Type,
    },
}

impl Finding {
    fn into_diagnostic<L>(self, location: L) -> Diagnostic<L> {
        let builder = DiagnosticBuilder::new(location);
        match self {
            Finding::Missing(path) => builder.missing_property(&path),
            Finding::Excess(path) => builder.excess_property(&path),
            Finding::PropertyMismatch {
                path,
                actual,
                expected,
            } => builder.property_type_mismatch(&path, &actual, &expected),
            Finding::NotAssignable { source, target } => builder.type_not_assignable(&source, &target),
        }
    }
}

/// Checks object literal types against target types.
pub struct ObjectLiteralValidator<'a> {
    checker: CompatibilityChecker<'a>,
    excess_property_checks: bool,
}

impl<'a> ObjectLiteralValidator<'a> {
    pub fn new(aliases: &'a TypeAliasMap) -> Self {
        Self::with_options(aliases, &CheckerOptions::default())
    }

    pub fn with_options(aliases: &'a TypeAliasMap, options: &CheckerOptions) -> Self {
        ObjectLiteralValidator {
            checker: CompatibilityChecker::with_options(aliases, options),
            excess_property_checks: options.excess_property_checks,
        }
    }

    /// Validate the object literal type `literal` against `target`, attaching
    /// `location` to every finding. `literal` is treated as fresh whether or
    /// not it carries the flag.
    pub fn validate<L: Clone>(
        &mut self,
        literal: &Type,
        target: &Type,
        location: L,
    ) -> Vec<Diagnostic<L>> {
        let findings = self.validate_at(literal, target, None);
        if !findings.is_empty() {
            debug!(literal = %literal, target = %target, count = findings.len(), "object literal rejected");
        }
        findings
            .into_iter()
            .map(|finding| finding.into_diagnostic(location.clone()))
            .collect()
    }

    /// `path` is the dotted property path of a nested literal, `None` at the
    /// top level.
    fn validate_at(&mut self, literal: &Type, target: &Type, path: Option<&str>) -> Vec<Finding> {
        let target = self.checker.resolve(target);
        if target.is_any() {
            return Vec::new();
        }
        let Type::Object(literal_shape) = literal else {
            return self.fallback(literal, &target, path);
        };

        match &target {
            Type::Object(_) | Type::Record(_) => match object_view(&target) {
                Some(target_shape) => self.validate_shape(literal_shape, &target_shape, path),
                None => self.fallback(literal, &target, path),
            },
            Type::Intersection(_) => match merge(self.checker.aliases(), &target) {
                MergeResult::Merged(shape) => self.validate_shape(literal_shape, &shape, path),
                MergeResult::Any => Vec::new(),
                MergeResult::NotMergeable => self.fallback(literal, &target, path),
            },
            Type::Union(members) => self.validate_union(literal, members, path),
            _ => self.fallback(literal, &target, path),
        }
    }

    /// The literal is accepted when one object member accepts it cleanly;
    /// otherwise the member with the fewest findings is reported.
    fn validate_union(
        &mut self,
        literal: &Type,
        members: &TypeList,
        path: Option<&str>,
    ) -> Vec<Finding> {
        let mut best: Option<Vec<Finding>> = None;
        for member in members.iter() {
            let resolved = self.checker.resolve(member);
            if !matches!(
                resolved,
                Type::Object(_) | Type::Record(_) | Type::Intersection(_)
            ) {
                continue;
            }
            let findings = self.validate_at(literal, &resolved, path);
            if findings.is_empty() {
                trace!(member = %resolved, "union member accepts literal");
                return findings;
            }
            if best.as_ref().is_none_or(|b| findings.len() < b.len()) {
                best = Some(findings);
            }
        }
        match best {
            Some(findings) => findings,
            None => {
                let target = Type::Union(members.clone());
                self.fallback(literal, &target, path)
            }
        }
    }

    fn validate_shape(
        &mut self,
        literal: &ObjectShape,
        target: &ObjectShape,
        path: Option<&str>,
    ) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (name, prop) in &target.properties {
            if !prop.optional && !literal.properties.contains_key(name) {
                findings.push(Finding::Missing(join_path(path, name)));
            }
        }

        for (name, prop) in &literal.properties {
            let prop_path = join_path(path, name);
            match target.properties.get(name) {
                Some(target_prop) => {
                    self.check_property(&prop_path, &prop.ty, target_prop, &mut findings);
                }
                None => match &target.index_signature {
                    Some(index) => {
                        let slot = PropertyInfo::required(index.value_type.clone());
                        self.check_property(&prop_path, &prop.ty, &slot, &mut findings);
                    }
                    None if self.excess_property_checks => {
                        findings.push(Finding::Excess(prop_path))
                    }
                    None => {}
                },
            }
        }
        findings
    }

    fn check_property(
        &mut self,
        path: &str,
        value: &Type,
        slot: &PropertyInfo,
        findings: &mut Vec<Finding>,
    ) {
        if value.is_fresh_object_literal() {
            findings.extend(self.validate_at(value, &slot.ty, Some(path)));
            return;
        }
        let expected = declared_property_type(slot);
        if !self.checker.is_compatible(value, &expected) {
            findings.push(Finding::PropertyMismatch {
                path: path.to_string(),
                actual: value.clone(),
                expected: slot.ty.clone(),
            });
        }
    }

    /// Targets without an object shape get a plain compatibility check.
    fn fallback(&mut self, literal: &Type, target: &Type, path: Option<&str>) -> Vec<Finding> {
        if self.checker.is_compatible(literal, target) {
            return Vec::new();
        }
        let finding = match path {
            Some(path) => Finding::PropertyMismatch {
                path: path.to_string(),
                actual: literal.clone(),
                expected: target.clone(),
            },
            None => Finding::NotAssignable {
                source: literal.clone(),
                target: target.clone(),
            },
        };
        vec![finding]
    }
}

fn join_path(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}.{name}"),
        None => name.to_string(),
    }
}

#[cfg(test)]
#[path = "../tests/object_literal_tests.rs"]
mod tests;
