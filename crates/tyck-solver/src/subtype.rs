//! Structural compatibility (assignability) checking.
//!
//! `is_compatible_with(value, target, aliases)` answers "may a value of type
//! `value` flow into a slot of type `target`". Both sides are alias- and
//! keyof-resolved first, then the rules below are tried in priority order;
//! the first that applies decides:
//!
//! 1. `any` on either side: compatible.
//! 2. `never` value: compatible. `never` target: only `never`.
//! 3. Union target: some member accepts the value. A union value needs every
//!    one of its members accepted by the target.
//! 4. Intersection target: every member accepts the value. An intersection
//!    value is accepted when one of its members is, or when its merged shape is.
//! 5. Literals against primitives and literals (`subtype_rules::literals`).
//! 6. Arrays and tuples (`subtype_rules::tuples`).
//! 7. Objects and records (`subtype_rules::objects`).
//! 8. Functions (`subtype_rules::functions`).
//! 9. Predicates: only `boolean` accepts one.
//! 10. Primitives: identical kinds (`subtype_rules::intrinsics`).
//! 11. Otherwise incompatible.
//!
//! Recursive aliases (`type List = { next: List }`) are handled
//! coinductively: a `(value, target)` pair met again while it is still being
//! checked is assumed compatible.

use crate::alias_map::TypeAliasMap;
use crate::diagnostics::DiagnosticBuilder;
use crate::object_literal::ObjectLiteralValidator;
use crate::objects::{MergeResult, merge};
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::types::*;
use tracing::{Level, debug, span, trace};
use tyck_common::limits::{STACK_GROWTH_SIZE, STACK_RED_ZONE};
use tyck_common::{CheckerOptions, Diagnostic};

/// Result of a single compatibility step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubtypeResult {
    True,
    False,
    /// Assumed compatible because the same pair is already being checked.
    Provisional,
}

impl SubtypeResult {
    #[inline]
    pub fn is_true(self) -> bool {
        matches!(self, SubtypeResult::True | SubtypeResult::Provisional)
    }

    #[inline]
    pub fn is_false(self) -> bool {
        matches!(self, SubtypeResult::False)
    }

    #[inline]
    pub fn from_bool(value: bool) -> Self {
        if value {
            SubtypeResult::True
        } else {
            SubtypeResult::False
        }
    }
}

/// Compatibility checker bound to one alias map.
///
/// The checker is cheap to create; it only owns the recursion guard used for
/// one query at a time.
pub struct CompatibilityChecker<'a> {
    pub(crate) aliases: &'a TypeAliasMap,
    pub(crate) options: CheckerOptions,
    guard: RecursionGuard<(Type, Type)>,
}

impl<'a> CompatibilityChecker<'a> {
    pub fn new(aliases: &'a TypeAliasMap) -> Self {
        Self::with_options(aliases, &CheckerOptions::default())
    }

    pub fn with_options(aliases: &'a TypeAliasMap, options: &CheckerOptions) -> Self {
        let profile = RecursionProfile::Custom {
            max_depth: options.max_compatibility_depth,
            max_iterations: RecursionProfile::CompatibilityCheck.max_iterations(),
        };
        CompatibilityChecker {
            aliases,
            options: options.clone(),
            guard: RecursionGuard::with_profile(profile),
        }
    }

    pub fn aliases(&self) -> &'a TypeAliasMap {
        self.aliases
    }

    pub fn options(&self) -> &CheckerOptions {
        &self.options
    }

    /// Whether a value of type `value` may be assigned to `target`.
    pub fn is_compatible(&mut self, value: &Type, target: &Type) -> bool {
        if self.guard.depth() == 0 {
            self.guard.reset();
        }
        self.check_subtype(value, target).is_true()
    }

    /// Whether the last top-level query gave up at the depth or iteration
    /// limit.
    pub fn limit_exceeded(&self) -> bool {
        self.guard.is_exceeded()
    }

    /// Check an assignment and report a diagnostic at `location` when it fails.
    ///
    /// The type of a fresh object literal goes through the stricter
    /// [`ObjectLiteralValidator`]; everything else gets at most one
    /// `Type 'X' is not assignable to type 'Y'` finding.
    pub fn check_assignment<L: Clone>(
        &mut self,
        value: &Type,
        target: &Type,
        location: L,
    ) -> Vec<Diagnostic<L>> {
        if value.is_fresh_object_literal() {
            return ObjectLiteralValidator::with_options(self.aliases, &self.options)
                .validate(value, target, location);
        }
        if self.is_compatible(value, target) {
            Vec::new()
        } else {
            vec![DiagnosticBuilder::new(location).type_not_assignable(value, target)]
        }
    }

    /// Resolve aliases and `keyof` until the type is concrete.
    pub(crate) fn resolve(&self, ty: &Type) -> Type {
        let resolved = self.aliases.resolve(ty);
        match resolved {
            Type::Keyof(_) => {
                let keys = self.aliases.resolve_keyof(&resolved);
                self.aliases.resolve(&keys)
            }
            other => other,
        }
    }

    /// One compatibility step, under the recursion guard.
    pub(crate) fn check_subtype(&mut self, value: &Type, target: &Type) -> SubtypeResult {
        let value = self.resolve(value);
        let target = self.resolve(target);

        if target.is_any() || value.is_any() {
            return SubtypeResult::True;
        }
        if value.is_never() {
            return SubtypeResult::True;
        }
        if target.is_never() {
            return SubtypeResult::False;
        }
        if value == target {
            return SubtypeResult::True;
        }

        let key = (value, target);
        match self.guard.enter(key.clone()) {
            RecursionResult::Entered => {
                let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH_SIZE, || {
                    self.check_subtype_inner(&key.0, &key.1)
                });
                self.guard.leave(&key);
                result
            }
            RecursionResult::Cycle => {
                trace!(value = %key.0, target = %key.1, "cycle, assuming compatible");
                SubtypeResult::Provisional
            }
            RecursionResult::DepthExceeded | RecursionResult::IterationExceeded => {
                debug!(value = %key.0, target = %key.1, "compatibility limit exceeded");
                SubtypeResult::False
            }
        }
    }

    fn check_subtype_inner(&mut self, value: &Type, target: &Type) -> SubtypeResult {
        let _span = span!(Level::TRACE, "check_subtype", value = %value, target = %target).entered();

        if let Type::Union(members) = target {
            return self.check_union_target(value, members);
        }
        if let Type::Union(members) = value {
            return self.check_union_source(members, target);
        }
        if let Type::Intersection(members) = target {
            return self.check_intersection_target(value, members);
        }
        if let Type::Intersection(members) = value {
            return self.check_intersection_source(value, members, target);
        }

        match (value, target) {
            (Type::Literal(literal), _) => self.check_literal_subtype(literal, target),
            (Type::Array(_) | Type::Tuple(_), Type::Array(_) | Type::Tuple(_)) => {
                self.check_sequence_subtype(value, target)
            }
            (Type::Object(_) | Type::Record(_), Type::Object(_) | Type::Record(_)) => {
                self.check_object_subtype(value, target)
            }
            (Type::Function(source), Type::Function(target_fn)) => {
                self.check_function_subtype(source, target_fn)
            }
            (Type::Predicate(_), Type::Primitive(PrimitiveKind::Boolean)) => SubtypeResult::True,
            (Type::Primitive(source), Type::Primitive(target_kind)) => {
                self.check_intrinsic_subtype(*source, *target_kind)
            }
            _ => SubtypeResult::False,
        }
    }

    fn check_intersection_source(
        &mut self,
        value: &Type,
        members: &TypeList,
        target: &Type,
    ) -> SubtypeResult {
        for member in members.iter() {
            if self.check_subtype(member, target).is_true() {
                return SubtypeResult::True;
            }
        }
        if matches!(target, Type::Object(_) | Type::Record(_)) {
            if let MergeResult::Merged(shape) = merge(self.aliases, value) {
                return self.check_subtype(&Type::object(shape), target);
            }
        }
        SubtypeResult::False
    }
}

/// Whether `value` is assignable to `target` under the default options.
pub fn is_compatible_with(value: &Type, target: &Type, aliases: &TypeAliasMap) -> bool {
    CompatibilityChecker::new(aliases).is_compatible(value, target)
}

#[cfg(test)]
#[path = "../tests/subtype_tests.rs"]
mod tests;
