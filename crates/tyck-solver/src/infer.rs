//! Generic argument inference using Union-Find.
//!
//! Every type parameter of a call gets an inference variable in an `ena`
//! unification table. Argument types are matched structurally against the
//! parameter patterns (Array to Array, Tuple to Tuple per index, Object to
//! Object per property, Function to Function per parameter and return); each
//! bare `Alias(name)` naming a type parameter is an observation of that
//! parameter.
//!
//! Observation rules:
//! - the first observation binds the parameter to the argument type exactly
//!   (literals are not widened);
//! - two different literals of the same primitive widen the binding to that
//!   primitive (`f(1, 2)` binds `T = number`);
//! - an observation compatible with the current binding keeps the binding;
//!   a literal binding compatible with a wider observation is replaced by it;
//! - anything else is a conflict: the error names the parameter and both
//!   types, and the first binding is kept.
//!
//! Parameters never observed bind to `any`.

use crate::alias_map::TypeAliasMap;
use crate::diagnostics::{DiagnosticBuilder, DiagnosticKind};
use crate::instantiate::{TypeSubstitution, substitute_type_params};
use crate::objects::object_view;
use crate::subtype::CompatibilityChecker;
use crate::types::*;
use crate::widening::widen_literal;
use ena::unify::{InPlaceUnificationTable, NoError, UnifyKey, UnifyValue};
use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::{debug, trace};
use tyck_common::limits::{STACK_GROWTH_SIZE, STACK_RED_ZONE};
use tyck_common::{Atom, CheckerOptions, Diagnostic};

/// An inference variable standing for one type parameter of a call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct InferenceVar(pub u32);

/// Wrapper for the current binding of a variable (avoiding the orphan rule).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InferenceValue(pub Option<Type>);

impl UnifyKey for InferenceVar {
    type Value = InferenceValue;

    fn index(&self) -> u32 {
        self.0
    }

    fn from_index(u: u32) -> Self {
        InferenceVar(u)
    }

    fn tag() -> &'static str {
        "InferenceVar"
    }
}

impl UnifyValue for InferenceValue {
    type Error = NoError;

    fn unify_values(a: &Self, b: &Self) -> Result<Self, Self::Error> {
        match (&a.0, &b.0) {
            (None, None) => Ok(InferenceValue(None)),
            (Some(t), None) | (None, Some(t)) => Ok(InferenceValue(Some(t.clone()))),
            // The context decides the merged binding before it unifies, so the
            // incoming value wins.
            (Some(_), Some(b)) => Ok(InferenceValue(Some(b.clone()))),
        }
    }
}

/// A finding of generic inference.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InferenceError {
    #[error("Type parameter {param} inferred as both {first} and {second}")]
    Conflict {
        param: Atom,
        first: Type,
        second: Type,
    },
    #[error("Expected {expected} type argument(s) but got {got}")]
    TypeArgumentCount { expected: usize, got: usize },
    #[error("expected {expected} but got {got}")]
    ExplicitArgumentMismatch { expected: Type, got: Type },
    #[error("{param} does not satisfy constraint {constraint}")]
    ConstraintViolation {
        param: Atom,
        binding: Type,
        constraint: Type,
    },
}

impl InferenceError {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            InferenceError::Conflict { .. } => DiagnosticKind::GenericInferenceConflict,
            InferenceError::TypeArgumentCount { .. } => DiagnosticKind::TypeArgumentCount,
            InferenceError::ExplicitArgumentMismatch { .. } => DiagnosticKind::TypeMismatch,
            InferenceError::ConstraintViolation { .. } => DiagnosticKind::GenericConstraintViolation,
        }
    }

    pub fn to_diagnostic<L>(&self, location: L) -> Diagnostic<L> {
        let builder = DiagnosticBuilder::new(location);
        match self {
            InferenceError::Conflict {
                param,
                first,
                second,
            } => builder.inference_conflict(param, first, second),
            InferenceError::TypeArgumentCount { expected, got } => {
                builder.type_argument_count(*expected, *got)
            }
            InferenceError::ExplicitArgumentMismatch { expected, got } => {
                builder.explicit_type_argument_mismatch(expected, got)
            }
            InferenceError::ConstraintViolation {
                param, constraint, ..
            } => builder.constraint_violation(param, constraint),
        }
    }
}

/// Bindings and findings of one inference.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenericInferenceResult {
    pub substitution: TypeSubstitution,
    pub errors: Vec<InferenceError>,
}

impl GenericInferenceResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Type> {
        self.substitution.get(name)
    }

    pub fn diagnostics<L: Clone>(&self, location: L) -> Vec<Diagnostic<L>> {
        self.errors
            .iter()
            .map(|error| error.to_diagnostic(location.clone()))
            .collect()
    }
}

/// Input to [`infer_generic_arguments_with`].
#[derive(Clone, Copy, Debug)]
pub struct InferenceRequest<'r> {
    pub type_params: &'r [TypeParam],
    pub patterns: &'r [Type],
    pub args: &'r [Type],
    /// Explicit type arguments written at the call site. They replace
    /// inference entirely.
    pub explicit_type_args: Option<&'r [Type]>,
}

/// Infer `param_names` from `arg_types` matched against `pattern_types`.
pub fn infer_generic_arguments<N: AsRef<str>>(
    param_names: &[N],
    pattern_types: &[Type],
    arg_types: &[Type],
    aliases: &TypeAliasMap,
) -> GenericInferenceResult {
    let type_params: Vec<TypeParam> = param_names
        .iter()
        .map(|name| TypeParam::new(name.as_ref()))
        .collect();
    let request = InferenceRequest {
        type_params: &type_params,
        patterns: pattern_types,
        args: arg_types,
        explicit_type_args: None,
    };
    infer_generic_arguments_with(&request, aliases, &CheckerOptions::default())
}

/// Full inference: explicit type arguments, inference, then constraint checks.
pub fn infer_generic_arguments_with(
    request: &InferenceRequest<'_>,
    aliases: &TypeAliasMap,
    options: &CheckerOptions,
) -> GenericInferenceResult {
    let mut ctx = InferenceContext::with_options(aliases, options);

    let mut result = match request.explicit_type_args {
        Some(explicit) => ctx.apply_explicit(request, explicit),
        None => {
            for param in request.type_params {
                ctx.fresh_type_param(param.name.clone());
            }
            for (pattern, arg) in request.patterns.iter().zip(request.args) {
                ctx.infer_from_types(pattern, arg);
            }
            ctx.into_result()
        }
    };

    check_constraints(request.type_params, aliases, options, &mut result);
    result
}

fn check_constraints(
    type_params: &[TypeParam],
    aliases: &TypeAliasMap,
    options: &CheckerOptions,
    result: &mut GenericInferenceResult,
) {
    let mut checker = CompatibilityChecker::with_options(aliases, options);
    for param in type_params {
        let Some(constraint) = &param.constraint else {
            continue;
        };
        let binding = result.substitution.get(&param.name).cloned().unwrap_or(Type::ANY);
        let constraint = substitute_type_params(constraint, &result.substitution);
        if !checker.is_compatible(&binding, &constraint) {
            debug!(param = %param.name, binding = %binding, constraint = %constraint, "constraint violated");
            result.errors.push(InferenceError::ConstraintViolation {
                param: param.name.clone(),
                binding,
                constraint,
            });
        }
    }
}

/// Inference state for a single call.
pub struct InferenceContext<'a> {
    checker: CompatibilityChecker<'a>,
    table: InPlaceUnificationTable<InferenceVar>,
    type_params: Vec<(Atom, InferenceVar)>,
    errors: Vec<InferenceError>,
    widen_literals: bool,
    /// `(pattern alias, argument)` pairs currently being expanded.
    expanding: FxHashSet<(Type, Type)>,
}

impl<'a> InferenceContext<'a> {
    pub fn new(aliases: &'a TypeAliasMap) -> Self {
        Self::with_options(aliases, &CheckerOptions::default())
    }

    pub fn with_options(aliases: &'a TypeAliasMap, options: &CheckerOptions) -> Self {
        InferenceContext {
            checker: CompatibilityChecker::with_options(aliases, options),
            table: InPlaceUnificationTable::new(),
            type_params: Vec::new(),
            errors: Vec::new(),
            widen_literals: options.widen_inferred_literals,
            expanding: FxHashSet::default(),
        }
    }

    /// Create an inference variable for a type parameter.
    pub fn fresh_type_param(&mut self, name: Atom) -> InferenceVar {
        let var = self.table.new_key(InferenceValue(None));
        self.type_params.push((name, var));
        var
    }

    pub fn find_type_param(&self, name: &str) -> Option<InferenceVar> {
        self.type_params
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, v)| *v)
    }

    /// Current binding of a variable.
    pub fn probe(&mut self, var: InferenceVar) -> Option<Type> {
        self.table.probe_value(var).0
    }

    /// Record that the parameter behind `var` was observed as `observed`.
    pub fn observe(&mut self, var: InferenceVar, observed: &Type) {
        let Some(bound) = self.probe(var) else {
            trace!(var = var.0, ty = %observed, "bind");
            self.table.union_value(var, InferenceValue(Some(observed.clone())));
            return;
        };
        if bound == *observed {
            return;
        }

        if let (Type::Literal(a), Type::Literal(b)) = (&bound, observed) {
            if a.base() == b.base() && self.widen_literals {
                trace!(var = var.0, "widen repeated literal binding");
                self.table
                    .union_value(var, InferenceValue(Some(Type::Primitive(a.base()))));
                return;
            }
        } else if self.checker.is_compatible(observed, &bound) {
            return;
        } else if bound.is_literal() && self.checker.is_compatible(&bound, observed) {
            self.table.union_value(var, InferenceValue(Some(observed.clone())));
            return;
        }

        let param = self.param_name(var);
        let (first, second) = conflict_display(&bound, observed);
        debug!(param = %param, first = %first, second = %second, "inference conflict");
        self.errors.push(InferenceError::Conflict {
            param,
            first,
            second,
        });
    }

    fn param_name(&mut self, var: InferenceVar) -> Atom {
        let root = self.table.find(var);
        let mut found = None;
        for (name, candidate) in &self.type_params {
            if *candidate == var || *candidate == root {
                found = Some(name.clone());
                break;
            }
        }
        found.unwrap_or_else(|| Atom::from("?"))
    }

    /// Walk `pattern` and `arg` in lockstep, observing type parameters.
    pub fn infer_from_types(&mut self, pattern: &Type, arg: &Type) {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH_SIZE, || {
            self.infer_from_types_inner(pattern, arg)
        });
    }

    fn infer_from_types_inner(&mut self, pattern: &Type, arg: &Type) {
        if let Type::Alias(name) = pattern {
            match self.find_type_param(name) {
                Some(var) => self.observe(var, arg),
                None => {
                    let resolved = self.checker.aliases().resolve(pattern);
                    if resolved == *pattern {
                        return;
                    }
                    // Recursive aliases bring the same pair back; it has
                    // already been observed further up.
                    let key = (pattern.clone(), arg.clone());
                    if !self.expanding.insert(key.clone()) {
                        trace!(pattern = %pattern, "recursive alias pattern");
                        return;
                    }
                    self.infer_from_types(&resolved, arg);
                    self.expanding.remove(&key);
                }
            }
            return;
        }

        let arg = self.checker.aliases().resolve(arg);
        match (pattern, &arg) {
            (Type::Array(p), Type::Array(a)) => self.infer_from_types(p, a),
            (Type::Array(p), Type::Tuple(elements)) => {
                for element in elements.iter() {
                    self.infer_from_types(p, element);
                }
            }
            (Type::Tuple(ps), Type::Tuple(args)) => {
                for (p, a) in ps.iter().zip(args.iter()) {
                    self.infer_from_types(p, a);
                }
            }
            (Type::Object(_) | Type::Record(_), Type::Object(_) | Type::Record(_)) => {
                self.infer_from_objects(pattern, &arg)
            }
            (Type::Function(p), Type::Function(a)) => {
                if let (FunctionShape::Signature(p), FunctionShape::Signature(a)) =
                    (p.as_ref(), a.as_ref())
                {
                    for (pp, ap) in p.params.iter().zip(&a.params) {
                        self.infer_from_types(pp, ap);
                    }
                    self.infer_from_types(&p.return_type, &a.return_type);
                }
            }
            (Type::Union(members), _) => self.infer_from_union(members, &arg),
            (Type::Intersection(members), _) => {
                for member in members.iter() {
                    self.infer_from_types(member, &arg);
                }
            }
            (Type::Predicate(p), Type::Predicate(a)) => self.infer_from_types(&p.guard, &a.guard),
            _ => {}
        }
    }

    fn infer_from_objects(&mut self, pattern: &Type, arg: &Type) {
        let (Some(p_shape), Some(a_shape)) = (object_view(pattern), object_view(arg)) else {
            return;
        };
        for (name, p_prop) in &p_shape.properties {
            if let Some(a_prop) = a_shape.properties.get(name) {
                self.infer_from_types(&p_prop.ty, &a_prop.ty);
            } else if let Some(a_index) = &a_shape.index_signature {
                self.infer_from_types(&p_prop.ty, &a_index.value_type);
            }
        }
        if let Some(p_index) = &p_shape.index_signature {
            match &a_shape.index_signature {
                Some(a_index) => {
                    self.infer_from_types(&p_index.key_type, &a_index.key_type);
                    self.infer_from_types(&p_index.value_type, &a_index.value_type);
                }
                None => {
                    for (name, a_prop) in &a_shape.properties {
                        if !p_shape.properties.contains_key(name) {
                            self.infer_from_types(&p_index.value_type, &a_prop.ty);
                        }
                    }
                }
            }
        }
    }

    /// `T | undefined` against `string | undefined` infers `T = string`: the
    /// argument members not covered by the pattern's fixed members are
    /// inferred against its single open member.
    fn infer_from_union(&mut self, members: &TypeList, arg: &Type) {
        let (open, fixed): (Vec<&Type>, Vec<&Type>) =
            members.iter().partition(|m| self.mentions_type_param(m));
        let [open_member] = open.as_slice() else {
            return;
        };
        let remainder: Vec<Type> = arg
            .union_members()
            .iter()
            .filter(|a| !fixed.iter().any(|f| self.checker.is_compatible(a, f)))
            .cloned()
            .collect();
        if remainder.is_empty() {
            return;
        }
        self.infer_from_types(open_member, &Type::union(remainder));
    }

    fn mentions_type_param(&self, ty: &Type) -> bool {
        match ty {
            Type::Alias(name) => self.type_params.iter().any(|(n, _)| n == name),
            Type::Primitive(_) | Type::Literal(_) => false,
            Type::Array(element) | Type::Keyof(element) => self.mentions_type_param(element),
            Type::Tuple(elements) => elements.iter().any(|e| self.mentions_type_param(e)),
            Type::Union(members) | Type::Intersection(members) => {
                members.iter().any(|m| self.mentions_type_param(m))
            }
            Type::Object(shape) => {
                shape.properties.values().any(|p| self.mentions_type_param(&p.ty))
                    || shape.index_signature.as_ref().is_some_and(|i| {
                        self.mentions_type_param(&i.key_type)
                            || self.mentions_type_param(&i.value_type)
                    })
            }
            Type::Record(record) => {
                self.mentions_type_param(&record.key) || self.mentions_type_param(&record.value)
            }
            Type::Function(shape) => match shape.as_ref() {
                FunctionShape::AnyArity => false,
                FunctionShape::Signature(sig) => {
                    sig.params.iter().any(|p| self.mentions_type_param(p))
                        || self.mentions_type_param(&sig.return_type)
                }
            },
            Type::Predicate(predicate) => self.mentions_type_param(&predicate.guard),
        }
    }

    /// Explicit type arguments replace inference; each argument is still
    /// checked against its pattern with the explicit bindings substituted.
    fn apply_explicit(
        &mut self,
        request: &InferenceRequest<'_>,
        explicit: &[Type],
    ) -> GenericInferenceResult {
        let mut errors = Vec::new();
        if explicit.len() != request.type_params.len() {
            errors.push(InferenceError::TypeArgumentCount {
                expected: request.type_params.len(),
                got: explicit.len(),
            });
        }
        let substitution = TypeSubstitution::from_args(request.type_params, explicit);
        for (pattern, arg) in request.patterns.iter().zip(request.args) {
            let expected = substitute_type_params(pattern, &substitution);
            if !self.checker.is_compatible(arg, &expected) {
                errors.push(InferenceError::ExplicitArgumentMismatch {
                    expected,
                    got: arg.clone(),
                });
            }
        }
        GenericInferenceResult {
            substitution,
            errors,
        }
    }

    /// Finish inference. Unobserved parameters bind to `any`.
    pub fn into_result(mut self) -> GenericInferenceResult {
        let mut substitution = TypeSubstitution::new();
        let params = std::mem::take(&mut self.type_params);
        for (name, var) in params {
            let binding = self.probe(var).unwrap_or(Type::ANY);
            substitution.insert(name, binding);
        }
        GenericInferenceResult {
            substitution,
            errors: self.errors,
        }
    }
}

/// Types shown in a conflict message: widened when that still tells the two
/// apart, exact otherwise.
fn conflict_display(first: &Type, second: &Type) -> (Type, Type) {
    let (wide_first, wide_second) = (widen_literal(first), widen_literal(second));
    if wide_first != wide_second {
        (wide_first, wide_second)
    } else {
        (first.clone(), second.clone())
    }
}

#[cfg(test)]
#[path = "../tests/infer_tests.rs"]
mod tests;
