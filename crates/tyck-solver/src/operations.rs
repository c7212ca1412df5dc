//! Call resolution.
//!
//! Resolving `callee(args)` combines the other engines: the callee is
//! alias-resolved to a signature, the argument count is checked, type
//! parameters are inferred (or taken from explicit type arguments), every
//! argument is checked against its instantiated parameter and the return type
//! is instantiated with the final bindings.

use crate::alias_map::TypeAliasMap;
use crate::diagnostics::DiagnosticBuilder;
use crate::infer::{InferenceRequest, infer_generic_arguments_with};
use crate::instantiate::{TypeSubstitution, substitute_type_params};
use crate::subtype::CompatibilityChecker;
use crate::types::*;
use tracing::{debug, trace};
use tyck_common::{CheckerOptions, Diagnostic};

/// Outcome of resolving one call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallResolution<L> {
    /// Instantiated return type. `any` when the callee is not callable.
    pub return_type: Type,
    pub substitution: TypeSubstitution,
    pub diagnostics: Vec<Diagnostic<L>>,
}

impl<L> CallResolution<L> {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Evaluates function calls against one alias map.
pub struct CallEvaluator<'a> {
    checker: CompatibilityChecker<'a>,
}

impl<'a> CallEvaluator<'a> {
    pub fn new(aliases: &'a TypeAliasMap) -> Self {
        Self::with_options(aliases, &CheckerOptions::default())
    }

    pub fn with_options(aliases: &'a TypeAliasMap, options: &CheckerOptions) -> Self {
        CallEvaluator {
            checker: CompatibilityChecker::with_options(aliases, options),
        }
    }

    pub fn resolve_call<L: Clone>(
        &mut self,
        callee: &Type,
        arg_types: &[Type],
        explicit_type_args: Option<&[Type]>,
        location: L,
    ) -> CallResolution<L> {
        let resolved = self.checker.resolve(callee);
        let Some(shape) = self.callable_shape(&resolved) else {
            debug!(callee = %callee, "not callable");
            return CallResolution {
                return_type: Type::ANY,
                substitution: TypeSubstitution::new(),
                diagnostics: vec![DiagnosticBuilder::new(location).not_callable(callee)],
            };
        };
        match shape {
            FunctionShape::AnyArity => CallResolution {
                return_type: Type::ANY,
                substitution: TypeSubstitution::new(),
                diagnostics: Vec::new(),
            },
            FunctionShape::Signature(signature) => {
                self.resolve_signature_call(&signature, arg_types, explicit_type_args, location)
            }
        }
    }

    /// The signature a callee exposes: a function, or the first function
    /// member of an intersection.
    fn callable_shape(&self, callee: &Type) -> Option<FunctionShape> {
        match callee {
            Type::Function(shape) => Some(shape.as_ref().clone()),
            Type::Intersection(members) => members.iter().find_map(|member| {
                let member = self.checker.resolve(member);
                match member {
                    Type::Function(shape) => Some(shape.as_ref().clone()),
                    _ => None,
                }
            }),
            _ => None,
        }
    }

    fn resolve_signature_call<L: Clone>(
        &mut self,
        signature: &FunctionSignature,
        arg_types: &[Type],
        explicit_type_args: Option<&[Type]>,
        location: L,
    ) -> CallResolution<L> {
        let mut diagnostics = Vec::new();

        if signature.params.len() != arg_types.len() {
            diagnostics.push(
                DiagnosticBuilder::new(location.clone())
                    .argument_count(signature.params.len(), arg_types.len()),
            );
        }

        let request = InferenceRequest {
            type_params: &signature.type_params,
            patterns: &signature.params,
            args: arg_types,
            explicit_type_args,
        };
        let inference =
            infer_generic_arguments_with(&request, self.checker.aliases(), self.checker.options());
        trace!(
            bindings = inference.substitution.len(),
            errors = inference.errors.len(),
            "call inference done"
        );

        if inference.is_ok() {
            for (param, arg) in signature.params.iter().zip(arg_types) {
                let expected = substitute_type_params(param, &inference.substitution);
                if arg.is_fresh_object_literal() {
                    diagnostics.extend(self.checker.check_assignment(
                        arg,
                        &expected,
                        location.clone(),
                    ));
                } else if !self.checker.is_compatible(arg, &expected) {
                    diagnostics.push(
                        DiagnosticBuilder::new(location.clone())
                            .argument_not_assignable(arg, &expected),
                    );
                }
            }
        } else {
            diagnostics.extend(inference.diagnostics(location));
        }

        CallResolution {
            return_type: substitute_type_params(&signature.return_type, &inference.substitution),
            substitution: inference.substitution,
            diagnostics,
        }
    }
}

/// Resolve `callee(args)` with optional explicit type arguments.
pub fn resolve_generic_call<L: Clone>(
    callee: &Type,
    arg_types: &[Type],
    explicit_type_args: Option<&[Type]>,
    aliases: &TypeAliasMap,
    location: L,
) -> CallResolution<L> {
    CallEvaluator::new(aliases).resolve_call(callee, arg_types, explicit_type_args, location)
}

#[cfg(test)]
#[path = "../tests/operations_tests.rs"]
mod tests;
