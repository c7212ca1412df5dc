//! Structural type model and compatibility engine.
//!
//! The engine is organized leaves first:
//!
//! - **Type model** (`types`, `type_factory`, `format`): immutable values for
//!   the closed set of type variants, with normalizing constructors and a
//!   stable `Display` rendering used in diagnostic text.
//! - **Alias registry** (`alias_map`, `evaluate_rules::keyof`): named and
//!   generic type aliases, lenient and strict resolution, `keyof`.
//! - **Compatibility** (`subtype`, `subtype_rules`, `subtype_explain`):
//!   coinductive structural assignability with failure explanation.
//! - **Generics** (`infer`, `instantiate`, `operations`): Union-Find
//!   inference of type arguments, substitution, and call resolution.
//! - **Narrowing** (`narrowing`): pure refinement of unions by control-flow
//!   facts.
//! - **Object literals** (`object_literal`, `objects`, `widening`): the
//!   stricter freshness check with missing, mismatched and excess properties.
//!
//! Findings are returned as data (`Vec<Diagnostic<L>>`), never as errors.
pub mod alias_map;
mod diagnostics;
pub mod evaluate_rules;
mod format;
mod infer;
mod instantiate;
mod narrowing;
mod object_literal;
pub mod objects;
pub mod operations;
pub mod recursion;
mod subtype;
mod subtype_explain;
mod subtype_rules;
mod type_factory;
pub mod types;
pub mod widening;

pub use alias_map::{AliasDefinition, AliasResolutionError, TypeAliasMap};
pub use diagnostics::{DiagnosticBuilder, DiagnosticKind, SubtypeFailureReason};
pub use evaluate_rules::keyof::{keyof_subject, resolve_keyof};
pub use infer::{
    GenericInferenceResult, InferenceContext, InferenceError, InferenceRequest, InferenceValue,
    InferenceVar, infer_generic_arguments, infer_generic_arguments_with,
};
pub use instantiate::{TypeSubstitution, substitute_type, substitute_type_params};
pub use narrowing::{NarrowingContext, TypeGuard, exclude_type, narrow_type, remove_nullish};
pub use object_literal::ObjectLiteralValidator;
pub use objects::{MergeResult, merge};
pub use operations::{CallEvaluator, CallResolution, resolve_generic_call};
pub use recursion::{RecursionGuard, RecursionProfile, RecursionResult};
pub use subtype::{CompatibilityChecker, SubtypeResult, is_compatible_with};
pub use type_factory::ObjectBuilder;
pub use types::*;
pub use widening::{widen_freshness, widen_literal};

pub use tyck_common::{Atom, CheckerOptions, Diagnostic, DiagnosticCategory};

#[cfg(test)]
mod test_utils;

// Test modules: most are loaded by their source files via #[path = "../tests/..."].
#[cfg(test)]
#[path = "../tests/type_law_tests.rs"]
mod type_law_tests;
#[cfg(test)]
#[path = "../tests/integration_tests.rs"]
mod integration_tests;
