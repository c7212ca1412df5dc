use super::*;
use crate::test_utils::{init_tracing, num, object, str_lit};
use crate::type_factory::ObjectBuilder;

fn infer(patterns: &[Type], args: &[Type]) -> GenericInferenceResult {
    infer_generic_arguments(&["T"], patterns, args, &TypeAliasMap::new())
}

fn t() -> Type {
    Type::alias("T")
}

// =============================================================================
// Direct observations
// =============================================================================

#[test]
fn test_single_literal_binds_exactly() {
    let result = infer(&[t()], &[num(1.0)]);
    assert!(result.is_ok());
    assert_eq!(result.get("T"), Some(&num(1.0)));
}

#[test]
fn test_same_literal_twice_keeps_literal() {
    let result = infer(&[t(), t()], &[num(1.0), num(1.0)]);
    assert!(result.is_ok());
    assert_eq!(result.get("T"), Some(&num(1.0)));
}

#[test]
fn test_distinct_literals_of_same_base_widen() {
    init_tracing();
    let result = infer(&[t(), t()], &[num(1.0), num(2.0)]);
    assert!(result.is_ok(), "unexpected errors: {:?}", result.errors);
    assert_eq!(result.get("T"), Some(&Type::NUMBER));

    let result = infer(&[t(), t(), t()], &[str_lit("a"), str_lit("b"), str_lit("c")]);
    assert_eq!(result.get("T"), Some(&Type::STRING));
}

#[test]
fn test_mixed_literals_conflict() {
    init_tracing();
    let result = infer(&[t(), t()], &[num(1.0), str_lit("hello")]);
    assert_eq!(result.errors.len(), 1);
    let message = result.errors[0].to_string();
    assert!(message.contains('T'), "{message}");
    assert!(message.contains("number"), "{message}");
    assert!(message.contains("string"), "{message}");
    assert_eq!(message, "Type parameter T inferred as both number and string");
    // The first binding is kept.
    assert_eq!(result.get("T"), Some(&num(1.0)));
}

#[test]
fn test_conflict_without_widening_shows_exact_literals() {
    let options = CheckerOptions::default().with_widen_inferred_literals(false);
    let type_params = [TypeParam::new("T")];
    let patterns = [t(), t()];
    let args = [num(1.0), num(2.0)];
    let request = InferenceRequest {
        type_params: &type_params,
        patterns: &patterns,
        args: &args,
        explicit_type_args: None,
    };
    let result = infer_generic_arguments_with(&request, &TypeAliasMap::new(), &options);
    assert_eq!(
        result.errors,
        vec![InferenceError::Conflict {
            param: Atom::from("T"),
            first: num(1.0),
            second: num(2.0),
        }]
    );
}

#[test]
fn test_literal_binding_widens_to_later_primitive() {
    let result = infer(&[t(), t()], &[num(1.0), Type::NUMBER]);
    assert!(result.is_ok());
    assert_eq!(result.get("T"), Some(&Type::NUMBER));
}

#[test]
fn test_compatible_later_observation_keeps_binding() {
    let result = infer(&[t(), t()], &[Type::NUMBER, num(7.0)]);
    assert!(result.is_ok());
    assert_eq!(result.get("T"), Some(&Type::NUMBER));
}

#[test]
fn test_primitive_conflict() {
    let result = infer(&[t(), t()], &[Type::NUMBER, Type::BOOLEAN]);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].kind(), DiagnosticKind::GenericInferenceConflict);
}

#[test]
fn test_unobserved_param_binds_any() {
    let result = infer_generic_arguments(
        &["T", "U"],
        &[Type::alias("T")],
        &[Type::STRING],
        &TypeAliasMap::new(),
    );
    assert!(result.is_ok());
    assert_eq!(result.get("T"), Some(&Type::STRING));
    assert_eq!(result.get("U"), Some(&Type::ANY));
}

// =============================================================================
// Structural matching
// =============================================================================

#[test]
fn test_infer_through_array() {
    let result = infer(&[Type::array(t())], &[Type::array(Type::STRING)]);
    assert_eq!(result.get("T"), Some(&Type::STRING));
}

#[test]
fn test_infer_array_from_tuple_elements() {
    let result = infer(
        &[Type::array(t())],
        &[Type::tuple([str_lit("a"), str_lit("b")])],
    );
    assert!(result.is_ok());
    assert_eq!(result.get("T"), Some(&Type::STRING));
}

#[test]
fn test_infer_through_tuple_positions() {
    let result = infer_generic_arguments(
        &["A", "B"],
        &[Type::tuple([Type::alias("A"), Type::alias("B")])],
        &[Type::tuple([Type::STRING, Type::NUMBER])],
        &TypeAliasMap::new(),
    );
    assert_eq!(result.get("A"), Some(&Type::STRING));
    assert_eq!(result.get("B"), Some(&Type::NUMBER));
}

#[test]
fn test_infer_through_object_properties() {
    let pattern = object(&[("value", t())]);
    let arg = object(&[("value", Type::NUMBER), ("extra", Type::STRING)]);
    let result = infer(&[pattern], &[arg]);
    assert_eq!(result.get("T"), Some(&Type::NUMBER));
}

#[test]
fn test_infer_index_signature_from_properties() {
    let pattern = ObjectBuilder::new().index_signature(Type::STRING, t()).build();
    let arg = object(&[("a", num(1.0)), ("b", num(2.0))]);
    let result = infer(&[pattern], &[arg]);
    assert!(result.is_ok());
    assert_eq!(result.get("T"), Some(&Type::NUMBER));
}

#[test]
fn test_infer_record_value() {
    let result = infer(
        &[Type::record(Type::STRING, t())],
        &[Type::record(Type::STRING, Type::BOOLEAN)],
    );
    assert_eq!(result.get("T"), Some(&Type::BOOLEAN));
}

#[test]
fn test_infer_through_function_signature() {
    let pattern = Type::function([Type::alias("T")], Type::alias("U"));
    let arg = Type::function([Type::STRING], Type::BOOLEAN);
    let result =
        infer_generic_arguments(&["T", "U"], &[pattern], &[arg], &TypeAliasMap::new());
    assert!(result.is_ok());
    assert_eq!(result.get("T"), Some(&Type::STRING));
    assert_eq!(result.get("U"), Some(&Type::BOOLEAN));
}

#[test]
fn test_infer_open_union_member() {
    let pattern = Type::union2(t(), Type::UNDEFINED);
    let result = infer(&[pattern.clone()], &[Type::union2(Type::STRING, Type::UNDEFINED)]);
    assert_eq!(result.get("T"), Some(&Type::STRING));

    let result = infer(&[pattern], &[Type::NUMBER]);
    assert_eq!(result.get("T"), Some(&Type::NUMBER));
}

#[test]
fn test_infer_through_alias_pattern() {
    let mut aliases = TypeAliasMap::new();
    aliases.declare("Wrapper", object(&[("value", t())]));
    let result = infer_generic_arguments(
        &["T"],
        &[Type::alias("Wrapper")],
        &[object(&[("value", Type::STRING)])],
        &aliases,
    );
    assert_eq!(result.get("T"), Some(&Type::STRING));
}

#[test]
fn test_infer_through_recursive_alias_pattern() {
    let mut aliases = TypeAliasMap::new();
    aliases.declare("Chain", object(&[("value", t()), ("next", Type::alias("Chain"))]));
    aliases.declare(
        "NumberChain",
        object(&[("value", Type::NUMBER), ("next", Type::alias("NumberChain"))]),
    );
    let result = infer_generic_arguments(
        &["T"],
        &[Type::alias("Chain")],
        &[Type::alias("NumberChain")],
        &aliases,
    );
    assert!(result.is_ok());
    assert_eq!(result.get("T"), Some(&Type::NUMBER));
}

#[test]
fn test_infer_through_deeply_nested_pattern() {
    let mut pattern = t();
    let mut arg = Type::STRING;
    for _ in 0..200 {
        pattern = Type::array(pattern);
        arg = Type::array(arg);
    }
    let result = infer(&[pattern], &[arg]);
    assert_eq!(result.get("T"), Some(&Type::STRING));
}

#[test]
fn test_mismatched_structure_observes_nothing() {
    let result = infer(&[Type::array(t())], &[Type::STRING]);
    assert!(result.is_ok());
    assert_eq!(result.get("T"), Some(&Type::ANY));
}

// =============================================================================
// Explicit type arguments and constraints
// =============================================================================

#[test]
fn test_explicit_type_arguments_replace_inference() {
    let type_params = [TypeParam::new("T")];
    let patterns = [t()];
    let args = [str_lit("a")];
    let explicit = [Type::STRING];
    let request = InferenceRequest {
        type_params: &type_params,
        patterns: &patterns,
        args: &args,
        explicit_type_args: Some(&explicit[..]),
    };
    let result =
        infer_generic_arguments_with(&request, &TypeAliasMap::new(), &CheckerOptions::default());
    assert!(result.is_ok());
    assert_eq!(result.get("T"), Some(&Type::STRING));
}

#[test]
fn test_explicit_type_argument_mismatch() {
    let type_params = [TypeParam::new("T")];
    let patterns = [t()];
    let args = [num(1.0)];
    let explicit = [Type::STRING];
    let request = InferenceRequest {
        type_params: &type_params,
        patterns: &patterns,
        args: &args,
        explicit_type_args: Some(&explicit[..]),
    };
    let result =
        infer_generic_arguments_with(&request, &TypeAliasMap::new(), &CheckerOptions::default());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].to_string(), "expected string but got 1");
    assert_eq!(result.errors[0].kind(), DiagnosticKind::TypeMismatch);
}

#[test]
fn test_explicit_type_argument_count() {
    let type_params = [TypeParam::new("T"), TypeParam::new("U")];
    let patterns = [t()];
    let args = [Type::STRING];
    let explicit = [Type::STRING];
    let request = InferenceRequest {
        type_params: &type_params,
        patterns: &patterns,
        args: &args,
        explicit_type_args: Some(&explicit[..]),
    };
    let result =
        infer_generic_arguments_with(&request, &TypeAliasMap::new(), &CheckerOptions::default());
    assert_eq!(
        result.errors,
        vec![InferenceError::TypeArgumentCount {
            expected: 2,
            got: 1
        }]
    );
    assert_eq!(result.get("U"), Some(&Type::ANY));
}

#[test]
fn test_constraint_violation() {
    let type_params = [TypeParam::with_constraint("T", Type::STRING)];
    let patterns = [t()];
    let args = [num(1.0)];
    let request = InferenceRequest {
        type_params: &type_params,
        patterns: &patterns,
        args: &args,
        explicit_type_args: None,
    };
    let result =
        infer_generic_arguments_with(&request, &TypeAliasMap::new(), &CheckerOptions::default());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].to_string(), "T does not satisfy constraint string");

    let diagnostics = result.diagnostics("call");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        DiagnosticKind::of(&diagnostics[0]),
        Some(DiagnosticKind::GenericConstraintViolation)
    );
    assert_eq!(diagnostics[0].location, "call");
}

#[test]
fn test_constraint_satisfied_by_literal() {
    let type_params = [TypeParam::with_constraint("T", Type::STRING)];
    let patterns = [t()];
    let args = [str_lit("ok")];
    let request = InferenceRequest {
        type_params: &type_params,
        patterns: &patterns,
        args: &args,
        explicit_type_args: None,
    };
    let result =
        infer_generic_arguments_with(&request, &TypeAliasMap::new(), &CheckerOptions::default());
    assert!(result.is_ok());
    assert_eq!(result.get("T"), Some(&str_lit("ok")));
}

#[test]
fn test_constraint_referencing_other_param() {
    let type_params = [
        TypeParam::new("T"),
        TypeParam::with_constraint("U", Type::alias("T")),
    ];
    let patterns = [Type::alias("T"), Type::alias("U")];
    let args = [Type::STRING, Type::NUMBER];
    let request = InferenceRequest {
        type_params: &type_params,
        patterns: &patterns,
        args: &args,
        explicit_type_args: None,
    };
    let result =
        infer_generic_arguments_with(&request, &TypeAliasMap::new(), &CheckerOptions::default());
    assert_eq!(
        result.errors,
        vec![InferenceError::ConstraintViolation {
            param: Atom::from("U"),
            binding: Type::NUMBER,
            constraint: Type::STRING,
        }]
    );
}

// =============================================================================
// InferenceContext
// =============================================================================

#[test]
fn test_context_observe_and_probe() {
    let aliases = TypeAliasMap::new();
    let mut ctx = InferenceContext::new(&aliases);
    let var = ctx.fresh_type_param(Atom::from("T"));
    assert_eq!(ctx.find_type_param("T"), Some(var));
    assert_eq!(ctx.find_type_param("U"), None);
    assert_eq!(ctx.probe(var), None);

    ctx.observe(var, &str_lit("x"));
    assert_eq!(ctx.probe(var), Some(str_lit("x")));
    ctx.observe(var, &str_lit("y"));
    assert_eq!(ctx.probe(var), Some(Type::STRING));

    let result = ctx.into_result();
    assert!(result.is_ok());
    assert_eq!(result.get("T"), Some(&Type::STRING));
}

#[test]
fn test_context_infer_from_types_walks_nested_patterns() {
    let aliases = TypeAliasMap::new();
    let mut ctx = InferenceContext::new(&aliases);
    ctx.fresh_type_param(Atom::from("T"));
    let pattern = object(&[("items", Type::array(t()))]);
    let arg = object(&[("items", Type::array(Type::BOOLEAN))]);
    ctx.infer_from_types(&pattern, &arg);
    let result = ctx.into_result();
    assert_eq!(result.get("T"), Some(&Type::BOOLEAN));
}
