//! Properties that hold for every type, checked over a fixed sample.

use super::*;
use crate::test_utils::{fresh_literal, num, object, str_lit};

fn sample_types() -> Vec<Type> {
    let point = object(&[("x", Type::NUMBER), ("y", Type::NUMBER)]);
    vec![
        Type::STRING,
        Type::NUMBER,
        Type::BOOLEAN,
        Type::NULL,
        Type::UNDEFINED,
        Type::VOID,
        Type::ANY,
        str_lit("hello"),
        num(42.0),
        Type::boolean_literal(true),
        Type::union([Type::STRING, Type::NUMBER, Type::NULL]),
        Type::intersection2(object(&[("a", Type::STRING)]), object(&[("b", Type::NUMBER)])),
        Type::array(Type::STRING),
        Type::tuple([Type::STRING, Type::NUMBER]),
        point.clone(),
        ObjectBuilder::new()
            .property("id", Type::NUMBER)
            .optional_property("label", Type::STRING)
            .index_signature(Type::STRING, Type::union2(Type::NUMBER, Type::STRING))
            .build(),
        Type::record(Type::STRING, Type::BOOLEAN),
        Type::function([Type::STRING], Type::NUMBER),
        Type::any_function(),
        Type::generic_function(
            vec![TypeParam::new("T")],
            [Type::alias("T")],
            Type::alias("T"),
        ),
        Type::predicate("x", Type::STRING),
        Type::keyof(point),
        Type::alias("Unknown"),
    ]
}

// =============================================================================
// Compatibility laws
// =============================================================================

#[test]
fn test_everything_is_compatible_with_any_and_itself() {
    let aliases = TypeAliasMap::new();
    for ty in sample_types() {
        assert!(is_compatible_with(&ty, &Type::ANY, &aliases), "{ty} <: any");
        assert!(is_compatible_with(&ty, &ty, &aliases), "{ty} <: {ty}");
    }
}

#[test]
fn test_never_laws() {
    let aliases = TypeAliasMap::new();
    for ty in sample_types() {
        assert!(is_compatible_with(&Type::NEVER, &ty, &aliases), "never <: {ty}");
        if !ty.is_any() {
            assert!(!is_compatible_with(&ty, &Type::NEVER, &aliases), "{ty} <: never");
        }
    }
}

#[test]
fn test_superset_object_to_subset() {
    let aliases = TypeAliasMap::new();
    let narrow = object(&[("x", Type::NUMBER)]);
    let wide = object(&[("x", Type::NUMBER), ("y", Type::NUMBER)]);
    assert!(is_compatible_with(&wide, &narrow, &aliases));
    assert!(!is_compatible_with(&narrow, &wide, &aliases));
}

#[test]
fn test_tuple_against_arrays() {
    let aliases = TypeAliasMap::new();
    let tuple = Type::tuple([Type::STRING, Type::NUMBER]);
    assert!(is_compatible_with(
        &tuple,
        &Type::array(Type::union2(Type::STRING, Type::NUMBER)),
        &aliases
    ));
    assert!(!is_compatible_with(&tuple, &Type::array(Type::STRING), &aliases));
}

// =============================================================================
// Construction laws
// =============================================================================

#[test]
fn test_union_flattening_is_idempotent() {
    let (a, b, c) = (str_lit("a"), Type::NUMBER, Type::NULL);
    let nested = Type::union2(Type::union2(a.clone(), b.clone()), c.clone());
    let flat = Type::union([a, b, c]);
    assert_eq!(nested, flat);
    assert_eq!(Type::union2(flat.clone(), flat.clone()), flat);
}

#[test]
fn test_keyof_scenarios() {
    let aliases = TypeAliasMap::new();
    let counter = object(&[("counter", Type::NUMBER), ("name", Type::STRING)]);
    assert_eq!(
        aliases.resolve_keyof(&Type::keyof(counter)),
        Type::union2(str_lit("counter"), str_lit("name"))
    );
    let single = object(&[("x", Type::NUMBER)]);
    assert_eq!(aliases.resolve_keyof(&Type::keyof(single)), str_lit("x"));
}

// =============================================================================
// Narrowing laws
// =============================================================================

#[test]
fn test_narrow_and_exclude_partition() {
    let union = Type::union([str_lit("a"), Type::NUMBER, Type::NULL, Type::BOOLEAN]);
    for member in union.union_members() {
        let narrowed = narrow_type(&union, member);
        let excluded = exclude_type(&union, member);
        for kept in narrowed.union_members() {
            assert!(!excluded.union_members().contains(kept), "{kept} in both halves");
        }
        assert_eq!(Type::union2(narrowed, excluded), union);
    }
}

#[test]
fn test_remove_nullish_laws() {
    assert_eq!(
        remove_nullish(&Type::union([Type::STRING, Type::NULL, Type::UNDEFINED])),
        Type::STRING
    );
    assert_eq!(remove_nullish(&Type::NULL), Type::NEVER);
    for ty in sample_types() {
        let stripped = remove_nullish(&ty);
        assert!(!stripped.union_members().iter().any(Type::is_nullish), "{stripped}");
    }
}

// =============================================================================
// Inference scenarios
// =============================================================================

#[test]
fn test_inference_conflict_names_param_and_types() {
    let result = infer_generic_arguments(
        &["T"],
        &[Type::alias("T"), Type::alias("T")],
        &[num(1.0), str_lit("hello")],
        &TypeAliasMap::new(),
    );
    let message = result
        .errors
        .first()
        .map(ToString::to_string)
        .unwrap_or_default();
    assert!(message.contains('T'));
    assert!(message.contains("number"));
    assert!(message.contains("string"));
}

#[test]
fn test_inference_widens_number_literals() {
    let result = infer_generic_arguments(
        &["T"],
        &[Type::alias("T"), Type::alias("T")],
        &[num(1.0), num(2.0)],
        &TypeAliasMap::new(),
    );
    assert!(result.is_ok());
    assert_eq!(result.get("T"), Some(&Type::NUMBER));
}

// =============================================================================
// Object literal scenario
// =============================================================================

#[test]
fn test_object_literal_excess_and_index_signature() {
    let aliases = TypeAliasMap::new();
    let mut validator = ObjectLiteralValidator::new(&aliases);

    let with_optional = ObjectBuilder::new()
        .property("x", Type::NUMBER)
        .optional_property("y", Type::NUMBER)
        .build();
    assert!(
        validator
            .validate(&fresh_literal(&[("x", num(1.0))]), &with_optional, ())
            .is_empty()
    );

    let literal = fresh_literal(&[("x", num(1.0)), ("z", num(2.0))]);
    let strict = object(&[("x", Type::NUMBER)]);
    let diagnostics = validator.validate(&literal, &strict, ());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        DiagnosticKind::of(&diagnostics[0]),
        Some(DiagnosticKind::ExcessProperty)
    );

    let open = ObjectBuilder::new()
        .property("x", Type::NUMBER)
        .index_signature(Type::STRING, Type::NUMBER)
        .build();
    assert!(validator.validate(&literal, &open, ()).is_empty());
}
