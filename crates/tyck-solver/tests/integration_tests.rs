//! End-to-end flows through the public surface: declare aliases, check
//! assignments, resolve calls, narrow the results.

use super::*;
use crate::test_utils::{fresh_literal, init_tracing, num, object, str_lit};

/// ```text
/// type UserType = "admin" | "guest";
/// type User = { name: string; userType: UserType; email?: string };
/// type Response<T> = { status: number; data: T };
/// type MaybeUser = User | null;
/// ```
fn declarations() -> TypeAliasMap {
    let mut aliases = TypeAliasMap::new();
    aliases.declare("UserType", Type::union2(str_lit("admin"), str_lit("guest")));
    aliases.declare(
        "User",
        ObjectBuilder::new()
            .property("name", Type::STRING)
            .property("userType", Type::alias("UserType"))
            .optional_property("email", Type::STRING)
            .build(),
    );
    aliases.define_generic(
        "Response",
        vec![TypeParam::new("T")],
        object(&[("status", Type::NUMBER), ("data", Type::alias("T"))]),
    );
    aliases.declare("MaybeUser", Type::union2(Type::alias("User"), Type::NULL));
    aliases
}

#[test]
fn test_declarations_validate_cleanly() {
    let aliases = declarations();
    assert!(aliases.validate().is_empty());
    assert_eq!(aliases.len(), 4);
}

#[test]
fn test_assign_literals_to_declared_user() {
    init_tracing();
    let aliases = declarations();
    let mut checker = CompatibilityChecker::new(&aliases);
    let user = Type::alias("User");

    let good = fresh_literal(&[("name", str_lit("ada")), ("userType", str_lit("admin"))]);
    assert!(checker.check_assignment(&good, &user, 1).is_empty());

    let bad = fresh_literal(&[
        ("name", str_lit("ada")),
        ("userType", str_lit("root")),
        ("age", num(36.0)),
    ]);
    let messages: Vec<String> = checker
        .check_assignment(&bad, &user, 2)
        .into_iter()
        .map(|d| d.message_text)
        .collect();
    assert_eq!(
        messages,
        vec![
            "Property 'userType' has type \"root\" but expected UserType",
            "Excess property 'age'",
        ]
    );
}

#[test]
fn test_widened_variable_skips_excess_check() {
    let aliases = declarations();
    let mut checker = CompatibilityChecker::new(&aliases);
    let literal = fresh_literal(&[
        ("name", str_lit("ada")),
        ("userType", str_lit("guest")),
        ("age", num(36.0)),
    ]);
    let variable = widen_freshness(&literal);
    assert!(checker.check_assignment(&variable, &Type::alias("User"), ()).is_empty());
}

#[test]
fn test_generic_alias_instantiation_and_compatibility() {
    let aliases = declarations();
    let response = aliases.instantiate_generic_type("Response", &[Type::alias("User")]);
    let value = object(&[
        ("status", num(200.0)),
        (
            "data",
            object(&[("name", Type::STRING), ("userType", str_lit("guest"))]),
        ),
    ]);
    assert!(is_compatible_with(&value, &response, &aliases));

    let wrong = object(&[("status", num(200.0)), ("data", Type::STRING)]);
    let mut checker = CompatibilityChecker::new(&aliases);
    let reason = checker.explain_failure(&wrong, &response).expect("incompatible");
    assert_eq!(reason.property_path().as_deref(), Some("data"));
}

#[test]
fn test_call_then_narrow() {
    let aliases = declarations();
    // function find<T>(items: T[], key: string): T | null
    let find = Type::generic_function(
        vec![TypeParam::new("T")],
        [Type::array(Type::alias("T")), Type::STRING],
        Type::union2(Type::alias("T"), Type::NULL),
    );
    let users = Type::array(Type::alias("User"));
    let resolution = resolve_generic_call(&find, &[users, str_lit("ada")], None, &aliases, ());
    assert!(resolution.is_ok(), "{:?}", resolution.diagnostics);
    assert_eq!(
        resolution.return_type,
        Type::union2(Type::alias("User"), Type::NULL)
    );

    let mut narrowing = NarrowingContext::new(&aliases);
    let found = narrowing.narrow_by_guard(&resolution.return_type, &TypeGuard::NullishEquality, false);
    assert_eq!(found, Type::alias("User"));
    let missing = narrowing.narrow_by_guard(&resolution.return_type, &TypeGuard::Truthy, false);
    assert_eq!(missing, Type::NULL);
}

#[test]
fn test_narrow_alias_union_of_literals() {
    let aliases = declarations();
    let mut narrowing = NarrowingContext::new(&aliases);
    let user_type = Type::alias("UserType");
    let guard = TypeGuard::LiteralEquality(str_lit("admin"));
    assert_eq!(narrowing.narrow_by_guard(&user_type, &guard, true), str_lit("admin"));
    assert_eq!(narrowing.narrow_by_guard(&user_type, &guard, false), str_lit("guest"));
}

#[test]
fn test_keyof_alias_as_call_parameter() {
    let aliases = declarations();
    // function get(key: keyof User): void
    let get = Type::function([Type::keyof(Type::alias("User"))], Type::VOID);
    assert!(resolve_generic_call(&get, &[str_lit("email")], None, &aliases, ()).is_ok());
    let resolution = resolve_generic_call(&get, &[str_lit("password")], None, &aliases, ());
    assert_eq!(resolution.diagnostics.len(), 1);
    assert_eq!(
        DiagnosticKind::of(&resolution.diagnostics[0]),
        Some(DiagnosticKind::TypeMismatch)
    );
}

#[test]
fn test_broken_declarations_report_by_alias_name() {
    let mut aliases = declarations();
    aliases.declare("Loop", Type::alias("Loop"));
    aliases.declare("Team", object(&[("lead", Type::alias("Person"))]));
    let diagnostics = aliases.validate();
    let summary: Vec<(String, DiagnosticCategory)> = diagnostics
        .iter()
        .map(|d| (d.location.to_string(), d.category))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Loop".to_string(), DiagnosticCategory::Error),
            ("Team".to_string(), DiagnosticCategory::Warning),
        ]
    );
}

#[test]
fn test_options_from_json_drive_the_engine() {
    let options =
        CheckerOptions::from_json(r#"{ "excessPropertyChecks": false, "widenInferredLiterals": false }"#)
            .expect("valid options");
    let aliases = TypeAliasMap::with_options(&options);

    let literal = fresh_literal(&[("x", num(1.0)), ("z", num(2.0))]);
    let diagnostics = CompatibilityChecker::with_options(&aliases, &options).check_assignment(
        &literal,
        &object(&[("x", Type::NUMBER)]),
        (),
    );
    assert!(diagnostics.is_empty());

    let pair = Type::generic_function(
        vec![TypeParam::new("T")],
        [Type::alias("T"), Type::alias("T")],
        Type::alias("T"),
    );
    let resolution = CallEvaluator::with_options(&aliases, &options).resolve_call(
        &pair,
        &[num(1.0), num(2.0)],
        None,
        (),
    );
    assert_eq!(
        resolution
            .diagnostics
            .first()
            .map(|d| d.message_text.as_str()),
        Some("Type parameter T inferred as both 1 and 2")
    );
}

#[test]
fn test_diagnostics_serialize_to_json() {
    let aliases = declarations();
    let literal = fresh_literal(&[("name", str_lit("ada"))]);
    let diagnostics =
        CompatibilityChecker::new(&aliases).check_assignment(&literal, &Type::alias("User"), 17u32);
    let json = serde_json::to_value(&diagnostics).expect("serializable");
    assert_eq!(json[0]["code"], 2010);
    assert_eq!(json[0]["category"], "Error");
    assert_eq!(json[0]["location"], 17);
    assert_eq!(json[0]["message_text"], "Missing property 'userType'");
}
