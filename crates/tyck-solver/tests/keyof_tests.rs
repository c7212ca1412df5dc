use super::*;
use crate::type_factory::ObjectBuilder;

fn counter() -> Type {
    ObjectBuilder::new()
        .property("counter", Type::NUMBER)
        .property("name", Type::STRING)
        .build()
}

// =============================================================================
// Objects
// =============================================================================

#[test]
fn test_keyof_object_is_literal_union_in_declaration_order() {
    let aliases = TypeAliasMap::new();
    let keys = keyof_subject(&aliases, &counter());
    assert_eq!(
        keys,
        Type::union2(Type::string_literal("counter"), Type::string_literal("name"))
    );
    assert_eq!(keys.to_string(), "\"counter\" | \"name\"");
}

#[test]
fn test_keyof_single_property_is_bare_literal() {
    let aliases = TypeAliasMap::new();
    let point = ObjectBuilder::new().property("x", Type::NUMBER).build();
    assert_eq!(keyof_subject(&aliases, &point), Type::string_literal("x"));
}

#[test]
fn test_keyof_empty_object_is_never() {
    let aliases = TypeAliasMap::new();
    assert_eq!(keyof_subject(&aliases, &ObjectBuilder::new().build()), Type::NEVER);
}

#[test]
fn test_keyof_ignores_index_signature() {
    let aliases = TypeAliasMap::new();
    let dict = ObjectBuilder::new()
        .property("size", Type::NUMBER)
        .index_signature(Type::STRING, Type::NUMBER)
        .build();
    assert_eq!(keyof_subject(&aliases, &dict), Type::string_literal("size"));
}

// =============================================================================
// Other subjects
// =============================================================================

#[test]
fn test_keyof_record_is_its_key() {
    let aliases = TypeAliasMap::new();
    let keys = Type::union2(Type::string_literal("a"), Type::string_literal("b"));
    let record = Type::record(keys.clone(), Type::NUMBER);
    assert_eq!(keyof_subject(&aliases, &record), keys);
}

#[test]
fn test_keyof_any_is_string_or_number() {
    let aliases = TypeAliasMap::new();
    assert_eq!(
        keyof_subject(&aliases, &Type::ANY),
        Type::union2(Type::STRING, Type::NUMBER)
    );
}

#[test]
fn test_keyof_intersection_combines_member_keys() {
    let aliases = TypeAliasMap::new();
    let a = ObjectBuilder::new()
        .property("a", Type::STRING)
        .property("shared", Type::NUMBER)
        .build();
    let b = ObjectBuilder::new()
        .property("shared", Type::NUMBER)
        .property("b", Type::STRING)
        .build();
    let keys = keyof_subject(&aliases, &Type::intersection2(a, b));
    assert_eq!(
        keys,
        Type::union([
            Type::string_literal("a"),
            Type::string_literal("shared"),
            Type::string_literal("b"),
        ])
    );
}

#[test]
fn test_keyof_primitive_is_string() {
    let aliases = TypeAliasMap::new();
    assert_eq!(keyof_subject(&aliases, &Type::NUMBER), Type::STRING);
}

// =============================================================================
// Through aliases
// =============================================================================

#[test]
fn test_resolve_keyof_through_alias() {
    let mut aliases = TypeAliasMap::new();
    aliases.declare("Counter", counter());
    let keys = resolve_keyof(&aliases, &Type::keyof(Type::alias("Counter")));
    assert_eq!(
        keys,
        Type::union2(Type::string_literal("counter"), Type::string_literal("name"))
    );
}

#[test]
fn test_resolve_keyof_non_keyof_resolves_alias() {
    let mut aliases = TypeAliasMap::new();
    aliases.declare("Name", Type::STRING);
    assert_eq!(resolve_keyof(&aliases, &Type::alias("Name")), Type::STRING);
}

#[test]
fn test_keyof_alias_to_keyof() {
    let mut aliases = TypeAliasMap::new();
    aliases.declare("Counter", counter());
    aliases.declare("CounterKey", Type::keyof(Type::alias("Counter")));
    let keys = keyof_subject(&aliases, &Type::alias("CounterKey"));
    // keyof of a literal union is not an object: falls back to `string`.
    assert_eq!(keys, Type::STRING);
}
