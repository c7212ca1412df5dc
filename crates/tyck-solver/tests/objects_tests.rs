use super::*;
use crate::test_utils::{object, str_lit};
use crate::type_factory::ObjectBuilder;

fn merged(ty: &Type) -> ObjectShape {
    match merge(&TypeAliasMap::new(), ty) {
        MergeResult::Merged(shape) => shape,
        other => panic!("expected a merged shape, got {other:?}"),
    }
}

#[test]
fn test_merge_disjoint_members_keeps_first_seen_order() {
    let ty = Type::intersection2(
        object(&[("b", Type::STRING), ("a", Type::NUMBER)]),
        object(&[("c", Type::BOOLEAN)]),
    );
    let shape = merged(&ty);
    let names: Vec<&str> = shape.properties.keys().map(|k| k.as_str()).collect();
    assert_eq!(names, vec!["b", "a", "c"]);
    assert!(!shape.is_fresh_literal());
    assert_eq!(shape.class_name, None);
}

#[test]
fn test_merge_shared_property_intersects_types() {
    let ty = Type::intersection2(
        object(&[("id", Type::STRING)]),
        object(&[("id", str_lit("fixed"))]),
    );
    let shape = merged(&ty);
    assert_eq!(
        shape.property("id").map(|p| p.ty.clone()),
        Some(Type::intersection2(Type::STRING, str_lit("fixed")))
    );
}

#[test]
fn test_merge_required_wins_over_optional() {
    let ty = Type::intersection2(
        ObjectBuilder::new().optional_property("x", Type::NUMBER).build(),
        object(&[("x", Type::NUMBER)]),
    );
    let shape = merged(&ty);
    assert_eq!(shape.property("x").map(|p| p.optional), Some(false));

    let both_optional = Type::intersection2(
        ObjectBuilder::new().optional_property("x", Type::NUMBER).build(),
        ObjectBuilder::new().optional_property("x", Type::NUMBER).build(),
    );
    assert_eq!(merged(&both_optional).property("x").map(|p| p.optional), Some(true));
}

#[test]
fn test_merge_index_signatures() {
    let ty = Type::intersection2(
        Type::record(Type::STRING, Type::NUMBER),
        ObjectBuilder::new()
            .index_signature(Type::STRING, Type::union2(Type::NUMBER, Type::STRING))
            .build(),
    );
    let index = merged(&ty).index_signature.expect("index signature");
    assert_eq!(index.key_type, Type::STRING);
    assert_eq!(
        index.value_type,
        Type::intersection2(Type::NUMBER, Type::union2(Type::NUMBER, Type::STRING))
    );
}

#[test]
fn test_merge_through_aliases_and_nested_intersections() {
    let mut aliases = TypeAliasMap::new();
    aliases.declare("Named", object(&[("name", Type::STRING)]));
    aliases.declare(
        "Entity",
        Type::intersection2(Type::alias("Named"), object(&[("id", Type::NUMBER)])),
    );
    let ty = Type::intersection2(Type::alias("Entity"), object(&[("active", Type::BOOLEAN)]));
    let MergeResult::Merged(shape) = merge(&aliases, &ty) else {
        panic!("expected a merged shape");
    };
    let names: Vec<&str> = shape.properties.keys().map(|k| k.as_str()).collect();
    assert_eq!(names, vec!["name", "id", "active"]);
}

#[test]
fn test_merge_self_referencing_alias_terminates() {
    let mut aliases = TypeAliasMap::new();
    aliases.declare(
        "Loop",
        Type::intersection2(object(&[("a", Type::NUMBER)]), Type::alias("Loop")),
    );
    let MergeResult::Merged(shape) = merge(&aliases, &Type::alias("Loop")) else {
        panic!("expected a merged shape");
    };
    assert_eq!(shape.properties.len(), 1);
}

#[test]
fn test_merge_any_and_non_objects() {
    let aliases = TypeAliasMap::new();
    let with_any = Type::Intersection(TypeList::from_vec(vec![
        object(&[("a", Type::NUMBER)]),
        Type::ANY,
    ]));
    assert_eq!(merge(&aliases, &with_any), MergeResult::Any);

    let with_string = Type::intersection2(object(&[("a", Type::NUMBER)]), Type::STRING);
    assert_eq!(merge(&aliases, &with_string), MergeResult::NotMergeable);
    assert_eq!(
        merge(&aliases, &Type::function([], Type::VOID)),
        MergeResult::NotMergeable
    );
}

#[test]
fn test_plain_object_merges_to_itself() {
    let point = object(&[("x", Type::NUMBER)]);
    assert_eq!(Some(&merged(&point)), point.object_shape());
}

#[test]
fn test_object_view_of_record() {
    let record = Type::record(Type::STRING, Type::NUMBER);
    let view = object_view(&record).expect("record view");
    assert!(view.properties.is_empty());
    assert_eq!(
        view.index_signature.as_ref().map(|i| &i.value_type),
        Some(&Type::NUMBER)
    );
    assert!(object_view(&Type::STRING).is_none());
}
