//! keyof operator evaluation.
//!
//! Handles the `keyof T` operator. Rules, in order, on the alias-resolved
//! subject:
//! - `Object`: union of string literals for every named property, in
//!   declaration order (index signatures contribute no keys). One property
//!   gives the bare literal; none gives `never`.
//! - `Record<K, V>`: `K` verbatim.
//! - `any`: `string | number`.
//! - `Intersection`: the keys of every member together.
//! - anything else: `string`.

use crate::alias_map::TypeAliasMap;
use crate::types::*;
use smallvec::SmallVec;
use tracing::trace;
use tyck_common::Atom;

/// Evaluate `keyof subject`.
pub fn keyof_subject(aliases: &TypeAliasMap, subject: &Type) -> Type {
    let resolved = resolve_operand(aliases, subject);
    let keys = match &resolved {
        Type::Object(shape) => object_keys(shape.properties.keys()),
        Type::Record(record) => record.key.clone(),
        Type::Primitive(PrimitiveKind::Any) => Type::union2(Type::STRING, Type::NUMBER),
        Type::Intersection(members) => {
            let mut names: SmallVec<[Atom; 8]> = SmallVec::new();
            let mut extra: Vec<Type> = Vec::new();
            for member in members.iter() {
                match resolve_operand(aliases, member) {
                    Type::Object(shape) => {
                        for name in shape.properties.keys() {
                            if !names.contains(name) {
                                names.push(name.clone());
                            }
                        }
                    }
                    other => extra.push(keyof_subject(aliases, &other)),
                }
            }
            let named = object_keys(names.iter());
            Type::union(std::iter::once(named).chain(extra))
        }
        _ => Type::STRING,
    };
    trace!(subject = %subject, keys = %keys, "keyof");
    keys
}

/// Evaluate a `Keyof` node. Any other type is returned alias-resolved.
pub fn resolve_keyof(aliases: &TypeAliasMap, keyof_type: &Type) -> Type {
    match keyof_type {
        Type::Keyof(subject) => keyof_subject(aliases, subject),
        other => aliases.resolve(other),
    }
}

/// Resolve aliases and nested `keyof` so the subject is a concrete shape.
fn resolve_operand(aliases: &TypeAliasMap, ty: &Type) -> Type {
    match aliases.resolve(ty) {
        Type::Keyof(inner) => keyof_subject(aliases, &inner),
        other => other,
    }
}

fn object_keys<'a>(names: impl Iterator<Item = &'a Atom>) -> Type {
    Type::union(names.map(|name| Type::string_literal(name.clone())))
}

#[cfg(test)]
#[path = "../../tests/keyof_tests.rs"]
mod tests;
