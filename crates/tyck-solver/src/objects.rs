//! Property collection and merging for intersection types.
//!
//! Intersections stay algebraic in the type model. Where a concrete shape is
//! needed (object literal validation, an intersection value against an object
//! target) [`merge`] flattens `A & B & ...` into one object shape.

use crate::alias_map::TypeAliasMap;
use crate::types::*;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use std::borrow::Cow;
use tracing::trace;
use tyck_common::Atom;

/// Result of merging an intersection into one shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergeResult {
    /// Every member is an object or record.
    Merged(ObjectShape),
    /// The type is `any`.
    Any,
    /// Some member is not an object (a primitive, function, array, ...).
    NotMergeable,
}

/// Merge `ty` into a single object shape.
///
/// - properties keep first-seen order across members;
/// - a property declared by several members gets the intersection of their
///   types, and is optional only if every declaration is optional;
/// - index signature value types are intersected, the first key type wins;
/// - the merged shape carries no class tag and no freshness.
///
/// A plain object or record merges to itself.
pub fn merge(aliases: &TypeAliasMap, ty: &Type) -> MergeResult {
    let mut collector = PropertyCollector {
        aliases,
        properties: IndexMap::new(),
        index_signature: None,
        seen: FxHashSet::default(),
        found_any: false,
        mergeable: true,
    };
    collector.collect(ty);

    if collector.found_any {
        return MergeResult::Any;
    }
    if !collector.mergeable {
        trace!(ty = %ty, "intersection is not mergeable");
        return MergeResult::NotMergeable;
    }
    MergeResult::Merged(ObjectShape {
        flags: ObjectFlags::empty(),
        properties: collector.properties,
        index_signature: collector.index_signature,
        class_name: None,
    })
}

/// View an `Object` or `Record` as an object shape. A record is an object
/// with only the index signature `[key: K]: V`.
pub(crate) fn object_view(ty: &Type) -> Option<Cow<'_, ObjectShape>> {
    match ty {
        Type::Object(shape) => Some(Cow::Borrowed(shape.as_ref())),
        Type::Record(record) => Some(Cow::Owned(ObjectShape {
            index_signature: Some(IndexSignature {
                key_type: record.key.clone(),
                value_type: record.value.clone(),
            }),
            ..ObjectShape::default()
        })),
        _ => None,
    }
}

struct PropertyCollector<'a> {
    aliases: &'a TypeAliasMap,
    properties: IndexMap<Atom, PropertyInfo>,
    index_signature: Option<IndexSignature>,
    /// Guards against `type T = { a: number } & T`.
    seen: FxHashSet<Atom>,
    found_any: bool,
    mergeable: bool,
}

impl PropertyCollector<'_> {
    fn collect(&mut self, ty: &Type) {
        if let Type::Alias(name) = ty {
            if !self.seen.insert(name.clone()) {
                return;
            }
        }

        let resolved = self.aliases.resolve(ty);
        match &resolved {
            Type::Intersection(members) => {
                for member in members.iter() {
                    self.collect(member);
                }
            }
            Type::Object(_) | Type::Record(_) => {
                if let Some(shape) = object_view(&resolved) {
                    self.merge_shape(&shape);
                }
            }
            Type::Primitive(PrimitiveKind::Any) => self.found_any = true,
            _ => self.mergeable = false,
        }
    }

    fn merge_shape(&mut self, shape: &ObjectShape) {
        for (name, prop) in &shape.properties {
            match self.properties.get_mut(name) {
                Some(existing) => {
                    existing.ty = Type::intersection2(existing.ty.clone(), prop.ty.clone());
                    // Required wins.
                    existing.optional = existing.optional && prop.optional;
                }
                None => {
                    self.properties.insert(name.clone(), prop.clone());
                }
            }
        }

        if let Some(index) = &shape.index_signature {
            match &mut self.index_signature {
                Some(existing) => {
                    existing.value_type =
                        Type::intersection2(existing.value_type.clone(), index.value_type.clone());
                }
                None => self.index_signature = Some(index.clone()),
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/objects_tests.rs"]
mod tests;
