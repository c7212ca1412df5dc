//! Object and record compatibility (structural subtyping).
//!
//! A `Record<K, V>` is checked as an object with only the index signature
//! `[key: K]: V`.
//!
//! - every required target property must be present in the source with a
//!   compatible type, or be covered by the source's index signature;
//! - a source property that is optional cannot satisfy a required one;
//! - extra source properties are allowed (excess checks only apply to fresh
//!   object literals, see `object_literal`);
//! - a target index signature must accept every named source property and
//!   the source's own index signature.

use crate::objects::object_view;
use crate::subtype::{CompatibilityChecker, SubtypeResult};
use crate::types::*;

impl CompatibilityChecker<'_> {
    pub(crate) fn check_object_subtype(&mut self, value: &Type, target: &Type) -> SubtypeResult {
        let (Some(source), Some(target_shape)) = (object_view(value), object_view(target)) else {
            return SubtypeResult::False;
        };

        // Same class: nominal fast path.
        if let (Some(a), Some(b)) = (&source.class_name, &target_shape.class_name) {
            if a == b {
                return SubtypeResult::True;
            }
        }

        for (name, t_prop) in &target_shape.properties {
            match source.properties.get(name) {
                Some(s_prop) => {
                    if s_prop.optional && !t_prop.optional {
                        return SubtypeResult::False;
                    }
                    let expected = declared_property_type(t_prop);
                    if self.check_subtype(&s_prop.ty, &expected).is_false() {
                        return SubtypeResult::False;
                    }
                }
                None if t_prop.optional => {}
                None => {
                    let covered = match &source.index_signature {
                        Some(index) => self.check_subtype(&index.value_type, &t_prop.ty).is_true(),
                        None => false,
                    };
                    if !covered {
                        return SubtypeResult::False;
                    }
                }
            }
        }

        if let Some(t_index) = &target_shape.index_signature {
            for s_prop in source.properties.values() {
                if self.check_subtype(&s_prop.ty, &t_index.value_type).is_false() {
                    return SubtypeResult::False;
                }
            }
            if let Some(s_index) = &source.index_signature {
                return self.check_subtype(&s_index.value_type, &t_index.value_type);
            }
        }

        SubtypeResult::True
    }
}

/// The type a property slot accepts: optional properties also accept
/// `undefined`.
pub(crate) fn declared_property_type(prop: &PropertyInfo) -> Type {
    if prop.optional {
        Type::union2(prop.ty.clone(), Type::UNDEFINED)
    } else {
        prop.ty.clone()
    }
}
