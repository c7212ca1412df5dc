//! Union and intersection compatibility.
//!
//! - Union target: `T <: A | B` if `T <: A` or `T <: B`.
//! - Union source: `A | B <: T` if `A <: T` and `B <: T`.
//! - Intersection target: `T <: A & B` if `T <: A` and `T <: B`.

use crate::subtype::{CompatibilityChecker, SubtypeResult};
use crate::types::*;

impl CompatibilityChecker<'_> {
    pub(crate) fn check_union_target(&mut self, value: &Type, members: &TypeList) -> SubtypeResult {
        if let Type::Union(source_members) = value {
            // Each source member against the whole target, not member-wise.
            let target = Type::Union(members.clone());
            return self.check_union_source(source_members, &target);
        }
        if members.contains(value) {
            return SubtypeResult::True;
        }
        for member in members.iter() {
            if self.check_subtype(value, member).is_true() {
                return SubtypeResult::True;
            }
        }
        SubtypeResult::False
    }

    pub(crate) fn check_union_source(&mut self, members: &TypeList, target: &Type) -> SubtypeResult {
        for member in members.iter() {
            if self.check_subtype(member, target).is_false() {
                return SubtypeResult::False;
            }
        }
        SubtypeResult::True
    }

    pub(crate) fn check_intersection_target(
        &mut self,
        value: &Type,
        members: &TypeList,
    ) -> SubtypeResult {
        for member in members.iter() {
            if self.check_subtype(value, member).is_false() {
                return SubtypeResult::False;
            }
        }
        SubtypeResult::True
    }
}
