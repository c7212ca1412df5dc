//! Array and tuple compatibility.
//!
//! - `T[] <: U[]` if `T <: U` (covariant)
//! - `[A, B] <: [C, D]` if the lengths match and `A <: C`, `B <: D`
//! - `[A, B] <: U[]` if `A <: U` and `B <: U`
//! - an array is never compatible with a tuple

use crate::subtype::{CompatibilityChecker, SubtypeResult};
use crate::types::*;

impl CompatibilityChecker<'_> {
    pub(crate) fn check_sequence_subtype(&mut self, value: &Type, target: &Type) -> SubtypeResult {
        match (value, target) {
            (Type::Array(source_element), Type::Array(target_element)) => {
                self.check_subtype(source_element, target_element)
            }
            (Type::Tuple(source), Type::Tuple(target)) => self.check_tuple_subtype(source, target),
            (Type::Tuple(source), Type::Array(target_element)) => {
                self.check_tuple_to_array(source, target_element)
            }
            _ => SubtypeResult::False,
        }
    }

    pub(crate) fn check_tuple_subtype(&mut self, source: &[Type], target: &[Type]) -> SubtypeResult {
        if source.len() != target.len() {
            return SubtypeResult::False;
        }
        for (s_elem, t_elem) in source.iter().zip(target) {
            if self.check_subtype(s_elem, t_elem).is_false() {
                return SubtypeResult::False;
            }
        }
        SubtypeResult::True
    }

    /// A heterogeneous tuple fits an array only if the element type covers
    /// every position.
    pub(crate) fn check_tuple_to_array(&mut self, source: &[Type], element: &Type) -> SubtypeResult {
        for s_elem in source {
            if self.check_subtype(s_elem, element).is_false() {
                return SubtypeResult::False;
            }
        }
        SubtypeResult::True
    }
}
