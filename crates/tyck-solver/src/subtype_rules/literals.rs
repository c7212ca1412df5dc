//! Literal compatibility.
//!
//! - `"a" <: string`, `1 <: number`, `true <: boolean`
//! - `"a" <: "a"`, but `"a"` is not compatible with `"b"` or `1`

use crate::subtype::{CompatibilityChecker, SubtypeResult};
use crate::types::*;

impl CompatibilityChecker<'_> {
    pub(crate) fn check_literal_subtype(
        &self,
        literal: &LiteralValue,
        target: &Type,
    ) -> SubtypeResult {
        match target {
            Type::Primitive(kind) => SubtypeResult::from_bool(literal.base() == *kind),
            Type::Literal(target_literal) => SubtypeResult::from_bool(literal == target_literal),
            _ => SubtypeResult::False,
        }
    }
}
