//! Primitive compatibility.

use crate::subtype::{CompatibilityChecker, SubtypeResult};
use crate::types::PrimitiveKind;

impl CompatibilityChecker<'_> {
    /// Only identical kinds are compatible. `any` and `never` are handled
    /// before dispatch.
    pub(crate) fn check_intrinsic_subtype(
        &self,
        source: PrimitiveKind,
        target: PrimitiveKind,
    ) -> SubtypeResult {
        SubtypeResult::from_bool(source == target)
    }
}
