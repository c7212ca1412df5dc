//! Function compatibility.
//!
//! - the any-arity function is compatible with every function, both ways;
//! - otherwise the parameter counts must match and every parameter type must
//!   be identical (parameters are invariant);
//! - return types must be compatible in both directions.

use crate::subtype::{CompatibilityChecker, SubtypeResult};
use crate::types::*;

impl CompatibilityChecker<'_> {
    pub(crate) fn check_function_subtype(
        &mut self,
        source: &FunctionShape,
        target: &FunctionShape,
    ) -> SubtypeResult {
        let (FunctionShape::Signature(source), FunctionShape::Signature(target)) = (source, target)
        else {
            return SubtypeResult::True;
        };

        if source.params.len() != target.params.len() {
            return SubtypeResult::False;
        }
        for (s_param, t_param) in source.params.iter().zip(&target.params) {
            if !self.is_identical(s_param, t_param) {
                return SubtypeResult::False;
            }
        }
        self.check_return_subtype(&source.return_type, &target.return_type)
    }

    pub(crate) fn check_return_subtype(&mut self, source: &Type, target: &Type) -> SubtypeResult {
        if self.check_subtype(source, target).is_false() {
            return SubtypeResult::False;
        }
        self.check_subtype(target, source)
    }

    /// Structural identity: equal, or compatible in both directions (which
    /// also equates an alias with its definition).
    pub(crate) fn is_identical(&mut self, a: &Type, b: &Type) -> bool {
        a == b || (self.check_subtype(a, b).is_true() && self.check_subtype(b, a).is_true())
    }
}
