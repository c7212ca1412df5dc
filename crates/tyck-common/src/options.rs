//! Checker options.
//!
//! Options are plain data. Callers usually build them from the `checker`
//! section of a project configuration file; every field has a default so a
//! partial JSON object is accepted.

use serde::{Deserialize, Serialize};

use crate::limits::{MAX_ALIAS_RESOLUTION_DEPTH, MAX_COMPATIBILITY_DEPTH};

/// Options controlling alias resolution, compatibility and literal checks.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckerOptions {
    /// Maximum number of alias hops followed by one resolution.
    pub max_alias_resolution_depth: u32,
    /// Maximum nesting depth of a structural compatibility check.
    pub max_compatibility_depth: u32,
    /// Report properties of fresh object literals the target does not declare.
    pub excess_property_checks: bool,
    /// Widen a type parameter to the shared primitive when it is inferred from
    /// two different literals of the same base (`f(1, 2)` binds `T = number`).
    /// When disabled, the second literal is reported as an inference conflict.
    pub widen_inferred_literals: bool,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        CheckerOptions {
            max_alias_resolution_depth: MAX_ALIAS_RESOLUTION_DEPTH,
            max_compatibility_depth: MAX_COMPATIBILITY_DEPTH,
            excess_property_checks: true,
            widen_inferred_literals: true,
        }
    }
}

impl CheckerOptions {
    /// Parse options from a JSON object. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Builder: toggle excess property checks.
    #[must_use]
    pub fn with_excess_property_checks(mut self, enabled: bool) -> Self {
        self.excess_property_checks = enabled;
        self
    }

    /// Builder: toggle widening of repeated literal inferences.
    #[must_use]
    pub fn with_widen_inferred_literals(mut self, enabled: bool) -> Self {
        self.widen_inferred_literals = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options =
            CheckerOptions::from_json(r#"{ "excessPropertyChecks": false }"#).expect("valid json");
        assert!(!options.excess_property_checks);
        assert!(options.widen_inferred_literals);
        assert_eq!(options.max_alias_resolution_depth, MAX_ALIAS_RESOLUTION_DEPTH);
        assert_eq!(options.max_compatibility_depth, MAX_COMPATIBILITY_DEPTH);
    }

    #[test]
    fn test_empty_json_is_default() {
        let options = CheckerOptions::from_json("{}").expect("valid json");
        assert_eq!(options, CheckerOptions::default());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(CheckerOptions::from_json(r#"{ "maxAliasResolutionDepth": "deep" }"#).is_err());
    }
}
