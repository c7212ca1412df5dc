//! Compatibility rules, one file per type family.
//!
//! Each file adds `check_*` methods to `CompatibilityChecker`; the dispatch
//! order lives in `subtype.rs`.

mod functions;
mod intrinsics;
mod literals;
mod objects;
mod tuples;
mod unions;

pub(crate) use objects::declared_property_type;
