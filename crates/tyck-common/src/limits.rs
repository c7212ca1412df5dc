//! Centralized limits and thresholds for the type engine.
//!
//! Recursion depths and operation counts are kept here so the alias
//! registry and the compatibility checker agree on the same values. `CheckerOptions` starts from these defaults; the solver's
//! `RecursionProfile` presets are built on top of them.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum number of `Alias` hops followed by a single resolution.
///
/// A chain longer than this is almost certainly a cycle the declaration
/// phase failed to reject:
///
/// ```text
/// type A = B;
/// type B = C;
/// type C = A;   // A -> B -> C -> A -> ...
/// ```
pub const MAX_ALIAS_RESOLUTION_DEPTH: u32 = 50;

/// Maximum nesting depth for structural compatibility checks.
///
/// Compatibility walks both type trees in lockstep; a nested object, array
/// or function adds one level. Self-referential aliases
/// (`type List = { next: List }`) are caught by cycle detection long before
/// this depth, so hitting it means the input is pathologically deep.
pub const MAX_COMPATIBILITY_DEPTH: u32 = 100;

// =============================================================================
// Operation Count Limits
// =============================================================================

/// Total enter attempts a single recursion guard accepts before giving up.
pub const MAX_RECURSION_ITERATIONS: u32 = 100_000;

/// Maximum number of entries a guard's visiting set may hold.
pub const MAX_VISITING_SET_SIZE: u32 = 10_000;

// =============================================================================
// Stack Growth
// =============================================================================

/// Remaining stack below which recursive walks allocate a new segment.
pub const STACK_RED_ZONE: usize = 64 * 1024;

/// Size of each stack segment allocated by deep recursive walks.
pub const STACK_GROWTH_SIZE: usize = 1024 * 1024;
