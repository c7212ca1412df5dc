//! Common types and utilities for the tyck type engine.
//!
//! This crate provides foundational types used across all tyck crates:
//! - Cheaply clonable names (`Atom`)
//! - Engine limits and thresholds
//! - Diagnostic categories, codes, message templates and rendering
//! - Checker options (`CheckerOptions`)

// Shared names for properties, aliases and type parameters
pub mod atom;
pub use atom::Atom;

// Centralized limits and thresholds
pub mod limits;

// Diagnostic data and rendering
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticMessage, format_message};

// Checker options
pub mod options;
pub use options::CheckerOptions;
