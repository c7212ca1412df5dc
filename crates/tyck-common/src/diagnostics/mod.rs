//! Diagnostic types and message lookup for the type engine.
//!
//! Message templates live in `data.rs`, keyed by numeric code. Templates use
//! `{0}`, `{1}`, ... placeholders filled in by [`format_message`].
//!
//! A diagnostic carries whatever location handle the caller attached to the
//! offending node. The engine never inspects it; it only clones it onto each
//! finding.

use serde::Serialize;

mod data;
pub use data::{DIAGNOSTIC_MESSAGES, diagnostic_codes, diagnostic_messages};

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// A type-checking finding attached to a caller-supplied location handle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic<L> {
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
    /// Opaque handle the caller attached to the offending node.
    pub location: L,
}

impl<L> Diagnostic<L> {
    /// Create a new error diagnostic.
    #[must_use]
    pub fn error(location: L, message: impl Into<String>, code: u32) -> Self {
        Self {
            message_text: message.into(),
            category: DiagnosticCategory::Error,
            code,
            location,
        }
    }

    /// Create a new warning diagnostic.
    #[must_use]
    pub fn warning(location: L, message: impl Into<String>, code: u32) -> Self {
        Self {
            message_text: message.into(),
            category: DiagnosticCategory::Warning,
            code,
            location,
        }
    }

    /// Create a diagnostic from a message definition, filling its placeholders.
    #[must_use]
    pub fn from_message(location: L, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            message_text: format_message(message.message, args),
            category: message.category,
            code: message.code,
            location,
        }
    }

    /// Replace the location handle, keeping everything else.
    pub fn map_location<M>(self, f: impl FnOnce(L) -> M) -> Diagnostic<M> {
        Diagnostic {
            message_text: self.message_text,
            category: self.category,
            code: self.code,
            location: f(self.location),
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
///
/// The template is scanned once, so placeholder-like text inside an argument
/// is copied verbatim. Placeholders without a matching argument are kept.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let arg = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            args.get(index).map(|arg| (*arg, close))
        });
        match arg {
            Some((arg, close)) => {
                result.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                result.push('{');
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

/// Get the category for a diagnostic code.
#[must_use]
pub fn get_diagnostic_category(code: u32) -> Option<DiagnosticCategory> {
    get_diagnostic_message(code).map(|m| m.category)
}
