//! Diagnostic generation for the solver.
//!
//! Every query that can find a user error returns a `Vec<Diagnostic<L>>`,
//! where `L` is the location handle the caller attached to the offending node.
//! Messages come from the templates in `tyck_common::diagnostics`; this
//! module renders the types into them and classifies the result into a
//! [`DiagnosticKind`].
//!
//! [`SubtypeFailureReason`] is the structured "why" behind a failed
//! compatibility check, produced by `CompatibilityChecker::explain_failure`.

use crate::types::Type;
use tyck_common::Atom;
use tyck_common::diagnostics::{Diagnostic, diagnostic_codes, get_diagnostic_message};

// =============================================================================
// Diagnostic taxonomy
// =============================================================================

/// The kind of finding a diagnostic reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Incompatible assignment, argument, explicit type argument or property.
    TypeMismatch,
    MissingProperty,
    ExcessProperty,
    /// The same type parameter was inferred as two incompatible types.
    GenericInferenceConflict,
    GenericConstraintViolation,
    TypeArgumentCount,
    ArgumentCount,
    NotCallable,
    /// A referenced alias is not declared. Reported as a warning.
    UnresolvedAlias,
    /// An alias chain loops back on itself or exceeds the resolution depth.
    CircularAlias,
}

impl DiagnosticKind {
    /// The primary code used when this kind is reported.
    pub const fn code(self) -> u32 {
        match self {
            DiagnosticKind::TypeMismatch => diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE,
            DiagnosticKind::MissingProperty => diagnostic_codes::MISSING_PROPERTY,
            DiagnosticKind::ExcessProperty => diagnostic_codes::EXCESS_PROPERTY,
            DiagnosticKind::GenericInferenceConflict => {
                diagnostic_codes::TYPE_PARAMETER_INFERRED_AS_BOTH
            }
            DiagnosticKind::GenericConstraintViolation => {
                diagnostic_codes::TYPE_DOES_NOT_SATISFY_CONSTRAINT
            }
            DiagnosticKind::TypeArgumentCount => diagnostic_codes::EXPECTED_TYPE_ARGUMENTS,
            DiagnosticKind::ArgumentCount => diagnostic_codes::EXPECTED_ARGUMENTS,
            DiagnosticKind::NotCallable => diagnostic_codes::TYPE_HAS_NO_CALL_SIGNATURES,
            DiagnosticKind::UnresolvedAlias => diagnostic_codes::CANNOT_FIND_TYPE,
            DiagnosticKind::CircularAlias => {
                diagnostic_codes::TYPE_ALIAS_CIRCULARLY_REFERENCES_ITSELF
            }
        }
    }

    /// Classify a diagnostic code.
    pub const fn from_code(code: u32) -> Option<Self> {
        Some(match code {
            diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE
            | diagnostic_codes::ARGUMENT_NOT_ASSIGNABLE_TO_PARAMETER
            | diagnostic_codes::EXPLICIT_TYPE_ARGUMENT_MISMATCH
            | diagnostic_codes::PROPERTY_TYPE_MISMATCH => DiagnosticKind::TypeMismatch,
            diagnostic_codes::MISSING_PROPERTY => DiagnosticKind::MissingProperty,
            diagnostic_codes::EXCESS_PROPERTY => DiagnosticKind::ExcessProperty,
            diagnostic_codes::TYPE_PARAMETER_INFERRED_AS_BOTH => {
                DiagnosticKind::GenericInferenceConflict
            }
            diagnostic_codes::TYPE_DOES_NOT_SATISFY_CONSTRAINT => {
                DiagnosticKind::GenericConstraintViolation
            }
            diagnostic_codes::EXPECTED_TYPE_ARGUMENTS => DiagnosticKind::TypeArgumentCount,
            diagnostic_codes::EXPECTED_ARGUMENTS => DiagnosticKind::ArgumentCount,
            diagnostic_codes::TYPE_HAS_NO_CALL_SIGNATURES => DiagnosticKind::NotCallable,
            diagnostic_codes::CANNOT_FIND_TYPE => DiagnosticKind::UnresolvedAlias,
            diagnostic_codes::TYPE_ALIAS_CIRCULARLY_REFERENCES_ITSELF
            | diagnostic_codes::TYPE_ALIAS_RESOLUTION_TOO_DEEP => DiagnosticKind::CircularAlias,
            _ => return None,
        })
    }

    /// Classify a diagnostic.
    pub fn of<L>(diagnostic: &Diagnostic<L>) -> Option<Self> {
        Self::from_code(diagnostic.code)
    }
}

// =============================================================================
// Failure reasons
// =============================================================================

/// Detailed reason for a compatibility failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubtypeFailureReason {
    /// A required property is missing in the source type.
    MissingProperty { property_name: Atom },
    /// Property types are incompatible.
    PropertyTypeMismatch {
        property_name: Atom,
        source_property_type: Type,
        target_property_type: Type,
        nested_reason: Option<Box<SubtypeFailureReason>>,
    },
    /// Optional property cannot satisfy required property.
    OptionalPropertyRequired { property_name: Atom },
    /// Index signature value type mismatch.
    IndexSignatureMismatch {
        source_value_type: Type,
        target_value_type: Type,
    },
    /// Return types are incompatible.
    ReturnTypeMismatch {
        source_return: Type,
        target_return: Type,
    },
    /// Parameter types are not identical.
    ParameterTypeMismatch {
        param_index: usize,
        source_param: Type,
        target_param: Type,
    },
    ParameterCountMismatch {
        source_count: usize,
        target_count: usize,
    },
    /// Tuple element count mismatch.
    TupleElementMismatch {
        source_count: usize,
        target_count: usize,
    },
    /// Tuple element type mismatch (also used for a tuple against an array).
    TupleElementTypeMismatch {
        index: usize,
        source_element: Type,
        target_element: Type,
    },
    ArrayElementMismatch {
        source_element: Type,
        target_element: Type,
    },
    /// No union member accepts the source.
    NoUnionMemberMatches {
        source_type: Type,
        target_union_members: Vec<Type>,
    },
    /// A member of a union source is not accepted by the target.
    UnionMemberMismatch { member: Type, target_type: Type },
    /// The source fails one member of an intersection target.
    IntersectionMemberMismatch { target_member: Type },
    /// Literal type mismatch (e.g., "hello" vs "world" or "hello" vs 42).
    LiteralTypeMismatch {
        source_type: Type,
        target_type: Type,
    },
    /// Primitive mismatch (e.g., string vs number).
    IntrinsicTypeMismatch {
        source_type: Type,
        target_type: Type,
    },
    /// Generic type mismatch (no more specific reason).
    TypeMismatch {
        source_type: Type,
        target_type: Type,
    },
    RecursionLimitExceeded,
}

impl SubtypeFailureReason {
    /// The dotted path of the deepest property mismatch, if any.
    ///
    /// `{user: {userType: "x"}}` against `{user: {userType: number}}` gives
    /// `user.userType`.
    pub fn property_path(&self) -> Option<String> {
        match self {
            SubtypeFailureReason::MissingProperty { property_name }
            | SubtypeFailureReason::OptionalPropertyRequired { property_name } => {
                Some(property_name.to_string())
            }
            SubtypeFailureReason::PropertyTypeMismatch {
                property_name,
                nested_reason,
                ..
            } => match nested_reason.as_deref().and_then(Self::property_path) {
                Some(rest) => Some(format!("{property_name}.{rest}")),
                None => Some(property_name.to_string()),
            },
            _ => None,
        }
    }

    /// Render this reason as a diagnostic for assigning `source` to `target`.
    ///
    /// Property-level reasons produce the property message for the innermost
    /// mismatch; everything else produces the generic assignability message.
    pub fn to_diagnostic<L>(&self, source: &Type, target: &Type, location: L) -> Diagnostic<L> {
        let builder = DiagnosticBuilder::new(location);
        match self {
            SubtypeFailureReason::MissingProperty { property_name } => {
                builder.missing_property(property_name)
            }
            SubtypeFailureReason::PropertyTypeMismatch { .. } => {
                let (path, actual, expected) = self.innermost_property_mismatch();
                builder.property_type_mismatch(&path, &actual, &expected)
            }
            _ => builder.type_not_assignable(source, target),
        }
    }

    fn innermost_property_mismatch(&self) -> (String, Type, Type) {
        let mut path = String::new();
        let mut current = self;
        let mut found = (Type::NEVER, Type::NEVER);
        while let SubtypeFailureReason::PropertyTypeMismatch {
            property_name,
            source_property_type,
            target_property_type,
            nested_reason,
        } = current
        {
            if !path.is_empty() {
                path.push('.');
            }
            path.push_str(property_name);
            found = (source_property_type.clone(), target_property_type.clone());
            match nested_reason.as_deref() {
                Some(next @ SubtypeFailureReason::PropertyTypeMismatch { .. }) => current = next,
                _ => break,
            }
        }
        (path, found.0, found.1)
    }
}

// =============================================================================
// DiagnosticBuilder
// =============================================================================

/// Renders diagnostics for one location handle.
pub struct DiagnosticBuilder<L> {
    location: L,
}

impl<L> DiagnosticBuilder<L> {
    pub fn new(location: L) -> Self {
        DiagnosticBuilder { location }
    }

    fn build(self, code: u32, args: &[&str]) -> Diagnostic<L> {
        match get_diagnostic_message(code) {
            Some(message) => Diagnostic::from_message(self.location, message, args),
            None => Diagnostic::error(self.location, args.join(" "), code),
        }
    }

    /// `Type 'X' is not assignable to type 'Y'`
    pub fn type_not_assignable(self, source: &Type, target: &Type) -> Diagnostic<L> {
        self.build(
            diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE,
            &[&source.to_string(), &target.to_string()],
        )
    }

    pub fn argument_not_assignable(self, arg_type: &Type, param_type: &Type) -> Diagnostic<L> {
        self.build(
            diagnostic_codes::ARGUMENT_NOT_ASSIGNABLE_TO_PARAMETER,
            &[&arg_type.to_string(), &param_type.to_string()],
        )
    }

    /// `expected <P> but got <A>`
    pub fn explicit_type_argument_mismatch(self, expected: &Type, got: &Type) -> Diagnostic<L> {
        self.build(
            diagnostic_codes::EXPLICIT_TYPE_ARGUMENT_MISMATCH,
            &[&expected.to_string(), &got.to_string()],
        )
    }

    pub fn property_type_mismatch(self, path: &str, actual: &Type, expected: &Type) -> Diagnostic<L> {
        self.build(
            diagnostic_codes::PROPERTY_TYPE_MISMATCH,
            &[path, &actual.to_string(), &expected.to_string()],
        )
    }

    pub fn missing_property(self, name: &str) -> Diagnostic<L> {
        self.build(diagnostic_codes::MISSING_PROPERTY, &[name])
    }

    pub fn excess_property(self, name: &str) -> Diagnostic<L> {
        self.build(diagnostic_codes::EXCESS_PROPERTY, &[name])
    }

    pub fn inference_conflict(self, param: &str, first: &Type, second: &Type) -> Diagnostic<L> {
        self.build(
            diagnostic_codes::TYPE_PARAMETER_INFERRED_AS_BOTH,
            &[param, &first.to_string(), &second.to_string()],
        )
    }

    pub fn constraint_violation(self, subject: &str, constraint: &Type) -> Diagnostic<L> {
        self.build(
            diagnostic_codes::TYPE_DOES_NOT_SATISFY_CONSTRAINT,
            &[subject, &constraint.to_string()],
        )
    }

    pub fn type_argument_count(self, expected: usize, got: usize) -> Diagnostic<L> {
        self.build(
            diagnostic_codes::EXPECTED_TYPE_ARGUMENTS,
            &[&expected.to_string(), &got.to_string()],
        )
    }

    pub fn argument_count(self, expected: usize, got: usize) -> Diagnostic<L> {
        self.build(
            diagnostic_codes::EXPECTED_ARGUMENTS,
            &[&expected.to_string(), &got.to_string()],
        )
    }

    pub fn not_callable(self, ty: &Type) -> Diagnostic<L> {
        self.build(diagnostic_codes::TYPE_HAS_NO_CALL_SIGNATURES, &[&ty.to_string()])
    }

    pub fn cannot_find_type(self, name: &str) -> Diagnostic<L> {
        self.build(diagnostic_codes::CANNOT_FIND_TYPE, &[name])
    }

    pub fn circular_alias(self, name: &str) -> Diagnostic<L> {
        self.build(diagnostic_codes::TYPE_ALIAS_CIRCULARLY_REFERENCES_ITSELF, &[name])
    }

    pub fn alias_too_deep(self, name: &str, limit: u32) -> Diagnostic<L> {
        self.build(
            diagnostic_codes::TYPE_ALIAS_RESOLUTION_TOO_DEEP,
            &[name, &limit.to_string()],
        )
    }
}
