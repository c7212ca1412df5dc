use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    pub const TYPE_IS_NOT_ASSIGNABLE: u32 = 2001;
    pub const ARGUMENT_NOT_ASSIGNABLE_TO_PARAMETER: u32 = 2002;
    pub const EXPLICIT_TYPE_ARGUMENT_MISMATCH: u32 = 2003;
    pub const PROPERTY_TYPE_MISMATCH: u32 = 2004;
    pub const MISSING_PROPERTY: u32 = 2010;
    pub const EXCESS_PROPERTY: u32 = 2011;
    pub const TYPE_PARAMETER_INFERRED_AS_BOTH: u32 = 2020;
    pub const TYPE_DOES_NOT_SATISFY_CONSTRAINT: u32 = 2021;
    pub const EXPECTED_TYPE_ARGUMENTS: u32 = 2022;
    pub const EXPECTED_ARGUMENTS: u32 = 2023;
    pub const TYPE_HAS_NO_CALL_SIGNATURES: u32 = 2024;
    pub const CANNOT_FIND_TYPE: u32 = 2030;
    pub const TYPE_ALIAS_CIRCULARLY_REFERENCES_ITSELF: u32 = 2031;
    pub const TYPE_ALIAS_RESOLUTION_TOO_DEEP: u32 = 2032;
}

pub mod diagnostic_messages {
    pub const TYPE_IS_NOT_ASSIGNABLE: &str = "Type '{0}' is not assignable to type '{1}'";
    pub const ARGUMENT_NOT_ASSIGNABLE_TO_PARAMETER: &str =
        "Argument of type '{0}' is not assignable to parameter of type '{1}'";
    pub const EXPLICIT_TYPE_ARGUMENT_MISMATCH: &str = "expected {0} but got {1}";
    pub const PROPERTY_TYPE_MISMATCH: &str = "Property '{0}' has type {1} but expected {2}";
    pub const MISSING_PROPERTY: &str = "Missing property '{0}'";
    pub const EXCESS_PROPERTY: &str = "Excess property '{0}'";
    pub const TYPE_PARAMETER_INFERRED_AS_BOTH: &str =
        "Type parameter {0} inferred as both {1} and {2}";
    pub const TYPE_DOES_NOT_SATISFY_CONSTRAINT: &str = "{0} does not satisfy constraint {1}";
    pub const EXPECTED_TYPE_ARGUMENTS: &str = "Expected {0} type argument(s) but got {1}";
    pub const EXPECTED_ARGUMENTS: &str = "Expected {0} argument(s) but got {1}";
    pub const TYPE_HAS_NO_CALL_SIGNATURES: &str = "Type '{0}' has no call signatures";
    pub const CANNOT_FIND_TYPE: &str = "Cannot find type '{0}'";
    pub const TYPE_ALIAS_CIRCULARLY_REFERENCES_ITSELF: &str =
        "Type alias '{0}' circularly references itself";
    pub const TYPE_ALIAS_RESOLUTION_TOO_DEEP: &str =
        "Type alias '{0}' exceeds the maximum resolution depth of {1}";
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_IS_NOT_ASSIGNABLE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_IS_NOT_ASSIGNABLE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::ARGUMENT_NOT_ASSIGNABLE_TO_PARAMETER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::ARGUMENT_NOT_ASSIGNABLE_TO_PARAMETER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPLICIT_TYPE_ARGUMENT_MISMATCH,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPLICIT_TYPE_ARGUMENT_MISMATCH,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PROPERTY_TYPE_MISMATCH,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PROPERTY_TYPE_MISMATCH,
    },
    DiagnosticMessage {
        code: diagnostic_codes::MISSING_PROPERTY,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::MISSING_PROPERTY,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXCESS_PROPERTY,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXCESS_PROPERTY,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_PARAMETER_INFERRED_AS_BOTH,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_PARAMETER_INFERRED_AS_BOTH,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_DOES_NOT_SATISFY_CONSTRAINT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_DOES_NOT_SATISFY_CONSTRAINT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_TYPE_ARGUMENTS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPECTED_TYPE_ARGUMENTS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_ARGUMENTS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPECTED_ARGUMENTS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_HAS_NO_CALL_SIGNATURES,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_HAS_NO_CALL_SIGNATURES,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CANNOT_FIND_TYPE,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::CANNOT_FIND_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_ALIAS_CIRCULARLY_REFERENCES_ITSELF,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_ALIAS_CIRCULARLY_REFERENCES_ITSELF,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_ALIAS_RESOLUTION_TOO_DEEP,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_ALIAS_RESOLUTION_TOO_DEEP,
    },
];
