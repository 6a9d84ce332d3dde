//! Error codes for the LSA diagnostic system.
//!
//! Codes are organized by phase:
//! - `E0xx` - Lexer errors
//! - `E1xx` - Parser errors
//! - `E2xx` - Validation errors
//! - `W2xx` - Validation warnings

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Lexer Errors (E0xx)
    // =========================================================================
    /// Unrecognized token.
    ///
    /// A run of characters does not match any element of the notation.
    E001,

    // =========================================================================
    // Parser Errors (E1xx)
    // =========================================================================
    /// Missing start marker.
    ///
    /// The scheme does not begin with `Yн`.
    E100,

    /// Missing end marker.
    ///
    /// No `Yк` appears anywhere in the scheme.
    E101,

    /// Missing branch jump.
    ///
    /// A conditional vertex must be followed directly by a conditional jump
    /// operator `↑n`.
    E102,

    /// Empty sub-algorithm.
    ///
    /// The branch entered when a condition is false contains no elements.
    E103,

    /// Conflicting successor.
    ///
    /// Two paths give the same element different successors.
    E104,

    /// Duplicate jump point.
    ///
    /// A jump point index is declared more than once.
    E105,

    // =========================================================================
    // Validation Errors (E2xx)
    // =========================================================================
    /// Duplicate start marker.
    E200,

    /// Duplicate end marker.
    E201,

    /// Unresolved jump.
    ///
    /// A jump operator targets an index with no jump point.
    E202,

    /// Incomplete conditional.
    ///
    /// A conditional vertex is missing one of its branches.
    E203,

    /// Jump point without successor.
    ///
    /// A jump point has no successor and nothing follows it in the scheme.
    E204,

    // =========================================================================
    // Validation Warnings (W2xx)
    // =========================================================================
    /// Inferred jump point successor.
    ///
    /// A jump point received no successor while parsing and was linked to the
    /// element that follows it in the text.
    W200,

    /// Unreachable element.
    ///
    /// No path from the start marker reaches this element.
    W201,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Lexer errors
            ErrorCode::E001 => "E001",
            // Parser errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E105 => "E105",
            // Validation errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            // Validation warnings
            ErrorCode::W200 => "W200",
            ErrorCode::W201 => "W201",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Lexer errors
            ErrorCode::E001 => "unrecognized token",
            // Parser errors
            ErrorCode::E100 => "missing start marker",
            ErrorCode::E101 => "missing end marker",
            ErrorCode::E102 => "missing branch jump",
            ErrorCode::E103 => "empty sub-algorithm",
            ErrorCode::E104 => "conflicting successor",
            ErrorCode::E105 => "duplicate jump point",
            // Validation errors
            ErrorCode::E200 => "duplicate start marker",
            ErrorCode::E201 => "duplicate end marker",
            ErrorCode::E202 => "unresolved jump",
            ErrorCode::E203 => "incomplete conditional",
            ErrorCode::E204 => "jump point without successor",
            // Validation warnings
            ErrorCode::W200 => "inferred jump point successor",
            ErrorCode::W201 => "unreachable element",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E200.to_string(), "E200");
        assert_eq!(ErrorCode::W201.to_string(), "W201");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "unrecognized token");
        assert_eq!(ErrorCode::E101.description(), "missing end marker");
        assert_eq!(ErrorCode::W200.description(), "inferred jump point successor");
    }
}
