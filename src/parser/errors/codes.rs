//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (undecodable input)
//! - E02xx: Structural errors (tokens the productions could not place)

use std::fmt;

use crate::parser::token::TokenError;

/// Error codes for parser diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors
    // =========================================================================
    /// Characters no lexer rule matches
    E0101,

    // =========================================================================
    // E02xx: Structural errors
    // =========================================================================
    /// Token does not belong where it stands
    E0201,
    /// Second name, surname or arrow where only one is allowed
    E0202,
    /// Blank line before a numbered continuation of a target list
    E0203,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 => "lexical error",
            Self::E0201 | Self::E0202 | Self::E0203 => "structural error",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0201 => "unexpected token",
            Self::E0202 => "duplicate entry",
            Self::E0203 => "blank line inside a person list",
        }
    }

    /// Check if this is a structural error
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::E0201 | Self::E0202 | Self::E0203)
    }
}

impl From<TokenError> for ErrorCode {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Unexpected => Self::E0201,
            TokenError::Duplicate => Self::E0202,
            TokenError::BlankLineInList => Self::E0203,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
