//! Syntax diagnostics
//!
//! The parser never stops on a problem; it flags the offending token. A
//! [`SyntaxError`] is the reportable form of such a flag, or of an
//! [`Invalid`](crate::parser::TokenKind::Invalid) token.

use text_size::{TextRange, TextSize};

use super::codes::ErrorCode;
use crate::base::Loc;
use crate::parser::token::{Token, TokenId};
use crate::parser::token_kind::TokenKind;

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// The token could not be placed in the tree
    #[default]
    Error,
    /// The tree is complete but the input is suspicious
    Warning,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// A syntax error tied to one token
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyntaxError {
    /// Human-readable error message
    pub message: String,
    /// Byte range
    pub range: TextRange,
    /// Line/column span
    pub loc: Loc,
    pub code: ErrorCode,
    pub severity: Severity,
    /// Optional suggestion for fixing the error
    pub hint: Option<String>,
    /// Token the error was raised on
    pub token: Option<TokenId>,
}

impl SyntaxError {
    /// Create a builder for more complex error construction
    pub fn builder(code: ErrorCode) -> SyntaxErrorBuilder {
        SyntaxErrorBuilder::new(code)
    }

    /// Report a flagged or invalid token, `None` for a clean one.
    pub fn from_token(id: TokenId, token: &Token) -> Option<Self> {
        let builder = match token.error {
            Some(error) => Self::builder(error.into()),
            None if token.kind == TokenKind::Invalid => Self::builder(ErrorCode::E0101)
                .message(format!("invalid character sequence `{}`", token.text))
                .severity(Severity::Warning),
            None => return None,
        };

        let builder = match builder.code {
            ErrorCode::E0202 => builder.hint(format!("remove the second `{}`", token.text)),
            ErrorCode::E0203 => builder
                .hint("remove the empty line before the numbered continuation")
                .severity(Severity::Warning),
            _ => builder,
        };

        Some(builder.token(id, token).build())
    }

    /// Format the error for display
    pub fn format(&self) -> String {
        let mut result = format!(
            "{}:{}: {}: {}",
            self.loc.start.line + 1,
            self.loc.start.column + 1,
            self.code,
            self.message
        );
        if let Some(hint) = &self.hint {
            result.push_str(&format!("\n  hint: {}", hint));
        }
        result
    }
}

/// Builder for creating syntax errors
pub struct SyntaxErrorBuilder {
    code: ErrorCode,
    message: Option<String>,
    range: Option<TextRange>,
    loc: Loc,
    severity: Severity,
    hint: Option<String>,
    token: Option<TokenId>,
}

impl SyntaxErrorBuilder {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: None,
            range: None,
            loc: Loc::default(),
            severity: Severity::Error,
            hint: None,
            token: None,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Take range and span from a token
    pub fn token(mut self, id: TokenId, token: &Token) -> Self {
        self.range = Some(token.range());
        self.loc = token.loc();
        self.token = Some(id);
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Build the syntax error, falling back to the code's default message
    pub fn build(self) -> SyntaxError {
        SyntaxError {
            message: self
                .message
                .unwrap_or_else(|| self.code.default_message().to_string()),
            range: self
                .range
                .unwrap_or_else(|| TextRange::empty(TextSize::new(0))),
            loc: self.loc,
            code: self.code,
            severity: self.severity,
            hint: self.hint,
            token: self.token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::token::TokenError;

    fn token(kind: TokenKind, src: &str) -> Token {
        Token::new(kind, None, src, 0, src.len(), 2, 4)
    }

    #[test]
    fn test_builder_falls_back_to_code_message() {
        let err = SyntaxError::builder(ErrorCode::E0202).build();

        assert_eq!(err.message, ErrorCode::E0202.default_message());
        assert_eq!(err.range, TextRange::empty(TextSize::new(0)));
        assert_eq!(err.severity, Severity::Error);
        assert!(err.token.is_none());
    }

    #[test]
    fn test_from_flagged_token() {
        let mut tok = token(TokenKind::Surname, "Smith");
        tok.error = Some(TokenError::Duplicate);

        let err = SyntaxError::from_token(TokenId(7), &tok);

        assert!(err.as_ref().is_some_and(|e| e.code == ErrorCode::E0202));
        assert!(err.as_ref().is_some_and(|e| e.token == Some(TokenId(7))));
        assert!(err.as_ref().is_some_and(|e| e.loc == Loc::from_coords(2, 4, 2, 9)));
        assert!(err.is_some_and(|e| e.hint.is_some_and(|h| h.contains("Smith"))));
    }

    #[test]
    fn test_from_invalid_token() {
        let err = SyntaxError::from_token(TokenId(0), &token(TokenKind::Invalid, "@%"));

        assert!(err.as_ref().is_some_and(|e| e.code == ErrorCode::E0101));
        assert!(err.is_some_and(|e| e.severity == Severity::Warning && e.message.contains("@%")));
    }

    #[test]
    fn test_clean_token_has_no_error() {
        assert_eq!(SyntaxError::from_token(TokenId(0), &token(TokenKind::Name, "Ann")), None);
    }

    #[test]
    fn test_format_is_one_based() {
        let mut tok = token(TokenKind::Arrow, "=");
        tok.error = Some(TokenError::Duplicate);

        let formatted = SyntaxError::from_token(TokenId(3), &tok).map(|e| e.format());

        assert_eq!(
            formatted.as_deref(),
            Some("3:5: E0202: duplicate entry\n  hint: remove the second `=`")
        );
    }
}
