//! Lexical tokens
//!
//! Tokens are produced once by the lexer. Afterwards only their kind,
//! sub-kind and error flag are corrected in place.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};
use thiserror::Error;

use super::token_kind::{TokenKind, TokenKinds};
use crate::base::{Loc, Position};

/// Index of a token in the finalized token array
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenId(pub usize);

impl TokenId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Why a token was flagged during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenError {
    /// Token does not belong where it stands
    #[error("unexpected token")]
    Unexpected,

    /// A second name, surname or arrow where only one is allowed
    #[error("duplicate entry")]
    Duplicate,

    /// Empty line splitting a person list before a numbered continuation
    #[error("blank line inside a person list")]
    BlankLineInList,
}

/// A token with its kind, span and text
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub sub_kind: Option<TokenKind>,
    pub error: Option<TokenError>,
    /// Byte offset
    pub offset: usize,
    /// Length in bytes
    pub len: usize,
    pub line: usize,
    /// Column in chars
    pub column: usize,
    /// Length in chars
    pub char_count: usize,
    pub text: SmolStr,
}

impl Token {
    /// Build a token over `src[offset..offset + len]`.
    pub(crate) fn new(
        kind: TokenKind,
        sub_kind: Option<TokenKind>,
        src: &str,
        offset: usize,
        len: usize,
        line: usize,
        column: usize,
    ) -> Self {
        let text = &src[offset..offset + len];
        Self {
            kind,
            sub_kind,
            error: None,
            offset,
            len,
            line,
            column,
            char_count: text.chars().count(),
            text: SmolStr::new(text),
        }
    }

    /// Byte offset one past the last byte
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Column one past the last char
    pub fn end_column(&self) -> usize {
        self.column + self.char_count
    }

    pub fn range(&self) -> TextRange {
        TextRange::at(TextSize::new(self.offset as u32), TextSize::new(self.len as u32))
    }

    pub fn start_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn end_position(&self) -> Position {
        Position::new(self.line, self.end_column())
    }

    pub fn loc(&self) -> Loc {
        Loc::new(self.start_position(), self.end_position())
    }

    /// Check the kind or the sub-kind
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind || self.sub_kind == Some(kind)
    }

    /// Check whether the kind or the sub-kind belongs to `set`
    pub fn is_any(&self, set: TokenKinds) -> bool {
        set.includes(self.kind) || self.sub_kind.is_some_and(|sub| set.includes(sub))
    }

    pub fn is_alias(&self) -> bool {
        self.sub_kind == Some(TokenKind::Alias)
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_spans_count_chars_and_bytes() {
        let src = "ab Тест";
        let token = Token::new(TokenKind::Name, None, src, 3, 8, 0, 3);

        assert_eq!(token.text(), "Тест");
        assert_eq!(token.end(), 11);
        assert_eq!(token.char_count, 4);
        assert_eq!(token.end_column(), 7);
        assert_eq!(token.range(), TextRange::new(TextSize::new(3), TextSize::new(11)));
        assert_eq!(token.loc(), Loc::from_coords(0, 3, 0, 7));
    }

    #[test]
    fn test_sub_kind_matching() {
        let token = Token::new(
            TokenKind::Punctuation,
            Some(TokenKind::Comma),
            ",",
            0,
            1,
            0,
            0,
        );

        assert!(token.is(TokenKind::Punctuation));
        assert!(token.is(TokenKind::Comma));
        assert!(token.is_any(TokenKinds::COMMA | TokenKinds::SPACE));
        assert!(!token.is_any(TokenKinds::ALIAS));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(TokenError::Unexpected.to_string(), "unexpected token");
        assert_eq!(TokenError::BlankLineInList.to_string(), "blank line inside a person list");
    }
}
