//! Token kinds for the family notation
//!
//! A token carries a primary kind and an optional refinement (sub-kind). Both
//! are drawn from the same [`TokenKind`] enum so that one [`TokenKinds`] set
//! can match either of them.

use std::fmt;

use bitflags::bitflags;

/// All token kinds and sub-kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TokenKind {
    // =========================================================================
    // PRIMARY KINDS
    // =========================================================================
    Name = 0,
    Surname,
    /// Word-like text ending in `?`
    Unknown,
    /// Lowercase word (labels, separators)
    Word,
    Num,
    Arrow,
    Punctuation,
    Bracket,
    Comment,
    Space,
    /// A line break followed by at least one empty line
    BlankLines,
    NewLine,
    Invalid,

    // =========================================================================
    // SUB-KINDS
    // =========================================================================
    Alias,
    /// `=` arrow, marks a family definition
    Equal,
    Plus,
    Comma,
    BracketLeft,
    BracketRight,
}

impl TokenKind {
    /// The single-element set containing this kind
    pub const fn set(self) -> TokenKinds {
        TokenKinds::from_bits_retain(1 << self as u32)
    }

    /// Whitespace and garbage that node spans never start or end on
    pub fn is_trivia(self) -> bool {
        TokenKinds::TRIVIA.includes(self)
    }

    /// Check if this is a refinement rather than a primary kind
    pub fn is_sub_kind(self) -> bool {
        self >= Self::Alias
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Surname => "surname",
            Self::Unknown => "unknown",
            Self::Word => "word",
            Self::Num => "num",
            Self::Arrow => "arrow",
            Self::Punctuation => "punctuation",
            Self::Bracket => "bracket",
            Self::Comment => "comment",
            Self::Space => "space",
            Self::BlankLines => "blank lines",
            Self::NewLine => "new line",
            Self::Invalid => "invalid",
            Self::Alias => "alias",
            Self::Equal => "equal",
            Self::Plus => "plus",
            Self::Comma => "comma",
            Self::BracketLeft => "left bracket",
            Self::BracketRight => "right bracket",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// Set of token kinds with O(1) membership.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TokenKinds: u32 {
        const NAME = TokenKind::Name.set().bits();
        const SURNAME = TokenKind::Surname.set().bits();
        const UNKNOWN = TokenKind::Unknown.set().bits();
        const WORD = TokenKind::Word.set().bits();
        const NUM = TokenKind::Num.set().bits();
        const ARROW = TokenKind::Arrow.set().bits();
        const PUNCTUATION = TokenKind::Punctuation.set().bits();
        const BRACKET = TokenKind::Bracket.set().bits();
        const COMMENT = TokenKind::Comment.set().bits();
        const SPACE = TokenKind::Space.set().bits();
        const BLANK_LINES = TokenKind::BlankLines.set().bits();
        const NEW_LINE = TokenKind::NewLine.set().bits();
        const INVALID = TokenKind::Invalid.set().bits();
        const ALIAS = TokenKind::Alias.set().bits();
        const EQUAL = TokenKind::Equal.set().bits();
        const PLUS = TokenKind::Plus.set().bits();
        const COMMA = TokenKind::Comma.set().bits();
        const BRACKET_LEFT = TokenKind::BracketLeft.set().bits();
        const BRACKET_RIGHT = TokenKind::BracketRight.set().bits();
    }
}

impl TokenKinds {
    /// Skipped when looking for the token a node starts or ends on
    pub const TRIVIA: Self = Self::SPACE
        .union(Self::NEW_LINE)
        .union(Self::BLANK_LINES)
        .union(Self::INVALID);

    pub fn includes(self, kind: TokenKind) -> bool {
        self.contains(kind.set())
    }
}

impl From<TokenKind> for TokenKinds {
    fn from(kind: TokenKind) -> Self {
        kind.set()
    }
}
