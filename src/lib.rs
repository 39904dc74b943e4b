//! # fml-base
//!
//! Lexer and parser for a plaintext genealogical notation: families,
//! relations between persons, and their children.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! syntax    → Tree types (Root, Family, Relation, Person), position lookup
//!   ↓
//! parser    → Regex lexer, signature detection, cursor, recursive descent
//!   ↓
//! base      → Primitives (Position, Loc, OverlapType, TextRange)
//! ```
//!
//! ## Example
//!
//! ```
//! let parse = fml::parse("Smith\n\nAnn + Bob = Cid\n");
//! let family = &parse.root.families[0];
//!
//! assert_eq!(family.name.and_then(|id| parse.text(id)), Some("Smith"));
//! assert!(family.relations[0].is_family_def);
//! assert!(parse.ok());
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → syntax)
// ============================================================================

/// Foundation types: Position, Loc, TextRange
pub mod base;

/// Parser: rule-based lexer, cursor, recursive-descent productions
pub mod parser;

/// Syntax: tree types and position queries
pub mod syntax;

// Re-export the entry points
pub use parser::{
    LexOptions, Parse, Token, TokenKind, parse, parse_tokens, parse_with, tokenize, tokenize_with,
};

// Re-export foundation types
pub use base::{Loc, OverlapType, Position, TextRange, TextSize};
