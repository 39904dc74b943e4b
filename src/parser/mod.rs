//! Lexer and recursive-descent parser for the family notation
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (regex rule table) → Vec<Token>, reclassified in place
//!     ↓
//! Signature detection (rayon) → family header names become surnames
//!     ↓
//! Cursor → Parser productions → Root tree holding TokenIds
//!     ↓
//! Parse { tokens, root } → errors(), node_at()
//! ```

mod cursor;
pub mod errors;
mod lexer;
mod options;
#[allow(clippy::module_inception)]
mod parser;
mod signature;
mod token;
mod token_kind;

pub use cursor::{Cursor, Direction};
pub use errors::{ErrorCode, Severity, SyntaxError, SyntaxErrorBuilder};
pub use lexer::{Lexer, tokenize, tokenize_with};
pub use options::LexOptions;
pub use parser::{Parse, parse, parse_tokens, parse_with};
pub use token::{Token, TokenError, TokenId};
pub use token_kind::{TokenKind, TokenKinds};
