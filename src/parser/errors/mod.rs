//! Parser diagnostics
//!
//! Flagged tokens are turned into reportable errors here:
//! - Categorized error codes for filtering and documentation
//! - Severity levels
//! - Hints for common mistakes

mod codes;
mod error;

pub use codes::ErrorCode;
pub use error::{Severity, SyntaxError, SyntaxErrorBuilder};

#[cfg(test)]
mod tests;
