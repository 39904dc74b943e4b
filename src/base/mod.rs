//! Foundation types for the fml toolchain.
//!
//! This module provides the source location primitives used throughout the crate:
//! - [`Position`] - a line/column point
//! - [`Loc`] - a half-open span between two positions
//! - [`OverlapType`] - six-way classification of two spans
//! - [`TextRange`], [`TextSize`] - byte ranges, re-exported from `text-size`
//!
//! This module has NO dependencies on other fml modules.

mod position;

pub use position::{Loc, OverlapType, Position};

// Re-export text-size types for convenience
pub use text_size;
pub use text_size::{TextRange, TextSize};
