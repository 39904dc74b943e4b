//! Position tracking for tokens and syntax nodes
//!
//! Stores the source location (line/column) of tokens and tree nodes so that
//! consumers can map an editor position back to the node that covers it.

/// A position in source text (0-indexed, column counted in chars)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// A half-open range `[start, end)` in source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loc {
    pub start: Position,
    pub end: Position,
}

/// How two spans relate to each other.
///
/// Variants are declared in ascending order: everything from `ByStart` up
/// counts as an overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverlapType {
    /// `self` ends at or before the start of `other`
    Before,
    /// `self` starts at or after the end of `other`
    After,
    /// `self` overlaps the tail of `other`, sticking out on the right
    ByStart,
    /// `self` overlaps the head of `other`, sticking out on the left
    ByEnd,
    /// `self` lies within `other`
    Inner,
    /// `self` contains `other`
    Outer,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Loc {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a span from line/column coordinates
    pub fn from_coords(
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check if a position falls within this span (end excluded)
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position < self.end
    }

    /// Classify how `self` sits relative to `other`.
    pub fn overlap_type(&self, other: &Loc) -> OverlapType {
        if self.end <= other.start {
            return OverlapType::Before;
        }

        if other.end <= self.start {
            return OverlapType::After;
        }

        if self.start <= other.start && self.end >= other.end {
            return OverlapType::Outer;
        }

        if self.start >= other.start && self.end <= other.end {
            return OverlapType::Inner;
        }

        if self.start < other.start {
            OverlapType::ByEnd
        } else {
            OverlapType::ByStart
        }
    }

    /// True when the spans share at least one position. Touching spans do not overlap.
    pub fn overlaps(&self, other: &Loc) -> bool {
        self.overlap_type(other) >= OverlapType::ByStart
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering_is_lexicographic() {
        assert!(Position::new(0, 10) < Position::new(1, 0));
        assert!(Position::new(2, 3) < Position::new(2, 4));
        assert_eq!(Position::new(2, 3), Position::new(2, 3));
    }

    #[test]
    fn test_overlap_classification() {
        let a = Loc::from_coords(0, 0, 0, 5);

        assert_eq!(a.overlap_type(&Loc::from_coords(0, 5, 0, 9)), OverlapType::Before);
        assert_eq!(a.overlap_type(&Loc::from_coords(0, 0, 0, 5)), OverlapType::Outer);
        assert_eq!(a.overlap_type(&Loc::from_coords(0, 1, 0, 3)), OverlapType::Outer);
        assert_eq!(a.overlap_type(&Loc::from_coords(0, 0, 1, 0)), OverlapType::Inner);
        assert_eq!(a.overlap_type(&Loc::from_coords(0, 3, 0, 8)), OverlapType::ByEnd);

        let b = Loc::from_coords(0, 3, 0, 8);
        assert_eq!(b.overlap_type(&a), OverlapType::ByStart);
        assert_eq!(Loc::from_coords(0, 6, 0, 9).overlap_type(&a), OverlapType::After);
    }

    #[test]
    fn test_touching_spans_do_not_overlap() {
        let a = Loc::from_coords(1, 0, 1, 4);
        let b = Loc::from_coords(1, 4, 2, 0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }
}
