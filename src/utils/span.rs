//! Source location tracking

use serde::{Deserialize, Serialize};
use std::fmt;

/// A range in the source text, as reported by the parser.
///
/// Serialized as `[startLine, startColumn, endLine, endColumn]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 4]", into = "[u32; 4]")]
pub struct SourceRange {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl SourceRange {
    /// Create a new range
    pub fn new(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// Create a dummy range (builtins, tests)
    pub fn dummy() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Merge two ranges into the smallest range covering both
    pub fn merge(&self, other: &SourceRange) -> SourceRange {
        let (start_line, start_column) = (self.start_line, self.start_column)
            .min((other.start_line, other.start_column));
        let (end_line, end_column) =
            (self.end_line, self.end_column).max((other.end_line, other.end_column));
        SourceRange::new(start_line, start_column, end_line, end_column)
    }
}

impl Default for SourceRange {
    fn default() -> Self {
        Self::dummy()
    }
}

impl From<[u32; 4]> for SourceRange {
    fn from(value: [u32; 4]) -> Self {
        Self::new(value[0], value[1], value[2], value[3])
    }
}

impl From<SourceRange> for [u32; 4] {
    fn from(range: SourceRange) -> Self {
        [
            range.start_line,
            range.start_column,
            range.end_line,
            range.end_column,
        ]
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge() {
        let a = SourceRange::new(1, 4, 1, 9);
        let b = SourceRange::new(1, 2, 3, 1);
        assert_eq!(a.merge(&b), SourceRange::new(1, 2, 3, 1));
    }

    #[test]
    fn test_array_form() {
        let range: SourceRange = serde_json::from_str("[2, 3, 4, 5]").unwrap();
        assert_eq!(range, SourceRange::new(2, 3, 4, 5));
        assert_eq!(serde_json::to_string(&range).unwrap(), "[2,3,4,5]");
    }
}
