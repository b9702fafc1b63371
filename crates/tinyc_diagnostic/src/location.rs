use std::fmt;

/// A zero-based row and column (in bytes) inside a source.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub row: usize,
    pub col: usize,
}

impl Location {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Pairs this location with the name of the source it points into.
    pub fn in_source(self, source_name: &str) -> SourceLocation<'_> {
        SourceLocation {
            source_name,
            loc: self,
        }
    }
}

/// A [`Location`] that displays as `name:row:col`, one-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation<'a> {
    pub source_name: &'a str,
    pub loc: Location,
}

impl fmt::Display for SourceLocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.source_name,
            self.loc.row + 1,
            self.loc.col + 1
        )
    }
}
