//! Core types for the encoder.

/// A backward reference into already-seen block bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Match {
    /// Bytes back from the copy target, at least 1.
    pub distance: usize,
    /// Number of bytes copied.
    pub length: usize,
}

impl Match {
    /// Creates a new match.
    #[must_use]
    pub const fn new(distance: usize, length: usize) -> Self {
        Self { distance, length }
    }

    /// Returns `true` if the copy reads bytes it is still producing.
    #[must_use]
    pub const fn overlaps(self) -> bool {
        self.distance < self.length
    }
}

/// One match finder step: a literal run, optionally followed by a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Step {
    /// Bytes to emit literally before the match.
    pub literal_len: usize,
    /// Match starting right after the literal run.
    pub found: Option<Match>,
}

impl Step {
    /// Returns the number of source bytes this step consumes.
    #[must_use]
    pub fn consumed(self) -> usize {
        self.literal_len + self.found.map_or(0, |m| m.length)
    }
}
