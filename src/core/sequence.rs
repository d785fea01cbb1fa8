use serde::{Deserialize, Serialize};

/// A named, immutable DNA sequence.
///
/// Bases are drawn from `{A, C, G, T, N}` in either case and stored exactly
/// as provided. Once constructed a sequence is never mutated; the fragment
/// index relies on this when it stores `(sequence, offset)` occurrences
/// without revalidating them later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    name: String,
    bases: String,
}

impl Sequence {
    pub fn new(name: impl Into<String>, bases: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bases: bases.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of bases in the sequence.
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// The substring of `length` bases starting at `position` (0-based).
    ///
    /// Returns `None` exactly when `position + length` runs past the end of
    /// the sequence; any in-bounds request succeeds, including zero-length
    /// extractions.
    pub fn extract(&self, position: usize, length: usize) -> Option<&str> {
        if position + length > self.bases.len() {
            return None;
        }
        Some(&self.bases[position..position + length])
    }

    /// Raw bases as bytes, for byte-at-a-time comparison during match
    /// extension.
    pub fn as_bytes(&self) -> &[u8] {
        self.bases.as_bytes()
    }
}
