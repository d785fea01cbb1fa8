use serde::{Deserialize, Serialize};

/// Result of searching the library for a single DNA fragment.
///
/// One `FragmentHit` is produced per matching genome: `length` is the
/// longest verified match found anywhere in that genome, and `position` the
/// offset of the occurrence that achieved it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentHit {
    /// Name of the library genome containing the match
    pub genome_name: String,

    /// Number of bases that matched, counting at most one substitution
    pub length: usize,

    /// Offset of the matched window within the genome (0-based)
    pub position: usize,
}

/// Aggregated relatedness score for one library genome.
///
/// `percent_match` is the percentage of the query genome's non-overlapping
/// chunks that found a match (exact or single-substitution) in this genome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatednessResult {
    /// Name of the library genome
    pub genome_name: String,

    /// Percentage of query chunks matched, in `[0, 100]`
    pub percent_match: f64,
}
