use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::core::sequence::Sequence;
use crate::core::types::{FragmentHit, RelatednessResult};
use crate::index::store::FragmentIndex;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The fragment or query is shorter than the requested minimum match
    /// length, or the requested minimum is below the index's configured
    /// search length.
    #[error("invalid search length (index minimum is {index_minimum})")]
    InvalidSearchLength { index_minimum: usize },

    /// The search completed but no occurrence survived length filtering and
    /// deduplication.
    #[error("no matches found")]
    NoMatchFound,
}

/// Safely convert usize to f64 for percentage calculations
///
/// Chunk counts are bounded by genome length and stay well within the f64
/// mantissa for any realistic input.
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// The fragment search engine.
///
/// Borrows a built [`FragmentIndex`]; queries never mutate it, so any number
/// of engines can share one index once construction is done.
pub struct MatchEngine<'a> {
    index: &'a FragmentIndex,
}

impl<'a> MatchEngine<'a> {
    pub fn new(index: &'a FragmentIndex) -> Self {
        Self { index }
    }

    /// Find all library genomes containing `fragment`, exactly or with at
    /// most one substituted base when `exact_match_only` is false.
    ///
    /// Only matches of at least `minimum_length` bases are reported, and
    /// each genome appears at most once, with the longest match it achieved
    /// anywhere. Result order is unspecified; callers that need determinism
    /// must sort.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidSearchLength`] when the fragment is
    /// shorter than `minimum_length` or `minimum_length` is below the
    /// index's search length, and [`SearchError::NoMatchFound`] when no
    /// qualifying match exists.
    pub fn find_fragment(
        &self,
        fragment: &str,
        minimum_length: usize,
        exact_match_only: bool,
    ) -> Result<Vec<FragmentHit>, SearchError> {
        let min_search = self.index.minimum_search_length();
        if fragment.len() < minimum_length || minimum_length < min_search {
            return Err(SearchError::InvalidSearchLength {
                index_minimum: min_search,
            });
        }

        // All comparisons are on raw bytes; slicing the byte view cannot
        // land inside a multibyte character the way &str slicing can.
        let occurrences = self
            .index
            .lookup_prefix(&fragment.as_bytes()[..min_search], !exact_match_only);
        debug!(candidates = occurrences.len(), fragment, "prefix lookup");

        // Per genome name: (achieved length, position). A longer match
        // replaces the stored one; on equal length the first occurrence in
        // trie-result order wins.
        let mut best: HashMap<&str, (usize, usize)> = HashMap::new();
        for occurrence in occurrences {
            let Some(genome) = self.index.get(occurrence.genome) else {
                continue;
            };
            let Some(length) =
                self.match_length(genome, occurrence.offset, fragment, exact_match_only)
            else {
                continue;
            };
            if length < minimum_length {
                continue;
            }
            match best.entry(genome.name()) {
                Entry::Occupied(mut entry) => {
                    if entry.get().0 < length {
                        entry.insert((length, occurrence.offset));
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert((length, occurrence.offset));
                }
            }
        }

        if best.is_empty() {
            return Err(SearchError::NoMatchFound);
        }
        Ok(best
            .into_iter()
            .map(|(name, (length, position))| FragmentHit {
                genome_name: name.to_string(),
                length,
                position,
            })
            .collect())
    }

    /// Verified match length for one candidate occurrence.
    ///
    /// Re-extracts the indexed window and charges the substitution budget if
    /// it differs anywhere from the fragment's prefix; extension past the
    /// prefix may then spend the budget at most once more in total. The
    /// match length is where the first unaffordable mismatch occurs, or
    /// where the fragment or genome runs out.
    ///
    /// `None` when the window cannot be re-extracted, which the index never
    /// produces for its own occurrences.
    fn match_length(
        &self,
        genome: &Sequence,
        position: usize,
        fragment: &str,
        exact_match_only: bool,
    ) -> Option<usize> {
        let min_search = self.index.minimum_search_length();
        let window = genome.extract(position, min_search)?;
        let fragment_bytes = fragment.as_bytes();
        let mut budget_spent =
            exact_match_only || window.as_bytes() != &fragment_bytes[..min_search];

        let genome_bytes = genome.as_bytes();
        let mut i = min_search;
        while i < fragment_bytes.len() && position + i < genome_bytes.len() {
            if genome_bytes[position + i] != fragment_bytes[i] {
                if budget_spent {
                    return Some(i);
                }
                budget_spent = true;
            }
            i += 1;
        }
        Some(i)
    }

    /// Score every library genome by the fraction of `query`'s
    /// non-overlapping chunks of `fragment_match_length` bases found in it,
    /// reporting genomes at or above `match_percent_threshold` percent.
    ///
    /// Results are sorted by percentage descending, ties broken by genome
    /// name ascending.
    ///
    /// Success means at least one chunk matched some genome; the result
    /// vector can still be empty when every accumulated percentage fell
    /// below the threshold. Callers must check emptiness separately.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidSearchLength`] when
    /// `fragment_match_length` is below the index's search length, and
    /// [`SearchError::NoMatchFound`] when no chunk matched any genome.
    pub fn find_related_genomes(
        &self,
        query: &Sequence,
        fragment_match_length: usize,
        exact_match_only: bool,
        match_percent_threshold: f64,
    ) -> Result<Vec<RelatednessResult>, SearchError> {
        let min_search = self.index.minimum_search_length();
        if fragment_match_length < min_search {
            return Err(SearchError::InvalidSearchLength {
                index_minimum: min_search,
            });
        }

        let chunk_count = query.len() / fragment_match_length;
        let share = 100.0 / count_to_f64(chunk_count.max(1));

        let mut totals: HashMap<String, f64> = HashMap::new();
        let mut found = false;
        for chunk_index in 0..chunk_count {
            let Some(chunk) = query.extract(chunk_index * fragment_match_length, fragment_match_length)
            else {
                continue;
            };
            let hits = match self.find_fragment(chunk, fragment_match_length, exact_match_only) {
                Ok(hits) => hits,
                Err(SearchError::NoMatchFound) => continue,
                Err(err) => return Err(err),
            };
            found = true;
            for hit in hits {
                *totals.entry(hit.genome_name).or_insert(0.0) += share;
            }
        }
        debug!(chunk_count, genomes = totals.len(), "chunk scoring done");

        if !found {
            return Err(SearchError::NoMatchFound);
        }

        let mut results: Vec<RelatednessResult> = totals
            .into_iter()
            .filter(|&(_, percent)| percent >= match_percent_threshold)
            .map(|(genome_name, percent_match)| RelatednessResult {
                genome_name,
                percent_match,
            })
            .collect();
        results.sort_by(|a, b| {
            b.percent_match
                .partial_cmp(&a.percent_match)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.genome_name.cmp(&b.genome_name))
        });
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_index() -> FragmentIndex {
        let mut index = FragmentIndex::new(4);
        index.add_genome(Sequence::new(
            "Genome 1",
            "CGGTGTACNACGACTGGGGATAGAATATCTTGACGTCGTACCGGTTGTAGTCGTTCGACCGAAGGGTTCCGCGCCAGTAC",
        ));
        index.add_genome(Sequence::new(
            "Genome 2",
            "TAACAGAGCGGTNATATTGTTACGAATCACGTGCGAGACTTAGAGCCAGAATATGAAGTAGTGATTCAGCAACCAAGCGG",
        ));
        index.add_genome(Sequence::new(
            "Genome 3",
            "TTTTGAGCCAGCGACGCGGCTTGCTTAACGAAGCGGAAGAGTAGGTTGGACACATTNGGCGGCACAGCGCTTTTGAGCCA",
        ));
        index
    }

    fn sorted_names(hits: &[FragmentHit]) -> Vec<&str> {
        let mut names: Vec<&str> = hits.iter().map(|h| h.genome_name.as_str()).collect();
        names.sort_unstable();
        names
    }

    #[test]
    fn test_snip_tolerant_fragment_search() {
        let index = make_test_index();
        let engine = MatchEngine::new(&index);

        // Genome 3 contains GAAG near position 30: one substitution away
        // from GAAT at a non-first position. Genomes 1 and 2 contain GAAT
        // exactly.
        let hits = engine.find_fragment("GAAT", 4, false).unwrap();
        assert_eq!(sorted_names(&hits), vec!["Genome 1", "Genome 2", "Genome 3"]);
        for hit in &hits {
            assert_eq!(hit.length, 4);
        }
    }

    #[test]
    fn test_exact_fragment_search() {
        let index = make_test_index();
        let engine = MatchEngine::new(&index);

        let hits = engine.find_fragment("GAAT", 4, true).unwrap();
        assert_eq!(sorted_names(&hits), vec!["Genome 1", "Genome 2"]);
    }

    #[test]
    fn test_extension_with_shared_budget() {
        let index = make_test_index();
        let engine = MatchEngine::new(&index);

        // GAATACG against Genome 1's GAATAT..: substitution spent at index
        // 5, the mismatch at index 6 stops extension at length 6. Against
        // Genome 2's GAATATG at position 48: substitution at index 5, match
        // at index 6, full length 7.
        let hits = engine.find_fragment("GAATACG", 6, false).unwrap();
        assert_eq!(sorted_names(&hits), vec!["Genome 1", "Genome 2"]);

        let g1 = hits.iter().find(|h| h.genome_name == "Genome 1").unwrap();
        assert_eq!(g1.length, 6);
        assert_eq!(g1.position, 22);

        let g2 = hits.iter().find(|h| h.genome_name == "Genome 2").unwrap();
        assert_eq!(g2.length, 7);
        assert_eq!(g2.position, 48);
    }

    #[test]
    fn test_exact_extension_is_longest_common_prefix() {
        let mut index = FragmentIndex::new(4);
        index.add_genome(Sequence::new("g", "AAGATTACAGG"));
        let engine = MatchEngine::new(&index);

        // genome has GATTACAGG from position 2; fragment diverges at index 7
        let hits = engine.find_fragment("GATTACATT", 4, true).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].length, 7);
        assert_eq!(hits[0].position, 2);
    }

    #[test]
    fn test_one_genome_hit_per_name() {
        let index = make_test_index();
        let engine = MatchEngine::new(&index);

        let hits = engine.find_fragment("GAAT", 4, false).unwrap();
        let names = sorted_names(&hits);
        let mut deduped = names.clone();
        deduped.dedup();
        assert_eq!(names, deduped);
    }

    #[test]
    fn test_fragment_shorter_than_minimum_fails() {
        let index = make_test_index();
        let engine = MatchEngine::new(&index);

        assert_eq!(
            engine.find_fragment("GAA", 4, false),
            Err(SearchError::InvalidSearchLength { index_minimum: 4 })
        );
    }

    #[test]
    fn test_minimum_below_index_search_length_fails() {
        let index = make_test_index();
        let engine = MatchEngine::new(&index);

        assert_eq!(
            engine.find_fragment("GAAT", 3, false),
            Err(SearchError::InvalidSearchLength { index_minimum: 4 })
        );
    }

    #[test]
    fn test_no_match_found() {
        let index = make_test_index();
        let engine = MatchEngine::new(&index);

        // no genome contains CCCC or any single-substitution variant long
        // enough to qualify
        assert_eq!(
            engine.find_fragment("CCCCCCCC", 8, false),
            Err(SearchError::NoMatchFound)
        );
    }

    #[test]
    fn test_case_is_not_normalized() {
        let mut index = FragmentIndex::new(4);
        index.add_genome(Sequence::new("g", "gattaca"));
        let engine = MatchEngine::new(&index);

        assert!(engine.find_fragment("gattaca", 4, false).is_ok());
        // uppercase query differs at every position
        assert_eq!(
            engine.find_fragment("GATTACA", 4, false),
            Err(SearchError::NoMatchFound)
        );
    }

    #[test]
    fn test_multibyte_fragment_is_searched_bytewise() {
        let index = make_test_index();
        let engine = MatchEngine::new(&index);

        // "é" is two bytes, the first of which lands inside the indexed
        // prefix: it behaves as an ordinary substituted byte, and the
        // second byte stops extension. No slicing panic, no special case.
        let hits = engine.find_fragment("GAAé", 4, false).unwrap();
        assert_eq!(sorted_names(&hits), vec!["Genome 1", "Genome 2", "Genome 3"]);
        for hit in &hits {
            assert_eq!(hit.length, 4);
        }

        // in exact mode no indexed window contains the byte at all
        assert_eq!(
            engine.find_fragment("GAAé", 4, true),
            Err(SearchError::NoMatchFound)
        );
    }

    #[test]
    fn test_related_genomes_no_chunk_matches() {
        let index = make_test_index();
        let engine = MatchEngine::new(&index);

        // single chunk CCCCC: every near-miss window dies before length 5
        let query = Sequence::new("hi", "CCCCC");
        assert_eq!(
            engine.find_related_genomes(&query, 5, false, 10.0),
            Err(SearchError::NoMatchFound)
        );
    }

    #[test]
    fn test_related_genomes_fragment_length_below_minimum() {
        let index = make_test_index();
        let engine = MatchEngine::new(&index);

        let query = Sequence::new("q", "ACGTACGTACGT");
        assert_eq!(
            engine.find_related_genomes(&query, 3, false, 0.0),
            Err(SearchError::InvalidSearchLength { index_minimum: 4 })
        );
    }

    fn make_scoring_index() -> FragmentIndex {
        let mut index = FragmentIndex::new(3);
        index.add_genome(Sequence::new("alpha", "AAATTT"));
        index.add_genome(Sequence::new("beta", "AAATTT"));
        index.add_genome(Sequence::new("gamma", "AAACCC"));
        index
    }

    #[test]
    fn test_related_genomes_ordering() {
        let index = make_scoring_index();
        let engine = MatchEngine::new(&index);

        // chunks AAA and TTT: alpha and beta match both (100%), gamma
        // matches only AAA (50%)
        let query = Sequence::new("q", "AAATTT");
        let results = engine.find_related_genomes(&query, 3, true, 0.0).unwrap();

        let summary: Vec<(&str, f64)> = results
            .iter()
            .map(|r| (r.genome_name.as_str(), r.percent_match))
            .collect();
        assert_eq!(
            summary,
            vec![("alpha", 100.0), ("beta", 100.0), ("gamma", 50.0)]
        );
    }

    #[test]
    fn test_related_genomes_threshold_monotonicity() {
        let index = make_scoring_index();
        let engine = MatchEngine::new(&index);
        let query = Sequence::new("q", "AAATTT");

        let loose = engine.find_related_genomes(&query, 3, true, 25.0).unwrap();
        let strict = engine.find_related_genomes(&query, 3, true, 75.0).unwrap();

        assert_eq!(loose.len(), 3);
        assert_eq!(strict.len(), 2);
        for result in &strict {
            assert!(loose.iter().any(|r| r.genome_name == result.genome_name));
        }
    }

    #[test]
    fn test_related_genomes_success_with_empty_results() {
        let index = make_scoring_index();
        let engine = MatchEngine::new(&index);

        // every chunk matched, so the call succeeds, but nothing clears an
        // impossible threshold
        let query = Sequence::new("q", "AAATTT");
        let results = engine.find_related_genomes(&query, 3, true, 101.0).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_related_genomes_query_shorter_than_chunk() {
        let index = make_scoring_index();
        let engine = MatchEngine::new(&index);

        // zero chunks: nothing is examined, so nothing is found
        let query = Sequence::new("q", "AA");
        assert_eq!(
            engine.find_related_genomes(&query, 3, false, 0.0),
            Err(SearchError::NoMatchFound)
        );
    }

    #[test]
    fn test_related_genomes_snip_tolerance() {
        let mut index = FragmentIndex::new(3);
        index.add_genome(Sequence::new("close", "AATTTT"));
        let engine = MatchEngine::new(&index);

        // chunk AAA differs from AAT at a non-first position; chunk TTT is
        // exact
        let query = Sequence::new("q", "AAATTT");
        let approximate = engine.find_related_genomes(&query, 3, false, 0.0).unwrap();
        assert_eq!(approximate.len(), 1);
        assert_eq!(approximate[0].genome_name, "close");
        assert!((approximate[0].percent_match - 100.0).abs() < 1e-9);

        let exact = engine.find_related_genomes(&query, 3, true, 0.0).unwrap();
        assert!((exact[0].percent_match - 50.0).abs() < 1e-9);
    }
}
