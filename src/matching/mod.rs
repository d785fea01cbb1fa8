//! Fragment search engine built on the fragment index.
//!
//! - [`MatchEngine`]: Entry point for both search operations
//! - [`SearchError`]: Precondition and no-match failures
//!
//! ## Search Algorithm
//!
//! `find_fragment` runs in three phases:
//!
//! 1. **Prefix lookup**: the fragment's first `min_search_length` bases are
//!    looked up in the trie, tolerating one substitution unless exact
//!    matching was requested.
//! 2. **Extension**: each candidate occurrence is re-verified against its
//!    genome and extended base by base. A single substitution budget is
//!    shared across the prefix and the extension: a prefix that already
//!    differs leaves nothing for the extension.
//! 3. **Deduplication**: per genome, only the longest verified match is
//!    kept (the first occurrence seen wins ties).
//!
//! `find_related_genomes` slices a query genome into non-overlapping chunks
//! and scores each library genome by the percentage of chunks that
//! `find_fragment` locates in it.
//!
//! ## Example
//!
//! ```rust
//! use frag_solver::{FragmentIndex, MatchEngine, Sequence};
//!
//! let mut index = FragmentIndex::new(4);
//! index.add_genome(Sequence::new("g1", "ACGTGATTACAGG"));
//!
//! let engine = MatchEngine::new(&index);
//! let hits = engine.find_fragment("GATTACA", 7, false).unwrap();
//! assert_eq!(hits[0].genome_name, "g1");
//! assert_eq!(hits[0].length, 7);
//! ```

pub mod engine;

pub use engine::{MatchEngine, SearchError};
