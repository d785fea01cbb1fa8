//! # frag-solver
//!
//! A library for indexing genome sequences and searching DNA fragments with
//! single-substitution (SNiP) tolerance.
//!
//! A SNiP (single-nucleotide polymorphism) is a one-base substitution, the
//! most common kind of variation between related genomes. Exact substring
//! search misses it; `frag-solver` finds fragments that differ from the
//! library by at most one substituted base, and scores whole genomes by how
//! many of their chunks appear in each library genome.
//!
//! ## Features
//!
//! - **Prefix trie index**: Every fixed-length window of every genome is
//!   indexed at load time
//! - **SNiP-tolerant lookup**: One substitution anywhere except the first
//!   indexed base, shared between the prefix and the extension phase
//! - **Per-genome deduplication**: Each search reports one hit per genome,
//!   the longest it achieved
//! - **Relatedness scoring**: Percentage of a query genome's chunks found
//!   in each library genome, ranked deterministically
//!
//! ## Example
//!
//! ```rust
//! use frag_solver::{FragmentIndex, MatchEngine, Sequence};
//!
//! let mut index = FragmentIndex::new(4);
//! index.add_genome(Sequence::new("Genome 1", "ACGTGATTACAGGACCC"));
//!
//! let engine = MatchEngine::new(&index);
//!
//! // GATTATA is one substitution away from the indexed GATTACA
//! let hits = engine.find_fragment("GATTATA", 4, false).unwrap();
//! assert_eq!(hits[0].genome_name, "Genome 1");
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Sequence and result types
//! - [`index`]: The prefix trie and the fragment index built on it
//! - [`matching`]: The search engine and its two query operations
//! - [`parsing`]: Strict genome-file loader
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod index;
pub mod matching;
pub mod parsing;

// Re-export commonly used types for convenience
pub use crate::core::sequence::Sequence;
pub use crate::core::types::{FragmentHit, RelatednessResult};
pub use crate::index::store::FragmentIndex;
pub use crate::matching::engine::{MatchEngine, SearchError};
