//! Parsers for genome library files.
//!
//! The on-disk format is a strict FASTA-like text format:
//!
//! ```text
//! >Halorubrum chaoviator
//! ACGTNACGTACGTACGTNNACGT
//! acgtnacgtacgtacgtnnacgt
//! ```
//!
//! - Every record starts with a `>name` header line; the name must be
//!   non-empty.
//! - Sequence lines hold at most 80 bases from `{A, C, G, T, N}`, either
//!   case. Case is preserved as read.
//! - Blank lines are not allowed anywhere, and every record must have at
//!   least one sequence line.
//! - Any malformed line aborts the whole load.
//!
//! Gzip-compressed files (`.gz`) are decompressed transparently.

pub mod genome;

pub use genome::{load_genome_file, load_genomes, ParseError};
