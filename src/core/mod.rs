//! Core data types for DNA fragment search.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Sequence`]: A named, immutable DNA sequence with bounded substring extraction
//! - [`FragmentHit`]: Per-genome result of a single fragment search
//! - [`RelatednessResult`]: Aggregated relatedness score for one library genome
//!
//! ## Case Handling
//!
//! Sequences store their bases exactly as loaded. The index and the match
//! engine compare bytes without normalization, so `a` and `A` are distinct
//! bases. Libraries and queries must agree on case to match.
//!
//! [`Sequence`]: sequence::Sequence
//! [`FragmentHit`]: types::FragmentHit
//! [`RelatednessResult`]: types::RelatednessResult

pub mod sequence;
pub mod types;
