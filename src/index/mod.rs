//! Fragment index storage: the prefix trie and the genome library built on it.
//!
//! - [`Trie`]: multi-valued prefix trie with exact and single-substitution
//!   lookup
//! - [`FragmentIndex`]: owns the genome library and a trie mapping every
//!   fixed-length window to its occurrences
//!
//! The trie is stored as a node arena indexed by integers rather than a
//! pointer-linked tree, so child links are plain indices and nodes are
//! dropped all at once with the arena.
//!
//! [`Trie`]: trie::Trie
//! [`FragmentIndex`]: store::FragmentIndex

pub mod store;
pub mod trie;
