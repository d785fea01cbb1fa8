use crate::core::sequence::Sequence;
use crate::index::trie::Trie;

/// Identity of one indexed window: which library genome it came from and at
/// what offset. Produced once when the genome is added and never revisited,
/// since sequences are immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    /// Position of the genome within the library
    pub genome: usize,

    /// Offset of the window within that genome (0-based)
    pub offset: usize,
}

/// The genome library plus a trie of every fixed-length window.
///
/// Genomes are indexed eagerly as they are added: every window of
/// `min_search_length` bases is inserted into the trie keyed by its content.
/// The window length is fixed for the lifetime of the index; searching with
/// a different prefix length requires building a new index.
#[derive(Debug)]
pub struct FragmentIndex {
    min_search_length: usize,
    genomes: Vec<Sequence>,
    trie: Trie<Occurrence>,
}

impl FragmentIndex {
    /// Create an empty index with the given window length.
    ///
    /// # Panics
    ///
    /// Panics if `min_search_length` is zero.
    pub fn new(min_search_length: usize) -> Self {
        assert!(
            min_search_length > 0,
            "minimum search length must be positive"
        );
        Self {
            min_search_length,
            genomes: Vec::new(),
            trie: Trie::new(),
        }
    }

    /// Append a genome to the library and index every window of
    /// `min_search_length` bases.
    ///
    /// Never rejects a genome: sequences shorter than the window length
    /// contribute no occurrences but stay in the library, so they can still
    /// serve as query genomes later.
    pub fn add_genome(&mut self, genome: Sequence) {
        let index = self.genomes.len();
        let mut offset = 0;
        while let Some(window) = genome.extract(offset, self.min_search_length) {
            self.trie
                .insert(window.as_bytes(), Occurrence { genome: index, offset });
            offset += 1;
        }
        self.genomes.push(genome);
    }

    /// The configured window length.
    pub fn minimum_search_length(&self) -> usize {
        self.min_search_length
    }

    /// Get a library genome by its position.
    pub fn get(&self, index: usize) -> Option<&Sequence> {
        self.genomes.get(index)
    }

    /// All genomes in the library, in insertion order.
    pub fn genomes(&self) -> &[Sequence] {
        &self.genomes
    }

    /// Number of genomes in the library.
    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    /// Check if the library is empty.
    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    /// Occurrences of every indexed window matching `prefix`, optionally
    /// tolerating one substituted base at a non-first position.
    ///
    /// Prefixes are compared byte for byte; a byte outside the indexed
    /// alphabet simply matches nothing.
    pub fn lookup_prefix(&self, prefix: &[u8], allow_one_mismatch: bool) -> Vec<Occurrence> {
        self.trie.find(prefix, allow_one_mismatch)
    }
}
