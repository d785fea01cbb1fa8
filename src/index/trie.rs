//! Multi-valued prefix trie with single-substitution lookup.

/// Index of a node within the arena. The root is always node 0.
type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug, Clone)]
struct Node<V> {
    /// Edge byte to child node, in insertion order. DNA keys have at most
    /// five distinct edge bytes per node, so a linear scan beats hashing.
    children: Vec<(u8, NodeId)>,
    values: Vec<V>,
}

impl<V> Node<V> {
    fn new() -> Self {
        Self {
            children: Vec::new(),
            values: Vec::new(),
        }
    }

    fn child(&self, byte: u8) -> Option<NodeId> {
        self.children
            .iter()
            .find(|&&(edge, _)| edge == byte)
            .map(|&(_, id)| id)
    }
}

/// An ordered tree keyed by byte strings, where each key maps to any number
/// of values.
///
/// Lookup has two modes. Exact lookup descends on matching edges only.
/// Single-substitution lookup additionally follows every non-matching edge
/// with the mismatch budget spent for the remainder of the key, except at
/// the very first byte: a key differing from a stored key at position 0 is
/// never found. Fragment searches always re-verify from offset 0 when they
/// extend a hit, so anchoring the first byte avoids combinatorial
/// over-matching.
#[derive(Debug, Clone)]
pub struct Trie<V> {
    nodes: Vec<Node<V>>,
}

impl<V: Clone> Trie<V> {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new()],
        }
    }

    /// Store `value` under `key`, creating edges as needed.
    ///
    /// Keys are multi-valued: inserting the same key twice accumulates both
    /// values.
    pub fn insert(&mut self, key: &[u8], value: V) {
        let mut node = ROOT;
        for &byte in key {
            node = match self.nodes[node].child(byte) {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::new());
                    self.nodes[node].children.push((byte, child));
                    child
                }
            };
        }
        self.nodes[node].values.push(value);
    }

    /// All values stored under `key`, optionally tolerating one substituted
    /// byte at any position except the first.
    ///
    /// An absent key yields an empty vector, never an error.
    pub fn find(&self, key: &[u8], allow_one_mismatch: bool) -> Vec<V> {
        let mut result = Vec::new();
        self.collect(ROOT, key, allow_one_mismatch, &mut result);
        result
    }

    fn collect(&self, node: NodeId, key: &[u8], budget: bool, result: &mut Vec<V>) {
        let Some((&first, rest)) = key.split_first() else {
            // Key consumed; everything terminating here is a match.
            result.extend_from_slice(&self.nodes[node].values);
            return;
        };
        for &(edge, child) in &self.nodes[node].children {
            if edge == first {
                self.collect(child, rest, budget, result);
            } else if budget && node != ROOT {
                // Substitution taken here; the rest of this path must match
                // exactly.
                self.collect(child, rest, false, result);
            }
        }
    }

    /// Number of nodes in the arena, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl<V: Clone> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}
