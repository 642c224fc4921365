//! The Verkle trie insertion engine. Insertion returns its child's
//! commitment-field delta up the call stack instead of threading a mutable
//! path of node references through the recursion — equivalent, and a
//! natural fit for Rust's ownership rules.

use crate::crs::Crs;
use crate::error::Error;
use crate::fields::Fr;
use crate::trie::node::{InnerNode, Node, SuffixTree};

fn stem_of(key: &[u8; 32]) -> [u8; 31] {
    let mut stem = [0u8; 31];
    stem.copy_from_slice(&key[..31]);
    stem
}

/// Splits a leaf whose stem differs from the stem being inserted into a
/// chain of intermediate inner nodes for every shared prefix byte beyond
/// `depth`, attaching both leaves where the stems first diverge.
///
/// Every node built here starts at the identity commitment, so a
/// from-scratch sparse commit is exactly the delta-from-zero the
/// reference implementation applies while walking back up the freshly
/// extended path (see `InnerNode::recompute_commitment_from_scratch`).
fn build_split_chain(
    crs: &Crs,
    old_leaf: SuffixTree,
    new_stem: &[u8; 31],
    depth: usize,
    new_suffix: u8,
    new_value: [u8; 32],
) -> InnerNode {
    let old_byte = old_leaf.stem[depth];
    let new_byte = new_stem[depth];

    let mut inner = InnerNode::empty();
    if old_byte == new_byte {
        let child = build_split_chain(crs, old_leaf, new_stem, depth + 1, new_suffix, new_value);
        inner.insert_child(old_byte, Node::Inner(child));
    } else {
        let new_leaf = SuffixTree::new(*new_stem, new_suffix, new_value, crs);
        inner.insert_child(old_byte, Node::Leaf(old_leaf));
        inner.insert_child(new_byte, Node::Leaf(new_leaf));
    }
    inner.recompute_commitment_from_scratch(crs);
    inner
}

/// Inserts `value` at `(stem, suffix)` into the subtree rooted at `node`,
/// which sits `depth` stem-bytes below the trie root. Returns the node's
/// new commitment-to-field value minus its old one; the caller scales
/// that delta by its own CRS basis point and folds it into its own
/// commitment (the reverse path walk, here expressed as the
/// unwind of this recursion instead of an explicit path list).
fn insert_into(node: &mut Node, crs: &Crs, stem: &[u8; 31], depth: usize, suffix: u8, value: [u8; 32]) -> Fr {
    let old_hash = node.commitment_to_field();

    match node {
        Node::Leaf(leaf) if leaf.stem == *stem => {
            leaf.replace_child_element(suffix, value, crs);
        }
        Node::Leaf(_) => {
            let old_leaf = match core::mem::replace(node, Node::Inner(InnerNode::empty())) {
                Node::Leaf(leaf) => leaf,
                Node::Inner(_) => unreachable!("just matched Node::Leaf above"),
            };
            let replacement = build_split_chain(crs, old_leaf, stem, depth, suffix, value);
            *node = Node::Inner(replacement);
        }
        Node::Inner(inner) => {
            let index = stem[depth];
            if inner.contains(index) {
                let delta = {
                    let child = inner.get_mut(index).expect("contains() just checked this index");
                    insert_into(child, crs, stem, depth + 1, suffix, value)
                };
                inner.apply_child_delta(crs, index, delta);
            } else {
                let leaf = SuffixTree::new(*stem, suffix, value, crs);
                let leaf_hash = leaf.commitment_to_field();
                inner.insert_child(index, Node::Leaf(leaf));
                inner.apply_child_delta(crs, index, leaf_hash);
            }
        }
    }

    node.commitment_to_field() - old_hash
}

/// A radix-256 authenticated key-value map whose inner commitments are
/// Banderwagon points. Single-threaded and synchronous:
/// `insert` holds exclusive access to the root and the path it walks.
pub struct VerkleTrie {
    crs: Crs,
    root: Node,
}

impl VerkleTrie {
    pub fn new(crs: Crs) -> Self {
        Self { crs, root: Node::Inner(InnerNode::empty()) }
    }

    /// Inserts `value` at `key`, updating only the path's commitments
    /// (`O(path_length)` group operations, never a full recommit).
    /// Inserting the same `(key, value)` pair twice leaves the root
    /// unchanged, since every delta along the path collapses to zero.
    pub fn insert(&mut self, key: [u8; 32], value: [u8; 32]) {
        let stem = stem_of(&key);
        let suffix = key[31];
        tracing::debug!(suffix, "verkle trie insert");
        insert_into(&mut self.root, &self.crs, &stem, 0, suffix, value);
    }

    pub fn insert_batch(&mut self, entries: &[([u8; 32], [u8; 32])]) {
        for (key, value) in entries {
            self.insert(*key, *value);
        }
    }

    /// The serialized root commitment. An empty trie's root node is the
    /// identity, whose Banderwagon encoding is 32 zero bytes.
    pub fn root(&self) -> [u8; 32] {
        self.root.commitment_point().to_bytes()
    }

    /// The root commitment mapped to a scalar, before serialization.
    pub fn root_commitment_to_field(&self) -> Fr {
        self.root.commitment_to_field()
    }
}

/// One opening in a trie proof. Declared for API completeness (proof
/// creation/verification is deliberately left unspecified); the core
/// does not construct or consume this type.
#[derive(Clone, Debug)]
pub struct Proof {
    pub openings: ark_std::vec::Vec<(u8, Fr)>,
}

/// Out of scope for this core (`Error::UnsupportedOperation`):
/// trie proofs are produced/consumed by the external SSZ proof layer.
pub fn create_proof(_trie: &VerkleTrie, _keys: &[[u8; 32]]) -> Result<Proof, Error> {
    Err(Error::UnsupportedOperation("trie proof creation is out of scope for this core"))
}

/// Out of scope for this core; see [`create_proof`].
pub fn verify_proof(_proof: &Proof) -> Result<(), Error> {
    Err(Error::UnsupportedOperation("trie proof verification is out of scope for this core"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_trie_root_is_32_zero_bytes() {
        let trie = VerkleTrie::new(Crs::new());
        assert_eq!(trie.root(), [0u8; 32]);
    }

    #[test]
    fn insert_then_reinsert_same_value_leaves_root_unchanged() {
        let mut trie = VerkleTrie::new(Crs::new());
        let key = {
            let mut k = [0u8; 32];
            for (i, byte) in k.iter_mut().enumerate() {
                *byte = (i + 1) as u8;
            }
            k
        };
        trie.insert(key, key);
        let root_after_first = trie.root();
        trie.insert(key, key);
        assert_eq!(trie.root(), root_after_first);
    }

    #[test]
    fn insert_changes_the_root_from_empty() {
        let mut trie = VerkleTrie::new(Crs::new());
        let empty_root = trie.root();
        trie.insert([1u8; 32], [2u8; 32]);
        assert_ne!(trie.root(), empty_root);
    }

    #[test]
    fn two_keys_sharing_a_long_common_prefix_both_resolve() {
        // [0]*32 and [0]*30 ++ [1, 0]: differ only at byte 30, exercising
        // the longest-common-path split case.
        let mut trie = VerkleTrie::new(Crs::new());
        let key_a = [0u8; 32];
        let mut key_b = [0u8; 32];
        key_b[30] = 1;

        trie.insert(key_a, key_a);
        let root_after_a = trie.root();
        trie.insert(key_b, key_b);
        assert_ne!(trie.root(), root_after_a);
    }

    #[test]
    fn create_proof_is_unsupported() {
        let trie = VerkleTrie::new(Crs::new());
        assert!(create_proof(&trie, &[[0u8; 32]]).is_err());
    }
}
