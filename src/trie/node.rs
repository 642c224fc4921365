//! Node variants and the value-splitting scheme for the trie's two node
//! shapes, plus the memoized point-to-field commitment wrapper they share.

use core::cell::Cell;

use ark_std::vec::Vec;
use indexmap::IndexMap;

use crate::banderwagon::Element;
use crate::crs::Crs;
use crate::fields::Fr;

/// A Banderwagon point plus a memoized field-hash. The memo is invalidated
/// on every [`Self::add_point`]; the single-threaded concurrency model
/// means a `Cell` is enough, no interior lock needed.
#[derive(Clone, Debug)]
pub struct VerkleCommitment {
    point: Element,
    point_as_field: Cell<Option<Fr>>,
}

impl VerkleCommitment {
    pub fn new(point: Element) -> Self {
        Self { point, point_as_field: Cell::new(None) }
    }

    pub fn empty() -> Self {
        Self::new(Element::identity())
    }

    pub fn point(&self) -> Element {
        self.point
    }

    /// Maps the held point to `Fp` via `x/y` and reduces its encoding into
    /// `Fr`, memoizing the result until the next mutation.
    pub fn commitment_to_field(&self) -> Fr {
        if let Some(value) = self.point_as_field.get() {
            return value;
        }
        let value = self.point.map_to_field_as_scalar();
        self.point_as_field.set(Some(value));
        value
    }

    /// Adds `delta` to the held point and invalidates the memoized hash.
    pub fn add_point(&mut self, delta: Element) {
        self.point = self.point.add(&delta);
        self.point_as_field.set(None);
    }
}

/// An inner (radix-256) node: a sparse `child_index -> Node` map plus its
/// own cached commitment. Sparse because near-leaf inner nodes typically
/// hold only one or two children.
#[derive(Clone, Debug)]
pub struct InnerNode {
    children: IndexMap<u8, Node>,
    commitment: VerkleCommitment,
}

impl InnerNode {
    pub fn empty() -> Self {
        Self { children: IndexMap::new(), commitment: VerkleCommitment::empty() }
    }

    pub fn commitment_to_field(&self) -> Fr {
        self.commitment.commitment_to_field()
    }

    pub fn commitment_point(&self) -> Element {
        self.commitment.point()
    }

    pub fn contains(&self, index: u8) -> bool {
        self.children.contains_key(&index)
    }

    pub fn get(&self, index: u8) -> Option<&Node> {
        self.children.get(&index)
    }

    pub fn get_mut(&mut self, index: u8) -> Option<&mut Node> {
        self.children.get_mut(&index)
    }

    pub fn insert_child(&mut self, index: u8, node: Node) {
        self.children.insert(index, node);
    }

    /// Recommits from scratch, sparse over only the present children. Used
    /// both for a node's very first commitment and, since every freshly
    /// built intermediate node starts at the identity, for building a
    /// split subtree: a from-zero delta and a from-scratch sparse commit
    /// over the same children coincide exactly.
    pub fn recompute_commitment_from_scratch(&mut self, crs: &Crs) {
        let values: Vec<(usize, Fr)> =
            self.children.iter().map(|(index, node)| (*index as usize, node.commitment_to_field())).collect();
        self.commitment = VerkleCommitment::new(crs.commit_sparse(values.iter().map(|(i, v)| (*i, v))));
    }

    /// Applies the commitment delta of the child at `index` changing its
    /// field-hash by `delta_hash`: `commitment += crs[index] * delta_hash`.
    pub fn apply_child_delta(&mut self, crs: &Crs, index: u8, delta_hash: Fr) {
        let point_delta = crs.basis()[index as usize].scalar_mul(&delta_hash);
        self.commitment.add_point(point_delta);
    }
}

/// `VALUE_EXISTS_MARKER`, added to the low 16-byte half of a present value
/// so that a stored zero is distinguishable from an absent slot. Absent
/// slots contribute `(0, 0)`.
fn split_value(value: Option<[u8; 32]>) -> (Fr, Fr) {
    match value {
        None => (Fr::zero(), Fr::zero()),
        Some(bytes) => {
            let mut low = [0u8; 32];
            let mut high = [0u8; 32];
            low[..16].copy_from_slice(&bytes[..16]);
            high[..16].copy_from_slice(&bytes[16..]);

            let low = Fr::from_bytes(&low).expect("a 16-byte value is always canonical") + Fr::value_exists_marker();
            let high = Fr::from_bytes(&high).expect("a 16-byte value is always canonical");
            (low, high)
        }
    }
}

fn stem_to_field(stem: &[u8; 31]) -> Fr {
    let mut bytes = [0u8; 32];
    bytes[..31].copy_from_slice(stem);
    Fr::from_bytes_reduce(&bytes)
}

/// A leaf: a 31-byte stem, a sparse `suffix -> value` map, two
/// subcommitments splitting the 256 possible suffixes in half, and an
/// extension commitment binding the stem and both subcommitments together.
#[derive(Clone, Debug)]
pub struct SuffixTree {
    pub stem: [u8; 31],
    values: IndexMap<u8, [u8; 32]>,
    c1: VerkleCommitment,
    c2: VerkleCommitment,
    extension_commitment: VerkleCommitment,
}

const C1_INDEX: usize = 2;
const C2_INDEX: usize = 3;

impl SuffixTree {
    /// Builds a fresh single-value leaf and commits it.
    pub fn new(stem: [u8; 31], suffix: u8, value: [u8; 32], crs: &Crs) -> Self {
        let mut values = IndexMap::new();
        values.insert(suffix, value);
        let mut tree =
            Self { stem, values, c1: VerkleCommitment::empty(), c2: VerkleCommitment::empty(), extension_commitment: VerkleCommitment::empty() };
        tree.recompute_commitment_from_scratch(crs);
        tree
    }

    fn recompute_commitment_from_scratch(&mut self, crs: &Crs) {
        let mut c1_sparse: Vec<(usize, Fr)> = Vec::new();
        let mut c2_sparse: Vec<(usize, Fr)> = Vec::new();

        for (&index, &value) in &self.values {
            let (low, high) = split_value(Some(value));
            let low_idx = (2 * index as usize) % 256;
            let high_idx = (2 * index as usize + 1) % 256;
            if index < 128 {
                c1_sparse.push((low_idx, low));
                c1_sparse.push((high_idx, high));
            } else {
                c2_sparse.push((low_idx, low));
                c2_sparse.push((high_idx, high));
            }
        }

        self.c1 = VerkleCommitment::new(crs.commit_sparse(c1_sparse.iter().map(|(i, v)| (*i, v))));
        self.c2 = VerkleCommitment::new(crs.commit_sparse(c2_sparse.iter().map(|(i, v)| (*i, v))));

        let c1_field = self.c1.commitment_to_field();
        let c2_field = self.c2.commitment_to_field();
        let stem_field = stem_to_field(&self.stem);

        let extension: [(usize, Fr); 4] = [(0, Fr::one()), (1, stem_field), (C1_INDEX, c1_field), (C2_INDEX, c2_field)];
        self.extension_commitment = VerkleCommitment::new(crs.commit_sparse(extension.iter().map(|(i, v)| (*i, v))));
    }

    pub fn commitment_to_field(&self) -> Fr {
        self.extension_commitment.commitment_to_field()
    }

    pub fn commitment_point(&self) -> Element {
        self.extension_commitment.point()
    }

    /// Updates the value at `child_idx`, propagating the change through
    /// `C1`/`C2` into the extension commitment.
    pub fn replace_child_element(&mut self, child_idx: u8, new_value: [u8; 32], crs: &Crs) {
        let old_value = self.values.get(&child_idx).copied();
        let (old_low, old_high) = split_value(old_value);
        let (new_low, new_high) = split_value(Some(new_value));
        self.values.insert(child_idx, new_value);

        let low_idx = (2 * child_idx as usize) % 256;
        let high_idx = (2 * child_idx as usize + 1) % 256;
        let delta = crs.basis()[low_idx]
            .scalar_mul(&(new_low - old_low))
            .add(&crs.basis()[high_idx].scalar_mul(&(new_high - old_high)));

        if child_idx < 128 {
            self.update_subcommitment(true, delta, crs);
        } else {
            self.update_subcommitment(false, delta, crs);
        }
    }

    fn update_subcommitment(&mut self, is_c1: bool, delta: Element, crs: &Crs) {
        let (sub, ext_index) = if is_c1 { (&mut self.c1, C1_INDEX) } else { (&mut self.c2, C2_INDEX) };
        let old_field = sub.commitment_to_field();
        sub.add_point(delta);
        let new_field = sub.commitment_to_field();

        let ext_delta = crs.basis()[ext_index].scalar_mul(&(new_field - old_field));
        self.extension_commitment.add_point(ext_delta);
    }
}

/// The tagged union of the two node shapes: no heap indirection beyond what `IndexMap` already needs,
/// and no cycles arise since the trie is strictly downward.
#[derive(Clone, Debug)]
pub enum Node {
    Inner(InnerNode),
    Leaf(SuffixTree),
}

impl Node {
    pub fn commitment_to_field(&self) -> Fr {
        match self {
            Node::Inner(inner) => inner.commitment_to_field(),
            Node::Leaf(leaf) => leaf.commitment_to_field(),
        }
    }

    pub fn commitment_point(&self) -> Element {
        match self {
            Node::Inner(inner) => inner.commitment_point(),
            Node::Leaf(leaf) => leaf.commitment_point(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verkle_commitment_memoizes_until_mutated() {
        let mut commitment = VerkleCommitment::new(Element::generator());
        let first = commitment.commitment_to_field();
        assert_eq!(commitment.commitment_to_field(), first);
        commitment.add_point(Element::generator());
        assert_ne!(commitment.commitment_to_field(), first);
    }

    #[test]
    fn empty_commitment_hashes_to_zero() {
        assert!(VerkleCommitment::empty().commitment_to_field().is_zero());
    }

    #[test]
    fn suffix_tree_single_insert_then_update_changes_hash() {
        let crs = Crs::new();
        let mut leaf = SuffixTree::new([1u8; 31], 0, [2u8; 32], &crs);
        let first_hash = leaf.commitment_to_field();
        leaf.replace_child_element(0, [3u8; 32], &crs);
        assert_ne!(leaf.commitment_to_field(), first_hash);
    }

    #[test]
    fn suffix_tree_update_to_same_value_leaves_hash_unchanged() {
        let crs = Crs::new();
        let mut leaf = SuffixTree::new([1u8; 31], 5, [9u8; 32], &crs);
        let first_hash = leaf.commitment_to_field();
        leaf.replace_child_element(5, [9u8; 32], &crs);
        assert_eq!(leaf.commitment_to_field(), first_hash);
    }

    #[test]
    fn inner_node_from_scratch_matches_incremental_delta() {
        let crs = Crs::new();
        let leaf = SuffixTree::new([7u8; 31], 1, [8u8; 32], &crs);
        let leaf_hash = leaf.commitment_to_field();

        let mut via_scratch = InnerNode::empty();
        via_scratch.insert_child(3, Node::Leaf(leaf.clone()));
        via_scratch.recompute_commitment_from_scratch(&crs);

        let mut via_delta = InnerNode::empty();
        via_delta.insert_child(3, Node::Leaf(leaf));
        via_delta.apply_child_delta(&crs, 3, leaf_hash);

        assert_eq!(via_scratch.commitment_point(), via_delta.commitment_point());
    }
}
