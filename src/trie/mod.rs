//! The Verkle trie: a radix-256 authenticated map whose inner commitments
//! are Banderwagon points. Built on top of [`crate::crs`] for
//! commitments and [`crate::fields::Fr`] for the value-splitting scheme;
//! consumes neither IPA nor multiproof — proof creation/verification over
//! the trie is an out-of-scope collaborator (see [`trie::create_proof`]).

mod node;
#[allow(clippy::module_inception)]
mod trie;

pub use node::{InnerNode, Node, SuffixTree, VerkleCommitment};
pub use trie::{create_proof, verify_proof, Proof, VerkleTrie};
