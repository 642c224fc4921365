#![cfg_attr(not(feature = "std"), no_std)]
//! A Verkle trie over the Banderwagon prime-order group (a quotient of the
//! Bandersnatch twisted Edwards curve) with a Bulletproofs-style Inner
//! Product Argument and multipoint opening protocol.
//!
//! Module dependency order, leaves first: [`fields`] -> [`bandersnatch`]
//! -> [`banderwagon`] -> [`crs`] -> [`polynomial`] -> [`transcript`] ->
//! [`ipa`] -> [`multiproof`] -> [`trie`]. No backward edges: the trie
//! consumes `crs::Crs::commit`/`commit_sparse`, multiproof consumes IPA,
//! polynomials, the CRS and the transcript, and IPA consumes polynomials,
//! the CRS and the transcript.
//!
//! Out of scope, as a pure cryptographic core: SSZ wire containers for
//! trie proofs, CLI wrappers, on-disk persistence, deletion semantics
//! (null-value insert is `Error::UnsupportedOperation`), and any
//! multi-threaded proof generation beyond the optional `parallel`-gated
//! MSM loop.

pub mod bandersnatch;
pub mod banderwagon;
pub mod crs;
pub mod error;
pub mod fields;
pub mod ipa;
pub mod multiproof;
pub mod polynomial;
pub mod rng;
pub mod transcript;
pub mod trie;

pub use bandersnatch::AffinePoint;
pub use banderwagon::Element as BanderwagonElement;
pub use crs::Crs;
pub use error::{Error, Result};
pub use fields::{Fp, Fr};
pub use trie::VerkleTrie;
