//! The Common Reference String: 256 deterministically-generated Banderwagon
//! basis points plus the blinding generator `Q`. Every implementation of
//! this trie must reproduce the exact same 256 points, so generation is
//! fully pinned down: no randomness, no parameters, just SHA-256 over an
//! incrementing counter.

use sha2::{Digest, Sha256};

use crate::banderwagon::Element;
use crate::fields::Fr;

/// Number of basis points, and the trie's node fan-out / polynomial domain
/// size.
pub const DOMAIN_SIZE: usize = 256;

const DOMAIN_SEPARATOR: &[u8] = b"eth_verkle_oct_2021";

/// No-alloc hex formatting for logging a SHA-256 digest without pulling in
/// a `hex`-crate dependency outside of tests.
struct HexDigest<'a>(&'a [u8]);
impl<'a> core::fmt::Display for HexDigest<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// 256 independent Banderwagon generators plus the blinding generator `Q`.
#[derive(Clone, Debug)]
pub struct Crs {
    points: ark_std::vec::Vec<Element>,
    q: Element,
}

impl Crs {
    /// Generates the CRS: for each of the 256 basis slots, hash
    /// `DOMAIN_SEPARATOR || counter.to_le_bytes()` with SHA-256 and try the
    /// digest as a compressed Banderwagon encoding, advancing the counter on
    /// every failure (bad field encoding, not on-curve, not in the prime-
    /// order subgroup, or a collision with the generator) until 256 points
    /// are collected.
    pub fn new() -> Self {
        tracing::debug!(domain_size = DOMAIN_SIZE, "generating CRS basis");

        let mut points = ark_std::vec::Vec::with_capacity(DOMAIN_SIZE);
        let mut counter: u64 = 0;
        let generator = Element::generator();
        while points.len() < DOMAIN_SIZE {
            let mut hasher = Sha256::new();
            hasher.update(DOMAIN_SEPARATOR);
            hasher.update(counter.to_le_bytes());
            let digest = hasher.finalize();
            counter += 1;

            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(&digest);
            match Element::from_bytes(&bytes) {
                Ok(point) if point != generator => points.push(point),
                _ => continue,
            }
        }

        let mut basis_hasher = Sha256::new();
        for point in &points {
            basis_hasher.update(point.to_bytes());
        }
        let basis_digest = basis_hasher.finalize();
        tracing::debug!(
            points = points.len(),
            attempts = counter,
            digest = %HexDigest(&basis_digest),
            "generated CRS basis"
        );

        Self { points, q: generator }
    }

    pub fn basis(&self) -> &[Element] {
        &self.points
    }

    pub fn q(&self) -> Element {
        self.q
    }

    /// `sum(coeffs[i] * basis[i])`, dense MSM over all 256 slots.
    pub fn commit(&self, coeffs: &[Fr]) -> Element {
        debug_assert_eq!(coeffs.len(), DOMAIN_SIZE);
        Element::msm(&self.points, coeffs)
    }

    /// Semantically equivalent to [`Self::commit`] with every absent index
    /// treated as zero, but only visits present indices — the common case
    /// during trie updates, where typically one to four children change.
    pub fn commit_sparse<'a, I>(&self, sparse: I) -> Element
    where
        I: IntoIterator<Item = (usize, &'a Fr)>,
    {
        let mut acc = Element::identity();
        for (index, coeff) in sparse {
            acc = acc.add(&self.points[index].scalar_mul(coeff));
        }
        acc
    }
}

impl Default for Crs {
    fn default() -> Self {
        Self::new()
    }
}
