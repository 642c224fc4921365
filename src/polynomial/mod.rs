//! Polynomial machinery: coefficient-form polynomials ([`monomial`]) used
//! only to build the domain's vanishing polynomial, and the Lagrange-basis
//! polynomials ([`lagrange`]) that every committed vector in this crate
//! (trie values, IPA inputs, multiproof queries) is actually represented
//! in, plus the barycentric [`weights`] that make evaluating one outside
//! its domain cheap.

pub mod lagrange;
pub mod monomial;
pub mod weights;

pub use lagrange::LagrangeBasis;
pub use monomial::MonomialBasis;
pub use weights::PrecomputedWeights;

use crate::crs::DOMAIN_SIZE;
use crate::fields::Fr;

/// The fixed domain `{0, 1, ..., 255}` every Lagrange-basis polynomial in
/// this crate is evaluated over.
pub fn canonical_domain() -> ark_std::vec::Vec<Fr> {
    (0..DOMAIN_SIZE as u64).map(Fr::from_u64).collect()
}
