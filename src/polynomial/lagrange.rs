//! Polynomials in Lagrange basis: a length-`n` vector of evaluations over a
//! fixed domain. This is the representation every committed vector in this
//! crate (trie leaf values, IPA inputs) is kept in — coefficient form is
//! only used transiently, for the domain's vanishing polynomial.

use ark_std::vec::Vec;

use crate::error::Error;
use crate::fields::Fr;
use crate::polynomial::monomial::MonomialBasis;
use crate::polynomial::weights::PrecomputedWeights;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LagrangeBasis {
    pub evaluations: Vec<Fr>,
    pub domain: Vec<Fr>,
}

impl LagrangeBasis {
    pub fn new(evaluations: Vec<Fr>, domain: Vec<Fr>) -> Self {
        debug_assert_eq!(evaluations.len(), domain.len());
        Self { evaluations, domain }
    }

    pub fn len(&self) -> usize {
        self.evaluations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }

    fn check_same_domain(&self, other: &Self) -> Result<(), Error> {
        if self.domain == other.domain {
            Ok(())
        } else {
            Err(Error::DomainMismatch)
        }
    }

    pub fn add(&self, other: &Self) -> Result<Self, Error> {
        self.check_same_domain(other)?;
        let evaluations = self.evaluations.iter().zip(&other.evaluations).map(|(a, b)| *a + *b).collect();
        Ok(Self::new(evaluations, self.domain.clone()))
    }

    pub fn sub(&self, other: &Self) -> Result<Self, Error> {
        self.check_same_domain(other)?;
        let evaluations = self.evaluations.iter().zip(&other.evaluations).map(|(a, b)| *a - *b).collect();
        Ok(Self::new(evaluations, self.domain.clone()))
    }

    pub fn mul(&self, other: &Self) -> Result<Self, Error> {
        self.check_same_domain(other)?;
        let evaluations = self.evaluations.iter().zip(&other.evaluations).map(|(a, b)| *a * *b).collect();
        Ok(Self::new(evaluations, self.domain.clone()))
    }

    pub fn scale(&self, constant: Fr) -> Self {
        let evaluations = self.evaluations.iter().map(|v| *v * constant).collect();
        Self::new(evaluations, self.domain.clone())
    }

    /// `f(index)`, i.e. the stored evaluation — polynomial evaluation
    /// inside the domain is just an array read.
    pub fn evaluate_inside_domain(&self, index: usize) -> Fr {
        self.evaluations[index]
    }

    /// Barycentric evaluation at a point `z` not on the domain:
    /// `f(z) = A(z) * sum_i f(i) / (A'(i) * (z - i))`, computed with a
    /// single batch inversion over `{z - i}`.
    pub fn evaluate_outside_domain(&self, weights: &PrecomputedWeights, z: Fr) -> Fr {
        let az = weights.a.evaluate(z);
        assert!(!az.is_zero(), "z lies on the domain; use evaluate_inside_domain instead");

        let mut diffs: Vec<Fr> = self.domain.iter().map(|x| z - *x).collect();
        Fr::batch_inverse(&mut diffs);

        let mut r = Fr::zero();
        for ((value, a_prime_inv), diff) in
            self.evaluations.iter().zip(weights.a_prime_domain_inv.iter()).zip(diffs.iter())
        {
            r += *value * *a_prime_inv * *diff;
        }
        r * az
    }

    /// Lagrange interpolation back to coefficient form, via the standard
    /// "master numerator polynomial divided back by each root" construction.
    pub fn interpolate(&self) -> MonomialBasis {
        let xs = &self.domain;
        let ys = &self.evaluations;

        let root = MonomialBasis::vanishing_poly(xs);
        assert_eq!(root.len(), ys.len() + 1);

        let nums: Vec<MonomialBasis> = xs
            .iter()
            .map(|x| root.div(&MonomialBasis::new(ark_std::vec![-*x, Fr::one()])))
            .collect();
        let denoms: Vec<Fr> = nums.iter().zip(xs.iter()).map(|(num, x)| num.evaluate(*x)).collect();
        let mut inv_denoms = denoms;
        Fr::batch_inverse(&mut inv_denoms);

        let mut b = ark_std::vec![Fr::zero(); ys.len()];
        for i in 0..xs.len() {
            if ys[i].is_zero() {
                continue;
            }
            let yslice = ys[i] * inv_denoms[i];
            for (j, coeff) in nums[i].coeffs.iter().enumerate() {
                if !coeff.is_zero() {
                    b[j] += *coeff * yslice;
                }
            }
        }

        while b.len() > 1 && b.last().expect("non-empty").is_zero() {
            b.pop();
        }
        MonomialBasis::new(b)
    }
}

impl core::ops::Index<usize> for LagrangeBasis {
    type Output = Fr;
    fn index(&self, index: usize) -> &Fr {
        &self.evaluations[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::canonical_domain;

    #[test]
    fn add_then_sub_is_identity() {
        let domain = canonical_domain();
        let a = LagrangeBasis::new((0..256u64).map(Fr::from_u64).collect(), domain.clone());
        let b = LagrangeBasis::new((0..256u64).map(|i| Fr::from_u64(i * 2)).collect(), domain);
        let sum = a.add(&b).unwrap();
        let back = sum.sub(&b).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn mismatched_domains_are_rejected() {
        let a = LagrangeBasis::new(ark_std::vec![Fr::zero(); 4], (0..4u64).map(Fr::from_u64).collect());
        let b = LagrangeBasis::new(ark_std::vec![Fr::zero(); 4], (1..5u64).map(Fr::from_u64).collect());
        assert!(a.add(&b).is_err());
    }

    #[test]
    fn evaluate_outside_domain_matches_interpolated_polynomial() {
        let domain: Vec<Fr> = (0..8u64).map(Fr::from_u64).collect();
        let evaluations: Vec<Fr> = domain.iter().map(|x| *x * *x + Fr::one()).collect();
        let poly = LagrangeBasis::new(evaluations, domain.clone());
        let weights = PrecomputedWeights::new(domain);

        let z = Fr::from_u64(1000);
        let via_barycentric = poly.evaluate_outside_domain(&weights, z);
        let via_interpolation = poly.interpolate().evaluate(z);
        assert_eq!(via_barycentric, via_interpolation);
    }
}
