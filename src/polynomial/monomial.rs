//! Polynomials in coefficient (monomial) form: `coeffs[i]` is the
//! coefficient of `X^i`. Used for the domain's vanishing polynomial `A(X)`
//! and its formal derivative `A'(X)`, not for trie/IPA data (which stays in
//! Lagrange form throughout, see [`super::lagrange`]).

use ark_std::vec::Vec;

use crate::fields::Fr;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonomialBasis {
    pub coeffs: Vec<Fr>,
}

impl MonomialBasis {
    pub fn new(coeffs: Vec<Fr>) -> Self {
        Self { coeffs }
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Schoolbook polynomial multiplication.
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return Self::new(Vec::new());
        }
        let mut out = ark_std::vec![Fr::zero(); self.len() + other.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in other.coeffs.iter().enumerate() {
                out[i + j] += *a * *b;
            }
        }
        Self::new(out)
    }

    /// Long division `self / other`, exact (no remainder is returned —
    /// callers must only divide when `other` divides `self` evenly, as is
    /// always the case for this crate's uses).
    pub fn div(&self, other: &Self) -> Self {
        assert!(self.len() >= other.len(), "dividend must not be shorter than divisor");
        let mut a = self.coeffs.clone();
        let b = &other.coeffs;
        let mut out = ark_std::vec![Fr::zero(); self.len() - other.len() + 1];
        let bpos = (b.len() - 1) as isize;
        let mut apos = (a.len() - 1) as isize;
        let mut diff = apos - bpos;
        while diff >= 0 {
            let quot = a[apos as usize]
                .div(&b[bpos as usize])
                .expect("divisor's leading coefficient is nonzero");
            out[diff as usize] = quot;
            for i in (0..=bpos).rev() {
                a[(diff + i) as usize] -= b[i as usize] * quot;
            }
            apos -= 1;
            diff -= 1;
        }
        Self::new(out)
    }

    pub fn evaluate(&self, x: Fr) -> Fr {
        let mut y = Fr::zero();
        let mut power_of_x = Fr::one();
        for coeff in &self.coeffs {
            y += power_of_x * *coeff;
            power_of_x = power_of_x * x;
        }
        y
    }

    /// `d/dX` of `self`, coefficient-wise: `(n * coeffs[n])` for `n >= 1`.
    pub fn formal_derivative(&self) -> Self {
        let derivative = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(n, c)| Fr::from_u64(n as u64) * *c)
            .collect();
        Self::new(derivative)
    }

    /// `A(X) = prod_{x in xs} (X - x)`, built by repeatedly multiplying the
    /// accumulated polynomial by the next linear factor.
    pub fn vanishing_poly(xs: &[Fr]) -> Self {
        let mut coeffs = ark_std::vec![Fr::one()];
        for &x in xs {
            let mut next = ark_std::vec![Fr::zero(); coeffs.len() + 1];
            for (i, c) in coeffs.iter().enumerate() {
                next[i + 1] += *c;
                next[i] -= *c * x;
            }
            coeffs = next;
        }
        Self::new(coeffs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vanishing_poly_vanishes_on_its_roots() {
        let xs: Vec<Fr> = (0..8u64).map(Fr::from_u64).collect();
        let poly = MonomialBasis::vanishing_poly(&xs);
        for x in xs {
            assert_eq!(poly.evaluate(x), Fr::zero());
        }
    }

    #[test]
    fn vanishing_poly_is_monic_of_the_right_degree() {
        let xs: Vec<Fr> = (0..5u64).map(Fr::from_u64).collect();
        let poly = MonomialBasis::vanishing_poly(&xs);
        assert_eq!(poly.len(), 6);
        assert_eq!(poly.coeffs[5], Fr::one());
    }

    #[test]
    fn mul_then_div_recovers_original() {
        let a = MonomialBasis::new(ark_std::vec![Fr::from_u64(1), Fr::from_u64(2)]);
        let b = MonomialBasis::new(ark_std::vec![Fr::from_u64(3), Fr::from_u64(1)]);
        let product = a.mul(&b);
        let recovered = product.div(&b);
        assert_eq!(recovered, a);
    }

    #[test]
    fn formal_derivative_of_constant_is_empty() {
        let constant = MonomialBasis::new(ark_std::vec![Fr::from_u64(9)]);
        assert!(constant.formal_derivative().is_empty());
    }
}
