//! Precomputed barycentric weights for the fixed domain `{0,...,255}`:
//! the vanishing polynomial `A`, its derivative `A'`, `A'` evaluated (and
//! inverted) on the domain, and the combined `{1/k}` table the quotient
//! formulas in `multiproof` index into.

use ark_std::vec::Vec;

use crate::fields::Fr;
use crate::polynomial::monomial::MonomialBasis;

pub struct PrecomputedWeights {
    pub a: MonomialBasis,
    pub a_prime: MonomialBasis,
    pub a_prime_domain: Vec<Fr>,
    pub a_prime_domain_inv: Vec<Fr>,
    pub domain: Vec<Fr>,
    /// `{1/k : k = 0..255} ++ {1/k : k = -255..-1}`, length `2*n - 1`.
    /// Index `0` holds the inverse of zero as a sentinel — real Fermat
    /// exponentiation of zero yields zero, never a panic, but this entry
    /// must never be read by correctly-indexing callers (see
    /// `compute_quotient_inside_domain`'s `i != index` guard).
    domain_inverses: Vec<Fr>,
}

impl PrecomputedWeights {
    pub fn new(domain: Vec<Fr>) -> Self {
        assert!(is_continuous_and_increasing(&domain), "domain must be 0,1,2,...");
        let domain_size = domain.len();

        let a = MonomialBasis::vanishing_poly(&domain);
        let a_prime = a.formal_derivative();

        let mut a_prime_domain = Vec::with_capacity(domain_size);
        let mut a_prime_domain_inv = Vec::with_capacity(domain_size);
        for i in 0..domain_size {
            let value = a_prime.evaluate(Fr::from_u64(i as u64));
            a_prime_domain.push(value);
            a_prime_domain_inv.push(value.inverse().expect("A'(i) never vanishes on the domain"));
        }

        let mut domain_inverses = Vec::with_capacity(2 * domain_size - 1);
        domain_inverses.push(Fr::zero());
        for d in 1..domain_size as i64 {
            domain_inverses.push(Fr::from_i64(d).inverse().expect("nonzero"));
        }
        for d in (-(domain_size as i64) + 1)..0 {
            domain_inverses.push(Fr::from_i64(d).inverse().expect("nonzero"));
        }

        Self { a, a_prime, a_prime_domain, a_prime_domain_inv, domain, domain_inverses }
    }

    /// `1/d` for `d` in `(-(n-1))..n`, `d != 0`. Mirrors the reference
    /// table's Python negative-indexing trick: the table is laid out as
    /// `[1/0, 1/1, ..., 1/(n-1), 1/-(n-1), ..., 1/-1]` and `d < 0` is
    /// looked up by wrapping from the end, exactly as Python's `list[-k]`
    /// would.
    pub fn domain_inverse(&self, d: i64) -> Fr {
        let n = self.domain.len() as i64;
        if d >= 0 {
            self.domain_inverses[d as usize]
        } else {
            self.domain_inverses[(d + 2 * n - 1) as usize]
        }
    }

    /// `b_i = A(z) / (A'(i) * (z - i))`, so that `<f, b> = f(z)` for any
    /// Lagrange-basis `f` over this domain.
    pub fn barycentric_formula_constants(&self, z: Fr) -> Vec<Fr> {
        let az = self.a.evaluate(z);
        let mut diffs: Vec<Fr> = self.domain.iter().map(|x| z - *x).collect();
        Fr::batch_inverse(&mut diffs);
        diffs
            .iter()
            .zip(self.a_prime_domain_inv.iter())
            .map(|(inv_diff, a_prime_inv)| az * *a_prime_inv * *inv_diff)
            .collect()
    }

    /// `q` such that `q(X) * (X - index) = f(X) - f(index)` on the domain,
    /// for `index` an integer domain position.
    pub fn compute_quotient_inside_domain(&self, f: &[Fr], index: usize) -> Vec<Fr> {
        let domain_size = self.domain.len();
        let y = f[index];
        let mut q = ark_std::vec![Fr::zero(); domain_size];
        for i in 0..domain_size {
            if i == index {
                continue;
            }
            let diff = f[i] - y;
            q[i] = diff * self.domain_inverse(i as i64 - index as i64);
            q[index] += diff
                * self.domain_inverse(index as i64 - i as i64)
                * self.a_prime_domain[index]
                * self.a_prime_domain_inv[i];
        }
        q
    }

    /// `q_i = (f(i) - y) / (domain[i] - z)` for an opening point `z`
    /// outside the domain. Kept for completeness; unreferenced by the
    /// IPA/multiproof/trie paths, which only ever open at domain indices.
    pub fn compute_quotient_outside_domain(&self, f: &[Fr], z: Fr, y: Fr) -> Vec<Fr> {
        self.domain
            .iter()
            .zip(f.iter())
            .map(|(x, f_i)| (*f_i - y).div(&(*x - z)).expect("z is outside the domain"))
            .collect()
    }
}

fn is_continuous_and_increasing(domain: &[Fr]) -> bool {
    domain.windows(2).all(|pair| pair[1] - pair[0] == Fr::one())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::canonical_domain;

    #[test]
    fn barycentric_constants_reproduce_evaluation() {
        let weights = PrecomputedWeights::new(canonical_domain());
        let f: Vec<Fr> = (0..256u64).map(Fr::from_u64).collect();
        let z = Fr::from_u64(1000);
        let b = weights.barycentric_formula_constants(z);
        let got: Fr = f.iter().zip(b.iter()).map(|(a, b)| *a * *b).fold(Fr::zero(), |acc, v| acc + v);
        assert_eq!(got, z);
    }

    #[test]
    fn quotient_inside_domain_satisfies_its_defining_identity() {
        let domain = canonical_domain();
        let weights = PrecomputedWeights::new(domain.clone());
        let f: Vec<Fr> = (0..256u64).map(|i| Fr::from_u64(i * i)).collect();
        let index = 5usize;
        let q = weights.compute_quotient_inside_domain(&f, index);
        let y = f[index];
        for i in 0..domain.len() {
            if i == index {
                continue;
            }
            assert_eq!(q[i] * (domain[i] - domain[index]), f[i] - y);
        }
    }

    #[test]
    fn domain_inverse_matches_direct_inverse_for_positive_and_negative() {
        let weights = PrecomputedWeights::new(canonical_domain());
        assert_eq!(weights.domain_inverse(5), Fr::from_i64(5).inverse().unwrap());
        assert_eq!(weights.domain_inverse(-5), Fr::from_i64(-5).inverse().unwrap());
    }
}
