//! Multiproof: batches several `(commitment, point, value)` polynomial
//! openings — each potentially against a different polynomial, all opened
//! at domain indices — into a single IPA, rather than running one IPA per
//! query.

use ark_std::vec::Vec;
use indexmap::IndexMap;

use crate::banderwagon::Element;
use crate::crs::Crs;
use crate::error::Error;
use crate::fields::Fr;
use crate::ipa::{self, Proof as IpaProof};
use crate::polynomial::weights::PrecomputedWeights;
use crate::transcript::Transcript;

/// One polynomial's opening, as seen by the prover (who holds `f` itself).
pub struct ProverQuery<'a> {
    pub f: &'a [Fr],
    pub commitment: Element,
    /// Domain index the polynomial is opened at.
    pub z: usize,
    pub y: Fr,
}

/// The same opening, as seen by the verifier (no access to `f`).
pub struct VerifierQuery {
    pub commitment: Element,
    pub z: usize,
    pub y: Fr,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proof {
    pub ipa: IpaProof,
    pub d: Element,
}

pub struct MultiProof {
    weights: PrecomputedWeights,
}

impl MultiProof {
    pub fn new(domain: Vec<Fr>) -> Self {
        Self { weights: PrecomputedWeights::new(domain) }
    }

    fn domain_size(&self) -> usize {
        self.weights.domain.len()
    }

    /// Batches `queries` into one IPA proof over `h - g`, where `g`
    /// collects the per-query inside-domain quotients and `h` collects the
    /// per-query evaluations scaled by `1/(t - z_k)`.
    pub fn make_multiproof(&self, crs: &Crs, transcript: &mut Transcript, queries: &[ProverQuery]) -> Proof {
        let domain_size = self.domain_size();
        transcript.domain_sep(b"multiproof");

        for query in queries {
            transcript.append_point(query.commitment, b"C");
            transcript.append_scalar(self.weights.domain[query.z], b"z");
            transcript.append_scalar(query.y, b"y");
        }

        let r = transcript.challenge_scalar(b"r");

        let mut g = ark_std::vec![Fr::zero(); domain_size];
        let mut power_of_r = Fr::one();
        for query in queries {
            let quotient = self.weights.compute_quotient_inside_domain(query.f, query.z);
            for i in 0..domain_size {
                g[i] += power_of_r * quotient[i];
            }
            power_of_r = power_of_r * r;
        }

        let d = crs.commit(&g);
        transcript.append_point(d, b"D");

        let t = transcript.challenge_scalar(b"t");

        let mut h = ark_std::vec![Fr::zero(); domain_size];
        let mut power_of_r = Fr::one();
        for query in queries {
            let denominator_inv = (t - self.weights.domain[query.z])
                .inverse()
                .expect("t was squeezed after D, collision with a domain point is negligible");
            for i in 0..domain_size {
                h[i] += power_of_r * query.f[i] * denominator_inv;
            }
            power_of_r = power_of_r * r;
        }

        let h_minus_g: Vec<Fr> = h.iter().zip(g.iter()).map(|(h_i, g_i)| *h_i - *g_i).collect();

        let e = crs.commit(&h);
        transcript.append_point(e, b"E");

        let ipa_commitment = e.sub(&d);
        let input_point_vector = self.weights.barycentric_formula_constants(t);

        let (_output_point, ipa) = ipa::make_ipa_proof(
            crs,
            transcript,
            ipa::ProverQuery {
                polynomial: &h_minus_g,
                commitment: ipa_commitment,
                point: t,
                point_evaluations: &input_point_vector,
            },
        );

        Proof { ipa, d }
    }

    /// Reconstructs `E` from the queries' claimed `(C_k, z_k, y_k)` alone
    /// (no `h`), grouping coefficients by serialized commitment so a
    /// polynomial opened at two different points is not double-counted,
    /// then delegates to IPA verification.
    pub fn check_multiproof(
        &self,
        crs: &Crs,
        transcript: &mut Transcript,
        queries: &[VerifierQuery],
        proof: &Proof,
    ) -> Result<(), Error> {
        transcript.domain_sep(b"multiproof");

        for query in queries {
            transcript.append_point(query.commitment, b"C");
            transcript.append_scalar(self.weights.domain[query.z], b"z");
            transcript.append_scalar(query.y, b"y");
        }

        let r = transcript.challenge_scalar(b"r");

        transcript.append_point(proof.d, b"D");
        let t = transcript.challenge_scalar(b"t");

        let mut e_coefficients: IndexMap<[u8; 32], Fr> = IndexMap::new();
        let mut commitments_by_serialized: IndexMap<[u8; 32], Element> = IndexMap::new();
        let mut g2_of_t = Fr::zero();
        let mut power_of_r = Fr::one();

        for query in queries {
            let denominator_inv = (t - self.weights.domain[query.z]).inverse().ok_or(Error::InvalidProof)?;
            let e_coefficient = power_of_r * denominator_inv;

            let serialized = query.commitment.to_bytes();
            commitments_by_serialized.entry(serialized).or_insert(query.commitment);
            *e_coefficients.entry(serialized).or_insert(Fr::zero()) += e_coefficient;
            g2_of_t += e_coefficient * query.y;

            power_of_r = power_of_r * r;
        }

        let e = e_coefficients
            .iter()
            .map(|(serialized, coefficient)| commitments_by_serialized[serialized].scalar_mul(coefficient))
            .fold(Element::identity(), |acc, term| acc.add(&term));
        transcript.append_point(e, b"E");

        let ipa_commitment = e.sub(&proof.d);
        let input_point_vector = self.weights.barycentric_formula_constants(t);

        tracing::debug!(queries = queries.len(), "verifying multiproof's batched ipa");
        let result = ipa::check_ipa_proof(
            crs,
            transcript,
            ipa::VerifierQuery {
                commitment: ipa_commitment,
                point: t,
                point_evaluations: &input_point_vector,
                output_point: g2_of_t,
                proof: &proof.ipa,
            },
        );
        if result.is_err() {
            tracing::warn!(queries = queries.len(), "multiproof verification failed: batched ipa rejected");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::canonical_domain;

    fn poly_a() -> Vec<Fr> {
        (0..256u64).map(|i| Fr::from_u64((i % 32) + 1)).collect()
    }

    fn poly_b() -> Vec<Fr> {
        (0..256u64).map(|i| Fr::from_u64(32 - (i % 32))).collect()
    }

    #[test]
    fn multiproof_completeness_over_two_distinct_polynomials() {
        let crs = Crs::new();
        let mp = MultiProof::new(canonical_domain());

        let a = poly_a();
        let b = poly_b();
        let c_a = crs.commit(&a);
        let c_b = crs.commit(&b);
        let y_a = a[0];
        let y_b = b[0];

        let prover_queries =
            [ProverQuery { f: &a, commitment: c_a, z: 0, y: y_a }, ProverQuery { f: &b, commitment: c_b, z: 0, y: y_b }];

        let mut prover_transcript = Transcript::new(b"test");
        let proof = mp.make_multiproof(&crs, &mut prover_transcript, &prover_queries);

        let verifier_queries =
            [VerifierQuery { commitment: c_a, z: 0, y: y_a }, VerifierQuery { commitment: c_b, z: 0, y: y_b }];
        let mut verifier_transcript = Transcript::new(b"test");
        let result = mp.check_multiproof(&crs, &mut verifier_transcript, &verifier_queries, &proof);
        assert!(result.is_ok());
    }

    #[test]
    fn multiproof_completeness_with_the_same_commitment_opened_twice() {
        let crs = Crs::new();
        let mp = MultiProof::new(canonical_domain());

        let a = poly_a();
        let c_a = crs.commit(&a);

        let prover_queries = [
            ProverQuery { f: &a, commitment: c_a, z: 0, y: a[0] },
            ProverQuery { f: &a, commitment: c_a, z: 1, y: a[1] },
        ];
        let mut prover_transcript = Transcript::new(b"test");
        let proof = mp.make_multiproof(&crs, &mut prover_transcript, &prover_queries);

        let verifier_queries = [
            VerifierQuery { commitment: c_a, z: 0, y: a[0] },
            VerifierQuery { commitment: c_a, z: 1, y: a[1] },
        ];
        let mut verifier_transcript = Transcript::new(b"test");
        let result = mp.check_multiproof(&crs, &mut verifier_transcript, &verifier_queries, &proof);
        assert!(result.is_ok());
    }

    #[test]
    fn multiproof_rejects_a_tampered_claimed_value() {
        let crs = Crs::new();
        let mp = MultiProof::new(canonical_domain());

        let a = poly_a();
        let c_a = crs.commit(&a);
        let prover_queries = [ProverQuery { f: &a, commitment: c_a, z: 0, y: a[0] }];
        let mut prover_transcript = Transcript::new(b"test");
        let proof = mp.make_multiproof(&crs, &mut prover_transcript, &prover_queries);

        let verifier_queries = [VerifierQuery { commitment: c_a, z: 0, y: a[0] + Fr::one() }];
        let mut verifier_transcript = Transcript::new(b"test");
        let result = mp.check_multiproof(&crs, &mut verifier_transcript, &verifier_queries, &proof);
        assert!(result.is_err());
    }
}
