//! Bulletproofs-style Inner Product Argument: proves that a committed
//! length-256 vector `a` has public inner product `y = <a, b>` with a
//! public vector `b`, in 8 rounds (`log2(256)`) instead of committing to
//! `a` directly.

use ark_std::vec::Vec;

use crate::banderwagon::Element;
use crate::crs::Crs;
use crate::error::Error;
use crate::fields::Fr;
use crate::transcript::Transcript;

fn inner_product(a: &[Fr], b: &[Fr]) -> Fr {
    a.iter().zip(b.iter()).map(|(x, y)| *x * *y).fold(Fr::zero(), |acc, v| acc + v)
}

fn split_in_half<T: Clone>(values: &[T]) -> (Vec<T>, Vec<T>) {
    assert_eq!(values.len() % 2, 0);
    let mid = values.len() / 2;
    (values[..mid].to_vec(), values[mid..].to_vec())
}

fn fold_scalars(a: &[Fr], b: &[Fr], challenge: Fr) -> Vec<Fr> {
    a.iter().zip(b.iter()).map(|(x, y)| *x + *y * challenge).collect()
}

fn fold_points(a: &[Element], b: &[Element], challenge: Fr) -> Vec<Element> {
    a.iter().zip(b.iter()).map(|(x, y)| x.add(&y.scalar_mul(&challenge))).collect()
}

/// The prover's input: a Lagrange-basis polynomial `a`, its commitment `C`,
/// the opening point `z`, and the barycentric weights `b` such that
/// `<a, b> = a(z)`.
pub struct ProverQuery<'a> {
    pub polynomial: &'a [Fr],
    pub commitment: Element,
    pub point: Fr,
    pub point_evaluations: &'a [Fr],
}

/// The verifier's input: everything the prover saw except `a` itself, plus
/// the claimed output `y` and the proof to check.
pub struct VerifierQuery<'a> {
    pub commitment: Element,
    pub point: Fr,
    pub point_evaluations: &'a [Fr],
    pub output_point: Fr,
    pub proof: &'a Proof,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proof {
    pub l_vec: Vec<Element>,
    pub r_vec: Vec<Element>,
    pub a: Fr,
}

/// Runs the 8-round reduction and returns `(y, proof)`: `y = <a, b>` is
/// computed here rather than trusted from the caller, mirroring the
/// reference prover.
pub fn make_ipa_proof(crs: &Crs, transcript: &mut Transcript, query: ProverQuery) -> (Fr, Proof) {
    transcript.domain_sep(b"ipa");

    let mut n = query.polynomial.len();
    let mut m = n / 2;

    let mut a = query.polynomial.to_vec();
    let mut b = query.point_evaluations.to_vec();
    let y = inner_product(&a, &b);

    let mut l_vec = Vec::new();
    let mut r_vec = Vec::new();

    transcript.append_point(query.commitment, b"C");
    transcript.append_scalar(query.point, b"input point");
    transcript.append_scalar(y, b"output point");
    let w = transcript.challenge_scalar(b"w");

    let q = crs.q().scalar_mul(&w);
    let mut current_basis = crs.basis().to_vec();

    while n > 1 {
        let (a_l, a_r) = split_in_half(&a);
        let (b_l, b_r) = split_in_half(&b);
        let (g_l, g_r) = split_in_half(&current_basis);

        let z_l = inner_product(&a_r, &b_l);
        let z_r = inner_product(&a_l, &b_r);

        let c_l = Element::msm(&g_l, &a_r).add(&q.scalar_mul(&z_l));
        let c_r = Element::msm(&g_r, &a_l).add(&q.scalar_mul(&z_r));

        l_vec.push(c_l);
        r_vec.push(c_r);

        transcript.append_point(c_l, b"L");
        transcript.append_point(c_r, b"R");
        let x = transcript.challenge_scalar(b"x");
        let x_inv = x.inverse().expect("challenges are nonzero with overwhelming probability");

        a = fold_scalars(&a_l, &a_r, x);
        b = fold_scalars(&b_l, &b_r, x_inv);
        current_basis = fold_points(&g_l, &g_r, x_inv);

        n = m;
        m = n / 2;
    }

    (y, Proof { l_vec, r_vec, a: a[0] })
}

/// Mirrors the prover's transcript sequence, folding the basis and `b`
/// vector the inefficient (non-multi-exponentiation) way, then checks the
/// final Bulletproofs equality.
pub fn check_ipa_proof(crs: &Crs, transcript: &mut Transcript, query: VerifierQuery) -> Result<(), Error> {
    transcript.domain_sep(b"ipa");

    let mut n = query.point_evaluations.len();
    let mut m = n / 2;

    transcript.append_point(query.commitment, b"C");
    transcript.append_scalar(query.point, b"input point");
    transcript.append_scalar(query.output_point, b"output point");
    let w = transcript.challenge_scalar(b"w");

    let q = crs.q().scalar_mul(&w);
    let mut current_commitment = query.commitment.add(&q.scalar_mul(&query.output_point));

    if query.proof.l_vec.len() != query.proof.r_vec.len() {
        return Err(Error::InvalidProof);
    }

    let mut xs = Vec::new();
    let mut x_invs = Vec::new();
    let mut round = 0usize;

    while n > 1 {
        if round >= query.proof.l_vec.len() {
            return Err(Error::InvalidProof);
        }
        tracing::trace!(round, n, "ipa verifier fold round");
        let c_l = query.proof.l_vec[round];
        let c_r = query.proof.r_vec[round];
        transcript.append_point(c_l, b"L");
        transcript.append_point(c_r, b"R");
        let x = transcript.challenge_scalar(b"x");
        let x_inv = x.inverse().ok_or(Error::InvalidProof)?;

        xs.push(x);
        x_invs.push(x_inv);

        current_commitment = current_commitment.add(&c_l.scalar_mul(&x)).add(&c_r.scalar_mul(&x_inv));

        n = m;
        m = n / 2;
        round += 1;
    }
    if round != query.proof.l_vec.len() {
        return Err(Error::InvalidProof);
    }
    tracing::debug!(rounds = round, "completed ipa verifier folding");

    let mut current_basis = crs.basis().to_vec();
    let mut b = query.point_evaluations.to_vec();
    for x_inv in &x_invs {
        let (g_l, g_r) = split_in_half(&current_basis);
        let (b_l, b_r) = split_in_half(&b);
        b = fold_scalars(&b_l, &b_r, *x_inv);
        current_basis = fold_points(&g_l, &g_r, *x_inv);
    }

    if b.len() != 1 || current_basis.len() != 1 {
        return Err(Error::InvalidProof);
    }
    let b_0 = b[0];
    let g_0 = current_basis[0];

    let got_commitment = g_0.scalar_mul(&query.proof.a).add(&q.scalar_mul(&(query.proof.a * b_0)));

    if current_commitment == got_commitment {
        Ok(())
    } else {
        tracing::warn!("ipa verification failed: final equality mismatch");
        Err(Error::InvalidProof)
    }
}
