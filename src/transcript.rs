//! SHA-256-based Fiat-Shamir transcript. Protocols absorb points and
//! scalars labelled by byte strings, then squeeze challenges that rebind
//! themselves into the state so a second squeeze under the same label can
//! never repeat a prior one.

use sha2::{Digest, Sha256};

use crate::banderwagon::Element;
use crate::fields::Fr;

pub struct Transcript {
    state: Sha256,
}

impl Transcript {
    /// Starts a new transcript, absorbing `label` as the sub-protocol's
    /// domain separator (e.g. `b"ipa"`, `b"multiproof"`).
    pub fn new(label: &[u8]) -> Self {
        let mut state = Sha256::new();
        state.update(label);
        Self { state }
    }

    fn append_bytes(&mut self, label: &[u8], message: &[u8]) {
        self.state.update(label);
        self.state.update(message);
    }

    pub fn append_scalar(&mut self, scalar: Fr, label: &[u8]) {
        self.append_bytes(label, &scalar.to_bytes());
    }

    pub fn append_point(&mut self, point: Element, label: &[u8]) {
        self.append_bytes(label, &point.to_bytes());
    }

    /// Absorbs `label` alone — used both to separate appends from squeezes
    /// and to separate independent sub-protocols.
    pub fn domain_sep(&mut self, label: &[u8]) {
        self.state.update(label);
    }

    /// Finalizes the running digest into a challenge, then resets the
    /// SHA-256 state and re-absorbs the challenge (labelled) so that a
    /// second `challenge_scalar` call under the same label cannot reproduce
    /// the same value. The reset itself is cosmetic; the rebind is what
    /// makes repeat squeezes safe.
    pub fn challenge_scalar(&mut self, label: &[u8]) -> Fr {
        self.domain_sep(label);

        let digest = core::mem::replace(&mut self.state, Sha256::new()).finalize();
        let challenge = Fr::from_bytes_reduce(&digest);

        self.append_scalar(challenge, label);

        challenge
    }
}
