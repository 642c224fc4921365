//! `Fp`: the Bandersnatch base field, i.e. the field the curve's `x`/`y`
//! affine coordinates live in. This is `ark_ed_on_bls12_381_bandersnatch`'s
//! scalar field `Fq` of the BLS12-381 curve (the naming is not a typo: the
//! "base field" of Bandersnatch equals the "scalar field" of the curve it is
//! embedded in, which is how this whole curve family is constructed).

use super::impl_prime_field;

impl_prime_field!(Fp, ark_ed_on_bls12_381_bandersnatch::Fq);

impl Fp {
    /// The twisted-Edwards curve coefficient `a = -5`.
    pub fn curve_a() -> Self {
        -Self::from_u64(5)
    }
}
