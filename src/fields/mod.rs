//! Prime field arithmetic for the two fields this crate needs: `Fp` (the
//! Bandersnatch base field, 255 bits) and `Fr` (the Bandersnatch/Banderwagon
//! scalar field, 253 bits). Both are 32-byte-wide prime fields, so they share
//! one implementation template (`impl_prime_field!`) the same way a single
//! generic `Suite` trait served every VRF ciphersuite in this crate's
//! ancestor.
//!
//! The limb-level arithmetic (Montgomery multiplication, Fermat inverse,
//! Tonelli-Shanks square root, Legendre symbol, batch inversion) is not
//! reimplemented here: it is delegated to `ark_ff`'s `Field`/`PrimeField`
//! machinery over the concrete Bandersnatch fields from
//! `ark-ed-on-bls12-381-bandersnatch`. This module's job is to expose that
//! arithmetic through the byte-level API the rest of the crate (and the
//! spec) is written against.

mod fp;
mod fr;

pub use fp::Fp;
pub use fr::Fr;

use crate::error::Error;

/// Three-valued Legendre symbol, `a^((p-1)/2) mod p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Legendre {
    Zero,
    QuadraticResidue,
    QuadraticNonResidue,
}

impl Legendre {
    /// The symbol as `{-1, 0, 1}`.
    pub fn to_i8(self) -> i8 {
        match self {
            Legendre::Zero => 0,
            Legendre::QuadraticResidue => 1,
            Legendre::QuadraticNonResidue => -1,
        }
    }
}

impl From<ark_ff::LegendreSymbol> for Legendre {
    fn from(value: ark_ff::LegendreSymbol) -> Self {
        match value {
            ark_ff::LegendreSymbol::Zero => Legendre::Zero,
            ark_ff::LegendreSymbol::QuadraticResidue => Legendre::QuadraticResidue,
            ark_ff::LegendreSymbol::QuadraticNonResidue => Legendre::QuadraticNonResidue,
        }
    }
}

/// Generates a 32-byte-wide prime field newtype over an `ark_ff::PrimeField`
/// backend, exposing a fixed surface of operations: add/sub/mul/
/// neg/inverse/div/pow/sqrt/legendre/lexicographically_largest/
/// batch_inverse/to_bytes/from_bytes/from_bytes_reduce.
macro_rules! impl_prime_field {
    ($name:ident, $inner:ty) => {
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name(pub(crate) $inner);

        impl $name {
            pub fn zero() -> Self {
                Self(<$inner as ark_ff::Zero>::zero())
            }

            pub fn one() -> Self {
                Self(<$inner as ark_ff::One>::one())
            }

            pub fn is_zero(&self) -> bool {
                ark_ff::Zero::is_zero(&self.0)
            }

            pub fn from_u64(value: u64) -> Self {
                Self(<$inner>::from(value))
            }

            pub fn from_i64(value: i64) -> Self {
                if value >= 0 {
                    Self::from_u64(value as u64)
                } else {
                    -Self::from_u64((-value) as u64)
                }
            }

            pub fn add(&self, other: &Self) -> Self {
                Self(self.0 + other.0)
            }

            pub fn sub(&self, other: &Self) -> Self {
                Self(self.0 - other.0)
            }

            pub fn mul(&self, other: &Self) -> Self {
                Self(self.0 * other.0)
            }

            pub fn neg(&self) -> Self {
                Self(-self.0)
            }

            pub fn square(&self) -> Self {
                Self(self.0.square())
            }

            /// `a^(p-2)` via Fermat's little theorem, delegated to
            /// `ark_ff::Field::inverse`. `None` iff `self` is zero.
            pub fn inverse(&self) -> Option<Self> {
                ark_ff::Field::inverse(&self.0).map(Self)
            }

            pub fn div(&self, other: &Self) -> Option<Self> {
                other.inverse().map(|inv| self.mul(&inv))
            }

            pub fn pow(&self, exponent: &[u64]) -> Self {
                Self(ark_ff::Field::pow(&self.0, exponent))
            }

            /// Square root via Tonelli-Shanks (this field's modulus is `1
            /// mod 4`, so the `(p+1)/4` shortcut does not apply and full
            /// Tonelli-Shanks is required; `ark_ff` dispatches on the
            /// field's `SqrtPrecomputation` and does exactly that).
            /// `None` if `self` has no square root.
            pub fn sqrt(&self) -> Option<Self> {
                ark_ff::Field::sqrt(&self.0).map(Self)
            }

            /// `self^((p-1)/2) \in {-1, 0, 1}`.
            pub fn legendre(&self) -> $crate::fields::Legendre {
                ark_ff::Field::legendre(&self.0).into()
            }

            /// `true` iff `self > (p-1)/2`, treating `self` as the integer
            /// in `[0, p)`.
            pub fn lexicographically_largest(&self) -> bool {
                use ark_ff::PrimeField;
                self.0.into_bigint() > <$inner as PrimeField>::MODULUS_MINUS_ONE_DIV_TWO
            }

            /// Montgomery's batch-inversion trick: every element's inverse
            /// in one field inversion plus `O(n)` multiplications. Elements
            /// that are zero are left as zero, matching `ark_ff`'s
            /// behaviour.
            pub fn batch_inverse(values: &mut [Self]) {
                // SAFETY-free transmute: `Self` is a `#[repr(transparent)]`-
                // equivalent single-field newtype over `$inner`, so a
                // `&mut [Self]` and `&mut [$inner]` have the same layout.
                // We avoid `unsafe` by copying through a scratch vector
                // instead.
                let mut inner: ark_std::vec::Vec<$inner> =
                    values.iter().map(|v| v.0).collect();
                ark_ff::fields::batch_inversion(&mut inner);
                for (dst, src) in values.iter_mut().zip(inner.into_iter()) {
                    dst.0 = src;
                }
            }

            /// Canonical little-endian 32-byte encoding.
            pub fn to_bytes(&self) -> [u8; 32] {
                use ark_serialize::CanonicalSerialize;
                let mut bytes = [0u8; 32];
                self.0
                    .serialize_compressed(&mut bytes[..])
                    .expect("field element always serializes to 32 bytes");
                bytes
            }

            /// Decodes 32 little-endian bytes, rejecting values `>= p`.
            pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, Error> {
                use ark_serialize::CanonicalDeserialize;
                <$inner>::deserialize_compressed(&bytes[..])
                    .map(Self)
                    .map_err(|_| Error::NonCanonicalEncoding)
            }

            /// Decodes any-length bytes, reducing modulo `p`.
            pub fn from_bytes_reduce(bytes: &[u8]) -> Self {
                use ark_ff::PrimeField;
                Self(<$inner>::from_le_bytes_mod_order(bytes))
            }
        }

        impl core::ops::Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                $name::add(&self, &rhs)
            }
        }
        impl core::ops::Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                $name::sub(&self, &rhs)
            }
        }
        impl core::ops::Mul for $name {
            type Output = Self;
            fn mul(self, rhs: Self) -> Self {
                $name::mul(&self, &rhs)
            }
        }
        impl core::ops::Neg for $name {
            type Output = Self;
            fn neg(self) -> Self {
                $name::neg(&self)
            }
        }
        impl core::ops::AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }
        impl core::ops::SubAssign for $name {
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}(0x{})", stringify!($name), hex_upper(&self.to_bytes()))
            }
        }
    };
}

fn hex_upper(bytes: &[u8]) -> alloc_free_hex::HexDisplay<'_> {
    alloc_free_hex::HexDisplay(bytes)
}

/// Tiny no-alloc hex formatter so `Debug` works the same under `no_std`.
mod alloc_free_hex {
    pub struct HexDisplay<'a>(pub &'a [u8]);
    impl<'a> core::fmt::Display for HexDisplay<'a> {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            for byte in self.0.iter().rev() {
                write!(f, "{:02x}", byte)?;
            }
            Ok(())
        }
    }
}

pub(crate) use impl_prime_field;
