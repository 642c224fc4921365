//! Crate-wide error type.

/// Errors surfaced by field/point decoding, polynomial arithmetic, and the
/// parts of the IPA/multiproof/trie APIs that return structured failures
/// rather than a plain `bool`.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A field or point byte encoding did not represent a canonical value
    /// (the integer was `>= p`, or a point-bytes round-trip failed).
    #[error("non-canonical encoding")]
    NonCanonicalEncoding,

    /// A candidate affine point failed the twisted-Edwards curve equation.
    #[error("point is not on the Bandersnatch curve")]
    NotOnCurve,

    /// A candidate point passed `is_on_curve` but failed the Banderwagon
    /// subgroup check.
    #[error("point is not in the Banderwagon prime-order subgroup")]
    NotInSubgroup,

    /// Arithmetic was attempted between `LagrangeBasis` polynomials defined
    /// over different domains.
    #[error("domain mismatch between polynomials")]
    DomainMismatch,

    /// An IPA or multiproof failed its final verification equation.
    #[error("invalid proof")]
    InvalidProof,

    /// An operation the core intentionally does not implement (deletion via
    /// null-value insert, proof creation/verification for the trie).
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
