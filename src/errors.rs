//! Error types for the crate.
//!
//! Every fallible operation returns [`Error`]. The variants separate caller
//! mistakes (mismatched lengths), environment failures (entropy source),
//! adversarial input (points outside the prime-order subgroup) and honest
//! proof mismatches, so callers can react to each differently.
//!
//! # Examples
//!
//! ```rust
//! use bnpair::{Error, MsmConfig};
//!
//! let err = MsmConfig::new(0).unwrap_err();
//! assert!(matches!(err, Error::Argument(_)));
//! ```

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the pairing, MSM and commitment APIs.
#[derive(Debug, Error)]
pub enum Error {
    /// Mismatched input lengths or an invalid parameter. Detected before any
    /// computation starts.
    #[error("argument error: {0}")]
    Argument(String),
    /// The secure randomness source failed during setup.
    #[error("entropy source failure: {0}")]
    Io(#[from] std::io::Error),
    /// A point failed the on-curve or prime-order subgroup test.
    #[error("subgroup check failed")]
    SubgroupCheck,
    /// The pairing equation of a knowledge proof does not hold.
    #[error("proof rejected")]
    ProofRejected,
    /// Malformed bytes while decoding a key or point.
    #[error("serialization failure: {0}")]
    Serialization(#[from] ark_serialize::SerializationError),
}

impl Error {
    pub(crate) fn length_mismatch(what: &str, left: usize, right: usize) -> Self {
        Error::Argument(format!("{what}: length mismatch ({left} != {right})"))
    }

    pub(crate) fn entropy(err: rand_core::Error) -> Self {
        Error::Io(std::io::Error::new(std::io::ErrorKind::Other, err))
    }
}
