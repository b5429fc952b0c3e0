//! Pedersen vector commitments with a proof of knowledge.
//!
//! A [`Key`] is produced once by a trusted setup over a basis of G1 points and
//! then shared read-only. Committing to a vector of scalars yields a pair:
//!
//! - the **commitment** `C = Σ vᵢ·basisᵢ`
//! - the **knowledge proof** `K = Σ vᵢ·basisᵢ^σ = C^σ`
//!
//! Only someone who computed `C` as a combination of the basis can produce the
//! matching `K`. Verification checks `e(C, g) · e(K, g^(−1/σ)) = 1` with a single
//! [`pairing_check`](crate::PairingBackend::pairing_check), after rejecting any
//! point outside the prime-order subgroup.
//!
//! # Lifecycle
//!
//! ```text
//! basis ──setup──► Key ──commit(values)──► (C, K) ──verify_knowledge_proof──► Ok / Err
//!                   │
//!                   └── to_bytes / from_bytes, serde
//! ```
//!
//! The secret `σ` exists only inside [`Key::setup`]; the key stores nothing
//! from which it could be recovered.
//!
//! # Example
//!
//! ```rust
//! use ark_bn254::{Fr, G1Projective};
//! use ark_ec::{CurveGroup, PrimeGroup};
//! use bnpair::{Error, Key};
//!
//! let g = G1Projective::generator();
//! let basis = vec![g.into_affine(), (g + g).into_affine(), (g * Fr::from(5u64)).into_affine()];
//!
//! let key = Key::setup_from_entropy(&basis)?;
//! let (commitment, proof) = key.commit(&[Fr::from(1u64), Fr::from(2u64), Fr::from(3u64)])?;
//! key.verify_knowledge_proof(&commitment, &proof)?;
//!
//! // a proof for a different commitment is rejected
//! let err = key.verify_knowledge_proof(&basis[0], &proof).unwrap_err();
//! assert!(matches!(err, Error::ProofRejected));
//! # Ok::<(), Error>(())
//! ```

mod key;
mod scheme;

pub use key::Key;
