//! # bnpair: BN254 pairings and Pedersen commitments
//!
//! `bnpair` implements the optimal-ate pairing on BN254 on top of its own
//! extension-field tower, a parallel multi-scalar multiplication, and a Pedersen
//! vector commitment whose proof of knowledge is verified with one pairing check.
//!
//! Base-field arithmetic and the elliptic-curve group law come from
//! [`ark-bn254`](ark_bn254); everything above them lives here.
//!
//! ## Architecture
//!
//! Components build on each other from the bottom up:
//!
//! - **[`arith::tower`]**: [`E2`], [`E6`] and [`E12`] with the shared
//!   [`TowerField`] contract. Square roots, Legendre symbols, Frobenius maps
//!   and cyclotomic squaring.
//! - **[`arith::msm`]**: the bucket-method [`msm`], partitioned across rayon
//!   workers according to an [`MsmConfig`].
//! - **[`arith::pairing`]**: the [`PairingBackend`] trait and its [`Bn254`]
//!   engine: Miller loop, final exponentiation, multi-pairing and pairing checks.
//! - **[`arith::curve`]**: subgroup checks and [`hash_to_g2`].
//! - **[`pedersen`]**: the commitment [`Key`] with setup, commit and verify.
//!
//! ## Quick Example
//!
//! ```rust
//! use ark_bn254::{Fr, G1Projective};
//! use ark_ec::{CurveGroup, PrimeGroup};
//! use bnpair::Key;
//!
//! # fn main() -> bnpair::Result<()> {
//! let g = G1Projective::generator();
//! let basis: Vec<_> = (1..=4u64).map(|i| (g * Fr::from(i)).into_affine()).collect();
//!
//! // one-time trusted setup; σ never leaves this call
//! let key = Key::setup_from_entropy(&basis)?;
//!
//! let values = [Fr::from(10u64), Fr::from(20u64), Fr::from(30u64), Fr::from(40u64)];
//! let (commitment, proof) = key.commit(&values)?;
//! key.verify_knowledge_proof(&commitment, &proof)?;
//!
//! // keys persist as bytes (or through serde)
//! let restored = bnpair::Key::from_bytes(&key.to_bytes()?)?;
//! assert_eq!(restored, key);
//! # Ok(())
//! # }
//! ```
//!
//! ## Performance
//!
//! - MSM partitions run on the global rayon pool; [`MsmConfig::default`] uses
//!   one task per pool thread.
//! - [`PairingBackend::multi_pairing`] shares one final exponentiation across
//!   all pairs, so verifying `e(A, B) · e(C, D) = 1` costs little more than a
//!   single pairing.
//! - Modulus-derived constants are computed on first use and cached.
//!
//! ## Security Considerations
//!
//! - **Trusted setup**: [`Key::setup`] samples `σ` and drops it before
//!   returning. [`Key::setup_from_seed`] is reproducible and therefore only
//!   suitable for tests.
//! - **Untrusted points**: [`Key::verify_knowledge_proof`] and [`Key::from_bytes`]
//!   reject points that are off the curve or outside the prime-order subgroup.
//! - Field arithmetic is not audited for constant-time behaviour.

pub mod arith;
pub mod config;
mod errors;
pub mod pedersen;
mod serde_impl;

pub use arith::curve::{check_g1_subgroup, check_g2_subgroup, hash_to_g2};
pub use arith::msm::msm;
pub use arith::pairing::{Bn254, Gt, PairingBackend};
pub use arith::tower::{E2, E6, E12, TowerField};
pub use config::MsmConfig;
pub use errors::{Error, Result};
pub use pedersen::Key;
