//! Bilinear pairing `e: G1 × G2 → GT`.
//!
//! The [`PairingBackend`] trait is the seam between protocols and a concrete
//! engine. [`Bn254`] is the optimal-ate pairing on BN254, computed with the
//! [`E12`](crate::E12) tower from [`crate::arith::tower`].
//!
//! A pairing is split into two stages:
//!
//! 1. [`miller_loop`](PairingBackend::miller_loop) evaluates line functions along
//!    the loop `6x + 2` and multiplies them into one unreduced `GT` value. Several
//!    pairs share a single accumulator.
//! 2. [`final_exponentiation`](PairingBackend::final_exponentiation) raises the
//!    accumulator to `(q¹² − 1)/r`, landing in the order-`r` subgroup.
//!
//! The final exponentiation distributes over a product of Miller loops, so a
//! product of `n` pairings costs `n` Miller loops and one exponentiation.
//! [`pairing_check`](PairingBackend::pairing_check) exploits this to test
//! equations of the form `e(A, B) · e(C, D) = 1`.
//!
//! # Example
//!
//! ```rust
//! use ark_bn254::{G1Projective, G2Projective};
//! use ark_ec::{CurveGroup, PrimeGroup};
//! use bnpair::{Bn254, PairingBackend};
//!
//! let p = G1Projective::generator().into_affine();
//! let q = G2Projective::generator().into_affine();
//!
//! // e(P, Q) · e(−P, Q) = 1
//! assert!(Bn254::pairing_check(&[p, -p], &[q, q]).unwrap());
//! ```

use core::fmt::Debug;

use crate::arith::tower::TowerField;
use crate::errors::Result;

mod bn254;

pub use bn254::{Bn254, Gt};

/// A pairing engine over a fixed pair of source groups.
pub trait PairingBackend: Send + Sync + Debug + Sized + 'static {
    /// First source group.
    type G1: Clone + Debug + Send + Sync;
    /// Second source group.
    type G2: Clone + Debug + Send + Sync;
    /// Pairing target group, written multiplicatively.
    type Target: TowerField;

    /// Product of the Miller loops of `p[i]` and `q[i]`.
    ///
    /// Pairs where either point is the identity contribute `1`. Fails with
    /// [`Error::Argument`](crate::Error::Argument) when the lengths differ.
    fn miller_loop(p: &[Self::G1], q: &[Self::G2]) -> Result<Self::Target>;

    /// Maps a Miller loop output into the order-`r` subgroup of the target.
    fn final_exponentiation(f: &Self::Target) -> Self::Target;

    /// `e(p, q)`.
    fn pairing(p: &Self::G1, q: &Self::G2) -> Self::Target;

    /// `∏ e(p[i], q[i])` with a single final exponentiation.
    fn multi_pairing(p: &[Self::G1], q: &[Self::G2]) -> Result<Self::Target> {
        let f = Self::miller_loop(p, q)?;
        Ok(Self::final_exponentiation(&f))
    }

    /// `true` iff `∏ e(p[i], q[i]) = 1`.
    fn pairing_check(p: &[Self::G1], q: &[Self::G2]) -> Result<bool> {
        Ok(Self::multi_pairing(p, q)?.is_one())
    }
}
