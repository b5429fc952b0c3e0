//! BN254 source groups and the glue the pairing and commitment layers need.
//!
//! Point arithmetic, encoding and scalar multiplication come from `ark-bn254`.
//! This module adds what that crate leaves out:
//!
//! - **[`hash_to_g2`]**: a deterministic map from bytes to a G2 point, built on
//!   [`E2::legendre`] and [`E2::sqrt`]
//! - **[`check_g1_subgroup`] / [`check_g2_subgroup`]**: on-curve plus
//!   prime-order membership tests for untrusted points
//! - conversions between `ark-bn254` coordinates and the [`E2`] tower

use ark_bn254::{Fq, G1Affine, G2Affine};
use ark_ec::AffineRepr;
use ark_ec::short_weierstrass::SWCurveConfig;
use ark_ff::PrimeField;
use tracing::trace;

use crate::arith::tower::{E2, TowerField};

/// Coefficient `b' = 3 / ξ` of the sextic twist `y² = x³ + b'`.
pub(crate) fn twist_coeff_b() -> E2 {
    E2::from(ark_bn254::g2::Config::COEFF_B)
}

/// Affine G2 coordinates as [`E2`] values, `None` for the identity.
pub(crate) fn g2_coordinates(q: &G2Affine) -> Option<(E2, E2)> {
    q.xy().map(|(x, y)| (E2::from(x), E2::from(y)))
}

/// `true` if `p` is on the curve and in the order-`r` subgroup.
pub fn check_g1_subgroup(p: &G1Affine) -> bool {
    p.is_on_curve() && p.is_in_correct_subgroup_assuming_on_curve()
}

/// `true` if `q` is on the twist and in the order-`r` subgroup.
pub fn check_g2_subgroup(q: &G2Affine) -> bool {
    q.is_on_curve() && q.is_in_correct_subgroup_assuming_on_curve()
}

/// Hashes `msg` to a point of G2, domain-separated by `dst`.
///
/// Try-and-increment: BLAKE3 in XOF mode yields a candidate `x ∈ E2` and a sign
/// bit; candidates whose right-hand side `x³ + b'` is not a square are skipped.
/// The square root's sign is fixed with
/// [`lexicographically_largest`](E2::lexicographically_largest) and the point is
/// multiplied by the cofactor. Never returns the identity.
pub fn hash_to_g2(msg: &[u8], dst: &[u8]) -> G2Affine {
    let b = twist_coeff_b();
    let mut counter: u64 = 0;
    loop {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(dst.len() as u64).to_le_bytes());
        hasher.update(dst);
        hasher.update(msg);
        hasher.update(&counter.to_le_bytes());
        let mut xof = [0u8; 97];
        hasher.finalize_xof().fill(&mut xof);
        counter += 1;

        let x = E2::new(
            Fq::from_be_bytes_mod_order(&xof[..48]),
            Fq::from_be_bytes_mod_order(&xof[48..96]),
        );
        let rhs = x.square() * x + b;
        if rhs.legendre() != 1 {
            trace!(counter, "candidate is off the twist, retrying");
            continue;
        }

        let mut y = rhs.sqrt();
        if y.lexicographically_largest() != (xof[96] & 1 == 1) {
            y = -y;
        }
        let point = G2Affine::new_unchecked(x.into(), y.into()).clear_cofactor();
        if !point.is_zero() {
            return point;
        }
    }
}
