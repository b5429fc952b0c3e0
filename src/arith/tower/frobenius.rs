use std::sync::OnceLock;

use ark_bn254::Fq;
use ark_ff::PrimeField;
use num_bigint::BigUint;

use super::{E2, TowerField};

/// Frobenius coefficients `γ[i][k] = ξ^(k·(q^(i+1) − 1)/6)` for `k = 0..6`.
///
/// An `E12` coefficient sitting on `w^k` picks up `γ[i][k]` under the
/// `q^(i+1)`-power map, since `w⁶ = ξ`.
pub(crate) struct FrobeniusCoefficients {
    pub(crate) gamma: [[E2; 6]; 3],
}

pub(crate) fn frobenius_coefficients() -> &'static FrobeniusCoefficients {
    static COEFFS: OnceLock<FrobeniusCoefficients> = OnceLock::new();
    COEFFS.get_or_init(|| {
        let q = BigUint::from(Fq::MODULUS);
        let xi = E2::from_u64s(9, 1);
        let mut gamma = [[E2::one(); 6]; 3];
        let mut q_pow = q.clone();
        for row in gamma.iter_mut() {
            let step = (&q_pow - 1u32) / 6u32;
            for (k, slot) in row.iter_mut().enumerate() {
                *slot = xi.exp(&(&step * k));
            }
            q_pow *= &q;
        }
        FrobeniusCoefficients { gamma }
    })
}
