//! Multi-scalar multiplication `Σ scalars[i]·bases[i]`.
//!
//! Inputs are split into [`MsmConfig::nb_tasks`] chunks reduced in parallel on
//! the rayon pool. Each chunk uses the bucket (Pippenger) method: scalars are
//! cut into `c`-bit windows, bases are dropped into the bucket of their window
//! digit, and the buckets of each window are combined with a running sum.
//! Chunk results are added in whatever order rayon finishes them, which is
//! fine because the group is commutative.
//!
//! # Example
//!
//! ```rust
//! use ark_bn254::{Fr, G1Projective};
//! use ark_ec::{CurveGroup, PrimeGroup};
//! use bnpair::{MsmConfig, msm};
//!
//! let g = G1Projective::generator().into_affine();
//! let sum = msm(&[g, g], &[Fr::from(2u64), Fr::from(5u64)], &MsmConfig::default())?;
//! assert_eq!(sum, G1Projective::generator() * Fr::from(7u64));
//! # Ok::<(), bnpair::Error>(())
//! ```

use ark_ec::AffineRepr;
use ark_ff::{AdditiveGroup, PrimeField, Zero};
use rayon::prelude::*;
use tracing::instrument;

use crate::config::MsmConfig;
use crate::errors::{Error, Result};

type ScalarRepr<A> = <<A as AffineRepr>::ScalarField as PrimeField>::BigInt;

/// Computes `Σ scalars[i]·bases[i]`.
///
/// Fails with [`Error::Argument`] if the slices differ in length or the
/// configuration is invalid. An empty input sums to the identity.
#[instrument(level = "trace", skip_all, fields(len = bases.len(), nb_tasks = config.nb_tasks))]
pub fn msm<A: AffineRepr>(
    bases: &[A],
    scalars: &[A::ScalarField],
    config: &MsmConfig,
) -> Result<A::Group> {
    if bases.len() != scalars.len() {
        return Err(Error::length_mismatch("msm", bases.len(), scalars.len()));
    }
    config.validate()?;

    let pairs: Vec<(A, ScalarRepr<A>)> = bases
        .iter()
        .zip(scalars)
        .filter(|(base, scalar)| !base.is_zero() && !scalar.is_zero())
        .map(|(base, scalar)| (*base, scalar.into_bigint()))
        .collect();
    if pairs.is_empty() {
        return Ok(A::Group::zero());
    }

    let c = window_size(pairs.len());
    let chunk_len = pairs.len().div_ceil(config.nb_tasks);
    Ok(pairs
        .par_chunks(chunk_len)
        .map(|chunk| bucket_msm::<A>(chunk, c))
        .reduce(A::Group::zero, |a, b| a + b))
}

fn window_size(n: usize) -> usize {
    if n < 32 {
        3
    } else {
        (n as f64).ln().ceil() as usize + 2
    }
}

/// The `c`-bit digit of a little-endian limb array starting at bit `start`.
fn window_digit(limbs: &[u64], start: usize, c: usize) -> usize {
    let limb = start / 64;
    let shift = start % 64;
    let mut digit = limbs[limb] >> shift;
    if shift + c > 64 && limb + 1 < limbs.len() {
        digit |= limbs[limb + 1] << (64 - shift);
    }
    (digit & ((1u64 << c) - 1)) as usize
}

fn bucket_msm<A: AffineRepr>(pairs: &[(A, ScalarRepr<A>)], c: usize) -> A::Group {
    let num_bits = A::ScalarField::MODULUS_BIT_SIZE as usize;
    let zero = A::Group::zero();

    let window_sums: Vec<A::Group> = (0..num_bits)
        .step_by(c)
        .map(|start| {
            let mut buckets = vec![zero; (1 << c) - 1];
            for (base, scalar) in pairs {
                let digit = window_digit(scalar.as_ref(), start, c);
                if digit != 0 {
                    buckets[digit - 1] += *base;
                }
            }
            // Σ d·bucket[d] via running sums, highest digit first
            let mut running = zero;
            let mut sum = zero;
            for bucket in buckets.into_iter().rev() {
                running += bucket;
                sum += running;
            }
            sum
        })
        .collect();

    window_sums.into_iter().rev().fold(zero, |mut total, window| {
        for _ in 0..c {
            total.double_in_place();
        }
        total + window
    })
}
