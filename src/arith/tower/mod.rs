//! Towered extensions of the BN254 base field.
//!
//! The pairing target group lives in a degree-12 extension built as a tower:
//!
//! | Type | Construction | Used for |
//! |------|--------------|----------|
//! | [`E2`] | `Fq[u] / (u² + 1)` | G2 coordinates, line coefficients |
//! | [`E6`] | `E2[v] / (v³ − ξ)`, `ξ = 9 + u` | half of an `E12` |
//! | [`E12`] | `E6[w] / (w² − v)` | pairing target group `GT` |
//!
//! This is the same tower `ark-bn254` uses, so `Fq2` values convert to [`E2`]
//! without any change of basis.
//!
//! All three types implement [`TowerField`], which carries the shared field
//! contract and a generic square-and-multiply [`TowerField::exp`].
//!
//! # Example
//!
//! ```rust
//! use bnpair::{E2, TowerField};
//! use num_bigint::BigUint;
//!
//! let x = E2::from_u64s(3, 5);
//! assert_eq!(x.exp(&BigUint::from(2u32)), x * x);
//! ```

mod e12;
mod e2;
mod e6;
mod frobenius;

pub use e12::E12;
pub(crate) use e12::BN_X;
pub(crate) use frobenius::frobenius_coefficients;
pub use e2::E2;
pub use e6::E6;

use core::fmt::Debug;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_bigint::BigUint;

/// Field contract shared by every level of the tower.
pub trait TowerField:
    Copy
    + Clone
    + Debug
    + Default
    + Eq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
{
    /// Additive identity.
    fn zero() -> Self;

    /// Multiplicative identity.
    fn one() -> Self;

    fn is_zero(&self) -> bool;

    fn is_one(&self) -> bool {
        *self == Self::one()
    }

    fn double(&self) -> Self {
        *self + *self
    }

    fn square(&self) -> Self;

    /// Multiplicative inverse, `None` for zero.
    fn inverse(&self) -> Option<Self>;

    /// Raises `self` to `exponent`.
    ///
    /// Square-and-multiply over the big-endian bytes of the exponent, most
    /// significant bit first: one squaring per bit, one multiplication per set
    /// bit. Only as constant-time as the underlying base-field multiply.
    fn exp(&self, exponent: &BigUint) -> Self {
        let mut res = Self::one();
        for byte in exponent.to_bytes_be() {
            for j in 0..8 {
                res = res.square();
                if byte & (0x80 >> j) != 0 {
                    res *= *self;
                }
            }
        }
        res
    }
}

/// Derives the `*Assign` operators from the by-value ones.
macro_rules! impl_assign_ops {
    ($t:ty) => {
        impl core::ops::AddAssign for $t {
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl core::ops::SubAssign for $t {
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl core::ops::MulAssign for $t {
            fn mul_assign(&mut self, rhs: Self) {
                *self = *self * rhs;
            }
        }
    };
}

pub(crate) use impl_assign_ops;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn ring_laws<F: TowerField>(x: F, y: F, z: F) {
        assert_eq!((x + y) + z, x + (y + z));
        assert_eq!(x + y, y + x);
        assert_eq!(x * (y + z), x * y + x * z);
        assert_eq!((x * y) * z, x * (y * z));
        assert_eq!(x + (-x), F::zero());
        assert_eq!(x - y, x + (-y));
        assert_eq!(x.square(), x * x);
        assert_eq!(x.double(), x + x);
        if !x.is_zero() {
            let inv = x.inverse().expect("non-zero element");
            assert!((x * inv).is_one());
        }
    }

    fn exp_laws<F: TowerField>(x: F, a: u64, b: u64) {
        let two = BigUint::from(2u32);
        assert_eq!(x.exp(&two), x * x);
        let ea = x.exp(&BigUint::from(a));
        let eb = x.exp(&BigUint::from(b));
        let eab = x.exp(&(BigUint::from(a) + BigUint::from(b)));
        assert_eq!(eab, ea * eb);
        assert!(x.exp(&BigUint::from(0u32)).is_one());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn e2_ring_laws(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            ring_laws(E2::rand(&mut rng), E2::rand(&mut rng), E2::rand(&mut rng));
        }

        #[test]
        fn e6_ring_laws(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            ring_laws(E6::rand(&mut rng), E6::rand(&mut rng), E6::rand(&mut rng));
        }

        #[test]
        fn e12_ring_laws(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            ring_laws(E12::rand(&mut rng), E12::rand(&mut rng), E12::rand(&mut rng));
        }

        #[test]
        fn e2_exp_consistency(seed in any::<u64>(), a in 0u64..10_000, b in 0u64..10_000) {
            let mut rng = StdRng::seed_from_u64(seed);
            exp_laws(E2::rand(&mut rng), a, b);
        }

        #[test]
        fn e12_exp_consistency(seed in any::<u64>(), a in 0u64..1_000, b in 0u64..1_000) {
            let mut rng = StdRng::seed_from_u64(seed);
            exp_laws(E12::rand(&mut rng), a, b);
        }
    }

    #[test]
    fn zero_has_no_inverse() {
        assert!(E2::zero().inverse().is_none());
        assert!(E6::zero().inverse().is_none());
        assert!(E12::zero().inverse().is_none());
    }
}
