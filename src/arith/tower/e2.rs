use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};
use std::sync::OnceLock;

use ark_bn254::{Fq, Fq2};
use ark_ff::{Field, LegendreSymbol, One, PrimeField, Zero};
use ark_std::UniformRand;
use ark_std::rand::Rng;
use num_bigint::BigUint;

use super::{TowerField, impl_assign_ops};

/// Element `A0 + A1·u` of the quadratic extension `Fq[u] / (u² + 1)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct E2 {
    pub a0: Fq,
    pub a1: Fq,
}

/// Exponents used by [`E2::sqrt`], derived once from the base modulus `q`.
struct SqrtExponents {
    /// `(q - 3) / 4`
    e1: BigUint,
    /// `(q - 1) / 2`
    e2: BigUint,
}

fn sqrt_exponents() -> &'static SqrtExponents {
    static EXPONENTS: OnceLock<SqrtExponents> = OnceLock::new();
    EXPONENTS.get_or_init(|| {
        let q = BigUint::from(Fq::MODULUS);
        SqrtExponents {
            e1: (&q - 3u32) >> 2u32,
            e2: (&q - 1u32) >> 1u32,
        }
    })
}

/// `true` if `x > -x` when both are read as integers in `[0, q)`.
fn fq_lexicographically_largest(x: &Fq) -> bool {
    x.into_bigint() > Fq::MODULUS_MINUS_ONE_DIV_TWO
}

fn fq_times_nine(x: Fq) -> Fq {
    let x2 = x + x;
    let x4 = x2 + x2;
    let x8 = x4 + x4;
    x8 + x
}

impl E2 {
    pub const fn new(a0: Fq, a1: Fq) -> Self {
        Self { a0, a1 }
    }

    /// Convenience constructor from small integers.
    pub fn from_u64s(a0: u64, a1: u64) -> Self {
        Self::new(Fq::from(a0), Fq::from(a1))
    }

    /// Embeds a base-field element as `x + 0·u`.
    pub fn from_base(x: Fq) -> Self {
        Self::new(x, Fq::zero())
    }

    pub fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(Fq::rand(rng), Fq::rand(rng))
    }

    /// Multiplies both components by a base-field element.
    pub fn mul_by_base_field(&self, y: &Fq) -> Self {
        Self::new(self.a0 * y, self.a1 * y)
    }

    /// Multiplies by `ξ = 9 + u`, the cubic non-residue defining [`E6`](super::E6).
    pub fn mul_by_nonresidue(&self) -> Self {
        Self::new(
            fq_times_nine(self.a0) - self.a1,
            self.a0 + fq_times_nine(self.a1),
        )
    }

    /// `A0 - A1·u`, the image under the `q`-power Frobenius.
    pub fn conjugate(&self) -> Self {
        Self::new(self.a0, -self.a1)
    }

    /// Field norm `A0² + A1²` down to the base field.
    pub fn norm(&self) -> Fq {
        self.a0.square() + self.a1.square()
    }

    /// Legendre symbol: `1` for a non-zero square, `-1` for a non-square,
    /// `0` for zero. Computed from the base-field symbol of the norm.
    pub fn legendre(&self) -> i8 {
        match self.norm().legendre() {
            LegendreSymbol::Zero => 0,
            LegendreSymbol::QuadraticResidue => 1,
            LegendreSymbol::QuadraticNonResidue => -1,
        }
    }

    /// Returns a square root of `self`.
    ///
    /// Callers must first check that [`legendre`](Self::legendre) is not `-1`;
    /// the result is meaningless for a non-square and no check is made here.
    /// Valid because `q ≡ 3 (mod 4)` (eprint 2012/685, algorithm 9).
    pub fn sqrt(&self) -> Self {
        let exps = sqrt_exponents();
        let a1 = self.exp(&exps.e1);
        let alpha = a1.square() * *self;
        let x0 = *self * a1;
        if alpha == -Self::one() {
            // multiply by u, a fourth root of unity
            return Self::new(-x0.a1, x0.a0);
        }
        let b = (Self::one() + alpha).exp(&exps.e2);
        b * x0
    }

    /// `true` if `self` is strictly larger than `-self` in the lexicographic
    /// order, comparing `A1` first. Used to fix the sign of square roots.
    pub fn lexicographically_largest(&self) -> bool {
        if self.a1.is_zero() {
            fq_lexicographically_largest(&self.a0)
        } else {
            fq_lexicographically_largest(&self.a1)
        }
    }
}

impl TowerField for E2 {
    fn zero() -> Self {
        Self::new(Fq::zero(), Fq::zero())
    }

    fn one() -> Self {
        Self::new(Fq::one(), Fq::zero())
    }

    fn is_zero(&self) -> bool {
        self.a0.is_zero() && self.a1.is_zero()
    }

    fn square(&self) -> Self {
        // (a0 + a1)(a0 - a1) + 2·a0·a1·u
        let a = (self.a0 + self.a1) * (self.a0 - self.a1);
        let b = self.a0 * self.a1;
        Self::new(a, b + b)
    }

    fn inverse(&self) -> Option<Self> {
        let t = self.norm().inverse()?;
        Some(Self::new(self.a0 * t, -(self.a1 * t)))
    }
}

impl Add for E2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.a0 + rhs.a0, self.a1 + rhs.a1)
    }
}

impl Sub for E2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.a0 - rhs.a0, self.a1 - rhs.a1)
    }
}

impl Neg for E2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.a0, -self.a1)
    }
}

impl Mul for E2 {
    type Output = Self;

    /// Karatsuba: three base-field multiplications.
    fn mul(self, rhs: Self) -> Self {
        let v0 = self.a0 * rhs.a0;
        let v1 = self.a1 * rhs.a1;
        let cross = (self.a0 + self.a1) * (rhs.a0 + rhs.a1);
        Self::new(v0 - v1, cross - v0 - v1)
    }
}

impl_assign_ops!(E2);

impl Ord for E2 {
    /// Lexicographic order, higher-degree component first.
    fn cmp(&self, other: &Self) -> Ordering {
        self.a1.cmp(&other.a1).then_with(|| self.a0.cmp(&other.a0))
    }
}

impl PartialOrd for E2 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for E2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}*u", self.a0, self.a1)
    }
}

impl From<Fq2> for E2 {
    fn from(x: Fq2) -> Self {
        Self::new(x.c0, x.c1)
    }
}

impl From<E2> for Fq2 {
    fn from(x: E2) -> Self {
        Fq2::new(x.a0, x.a1)
    }
}
