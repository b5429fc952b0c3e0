use core::ops::{Add, Mul, Neg, Sub};
use std::sync::OnceLock;

use ark_bn254::Fr;
use ark_ff::PrimeField;
use ark_std::rand::Rng;
use num_bigint::BigUint;

use super::frobenius::frobenius_coefficients;
use super::{E2, E6, TowerField, impl_assign_ops};

/// BN254 curve parameter `x`, the seed of `q`, `r` and the loop length.
pub(crate) const BN_X: u64 = 4965661367192848881;

/// Element `C0 + C1·w` of `E6[w] / (w² − v)`; the pairing target group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct E12 {
    pub c0: E6,
    pub c1: E6,
}

fn scalar_order() -> &'static BigUint {
    static ORDER: OnceLock<BigUint> = OnceLock::new();
    ORDER.get_or_init(|| BigUint::from(Fr::MODULUS))
}

impl E12 {
    pub const fn new(c0: E6, c1: E6) -> Self {
        Self { c0, c1 }
    }

    pub fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(E6::rand(rng), E6::rand(rng))
    }

    /// `C0 − C1·w`. Equals the `q⁶`-power Frobenius, hence the inverse of
    /// any element of the cyclotomic subgroup.
    pub fn conjugate(&self) -> Self {
        Self::new(self.c0, -self.c1)
    }

    /// Coefficients in the `w^k` basis, `k = 0..6`.
    fn to_w_basis(self) -> [E2; 6] {
        [
            self.c0.b0, self.c1.b0, self.c0.b1, self.c1.b1, self.c0.b2, self.c1.b2,
        ]
    }

    fn from_w_basis(k: [E2; 6]) -> Self {
        Self::new(E6::new(k[0], k[2], k[4]), E6::new(k[1], k[3], k[5]))
    }

    fn frobenius_map(&self, power: usize) -> Self {
        let gamma = &frobenius_coefficients().gamma[power - 1];
        let mut coeffs = self.to_w_basis();
        for (k, c) in coeffs.iter_mut().enumerate() {
            // E2 conjugation is the q-power map on coefficients
            let base = if power % 2 == 1 { c.conjugate() } else { *c };
            *c = base * gamma[k];
        }
        Self::from_w_basis(coeffs)
    }

    /// `self^q`
    pub fn frobenius(&self) -> Self {
        self.frobenius_map(1)
    }

    /// `self^(q²)`
    pub fn frobenius_square(&self) -> Self {
        self.frobenius_map(2)
    }

    /// `self^(q³)`
    pub fn frobenius_cube(&self) -> Self {
        self.frobenius_map(3)
    }

    /// Multiplies by a sparse line value `l0 + l1·w + l3·w³`.
    pub fn mul_by_034(&self, l0: &E2, l1: &E2, l3: &E2) -> Self {
        let t0 = self.c0.mul_by_e2(l0);
        let t1 = self.c1.mul_by_01(l1, l3);
        let c1 = (self.c0 + self.c1).mul_by_01(&(*l0 + *l1), l3) - t0 - t1;
        Self::new(t0 + t1.mul_by_nonresidue(), c1)
    }

    /// Granger–Scott squaring, valid only in the cyclotomic subgroup
    /// (elements with `self^(q⁴ − q² + 1)` order dividing `Φ₁₂(q)`).
    ///
    /// Viewing the element as `A + B·w + C·w²` over `E2[s]/(s² − ξ)` with
    /// `s = w³`, the square is `(3A² − 2Ā) + (3sC² + 2B̄)·w + (3B² − 2C̄)·w²`.
    pub fn cyclotomic_square(&self) -> Self {
        let [g0, h0, g1, h1, g2, h2] = self.to_w_basis();

        // (a + b·s)² = (a² + ξ·b²) + 2ab·s
        let fp4_square = |a: E2, b: E2| {
            let ab = a * b;
            (a.square() + b.square().mul_by_nonresidue(), ab + ab)
        };
        let triple = |x: E2| x.double() + x;

        let (a0, a1) = fp4_square(g0, h1);
        let (b0, b1) = fp4_square(h0, g2);
        let (c0, c1) = fp4_square(g1, h2);

        let na0 = triple(a0) - g0.double();
        let na1 = triple(a1) + h1.double();
        let nc0 = triple(b0) - g1.double();
        let nc1 = triple(b1) + h2.double();
        let nb0 = triple(c1.mul_by_nonresidue()) + h0.double();
        let nb1 = triple(c0) - g2.double();

        Self::from_w_basis([na0, nb0, nc0, na1, nb1, nc1])
    }

    /// Exponentiation using cyclotomic squarings. Only valid in the
    /// cyclotomic subgroup.
    pub fn cyclotomic_exp(&self, exponent: &BigUint) -> Self {
        let mut res = Self::one();
        for i in (0..exponent.bits()).rev() {
            res = res.cyclotomic_square();
            if exponent.bit(i) {
                res *= *self;
            }
        }
        res
    }

    /// `self^x` for the BN parameter `x`, on cyclotomic elements.
    pub fn expt(&self) -> Self {
        let mut res = Self::one();
        for i in (0..u64::BITS - BN_X.leading_zeros()).rev() {
            res = res.cyclotomic_square();
            if (BN_X >> i) & 1 == 1 {
                res *= *self;
            }
        }
        res
    }

    /// `true` if `self` lies in the order-`r` subgroup of `E12*`.
    pub fn is_in_subgroup(&self) -> bool {
        !self.is_zero() && self.exp(scalar_order()).is_one()
    }
}

impl TowerField for E12 {
    fn zero() -> Self {
        Self::new(E6::zero(), E6::zero())
    }

    fn one() -> Self {
        Self::new(E6::one(), E6::zero())
    }

    fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero()
    }

    fn square(&self) -> Self {
        // complex squaring: (c0 + c1·w)² = c0² + c1²·v + 2·c0·c1·w
        let t = self.c0 * self.c1;
        let c0 = (self.c0 + self.c1) * (self.c0 + self.c1.mul_by_nonresidue())
            - t
            - t.mul_by_nonresidue();
        Self::new(c0, t.double())
    }

    fn inverse(&self) -> Option<Self> {
        let denom = self.c0.square() - self.c1.square().mul_by_nonresidue();
        let inv = denom.inverse()?;
        Some(Self::new(self.c0 * inv, -(self.c1 * inv)))
    }
}

impl Add for E12 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.c0 + rhs.c0, self.c1 + rhs.c1)
    }
}

impl Sub for E12 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.c0 - rhs.c0, self.c1 - rhs.c1)
    }
}

impl Neg for E12 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1)
    }
}

impl Mul for E12 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let v0 = self.c0 * rhs.c0;
        let v1 = self.c1 * rhs.c1;
        let c1 = (self.c0 + self.c1) * (rhs.c0 + rhs.c1) - v0 - v1;
        Self::new(v0 + v1.mul_by_nonresidue(), c1)
    }
}

impl_assign_ops!(E12);
