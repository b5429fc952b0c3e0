use core::ops::{Add, Mul, Neg, Sub};

use ark_bn254::Fq;
use ark_std::rand::Rng;

use super::{E2, TowerField, impl_assign_ops};

/// Element `B0 + B1·v + B2·v²` of `E2[v] / (v³ − ξ)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct E6 {
    pub b0: E2,
    pub b1: E2,
    pub b2: E2,
}

impl E6 {
    pub const fn new(b0: E2, b1: E2, b2: E2) -> Self {
        Self { b0, b1, b2 }
    }

    pub fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(E2::rand(rng), E2::rand(rng), E2::rand(rng))
    }

    /// Multiplies by `v`.
    pub fn mul_by_nonresidue(&self) -> Self {
        Self::new(self.b2.mul_by_nonresidue(), self.b0, self.b1)
    }

    pub fn mul_by_e2(&self, c: &E2) -> Self {
        Self::new(self.b0 * *c, self.b1 * *c, self.b2 * *c)
    }

    pub fn mul_by_base_field(&self, c: &Fq) -> Self {
        Self::new(
            self.b0.mul_by_base_field(c),
            self.b1.mul_by_base_field(c),
            self.b2.mul_by_base_field(c),
        )
    }

    /// Multiplies by the sparse element `c0 + c1·v`.
    pub fn mul_by_01(&self, c0: &E2, c1: &E2) -> Self {
        let v0 = self.b0 * *c0;
        let v1 = self.b1 * *c1;
        let t0 = ((self.b1 + self.b2) * *c1 - v1).mul_by_nonresidue() + v0;
        let t1 = (self.b0 + self.b1) * (*c0 + *c1) - v0 - v1;
        let t2 = (self.b0 + self.b2) * *c0 - v0 + v1;
        Self::new(t0, t1, t2)
    }
}

impl TowerField for E6 {
    fn zero() -> Self {
        Self::new(E2::zero(), E2::zero(), E2::zero())
    }

    fn one() -> Self {
        Self::new(E2::one(), E2::zero(), E2::zero())
    }

    fn is_zero(&self) -> bool {
        self.b0.is_zero() && self.b1.is_zero() && self.b2.is_zero()
    }

    fn square(&self) -> Self {
        *self * *self
    }

    fn inverse(&self) -> Option<Self> {
        let t0 = self.b0.square() - (self.b1 * self.b2).mul_by_nonresidue();
        let t1 = self.b2.square().mul_by_nonresidue() - self.b0 * self.b1;
        let t2 = self.b1.square() - self.b0 * self.b2;
        let denom = self.b0 * t0 + (self.b2 * t1 + self.b1 * t2).mul_by_nonresidue();
        let inv = denom.inverse()?;
        Some(Self::new(t0 * inv, t1 * inv, t2 * inv))
    }
}

impl Add for E6 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.b0 + rhs.b0, self.b1 + rhs.b1, self.b2 + rhs.b2)
    }
}

impl Sub for E6 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.b0 - rhs.b0, self.b1 - rhs.b1, self.b2 - rhs.b2)
    }
}

impl Neg for E6 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.b0, -self.b1, -self.b2)
    }
}

impl Mul for E6 {
    type Output = Self;

    /// Karatsuba over the cubic extension: six `E2` multiplications.
    fn mul(self, rhs: Self) -> Self {
        let v0 = self.b0 * rhs.b0;
        let v1 = self.b1 * rhs.b1;
        let v2 = self.b2 * rhs.b2;
        let c0 = ((self.b1 + self.b2) * (rhs.b1 + rhs.b2) - v1 - v2).mul_by_nonresidue() + v0;
        let c1 = (self.b0 + self.b1) * (rhs.b0 + rhs.b1) - v0 - v1 + v2.mul_by_nonresidue();
        let c2 = (self.b0 + self.b2) * (rhs.b0 + rhs.b2) - v0 - v2 + v1;
        Self::new(c0, c1, c2)
    }
}

impl_assign_ops!(E6);

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn sparse_products_match_dense() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..16 {
            let x = E6::rand(&mut rng);
            let c0 = E2::rand(&mut rng);
            let c1 = E2::rand(&mut rng);
            assert_eq!(x.mul_by_01(&c0, &c1), x * E6::new(c0, c1, E2::zero()));
            assert_eq!(x.mul_by_e2(&c0), x * E6::new(c0, E2::zero(), E2::zero()));
        }
    }

    #[test]
    fn v_cubed_is_xi() {
        let v = E6::new(E2::zero(), E2::one(), E2::zero());
        let xi = E6::new(E2::from_u64s(9, 1), E2::zero(), E2::zero());
        assert_eq!(v * v * v, xi);
        let mut rng = StdRng::seed_from_u64(12);
        let x = E6::rand(&mut rng);
        assert_eq!(x.mul_by_nonresidue(), x * v);
    }
}
