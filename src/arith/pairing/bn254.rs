use ark_bn254::{Fq, G1Affine, G2Affine};
use ark_ec::AffineRepr;
use ark_ff::MontFp;
use tracing::{instrument, trace};

use super::PairingBackend;
use crate::arith::curve::{g2_coordinates, twist_coeff_b};
use crate::arith::tower::{BN_X, E2, E12, TowerField, frobenius_coefficients};
use crate::errors::{Error, Result};

/// Target group of the BN254 pairing.
pub type Gt = E12;

/// `6x + 2`, the optimal-ate loop length. Needs 65 bits.
const ATE_LOOP_COUNT: u128 = 6 * BN_X as u128 + 2;

/// `1/2` in the base field.
const TWO_INV: Fq =
    MontFp!("10944121435919637611123202872628637544348155578648911831344518947322613104292");

/// Optimal-ate pairing on BN254.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bn254;

/// Homogeneous projective point `(X : Y : Z)` on the twist, the running
/// multiple of `Q` inside the Miller loop.
#[derive(Clone, Copy, Debug)]
struct TwistPoint {
    x: E2,
    y: E2,
    z: E2,
}

/// Line through the running point, before evaluation at `P`:
/// `y_coeff·yP + x_coeff·xP·w + constant·w³`.
#[derive(Clone, Copy, Debug)]
struct Line {
    y_coeff: E2,
    x_coeff: E2,
    constant: E2,
}

impl Line {
    fn evaluate_into(&self, f: &mut E12, xp: &Fq, yp: &Fq) {
        *f = f.mul_by_034(
            &self.y_coeff.mul_by_base_field(yp),
            &self.x_coeff.mul_by_base_field(xp),
            &self.constant,
        );
    }
}

impl TwistPoint {
    fn from_affine(x: E2, y: E2) -> Self {
        Self { x, y, z: E2::one() }
    }

    /// Doubles `self` and returns the tangent line.
    fn double_step(&mut self, b: &E2) -> Line {
        let a = (self.x * self.y).mul_by_base_field(&TWO_INV);
        let yy = self.y.square();
        let zz = self.z.square();
        let e = *b * (zz.double() + zz);
        let f = e.double() + e;
        let g = (yy + f).mul_by_base_field(&TWO_INV);
        let h = (self.y + self.z).square() - (yy + zz);
        let i = e - yy;
        let j = self.x.square();
        let e_sq = e.square();

        self.x = a * (yy - f);
        self.y = g.square() - (e_sq.double() + e_sq);
        self.z = yy * h;

        Line {
            y_coeff: -h,
            x_coeff: j.double() + j,
            constant: i,
        }
    }

    /// Adds the affine point `(qx, qy)` to `self` and returns the chord.
    fn add_step(&mut self, qx: &E2, qy: &E2) -> Line {
        let theta = self.y - *qy * self.z;
        let lambda = self.x - *qx * self.z;
        let c = theta.square();
        let d = lambda.square();
        let e = lambda * d;
        let f = self.z * c;
        let g = self.x * d;
        let h = e + f - g.double();

        self.x = lambda * h;
        self.y = theta * (g - h) - e * self.y;
        self.z = self.z * e;

        Line {
            y_coeff: lambda,
            x_coeff: -theta,
            constant: theta * *qx - lambda * *qy,
        }
    }
}

/// One non-degenerate pair in the shared Miller loop.
struct LoopState {
    xp: Fq,
    yp: Fq,
    qx: E2,
    qy: E2,
    r: TwistPoint,
}

impl LoopState {
    fn new(p: &G1Affine, q: &G2Affine) -> Option<Self> {
        let (xp, yp) = p.xy()?;
        let (qx, qy) = g2_coordinates(q)?;
        Some(Self {
            xp,
            yp,
            qx,
            qy,
            r: TwistPoint::from_affine(qx, qy),
        })
    }
}

/// Miller loop over pairs, skipping any pair that involves an identity.
fn multi_miller_loop<'a>(pairs: impl Iterator<Item = (&'a G1Affine, &'a G2Affine)>) -> E12 {
    let mut states: Vec<LoopState> = pairs.filter_map(|(p, q)| LoopState::new(p, q)).collect();
    let mut f = E12::one();
    if states.is_empty() {
        return f;
    }
    let b = twist_coeff_b();

    let top = u128::BITS - ATE_LOOP_COUNT.leading_zeros() - 1;
    for i in (0..top).rev() {
        f = f.square();
        for s in states.iter_mut() {
            s.r.double_step(&b).evaluate_into(&mut f, &s.xp, &s.yp);
        }
        if (ATE_LOOP_COUNT >> i) & 1 == 1 {
            for s in states.iter_mut() {
                let (qx, qy) = (s.qx, s.qy);
                s.r.add_step(&qx, &qy).evaluate_into(&mut f, &s.xp, &s.yp);
            }
        }
    }

    // two more chords, with π(Q) and −π²(Q)
    let gamma = &frobenius_coefficients().gamma;
    for s in states.iter_mut() {
        let q1x = s.qx.conjugate() * gamma[0][2];
        let q1y = s.qy.conjugate() * gamma[0][3];
        s.r.add_step(&q1x, &q1y).evaluate_into(&mut f, &s.xp, &s.yp);

        let q2x = s.qx * gamma[1][2];
        let q2y = -(s.qy * gamma[1][3]);
        s.r.add_step(&q2x, &q2y).evaluate_into(&mut f, &s.xp, &s.yp);
    }
    f
}

/// `f^((q¹² − 1)/r)`.
///
/// The easy part `(q⁶ − 1)(q² + 1)` uses one inversion and Frobenius maps;
/// the hard part `(q⁴ − q² + 1)/r` follows the addition chain of Scott et al.
/// (eprint 2008/490) with three calls to [`E12::expt`]. Zero has no inverse and
/// is returned unchanged.
fn final_exponentiation(f: &E12) -> E12 {
    let Some(f_inv) = f.inverse() else {
        trace!("final exponentiation of zero");
        return *f;
    };
    let t = f.conjugate() * f_inv;
    let t = t.frobenius_square() * t;

    let fp = t.frobenius();
    let fp2 = t.frobenius_square();
    let fp3 = t.frobenius_cube();
    let fu = t.expt();
    let fu2 = fu.expt();
    let fu3 = fu2.expt();

    let y3 = fu.frobenius().conjugate();
    let fu2p = fu2.frobenius();
    let fu3p = fu3.frobenius();
    let y2 = fu2.frobenius_square();

    let y0 = fp * fp2 * fp3;
    let y1 = t.conjugate();
    let y5 = fu2.conjugate();
    let y4 = (fu * fu2p).conjugate();
    let y6 = (fu3 * fu3p).conjugate();

    let mut t0 = y6.cyclotomic_square() * y4 * y5;
    let mut t1 = y3 * y5 * t0;
    t0 *= y2;
    t1 = t1.cyclotomic_square() * t0;
    t1 = t1.cyclotomic_square();
    t0 = t1 * y1;
    t1 *= y0;
    t0 = t0.cyclotomic_square();
    t0 * t1
}

impl PairingBackend for Bn254 {
    type G1 = G1Affine;
    type G2 = G2Affine;
    type Target = Gt;

    #[instrument(level = "trace", skip_all, fields(pairs = p.len()))]
    fn miller_loop(p: &[G1Affine], q: &[G2Affine]) -> Result<Gt> {
        if p.len() != q.len() {
            return Err(Error::length_mismatch("miller loop", p.len(), q.len()));
        }
        Ok(multi_miller_loop(p.iter().zip(q)))
    }

    fn final_exponentiation(f: &Gt) -> Gt {
        final_exponentiation(f)
    }

    fn pairing(p: &G1Affine, q: &G2Affine) -> Gt {
        final_exponentiation(&multi_miller_loop(core::iter::once((p, q))))
    }

    #[instrument(level = "trace", skip_all, fields(pairs = p.len()))]
    fn multi_pairing(p: &[G1Affine], q: &[G2Affine]) -> Result<Gt> {
        let f = Self::miller_loop(p, q)?;
        Ok(final_exponentiation(&f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::{Fr, G1Projective, G2Projective};
    use ark_ec::{CurveGroup, PrimeGroup};
    use ark_ff::PrimeField;
    use ark_std::UniformRand;
    use num_bigint::BigUint;
    use rand::{SeedableRng, rngs::StdRng};

    fn random_points(rng: &mut StdRng) -> (G1Affine, G2Affine) {
        (
            G1Projective::rand(rng).into_affine(),
            G2Projective::rand(rng).into_affine(),
        )
    }

    fn generators() -> (G1Affine, G2Affine) {
        (
            G1Projective::generator().into_affine(),
            G2Projective::generator().into_affine(),
        )
    }

    #[test]
    fn loop_count_is_65_bits() {
        assert_eq!(ATE_LOOP_COUNT, 29793968203157093288);
        assert_eq!(u128::BITS - ATE_LOOP_COUNT.leading_zeros(), 65);
        assert_eq!(TWO_INV + TWO_INV, Fq::from(1u64));
    }

    #[test]
    fn bilinearity() {
        let mut rng = StdRng::seed_from_u64(31);
        let (p, q) = generators();
        let base = Bn254::pairing(&p, &q);
        for _ in 0..2 {
            let a = Fr::rand(&mut rng);
            let b = Fr::rand(&mut rng);
            let ap = (p * a).into_affine();
            let bq = (q * b).into_affine();
            let ab = BigUint::from((a * b).into_bigint());
            assert_eq!(Bn254::pairing(&ap, &bq), base.exp(&ab));
        }
    }

    #[test]
    fn generators_pair_to_non_identity_in_subgroup() {
        let (p, q) = generators();
        let e = Bn254::pairing(&p, &q);
        assert!(!e.is_one());
        assert!(e.is_in_subgroup());
    }

    #[test]
    fn miller_loops_factor_through_one_final_exponentiation() {
        let mut rng = StdRng::seed_from_u64(32);
        let (p1, q1) = random_points(&mut rng);
        let (p2, q2) = random_points(&mut rng);

        let batched = Bn254::multi_pairing(&[p1, p2], &[q1, q2]).unwrap();
        let ml1 = Bn254::miller_loop(&[p1], &[q1]).unwrap();
        let ml2 = Bn254::miller_loop(&[p2], &[q2]).unwrap();
        assert_eq!(batched, Bn254::final_exponentiation(&(ml1 * ml2)));
        assert_eq!(batched, Bn254::pairing(&p1, &q1) * Bn254::pairing(&p2, &q2));
    }

    #[test]
    fn identity_pairs_are_skipped() {
        let mut rng = StdRng::seed_from_u64(33);
        let (p, q) = random_points(&mut rng);
        let (p2, q2) = random_points(&mut rng);
        let base = Bn254::miller_loop(&[p], &[q]).unwrap();

        let with_g1_identity = Bn254::miller_loop(&[p, G1Affine::identity()], &[q, q2]).unwrap();
        let with_g2_identity = Bn254::miller_loop(&[p2, p], &[G2Affine::identity(), q]).unwrap();
        assert_eq!(with_g1_identity, base);
        assert_eq!(with_g2_identity, base);

        let only_identity = Bn254::miller_loop(&[G1Affine::identity()], &[q]).unwrap();
        assert!(only_identity.is_one());
        assert!(Bn254::miller_loop(&[], &[]).unwrap().is_one());
    }

    #[test]
    fn pairing_check_accepts_inverse_pairs() {
        let mut rng = StdRng::seed_from_u64(34);
        let (p, q) = random_points(&mut rng);
        assert!(Bn254::pairing_check(&[p, -p], &[q, q]).unwrap());
        assert!(Bn254::pairing_check(&[p, p], &[q, -q]).unwrap());
        assert!(!Bn254::pairing_check(&[p, p], &[q, q]).unwrap());
    }

    #[test]
    fn unequal_lengths_are_rejected() {
        let (p, q) = generators();
        assert!(matches!(
            Bn254::miller_loop(&[p, p], &[q]),
            Err(Error::Argument(_))
        ));
        assert!(matches!(
            Bn254::pairing_check(&[p], &[]),
            Err(Error::Argument(_))
        ));
    }

    #[test]
    fn final_exponentiation_lands_in_subgroup() {
        let mut rng = StdRng::seed_from_u64(35);
        let (p, q) = random_points(&mut rng);
        let raw = Bn254::miller_loop(&[p], &[q]).unwrap();
        assert!(!raw.is_in_subgroup());
        assert!(Bn254::final_exponentiation(&raw).is_in_subgroup());

        let a = E12::rand(&mut rng);
        assert!(!a.is_in_subgroup());
        assert!(Bn254::final_exponentiation(&a).is_in_subgroup());
    }

    #[test]
    fn final_exponentiation_matches_literal_power() {
        let mut rng = StdRng::seed_from_u64(36);
        let f = E12::rand(&mut rng);
        let q = BigUint::from(Fq::MODULUS);
        let r = BigUint::from(Fr::MODULUS);
        let exponent = (q.pow(12) - 1u32) / r;
        assert_eq!(Bn254::final_exponentiation(&f), f.exp(&exponent));
    }

    #[test]
    fn final_exponentiation_of_zero_is_zero() {
        assert!(Bn254::final_exponentiation(&E12::zero()).is_zero());
    }
}
