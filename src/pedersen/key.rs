use std::io::{Read, Write};

use ark_bn254::{Fr, G1Affine, G1Projective, G2Affine};
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{Field, PrimeField};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, SerializationError};
use rand::SeedableRng;
use rand::rngs::OsRng;
use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, RngCore};
use rayon::prelude::*;
use tracing::{instrument, trace};

use crate::arith::curve::hash_to_g2;
use crate::errors::{Error, Result};

/// Domain separation tag for the random G2 point drawn at setup.
const SETUP_DST: &[u8] = b"random on g2";

/// Public parameters of a Pedersen vector commitment with knowledge proofs.
///
/// Built once by [`Key::setup`] from a secret `σ`:
///
/// - `g` is a random point of G2
/// - `g_root_sigma_neg = g^(−1/σ)`
/// - `basis_exp_sigma[i] = basis[i]^σ`
///
/// `σ` itself is dropped before `setup` returns. A key is immutable and can
/// be shared freely between threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Key {
    pub(super) g: G2Affine,
    pub(super) g_root_sigma_neg: G2Affine,
    pub(super) basis: Vec<G1Affine>,
    pub(super) basis_exp_sigma: Vec<G1Affine>,
}

impl Key {
    /// Runs the trusted setup for `basis` with randomness from `rng`.
    ///
    /// Fails with [`Error::Io`] if `rng` cannot produce bytes; no partial key
    /// is returned in that case.
    #[instrument(level = "info", skip_all, fields(len = basis.len()))]
    pub fn setup<R: RngCore + CryptoRng + ?Sized>(basis: &[G1Affine], rng: &mut R) -> Result<Self> {
        let mut seed = [0u8; 32];
        rng.try_fill_bytes(&mut seed).map_err(Error::entropy)?;
        let g = hash_to_g2(&seed, SETUP_DST);

        let (sigma, sigma_inv) = loop {
            let mut wide = [0u8; 64];
            rng.try_fill_bytes(&mut wide).map_err(Error::entropy)?;
            let sigma = Fr::from_le_bytes_mod_order(&wide);
            match sigma.inverse() {
                Some(inv) => break (sigma, inv),
                None => trace!("drew a zero sigma, retrying"),
            }
        };

        let g_root_sigma_neg = (g * (-sigma_inv)).into_affine();
        let basis_exp_sigma: Vec<G1Projective> = basis.par_iter().map(|b| *b * sigma).collect();

        Ok(Self {
            g,
            g_root_sigma_neg,
            basis: basis.to_vec(),
            basis_exp_sigma: G1Projective::normalize_batch(&basis_exp_sigma),
        })
    }

    /// [`setup`](Self::setup) with the operating system's randomness.
    pub fn setup_from_entropy(basis: &[G1Affine]) -> Result<Self> {
        Self::setup(basis, &mut OsRng)
    }

    /// Deterministic setup from a 32-byte seed. Anyone holding the seed can
    /// recover `σ`, so this is for tests and reproducible fixtures only.
    pub fn setup_from_seed(basis: &[G1Affine], seed: [u8; 32]) -> Result<Self> {
        let mut rng = ChaCha20Rng::from_seed(seed);
        Self::setup(basis, &mut rng)
    }

    pub fn g(&self) -> &G2Affine {
        &self.g
    }

    /// `g^(−1/σ)`
    pub fn g_root_sigma_neg(&self) -> &G2Affine {
        &self.g_root_sigma_neg
    }

    pub fn basis(&self) -> &[G1Affine] {
        &self.basis
    }

    /// `basis[i]^σ`
    pub fn basis_exp_sigma(&self) -> &[G1Affine] {
        &self.basis_exp_sigma
    }

    /// Dimension of the vectors this key commits to.
    pub fn len(&self) -> usize {
        self.basis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.basis.is_empty()
    }

    /// Writes `g`, `g_root_sigma_neg`, `basis`, `basis_exp_sigma` in that
    /// order, points compressed, each vector behind a little-endian `u64`
    /// length.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        self.g.serialize_compressed(&mut writer)?;
        self.g_root_sigma_neg.serialize_compressed(&mut writer)?;
        self.basis.serialize_compressed(&mut writer)?;
        self.basis_exp_sigma.serialize_compressed(&mut writer)?;
        Ok(())
    }

    /// Reads a key written by [`write_to`](Self::write_to). Every point is
    /// checked to be on its curve and in the prime-order subgroup.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let g = G2Affine::deserialize_compressed(&mut reader)?;
        let g_root_sigma_neg = G2Affine::deserialize_compressed(&mut reader)?;
        let basis = Vec::<G1Affine>::deserialize_compressed(&mut reader)?;
        let basis_exp_sigma = Vec::<G1Affine>::deserialize_compressed(&mut reader)?;
        if basis.len() != basis_exp_sigma.len() {
            return Err(Error::Serialization(SerializationError::InvalidData));
        }
        if g.is_zero() {
            return Err(Error::Serialization(SerializationError::InvalidData));
        }
        Ok(Self {
            g,
            g_root_sigma_neg,
            basis,
            basis_exp_sigma,
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    /// Decodes a key, rejecting trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = bytes;
        let key = Self::read_from(&mut reader)?;
        if !reader.is_empty() {
            return Err(Error::Serialization(SerializationError::InvalidData));
        }
        Ok(key)
    }

    fn encoded_len(&self) -> usize {
        self.g.compressed_size()
            + self.g_root_sigma_neg.compressed_size()
            + self.basis.compressed_size()
            + self.basis_exp_sigma.compressed_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_std::UniformRand;
    use rand::rngs::StdRng;

    fn random_basis(rng: &mut StdRng, n: usize) -> Vec<G1Affine> {
        (0..n).map(|_| G1Projective::rand(rng).into_affine()).collect()
    }

    /// Entropy source that always fails.
    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {}

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> core::result::Result<(), rand_core::Error> {
            Err(rand_core::Error::new("entropy pool unavailable"))
        }
    }

    impl CryptoRng for BrokenRng {}

    #[test]
    fn setup_is_reproducible_from_seed() {
        let mut rng = StdRng::seed_from_u64(51);
        let basis = random_basis(&mut rng, 4);
        let a = Key::setup_from_seed(&basis, [7u8; 32]).unwrap();
        let b = Key::setup_from_seed(&basis, [7u8; 32]).unwrap();
        let c = Key::setup_from_seed(&basis, [8u8; 32]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.g(), c.g());
        assert_eq!(a.len(), 4);
        assert_eq!(a.basis(), basis.as_slice());
        assert_eq!(a.basis_exp_sigma().len(), 4);
    }

    #[test]
    fn setup_surfaces_entropy_failure() {
        let mut rng = StdRng::seed_from_u64(52);
        let basis = random_basis(&mut rng, 2);
        assert!(matches!(Key::setup(&basis, &mut BrokenRng), Err(Error::Io(_))));
    }

    #[test]
    fn setup_from_entropy_yields_fresh_keys() {
        let mut rng = StdRng::seed_from_u64(53);
        let basis = random_basis(&mut rng, 2);
        let a = Key::setup_from_entropy(&basis).unwrap();
        let b = Key::setup_from_entropy(&basis).unwrap();
        assert_ne!(a.g(), b.g());
        assert!(!a.is_empty());
    }

    #[test]
    fn bytes_roundtrip_is_identical() {
        let mut rng = StdRng::seed_from_u64(54);
        let basis = random_basis(&mut rng, 5);
        let key = Key::setup_from_seed(&basis, [1u8; 32]).unwrap();
        let bytes = key.to_bytes().unwrap();
        let decoded = Key::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, key);
        assert_eq!(decoded.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn encoding_holds_only_public_points() {
        // two compressed G2 points, then two length-prefixed G1 vectors
        let mut rng = StdRng::seed_from_u64(55);
        let n = 3;
        let key = Key::setup_from_seed(&random_basis(&mut rng, n), [2u8; 32]).unwrap();
        let bytes = key.to_bytes().unwrap();
        assert_eq!(bytes.len(), 2 * 64 + 2 * (8 + n * 32));
        assert_eq!(&bytes[128..136], &(n as u64).to_le_bytes());
    }

    #[test]
    fn decoding_rejects_malformed_input() {
        let mut rng = StdRng::seed_from_u64(56);
        let key = Key::setup_from_seed(&random_basis(&mut rng, 2), [3u8; 32]).unwrap();
        let mut bytes = key.to_bytes().unwrap();

        let mut trailing = bytes.clone();
        trailing.push(0);
        assert!(matches!(Key::from_bytes(&trailing), Err(Error::Serialization(_))));
        assert!(matches!(
            Key::from_bytes(&bytes[..bytes.len() - 1]),
            Err(Error::Serialization(_))
        ));

        // unequal basis lengths
        let mut mismatched = Vec::new();
        key.g.serialize_compressed(&mut mismatched).unwrap();
        key.g_root_sigma_neg.serialize_compressed(&mut mismatched).unwrap();
        key.basis.serialize_compressed(&mut mismatched).unwrap();
        key.basis_exp_sigma[..1].to_vec().serialize_compressed(&mut mismatched).unwrap();
        assert!(matches!(Key::from_bytes(&mismatched), Err(Error::Serialization(_))));

        // corrupt the first G2 point
        bytes[0] ^= 0xff;
        assert!(Key::from_bytes(&bytes).is_err());
    }

    #[test]
    fn key_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Key>();
    }
}
