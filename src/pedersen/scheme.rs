use ark_bn254::{Fr, G1Affine, G1Projective};
use ark_ec::CurveGroup;
use tracing::{debug, instrument};

use super::Key;
use crate::arith::curve::check_g1_subgroup;
use crate::arith::msm::msm;
use crate::config::MsmConfig;
use crate::errors::{Error, Result};
use crate::{Bn254, PairingBackend};

impl Key {
    /// Commits to `values` with the default [`MsmConfig`].
    ///
    /// Returns `(commitment, knowledge_proof)`.
    pub fn commit(&self, values: &[Fr]) -> Result<(G1Affine, G1Affine)> {
        self.commit_with_config(values, &MsmConfig::default())
    }

    /// Computes `commitment = Σ values[i]·basis[i]` and
    /// `knowledge_proof = Σ values[i]·basis_exp_sigma[i]`, which equals
    /// `commitment^σ` without needing `σ`.
    ///
    /// Fails with [`Error::Argument`] unless `values.len() == self.len()`.
    #[instrument(level = "info", skip_all, fields(len = values.len()))]
    pub fn commit_with_config(
        &self,
        values: &[Fr],
        config: &MsmConfig,
    ) -> Result<(G1Affine, G1Affine)> {
        if values.len() != self.basis.len() {
            return Err(Error::length_mismatch(
                "commit",
                self.basis.len(),
                values.len(),
            ));
        }
        let commitment = msm(&self.basis, values, config)?;
        let knowledge_proof = msm(&self.basis_exp_sigma, values, config)?;
        let affine = G1Projective::normalize_batch(&[commitment, knowledge_proof]);
        Ok((affine[0], affine[1]))
    }

    /// Checks that `knowledge_proof = commitment^σ` via
    /// `e(commitment, g) · e(knowledge_proof, g^(−1/σ)) = 1`.
    ///
    /// Points outside the prime-order subgroup are rejected with
    /// [`Error::SubgroupCheck`] before any pairing is computed; a failing
    /// equation yields [`Error::ProofRejected`].
    #[instrument(level = "info", skip_all)]
    pub fn verify_knowledge_proof(
        &self,
        commitment: &G1Affine,
        knowledge_proof: &G1Affine,
    ) -> Result<()> {
        if !check_g1_subgroup(commitment) || !check_g1_subgroup(knowledge_proof) {
            debug!("commitment or proof outside the G1 subgroup");
            return Err(Error::SubgroupCheck);
        }
        let holds = Bn254::pairing_check(
            &[*commitment, *knowledge_proof],
            &[self.g, self.g_root_sigma_neg],
        )?;
        if !holds {
            debug!("knowledge proof pairing equation does not hold");
            return Err(Error::ProofRejected);
        }
        Ok(())
    }
}
