//! Arithmetic layers underneath the commitment scheme.
//!
//! - **[`tower`]**: `Fq → E2 → E6 → E12` extension fields
//! - **[`curve`]**: G1/G2 glue (subgroup checks, hashing to G2)
//! - **[`msm`]**: multi-scalar multiplication
//! - **[`pairing`]**: the optimal-ate pairing `e: G1 × G2 → GT`

pub mod curve;
pub mod msm;
pub mod pairing;
pub mod tower;
