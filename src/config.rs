//! Configuration types for multi-scalar multiplication.
//!
//! # Example
//!
//! ```rust
//! use bnpair::MsmConfig;
//!
//! // Split every MSM into four partial sums computed in parallel.
//! let config = MsmConfig::new(4).expect("valid config");
//! assert_eq!(config.nb_tasks, 4);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Parallelism settings for [`msm`](crate::msm).
///
/// The input pairs are partitioned into `nb_tasks` roughly equal chunks. Each
/// chunk is reduced independently with the bucket method and the partial sums
/// are added together. Partition order never changes the result.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MsmConfig {
    /// Number of parallel worker tasks (at least one).
    pub nb_tasks: usize,
}

impl MsmConfig {
    /// Creates and validates a configuration.
    pub fn new(nb_tasks: usize) -> Result<Self> {
        let config = Self { nb_tasks };
        config.validate()?;
        Ok(config)
    }

    /// A configuration that never spawns more than one task.
    pub fn sequential() -> Self {
        Self { nb_tasks: 1 }
    }

    /// Checks the invariants of a configuration built field-by-field or
    /// deserialized from an untrusted source.
    ///
    /// ```rust
    /// use bnpair::MsmConfig;
    ///
    /// let config = MsmConfig { nb_tasks: 0 };
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.nb_tasks == 0 {
            return Err(Error::Argument("nb_tasks must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for MsmConfig {
    /// One task per thread of the global rayon pool.
    fn default() -> Self {
        Self {
            nb_tasks: rayon::current_num_threads().max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_tasks() {
        assert!(matches!(MsmConfig::new(0), Err(Error::Argument(_))));
        assert!(MsmConfig::default().validate().is_ok());
        assert_eq!(MsmConfig::sequential().nb_tasks, 1);
    }

    #[test]
    fn serde_roundtrip() {
        let config = MsmConfig::new(3).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"nb_tasks":3}"#);
        let back: MsmConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
