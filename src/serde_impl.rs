//! Serde support for [`Key`].
//!
//! A key goes through its canonical byte encoding ([`Key::to_bytes`]), so
//! every serde format stores exactly the bytes [`Key::write_to`] produces and
//! decoding runs the same point validation as [`Key::from_bytes`].
//! [`MsmConfig`](crate::MsmConfig) derives its impls directly.
//!
//! # Example
//!
//! ```rust
//! use ark_bn254::G1Affine;
//! use ark_ec::AffineRepr;
//! use bnpair::Key;
//!
//! let key = Key::setup_from_seed(&[G1Affine::generator()], [0u8; 32]).unwrap();
//! let json = serde_json::to_string(&key).unwrap();
//! let back: Key = serde_json::from_str(&json).unwrap();
//! assert_eq!(back, key);
//! ```

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Key;

impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let bytes = self.to_bytes().map_err(S::Error::custom)?;
        serializer.serialize_bytes(&bytes)
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        Key::from_bytes(&bytes).map_err(D::Error::custom)
    }
}
