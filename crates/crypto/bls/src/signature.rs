use std::str::FromStr;

use alloy_primitives::hex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ssz::Encode;
use ssz_derive::{Decode, Encode};
use ssz_types::{FixedVector, typenum::U96};
use tree_hash_derive::TreeHash;

use crate::errors::BlsSignatureError;

pub const SIGNATURE_BYTE_LENGTH: usize = 96;

/// A compressed BLS12-381 signature as carried on the wire.
///
/// This is a plain byte container. Pairing arithmetic and signature
/// verification happen in the state transition, which consumes these bytes
/// unchanged.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Default, Encode, Decode, TreeHash)]
pub struct BlsSignature {
    pub inner: FixedVector<u8, U96>,
}

impl BlsSignature {
    pub fn to_bytes(&self) -> &[u8] {
        self.inner.iter().as_slice()
    }
}

impl Serialize for BlsSignature {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let val = format!("0x{}", hex::encode(self.inner.as_ssz_bytes()));
        serializer.serialize_str(&val)
    }
}

impl<'de> Deserialize<'de> for BlsSignature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let result: String = Deserialize::deserialize(deserializer)?;
        result.parse().map_err(serde::de::Error::custom)
    }
}

impl FromStr for BlsSignature {
    type Err = BlsSignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let clean_str = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(clean_str).map_err(|_| BlsSignatureError::InvalidHexString)?;

        if bytes.len() != SIGNATURE_BYTE_LENGTH {
            return Err(BlsSignatureError::InvalidByteLength {
                expected: SIGNATURE_BYTE_LENGTH,
                actual: bytes.len(),
            });
        }

        Ok(BlsSignature {
            inner: FixedVector::from(bytes),
        })
    }
}
