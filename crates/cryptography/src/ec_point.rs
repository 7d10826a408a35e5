// Copyright (C) 2015-2025 The Neo Project.
//
// ec_point.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Compressed secp256r1 public keys.

use crate::error::{CryptoError, CryptoResult};
use neo_io::{BinaryWriter, IoError, IoResult, MemoryReader, Serializable};
use p256::ecdsa::signature::Verifier;
use p256::ecdsa::{Signature, VerifyingKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::PublicKey;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub const COMPRESSED_SIZE: usize = 33;

/// A validated secp256r1 public key kept in its 33-byte compressed encoding.
///
/// Points order by X coordinate, then Y. This is the order keys take inside
/// multi-signature verification scripts.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ECPoint([u8; COMPRESSED_SIZE]);

impl ECPoint {
    /// Accepts a compressed (33 byte) or uncompressed (65 byte) SEC1 encoding.
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        let key = PublicKey::from_sec1_bytes(bytes)
            .map_err(|e| CryptoError::invalid_public_key(e.to_string()))?;
        Ok(Self::from_public_key(&key))
    }

    pub(crate) fn from_public_key(key: &PublicKey) -> Self {
        let encoded = key.to_encoded_point(true);
        let mut buf = [0u8; COMPRESSED_SIZE];
        buf.copy_from_slice(encoded.as_bytes());
        Self(buf)
    }

    pub fn from_hex(value: &str) -> CryptoResult<Self> {
        let bytes = hex::decode(value.trim_start_matches("0x"))
            .map_err(|e| CryptoError::invalid_public_key(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    #[inline]
    pub fn encoded(&self) -> &[u8; COMPRESSED_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Big-endian X coordinate.
    fn x(&self) -> &[u8] {
        &self.0[1..]
    }

    /// Big-endian Y coordinate, recovered by decompressing the point.
    fn y(&self) -> Option<[u8; 32]> {
        let key = PublicKey::from_sec1_bytes(&self.0).ok()?;
        let point = key.to_encoded_point(false);
        let mut y = [0u8; 32];
        y.copy_from_slice(point.y()?.as_slice());
        Some(y)
    }

    /// Verifies a 64-byte `r || s` signature over `sha256(message)`.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> CryptoResult<bool> {
        let signature = Signature::from_slice(signature)
            .map_err(|_| CryptoError::InvalidSignatureLength(signature.len()))?;
        let key = VerifyingKey::from_sec1_bytes(&self.0)
            .map_err(|e| CryptoError::invalid_public_key(e.to_string()))?;
        Ok(key.verify(message, &signature).is_ok())
    }
}

impl Ord for ECPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.x().cmp(other.x()) {
            Ordering::Equal if self.0 != other.0 => self.y().cmp(&other.y()),
            ordering => ordering,
        }
    }
}

impl PartialOrd for ECPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ECPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ECPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ECPoint").field(&self.to_hex()).finish()
    }
}

impl FromStr for ECPoint {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serializable for ECPoint {
    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let prefix = reader.peek()?;
        if prefix != 0x02 && prefix != 0x03 {
            return Err(IoError::invalid_data(format!(
                "Invalid compressed point prefix 0x{prefix:02x}"
            )));
        }
        let bytes = reader.read_memory(COMPRESSED_SIZE)?;
        ECPoint::from_bytes(bytes).map_err(|e| IoError::invalid_data(e.to_string()))
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_bytes(&self.0);
        Ok(())
    }

    fn size(&self) -> usize {
        COMPRESSED_SIZE
    }
}

impl Serialize for ECPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ECPoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_io::SerializableExt;

    const KEY: &str = "03b209fd4f53a7170ea4444e0cb0a6bb6a53c2bd016926989cf85f9b0fba17a70c";

    #[test]
    fn test_parse_compressed_key() {
        let point = ECPoint::from_hex(KEY).unwrap();
        assert_eq!(point.to_hex(), KEY);
        assert_eq!(point.encoded()[0], 0x03);
    }

    #[test]
    fn test_rejects_point_off_curve() {
        let mut bytes = hex::decode(KEY).unwrap();
        bytes[0] = 0x05;
        assert!(ECPoint::from_bytes(&bytes).is_err());
        assert!(ECPoint::from_bytes(&bytes[..20]).is_err());
    }

    #[test]
    fn test_wire_form_is_raw_33_bytes() {
        let point = ECPoint::from_hex(KEY).unwrap();
        let bytes = point.to_array().unwrap();
        assert_eq!(bytes.len(), COMPRESSED_SIZE);
        assert_eq!(ECPoint::from_array(&bytes).unwrap(), point);
    }

    #[test]
    fn test_ordering_compares_x_before_parity() {
        let odd_y = ECPoint::from_hex(KEY).unwrap();
        let even_y = ECPoint::from_hex(
            "02df48f60e8f3e01c48ff40b9b7f1310d7a8b2a193188befe1c2e3df740e895093",
        )
        .unwrap();
        let low_x = ECPoint::from_hex(
            "02486fd15702c4490a26703112a5cc1d0923fd697a33406bd5a1c00e0013b09a70",
        )
        .unwrap();

        // 0x03b2.. sorts before 0x02df.. because 0xb2 < 0xdf
        assert!(odd_y < even_y);
        assert!(low_x < odd_y);

        let mut keys = vec![even_y, odd_y, low_x];
        keys.sort();
        assert_eq!(keys, vec![low_x, odd_y, even_y]);
    }

    #[test]
    fn test_same_x_orders_by_y() {
        let a = ECPoint::from_hex(KEY).unwrap();
        let mut negated = *a.encoded();
        negated[0] = 0x02;
        let b = ECPoint::from_bytes(&negated).unwrap();

        let (ya, yb) = (a.y().unwrap(), b.y().unwrap());
        assert_ne!(ya, yb);
        assert_eq!(a.cmp(&b), ya.cmp(&yb));
        assert_eq!(b.cmp(&a), yb.cmp(&ya));
        assert_eq!(a.cmp(&a), Ordering::Equal);
    }
}
