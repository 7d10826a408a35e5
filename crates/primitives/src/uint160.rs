// Copyright (C) 2015-2025 The Neo Project.
//
// uint160.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Implementation of `UInt160`, a 160-bit script hash.

use crate::error::{decode_hex_exact, PrimitiveError, PrimitiveResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The length of `UInt160` values in bytes.
pub const UINT160_SIZE: usize = 20;

/// A 160-bit hash, stored in its little-endian wire order.
///
/// The canonical textual form is big-endian hex with a `0x` prefix, which is
/// the reverse of the stored byte order.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UInt160([u8; UINT160_SIZE]);

impl UInt160 {
    pub const LENGTH: usize = UINT160_SIZE;

    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; UINT160_SIZE])
    }

    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Creates a `UInt160` from little-endian bytes.
    ///
    /// # Errors
    ///
    /// Returns `PrimitiveError::InvalidFormat` if the input length is not exactly 20 bytes.
    pub fn from_bytes(value: &[u8]) -> PrimitiveResult<Self> {
        let bytes: [u8; UINT160_SIZE] = value.try_into().map_err(|_| {
            PrimitiveError::invalid_format(format!("Invalid length: {}", value.len()))
        })?;
        Ok(Self(bytes))
    }

    /// Creates a `UInt160` from big-endian bytes (the display order).
    pub fn from_be_bytes(value: &[u8]) -> PrimitiveResult<Self> {
        let mut hash = Self::from_bytes(value)?;
        hash.0.reverse();
        Ok(hash)
    }

    /// Little-endian wire bytes.
    #[inline]
    #[must_use]
    pub fn to_array(&self) -> [u8; UINT160_SIZE] {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; UINT160_SIZE] {
        &self.0
    }

    /// Big-endian bytes, as shown in hex form.
    #[must_use]
    pub fn to_be_array(&self) -> [u8; UINT160_SIZE] {
        let mut bytes = self.0;
        bytes.reverse();
        bytes
    }

    /// Parses a big-endian hex string, with or without the `0x` prefix.
    pub fn parse(s: &str) -> PrimitiveResult<Self> {
        let bytes = decode_hex_exact(s, UINT160_SIZE)?;
        Self::from_be_bytes(&bytes)
    }

    /// Big-endian hex without the `0x` prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_be_array())
    }
}

impl fmt::Display for UInt160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Debug for UInt160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UInt160({self})")
    }
}

impl FromStr for UInt160 {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<[u8; UINT160_SIZE]> for UInt160 {
    fn from(value: [u8; UINT160_SIZE]) -> Self {
        Self(value)
    }
}

impl Serialize for UInt160 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for UInt160 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_reverses_into_wire_order() {
        let hash = UInt160::parse("0x0000000000000000000000000000000000000001").unwrap();
        let bytes = hash.to_array();
        assert_eq!(bytes[0], 1);
        assert!(bytes[1..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_parse_without_prefix() {
        let a = UInt160::parse("d2a4cff31913016155e38e474a2c06d08be276cf").unwrap();
        let b: UInt160 = "0xd2a4cff31913016155e38e474a2c06d08be276cf".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(UInt160::parse("0x1234").is_err());
        assert!(UInt160::from_bytes(&[0u8; 19]).is_err());
    }

    #[test]
    fn test_serde_uses_display_form() {
        let hash = UInt160::parse("0xd2a4cff31913016155e38e474a2c06d08be276cf").unwrap();
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, "\"0xd2a4cff31913016155e38e474a2c06d08be276cf\"");
        let back: UInt160 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }

    proptest! {
        #[test]
        fn test_roundtrip_from_bytes(bytes in any::<[u8; UINT160_SIZE]>()) {
            let uint = UInt160::from_bytes(&bytes).unwrap();
            prop_assert_eq!(bytes, uint.to_array());
        }

        #[test]
        fn test_parse_hex_string(hex in "[0-9a-f]{40}") {
            let uint = UInt160::parse(&format!("0x{}", hex)).unwrap();
            prop_assert_eq!(uint.to_hex(), hex);
        }
    }
}
