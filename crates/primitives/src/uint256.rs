// Copyright (C) 2015-2025 The Neo Project.
//
// uint256.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Implementation of `UInt256`, a 256-bit hash.

use crate::error::{decode_hex_exact, PrimitiveError, PrimitiveResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The length of `UInt256` values in bytes.
pub const UINT256_SIZE: usize = 32;

/// A 256-bit hash in little-endian wire order, displayed big-endian.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UInt256([u8; UINT256_SIZE]);

impl UInt256 {
    pub const LENGTH: usize = UINT256_SIZE;

    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; UINT256_SIZE])
    }

    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    pub fn from_bytes(value: &[u8]) -> PrimitiveResult<Self> {
        let bytes: [u8; UINT256_SIZE] = value.try_into().map_err(|_| {
            PrimitiveError::invalid_format(format!("Invalid length: {}", value.len()))
        })?;
        Ok(Self(bytes))
    }

    pub fn from_be_bytes(value: &[u8]) -> PrimitiveResult<Self> {
        let mut hash = Self::from_bytes(value)?;
        hash.0.reverse();
        Ok(hash)
    }

    #[inline]
    #[must_use]
    pub fn to_array(&self) -> [u8; UINT256_SIZE] {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; UINT256_SIZE] {
        &self.0
    }

    #[must_use]
    pub fn to_be_array(&self) -> [u8; UINT256_SIZE] {
        let mut bytes = self.0;
        bytes.reverse();
        bytes
    }

    pub fn parse(s: &str) -> PrimitiveResult<Self> {
        let bytes = decode_hex_exact(s, UINT256_SIZE)?;
        Self::from_be_bytes(&bytes)
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_be_array())
    }
}

impl fmt::Display for UInt256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Debug for UInt256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UInt256({self})")
    }
}

impl FromStr for UInt256 {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<[u8; UINT256_SIZE]> for UInt256 {
    fn from(value: [u8; UINT256_SIZE]) -> Self {
        Self(value)
    }
}

impl Serialize for UInt256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for UInt256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
