// Copyright (C) 2015-2025 The Neo Project.
//
// error.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use thiserror::Error;

/// Errors raised while constructing primitive values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimitiveError {
    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Unknown {kind} value: 0x{value:02x}")]
    UnknownValue { kind: &'static str, value: u8 },
}

impl PrimitiveError {
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }
}

pub type PrimitiveResult<T> = Result<T, PrimitiveError>;

/// Decodes an optionally `0x`-prefixed hex string of exactly `len` bytes.
pub(crate) fn decode_hex_exact(value: &str, len: usize) -> PrimitiveResult<Vec<u8>> {
    let trimmed = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    if trimmed.len() != len * 2 {
        return Err(PrimitiveError::invalid_format(format!(
            "expected {} hex characters, got {}",
            len * 2,
            trimmed.len()
        )));
    }
    hex::decode(trimmed).map_err(|e| PrimitiveError::invalid_format(e.to_string()))
}
