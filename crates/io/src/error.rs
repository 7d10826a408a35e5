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

/// Failure while decoding untrusted bytes (or encoding out-of-range values).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IoError {
    #[error("Unexpected end of input")]
    UnexpectedEof,
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl IoError {
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn format_exception(operation: &str, reason: &str) -> Self {
        Self::InvalidData(format!("{}: {}", operation, reason))
    }

    /// A declared length or count above its limit.
    pub fn exceeds(what: &str, value: u64, max: u64) -> Self {
        Self::InvalidData(format!("{what} {value} exceeds maximum {max}"))
    }
}

pub type IoResult<T> = Result<T, IoError>;
