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

use neo_cryptography::CryptoError;
use neo_io::IoError;
use neo_smart_contract::ContractError;
use thiserror::Error;

/// Errors raised while assembling signers, witnesses and transactions.
///
/// Argument and state errors are detected locally; `Deserialization` only
/// originates from untrusted bytes.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Illegal state: {message}")]
    IllegalState { message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] IoError),

    #[error("Cryptography error: {0}")]
    Crypto(#[from] CryptoError),
}

impl CoreError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState {
            message: message.into(),
        }
    }
}

impl From<ContractError> for CoreError {
    fn from(error: ContractError) -> Self {
        match error {
            ContractError::InvalidArgument { message } => Self::InvalidArgument { message },
            ContractError::Deserialization(inner) => Self::Deserialization(inner),
            other => Self::invalid_argument(other.to_string()),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
