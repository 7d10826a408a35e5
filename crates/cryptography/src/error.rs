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

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("Invalid public key: {message}")]
    InvalidPublicKey { message: String },

    #[error("Invalid private key")]
    InvalidPrivateKey,

    #[error("Invalid signature length {0}, expected 64")]
    InvalidSignatureLength(usize),
}

impl CryptoError {
    pub fn invalid_public_key(message: impl Into<String>) -> Self {
        Self::InvalidPublicKey {
            message: message.into(),
        }
    }
}

pub type CryptoResult<T> = Result<T, CryptoError>;
