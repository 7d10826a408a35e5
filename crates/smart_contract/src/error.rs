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

use neo_io::IoError;
use neo_vm::VmError;
use thiserror::Error;

/// Smart contract errors.
///
/// `Deserialization` is reserved for malformed external bytes, so callers can
/// tell a corrupt NEF apart from invalid local input.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] IoError),

    #[error("Script error: {0}")]
    Vm(#[from] VmError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

pub type ContractResult<T> = Result<T, ContractError>;
