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

//! Errors raised by the RPC client and the transaction pipeline.

use neo_core::CoreError;
use neo_io::IoError;
use neo_smart_contract::ContractError;
use thiserror::Error;

/// JSON-RPC code for failures that never reached a node response.
pub const INTERNAL_ERROR_CODE: i32 = -32603;
/// JSON-RPC code for responses that could not be parsed.
pub const PARSE_ERROR_CODE: i32 = -32700;

#[derive(Debug, Error)]
pub enum RpcError {
    /// Error object returned by the node.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i32, message: String },

    #[error("HTTP error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Illegal state: {message}")]
    IllegalState { message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] IoError),

    /// The script simulation ended in FAULT.
    #[error("The vm exited due to the following exception: {exception}")]
    VmFault { exception: String },

    /// Raised by the builder when the sender cannot cover the fees.
    #[error("{0}")]
    InsufficientFunds(String),
}

impl RpcError {
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

    /// JSON-RPC style code for this error.
    pub fn code(&self) -> i32 {
        match self {
            Self::Rpc { code, .. } => *code,
            Self::InvalidResponse(_) => PARSE_ERROR_CODE,
            _ => INTERNAL_ERROR_CODE,
        }
    }
}

impl From<CoreError> for RpcError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidArgument { message } => Self::InvalidArgument { message },
            CoreError::IllegalState { message } => Self::IllegalState { message },
            CoreError::Deserialization(e) => Self::Deserialization(e),
            other => Self::invalid_argument(other.to_string()),
        }
    }
}

impl From<ContractError> for RpcError {
    fn from(error: ContractError) -> Self {
        CoreError::from(error).into()
    }
}

impl From<reqwest::Error> for RpcError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(error: serde_json::Error) -> Self {
        Self::InvalidResponse(error.to_string())
    }
}

pub type RpcResult<T> = Result<T, RpcError>;
