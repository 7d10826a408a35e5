// Copyright (C) 2015-2025 The Neo Project.
//
// contract_parameter.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Typed arguments for contract invocations.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use neo_cryptography::ECPoint;
use neo_primitives::{ContractParameterType, UInt160, UInt256};
use num_bigint::BigInt;
use serde_json::{json, Value};

/// A contract call argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractParameter {
    /// Pushed as `PUSHNULL`.
    Any,
    Boolean(bool),
    Integer(BigInt),
    ByteArray(Vec<u8>),
    String(String),
    Hash160(UInt160),
    Hash256(UInt256),
    PublicKey(ECPoint),
    Signature(Vec<u8>),
    Array(Vec<ContractParameter>),
    Map(Vec<(ContractParameter, ContractParameter)>),
}

impl ContractParameter {
    pub fn integer(value: impl Into<BigInt>) -> Self {
        Self::Integer(value.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn parameter_type(&self) -> ContractParameterType {
        match self {
            Self::Any => ContractParameterType::Any,
            Self::Boolean(_) => ContractParameterType::Boolean,
            Self::Integer(_) => ContractParameterType::Integer,
            Self::ByteArray(_) => ContractParameterType::ByteArray,
            Self::String(_) => ContractParameterType::String,
            Self::Hash160(_) => ContractParameterType::Hash160,
            Self::Hash256(_) => ContractParameterType::Hash256,
            Self::PublicKey(_) => ContractParameterType::PublicKey,
            Self::Signature(_) => ContractParameterType::Signature,
            Self::Array(_) => ContractParameterType::Array,
            Self::Map(_) => ContractParameterType::Map,
        }
    }

    /// JSON-RPC form, `{"type": ..., "value": ...}`.
    pub fn to_json(&self) -> Value {
        let kind = self.parameter_type().as_str();
        match self {
            Self::Any => json!({ "type": kind }),
            Self::Boolean(value) => json!({ "type": kind, "value": value }),
            Self::Integer(value) => json!({ "type": kind, "value": value.to_string() }),
            Self::ByteArray(bytes) | Self::Signature(bytes) => {
                json!({ "type": kind, "value": BASE64.encode(bytes) })
            }
            Self::String(value) => json!({ "type": kind, "value": value }),
            Self::Hash160(hash) => json!({ "type": kind, "value": hash.to_string() }),
            Self::Hash256(hash) => json!({ "type": kind, "value": hash.to_string() }),
            Self::PublicKey(key) => json!({ "type": kind, "value": key.to_hex() }),
            Self::Array(items) => json!({
                "type": kind,
                "value": items.iter().map(ContractParameter::to_json).collect::<Vec<_>>(),
            }),
            Self::Map(entries) => json!({
                "type": kind,
                "value": entries
                    .iter()
                    .map(|(k, v)| json!({ "key": k.to_json(), "value": v.to_json() }))
                    .collect::<Vec<_>>(),
            }),
        }
    }
}

impl From<bool> for ContractParameter {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for ContractParameter {
    fn from(value: i64) -> Self {
        Self::Integer(value.into())
    }
}

impl From<&str> for ContractParameter {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<UInt160> for ContractParameter {
    fn from(value: UInt160) -> Self {
        Self::Hash160(value)
    }
}

impl From<UInt256> for ContractParameter {
    fn from(value: UInt256) -> Self {
        Self::Hash256(value)
    }
}

impl From<ECPoint> for ContractParameter {
    fn from(value: ECPoint) -> Self {
        Self::PublicKey(value)
    }
}
