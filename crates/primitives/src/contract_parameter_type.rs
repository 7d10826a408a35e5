// Copyright (C) 2015-2025 The Neo Project.
//
// contract_parameter_type.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! ContractParameterType, the type tag of a contract call argument.

use crate::error::{PrimitiveError, PrimitiveResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContractParameterType {
    #[default]
    Any = 0x00,
    Boolean = 0x10,
    Integer = 0x11,
    ByteArray = 0x12,
    String = 0x13,
    Hash160 = 0x14,
    Hash256 = 0x15,
    PublicKey = 0x16,
    Signature = 0x17,
    Array = 0x20,
    Map = 0x22,
    InteropInterface = 0x30,
    /// Only valid as a method return type.
    Void = 0xff,
}

impl ContractParameterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractParameterType::Any => "Any",
            ContractParameterType::Boolean => "Boolean",
            ContractParameterType::Integer => "Integer",
            ContractParameterType::ByteArray => "ByteArray",
            ContractParameterType::String => "String",
            ContractParameterType::Hash160 => "Hash160",
            ContractParameterType::Hash256 => "Hash256",
            ContractParameterType::PublicKey => "PublicKey",
            ContractParameterType::Signature => "Signature",
            ContractParameterType::Array => "Array",
            ContractParameterType::Map => "Map",
            ContractParameterType::InteropInterface => "InteropInterface",
            ContractParameterType::Void => "Void",
        }
    }

    pub fn from_name(name: &str) -> PrimitiveResult<Self> {
        let value = match name {
            "Any" => ContractParameterType::Any,
            "Boolean" => ContractParameterType::Boolean,
            "Integer" => ContractParameterType::Integer,
            "ByteArray" => ContractParameterType::ByteArray,
            "String" => ContractParameterType::String,
            "Hash160" => ContractParameterType::Hash160,
            "Hash256" => ContractParameterType::Hash256,
            "PublicKey" => ContractParameterType::PublicKey,
            "Signature" => ContractParameterType::Signature,
            "Array" => ContractParameterType::Array,
            "Map" => ContractParameterType::Map,
            "InteropInterface" => ContractParameterType::InteropInterface,
            "Void" => ContractParameterType::Void,
            other => {
                return Err(PrimitiveError::invalid_format(format!(
                    "unknown contract parameter type '{other}'"
                )))
            }
        };
        Ok(value)
    }
}

impl fmt::Display for ContractParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ContractParameterType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ContractParameterType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_name(&s).map_err(serde::de::Error::custom)
    }
}
