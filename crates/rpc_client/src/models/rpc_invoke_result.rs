// Copyright (C) 2015-2025 The Neo Project.
//
// rpc_invoke_result.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::amount;
use base64::{engine::general_purpose, Engine as _};
use neo_primitives::UInt160;
use num_bigint::BigInt;
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VmState {
    None,
    Halt,
    Fault,
    Break,
}

impl VmState {
    pub fn has_faulted(self) -> bool {
        self == VmState::Fault
    }
}

impl fmt::Display for VmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VmState::None => "NONE",
            VmState::Halt => "HALT",
            VmState::Fault => "FAULT",
            VmState::Break => "BREAK",
        };
        f.write_str(name)
    }
}

/// A VM stack item in the JSON form nodes return.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum StackItem {
    Any,
    Pointer {
        value: u32,
    },
    Boolean {
        value: bool,
    },
    /// Decimal string.
    Integer {
        value: String,
    },
    /// Base64 payload.
    ByteString {
        value: String,
    },
    /// Base64 payload.
    Buffer {
        value: String,
    },
    Array {
        #[serde(default)]
        value: Vec<StackItem>,
    },
    Struct {
        #[serde(default)]
        value: Vec<StackItem>,
    },
    Map {
        #[serde(default)]
        value: Vec<MapEntry>,
    },
    /// Handle to a node-side object, such as an iterator kept in a session.
    InteropInterface {
        #[serde(default)]
        interface: Option<String>,
        #[serde(default)]
        id: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MapEntry {
    pub key: StackItem,
    pub value: StackItem,
}

impl StackItem {
    pub fn type_name(&self) -> &'static str {
        match self {
            StackItem::Any => "Any",
            StackItem::Pointer { .. } => "Pointer",
            StackItem::Boolean { .. } => "Boolean",
            StackItem::Integer { .. } => "Integer",
            StackItem::ByteString { .. } => "ByteString",
            StackItem::Buffer { .. } => "Buffer",
            StackItem::Array { .. } => "Array",
            StackItem::Struct { .. } => "Struct",
            StackItem::Map { .. } => "Map",
            StackItem::InteropInterface { .. } => "InteropInterface",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StackItem::Boolean { value } => Some(*value),
            StackItem::Integer { .. } => self.as_integer().map(|i| i != BigInt::from(0)),
            _ => None,
        }
    }

    /// Integer value; byte strings are read as little-endian two's complement.
    pub fn as_integer(&self) -> Option<BigInt> {
        match self {
            StackItem::Integer { value } => value.parse().ok(),
            StackItem::Boolean { value } => Some(BigInt::from(u8::from(*value))),
            StackItem::ByteString { .. } | StackItem::Buffer { .. } => {
                self.as_bytes().map(|b| BigInt::from_signed_bytes_le(&b))
            }
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<Vec<u8>> {
        match self {
            StackItem::ByteString { value } | StackItem::Buffer { value } => {
                general_purpose::STANDARD.decode(value).ok()
            }
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<String> {
        self.as_bytes().and_then(|b| String::from_utf8(b).ok())
    }

    /// A 20-byte little-endian byte string read as a script hash.
    pub fn as_hash160(&self) -> Option<UInt160> {
        self.as_bytes().and_then(|b| UInt160::from_bytes(&b).ok())
    }

    pub fn as_array(&self) -> Option<&[StackItem]> {
        match self {
            StackItem::Array { value } | StackItem::Struct { value } => Some(value),
            _ => None,
        }
    }

    pub fn iterator_id(&self) -> Option<&str> {
        match self {
            StackItem::InteropInterface { id, .. } => id.as_deref(),
            _ => None,
        }
    }
}

/// Result of `invokescript` and `invokefunction`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcInvokeResult {
    pub script: String,
    pub state: VmState,
    #[serde(rename = "gasconsumed", deserialize_with = "amount::deserialize")]
    pub gas_consumed: i64,
    #[serde(default)]
    pub exception: Option<String>,
    #[serde(default)]
    pub stack: Vec<StackItem>,
    #[serde(default)]
    pub session: Option<String>,
    /// Signed transaction, when the invocation was made with a wallet.
    #[serde(default)]
    pub tx: Option<String>,
}

impl RpcInvokeResult {
    pub fn has_state_fault(&self) -> bool {
        self.state.has_faulted()
    }

    pub fn first_stack_item(&self) -> Option<&StackItem> {
        self.stack.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_iterator_result() {
        let result: RpcInvokeResult = serde_json::from_value(json!({
            "script": "wh8MBnN5bWJvbAwU",
            "state": "HALT",
            "gasconsumed": "984060",
            "exception": null,
            "notifications": [],
            "stack": [{
                "type": "InteropInterface",
                "interface": "IIterator",
                "id": "fcf7b800-192a-488e-aac1-9b3a1c7a6e7c"
            }],
            "session": "a7b35b09-0e0b-4e33-b0c3-7d3be5b2b1e5"
        }))
        .unwrap();
        assert_eq!(result.state, VmState::Halt);
        assert_eq!(result.gas_consumed, 984_060);
        assert_eq!(
            result.first_stack_item().and_then(StackItem::iterator_id),
            Some("fcf7b800-192a-488e-aac1-9b3a1c7a6e7c")
        );
        assert!(result.session.is_some());
    }

    #[test]
    fn parses_fault_with_exception() {
        let result: RpcInvokeResult = serde_json::from_value(json!({
            "script": "EQ==",
            "state": "FAULT",
            "gasconsumed": 60,
            "exception": "ASSERT is executed with false result.",
            "stack": []
        }))
        .unwrap();
        assert!(result.has_state_fault());
        assert_eq!(result.gas_consumed, 60);
        assert_eq!(result.exception.as_deref(), Some("ASSERT is executed with false result."));
    }

    #[test]
    fn stack_item_accessors() {
        let items: Vec<StackItem> = serde_json::from_value(json!([
            { "type": "Integer", "value": "100000000" },
            { "type": "ByteString", "value": "TkVP" },
            { "type": "Boolean", "value": true },
            { "type": "Array", "value": [{ "type": "Any" }] },
            { "type": "Map", "value": [{
                "key": { "type": "ByteString", "value": "AQ==" },
                "value": { "type": "Integer", "value": "-1" }
            }] }
        ]))
        .unwrap();
        assert_eq!(items[0].as_integer(), Some(BigInt::from(100_000_000)));
        assert_eq!(items[1].as_string().as_deref(), Some("NEO"));
        assert_eq!(items[1].as_integer(), Some(BigInt::from(0x4f454e)));
        assert_eq!(items[2].as_bool(), Some(true));
        assert_eq!(items[3].as_array().map(<[StackItem]>::len), Some(1));
        assert_eq!(items[4].type_name(), "Map");
        assert_eq!(items[0].as_bytes(), None);
    }
}
