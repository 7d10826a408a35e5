// Copyright (C) 2015-2025 The Neo Project.
//
// transaction_attribute.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::error::{CoreError, CoreResult};
use base64::{engine::general_purpose, Engine as _};
use neo_io::{helper::get_var_bytes_size, BinaryWriter, IoError, IoResult, MemoryReader, Serializable};
use neo_primitives::{TransactionAttributeType, UInt256, UINT256_SIZE};
use serde_json::{json, Value};

/// Largest oracle response payload.
pub const MAX_ORACLE_RESULT_SIZE: usize = u16::MAX as usize;

/// Outcome code carried by an oracle response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OracleResponseCode {
    Success = 0x00,
    ProtocolNotSupported = 0x10,
    ConsensusUnreachable = 0x12,
    NotFound = 0x14,
    Timeout = 0x16,
    Forbidden = 0x18,
    ResponseTooLarge = 0x1a,
    InsufficientFunds = 0x1c,
    ContentTypeNotSupported = 0x1f,
    Error = 0xff,
}

impl OracleResponseCode {
    const ALL: [OracleResponseCode; 10] = [
        Self::Success,
        Self::ProtocolNotSupported,
        Self::ConsensusUnreachable,
        Self::NotFound,
        Self::Timeout,
        Self::Forbidden,
        Self::ResponseTooLarge,
        Self::InsufficientFunds,
        Self::ContentTypeNotSupported,
        Self::Error,
    ];

    pub fn from_byte(value: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|code| *code as u8 == value)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|code| format!("{code:?}") == name)
    }
}

/// Extra data attached to a transaction, tagged by [`TransactionAttributeType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionAttribute {
    /// Puts the transaction ahead of the mempool queue; committee senders only.
    HighPriority,
    OracleResponse {
        id: u64,
        code: OracleResponseCode,
        result: Vec<u8>,
    },
    /// The transaction is invalid before this block height.
    NotValidBefore { height: u32 },
    /// The transaction cannot be included together with `hash`.
    Conflicts { hash: UInt256 },
}

impl TransactionAttribute {
    pub fn attribute_type(&self) -> TransactionAttributeType {
        match self {
            Self::HighPriority => TransactionAttributeType::HighPriority,
            Self::OracleResponse { .. } => TransactionAttributeType::OracleResponse,
            Self::NotValidBefore { .. } => TransactionAttributeType::NotValidBefore,
            Self::Conflicts { .. } => TransactionAttributeType::Conflicts,
        }
    }

    pub fn allow_multiple(&self) -> bool {
        self.attribute_type().allow_multiple()
    }

    pub fn to_json(&self) -> Value {
        let kind = format!("{:?}", self.attribute_type());
        match self {
            Self::HighPriority => json!({ "type": kind }),
            Self::OracleResponse { id, code, result } => json!({
                "type": kind,
                "id": id,
                "code": format!("{code:?}"),
                "result": general_purpose::STANDARD.encode(result),
            }),
            Self::NotValidBefore { height } => json!({ "type": kind, "height": height }),
            Self::Conflicts { hash } => json!({ "type": kind, "hash": hash.to_string() }),
        }
    }

    pub fn from_json(json: &Value) -> CoreResult<Self> {
        let kind = json
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| CoreError::invalid_argument("Attribute type missing"))?;
        let missing = |field: &str| CoreError::invalid_argument(format!("{kind} attribute missing {field}"));

        match kind {
            "HighPriority" => Ok(Self::HighPriority),
            "OracleResponse" => {
                let id = json.get("id").and_then(Value::as_u64).ok_or_else(|| missing("id"))?;
                let code = json
                    .get("code")
                    .and_then(Value::as_str)
                    .and_then(OracleResponseCode::from_name)
                    .ok_or_else(|| missing("code"))?;
                let result = json
                    .get("result")
                    .and_then(Value::as_str)
                    .ok_or_else(|| missing("result"))?;
                let result = general_purpose::STANDARD
                    .decode(result)
                    .map_err(|e| CoreError::invalid_argument(e.to_string()))?;
                Ok(Self::OracleResponse { id, code, result })
            }
            "NotValidBefore" => {
                let height = json
                    .get("height")
                    .and_then(Value::as_u64)
                    .and_then(|h| u32::try_from(h).ok())
                    .ok_or_else(|| missing("height"))?;
                Ok(Self::NotValidBefore { height })
            }
            "Conflicts" => {
                let hash = json
                    .get("hash")
                    .and_then(Value::as_str)
                    .ok_or_else(|| missing("hash"))?;
                let hash = UInt256::parse(hash).map_err(|e| CoreError::invalid_argument(e.to_string()))?;
                Ok(Self::Conflicts { hash })
            }
            other => Err(CoreError::invalid_argument(format!(
                "Unsupported transaction attribute type: {other}"
            ))),
        }
    }
}

impl Serializable for TransactionAttribute {
    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let tag = reader.read_u8()?;
        let attribute_type =
            TransactionAttributeType::from_byte(tag).map_err(|e| IoError::invalid_data(e.to_string()))?;
        Ok(match attribute_type {
            TransactionAttributeType::HighPriority => Self::HighPriority,
            TransactionAttributeType::OracleResponse => {
                let id = reader.read_u64()?;
                let byte = reader.read_u8()?;
                let code = OracleResponseCode::from_byte(byte)
                    .ok_or_else(|| IoError::invalid_data(format!("Invalid oracle response code: {byte:#04x}")))?;
                let result = reader.read_var_bytes(MAX_ORACLE_RESULT_SIZE)?;
                if code != OracleResponseCode::Success && !result.is_empty() {
                    return Err(IoError::invalid_data("Failed oracle response must not carry a result"));
                }
                Self::OracleResponse { id, code, result }
            }
            TransactionAttributeType::NotValidBefore => Self::NotValidBefore {
                height: reader.read_u32()?,
            },
            TransactionAttributeType::Conflicts => Self::Conflicts {
                hash: UInt256::deserialize(reader)?,
            },
        })
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_u8(self.attribute_type().to_byte());
        match self {
            Self::HighPriority => {}
            Self::OracleResponse { id, code, result } => {
                if result.len() > MAX_ORACLE_RESULT_SIZE {
                    return Err(IoError::exceeds(
                        "Oracle result length",
                        result.len() as u64,
                        MAX_ORACLE_RESULT_SIZE as u64,
                    ));
                }
                writer.write_u64(*id);
                writer.write_u8(*code as u8);
                writer.write_var_bytes(result);
            }
            Self::NotValidBefore { height } => writer.write_u32(*height),
            Self::Conflicts { hash } => hash.serialize(writer)?,
        }
        Ok(())
    }

    fn size(&self) -> usize {
        1 + match self {
            Self::HighPriority => 0,
            Self::OracleResponse { result, .. } => 8 + 1 + get_var_bytes_size(result.len()),
            Self::NotValidBefore { .. } => 4,
            Self::Conflicts { .. } => UINT256_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_io::SerializableExt;

    #[test]
    fn high_priority_is_a_single_tag() {
        assert_eq!(TransactionAttribute::HighPriority.to_array().unwrap(), vec![0x01]);
    }

    #[test]
    fn oracle_response_layout() {
        let attribute = TransactionAttribute::OracleResponse {
            id: 7,
            code: OracleResponseCode::Success,
            result: vec![0xAA, 0xBB],
        };
        let bytes = attribute.to_array().unwrap();
        assert_eq!(bytes[0], 0x11);
        assert_eq!(&bytes[1..9], &7u64.to_le_bytes());
        assert_eq!(&bytes[9..], &[0x00, 0x02, 0xAA, 0xBB]);
        assert_eq!(bytes.len(), attribute.size());
        assert_eq!(TransactionAttribute::from_array(&bytes).unwrap(), attribute);
    }

    #[test]
    fn failed_oracle_response_with_result_is_rejected() {
        let bytes = [0x11, 1, 0, 0, 0, 0, 0, 0, 0, 0x14, 0x01, 0xFF];
        assert!(TransactionAttribute::from_array(&bytes).is_err());
    }

    #[test]
    fn not_valid_before_and_conflicts_round_trip() {
        let hash = UInt256::parse("0x4a4f5b2a1b4f4d5e5b2a1b4f4d5e5b2a1b4f4d5e5b2a1b4f4d5e5b2a1b4f4d5e").unwrap();
        for attribute in [
            TransactionAttribute::NotValidBefore { height: 12_345 },
            TransactionAttribute::Conflicts { hash },
        ] {
            let bytes = attribute.to_array().unwrap();
            assert_eq!(TransactionAttribute::from_array(&bytes).unwrap(), attribute);
            assert_eq!(TransactionAttribute::from_json(&attribute.to_json()).unwrap(), attribute);
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert!(TransactionAttribute::from_array(&[0x02]).is_err());
    }

    #[test]
    fn only_conflicts_allow_multiple() {
        assert!(!TransactionAttribute::HighPriority.allow_multiple());
        assert!(TransactionAttribute::Conflicts { hash: UInt256::zero() }.allow_multiple());
    }
}
