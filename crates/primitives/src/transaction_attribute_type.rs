// Copyright (C) 2015-2025 The Neo Project.
//
// transaction_attribute_type.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::error::{PrimitiveError, PrimitiveResult};

/// Wire tag of a transaction attribute.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionAttributeType {
    HighPriority = 0x01,
    OracleResponse = 0x11,
    NotValidBefore = 0x20,
    Conflicts = 0x21,
}

impl TransactionAttributeType {
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(value: u8) -> PrimitiveResult<Self> {
        match value {
            0x01 => Ok(Self::HighPriority),
            0x11 => Ok(Self::OracleResponse),
            0x20 => Ok(Self::NotValidBefore),
            0x21 => Ok(Self::Conflicts),
            _ => Err(PrimitiveError::UnknownValue {
                kind: "TransactionAttributeType",
                value,
            }),
        }
    }

    /// Whether more than one attribute of this type may appear in a transaction.
    pub fn allow_multiple(self) -> bool {
        matches!(self, Self::Conflicts)
    }
}
