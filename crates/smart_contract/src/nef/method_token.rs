// Copyright (C) 2015-2025 The Neo Project.
//
// method_token.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::METHOD_NAME_MAX;
use crate::error::{ContractError, ContractResult};
use neo_io::{helper::get_var_bytes_size, BinaryWriter, IoError, IoResult, MemoryReader, Serializable};
use neo_primitives::{UInt160, UINT160_SIZE};
use neo_vm::CallFlags;

/// A static call target embedded in a NEF file (`CALLT` operand).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodToken {
    pub hash: UInt160,
    pub method: String,
    pub parameters_count: u16,
    pub has_return_value: bool,
    pub call_flags: CallFlags,
}

impl MethodToken {
    pub fn new(
        hash: UInt160,
        method: impl Into<String>,
        parameters_count: u16,
        has_return_value: bool,
        call_flags: CallFlags,
    ) -> ContractResult<Self> {
        let method = method.into();
        validate_method_name(&method).map_err(|e| ContractError::invalid_argument(e.to_string()))?;
        Ok(Self {
            hash,
            method,
            parameters_count,
            has_return_value,
            call_flags,
        })
    }
}

fn validate_method_name(method: &str) -> IoResult<()> {
    if method.len() > METHOD_NAME_MAX {
        return Err(IoError::exceeds(
            "Method name length",
            method.len() as u64,
            METHOD_NAME_MAX as u64,
        ));
    }
    if method.starts_with('_') {
        return Err(IoError::invalid_data(format!(
            "Method name '{method}' must not start with '_'"
        )));
    }
    Ok(())
}

impl Serializable for MethodToken {
    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let hash = UInt160::deserialize(reader)?;
        let method = reader.read_var_string(METHOD_NAME_MAX)?;
        validate_method_name(&method)?;
        let parameters_count = reader.read_u16()?;
        let has_return_value = reader.read_bool()?;
        let flags = reader.read_u8()?;
        let call_flags = CallFlags::from_bits(flags)
            .ok_or_else(|| IoError::invalid_data(format!("Invalid call flags 0x{flags:02x}")))?;
        Ok(Self {
            hash,
            method,
            parameters_count,
            has_return_value,
            call_flags,
        })
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        self.hash.serialize(writer)?;
        writer.write_var_string(&self.method);
        writer.write_u16(self.parameters_count);
        writer.write_bool(self.has_return_value);
        writer.write_u8(self.call_flags.bits());
        Ok(())
    }

    fn size(&self) -> usize {
        UINT160_SIZE + get_var_bytes_size(self.method.len()) + 2 + 1 + 1
    }
}
