// Copyright (C) 2015-2025 The Neo Project.
//
// contract_script.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Scripts that invoke contract methods.

use crate::contract_parameter::ContractParameter;
use crate::error::ContractResult;
use neo_primitives::UInt160;
use neo_vm::{CallFlags, InteropService, OpCode, ScriptBuilder};

/// Contract-call emission on top of [`ScriptBuilder`].
pub trait ContractScriptBuilderExt {
    /// Pushes a single parameter with the narrowest encoding for its value.
    fn emit_contract_parameter(&mut self, param: &ContractParameter) -> ContractResult<&mut Self>;

    /// Pushes `params` as an array: items in reverse order, then the count and `PACK`.
    fn emit_parameter_array(&mut self, params: &[ContractParameter]) -> ContractResult<&mut Self>;

    /// Emits a full `System.Contract.Call` of `method` on `hash`.
    fn emit_contract_call(
        &mut self,
        hash: &UInt160,
        method: &str,
        params: &[ContractParameter],
        flags: CallFlags,
    ) -> ContractResult<&mut Self>;
}

impl ContractScriptBuilderExt for ScriptBuilder {
    fn emit_contract_parameter(&mut self, param: &ContractParameter) -> ContractResult<&mut Self> {
        match param {
            ContractParameter::Any => {
                self.emit_push_null();
            }
            ContractParameter::Boolean(value) => {
                self.emit_push_bool(*value);
            }
            ContractParameter::Integer(value) => {
                self.emit_push_integer(value)?;
            }
            ContractParameter::ByteArray(bytes) | ContractParameter::Signature(bytes) => {
                self.emit_push_data(bytes);
            }
            ContractParameter::String(value) => {
                self.emit_push_string(value);
            }
            ContractParameter::Hash160(hash) => {
                self.emit_push_hash160(hash);
            }
            ContractParameter::Hash256(hash) => {
                self.emit_push_hash256(hash);
            }
            ContractParameter::PublicKey(key) => {
                self.emit_push_public_key(key);
            }
            ContractParameter::Array(items) => {
                self.emit_parameter_array(items)?;
            }
            ContractParameter::Map(entries) => {
                for (key, value) in entries.iter().rev() {
                    self.emit_contract_parameter(value)?;
                    self.emit_contract_parameter(key)?;
                }
                self.emit_push_int(entries.len() as i64);
                self.emit(OpCode::PACKMAP);
            }
        }
        Ok(self)
    }

    fn emit_parameter_array(&mut self, params: &[ContractParameter]) -> ContractResult<&mut Self> {
        for param in params.iter().rev() {
            self.emit_contract_parameter(param)?;
        }
        self.emit_pack(params.len());
        Ok(self)
    }

    fn emit_contract_call(
        &mut self,
        hash: &UInt160,
        method: &str,
        params: &[ContractParameter],
        flags: CallFlags,
    ) -> ContractResult<&mut Self> {
        self.emit_parameter_array(params)?;
        self.emit_dynamic_call(hash, method, flags);
        Ok(self)
    }
}

/// Script calling `method` on contract `hash`.
pub fn contract_call_script(
    hash: &UInt160,
    method: &str,
    params: &[ContractParameter],
    flags: CallFlags,
) -> ContractResult<Vec<u8>> {
    let mut sb = ScriptBuilder::new();
    sb.emit_contract_call(hash, method, params, flags)?;
    Ok(sb.into_script())
}

/// Calls a method returning an iterator and drains at most `max_items` of it
/// into an array, inside the VM.
///
/// Used against nodes that do not keep iterator sessions. Stack while looping,
/// bottom first: `max_items`, iterator, result array.
pub fn build_contract_call_and_unwrap_iterator(
    hash: &UInt160,
    method: &str,
    params: &[ContractParameter],
    max_items: u32,
    flags: CallFlags,
) -> ContractResult<Vec<u8>> {
    let mut sb = ScriptBuilder::new();
    sb.emit_push_int(max_items as i64);
    sb.emit_contract_call(hash, method, params, flags)?;
    sb.emit(OpCode::NEWARRAY0);

    let loop_start = sb.len();
    sb.emit(OpCode::OVER);
    sb.emit_syscall(InteropService::SystemIteratorNext);

    let jump_if_done = sb.len();
    sb.emit_jump(OpCode::JMPIFNOT, 0)?;

    sb.emit(OpCode::DUP).emit(OpCode::PUSH2).emit(OpCode::PICK);
    sb.emit_syscall(InteropService::SystemIteratorValue);
    sb.emit(OpCode::APPEND);

    sb.emit(OpCode::DUP)
        .emit(OpCode::SIZE)
        .emit(OpCode::PUSH3)
        .emit(OpCode::PICK)
        .emit(OpCode::GE);

    let jump_if_full = sb.len();
    sb.emit_jump(OpCode::JMPIF, 0)?;

    let jump_back = sb.len();
    sb.emit_jump(OpCode::JMP, (loop_start as isize - jump_back as isize) as i8)?;

    let exit = sb.len();
    sb.emit(OpCode::NIP).emit(OpCode::NIP);

    sb.patch(jump_if_done + 1, (exit - jump_if_done) as u8)?;
    sb.patch(jump_if_full + 1, (exit - jump_if_full) as u8)?;
    Ok(sb.into_script())
}
