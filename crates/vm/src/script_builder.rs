// Copyright (C) 2015-2025 The Neo Project.
//
// script_builder.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Script builder for the Neo Virtual Machine.

use crate::call_flags::CallFlags;
use crate::error::{VmError, VmResult};
use crate::interop_service::InteropService;
use crate::op_code::OpCode;
use neo_cryptography::ECPoint;
use neo_primitives::{UInt160, UInt256};
use num_bigint::{BigInt, Sign};
use num_traits::ToPrimitive;

/// Helps construct VM scripts programmatically.
///
/// Every push picks the smallest encoding for its operand: `PUSHM1`/`PUSH0..16`
/// for small integers, `PUSHINT8..PUSHINT256` by byte width otherwise, and
/// `PUSHDATA1/2/4` by payload length.
#[derive(Debug, Default, Clone)]
pub struct ScriptBuilder {
    script: Vec<u8>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self { script: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.script.len()
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }

    pub fn emit(&mut self, op: OpCode) -> &mut Self {
        self.script.push(op as u8);
        self
    }

    pub fn emit_with_operand(&mut self, op: OpCode, operand: &[u8]) -> &mut Self {
        self.script.push(op as u8);
        self.script.extend_from_slice(operand);
        self
    }

    pub fn emit_raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.script.extend_from_slice(bytes);
        self
    }

    /// Pushes a byte string with the narrowest `PUSHDATA` form.
    pub fn emit_push_data(&mut self, data: &[u8]) -> &mut Self {
        let len = data.len();
        if len < 0x100 {
            self.emit_with_operand(OpCode::PUSHDATA1, &[len as u8]);
        } else if len < 0x10000 {
            self.emit_with_operand(OpCode::PUSHDATA2, &(len as u16).to_le_bytes());
        } else {
            self.emit_with_operand(OpCode::PUSHDATA4, &(len as u32).to_le_bytes());
        }
        self.emit_raw(data)
    }

    pub fn emit_push_string(&mut self, value: &str) -> &mut Self {
        self.emit_push_data(value.as_bytes())
    }

    pub fn emit_push_int(&mut self, value: i64) -> &mut Self {
        if (-1..=16).contains(&value) {
            self.script.push((OpCode::PUSH0 as u8).wrapping_add(value as u8));
            return self;
        }
        let bytes = BigInt::from(value).to_signed_bytes_le();
        let (op, width) = integer_opcode(bytes.len()).unwrap_or((OpCode::PUSHINT64, 8));
        self.emit_integer_operand(op, width, bytes, value < 0)
    }

    /// Pushes an integer of up to 256 bits.
    pub fn emit_push_integer(&mut self, value: &BigInt) -> VmResult<&mut Self> {
        if let Some(small) = value.to_i64() {
            return Ok(self.emit_push_int(small));
        }
        let bytes = value.to_signed_bytes_le();
        let (op, width) = integer_opcode(bytes.len())
            .ok_or_else(|| VmError::IntegerTooLarge(value.to_string()))?;
        Ok(self.emit_integer_operand(op, width, bytes, value.sign() == Sign::Minus))
    }

    fn emit_integer_operand(
        &mut self,
        op: OpCode,
        width: usize,
        mut bytes: Vec<u8>,
        negative: bool,
    ) -> &mut Self {
        bytes.resize(width, if negative { 0xFF } else { 0x00 });
        self.emit_with_operand(op, &bytes)
    }

    pub fn emit_push_bool(&mut self, value: bool) -> &mut Self {
        self.emit(if value { OpCode::PUSHT } else { OpCode::PUSHF })
    }

    pub fn emit_push_null(&mut self) -> &mut Self {
        self.emit(OpCode::PUSHNULL)
    }

    /// Pushes a script hash in its little-endian wire order.
    pub fn emit_push_hash160(&mut self, hash: &UInt160) -> &mut Self {
        self.emit_push_data(hash.as_bytes())
    }

    pub fn emit_push_hash256(&mut self, hash: &UInt256) -> &mut Self {
        self.emit_push_data(hash.as_bytes())
    }

    pub fn emit_push_public_key(&mut self, key: &ECPoint) -> &mut Self {
        self.emit_push_data(key.encoded())
    }

    pub fn emit_syscall(&mut self, service: InteropService) -> &mut Self {
        self.emit_with_operand(OpCode::SYSCALL, &service.hash())
    }

    /// Packs the top `count` stack items into an array.
    pub fn emit_pack(&mut self, count: usize) -> &mut Self {
        if count == 0 {
            return self.emit(OpCode::NEWARRAY0);
        }
        self.emit_push_int(count as i64);
        self.emit(OpCode::PACK)
    }

    /// Emits a jump with a one-byte relative offset.
    pub fn emit_jump(&mut self, op: OpCode, offset: i8) -> VmResult<&mut Self> {
        if !op.is_short_jump() {
            return Err(VmError::InvalidJump { opcode: op });
        }
        Ok(self.emit_with_operand(op, &[offset as u8]))
    }

    /// Emits `System.Contract.Call` against an argument array already on the stack.
    ///
    /// Stack layout consumed by the syscall, top first: hash, method, flags, args.
    pub fn emit_dynamic_call(
        &mut self,
        hash: &UInt160,
        method: &str,
        flags: CallFlags,
    ) -> &mut Self {
        self.emit_push_int(flags.bits() as i64);
        self.emit_push_string(method);
        self.emit_push_hash160(hash);
        self.emit_syscall(InteropService::SystemContractCall)
    }

    /// Overwrites one byte of the script emitted so far; used to patch jump offsets.
    pub fn patch(&mut self, position: usize, value: u8) -> VmResult<&mut Self> {
        let len = self.script.len();
        let byte = self
            .script
            .get_mut(position)
            .ok_or(VmError::PatchOutOfRange { position, len })?;
        *byte = value;
        Ok(self)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.script
    }

    pub fn to_array(&self) -> Vec<u8> {
        self.script.clone()
    }

    pub fn into_script(self) -> Vec<u8> {
        self.script
    }
}

fn integer_opcode(byte_len: usize) -> Option<(OpCode, usize)> {
    match byte_len {
        1 => Some((OpCode::PUSHINT8, 1)),
        2 => Some((OpCode::PUSHINT16, 2)),
        3..=4 => Some((OpCode::PUSHINT32, 4)),
        5..=8 => Some((OpCode::PUSHINT64, 8)),
        9..=16 => Some((OpCode::PUSHINT128, 16)),
        17..=32 => Some((OpCode::PUSHINT256, 32)),
        _ => None,
    }
}
