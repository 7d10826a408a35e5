// Copyright (C) 2015-2025 The Neo Project.
//
// contract.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Verification (redeem) scripts for standard accounts.

use crate::error::{ContractError, ContractResult};
use neo_cryptography::{ec_point::COMPRESSED_SIZE, hash, ECPoint};
use neo_primitives::{ContractParameterType, UInt160};
use neo_vm::{InteropService, OpCode, ScriptBuilder};

/// Upper bound on the number of keys in a multi-signature account.
pub const MAX_MULTI_SIG_KEYS: usize = 1024;

/// Length of an ECDSA signature push in an invocation script.
pub const SIGNATURE_SIZE: usize = 64;

/// A verification script together with the parameters it expects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contract {
    pub script: Vec<u8>,
    pub parameter_list: Vec<ContractParameterType>,
}

impl Contract {
    pub fn create(parameter_list: Vec<ContractParameterType>, redeem_script: Vec<u8>) -> Self {
        Self {
            script: redeem_script,
            parameter_list,
        }
    }

    pub fn script_hash(&self) -> UInt160 {
        hash::script_hash(&self.script)
    }

    pub fn create_signature_contract(public_key: &ECPoint) -> Self {
        Self::create(
            vec![ContractParameterType::Signature],
            Self::create_signature_redeem_script(public_key),
        )
    }

    pub fn create_multi_sig_contract(m: usize, public_keys: &[ECPoint]) -> ContractResult<Self> {
        let script = Self::create_multi_sig_redeem_script(m, public_keys)?;
        Ok(Self::create(vec![ContractParameterType::Signature; m], script))
    }

    /// `PUSHDATA1 <key> SYSCALL System.Crypto.CheckSig`
    pub fn create_signature_redeem_script(public_key: &ECPoint) -> Vec<u8> {
        let mut builder = ScriptBuilder::new();
        builder
            .emit_push_public_key(public_key)
            .emit_syscall(InteropService::SystemCryptoCheckSig);
        builder.into_script()
    }

    /// `m`, the keys in ascending encoded order, `n`, then `System.Crypto.CheckMultisig`.
    pub fn create_multi_sig_redeem_script(m: usize, public_keys: &[ECPoint]) -> ContractResult<Vec<u8>> {
        let n = public_keys.len();
        if m == 0 || m > n || n > MAX_MULTI_SIG_KEYS {
            return Err(ContractError::invalid_argument(format!(
                "Invalid multi-sig parameters: m={m}, n={n}"
            )));
        }

        let mut sorted_keys = public_keys.to_vec();
        sorted_keys.sort();

        let mut builder = ScriptBuilder::new();
        builder.emit_push_int(m as i64);
        for key in &sorted_keys {
            builder.emit_push_public_key(key);
        }
        builder
            .emit_push_int(n as i64)
            .emit_syscall(InteropService::SystemCryptoCheckMultisig);
        Ok(builder.into_script())
    }

    /// `PUSHDATA1 64 <signature>`
    pub fn create_invocation_script(signature: &[u8]) -> Vec<u8> {
        let mut builder = ScriptBuilder::new();
        builder.emit_push_data(signature);
        builder.into_script()
    }

    /// Returns the key of a single-signature verification script.
    pub fn parse_signature_redeem_script(script: &[u8]) -> Option<ECPoint> {
        if script.len() != 40
            || script[0] != OpCode::PUSHDATA1 as u8
            || script[1] != COMPRESSED_SIZE as u8
            || script[35] != OpCode::SYSCALL as u8
            || script[36..40] != InteropService::SystemCryptoCheckSig.hash()
        {
            return None;
        }
        ECPoint::from_bytes(&script[2..35]).ok()
    }

    /// Returns `(m, keys)` of a multi-signature verification script.
    pub fn parse_multi_sig_redeem_script(script: &[u8]) -> Option<(usize, Vec<ECPoint>)> {
        let mut offset = 0;
        let m = read_small_int(script, &mut offset)?;

        let mut keys = Vec::new();
        while script.get(offset) == Some(&(OpCode::PUSHDATA1 as u8))
            && script.get(offset + 1) == Some(&(COMPRESSED_SIZE as u8))
        {
            let bytes = script.get(offset + 2..offset + 2 + COMPRESSED_SIZE)?;
            keys.push(ECPoint::from_bytes(bytes).ok()?);
            offset += 2 + COMPRESSED_SIZE;
        }

        let n = read_small_int(script, &mut offset)?;
        if n != keys.len() || m == 0 || m > n || n > MAX_MULTI_SIG_KEYS {
            return None;
        }
        if script.get(offset) != Some(&(OpCode::SYSCALL as u8)) {
            return None;
        }
        let syscall = script.get(offset + 1..offset + 5)?;
        if syscall != InteropService::SystemCryptoCheckMultisig.hash() || script.len() != offset + 5 {
            return None;
        }
        Some((m, keys))
    }
}

/// Reads a `PUSH1..PUSH16`, `PUSHINT8` or `PUSHINT16` operand.
fn read_small_int(script: &[u8], offset: &mut usize) -> Option<usize> {
    let op = *script.get(*offset)?;
    let value = if (OpCode::PUSH1 as u8..=OpCode::PUSH16 as u8).contains(&op) {
        *offset += 1;
        (op - OpCode::PUSH0 as u8) as usize
    } else if op == OpCode::PUSHINT8 as u8 {
        let value = *script.get(*offset + 1)? as i8;
        *offset += 2;
        usize::try_from(value).ok()?
    } else if op == OpCode::PUSHINT16 as u8 {
        let bytes = script.get(*offset + 1..*offset + 3)?;
        *offset += 3;
        usize::try_from(i16::from_le_bytes([bytes[0], bytes[1]])).ok()?
    } else {
        return None;
    };
    Some(value)
}
