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

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VmError {
    #[error("Integer {0} does not fit in 256 bits")]
    IntegerTooLarge(String),

    #[error("Invalid opcode 0x{0:02x}")]
    InvalidOpCode(u8),

    #[error("{opcode:?} is not a short jump instruction")]
    InvalidJump { opcode: crate::OpCode },

    #[error("Patch position {position} is outside the {len}-byte script")]
    PatchOutOfRange { position: usize, len: usize },
}

pub type VmResult<T> = Result<T, VmError>;
