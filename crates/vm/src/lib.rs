// Copyright (C) 2015-2025 The Neo Project.
//
// lib.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! # NeoVM script construction
//!
//! Opcodes, call flags and interop syscalls needed to emit NeoVM bytecode,
//! plus [`ScriptBuilder`], which selects the narrowest push encoding for
//! every value it emits.

pub mod call_flags;
pub mod error;
pub mod interop_service;
pub mod op_code;
pub mod script_builder;

pub use call_flags::CallFlags;
pub use error::{VmError, VmResult};
pub use interop_service::InteropService;
pub use op_code::OpCode;
pub use script_builder::ScriptBuilder;
