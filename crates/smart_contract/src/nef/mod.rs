// Copyright (C) 2015-2025 The Neo Project.
//
// mod.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Neo Executable Format (NEF3).

mod method_token;
mod nef_file;

pub use method_token::MethodToken;
pub use nef_file::NefFile;

/// "NEF3" read as a little-endian u32.
pub const NEF_MAGIC: u32 = 0x3346_454E;
pub const COMPILER_FIELD_SIZE: usize = 64;
pub const METHOD_NAME_MAX: usize = 32;
pub const SOURCE_URL_MAX: usize = 256;
pub const TOKENS_MAX: usize = 128;
pub const MAX_SCRIPT_SIZE: usize = 512 * 1024;
pub const CHECKSUM_SIZE: usize = 4;
/// Files larger than this are refused before parsing.
pub const MAX_FILE_SIZE: u64 = 0x10_0000;
