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

//! Neo IO - the binary codec shared by every wire structure.
//!
//! - variable-length integers (`0xFD`/`0xFE`/`0xFF` markers, little-endian)
//! - var-length byte arrays and UTF-8 strings
//! - fixed-length zero-padded strings
//! - length-prefixed lists of [`Serializable`] items
//!
//! Every decode path takes an explicit maximum and fails with
//! [`IoError`] instead of truncating.

mod binary_writer;
mod error;
mod memory_reader;
pub mod serializable;

pub use binary_writer::BinaryWriter;
pub use error::{IoError, IoResult};
pub use memory_reader::MemoryReader;
pub use serializable::{helper, Serializable, SerializableExt};
