// Copyright (C) 2015-2025 The Neo Project.
//
// binary_writer.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::error::{IoError, IoResult};
use crate::serializable::Serializable;

/// An append-only little-endian writer producing Neo wire bytes.
///
/// ```rust
/// use neo_io::BinaryWriter;
///
/// let mut writer = BinaryWriter::new();
/// writer.write_u32(42);
/// writer.write_var_string("Neo");
/// assert_eq!(writer.into_bytes(), [42, 0, 0, 0, 3, b'N', b'e', b'o']);
/// ```
#[derive(Debug, Default, Clone)]
pub struct BinaryWriter {
    buffer: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buffer.push(value as u8);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_bytes(&mut self, buffer: &[u8]) {
        self.buffer.extend_from_slice(buffer);
    }

    /// Writes a variable-length integer using the smallest marker that fits.
    pub fn write_var_int(&mut self, value: u64) {
        if value < 0xFD {
            self.write_u8(value as u8);
        } else if value <= 0xFFFF {
            self.write_u8(0xFD);
            self.write_u16(value as u16);
        } else if value <= 0xFFFF_FFFF {
            self.write_u8(0xFE);
            self.write_u32(value as u32);
        } else {
            self.write_u8(0xFF);
            self.write_u64(value);
        }
    }

    pub fn write_var_bytes(&mut self, value: &[u8]) {
        self.write_var_int(value.len() as u64);
        self.write_bytes(value);
    }

    pub fn write_var_string(&mut self, value: &str) {
        self.write_var_bytes(value.as_bytes());
    }

    /// Writes `value` as UTF-8 padded with zero bytes to exactly `length` bytes.
    pub fn write_fixed_string(&mut self, value: &str, length: usize) -> IoResult<()> {
        let bytes = value.as_bytes();
        if bytes.len() > length {
            return Err(IoError::invalid_data(format!(
                "UTF-8 byte length {} exceeds fixed size {}",
                bytes.len(),
                length
            )));
        }
        self.write_bytes(bytes);
        self.buffer.resize(self.buffer.len() + (length - bytes.len()), 0);
        Ok(())
    }

    pub fn write_serializable<T: Serializable>(&mut self, value: &T) -> IoResult<()> {
        value.serialize(self)
    }

    /// Writes a varint count followed by each item.
    pub fn write_serializable_list<T: Serializable>(&mut self, values: &[T]) -> IoResult<()> {
        self.write_var_int(values.len() as u64);
        for item in values {
            item.serialize(self)?;
        }
        Ok(())
    }
}
