// Copyright (C) 2015-2025 The Neo Project.
//
// memory_reader.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::error::{IoError, IoResult};
use crate::serializable::Serializable;
use byteorder::{ByteOrder, LittleEndian};
use std::mem::size_of;

/// A bounds-checked cursor over a byte slice.
pub struct MemoryReader<'a> {
    memory: &'a [u8],
    pos: usize,
}

impl<'a> MemoryReader<'a> {
    pub fn new(memory: &'a [u8]) -> Self {
        Self { memory, pos: 0 }
    }

    #[inline(always)]
    fn ensure_position(&self, move_by: usize) -> IoResult<()> {
        match self.pos.checked_add(move_by) {
            Some(end) if end <= self.memory.len() => Ok(()),
            _ => Err(IoError::UnexpectedEof),
        }
    }

    #[inline(always)]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.memory.len() - self.pos
    }

    #[inline(always)]
    pub fn peek(&self) -> IoResult<u8> {
        self.ensure_position(1)?;
        Ok(self.memory[self.pos])
    }

    pub fn read_bool(&mut self) -> IoResult<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(IoError::invalid_data(format!(
                "Invalid boolean value {other}"
            ))),
        }
    }

    #[inline(always)]
    pub fn read_u8(&mut self) -> IoResult<u8> {
        self.ensure_position(1)?;
        let value = self.memory[self.pos];
        self.pos += 1;
        Ok(value)
    }

    #[inline(always)]
    pub fn read_u16(&mut self) -> IoResult<u16> {
        self.ensure_position(size_of::<u16>())?;
        let value = LittleEndian::read_u16(&self.memory[self.pos..]);
        self.pos += size_of::<u16>();
        Ok(value)
    }

    #[inline(always)]
    pub fn read_u32(&mut self) -> IoResult<u32> {
        self.ensure_position(size_of::<u32>())?;
        let value = LittleEndian::read_u32(&self.memory[self.pos..]);
        self.pos += size_of::<u32>();
        Ok(value)
    }

    #[inline(always)]
    pub fn read_u64(&mut self) -> IoResult<u64> {
        self.ensure_position(size_of::<u64>())?;
        let value = LittleEndian::read_u64(&self.memory[self.pos..]);
        self.pos += size_of::<u64>();
        Ok(value)
    }

    #[inline(always)]
    pub fn read_i64(&mut self) -> IoResult<i64> {
        self.ensure_position(size_of::<i64>())?;
        let value = LittleEndian::read_i64(&self.memory[self.pos..]);
        self.pos += size_of::<i64>();
        Ok(value)
    }

    /// Reads a variable-length integer and checks it against `max`.
    pub fn read_var_int(&mut self, max: u64) -> IoResult<u64> {
        let b = self.read_u8()?;
        let value = match b {
            0xfd => self.read_u16()? as u64,
            0xfe => self.read_u32()? as u64,
            0xff => self.read_u64()?,
            _ => b as u64,
        };
        if value > max {
            return Err(IoError::exceeds("VarInt", value, max));
        }
        Ok(value)
    }

    /// Reads `length` bytes of zero-padded UTF-8.
    ///
    /// Everything after the first zero byte must also be zero.
    pub fn read_fixed_string(&mut self, length: usize) -> IoResult<String> {
        let raw = self.read_memory(length)?;
        let end = raw.iter().position(|b| *b == 0).unwrap_or(raw.len());
        if raw[end..].iter().any(|b| *b != 0) {
            return Err(IoError::invalid_data("Invalid fixed string padding"));
        }
        String::from_utf8(raw[..end].to_vec())
            .map_err(|_| IoError::invalid_data("Invalid UTF-8 sequence"))
    }

    pub fn read_var_string(&mut self, max: usize) -> IoResult<String> {
        let data = self.read_var_memory(max)?;
        String::from_utf8(data.to_vec()).map_err(|_| IoError::invalid_data("Invalid UTF-8 sequence"))
    }

    #[inline(always)]
    pub fn read_memory(&mut self, count: usize) -> IoResult<&'a [u8]> {
        self.ensure_position(count)?;
        let result = &self.memory[self.pos..self.pos + count];
        self.pos += count;
        Ok(result)
    }

    pub fn read_var_memory(&mut self, max: usize) -> IoResult<&'a [u8]> {
        let length = self.read_var_int(max as u64)? as usize;
        self.read_memory(length)
    }

    pub fn read_var_bytes(&mut self, max: usize) -> IoResult<Vec<u8>> {
        Ok(self.read_var_memory(max)?.to_vec())
    }

    pub fn read_serializable<T: Serializable>(&mut self) -> IoResult<T> {
        T::deserialize(self)
    }

    /// Reads a varint count (at most `max`) followed by that many items.
    pub fn read_serializable_list<T: Serializable>(&mut self, max: usize) -> IoResult<Vec<T>> {
        let count = self.read_var_int(max as u64)? as usize;
        let mut result = Vec::with_capacity(count);
        for _ in 0..count {
            result.push(T::deserialize(self)?);
        }
        Ok(result)
    }

    /// The bytes consumed between `start` and the current position.
    pub fn consumed_since(&self, start: usize) -> &'a [u8] {
        &self.memory[start.min(self.pos)..self.pos]
    }

    #[inline(always)]
    pub fn read_to_end(&mut self) -> &'a [u8] {
        let result = &self.memory[self.pos..];
        self.pos = self.memory.len();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BinaryWriter;
    use proptest::prelude::*;

    #[test]
    fn test_read_var_int_enforces_max() {
        let mut reader = MemoryReader::new(&[0xFD, 0x00, 0x01]);
        assert!(matches!(reader.read_var_int(0xFF), Err(IoError::InvalidData(_))));
    }

    #[test]
    fn test_truncated_input_is_eof() {
        let mut reader = MemoryReader::new(&[0xFE, 0x01]);
        assert_eq!(reader.read_var_int(u64::MAX), Err(IoError::UnexpectedEof));
    }

    #[test]
    fn test_var_bytes_length_beyond_buffer() {
        let mut reader = MemoryReader::new(&[0x05, 0x01, 0x02]);
        assert_eq!(reader.read_var_bytes(16), Err(IoError::UnexpectedEof));
    }

    #[test]
    fn test_fixed_string_trims_padding() {
        let mut reader = MemoryReader::new(b"neo\0\0\0");
        assert_eq!(reader.read_fixed_string(6).unwrap(), "neo");
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_fixed_string_rejects_garbage_after_padding() {
        let mut reader = MemoryReader::new(b"ne\0o\0\0");
        assert!(reader.read_fixed_string(6).is_err());
    }

    #[test]
    fn test_bool_rejects_non_binary() {
        let mut reader = MemoryReader::new(&[2]);
        assert!(reader.read_bool().is_err());
    }

    #[test]
    fn test_var_string_rejects_invalid_utf8() {
        let mut reader = MemoryReader::new(&[0x02, 0xC3, 0x28]);
        assert!(reader.read_var_string(10).is_err());
    }

    proptest! {
        #[test]
        fn test_var_int_roundtrip(value in any::<u64>()) {
            let mut writer = BinaryWriter::new();
            writer.write_var_int(value);
            let bytes = writer.into_bytes();
            let mut reader = MemoryReader::new(&bytes);
            prop_assert_eq!(reader.read_var_int(u64::MAX).unwrap(), value);
            prop_assert_eq!(reader.remaining(), 0);
        }
    }
}
