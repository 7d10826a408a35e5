// Copyright (C) 2015-2025 The Neo Project.
//
// serializable.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::{BinaryWriter, IoError, IoResult, MemoryReader};
use neo_primitives::{UInt160, UInt256, UINT160_SIZE, UINT256_SIZE};

/// A value with a fixed Neo wire encoding.
pub trait Serializable: Sized {
    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self>;
    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()>;
    fn size(&self) -> usize;
}

/// Extension helpers for working with `Serializable` values.
pub trait SerializableExt: Serializable {
    /// Serializes the value into a freshly allocated byte vector.
    fn to_array(&self) -> IoResult<Vec<u8>> {
        let mut writer = BinaryWriter::with_capacity(self.size());
        self.serialize(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// Deserializes a value that must occupy all of `data`.
    fn from_array(data: &[u8]) -> IoResult<Self> {
        let mut reader = MemoryReader::new(data);
        let value = Self::deserialize(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(IoError::invalid_data(format!(
                "{} trailing bytes after value",
                reader.remaining()
            )));
        }
        Ok(value)
    }
}

impl<T: Serializable> SerializableExt for T {}

pub mod helper {
    use super::*;

    /// Returns the number of bytes required to encode a variable-length integer.
    pub fn get_var_size(value: u64) -> usize {
        if value < 0xFD {
            1
        } else if value <= 0xFFFF {
            3
        } else if value <= 0xFFFF_FFFF {
            5
        } else {
            9
        }
    }

    pub fn get_var_bytes_size(len: usize) -> usize {
        get_var_size(len as u64) + len
    }

    /// Size of a varint-prefixed list of serializable items.
    pub fn get_list_size<T: Serializable>(items: &[T]) -> usize {
        get_var_size(items.len() as u64) + items.iter().map(Serializable::size).sum::<usize>()
    }

    pub fn serialize_array<T: Serializable>(items: &[T], writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_serializable_list(items)
    }

    pub fn deserialize_array<T: Serializable>(
        reader: &mut MemoryReader,
        max: usize,
    ) -> IoResult<Vec<T>> {
        reader.read_serializable_list(max)
    }
}

impl Serializable for UInt160 {
    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let bytes = reader.read_memory(UINT160_SIZE)?;
        UInt160::from_bytes(bytes).map_err(|e| IoError::invalid_data(e.to_string()))
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_bytes(self.as_bytes());
        Ok(())
    }

    fn size(&self) -> usize {
        UINT160_SIZE
    }
}

impl Serializable for UInt256 {
    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let bytes = reader.read_memory(UINT256_SIZE)?;
        UInt256::from_bytes(bytes).map_err(|e| IoError::invalid_data(e.to_string()))
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_bytes(self.as_bytes());
        Ok(())
    }

    fn size(&self) -> usize {
        UINT256_SIZE
    }
}
