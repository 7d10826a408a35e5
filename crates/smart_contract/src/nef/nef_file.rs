// Copyright (C) 2015-2025 The Neo Project.
//
// nef_file.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::{
    MethodToken, CHECKSUM_SIZE, COMPILER_FIELD_SIZE, MAX_FILE_SIZE, MAX_SCRIPT_SIZE, NEF_MAGIC,
    SOURCE_URL_MAX, TOKENS_MAX,
};
use crate::error::{ContractError, ContractResult};
use neo_cryptography::hash::hash256;
use neo_io::{
    helper::{get_list_size, get_var_bytes_size},
    BinaryWriter, IoError, IoResult, MemoryReader, Serializable, SerializableExt,
};
use std::path::Path;
use tracing::debug;

/// A compiled contract: compiler id, source location, static call tokens,
/// the script and a checksum over everything before it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NefFile {
    compiler: String,
    source: String,
    tokens: Vec<MethodToken>,
    script: Vec<u8>,
    checksum: u32,
}

impl NefFile {
    /// Builds a NEF and computes its checksum.
    pub fn new(
        compiler: impl Into<String>,
        source: impl Into<String>,
        tokens: Vec<MethodToken>,
        script: Vec<u8>,
    ) -> ContractResult<Self> {
        let compiler = compiler.into();
        let source = source.into();
        if compiler.len() > COMPILER_FIELD_SIZE {
            return Err(ContractError::invalid_argument(format!(
                "Compiler name is {} bytes, the maximum is {COMPILER_FIELD_SIZE}",
                compiler.len()
            )));
        }
        if source.len() > SOURCE_URL_MAX {
            return Err(ContractError::invalid_argument(format!(
                "Source URL is {} bytes, the maximum is {SOURCE_URL_MAX}",
                source.len()
            )));
        }
        if tokens.len() > TOKENS_MAX {
            return Err(ContractError::invalid_argument(format!(
                "{} method tokens, the maximum is {TOKENS_MAX}",
                tokens.len()
            )));
        }
        if script.is_empty() {
            return Err(ContractError::invalid_argument("Script cannot be empty"));
        }
        if script.len() > MAX_SCRIPT_SIZE {
            return Err(ContractError::invalid_argument(format!(
                "Script is {} bytes, the maximum is {MAX_SCRIPT_SIZE}",
                script.len()
            )));
        }

        let mut nef = Self {
            compiler,
            source,
            tokens,
            script,
            checksum: 0,
        };
        let mut writer = BinaryWriter::with_capacity(nef.size());
        nef.serialize_without_checksum(&mut writer)?;
        nef.checksum = compute_checksum(writer.as_bytes());
        Ok(nef)
    }

    /// Parses a NEF, rejecting trailing bytes.
    pub fn from_bytes(bytes: &[u8]) -> ContractResult<Self> {
        Ok(Self::from_array(bytes)?)
    }

    /// Reads a NEF file from disk. Files above 1 MiB are refused before reading.
    pub fn read_from_file(path: impl AsRef<Path>) -> ContractResult<Self> {
        let path = path.as_ref();
        let len = std::fs::metadata(path)?.len();
        if len > MAX_FILE_SIZE {
            return Err(IoError::exceeds("NEF file size", len, MAX_FILE_SIZE).into());
        }
        let bytes = std::fs::read(path)?;
        debug!(target: "neo", path = %path.display(), len, "read nef file");
        Self::from_bytes(&bytes)
    }

    pub fn compiler(&self) -> &str {
        &self.compiler
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[MethodToken] {
        &self.tokens
    }

    pub fn script(&self) -> &[u8] {
        &self.script
    }

    pub fn checksum(&self) -> u32 {
        self.checksum
    }

    fn serialize_without_checksum(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_u32(NEF_MAGIC);
        writer.write_fixed_string(&self.compiler, COMPILER_FIELD_SIZE)?;
        writer.write_var_string(&self.source);
        writer.write_u8(0);
        writer.write_serializable_list(&self.tokens)?;
        writer.write_u16(0);
        writer.write_var_bytes(&self.script);
        Ok(())
    }
}

/// First four bytes of `hash256(data)`, read little-endian.
fn compute_checksum(data: &[u8]) -> u32 {
    let digest = hash256(data);
    u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
}

impl Serializable for NefFile {
    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let start = reader.position();

        let magic = reader.read_u32()?;
        if magic != NEF_MAGIC {
            return Err(IoError::invalid_data(format!("Wrong magic 0x{magic:08x}")));
        }
        let compiler = reader.read_fixed_string(COMPILER_FIELD_SIZE)?;
        let source = reader.read_var_string(SOURCE_URL_MAX)?;
        if reader.read_u8()? != 0 {
            return Err(IoError::invalid_data("Reserved byte must be 0"));
        }
        let tokens = reader.read_serializable_list::<MethodToken>(TOKENS_MAX)?;
        if reader.read_u16()? != 0 {
            return Err(IoError::invalid_data("Reserved bytes must be 0"));
        }
        let script = reader.read_var_bytes(MAX_SCRIPT_SIZE)?;
        if script.is_empty() {
            return Err(IoError::invalid_data("Script cannot be empty"));
        }

        let expected = compute_checksum(reader.consumed_since(start));
        let checksum = reader.read_u32()?;
        if checksum != expected {
            return Err(IoError::invalid_data(format!(
                "Checksum mismatch: stored 0x{checksum:08x}, computed 0x{expected:08x}"
            )));
        }

        Ok(Self {
            compiler,
            source,
            tokens,
            script,
            checksum,
        })
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        self.serialize_without_checksum(writer)?;
        writer.write_u32(self.checksum);
        Ok(())
    }

    fn size(&self) -> usize {
        4 + COMPILER_FIELD_SIZE
            + get_var_bytes_size(self.source.len())
            + 1
            + get_list_size(&self.tokens)
            + 2
            + get_var_bytes_size(self.script.len())
            + CHECKSUM_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_primitives::UInt160;
    use neo_vm::CallFlags;
    use proptest::prelude::*;
    use std::io::Write;

    fn sample() -> NefFile {
        let token = MethodToken::new(
            UInt160::parse("0xd2a4cff31913016155e38e474a2c06d08be276cf").unwrap(),
            "transfer",
            4,
            true,
            CallFlags::ALL,
        )
        .unwrap();
        NefFile::new(
            "neon-3.6.0",
            "https://github.com/neo-project/example",
            vec![token],
            vec![0x11, 0x40],
        )
        .unwrap()
    }

    /// Hand-assembled NEF bytes with a correct checksum.
    fn assemble(source_len: usize, script: &[u8]) -> Vec<u8> {
        let mut writer = BinaryWriter::new();
        writer.write_u32(NEF_MAGIC);
        writer.write_fixed_string("test", COMPILER_FIELD_SIZE).unwrap();
        writer.write_var_string(&"s".repeat(source_len));
        writer.write_u8(0);
        writer.write_var_int(0);
        writer.write_u16(0);
        writer.write_var_bytes(script);
        let checksum = compute_checksum(writer.as_bytes());
        writer.write_u32(checksum);
        writer.into_bytes()
    }

    #[test]
    fn test_roundtrip() {
        let nef = sample();
        let bytes = nef.to_array().unwrap();
        assert_eq!(bytes.len(), nef.size());
        assert_eq!(NefFile::from_bytes(&bytes).unwrap(), nef);
    }

    #[test]
    fn test_checksum_is_hash256_prefix() {
        let nef = sample();
        let bytes = nef.to_array().unwrap();
        let body = &bytes[..bytes.len() - CHECKSUM_SIZE];
        assert_eq!(&bytes[bytes.len() - CHECKSUM_SIZE..], &hash256(body)[..4]);
    }

    #[test]
    fn test_empty_script_rejected() {
        let err = NefFile::from_bytes(&assemble(0, &[])).unwrap_err();
        assert!(matches!(err, ContractError::Deserialization(_)));
        assert!(err.to_string().contains("Script cannot be empty"));

        let err = NefFile::new("c", "", vec![], vec![]).unwrap_err();
        assert!(matches!(err, ContractError::InvalidArgument { .. }));
    }

    #[test]
    fn test_source_url_too_long() {
        assert!(NefFile::from_bytes(&assemble(256, &[0x40])).is_ok());
        let err = NefFile::from_bytes(&assemble(257, &[0x40])).unwrap_err();
        assert!(matches!(err, ContractError::Deserialization(_)));
        assert!(err.to_string().contains("exceeds maximum 256"));
    }

    #[test]
    fn test_wrong_magic() {
        let mut bytes = sample().to_array().unwrap();
        bytes[0] ^= 0xFF;
        let err = NefFile::from_bytes(&bytes).unwrap_err();
        assert!(err.to_string().contains("Wrong magic"));
    }

    #[test]
    fn test_reserved_byte_must_be_zero() {
        let mut bytes = assemble(0, &[0x40]);
        // magic + compiler + source length byte
        bytes[4 + COMPILER_FIELD_SIZE + 1] = 1;
        let err = NefFile::from_bytes(&bytes).unwrap_err();
        assert!(err.to_string().contains("Reserved"));
    }

    #[test]
    fn test_compiler_too_long_is_argument_error() {
        let err = NefFile::new("c".repeat(65), "", vec![], vec![0x40]).unwrap_err();
        assert!(matches!(err, ContractError::InvalidArgument { .. }));
    }

    #[test]
    fn test_read_from_file() {
        let nef = sample();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&nef.to_array().unwrap()).unwrap();
        assert_eq!(NefFile::read_from_file(file.path()).unwrap(), nef);
    }

    #[test]
    fn test_oversized_file_refused() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&vec![0u8; MAX_FILE_SIZE as usize + 1]).unwrap();
        let err = NefFile::read_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("NEF file size"));
    }

    proptest! {
        #[test]
        fn test_single_byte_mutation_fails(index in 0usize..1000, flip in 1u8..=255) {
            let bytes = sample().to_array().unwrap();
            let mut mutated = bytes.clone();
            let i = index % mutated.len();
            mutated[i] ^= flip;
            prop_assert!(NefFile::from_bytes(&mutated).is_err());
        }
    }
}
