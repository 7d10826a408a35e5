// Copyright (C) 2015-2025 The Neo Project.
//
// transaction.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::error::{CoreError, CoreResult};
use crate::signer::Signer;
use crate::transaction_attribute::TransactionAttribute;
use crate::witness::Witness;
use base64::{engine::general_purpose, Engine as _};
use neo_cryptography::hash::sha256;
use neo_io::{helper, BinaryWriter, IoError, IoResult, MemoryReader, Serializable, SerializableExt};
use neo_primitives::{TransactionAttributeType, UInt160, UInt256};
use serde_json::{json, Value};
use std::collections::HashSet;

/// The maximum size of a transaction.
pub const MAX_TRANSACTION_SIZE: usize = 102_400;

/// The maximum number of signers plus attributes in a transaction.
pub const MAX_TRANSACTION_ATTRIBUTES: usize = 16;

/// Version + Nonce + SystemFee + NetworkFee + ValidUntilBlock
pub const HEADER_SIZE: usize = 1 + 4 + 8 + 8 + 4;

/// Longest script a transaction may carry.
pub const MAX_SCRIPT_LENGTH: usize = u16::MAX as usize;

/// A Neo N3 transaction.
///
/// The identifier is the sha256 of the unsigned serialization, so any change
/// to the header, signers, attributes or script yields a new [`hash`](Self::hash).
/// Witnesses are not part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    version: u8,
    nonce: u32,
    system_fee: i64,
    network_fee: i64,
    valid_until_block: u32,
    signers: Vec<Signer>,
    attributes: Vec<TransactionAttribute>,
    script: Vec<u8>,
    witnesses: Vec<Witness>,
}

impl Transaction {
    /// An empty version 0 transaction with a random nonce.
    pub fn new() -> Self {
        Self {
            nonce: rand::random(),
            ..Self::default()
        }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn set_version(&mut self, version: u8) {
        self.version = version;
    }

    pub fn nonce(&self) -> u32 {
        self.nonce
    }

    pub fn set_nonce(&mut self, nonce: u32) {
        self.nonce = nonce;
    }

    /// System fee in datoshi (1 datoshi = 1e-8 GAS).
    pub fn system_fee(&self) -> i64 {
        self.system_fee
    }

    pub fn set_system_fee(&mut self, system_fee: i64) -> CoreResult<()> {
        self.system_fee = non_negative_fee("System fee", system_fee)?;
        Ok(())
    }

    /// Network fee in datoshi (1 datoshi = 1e-8 GAS).
    pub fn network_fee(&self) -> i64 {
        self.network_fee
    }

    pub fn set_network_fee(&mut self, network_fee: i64) -> CoreResult<()> {
        self.network_fee = non_negative_fee("Network fee", network_fee)?;
        Ok(())
    }

    pub fn valid_until_block(&self) -> u32 {
        self.valid_until_block
    }

    pub fn set_valid_until_block(&mut self, valid_until_block: u32) {
        self.valid_until_block = valid_until_block;
    }

    pub fn signers(&self) -> &[Signer] {
        &self.signers
    }

    /// Replaces the signers; accounts must be unique and fit next to the attributes.
    pub fn set_signers(&mut self, signers: Vec<Signer>) -> CoreResult<()> {
        check_unique_accounts(&signers)?;
        check_attribute_count(signers.len(), self.attributes.len())?;
        self.signers = signers;
        Ok(())
    }

    pub fn attributes(&self) -> &[TransactionAttribute] {
        &self.attributes
    }

    pub fn set_attributes(&mut self, attributes: Vec<TransactionAttribute>) -> CoreResult<()> {
        check_attribute_count(self.signers.len(), attributes.len())?;
        check_unique_attributes(&attributes).map_err(|e| CoreError::invalid_argument(e.to_string()))?;
        self.attributes = attributes;
        Ok(())
    }

    pub fn has_attribute(&self, attribute_type: TransactionAttributeType) -> bool {
        self.attributes
            .iter()
            .any(|a| a.attribute_type() == attribute_type)
    }

    pub fn script(&self) -> &[u8] {
        &self.script
    }

    pub fn set_script(&mut self, script: Vec<u8>) {
        self.script = script;
    }

    pub fn witnesses(&self) -> &[Witness] {
        &self.witnesses
    }

    pub fn set_witnesses(&mut self, witnesses: Vec<Witness>) {
        self.witnesses = witnesses;
    }

    pub fn add_witness(&mut self, witness: Witness) {
        self.witnesses.push(witness);
    }

    /// The first signer, who pays the fees.
    pub fn sender(&self) -> Option<UInt160> {
        self.signers.first().map(Signer::account)
    }

    /// The unsigned serialization, i.e. everything except the witnesses.
    pub fn get_hash_data(&self) -> CoreResult<Vec<u8>> {
        let mut writer = BinaryWriter::with_capacity(self.size());
        self.serialize_unsigned(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// The transaction id.
    pub fn hash(&self) -> CoreResult<UInt256> {
        Ok(UInt256::from(sha256(&self.get_hash_data()?)))
    }

    /// Bytes signed by each witness: the network magic (little-endian) followed by the hash.
    pub fn get_sign_data(&self, network_magic: u32) -> CoreResult<Vec<u8>> {
        let hash = self.hash()?;
        let mut data = Vec::with_capacity(4 + UInt256::LENGTH);
        data.extend_from_slice(&network_magic.to_le_bytes());
        data.extend_from_slice(hash.as_bytes());
        Ok(data)
    }

    pub fn fee_per_byte(&self) -> i64 {
        match self.size() {
            0 => 0,
            size => self.network_fee / size as i64,
        }
    }

    /// Checks the invariants a node enforces before the transaction is sent.
    pub fn validate(&self) -> CoreResult<()> {
        if self.script.is_empty() {
            return Err(CoreError::illegal_state("Transaction script is empty"));
        }
        if self.signers.is_empty() {
            return Err(CoreError::illegal_state("Transaction has no signers"));
        }
        check_unique_accounts(&self.signers)?;
        check_attribute_count(self.signers.len(), self.attributes.len())?;
        if self.witnesses.len() != self.signers.len() {
            return Err(CoreError::illegal_state(format!(
                "Transaction has {} witnesses for {} signers",
                self.witnesses.len(),
                self.signers.len()
            )));
        }
        for witness in &self.witnesses {
            witness.check_sizes()?;
        }
        let size = self.size();
        if size > MAX_TRANSACTION_SIZE {
            return Err(CoreError::invalid_argument(format!(
                "Transaction size {size} exceeds maximum {MAX_TRANSACTION_SIZE}"
            )));
        }
        Ok(())
    }

    /// Serialized form including witnesses, as hex for `sendrawtransaction`.
    pub fn to_hex(&self) -> CoreResult<String> {
        Ok(hex::encode(self.to_array()?))
    }

    /// Serialized form including witnesses, as base64 for `sendrawtransaction`.
    pub fn to_base64(&self) -> CoreResult<String> {
        Ok(general_purpose::STANDARD.encode(self.to_array()?))
    }

    pub fn serialize_unsigned(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_u8(self.version);
        writer.write_u32(self.nonce);
        writer.write_i64(self.system_fee);
        writer.write_i64(self.network_fee);
        writer.write_u32(self.valid_until_block);
        writer.write_serializable_list(&self.signers)?;
        writer.write_serializable_list(&self.attributes)?;
        writer.write_var_bytes(&self.script);
        Ok(())
    }

    pub fn deserialize_unsigned(reader: &mut MemoryReader) -> IoResult<Self> {
        let version = reader.read_u8()?;
        if version > 0 {
            return Err(IoError::invalid_data(format!("Invalid transaction version: {version}")));
        }
        let nonce = reader.read_u32()?;
        let system_fee = reader.read_i64()?;
        if system_fee < 0 {
            return Err(IoError::invalid_data(format!("Invalid system fee: {system_fee}")));
        }
        let network_fee = reader.read_i64()?;
        if network_fee < 0 {
            return Err(IoError::invalid_data(format!("Invalid network fee: {network_fee}")));
        }
        if system_fee.checked_add(network_fee).is_none() {
            return Err(IoError::invalid_data("Total fee overflows"));
        }
        let valid_until_block = reader.read_u32()?;

        let signers: Vec<Signer> = reader.read_serializable_list(MAX_TRANSACTION_ATTRIBUTES)?;
        if signers.is_empty() {
            return Err(IoError::invalid_data("Transaction has no signers"));
        }
        check_unique_accounts(&signers).map_err(|e| IoError::invalid_data(e.to_string()))?;

        let attributes: Vec<TransactionAttribute> =
            reader.read_serializable_list(MAX_TRANSACTION_ATTRIBUTES - signers.len())?;
        check_unique_attributes(&attributes)?;

        let script = reader.read_var_bytes(MAX_SCRIPT_LENGTH)?;
        if script.is_empty() {
            return Err(IoError::invalid_data("Script cannot be empty"));
        }

        Ok(Self {
            version,
            nonce,
            system_fee,
            network_fee,
            valid_until_block,
            signers,
            attributes,
            script,
            witnesses: Vec::new(),
        })
    }

    pub fn to_json(&self) -> CoreResult<Value> {
        Ok(json!({
            "hash": self.hash()?.to_string(),
            "size": self.size(),
            "version": self.version,
            "nonce": self.nonce,
            "sender": self.sender().map(|s| s.to_string()),
            "sysfee": self.system_fee.to_string(),
            "netfee": self.network_fee.to_string(),
            "validuntilblock": self.valid_until_block,
            "signers": self.signers.iter().map(Signer::to_json).collect::<Vec<_>>(),
            "attributes": self.attributes.iter().map(TransactionAttribute::to_json).collect::<Vec<_>>(),
            "script": general_purpose::STANDARD.encode(&self.script),
            "witnesses": self.witnesses.iter().map(Witness::to_json).collect::<Vec<_>>(),
        }))
    }
}

fn non_negative_fee(what: &str, fee: i64) -> CoreResult<i64> {
    if fee < 0 {
        return Err(CoreError::invalid_argument(format!("{what} cannot be negative: {fee}")));
    }
    Ok(fee)
}

fn check_unique_accounts(signers: &[Signer]) -> CoreResult<()> {
    let mut seen = HashSet::with_capacity(signers.len());
    match signers.iter().find(|s| !seen.insert(s.account())) {
        Some(duplicate) => Err(CoreError::invalid_argument(format!(
            "Duplicate signer account {}",
            duplicate.account()
        ))),
        None => Ok(()),
    }
}

fn check_attribute_count(signers: usize, attributes: usize) -> CoreResult<()> {
    if signers + attributes > MAX_TRANSACTION_ATTRIBUTES {
        return Err(CoreError::invalid_argument(format!(
            "A transaction cannot have more than {MAX_TRANSACTION_ATTRIBUTES} signers and attributes combined, got {}",
            signers + attributes
        )));
    }
    Ok(())
}

fn check_unique_attributes(attributes: &[TransactionAttribute]) -> IoResult<()> {
    let mut seen = HashSet::new();
    for attribute in attributes {
        if !attribute.allow_multiple() && !seen.insert(attribute.attribute_type()) {
            return Err(IoError::invalid_data(format!(
                "Duplicate {:?} attribute",
                attribute.attribute_type()
            )));
        }
    }
    Ok(())
}

impl Serializable for Transaction {
    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let mut transaction = Self::deserialize_unsigned(reader)?;
        let witnesses: Vec<Witness> = reader.read_serializable_list(transaction.signers.len())?;
        if witnesses.len() != transaction.signers.len() {
            return Err(IoError::invalid_data(format!(
                "Witness count {} does not match signer count {}",
                witnesses.len(),
                transaction.signers.len()
            )));
        }
        transaction.witnesses = witnesses;
        Ok(transaction)
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        self.serialize_unsigned(writer)?;
        writer.write_serializable_list(&self.witnesses)
    }

    fn size(&self) -> usize {
        HEADER_SIZE
            + helper::get_list_size(&self.signers)
            + helper::get_list_size(&self.attributes)
            + helper::get_var_bytes_size(self.script.len())
            + helper::get_list_size(&self.witnesses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_cryptography::KeyPair;
    use proptest::prelude::*;

    fn account(seed: u8) -> UInt160 {
        UInt160::from([seed; 20])
    }

    fn sample() -> Transaction {
        let mut tx = Transaction::new();
        tx.set_nonce(0x0102_0304);
        tx.set_system_fee(100).unwrap();
        tx.set_network_fee(200).unwrap();
        tx.set_valid_until_block(5760);
        tx.set_signers(vec![Signer::called_by_entry(account(1))]).unwrap();
        tx.set_script(vec![0x11, 0x40]);
        tx
    }

    #[test]
    fn unsigned_layout() {
        let data = sample().get_hash_data().unwrap();
        assert_eq!(data[0], 0);
        assert_eq!(&data[1..5], &0x0102_0304u32.to_le_bytes());
        assert_eq!(&data[5..13], &100i64.to_le_bytes());
        assert_eq!(&data[13..21], &200i64.to_le_bytes());
        assert_eq!(&data[21..25], &5760u32.to_le_bytes());
        assert_eq!(data[25], 1);
        assert_eq!(&data[26..46], &[1u8; 20]);
        assert_eq!(data[46], 0x01);
        assert_eq!(data[47], 0);
        assert_eq!(&data[48..], &[0x02, 0x11, 0x40]);
    }

    #[test]
    fn hash_ignores_witnesses() {
        let mut tx = sample();
        let before = tx.hash().unwrap();
        tx.add_witness(Witness::new(vec![1], vec![2]));
        assert_eq!(tx.hash().unwrap(), before);
        assert_eq!(before, UInt256::from(sha256(&tx.get_hash_data().unwrap())));
    }

    #[test]
    fn sign_data_prefixes_magic() {
        let tx = sample();
        let data = tx.get_sign_data(860_833_102).unwrap();
        assert_eq!(&data[..4], &860_833_102u32.to_le_bytes());
        assert_eq!(&data[4..], tx.hash().unwrap().as_bytes());
    }

    #[test]
    fn signed_round_trip() {
        let key = KeyPair::from_private_key(&[9u8; 32]).unwrap();
        let mut tx = sample();
        tx.set_signers(vec![Signer::called_by_entry(
            Witness::from_signature(&[0u8; 64], key.public_key()).script_hash(),
        )])
        .unwrap();
        let sign_data = tx.get_sign_data(894_710_606).unwrap();
        tx.add_witness(Witness::create(&sign_data, &key).unwrap());
        tx.validate().unwrap();

        let bytes = tx.to_array().unwrap();
        assert_eq!(bytes.len(), tx.size());
        assert_eq!(Transaction::from_array(&bytes).unwrap(), tx);
    }

    #[test]
    fn duplicate_signers_are_rejected() {
        let mut tx = sample();
        let result = tx.set_signers(vec![
            Signer::called_by_entry(account(1)),
            Signer::global(account(1)),
        ]);
        assert!(matches!(result, Err(CoreError::InvalidArgument { .. })));
    }

    #[test]
    fn signer_and_attribute_count_is_bounded() {
        let mut tx = sample();
        let signers: Vec<Signer> = (0..10).map(|i| Signer::none(account(i))).collect();
        tx.set_signers(signers).unwrap();
        let attributes: Vec<TransactionAttribute> = (0..7)
            .map(|i| TransactionAttribute::Conflicts {
                hash: UInt256::from([i; 32]),
            })
            .collect();
        assert!(tx.set_attributes(attributes[..6].to_vec()).is_ok());
        assert!(tx.set_attributes(attributes).is_err());
    }

    #[test]
    fn duplicate_high_priority_is_rejected() {
        let mut tx = sample();
        let result = tx.set_attributes(vec![
            TransactionAttribute::HighPriority,
            TransactionAttribute::HighPriority,
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn witness_count_must_match_signers() {
        let mut tx = sample();
        tx.add_witness(Witness::empty());
        tx.add_witness(Witness::empty());
        let bytes = tx.to_array().unwrap();
        assert!(Transaction::from_array(&bytes).is_err());
        assert!(matches!(tx.validate(), Err(CoreError::IllegalState { .. })));
    }

    #[test]
    fn empty_script_is_rejected_on_read() {
        let mut tx = sample();
        tx.set_script(Vec::new());
        tx.add_witness(Witness::empty());
        let bytes = tx.to_array().unwrap();
        assert!(Transaction::from_array(&bytes).is_err());
    }

    #[test]
    fn negative_fees_are_rejected() {
        let mut tx = sample();
        assert!(tx.set_system_fee(-1).is_err());
        assert!(tx.set_network_fee(-1).is_err());
    }

    #[test]
    fn json_carries_identifiers() {
        let tx = sample();
        let json = tx.to_json().unwrap();
        assert_eq!(json["hash"], tx.hash().unwrap().to_string());
        assert_eq!(json["sysfee"], "100");
        assert_eq!(json["script"], "EUA=");
        assert_eq!(json["signers"][0]["scopes"], "CalledByEntry");
    }

    proptest! {
        #[test]
        fn nonce_round_trips(nonce in any::<u32>()) {
            let mut tx = sample();
            tx.set_nonce(nonce);
            tx.add_witness(Witness::empty());
            let decoded = Transaction::from_array(&tx.to_array().unwrap()).unwrap();
            prop_assert_eq!(decoded.nonce(), nonce);
        }
    }
}
