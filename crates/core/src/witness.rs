// Copyright (C) 2015-2025 The Neo Project.
//
// witness.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::error::{CoreError, CoreResult};
use base64::{engine::general_purpose, Engine as _};
use neo_cryptography::{hash, ECPoint, KeyPair};
use neo_io::{helper::get_var_bytes_size, BinaryWriter, IoError, IoResult, MemoryReader, Serializable};
use neo_primitives::UInt160;
use neo_smart_contract::{Contract, ContractParameter, ContractScriptBuilderExt};
use neo_vm::ScriptBuilder;
use serde_json::{json, Value};
use std::collections::BTreeMap;

// Sized for a 21-member committee multi-sig:
// invocation = 11 * (64 + 2) = 726, verification = 1 + (2 + 33) * 21 + 2 + 5 = 743
pub const MAX_INVOCATION_SCRIPT: usize = 1024;
pub const MAX_VERIFICATION_SCRIPT: usize = 1024;

/// An invocation script (signatures) paired with the verification script it satisfies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Witness {
    pub invocation_script: Vec<u8>,
    pub verification_script: Vec<u8>,
}

impl Witness {
    pub fn new(invocation_script: Vec<u8>, verification_script: Vec<u8>) -> Self {
        Self {
            invocation_script,
            verification_script,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Signs `message` and builds a single-signature witness for the key's account.
    pub fn create(message: &[u8], key_pair: &KeyPair) -> CoreResult<Self> {
        let signature = key_pair.sign(message)?;
        Ok(Self::from_signature(&signature, key_pair.public_key()))
    }

    pub fn from_signature(signature: &[u8], public_key: &ECPoint) -> Self {
        Self::new(
            Contract::create_invocation_script(signature),
            Contract::create_signature_redeem_script(public_key),
        )
    }

    /// Builds a witness for the multi-sig account whose verification script is
    /// `verification_script`, from signatures keyed by public key.
    ///
    /// Signatures are pushed in the order the keys appear in the script, up to
    /// the script's threshold, whatever order they were collected in. A short
    /// signature set is not rejected here; the node refuses it.
    pub fn create_multi_sig<I>(verification_script: &[u8], signatures: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (ECPoint, Vec<u8>)>,
    {
        let (m, keys) = Contract::parse_multi_sig_redeem_script(verification_script)
            .ok_or_else(|| CoreError::invalid_argument("Verification script is not a multi-sig script"))?;
        let by_key: BTreeMap<ECPoint, Vec<u8>> = signatures.into_iter().collect();
        if let Some(foreign) = by_key.keys().find(|key| !keys.contains(key)) {
            return Err(CoreError::invalid_argument(format!(
                "Public key {foreign} is not part of the multi-sig account"
            )));
        }
        let ordered: Vec<&[u8]> = keys
            .iter()
            .filter_map(|key| by_key.get(key))
            .map(Vec::as_slice)
            .collect();
        Ok(Self::new(
            multi_sig_invocation(&ordered, m),
            verification_script.to_vec(),
        ))
    }

    /// Signs `message` with each of `signers` for the `m`-of-`public_keys` account.
    ///
    /// Key pairs whose public key is not part of the account are ignored.
    pub fn create_multi_sig_from_accounts(
        message: &[u8],
        m: usize,
        public_keys: &[ECPoint],
        signers: &[&KeyPair],
    ) -> CoreResult<Self> {
        let verification_script = Contract::create_multi_sig_redeem_script(m, public_keys)?;

        let mut signing: Vec<&KeyPair> = signers
            .iter()
            .copied()
            .filter(|k| public_keys.contains(k.public_key()))
            .collect();
        signing.sort_by(|a, b| a.public_key().cmp(b.public_key()));
        signing.dedup_by(|a, b| a.public_key() == b.public_key());

        let signatures = signing
            .iter()
            .take(m)
            .map(|k| k.sign(message))
            .collect::<Result<Vec<_>, _>>()?;
        let ordered: Vec<&[u8]> = signatures.iter().map(|s| s.as_slice()).collect();
        Ok(Self::new(
            multi_sig_invocation(&ordered, m),
            verification_script,
        ))
    }

    /// Witness for a deployed contract account: the verification parameters
    /// pushed in order, with an empty verification script.
    pub fn create_contract_witness(verification_parameters: &[ContractParameter]) -> CoreResult<Self> {
        if verification_parameters.is_empty() {
            return Ok(Self::empty());
        }
        let mut builder = ScriptBuilder::new();
        for parameter in verification_parameters {
            builder.emit_contract_parameter(parameter)?;
        }
        Ok(Self::new(builder.into_script(), Vec::new()))
    }

    /// The account this witness proves, i.e. hash160 of the verification script.
    pub fn script_hash(&self) -> UInt160 {
        hash::script_hash(&self.verification_script)
    }

    pub fn check_sizes(&self) -> CoreResult<()> {
        check_script_len("Invocation", self.invocation_script.len(), MAX_INVOCATION_SCRIPT)
            .and_then(|_| check_script_len("Verification", self.verification_script.len(), MAX_VERIFICATION_SCRIPT))
            .map_err(|e| CoreError::invalid_argument(e.to_string()))
    }

    pub fn to_json(&self) -> Value {
        json!({
            "invocation": general_purpose::STANDARD.encode(&self.invocation_script),
            "verification": general_purpose::STANDARD.encode(&self.verification_script),
        })
    }
}

fn multi_sig_invocation(signatures: &[&[u8]], m: usize) -> Vec<u8> {
    let mut builder = ScriptBuilder::new();
    for signature in signatures.iter().take(m) {
        builder.emit_push_data(signature);
    }
    builder.into_script()
}

fn check_script_len(what: &str, len: usize, max: usize) -> IoResult<()> {
    if len > max {
        return Err(IoError::exceeds(&format!("{what} script length"), len as u64, max as u64));
    }
    Ok(())
}

impl Serializable for Witness {
    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let invocation_script = reader.read_var_bytes(MAX_INVOCATION_SCRIPT)?;
        let verification_script = reader.read_var_bytes(MAX_VERIFICATION_SCRIPT)?;
        Ok(Self::new(invocation_script, verification_script))
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        check_script_len("Invocation", self.invocation_script.len(), MAX_INVOCATION_SCRIPT)?;
        check_script_len("Verification", self.verification_script.len(), MAX_VERIFICATION_SCRIPT)?;
        writer.write_var_bytes(&self.invocation_script);
        writer.write_var_bytes(&self.verification_script);
        Ok(())
    }

    fn size(&self) -> usize {
        get_var_bytes_size(self.invocation_script.len()) + get_var_bytes_size(self.verification_script.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Account;
    use neo_io::SerializableExt;
    use proptest::prelude::*;

    fn key_pairs() -> Vec<KeyPair> {
        (1u8..=3)
            .map(|i| KeyPair::from_private_key(&[i; 32]).unwrap())
            .collect()
    }

    #[test]
    fn single_signature_witness_layout() {
        let key = &key_pairs()[0];
        let witness = Witness::create(b"message", key).unwrap();

        assert_eq!(witness.invocation_script.len(), 66);
        assert_eq!(&witness.invocation_script[..2], &[0x0C, 0x40]);
        assert_eq!(witness.verification_script.len(), 40);
        assert_eq!(&witness.verification_script[2..35], key.public_key().encoded());
        assert!(key
            .public_key()
            .verify(b"message", &witness.invocation_script[2..])
            .unwrap());
        assert_eq!(
            witness.script_hash(),
            Contract::create_signature_contract(key.public_key()).script_hash()
        );
    }

    fn two_of_n_script(keys: &[KeyPair]) -> Vec<u8> {
        let public_keys: Vec<ECPoint> = keys.iter().map(|k| *k.public_key()).collect();
        Contract::create_multi_sig_redeem_script(2, &public_keys).unwrap()
    }

    #[test]
    fn multi_sig_pushes_signatures_in_key_order() {
        let keys = key_pairs();
        let script = two_of_n_script(&keys);
        let entries: Vec<(ECPoint, Vec<u8>)> = keys
            .iter()
            .rev()
            .map(|k| (*k.public_key(), k.sign(b"tx").unwrap().to_vec()))
            .collect();
        let witness = Witness::create_multi_sig(&script, entries.clone()).unwrap();

        let (m, script_keys) = Contract::parse_multi_sig_redeem_script(&script).unwrap();
        assert_eq!(m, 2);
        let mut expected = Vec::new();
        for key in script_keys.iter().take(2) {
            let (_, signature) = entries.iter().find(|(k, _)| k == key).unwrap();
            expected.extend_from_slice(&[0x0C, 0x40]);
            expected.extend_from_slice(signature);
        }
        assert_eq!(witness.invocation_script, expected);
        assert_eq!(witness.verification_script, script);
    }

    #[test]
    fn two_of_three_signers_satisfy_the_account() {
        let keys = key_pairs();
        let public_keys: Vec<ECPoint> = keys.iter().map(|k| *k.public_key()).collect();
        let account = Account::multi_sig(2, public_keys).unwrap();
        let script = account.verification_script().unwrap().unwrap();

        let signing = [&keys[2], &keys[0]];
        let signatures = signing
            .iter()
            .map(|k| (*k.public_key(), k.sign(b"tx").unwrap().to_vec()));
        let witness = Witness::create_multi_sig(&script, signatures).unwrap();

        assert_eq!(witness.script_hash(), account.script_hash());
        assert_eq!(witness.invocation_script.len(), 2 * 66);

        let (_, script_keys) = Contract::parse_multi_sig_redeem_script(&script).unwrap();
        let signed_in_order: Vec<&ECPoint> = script_keys
            .iter()
            .filter(|key| signing.iter().any(|k| k.public_key() == *key))
            .collect();
        for (i, key) in signed_in_order.iter().enumerate() {
            let signature = &witness.invocation_script[i * 66 + 2..(i + 1) * 66];
            assert!(key.verify(b"tx", signature).unwrap());
        }
    }

    #[test]
    fn short_signature_set_is_passed_through() {
        let keys = key_pairs();
        let script = two_of_n_script(&keys);
        let one = [(*keys[1].public_key(), keys[1].sign(b"tx").unwrap().to_vec())];
        let witness = Witness::create_multi_sig(&script, one).unwrap();
        assert_eq!(witness.invocation_script.len(), 66);
    }

    #[test]
    fn accounts_outside_the_multi_sig_are_ignored() {
        let keys = key_pairs();
        let public_keys: Vec<ECPoint> = keys[..2].iter().map(|k| *k.public_key()).collect();
        let signers: Vec<&KeyPair> = keys.iter().collect();
        let witness = Witness::create_multi_sig_from_accounts(b"tx", 2, &public_keys, &signers).unwrap();
        assert_eq!(witness.invocation_script.len(), 2 * 66);
    }

    #[test]
    fn foreign_keys_and_non_multi_sig_scripts_are_argument_errors() {
        let keys = key_pairs();
        let script = two_of_n_script(&keys[..2]);
        let foreign = [(*keys[2].public_key(), vec![0u8; 64])];
        assert!(matches!(
            Witness::create_multi_sig(&script, foreign),
            Err(CoreError::InvalidArgument { .. })
        ));

        let single = Contract::create_signature_redeem_script(keys[0].public_key());
        assert!(matches!(
            Witness::create_multi_sig(&single, Vec::<(ECPoint, Vec<u8>)>::new()),
            Err(CoreError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn oversized_scripts_are_rejected() {
        let witness = Witness::new(vec![0u8; MAX_INVOCATION_SCRIPT + 1], Vec::new());
        assert!(witness.to_array().is_err());
        assert!(witness.check_sizes().is_err());

        let mut bytes = vec![0xFD];
        bytes.extend_from_slice(&((MAX_INVOCATION_SCRIPT + 1) as u16).to_le_bytes());
        bytes.extend(std::iter::repeat(0).take(MAX_INVOCATION_SCRIPT + 1));
        bytes.push(0);
        assert!(Witness::from_array(&bytes).is_err());
    }

    #[test]
    fn contract_witness_pushes_parameters_in_order() {
        let witness = Witness::create_contract_witness(&[
            ContractParameter::integer(1),
            ContractParameter::Boolean(true),
        ])
        .unwrap();
        assert_eq!(witness.invocation_script, vec![0x11, 0x08]);
        assert!(witness.verification_script.is_empty());
        assert_eq!(Witness::create_contract_witness(&[]).unwrap(), Witness::empty());
    }

    #[test]
    fn json_uses_base64() {
        let witness = Witness::new(vec![1, 2, 3], vec![4]);
        let json = witness.to_json();
        assert_eq!(json["invocation"], "AQID");
        assert_eq!(json["verification"], "BA==");
    }

    proptest! {
        #[test]
        fn multi_sig_is_independent_of_input_order(order in Just(vec![0usize, 1, 2]).prop_shuffle()) {
            let keys = key_pairs();
            let message = b"permutation";

            let signatures: Vec<(ECPoint, Vec<u8>)> = order
                .iter()
                .map(|&i| (*keys[i].public_key(), keys[i].sign(message).unwrap().to_vec()))
                .collect();
            let reference: Vec<(ECPoint, Vec<u8>)> = (0..3)
                .map(|i| (*keys[i].public_key(), keys[i].sign(message).unwrap().to_vec()))
                .collect();
            let script = two_of_n_script(&keys);
            prop_assert_eq!(
                Witness::create_multi_sig(&script, signatures).unwrap(),
                Witness::create_multi_sig(&script, reference).unwrap()
            );

            let public_keys: Vec<ECPoint> = order.iter().map(|&i| *keys[i].public_key()).collect();
            let signers: Vec<&KeyPair> = order.iter().map(|&i| &keys[i]).collect();
            let from_accounts = Witness::create_multi_sig_from_accounts(message, 2, &public_keys, &signers).unwrap();
            let canonical_keys: Vec<ECPoint> = keys.iter().map(|k| *k.public_key()).collect();
            let canonical_signers: Vec<&KeyPair> = keys.iter().collect();
            prop_assert_eq!(
                from_accounts,
                Witness::create_multi_sig_from_accounts(message, 2, &canonical_keys, &canonical_signers).unwrap()
            );
        }
    }
}
