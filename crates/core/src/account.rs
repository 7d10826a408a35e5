// Copyright (C) 2015-2025 The Neo Project.
//
// account.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Accounts that can back a transaction signer.

use crate::error::{CoreError, CoreResult};
use neo_cryptography::{ECPoint, KeyPair};
use neo_primitives::UInt160;
use neo_smart_contract::{Contract, ContractParameter};

/// What an [`Account`] holds besides its script hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountKind {
    /// A single key with its private part available for signing.
    KeyPair(KeyPair),
    /// A single key known only by its public part.
    PublicKey(ECPoint),
    /// Known only by its script hash.
    Address,
    /// An `m`-of-`n` multi-signature account.
    MultiSig {
        threshold: usize,
        public_keys: Vec<ECPoint>,
    },
    /// A deployed contract whose `verify` method takes these arguments.
    Contract {
        verification_parameters: Vec<ContractParameter>,
    },
}

/// An account identified by its script hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    script_hash: UInt160,
    kind: AccountKind,
}

impl Account {
    pub fn from_key_pair(key_pair: KeyPair) -> Self {
        Self {
            script_hash: Contract::create_signature_contract(key_pair.public_key()).script_hash(),
            kind: AccountKind::KeyPair(key_pair),
        }
    }

    /// A watch-only account for a single public key.
    pub fn from_public_key(public_key: ECPoint) -> Self {
        Self {
            script_hash: Contract::create_signature_contract(&public_key).script_hash(),
            kind: AccountKind::PublicKey(public_key),
        }
    }

    /// A watch-only account without any key material.
    pub fn from_script_hash(script_hash: UInt160) -> Self {
        Self {
            script_hash,
            kind: AccountKind::Address,
        }
    }

    /// Fails unless `1 <= threshold <= public_keys.len() <= 1024`.
    pub fn multi_sig(threshold: usize, public_keys: Vec<ECPoint>) -> CoreResult<Self> {
        let contract = Contract::create_multi_sig_contract(threshold, &public_keys)?;
        Ok(Self {
            script_hash: contract.script_hash(),
            kind: AccountKind::MultiSig {
                threshold,
                public_keys,
            },
        })
    }

    pub fn contract(script_hash: UInt160, verification_parameters: Vec<ContractParameter>) -> Self {
        Self {
            script_hash,
            kind: AccountKind::Contract {
                verification_parameters,
            },
        }
    }

    pub fn script_hash(&self) -> UInt160 {
        self.script_hash
    }

    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    pub fn key_pair(&self) -> Option<&KeyPair> {
        match &self.kind {
            AccountKind::KeyPair(key_pair) => Some(key_pair),
            _ => None,
        }
    }

    pub fn is_multi_sig(&self) -> bool {
        matches!(self.kind, AccountKind::MultiSig { .. })
    }

    /// Public keys behind the account, empty if none are known.
    pub fn public_keys(&self) -> Vec<ECPoint> {
        match &self.kind {
            AccountKind::KeyPair(key_pair) => vec![*key_pair.public_key()],
            AccountKind::PublicKey(key) => vec![*key],
            AccountKind::MultiSig { public_keys, .. } => public_keys.clone(),
            AccountKind::Address | AccountKind::Contract { .. } => Vec::new(),
        }
    }

    /// The verification script, if the account has one that can be rebuilt locally.
    pub fn verification_script(&self) -> CoreResult<Option<Vec<u8>>> {
        Ok(match &self.kind {
            AccountKind::KeyPair(key_pair) => Some(Contract::create_signature_redeem_script(key_pair.public_key())),
            AccountKind::PublicKey(key) => Some(Contract::create_signature_redeem_script(key)),
            AccountKind::MultiSig {
                threshold,
                public_keys,
            } => Some(Contract::create_multi_sig_redeem_script(*threshold, public_keys)?),
            AccountKind::Address | AccountKind::Contract { .. } => None,
        })
    }

    /// Number of signatures the account's verification script consumes.
    pub fn signing_threshold(&self) -> CoreResult<usize> {
        match &self.kind {
            AccountKind::KeyPair(_) | AccountKind::PublicKey(_) => Ok(1),
            AccountKind::MultiSig { threshold, .. } => Ok(*threshold),
            _ => Err(CoreError::illegal_state(format!(
                "Account {} has no signature based verification script",
                self.script_hash
            ))),
        }
    }
}

impl From<KeyPair> for Account {
    fn from(key_pair: KeyPair) -> Self {
        Self::from_key_pair(key_pair)
    }
}
