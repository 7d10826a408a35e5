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

//! # Neo SDK: Neo N3 transaction construction in Rust
//!
//! Client side building blocks for assembling, authorizing, serializing and
//! submitting transactions to a Neo N3 node:
//!
//! - Wire format primitives and the binary codec
//! - Witness scopes, rules and conditions, signers and witnesses
//! - NeoVM script building and the NEF container
//! - The transaction entity with byte exact serialization
//! - A JSON-RPC client with a transaction builder, confirmation tracking and
//!   iterator sessions (feature `rpc`)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use neo_sdk::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gas = UInt160::parse("0xd2a4cff31913016155e38e474a2c06d08be276cf")?;
//!     let account = Account::from_key_pair(KeyPair::generate());
//!     let script = contract_call_script(
//!         &gas,
//!         "transfer",
//!         &[
//!             ContractParameter::Hash160(account.script_hash()),
//!             ContractParameter::Hash160(account.script_hash()),
//!             ContractParameter::integer(1),
//!             ContractParameter::Any,
//!         ],
//!         CallFlags::ALL,
//!     )?;
//!
//!     let mut tx = Transaction::new();
//!     tx.set_script(script);
//!     tx.set_signers(vec![Signer::called_by_entry(account.script_hash())])?;
//!     println!("{}", tx.hash()?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`neo_primitives`] - Hash types, witness scopes and parameter types
//! - [`neo_io`] - Binary reader and writer, the `Serializable` trait
//! - [`neo_cryptography`] - Hashing, secp256r1 keys and signatures
//! - [`neo_vm`] - Opcodes and the script builder
//! - [`neo_smart_contract`] - Contract parameters, call scripts, verification contracts and NEF files
//! - [`neo_core`] - Witness rules, signers, witnesses, accounts and transactions
//! - [`neo_config`] - Client settings
//! - `neo_rpc_client` - Node access (feature `rpc`)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub use neo_config as config;
pub use neo_core as core;
pub use neo_cryptography as crypto;
pub use neo_io as io;
pub use neo_primitives as primitives;
pub use neo_smart_contract as smart_contract;
pub use neo_vm as vm;

#[cfg(feature = "rpc")]
pub use neo_rpc_client as rpc_client;

/// Common imports for building transactions
pub mod prelude {
    pub use crate::config::{ClientSettings, NetworkType};
    pub use crate::core::{
        Account, Signer, Transaction, TransactionAttribute, Witness, WitnessCondition,
        WitnessRule, WitnessRuleAction, WitnessScope,
    };
    pub use crate::crypto::{ECPoint, KeyPair};
    pub use crate::io::{BinaryWriter, MemoryReader, Serializable, SerializableExt};
    pub use crate::primitives::{UInt160, UInt256};
    pub use crate::smart_contract::{
        contract_call_script, CallFlags, Contract, ContractParameter, NefFile,
    };
    pub use crate::vm::{OpCode, ScriptBuilder};

    #[cfg(feature = "rpc")]
    pub use crate::rpc_client::{
        AccountSigner, NetworkTransaction, ResultIterator, RpcClient, TransactionBuilder,
    };
}
