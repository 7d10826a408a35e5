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

//! Transaction model for the Neo SDK.
//!
//! This crate holds the wire entities a client assembles before talking to a
//! node: witness conditions and rules, signers, witnesses, transaction
//! attributes and the [`Transaction`] itself, together with the [`Account`]
//! abstraction used to sign them.

pub mod account;
pub mod error;
pub mod signer;
pub mod transaction;
pub mod transaction_attribute;
pub mod witness;
pub mod witness_rule;

pub use account::{Account, AccountKind};
pub use error::{CoreError, CoreResult};
pub use signer::{Signer, MAX_SIGNER_SUBITEMS};
pub use transaction::{Transaction, HEADER_SIZE, MAX_TRANSACTION_ATTRIBUTES, MAX_TRANSACTION_SIZE};
pub use transaction_attribute::{OracleResponseCode, TransactionAttribute};
pub use witness::{Witness, MAX_INVOCATION_SCRIPT, MAX_VERIFICATION_SCRIPT};
pub use witness_rule::{WitnessCondition, WitnessConditionType, WitnessRule, WitnessRuleAction};

pub use neo_primitives::{TransactionAttributeType, UInt160, UInt256, WitnessScope};
