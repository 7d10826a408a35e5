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

//! # Neo Primitives
//!
//! Fundamental value types shared by every layer of the SDK:
//! - `UInt160`: 160-bit script hashes (accounts, contracts)
//! - `UInt256`: 256-bit hashes (transactions, blocks)
//! - `WitnessScope`: the signer scope bit flags
//! - wire tags for contract parameters and transaction attributes
//!
//! This crate has no dependencies on other neo-* crates; binary
//! serialization for these types lives in `neo-io`.
//!
//! ```rust
//! use neo_primitives::UInt160;
//!
//! let hash = UInt160::parse("0xd2a4cff31913016155e38e474a2c06d08be276cf").unwrap();
//! assert_eq!(hash.to_string(), "0xd2a4cff31913016155e38e474a2c06d08be276cf");
//! ```

pub mod contract_parameter_type;
pub mod error;
pub mod transaction_attribute_type;
pub mod uint160;
pub mod uint256;
pub mod witness_scope;

pub use contract_parameter_type::ContractParameterType;
pub use error::{PrimitiveError, PrimitiveResult};
pub use transaction_attribute_type::TransactionAttributeType;
pub use uint160::{UInt160, UINT160_SIZE};
pub use uint256::{UInt256, UINT256_SIZE};
pub use witness_scope::WitnessScope;
