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

//! Smart contract helpers for the Neo SDK.
//!
//! - [`ContractParameter`]: typed contract call arguments
//! - [`contract_script`]: contract call and iterator-unwrapping scripts
//! - [`Contract`]: single and multi-signature verification scripts
//! - [`NefFile`]: the compiled contract container with its checksum

pub mod contract;
pub mod contract_parameter;
pub mod contract_script;
pub mod error;
pub mod nef;

pub use contract::Contract;
pub use contract_parameter::ContractParameter;
pub use contract_script::{
    build_contract_call_and_unwrap_iterator, contract_call_script, ContractScriptBuilderExt,
};
pub use error::{ContractError, ContractResult};
pub use nef::{MethodToken, NefFile};
pub use neo_vm::CallFlags;
