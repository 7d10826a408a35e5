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

//! Neo N3 node access: a JSON-RPC client, the transaction builder that prices
//! and signs transactions against it, submission with confirmation tracking,
//! and iterator sessions.

mod error;
pub mod models;
mod network_transaction;
mod result_iterator;
mod rpc_client;
#[cfg(test)]
mod test_util;
mod transaction_builder;

pub use error::{RpcError, RpcResult, INTERNAL_ERROR_CODE, PARSE_ERROR_CODE};
pub use models::{
    RpcApplicationLog, RpcBlock, RpcInvokeResult, RpcRequest, RpcResponse, RpcVersion, StackItem,
    VmState,
};
pub use network_transaction::{BlockSubscription, NetworkTransaction};
pub use result_iterator::{raw_stack_item, ResultIterator};
pub use rpc_client::{signers_to_json, RpcClient, RpcClientBuilder};
pub use transaction_builder::{AccountSigner, TransactionBuilder, GAS_TOKEN_HASH};
