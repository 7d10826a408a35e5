// Copyright (C) 2015-2025 The Neo Project.
//
// models/mod.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Typed forms of the node responses the transaction pipeline reads.

mod rpc_application_log;
mod rpc_block;
mod rpc_invoke_result;
mod rpc_request;
mod rpc_version;

pub use rpc_application_log::{RpcApplicationLog, RpcExecution, RpcNotification};
pub use rpc_block::{RpcBlock, RpcBlockTransaction};
pub use rpc_invoke_result::{MapEntry, RpcInvokeResult, StackItem, VmState};
pub use rpc_request::{RpcRequest, RpcResponse, RpcResponseError};
pub use rpc_version::{RpcProtocol, RpcVersion};

/// Nodes encode 64-bit amounts as decimal strings; older ones send numbers.
pub(crate) mod amount {
    use serde::de::{Deserializer, Error};
    use serde::Deserialize;
    use serde_json::Value;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => s.parse().map_err(D::Error::custom),
            Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| D::Error::custom(format!("amount {n} is not a 64-bit integer"))),
            other => Err(D::Error::custom(format!("expected amount, found {other}"))),
        }
    }
}
