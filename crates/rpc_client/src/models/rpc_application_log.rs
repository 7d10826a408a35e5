// Copyright (C) 2015-2025 The Neo Project.
//
// rpc_application_log.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use super::amount;
use super::rpc_invoke_result::{StackItem, VmState};
use neo_primitives::{UInt160, UInt256};
use serde::Deserialize;

/// Result of `getapplicationlog` for a transaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcApplicationLog {
    #[serde(rename = "txid", default)]
    pub tx_id: Option<UInt256>,
    #[serde(rename = "blockhash", default)]
    pub block_hash: Option<UInt256>,
    #[serde(default)]
    pub executions: Vec<RpcExecution>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcExecution {
    pub trigger: String,
    #[serde(rename = "vmstate")]
    pub vm_state: VmState,
    #[serde(default)]
    pub exception: Option<String>,
    #[serde(rename = "gasconsumed", deserialize_with = "amount::deserialize")]
    pub gas_consumed: i64,
    #[serde(default)]
    pub stack: Vec<StackItem>,
    #[serde(default)]
    pub notifications: Vec<RpcNotification>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcNotification {
    pub contract: UInt160,
    #[serde(rename = "eventname")]
    pub event_name: String,
    pub state: StackItem,
}

impl RpcApplicationLog {
    /// The execution of the `Application` trigger, which carries the script's outcome.
    pub fn application_execution(&self) -> Option<&RpcExecution> {
        self.executions.iter().find(|e| e.trigger == "Application")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_transfer_notification() {
        let log: RpcApplicationLog = serde_json::from_value(json!({
            "txid": "0x8b0ad5b4a6ab5dfb8b54a0c8ea0a1aa4b1d9bc3fbd6e1eb1ac8a09fb4b7d1c2a",
            "executions": [{
                "trigger": "Application",
                "vmstate": "HALT",
                "exception": null,
                "gasconsumed": "9977780",
                "stack": [{ "type": "Boolean", "value": true }],
                "notifications": [{
                    "contract": "0xd2a4cff31913016155e38e474a2c06d08be276cf",
                    "eventname": "Transfer",
                    "state": { "type": "Array", "value": [] }
                }]
            }]
        }))
        .unwrap();
        let execution = log.application_execution().unwrap();
        assert_eq!(execution.vm_state, VmState::Halt);
        assert_eq!(execution.gas_consumed, 9_977_780);
        assert_eq!(execution.notifications[0].event_name, "Transfer");
        assert!(log.block_hash.is_none());
    }
}
