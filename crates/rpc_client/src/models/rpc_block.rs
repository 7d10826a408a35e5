// Copyright (C) 2015-2025 The Neo Project.
//
// rpc_block.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use neo_primitives::UInt256;
use serde::Deserialize;

/// Verbose result of `getblock`, reduced to what transaction tracking reads.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcBlock {
    pub hash: UInt256,
    pub index: u32,
    #[serde(default)]
    pub time: u64,
    #[serde(rename = "previousblockhash", default)]
    pub previous_block_hash: Option<UInt256>,
    #[serde(default)]
    pub tx: Vec<RpcBlockTransaction>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcBlockTransaction {
    pub hash: UInt256,
}

impl RpcBlock {
    pub fn contains_transaction(&self, hash: &UInt256) -> bool {
        self.tx.iter().any(|tx| &tx.hash == hash)
    }
}
