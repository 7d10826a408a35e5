// Copyright (C) 2015-2025 The Neo Project.
//
// rpc_version.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use serde::Deserialize;

/// Result of `getversion`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcVersion {
    #[serde(rename = "tcpport", default)]
    pub tcp_port: Option<u16>,
    #[serde(default)]
    pub nonce: Option<u32>,
    #[serde(rename = "useragent", default)]
    pub user_agent: String,
    pub protocol: RpcProtocol,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcProtocol {
    pub network: u32,
    #[serde(rename = "addressversion")]
    pub address_version: u8,
    #[serde(rename = "msperblock", default)]
    pub ms_per_block: Option<u64>,
    #[serde(rename = "maxvaliduntilblockincrement", default)]
    pub max_valid_until_block_increment: Option<u32>,
    #[serde(rename = "maxtransactionsperblock", default)]
    pub max_transactions_per_block: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_protocol_section() {
        let version: RpcVersion = serde_json::from_value(json!({
            "tcpport": 10333,
            "nonce": 1930156121,
            "useragent": "/Neo:3.6.0/",
            "protocol": {
                "addressversion": 53,
                "network": 860833102,
                "msperblock": 15000,
                "maxvaliduntilblockincrement": 5760,
                "validatorscount": 7
            }
        }))
        .unwrap();
        assert_eq!(version.protocol.network, 0x334f454e);
        assert_eq!(version.protocol.address_version, 0x35);
        assert_eq!(version.protocol.max_valid_until_block_increment, Some(5760));
        assert_eq!(version.protocol.max_transactions_per_block, None);
    }
}
