// Copyright (C) 2015-2025 The Neo Project.
//
// rpc_client.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::error::{RpcError, RpcResult, INTERNAL_ERROR_CODE};
use crate::models::{
    RpcApplicationLog, RpcBlock, RpcInvokeResult, RpcRequest, RpcResponse, RpcVersion, StackItem,
};
use base64::{engine::general_purpose, Engine as _};
use neo_config::ClientSettings;
use neo_core::{Signer, Transaction};
use neo_cryptography::ECPoint;
use neo_primitives::{UInt160, UInt256};
use neo_smart_contract::ContractParameter;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, trace};
use url::Url;

/// JSON-RPC client for a single Neo node.
pub struct RpcClient {
    base_address: Url,
    http_client: Client,
    settings: ClientSettings,
    network_magic: OnceCell<u32>,
}

/// Configures an [`RpcClient`].
pub struct RpcClientBuilder {
    url: Url,
    settings: ClientSettings,
    timeout: Option<Duration>,
    credentials: Option<(String, String)>,
    http_client: Option<Client>,
}

impl RpcClientBuilder {
    pub fn new(url: Url) -> Self {
        let settings = ClientSettings::new(url.as_str());
        Self {
            url,
            settings,
            timeout: None,
            credentials: None,
            http_client: None,
        }
    }

    /// Replaces the settings; the builder's URL is kept.
    pub fn settings(mut self, settings: ClientSettings) -> Self {
        self.settings = ClientSettings {
            rpc_url: self.url.to_string(),
            ..settings
        };
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn basic_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((user.into(), password.into()));
        self
    }

    /// Uses an existing HTTP client; timeout and credentials are then ignored.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn build(self) -> RpcResult<RpcClient> {
        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let timeout = self
                    .timeout
                    .unwrap_or_else(|| Duration::from_millis(self.settings.request_timeout_ms));
                let mut builder = Client::builder().timeout(timeout);
                if let Some((user, password)) = &self.credentials {
                    let encoded = general_purpose::STANDARD.encode(format!("{user}:{password}"));
                    let value = HeaderValue::from_str(&format!("Basic {encoded}"))
                        .map_err(|e| RpcError::invalid_argument(format!("Invalid credentials: {e}")))?;
                    let mut headers = HeaderMap::new();
                    headers.insert(AUTHORIZATION, value);
                    builder = builder.default_headers(headers);
                }
                builder.build()?
            }
        };

        let network_magic = OnceCell::new_with(self.settings.network_magic);
        Ok(RpcClient {
            base_address: self.url,
            http_client,
            settings: self.settings,
            network_magic,
        })
    }
}

impl fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcClient")
            .field("url", &self.base_address.as_str())
            .finish()
    }
}

#[derive(Deserialize)]
struct NetworkFeeResult {
    #[serde(rename = "networkfee", deserialize_with = "crate::models::amount::deserialize")]
    network_fee: i64,
}

#[derive(Deserialize)]
struct SendRawTransactionResult {
    hash: UInt256,
}

impl RpcClient {
    pub fn builder(url: Url) -> RpcClientBuilder {
        RpcClientBuilder::new(url)
    }

    /// Creates a client for `settings.rpc_url`.
    pub fn new(settings: ClientSettings) -> RpcResult<Self> {
        let url = Url::parse(&settings.rpc_url)
            .map_err(|e| RpcError::invalid_argument(format!("Invalid RPC url {}: {e}", settings.rpc_url)))?;
        RpcClientBuilder::new(url).settings(settings).build()
    }

    pub fn url(&self) -> &Url {
        &self.base_address
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn as_rpc_request(method: &str, params: Vec<Value>) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".to_string(),
            id: 1,
            method: method.to_string(),
            params,
        }
    }

    fn as_rpc_response(content: &str) -> RpcResult<RpcResponse> {
        let response: RpcResponse = serde_json::from_str(content)
            .map_err(|e| RpcError::InvalidResponse(format!("Parse error: {e}")))?;
        if let Some(error) = &response.error {
            return Err(RpcError::Rpc {
                code: error.code,
                message: error.message.clone(),
            });
        }
        Ok(response)
    }

    pub async fn send_async(&self, request: RpcRequest) -> RpcResult<RpcResponse> {
        debug!(target: "neo", method = %request.method, "rpc request");
        let response = self
            .http_client
            .post(self.base_address.clone())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let content = response.text().await?;
        trace!(target: "neo", method = %request.method, bytes = content.len(), "rpc response");
        Self::as_rpc_response(&content).map_err(|e| {
            debug!(target: "neo", method = %request.method, code = e.code(), error = %e, "rpc failed");
            e
        })
    }

    /// Sends `method` and returns its `result` member.
    pub async fn rpc_send_async(&self, method: &str, params: Vec<Value>) -> RpcResult<Value> {
        let request = Self::as_rpc_request(method, params);
        let response = self.send_async(request).await?;
        response.result.ok_or_else(|| RpcError::Rpc {
            code: INTERNAL_ERROR_CODE,
            message: format!("No result returned for {method}"),
        })
    }

    async fn rpc_call<T: DeserializeOwned>(&self, method: &str, params: Vec<Value>) -> RpcResult<T> {
        let result = self.rpc_send_async(method, params).await?;
        serde_json::from_value(result)
            .map_err(|e| RpcError::InvalidResponse(format!("Unexpected {method} result: {e}")))
    }

    // Blockchain methods

    /// Number of blocks in the main chain, i.e. the current height plus one.
    pub async fn get_block_count(&self) -> RpcResult<u32> {
        self.rpc_call("getblockcount", vec![]).await
    }

    pub async fn get_block(&self, hash: &UInt256) -> RpcResult<RpcBlock> {
        self.rpc_call("getblock", vec![json!(hash.to_string()), json!(true)])
            .await
    }

    pub async fn get_block_by_index(&self, index: u32) -> RpcResult<RpcBlock> {
        self.rpc_call("getblock", vec![json!(index), json!(true)]).await
    }

    pub async fn get_committee(&self) -> RpcResult<Vec<ECPoint>> {
        self.rpc_call("getcommittee", vec![]).await
    }

    pub async fn get_application_log(&self, tx_hash: &UInt256) -> RpcResult<RpcApplicationLog> {
        self.rpc_call("getapplicationlog", vec![json!(tx_hash.to_string())])
            .await
    }

    // Node methods

    pub async fn get_version(&self) -> RpcResult<RpcVersion> {
        self.rpc_call("getversion", vec![]).await
    }

    /// The network magic from the settings, or fetched once with `getversion`.
    pub async fn network_magic(&self) -> RpcResult<u32> {
        self.network_magic
            .get_or_try_init(|| async {
                let version = self.get_version().await?;
                debug!(target: "neo", network = version.protocol.network, "network magic fetched");
                Ok::<u32, RpcError>(version.protocol.network)
            })
            .await
            .copied()
    }

    pub async fn send_raw_transaction(&self, tx: &Transaction) -> RpcResult<UInt256> {
        let result: SendRawTransactionResult = self
            .rpc_call("sendrawtransaction", vec![json!(tx.to_base64()?)])
            .await?;
        Ok(result.hash)
    }

    // Smart contract methods

    /// Dry runs `script` with `signers` attached.
    pub async fn invoke_script(&self, script: &[u8], signers: &[Signer]) -> RpcResult<RpcInvokeResult> {
        let mut params = vec![json!(general_purpose::STANDARD.encode(script))];
        if !signers.is_empty() {
            params.push(signers_to_json(signers));
        }
        self.rpc_call("invokescript", params).await
    }

    pub async fn invoke_function(
        &self,
        contract: &UInt160,
        method: &str,
        params: &[ContractParameter],
        signers: &[Signer],
    ) -> RpcResult<RpcInvokeResult> {
        let mut rpc_params = vec![
            json!(contract.to_string()),
            json!(method),
            Value::Array(params.iter().map(ContractParameter::to_json).collect()),
        ];
        if !signers.is_empty() {
            rpc_params.push(signers_to_json(signers));
        }
        self.rpc_call("invokefunction", rpc_params).await
    }

    /// Network fee the node charges for `tx`, whose witnesses must already have their final sizes.
    pub async fn calculate_network_fee(&self, tx: &Transaction) -> RpcResult<i64> {
        let result: NetworkFeeResult = self
            .rpc_call("calculatenetworkfee", vec![json!(tx.to_base64()?)])
            .await?;
        Ok(result.network_fee)
    }

    pub async fn traverse_iterator(
        &self,
        session_id: &str,
        iterator_id: &str,
        count: usize,
    ) -> RpcResult<Vec<StackItem>> {
        self.rpc_call(
            "traverseiterator",
            vec![json!(session_id), json!(iterator_id), json!(count)],
        )
        .await
    }

    pub async fn terminate_session(&self, session_id: &str) -> RpcResult<bool> {
        self.rpc_call("terminatesession", vec![json!(session_id)]).await
    }
}

/// Signers in the JSON array form `invokescript` and `invokefunction` accept.
pub fn signers_to_json(signers: &[Signer]) -> Value {
    Value::Array(signers.iter().map(Signer::to_json).collect())
}
