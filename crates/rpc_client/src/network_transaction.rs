// Copyright (C) 2015-2025 The Neo Project.
//
// network_transaction.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Submission and confirmation tracking of a signed transaction.

use crate::error::{RpcError, RpcResult};
use crate::models::RpcApplicationLog;
use crate::rpc_client::RpcClient;
use neo_core::Transaction;
use neo_primitives::UInt256;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sent {
    hash: UInt256,
    block_count: u32,
}

/// A signed transaction and, once sent, where the chain stood at that moment.
#[derive(Debug)]
pub struct NetworkTransaction {
    client: Arc<RpcClient>,
    transaction: Transaction,
    sent: Option<Sent>,
}

impl NetworkTransaction {
    pub fn new(client: Arc<RpcClient>, transaction: Transaction) -> Self {
        Self {
            client,
            transaction,
            sent: None,
        }
    }

    /// Resumes a transaction submitted earlier when the block count was `block_count_when_sent`.
    pub fn sent(
        client: Arc<RpcClient>,
        transaction: Transaction,
        block_count_when_sent: u32,
    ) -> RpcResult<Self> {
        let hash = transaction.hash()?;
        Ok(Self {
            client,
            transaction,
            sent: Some(Sent {
                hash,
                block_count: block_count_when_sent,
            }),
        })
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// The id returned by the node, once sent.
    pub fn tx_id(&self) -> Option<UInt256> {
        self.sent.map(|s| s.hash)
    }

    pub fn block_count_when_sent(&self) -> Option<u32> {
        self.sent.map(|s| s.block_count)
    }

    /// Validates and submits the transaction, recording the block count first.
    pub async fn send(&mut self) -> RpcResult<UInt256> {
        if let Some(sent) = self.sent {
            return Err(RpcError::illegal_state(format!(
                "Transaction {} was already sent",
                sent.hash
            )));
        }
        self.transaction.validate()?;

        let block_count = self.client.get_block_count().await?;
        let hash = self.client.send_raw_transaction(&self.transaction).await?;
        let local = self.transaction.hash()?;
        if hash != local {
            warn!(target: "neo", %hash, %local, "node returned a different transaction hash");
        }
        debug!(target: "neo", %hash, block_count, "transaction sent");

        self.sent = Some(Sent { hash, block_count });
        Ok(hash)
    }

    /// Polls for the block including this transaction at the configured interval.
    pub fn track(&self) -> RpcResult<BlockSubscription> {
        let interval = Duration::from_millis(self.client.settings().polling_interval_ms);
        self.track_with_interval(interval)
    }

    /// Polls `getblockcount` every `poll_interval` and fetches each new block
    /// once, starting at the block count recorded on send.
    ///
    /// Must be called from within a tokio runtime.
    pub fn track_with_interval(&self, poll_interval: Duration) -> RpcResult<BlockSubscription> {
        let sent = self.sent.ok_or_else(|| {
            RpcError::illegal_state("Cannot track a transaction before it has been sent")
        })?;

        let token = CancellationToken::new();
        let (result_tx, result_rx) = oneshot::channel();
        tokio::spawn(poll_blocks(
            Arc::clone(&self.client),
            sent.hash,
            sent.block_count,
            poll_interval,
            token.clone(),
            result_tx,
        ));

        Ok(BlockSubscription {
            result: Some(result_rx),
            token,
        })
    }

    pub async fn get_application_log(&self) -> RpcResult<RpcApplicationLog> {
        let sent = self.sent.ok_or_else(|| {
            RpcError::illegal_state(
                "Cannot get the application log before the transaction has been sent",
            )
        })?;
        self.client.get_application_log(&sent.hash).await
    }
}

/// Handle to a running confirmation poll. Dropping it stops the poll.
#[derive(Debug)]
pub struct BlockSubscription {
    result: Option<oneshot::Receiver<u32>>,
    token: CancellationToken,
}

impl BlockSubscription {
    /// Stops polling. Already submitted data is not affected.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Token that cancels this subscription, for use by other tasks.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Waits for the index of the block that includes the transaction.
    pub async fn inclusion(&mut self) -> RpcResult<u32> {
        let receiver = self
            .result
            .take()
            .ok_or_else(|| RpcError::illegal_state("The block inclusion was already awaited"))?;
        receiver
            .await
            .map_err(|_| RpcError::illegal_state("Transaction tracking was cancelled"))
    }
}

impl Drop for BlockSubscription {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

async fn poll_blocks(
    client: Arc<RpcClient>,
    hash: UInt256,
    mut next_index: u32,
    poll_interval: Duration,
    token: CancellationToken,
    result: oneshot::Sender<u32>,
) {
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let scanned = tokio::select! {
            _ = token.cancelled() => {
                debug!(target: "neo", %hash, "transaction tracking cancelled");
                return;
            }
            scanned = async {
                ticker.tick().await;
                scan_new_blocks(&client, &hash, &mut next_index).await
            } => scanned,
        };

        match scanned {
            Ok(Some(index)) => {
                debug!(target: "neo", %hash, index, "transaction included");
                let _ = result.send(index);
                return;
            }
            Ok(None) => {}
            Err(e) => warn!(target: "neo", %hash, error = %e, "block poll failed"),
        }
    }
}

/// Fetches every block from `next_index` up to the current count. An index is
/// only advanced past once its block was fetched, so none is seen twice.
async fn scan_new_blocks(
    client: &RpcClient,
    hash: &UInt256,
    next_index: &mut u32,
) -> RpcResult<Option<u32>> {
    let block_count = client.get_block_count().await?;
    while *next_index < block_count {
        let block = client.get_block_by_index(*next_index).await?;
        *next_index += 1;
        if block.contains_transaction(hash) {
            return Ok(Some(block.index));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{localhost_binding_permitted, method_matcher, mock_method, rpc_response};
    use mockito::{Matcher, Mock, Server};
    use neo_config::ClientSettings;
    use neo_core::{Signer, Witness};
    use neo_cryptography::KeyPair;
    use serde_json::json;

    const MAGIC: u32 = 894_710_606;

    fn signed_transaction() -> Transaction {
        let key = KeyPair::from_private_key(&[1; 32]).unwrap();
        let account = Witness::from_signature(&[0; 64], key.public_key()).script_hash();
        let mut tx = Transaction::new();
        tx.set_nonce(7);
        tx.set_valid_until_block(2000);
        tx.set_script(vec![0x11, 0x40]);
        tx.set_signers(vec![Signer::called_by_entry(account)]).unwrap();
        let witness = Witness::create(&tx.get_sign_data(MAGIC).unwrap(), &key).unwrap();
        tx.set_witnesses(vec![witness]);
        tx
    }

    fn client_for(server: &Server) -> Arc<RpcClient> {
        let mut settings = ClientSettings::new(server.url());
        settings.network_magic = Some(MAGIC);
        Arc::new(RpcClient::new(settings).unwrap())
    }

    fn offline_client() -> Arc<RpcClient> {
        Arc::new(RpcClient::new(ClientSettings::new("http://127.0.0.1:1")).unwrap())
    }

    async fn mock_block(server: &mut Server, index: u32, txs: &[UInt256]) -> Mock {
        let block = json!({
            "hash": UInt256::from([index as u8; 32]).to_string(),
            "index": index,
            "time": 0,
            "tx": txs.iter().map(|h| json!({ "hash": h.to_string() })).collect::<Vec<_>>()
        });
        server
            .mock("POST", "/")
            .match_body(Matcher::AllOf(vec![
                method_matcher("getblock"),
                Matcher::Regex(format!(r#""params"\s*:\s*\[\s*{index}\s*,"#)),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(rpc_response(block))
            .expect(1)
            .create_async()
            .await
    }

    #[tokio::test]
    async fn application_log_and_tracking_require_send() {
        let tx = NetworkTransaction::new(offline_client(), signed_transaction());
        assert!(matches!(
            tx.get_application_log().await,
            Err(RpcError::IllegalState { .. })
        ));
        assert!(matches!(tx.track(), Err(RpcError::IllegalState { .. })));
        assert_eq!(tx.tx_id(), None);
    }

    #[tokio::test]
    async fn unsigned_transaction_is_not_sent() {
        let mut tx = signed_transaction();
        tx.set_witnesses(Vec::new());
        let mut network_tx = NetworkTransaction::new(offline_client(), tx);
        assert!(matches!(
            network_tx.send().await,
            Err(RpcError::IllegalState { .. })
        ));
    }

    #[tokio::test]
    async fn send_records_block_count() {
        if !localhost_binding_permitted() {
            return;
        }
        let tx = signed_transaction();
        let hash = tx.hash().unwrap();
        let mut server = Server::new_async().await;
        let _count = mock_method(&mut server, "getblockcount", json!(1000), 1).await;
        let send = mock_method(
            &mut server,
            "sendrawtransaction",
            json!({ "hash": hash.to_string() }),
            1,
        )
        .await;

        let mut network_tx = NetworkTransaction::new(client_for(&server), tx);
        assert_eq!(network_tx.send().await.unwrap(), hash);
        assert_eq!(network_tx.block_count_when_sent(), Some(1000));
        assert_eq!(network_tx.tx_id(), Some(hash));
        assert!(matches!(
            network_tx.send().await,
            Err(RpcError::IllegalState { .. })
        ));
        send.assert_async().await;
    }

    #[tokio::test]
    async fn tracking_reports_inclusion_block_once() {
        if !localhost_binding_permitted() {
            return;
        }
        let tx = signed_transaction();
        let hash = tx.hash().unwrap();
        let mut server = Server::new_async().await;
        let _count = mock_method(&mut server, "getblockcount", json!(1002), 1).await;
        let first = mock_block(&mut server, 1000, &[]).await;
        let second = mock_block(&mut server, 1001, &[hash]).await;

        let network_tx = NetworkTransaction::sent(client_for(&server), tx, 1000).unwrap();
        let mut subscription = network_tx
            .track_with_interval(Duration::from_millis(10))
            .unwrap();
        assert_eq!(subscription.inclusion().await.unwrap(), 1001);
        assert!(matches!(
            subscription.inclusion().await,
            Err(RpcError::IllegalState { .. })
        ));
        first.assert_async().await;
        second.assert_async().await;
    }

    #[tokio::test]
    async fn cancelled_tracking_stops() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _count = mock_method(&mut server, "getblockcount", json!(1000), 1).await;

        let network_tx = NetworkTransaction::sent(client_for(&server), signed_transaction(), 1000).unwrap();
        let mut subscription = network_tx
            .track_with_interval(Duration::from_millis(10))
            .unwrap();
        subscription.cancel();
        assert!(subscription.is_cancelled());
        assert!(matches!(
            subscription.inclusion().await,
            Err(RpcError::IllegalState { .. })
        ));
    }
}
