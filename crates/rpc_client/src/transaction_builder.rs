// Copyright (C) 2015-2025 The Neo Project.
//
// transaction_builder.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Assembles, prices and signs transactions against a node.
//!
//! A builder is configured locally, then [`TransactionBuilder::build`] asks the
//! node for the chain height, simulates the script for the system fee and
//! prices the placeholder-witnessed transaction for the network fee, in that
//! order. [`TransactionBuilder::sign`] replaces the placeholders with real
//! witnesses.

use crate::error::{RpcError, RpcResult};
use crate::models::RpcInvokeResult;
use crate::rpc_client::RpcClient;
use neo_core::{
    Account, AccountKind, Signer, Transaction, TransactionAttribute, TransactionAttributeType,
    Witness, WitnessScope, MAX_TRANSACTION_ATTRIBUTES,
};
use neo_primitives::UInt160;
use neo_smart_contract::{Contract, ContractParameter};
use num_bigint::BigInt;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Script hash of the native GAS token.
pub const GAS_TOKEN_HASH: &str = "0xd2a4cff31913016155e38e474a2c06d08be276cf";

const SIGNATURE_PLACEHOLDER: [u8; 64] = [0; 64];

/// A transaction signer together with the account that authorizes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSigner {
    signer: Signer,
    account: Account,
}

impl AccountSigner {
    pub fn new(account: Account, scopes: WitnessScope) -> RpcResult<Self> {
        Ok(Self {
            signer: Signer::new(account.script_hash(), scopes)?,
            account,
        })
    }

    /// Fee-only signer, valid for nothing but paying.
    pub fn none(account: Account) -> Self {
        Self {
            signer: Signer::none(account.script_hash()),
            account,
        }
    }

    pub fn called_by_entry(account: Account) -> Self {
        Self {
            signer: Signer::called_by_entry(account.script_hash()),
            account,
        }
    }

    pub fn global(account: Account) -> Self {
        Self {
            signer: Signer::global(account.script_hash()),
            account,
        }
    }

    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    /// For adding allowed contracts, groups or rules.
    pub fn signer_mut(&mut self) -> &mut Signer {
        &mut self.signer
    }

    pub fn account(&self) -> &Account {
        &self.account
    }
}

type FeeConsumer = Box<dyn Fn(i64, i64) + Send + Sync>;

/// What happens when the sender's GAS balance is below the total fee.
enum FeeHook {
    /// Called with `(total_fee, sender_balance)`.
    Consumer(FeeConsumer),
    Error(String),
}

impl fmt::Debug for FeeHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeeHook::Consumer(_) => f.write_str("Consumer(..)"),
            FeeHook::Error(message) => f.debug_tuple("Error").field(message).finish(),
        }
    }
}

/// Builds a [`Transaction`] from a script and its signers.
#[derive(Debug)]
pub struct TransactionBuilder {
    client: Arc<RpcClient>,
    version: u8,
    nonce: Option<u32>,
    valid_until_block: Option<u32>,
    signers: Vec<AccountSigner>,
    attributes: Vec<TransactionAttribute>,
    script: Option<Vec<u8>>,
    additional_network_fee: i64,
    additional_system_fee: i64,
    allow_transmission_on_fault: bool,
    fee_hook: Option<FeeHook>,
}

impl TransactionBuilder {
    pub fn new(client: Arc<RpcClient>) -> Self {
        let allow_transmission_on_fault = client.settings().allow_transmission_on_fault;
        Self {
            client,
            version: 0,
            nonce: None,
            valid_until_block: None,
            signers: Vec::new(),
            attributes: Vec::new(),
            script: None,
            additional_network_fee: 0,
            additional_system_fee: 0,
            allow_transmission_on_fault,
            fee_hook: None,
        }
    }

    pub fn client(&self) -> &Arc<RpcClient> {
        &self.client
    }

    pub fn version(&mut self, version: u8) -> &mut Self {
        self.version = version;
        self
    }

    /// Fails unless `nonce` lies in `[0, 2^32)`. A random nonce is used when never set.
    pub fn nonce(&mut self, nonce: u64) -> RpcResult<&mut Self> {
        let nonce = u32::try_from(nonce).map_err(|_| {
            RpcError::invalid_argument(format!(
                "The value of the transaction nonce must be in the interval [0, 2^32), got {nonce}"
            ))
        })?;
        self.nonce = Some(nonce);
        Ok(self)
    }

    /// Fails unless `block` lies in `[0, 2^32)`. Defaults to the block count plus
    /// the configured increment when never set.
    pub fn valid_until_block(&mut self, block: u64) -> RpcResult<&mut Self> {
        let block = u32::try_from(block).map_err(|_| {
            RpcError::invalid_argument(format!(
                "The block number up to which this transaction can be included must be in the interval [0, 2^32), got {block}"
            ))
        })?;
        self.valid_until_block = Some(block);
        Ok(self)
    }

    pub fn script(&mut self, script: Vec<u8>) -> &mut Self {
        self.script = Some(script);
        self
    }

    /// Appends `script` to the configured script.
    pub fn extend_script(&mut self, script: &[u8]) -> &mut Self {
        self.script
            .get_or_insert_with(Vec::new)
            .extend_from_slice(script);
        self
    }

    pub fn script_bytes(&self) -> Option<&[u8]> {
        self.script.as_deref()
    }

    /// Replaces the signers. The first one is the sender and pays the fees.
    pub fn signers(&mut self, signers: Vec<AccountSigner>) -> RpcResult<&mut Self> {
        let mut seen = HashSet::new();
        if !signers.iter().all(|s| seen.insert(s.account.script_hash())) {
            return Err(RpcError::invalid_argument(
                "Cannot add multiple signers concerning the same account",
            ));
        }
        check_attribute_count(signers.len(), self.attributes.len())?;
        self.signers = signers;
        Ok(self)
    }

    pub fn get_signers(&self) -> &[AccountSigner] {
        &self.signers
    }

    /// Moves the signer for `account` to the front so that it pays the fees.
    pub fn first_signer(&mut self, account: &UInt160) -> RpcResult<&mut Self> {
        if self
            .signers
            .iter()
            .any(|s| s.signer.scopes() == WitnessScope::None)
        {
            return Err(RpcError::illegal_state(
                "This transaction contains a signer with fee-only witness scope that will cover the fees, so the order of the signers does not affect the payment",
            ));
        }
        let position = self
            .signers
            .iter()
            .position(|s| &s.account.script_hash() == account)
            .ok_or_else(|| {
                RpcError::invalid_argument(format!(
                    "Could not find a signer with script hash {account}. Add the signer before calling this method"
                ))
            })?;
        let signer = self.signers.remove(position);
        self.signers.insert(0, signer);
        Ok(self)
    }

    /// Appends attributes. Signers and attributes together may not exceed the protocol limit.
    pub fn attributes(&mut self, attributes: Vec<TransactionAttribute>) -> RpcResult<&mut Self> {
        check_attribute_count(self.signers.len(), self.attributes.len() + attributes.len())?;
        for attribute in attributes {
            if !attribute.allow_multiple()
                && self
                    .attributes
                    .iter()
                    .any(|a| a.attribute_type() == attribute.attribute_type())
            {
                continue;
            }
            self.attributes.push(attribute);
        }
        Ok(self)
    }

    pub fn get_attributes(&self) -> &[TransactionAttribute] {
        &self.attributes
    }

    pub fn high_priority(&mut self) -> RpcResult<&mut Self> {
        self.attributes(vec![TransactionAttribute::HighPriority])
    }

    pub fn additional_network_fee(&mut self, fee: i64) -> RpcResult<&mut Self> {
        self.additional_network_fee = non_negative_fee("Additional network fee", fee)?;
        Ok(self)
    }

    pub fn additional_system_fee(&mut self, fee: i64) -> RpcResult<&mut Self> {
        self.additional_system_fee = non_negative_fee("Additional system fee", fee)?;
        Ok(self)
    }

    /// Keeps building when the script simulation ends in FAULT.
    pub fn allow_transmission_on_fault(&mut self) -> &mut Self {
        self.allow_transmission_on_fault = true;
        self
    }

    pub fn reject_transmission_on_fault(&mut self) -> &mut Self {
        self.allow_transmission_on_fault = false;
        self
    }

    /// Calls `consumer(total_fee, sender_balance)` when the sender's GAS does not cover the fees.
    pub fn do_if_sender_cannot_cover_fees<F>(&mut self, consumer: F) -> RpcResult<&mut Self>
    where
        F: Fn(i64, i64) + Send + Sync + 'static,
    {
        if matches!(self.fee_hook, Some(FeeHook::Error(_))) {
            return Err(RpcError::illegal_state(
                "Cannot handle a consumer for this case, since an error will be raised if the sender cannot cover the fees",
            ));
        }
        self.fee_hook = Some(FeeHook::Consumer(Box::new(consumer)));
        Ok(self)
    }

    /// Fails [`build`](Self::build) with [`RpcError::InsufficientFunds`] when the
    /// sender's GAS does not cover the fees.
    pub fn throw_if_sender_cannot_cover_fees(&mut self, message: impl Into<String>) -> RpcResult<&mut Self> {
        if matches!(self.fee_hook, Some(FeeHook::Consumer(_))) {
            return Err(RpcError::illegal_state(
                "Cannot raise an error for this case, since a consumer will be executed if the sender cannot cover the fees",
            ));
        }
        self.fee_hook = Some(FeeHook::Error(message.into()));
        Ok(self)
    }

    /// Dry runs the script with the configured signers without building anything.
    pub async fn call_invoke_script(&self) -> RpcResult<RpcInvokeResult> {
        let script = match self.script.as_deref() {
            Some(script) if !script.is_empty() => script,
            _ => {
                return Err(RpcError::illegal_state(
                    "Cannot make an 'invokescript' call without the script being configured",
                ))
            }
        };
        self.client.invoke_script(script, &self.plain_signers()).await
    }

    /// Produces the unsigned transaction with both fees set.
    pub async fn build(&self) -> RpcResult<Transaction> {
        let script = self.checked_script()?;

        if self.has_high_priority() && !self.is_allowed_for_high_priority().await? {
            return Err(RpcError::invalid_argument(
                "This transaction does not have a committee member as sender. Only committee members can send transactions with high priority",
            ));
        }

        let valid_until_block = match self.valid_until_block {
            Some(block) => block,
            None => self.fetch_valid_until_block().await?,
        };

        let mut tx = Transaction::new();
        tx.set_version(self.version);
        if let Some(nonce) = self.nonce {
            tx.set_nonce(nonce);
        }
        tx.set_valid_until_block(valid_until_block);
        tx.set_signers(self.plain_signers())?;
        tx.set_attributes(self.attributes.clone())?;
        tx.set_script(script.to_vec());

        let system_fee = self
            .simulate_system_fee(script, tx.signers())
            .await?
            .checked_add(self.additional_system_fee)
            .ok_or_else(|| RpcError::invalid_argument("System fee overflows an i64"))?;
        tx.set_system_fee(system_fee)?;

        let network_fee = self
            .calculate_network_fee(&mut tx)
            .await?
            .checked_add(self.additional_network_fee)
            .ok_or_else(|| RpcError::invalid_argument("Network fee overflows an i64"))?;
        tx.set_network_fee(network_fee)?;

        if let Some(hook) = &self.fee_hook {
            self.check_sender_balance(hook, &tx).await?;
        }

        debug!(
            target: "neo",
            valid_until_block,
            system_fee,
            network_fee,
            "transaction built"
        );
        Ok(tx)
    }

    /// Builds the transaction and attaches a witness for every signer.
    ///
    /// Signers backed by a key pair are signed with it and contract signers get
    /// their verification parameters. Multi-sig and watch-only signers make this
    /// fail before any request is made; build and sign those manually.
    pub async fn sign(&self) -> RpcResult<Transaction> {
        self.checked_script()?;
        if let Some(signer) = self
            .signers
            .iter()
            .find(|s| !matches!(s.account.kind(), AccountKind::KeyPair(_) | AccountKind::Contract { .. }))
        {
            return Err(unsignable(&signer.account));
        }

        let mut tx = self.build().await?;
        let network_magic = self.client.network_magic().await?;
        let sign_data = tx.get_sign_data(network_magic)?;

        let witnesses = self
            .signers
            .iter()
            .map(|s| create_witness(&s.account, &sign_data))
            .collect::<RpcResult<Vec<_>>>()?;
        tx.set_witnesses(witnesses);
        Ok(tx)
    }

    fn checked_script(&self) -> RpcResult<&[u8]> {
        let script = match self.script.as_deref() {
            Some(script) if !script.is_empty() => script,
            _ => return Err(RpcError::illegal_state("Cannot build a transaction without a script")),
        };
        if self.signers.is_empty() {
            return Err(RpcError::illegal_state(
                "Cannot build a transaction without signers. At least one signer is required for the sender",
            ));
        }
        Ok(script)
    }

    fn plain_signers(&self) -> Vec<Signer> {
        self.signers.iter().map(|s| s.signer.clone()).collect()
    }

    fn has_high_priority(&self) -> bool {
        self.attributes
            .iter()
            .any(|a| a.attribute_type() == TransactionAttributeType::HighPriority)
    }

    /// The sender, or one of the keys of a multi-sig sender, must sit in the committee.
    async fn is_allowed_for_high_priority(&self) -> RpcResult<bool> {
        let Some(sender) = self.signers.first() else {
            return Ok(false);
        };
        let committee = self.client.get_committee().await?;
        let sender_hash = sender.account.script_hash();
        let allowed = committee.iter().any(|member| {
            Contract::create_signature_contract(member).script_hash() == sender_hash
                || sender.account.is_multi_sig() && sender.account.public_keys().contains(member)
        });
        Ok(allowed)
    }

    async fn fetch_valid_until_block(&self) -> RpcResult<u32> {
        let block_count = self.client.get_block_count().await?;
        let increment = self.client.settings().max_valid_until_block_increment;
        debug!(target: "neo", block_count, increment, "block count fetched");
        block_count.checked_add(increment).ok_or_else(|| {
            RpcError::InvalidResponse(format!(
                "Block count {block_count} plus increment {increment} does not fit a u32"
            ))
        })
    }

    async fn simulate_system_fee(&self, script: &[u8], signers: &[Signer]) -> RpcResult<i64> {
        let result = self.client.invoke_script(script, signers).await?;
        if result.has_state_fault() {
            let exception = result
                .exception
                .clone()
                .unwrap_or_else(|| "no exception message".to_string());
            if !self.allow_transmission_on_fault {
                return Err(RpcError::VmFault { exception });
            }
            warn!(target: "neo", %exception, "script simulation faulted, building anyway");
        }
        debug!(target: "neo", gas_consumed = result.gas_consumed, "system fee simulated");
        Ok(result.gas_consumed)
    }

    /// Prices `tx` with placeholder witnesses of the final size, then removes them.
    async fn calculate_network_fee(&self, tx: &mut Transaction) -> RpcResult<i64> {
        let placeholders = self
            .signers
            .iter()
            .map(|s| placeholder_witness(&s.account))
            .collect::<RpcResult<Vec<_>>>()?;
        tx.set_witnesses(placeholders);
        let fee = self.client.calculate_network_fee(tx).await;
        tx.set_witnesses(Vec::new());
        let fee = fee?;
        debug!(target: "neo", network_fee = fee, "network fee calculated");
        Ok(fee)
    }

    async fn check_sender_balance(&self, hook: &FeeHook, tx: &Transaction) -> RpcResult<()> {
        let Some(sender) = tx.sender() else {
            return Ok(());
        };
        let total_fee = tx.system_fee().saturating_add(tx.network_fee());
        let balance = self.sender_gas_balance(&sender).await?;
        if total_fee <= balance {
            return Ok(());
        }
        match hook {
            FeeHook::Consumer(consumer) => {
                consumer(total_fee, balance);
                Ok(())
            }
            FeeHook::Error(message) => Err(RpcError::InsufficientFunds(message.clone())),
        }
    }

    async fn sender_gas_balance(&self, sender: &UInt160) -> RpcResult<i64> {
        let gas = UInt160::parse(GAS_TOKEN_HASH)
            .map_err(|e| RpcError::invalid_argument(e.to_string()))?;
        let result = self
            .client
            .invoke_function(&gas, "balanceOf", &[ContractParameter::Hash160(*sender)], &[])
            .await?;
        let balance: BigInt = result
            .first_stack_item()
            .and_then(|item| item.as_integer())
            .ok_or_else(|| {
                RpcError::InvalidResponse(format!("balanceOf returned no integer for {sender}"))
            })?;
        Ok(i64::try_from(&balance).unwrap_or(i64::MAX))
    }
}

fn check_attribute_count(signers: usize, attributes: usize) -> RpcResult<()> {
    if signers + attributes > MAX_TRANSACTION_ATTRIBUTES {
        return Err(RpcError::invalid_argument(format!(
            "A transaction cannot have more than {MAX_TRANSACTION_ATTRIBUTES} attributes (including signers), got {}",
            signers + attributes
        )));
    }
    Ok(())
}

fn non_negative_fee(what: &str, fee: i64) -> RpcResult<i64> {
    if fee < 0 {
        return Err(RpcError::invalid_argument(format!("{what} cannot be negative, got {fee}")));
    }
    Ok(fee)
}

/// A witness with zeroed signatures, sized like the one `account` will produce.
pub(crate) fn placeholder_witness(account: &Account) -> RpcResult<Witness> {
    if let AccountKind::Contract {
        verification_parameters,
    } = account.kind()
    {
        return Ok(Witness::create_contract_witness(verification_parameters)?);
    }
    let verification_script = account.verification_script()?.ok_or_else(|| {
        RpcError::illegal_state(format!(
            "Account {} has no verification script, so its witness cannot be sized",
            account.script_hash()
        ))
    })?;
    let invocation_script = Contract::create_invocation_script(&SIGNATURE_PLACEHOLDER)
        .repeat(account.signing_threshold()?);
    Ok(Witness::new(invocation_script, verification_script))
}

fn unsignable(account: &Account) -> RpcError {
    if account.is_multi_sig() {
        RpcError::illegal_state(format!(
            "Signer {} is a multi-sig account and cannot be signed automatically. Build the transaction and add the multi-sig witness manually",
            account.script_hash()
        ))
    } else {
        RpcError::illegal_state(format!(
            "Cannot create transaction signature because account {} does not hold a private key",
            account.script_hash()
        ))
    }
}

fn create_witness(account: &Account, sign_data: &[u8]) -> RpcResult<Witness> {
    match account.kind() {
        AccountKind::KeyPair(key_pair) => Ok(Witness::create(sign_data, key_pair)?),
        AccountKind::Contract {
            verification_parameters,
        } => Ok(Witness::create_contract_witness(verification_parameters)?),
        _ => Err(unsignable(account)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{localhost_binding_permitted, mock_method};
    use mockito::{Mock, Server};
    use neo_config::ClientSettings;
    use neo_cryptography::KeyPair;
    use neo_primitives::UInt256;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    fn key(seed: u8) -> KeyPair {
        KeyPair::from_private_key(&[seed; 32]).unwrap()
    }

    fn offline_client() -> Arc<RpcClient> {
        Arc::new(RpcClient::new(ClientSettings::new("http://127.0.0.1:1")).unwrap())
    }

    fn client_for(server: &Server) -> Arc<RpcClient> {
        let mut settings = ClientSettings::new(server.url());
        settings.network_magic = Some(894_710_606);
        Arc::new(RpcClient::new(settings).unwrap())
    }

    fn invoke_result(state: &str, gas: i64, exception: Option<&str>) -> Value {
        json!({
            "script": "EUA=",
            "state": state,
            "gasconsumed": gas.to_string(),
            "exception": exception,
            "stack": []
        })
    }

    async fn mock_pricing(server: &mut Server, gas: i64, network_fee: i64) -> Vec<Mock> {
        vec![
            mock_method(server, "getblockcount", json!(1000), 1).await,
            mock_method(server, "invokescript", invoke_result("HALT", gas, None), 1).await,
            mock_method(
                server,
                "calculatenetworkfee",
                json!({ "networkfee": network_fee.to_string() }),
                1,
            )
            .await,
        ]
    }

    fn configured(client: Arc<RpcClient>, account: Account) -> TransactionBuilder {
        let mut builder = TransactionBuilder::new(client);
        builder.script(vec![0x11, 0x40]);
        builder
            .signers(vec![AccountSigner::called_by_entry(account)])
            .unwrap();
        builder
    }

    #[tokio::test]
    async fn build_requires_script_and_signers() {
        let mut builder = TransactionBuilder::new(offline_client());
        builder
            .signers(vec![AccountSigner::called_by_entry(key(1).into())])
            .unwrap();
        let err = builder.build().await.unwrap_err();
        assert!(matches!(err, RpcError::IllegalState { ref message } if message.contains("script")));

        let mut builder = TransactionBuilder::new(offline_client());
        builder.script(vec![0x40]);
        let err = builder.build().await.unwrap_err();
        assert!(matches!(err, RpcError::IllegalState { ref message } if message.contains("signers")));
    }

    #[test]
    fn nonce_and_valid_until_block_must_fit_u32() {
        let mut builder = TransactionBuilder::new(offline_client());
        assert!(builder.nonce(u64::from(u32::MAX)).is_ok());
        assert!(matches!(
            builder.nonce(1u64 << 32),
            Err(RpcError::InvalidArgument { .. })
        ));
        assert!(builder.valid_until_block(u64::from(u32::MAX)).is_ok());
        assert!(matches!(
            builder.valid_until_block(1u64 << 32),
            Err(RpcError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn duplicate_signer_accounts_are_rejected() {
        let mut builder = TransactionBuilder::new(offline_client());
        let account: Account = key(1).into();
        let err = builder
            .signers(vec![
                AccountSigner::called_by_entry(account.clone()),
                AccountSigner::global(account),
            ])
            .unwrap_err();
        assert!(matches!(err, RpcError::InvalidArgument { .. }));
        assert!(builder.get_signers().is_empty());
    }

    #[test]
    fn attribute_limit_counts_signers() {
        let mut builder = TransactionBuilder::new(offline_client());
        let signers = (1..=10u8)
            .map(|i| AccountSigner::none(Account::from_script_hash(UInt160::from([i; 20]))))
            .collect();
        builder.signers(signers).unwrap();

        let conflicts = |n: u8| {
            (0..n)
                .map(|i| TransactionAttribute::Conflicts {
                    hash: UInt256::from([i; 32]),
                })
                .collect::<Vec<_>>()
        };
        assert!(matches!(
            builder.attributes(conflicts(7)),
            Err(RpcError::InvalidArgument { .. })
        ));
        assert!(builder.attributes(conflicts(6)).is_ok());
        assert_eq!(builder.get_attributes().len(), 6);
    }

    #[test]
    fn high_priority_is_added_once() {
        let mut builder = TransactionBuilder::new(offline_client());
        builder.high_priority().unwrap();
        builder.high_priority().unwrap();
        assert_eq!(builder.get_attributes(), &[TransactionAttribute::HighPriority]);
    }

    #[test]
    fn negative_additional_fees_are_rejected() {
        let mut builder = TransactionBuilder::new(offline_client());
        assert!(builder.additional_network_fee(-1).is_err());
        assert!(builder.additional_system_fee(-1).is_err());
        assert!(builder.additional_system_fee(0).is_ok());
    }

    #[test]
    fn fee_hook_is_either_consumer_or_error() {
        let mut builder = TransactionBuilder::new(offline_client());
        builder.do_if_sender_cannot_cover_fees(|_, _| {}).unwrap();
        assert!(matches!(
            builder.throw_if_sender_cannot_cover_fees("no gas"),
            Err(RpcError::IllegalState { .. })
        ));

        let mut builder = TransactionBuilder::new(offline_client());
        builder.throw_if_sender_cannot_cover_fees("no gas").unwrap();
        assert!(matches!(
            builder.do_if_sender_cannot_cover_fees(|_, _| {}),
            Err(RpcError::IllegalState { .. })
        ));
    }

    #[test]
    fn first_signer_moves_sender_to_front() {
        let a: Account = key(1).into();
        let b: Account = key(2).into();
        let mut builder = TransactionBuilder::new(offline_client());
        builder
            .signers(vec![
                AccountSigner::called_by_entry(a.clone()),
                AccountSigner::called_by_entry(b.clone()),
            ])
            .unwrap();

        builder.first_signer(&b.script_hash()).unwrap();
        assert_eq!(builder.get_signers()[0].account(), &b);
        assert!(matches!(
            builder.first_signer(&UInt160::default()),
            Err(RpcError::InvalidArgument { .. })
        ));

        builder
            .signers(vec![AccountSigner::none(a.clone()), AccountSigner::called_by_entry(b)])
            .unwrap();
        assert!(matches!(
            builder.first_signer(&a.script_hash()),
            Err(RpcError::IllegalState { .. })
        ));
    }

    #[tokio::test]
    async fn sign_refuses_accounts_without_private_key() {
        let multi_sig = Account::multi_sig(2, vec![*key(1).public_key(), *key(2).public_key()]).unwrap();
        let builder = configured(offline_client(), multi_sig);
        let err = builder.sign().await.unwrap_err();
        assert!(matches!(err, RpcError::IllegalState { ref message } if message.contains("multi-sig")));

        let watch_only = Account::from_public_key(*key(3).public_key());
        let builder = configured(offline_client(), watch_only);
        let err = builder.sign().await.unwrap_err();
        assert!(matches!(err, RpcError::IllegalState { ref message } if message.contains("private key")));
    }

    #[test]
    fn placeholder_witnesses_match_final_sizes() {
        let single = placeholder_witness(&key(1).into()).unwrap();
        assert_eq!(single.invocation_script.len(), 66);
        assert_eq!(single.verification_script.len(), 40);
        assert!(single.invocation_script[2..].iter().all(|b| *b == 0));

        let keys = vec![*key(1).public_key(), *key(2).public_key(), *key(3).public_key()];
        let multi = placeholder_witness(&Account::multi_sig(2, keys).unwrap()).unwrap();
        assert_eq!(multi.invocation_script.len(), 2 * 66);

        let contract = Account::contract(UInt160::from([7; 20]), vec![ContractParameter::integer(1)]);
        let witness = placeholder_witness(&contract).unwrap();
        assert_eq!(witness.invocation_script, vec![0x11]);
        assert!(witness.verification_script.is_empty());

        let address = Account::from_script_hash(UInt160::from([7; 20]));
        assert!(matches!(
            placeholder_witness(&address),
            Err(RpcError::IllegalState { .. })
        ));
    }

    #[tokio::test]
    async fn call_invoke_script_requires_script() {
        let builder = TransactionBuilder::new(offline_client());
        assert!(matches!(
            builder.call_invoke_script().await,
            Err(RpcError::IllegalState { .. })
        ));
    }

    #[tokio::test]
    async fn fault_is_rejected_unless_allowed() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _block_count = mock_method(&mut server, "getblockcount", json!(1000), 2).await;
        let _invoke = mock_method(
            &mut server,
            "invokescript",
            invoke_result("FAULT", 2_000, Some("ASSERT is executed with false result.")),
            2,
        )
        .await;
        let _fee = mock_method(&mut server, "calculatenetworkfee", json!({ "networkfee": "1000" }), 1).await;

        let mut builder = configured(client_for(&server), key(1).into());
        let err = builder.build().await.unwrap_err();
        assert!(matches!(err, RpcError::VmFault { ref exception } if exception.contains("ASSERT")));

        builder.allow_transmission_on_fault();
        let tx = builder.build().await.unwrap();
        assert_eq!(tx.system_fee(), 2_000);
        assert_eq!(tx.network_fee(), 1_000);
    }

    #[tokio::test]
    async fn fees_and_defaults_are_applied() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _mocks = mock_pricing(&mut server, 984_060, 1_230_610).await;

        let mut builder = configured(client_for(&server), key(1).into());
        builder.nonce(42).unwrap();
        builder.additional_system_fee(100).unwrap();
        builder.additional_network_fee(10).unwrap();
        let tx = builder.build().await.unwrap();

        assert_eq!(tx.nonce(), 42);
        assert_eq!(tx.valid_until_block(), 1000 + 5760);
        assert_eq!(tx.system_fee(), 984_160);
        assert_eq!(tx.network_fee(), 1_230_620);
        assert!(tx.witnesses().is_empty());
    }

    #[tokio::test]
    async fn consumer_sees_fee_and_balance() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _mocks = mock_pricing(&mut server, 1_000, 500).await;
        let balance = json!({
            "script": "",
            "state": "HALT",
            "gasconsumed": "0",
            "stack": [{ "type": "Integer", "value": "10" }]
        });
        let _balance = mock_method(&mut server, "invokefunction", balance, 1).await;

        let seen = Arc::new(Mutex::new(None));
        let recorder = Arc::clone(&seen);
        let mut builder = configured(client_for(&server), key(1).into());
        builder
            .do_if_sender_cannot_cover_fees(move |fee, balance| {
                *recorder.lock().unwrap() = Some((fee, balance));
            })
            .unwrap();
        builder.build().await.unwrap();
        assert_eq!(*seen.lock().unwrap(), Some((1_500, 10)));
    }

    #[tokio::test]
    async fn error_hook_raises_insufficient_funds() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _mocks = mock_pricing(&mut server, 1_000, 500).await;
        let balance = json!({
            "script": "",
            "state": "HALT",
            "gasconsumed": "0",
            "stack": [{ "type": "Integer", "value": "0" }]
        });
        let _balance = mock_method(&mut server, "invokefunction", balance, 1).await;

        let mut builder = configured(client_for(&server), key(1).into());
        builder.throw_if_sender_cannot_cover_fees("sender is broke").unwrap();
        let err = builder.build().await.unwrap_err();
        assert!(matches!(err, RpcError::InsufficientFunds(ref m) if m == "sender is broke"));
    }

    #[tokio::test]
    async fn committee_member_may_send_high_priority() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _mocks = mock_pricing(&mut server, 1_000, 500).await;
        let committee = json!([key(2).public_key().to_hex(), key(1).public_key().to_hex()]);
        let _committee = mock_method(&mut server, "getcommittee", committee, 1).await;

        let mut builder = configured(client_for(&server), key(1).into());
        builder.high_priority().unwrap();
        let tx = builder.build().await.unwrap();
        assert!(tx.has_attribute(TransactionAttributeType::HighPriority));
    }

    #[tokio::test]
    async fn multi_sig_sender_with_committee_key_may_send_high_priority() {
        if !localhost_binding_permitted() {
            return;
        }
        let mut server = Server::new_async().await;
        let _mocks = mock_pricing(&mut server, 1_000, 500).await;
        let committee = json!([key(2).public_key().to_hex()]);
        let _committee = mock_method(&mut server, "getcommittee", committee, 1).await;

        let sender = Account::multi_sig(1, vec![*key(1).public_key(), *key(2).public_key()]).unwrap();
        let mut builder = configured(client_for(&server), sender);
        builder.high_priority().unwrap();
        assert!(builder.build().await.is_ok());
    }
}
