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

//! Neo Configuration Module
//!
//! Settings shared by the RPC client and the transaction builder: which node
//! to talk to, which network it runs, and the defaults applied while building
//! transactions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Blockchain timing constants
pub const SECONDS_PER_BLOCK: u64 = 15;
pub const MILLISECONDS_PER_BLOCK: u64 = SECONDS_PER_BLOCK * 1000;

/// Default Neo RPC ports
pub const DEFAULT_RPC_PORT: u16 = 10332;
pub const DEFAULT_TESTNET_RPC_PORT: u16 = 20332;

/// Blocks a transaction stays valid for by default (one day of 15 second blocks).
pub const DEFAULT_MAX_VALID_UNTIL_BLOCK_INCREMENT: u32 = 5760;

pub const DEFAULT_ADDRESS_VERSION: u8 = 0x35;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Network type for Neo blockchain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum NetworkType {
    MainNet,
    #[default]
    TestNet,
    Private,
}

impl NetworkType {
    /// Network magic, or `None` for a private net where it must be queried.
    pub fn magic(&self) -> Option<u32> {
        match self {
            NetworkType::MainNet => Some(0x334f_454e),
            NetworkType::TestNet => Some(0x3554_334e),
            NetworkType::Private => None,
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkType::MainNet => write!(f, "mainnet"),
            NetworkType::TestNet => write!(f, "testnet"),
            NetworkType::Private => write!(f, "private"),
        }
    }
}

impl FromStr for NetworkType {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" => Ok(NetworkType::MainNet),
            "testnet" | "test" => Ok(NetworkType::TestNet),
            "private" | "privnet" => Ok(NetworkType::Private),
            _ => Err(SettingsError::Invalid(format!("Unknown network type: {s}"))),
        }
    }
}

/// Failure loading [`ClientSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Network magic used in signatures; queried with `getversion` when absent.
    #[serde(default)]
    pub network_magic: Option<u32>,

    #[serde(default = "default_max_valid_until_block_increment")]
    pub max_valid_until_block_increment: u32,

    #[serde(default = "default_address_version")]
    pub address_version: u8,

    /// Interval between block polls while tracking a sent transaction.
    #[serde(default = "default_polling_interval_ms")]
    pub polling_interval_ms: u64,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Send transactions even when their test invocation ends in FAULT.
    #[serde(default)]
    pub allow_transmission_on_fault: bool,
}

fn default_rpc_url() -> String {
    format!("http://localhost:{DEFAULT_RPC_PORT}")
}

fn default_max_valid_until_block_increment() -> u32 {
    DEFAULT_MAX_VALID_UNTIL_BLOCK_INCREMENT
}

fn default_address_version() -> u8 {
    DEFAULT_ADDRESS_VERSION
}

fn default_polling_interval_ms() -> u64 {
    MILLISECONDS_PER_BLOCK
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            network_magic: None,
            max_valid_until_block_increment: DEFAULT_MAX_VALID_UNTIL_BLOCK_INCREMENT,
            address_version: DEFAULT_ADDRESS_VERSION,
            polling_interval_ms: MILLISECONDS_PER_BLOCK,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            allow_transmission_on_fault: false,
        }
    }
}

impl ClientSettings {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            ..Self::default()
        }
    }

    pub fn for_network(network: NetworkType, rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            network_magic: network.magic(),
            ..Self::default()
        }
    }

    pub fn mainnet() -> Self {
        Self::for_network(NetworkType::MainNet, format!("http://seed1.neo.org:{DEFAULT_RPC_PORT}"))
    }

    pub fn testnet() -> Self {
        Self::for_network(
            NetworkType::TestNet,
            format!("http://seed1t5.neo.org:{DEFAULT_TESTNET_RPC_PORT}"),
        )
    }

    pub fn from_toml_str(content: &str) -> SettingsResult<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let path = path.as_ref();
        tracing::debug!(target: "neo", path = %path.display(), "loading client settings");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> SettingsResult<()> {
        if self.rpc_url.trim().is_empty() {
            return Err(SettingsError::Invalid("rpc_url cannot be empty".into()));
        }
        if self.max_valid_until_block_increment == 0 {
            return Err(SettingsError::Invalid(
                "max_valid_until_block_increment must be positive".into(),
            ));
        }
        if self.polling_interval_ms == 0 {
            return Err(SettingsError::Invalid("polling_interval_ms must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let settings = ClientSettings::from_toml_str("").unwrap();
        assert_eq!(settings, ClientSettings::default());
        assert_eq!(settings.rpc_url, "http://localhost:10332");
        assert_eq!(settings.max_valid_until_block_increment, 5760);
        assert_eq!(settings.polling_interval_ms, 15_000);
    }

    #[test]
    fn partial_toml_overrides_fields() {
        let settings = ClientSettings::from_toml_str(
            r#"
            rpc_url = "http://127.0.0.1:50012"
            network_magic = 1234
            allow_transmission_on_fault = true
            "#,
        )
        .unwrap();
        assert_eq!(settings.rpc_url, "http://127.0.0.1:50012");
        assert_eq!(settings.network_magic, Some(1234));
        assert!(settings.allow_transmission_on_fault);
        assert_eq!(settings.address_version, 0x35);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            ClientSettings::from_toml_str("max_valid_until_block_increment = 0"),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            ClientSettings::from_toml_str("rpc_url = 5"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn known_networks_carry_magic() {
        assert_eq!(ClientSettings::mainnet().network_magic, Some(860_833_102));
        assert_eq!(ClientSettings::testnet().network_magic, Some(894_710_606));
        assert_eq!("privnet".parse::<NetworkType>().unwrap().magic(), None);
    }
}
