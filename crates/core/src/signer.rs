// Copyright (C) 2015-2025 The Neo Project.
//
// signer.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Transaction signers and their witness scopes.

use crate::error::{CoreError, CoreResult};
use crate::witness_rule::WitnessRule;
use neo_cryptography::{ec_point::COMPRESSED_SIZE, ECPoint};
use neo_io::{helper, BinaryWriter, IoError, IoResult, MemoryReader, Serializable};
use neo_primitives::{UInt160, WitnessScope, UINT160_SIZE};
use serde_json::{Map, Value};

/// Maximum entries in each of a signer's allowed contracts, allowed groups and rules.
pub const MAX_SIGNER_SUBITEMS: usize = 16;

/// An account authorizing a transaction, limited by its witness scope.
///
/// Scope flags for the sub-lists are switched on as entries are added. A
/// signer with the `Global` scope never carries sub-lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer {
    account: UInt160,
    scopes: WitnessScope,
    allowed_contracts: Vec<UInt160>,
    allowed_groups: Vec<ECPoint>,
    rules: Vec<WitnessRule>,
}

impl Signer {
    /// Creates a signer without sub-lists.
    ///
    /// Fails if `scopes` has unknown bits or combines `Global` with other flags.
    pub fn new(account: UInt160, scopes: WitnessScope) -> CoreResult<Self> {
        if !scopes.is_valid() {
            return Err(CoreError::invalid_argument(format!(
                "Invalid witness scope {:#04x}; Global cannot be combined with other scopes",
                scopes.to_byte()
            )));
        }
        Ok(Self {
            account,
            scopes,
            allowed_contracts: Vec::new(),
            allowed_groups: Vec::new(),
            rules: Vec::new(),
        })
    }

    /// A signer whose witness is only valid for the entry script.
    pub fn called_by_entry(account: UInt160) -> Self {
        Self::with_scope(account, WitnessScope::CalledByEntry)
    }

    pub fn global(account: UInt160) -> Self {
        Self::with_scope(account, WitnessScope::Global)
    }

    /// A fee-only signer; its witness is valid nowhere in the script.
    pub fn none(account: UInt160) -> Self {
        Self::with_scope(account, WitnessScope::None)
    }

    fn with_scope(account: UInt160, scopes: WitnessScope) -> Self {
        Self {
            account,
            scopes,
            allowed_contracts: Vec::new(),
            allowed_groups: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn account(&self) -> UInt160 {
        self.account
    }

    pub fn scopes(&self) -> WitnessScope {
        self.scopes
    }

    pub fn allowed_contracts(&self) -> &[UInt160] {
        &self.allowed_contracts
    }

    pub fn allowed_groups(&self) -> &[ECPoint] {
        &self.allowed_groups
    }

    pub fn rules(&self) -> &[WitnessRule] {
        &self.rules
    }

    /// Replaces the allowed contracts and enables `CustomContracts`.
    pub fn set_allowed_contracts(&mut self, contracts: Vec<UInt160>) -> CoreResult<&mut Self> {
        self.check_not_global("allowed contracts")?;
        check_count("allowed contracts", contracts.len())?;
        self.allowed_contracts = contracts;
        self.scopes = self.scopes.combine(WitnessScope::CustomContracts);
        Ok(self)
    }

    /// Appends allowed contracts, enabling `CustomContracts`.
    pub fn add_allowed_contracts(&mut self, contracts: &[UInt160]) -> CoreResult<&mut Self> {
        if contracts.is_empty() {
            return Ok(self);
        }
        self.check_not_global("allowed contracts")?;
        check_count("allowed contracts", self.allowed_contracts.len() + contracts.len())?;
        self.allowed_contracts.extend_from_slice(contracts);
        self.scopes = self.scopes.combine(WitnessScope::CustomContracts);
        Ok(self)
    }

    pub fn set_allowed_groups(&mut self, groups: Vec<ECPoint>) -> CoreResult<&mut Self> {
        self.check_not_global("allowed groups")?;
        check_count("allowed groups", groups.len())?;
        self.allowed_groups = groups;
        self.scopes = self.scopes.combine(WitnessScope::CustomGroups);
        Ok(self)
    }

    pub fn add_allowed_groups(&mut self, groups: &[ECPoint]) -> CoreResult<&mut Self> {
        if groups.is_empty() {
            return Ok(self);
        }
        self.check_not_global("allowed groups")?;
        check_count("allowed groups", self.allowed_groups.len() + groups.len())?;
        self.allowed_groups.extend_from_slice(groups);
        self.scopes = self.scopes.combine(WitnessScope::CustomGroups);
        Ok(self)
    }

    /// Replaces the rules and enables `WitnessRules`.
    ///
    /// Every rule's condition must respect the nesting limit.
    pub fn set_rules(&mut self, rules: Vec<WitnessRule>) -> CoreResult<&mut Self> {
        self.check_not_global("witness rules")?;
        check_count("witness rules", rules.len())?;
        check_rules(&rules)?;
        self.rules = rules;
        self.scopes = self.scopes.combine(WitnessScope::WitnessRules);
        Ok(self)
    }

    pub fn add_rules(&mut self, rules: &[WitnessRule]) -> CoreResult<&mut Self> {
        if rules.is_empty() {
            return Ok(self);
        }
        self.check_not_global("witness rules")?;
        check_count("witness rules", self.rules.len() + rules.len())?;
        check_rules(rules)?;
        self.rules.extend_from_slice(rules);
        self.scopes = self.scopes.combine(WitnessScope::WitnessRules);
        Ok(self)
    }

    fn check_not_global(&self, what: &str) -> CoreResult<()> {
        if self.scopes.has_flag(WitnessScope::Global) {
            return Err(CoreError::invalid_argument(format!(
                "Trying to set {what} on a Signer with global scope"
            )));
        }
        Ok(())
    }

    /// JSON object accepted by `invokescript` and `invokefunction`.
    pub fn to_json(&self) -> Value {
        let mut json = Map::new();
        json.insert("account".into(), Value::String(self.account.to_string()));
        json.insert("scopes".into(), Value::String(self.scopes.to_string()));
        if self.scopes.has_flag(WitnessScope::CustomContracts) {
            json.insert(
                "allowedcontracts".into(),
                self.allowed_contracts
                    .iter()
                    .map(|h| Value::String(h.to_string()))
                    .collect(),
            );
        }
        if self.scopes.has_flag(WitnessScope::CustomGroups) {
            json.insert(
                "allowedgroups".into(),
                self.allowed_groups
                    .iter()
                    .map(|g| Value::String(g.to_hex()))
                    .collect(),
            );
        }
        if self.scopes.has_flag(WitnessScope::WitnessRules) {
            json.insert(
                "rules".into(),
                self.rules.iter().map(WitnessRule::to_json).collect(),
            );
        }
        Value::Object(json)
    }

    pub fn from_json(json: &Value) -> CoreResult<Self> {
        let account = json
            .get("account")
            .and_then(Value::as_str)
            .ok_or_else(|| CoreError::invalid_argument("Signer missing account"))?;
        let account = UInt160::parse(account).map_err(|e| CoreError::invalid_argument(e.to_string()))?;

        let scopes = json
            .get("scopes")
            .and_then(Value::as_str)
            .ok_or_else(|| CoreError::invalid_argument("Signer missing scopes"))?
            .split(',')
            .map(WitnessScope::from_json_name)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CoreError::invalid_argument(e.to_string()))?;
        let mut signer = Signer::new(account, WitnessScope::from_byte(WitnessScope::combine_scopes(&scopes))
            .map_err(|e| CoreError::invalid_argument(e.to_string()))?)?;

        if let Some(contracts) = json.get("allowedcontracts").and_then(Value::as_array) {
            let contracts = contracts
                .iter()
                .map(|v| UInt160::parse(v.as_str().unwrap_or_default()))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| CoreError::invalid_argument(e.to_string()))?;
            signer.set_allowed_contracts(contracts)?;
        }
        if let Some(groups) = json.get("allowedgroups").and_then(Value::as_array) {
            let groups = groups
                .iter()
                .map(|v| ECPoint::from_hex(v.as_str().unwrap_or_default()))
                .collect::<Result<Vec<_>, _>>()?;
            signer.set_allowed_groups(groups)?;
        }
        if let Some(rules) = json.get("rules").and_then(Value::as_array) {
            let rules = rules
                .iter()
                .map(WitnessRule::from_json)
                .collect::<CoreResult<Vec<_>>>()?;
            signer.set_rules(rules)?;
        }
        Ok(signer)
    }
}

fn check_count(what: &str, count: usize) -> CoreResult<()> {
    if count > MAX_SIGNER_SUBITEMS {
        return Err(CoreError::invalid_argument(format!(
            "A signer's {what} are limited to {MAX_SIGNER_SUBITEMS} entries, got {count}"
        )));
    }
    Ok(())
}

fn check_rules(rules: &[WitnessRule]) -> CoreResult<()> {
    match rules.iter().find(|rule| !rule.condition.is_valid()) {
        Some(rule) => Err(CoreError::invalid_argument(format!(
            "Witness rule condition {} exceeds the allowed nesting depth or operand count",
            rule.condition
        ))),
        None => Ok(()),
    }
}

impl Serializable for Signer {
    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let account = UInt160::deserialize(reader)?;
        let byte = reader.read_u8()?;
        let scopes = WitnessScope::from_byte(byte).map_err(|e| IoError::invalid_data(e.to_string()))?;

        let allowed_contracts = if scopes.has_flag(WitnessScope::CustomContracts) {
            reader.read_serializable_list(MAX_SIGNER_SUBITEMS)?
        } else {
            Vec::new()
        };
        let allowed_groups = if scopes.has_flag(WitnessScope::CustomGroups) {
            reader.read_serializable_list(MAX_SIGNER_SUBITEMS)?
        } else {
            Vec::new()
        };
        let rules = if scopes.has_flag(WitnessScope::WitnessRules) {
            reader.read_serializable_list(MAX_SIGNER_SUBITEMS)?
        } else {
            Vec::new()
        };

        Ok(Self {
            account,
            scopes,
            allowed_contracts,
            allowed_groups,
            rules,
        })
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        self.account.serialize(writer)?;
        writer.write_u8(self.scopes.to_byte());
        if self.scopes.has_flag(WitnessScope::CustomContracts) {
            writer.write_serializable_list(&self.allowed_contracts)?;
        }
        if self.scopes.has_flag(WitnessScope::CustomGroups) {
            writer.write_serializable_list(&self.allowed_groups)?;
        }
        if self.scopes.has_flag(WitnessScope::WitnessRules) {
            writer.write_serializable_list(&self.rules)?;
        }
        Ok(())
    }

    fn size(&self) -> usize {
        let mut size = UINT160_SIZE + 1;
        if self.scopes.has_flag(WitnessScope::CustomContracts) {
            size += helper::get_var_size(self.allowed_contracts.len() as u64)
                + self.allowed_contracts.len() * UINT160_SIZE;
        }
        if self.scopes.has_flag(WitnessScope::CustomGroups) {
            size += helper::get_var_size(self.allowed_groups.len() as u64)
                + self.allowed_groups.len() * COMPRESSED_SIZE;
        }
        if self.scopes.has_flag(WitnessScope::WitnessRules) {
            size += helper::get_list_size(&self.rules);
        }
        size
    }
}
