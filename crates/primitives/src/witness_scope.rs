// Copyright (C) 2015-2025 The Neo Project.
//
// witness_scope.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Implementation of WitnessScope, the signer scope flags.

use crate::error::{PrimitiveError, PrimitiveResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scope flags attached to a transaction signer.
///
/// `Global` is exclusive: it cannot be combined with any other flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WitnessScope(u8);

#[allow(non_upper_case_globals)]
impl WitnessScope {
    /// Only sign the transaction; no contract may use the witness.
    pub const None: WitnessScope = WitnessScope(0x00);

    /// The witness is only valid for the entry script of the transaction.
    pub const CalledByEntry: WitnessScope = WitnessScope(0x01);

    /// The witness is valid for an explicit list of contracts.
    pub const CustomContracts: WitnessScope = WitnessScope(0x10);

    /// The witness is valid for contracts in an explicit list of groups.
    pub const CustomGroups: WitnessScope = WitnessScope(0x20);

    /// The witness is valid when the attached rules allow it.
    pub const WitnessRules: WitnessScope = WitnessScope(0x40);

    /// The witness is valid everywhere. Cannot be combined with other flags.
    pub const Global: WitnessScope = WitnessScope(0x80);

    const FLAGS: [WitnessScope; 5] = [
        WitnessScope::CalledByEntry,
        WitnessScope::CustomContracts,
        WitnessScope::CustomGroups,
        WitnessScope::WitnessRules,
        WitnessScope::Global,
    ];

    const VALID_BITS: u8 = 0x01 | 0x10 | 0x20 | 0x40 | 0x80;
}

impl WitnessScope {
    #[inline]
    pub fn has_flag(self, flag: WitnessScope) -> bool {
        self.0 & flag.0 != 0
    }

    #[inline]
    pub fn combine(self, other: WitnessScope) -> Self {
        WitnessScope(self.0 | other.0)
    }

    #[inline]
    pub fn remove(self, flag: WitnessScope) -> Self {
        WitnessScope(self.0 & !flag.0)
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        self.0
    }

    /// Decodes a scope byte, rejecting unknown bits and Global combined with anything else.
    pub fn from_byte(value: u8) -> PrimitiveResult<Self> {
        let scope = WitnessScope(value);
        if scope.is_valid() {
            Ok(scope)
        } else {
            Err(PrimitiveError::UnknownValue {
                kind: "WitnessScope",
                value,
            })
        }
    }

    pub fn is_valid(self) -> bool {
        if self.has_flag(WitnessScope::Global) && self.0 != WitnessScope::Global.0 {
            return false;
        }
        self.0 & !Self::VALID_BITS == 0
    }

    /// ORs a set of scopes into the single byte written on the wire.
    pub fn combine_scopes(scopes: &[WitnessScope]) -> u8 {
        scopes.iter().fold(0u8, |acc, scope| acc | scope.0)
    }

    /// Splits a scope byte back into its individual flags.
    ///
    /// A zero byte yields `[None]`.
    pub fn extract_scopes(value: u8) -> Vec<WitnessScope> {
        if value == 0 {
            return vec![WitnessScope::None];
        }
        Self::FLAGS
            .iter()
            .copied()
            .filter(|flag| value & flag.0 != 0)
            .collect()
    }

    /// Name used in JSON-RPC signer objects.
    pub fn json_name(self) -> Option<&'static str> {
        match self {
            WitnessScope::None => Some("None"),
            WitnessScope::CalledByEntry => Some("CalledByEntry"),
            WitnessScope::CustomContracts => Some("CustomContracts"),
            WitnessScope::CustomGroups => Some("CustomGroups"),
            WitnessScope::WitnessRules => Some("WitnessRules"),
            WitnessScope::Global => Some("Global"),
            _ => None,
        }
    }

    pub fn from_json_name(name: &str) -> PrimitiveResult<Self> {
        match name.trim() {
            "None" => Ok(WitnessScope::None),
            "CalledByEntry" => Ok(WitnessScope::CalledByEntry),
            "CustomContracts" => Ok(WitnessScope::CustomContracts),
            "CustomGroups" => Ok(WitnessScope::CustomGroups),
            "WitnessRules" => Ok(WitnessScope::WitnessRules),
            "Global" => Ok(WitnessScope::Global),
            other => Err(PrimitiveError::invalid_format(format!(
                "unknown witness scope '{other}'"
            ))),
        }
    }
}

impl fmt::Display for WitnessScope {
    /// Comma separated flag names, the form node RPC expects.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Self::extract_scopes(self.0)
            .into_iter()
            .filter_map(WitnessScope::json_name)
            .collect();
        write!(f, "{}", names.join(","))
    }
}
