// Copyright (C) 2015-2025 The Neo Project.
//
// witness_rule.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Witness rules: an Allow/Deny action gated by a boolean condition tree.

use crate::error::{CoreError, CoreResult};
use neo_cryptography::{ec_point::COMPRESSED_SIZE, ECPoint};
use neo_io::{helper::get_var_size, BinaryWriter, IoError, IoResult, MemoryReader, Serializable};
use neo_primitives::{UInt160, UINT160_SIZE};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

/// Action taken when a rule's condition matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WitnessRuleAction {
    Deny = 0,
    Allow = 1,
}

impl WitnessRuleAction {
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Deny),
            1 => Some(Self::Allow),
            _ => None,
        }
    }
}

impl fmt::Display for WitnessRuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WitnessRuleAction::Deny => write!(f, "Deny"),
            WitnessRuleAction::Allow => write!(f, "Allow"),
        }
    }
}

impl FromStr for WitnessRuleAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Deny" => Ok(Self::Deny),
            "Allow" => Ok(Self::Allow),
            other => Err(CoreError::invalid_argument(format!(
                "Unknown witness rule action: {other}"
            ))),
        }
    }
}

/// Wire discriminant of a [`WitnessCondition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WitnessConditionType {
    Boolean = 0x00,
    Not = 0x01,
    And = 0x02,
    Or = 0x03,
    ScriptHash = 0x18,
    Group = 0x19,
    CalledByEntry = 0x20,
    CalledByContract = 0x28,
    CalledByGroup = 0x29,
}

impl WitnessConditionType {
    pub fn to_byte(self) -> u8 {
        self as u8
    }

    pub fn from_byte(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::Boolean),
            0x01 => Some(Self::Not),
            0x02 => Some(Self::And),
            0x03 => Some(Self::Or),
            0x18 => Some(Self::ScriptHash),
            0x19 => Some(Self::Group),
            0x20 => Some(Self::CalledByEntry),
            0x28 => Some(Self::CalledByContract),
            0x29 => Some(Self::CalledByGroup),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Not => "Not",
            Self::And => "And",
            Self::Or => "Or",
            Self::ScriptHash => "ScriptHash",
            Self::Group => "Group",
            Self::CalledByEntry => "CalledByEntry",
            Self::CalledByContract => "CalledByContract",
            Self::CalledByGroup => "CalledByGroup",
        }
    }
}

impl fmt::Display for WitnessConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of a witness condition tree.
///
/// The composite variants can be built directly, but the checked constructors
/// ([`WitnessCondition::not`], [`WitnessCondition::and`],
/// [`WitnessCondition::or`]) reject a tree deeper than
/// [`WitnessCondition::MAX_NESTING_DEPTH`] as soon as it is assembled.
/// Serialization repeats the check for trees built by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WitnessCondition {
    Boolean { value: bool },
    Not { condition: Box<WitnessCondition> },
    And { conditions: Vec<WitnessCondition> },
    Or { conditions: Vec<WitnessCondition> },
    ScriptHash { hash: UInt160 },
    Group { group: ECPoint },
    CalledByEntry,
    CalledByContract { hash: UInt160 },
    CalledByGroup { group: ECPoint },
}

impl WitnessCondition {
    /// Maximum operands of an And/Or node.
    pub const MAX_SUBITEMS: usize = 16;
    /// Maximum number of nested Not/And/Or nodes on any path.
    pub const MAX_NESTING_DEPTH: usize = 3;

    pub fn boolean(value: bool) -> Self {
        Self::Boolean { value }
    }

    pub fn not(condition: WitnessCondition) -> CoreResult<Self> {
        Self::checked(Self::Not {
            condition: Box::new(condition),
        })
    }

    pub fn and(conditions: Vec<WitnessCondition>) -> CoreResult<Self> {
        Self::checked(Self::And { conditions })
    }

    pub fn or(conditions: Vec<WitnessCondition>) -> CoreResult<Self> {
        Self::checked(Self::Or { conditions })
    }

    pub fn script_hash(hash: UInt160) -> Self {
        Self::ScriptHash { hash }
    }

    pub fn group(group: ECPoint) -> Self {
        Self::Group { group }
    }

    pub fn called_by_contract(hash: UInt160) -> Self {
        Self::CalledByContract { hash }
    }

    pub fn called_by_group(group: ECPoint) -> Self {
        Self::CalledByGroup { group }
    }

    fn checked(condition: Self) -> CoreResult<Self> {
        Self::checked_at(condition, Self::MAX_NESTING_DEPTH)
    }

    fn checked_at(condition: Self, max_nest_depth: usize) -> CoreResult<Self> {
        condition
            .validate(max_nest_depth)
            .map_err(CoreError::invalid_argument)?;
        Ok(condition)
    }

    pub fn condition_type(&self) -> WitnessConditionType {
        match self {
            WitnessCondition::Boolean { .. } => WitnessConditionType::Boolean,
            WitnessCondition::Not { .. } => WitnessConditionType::Not,
            WitnessCondition::And { .. } => WitnessConditionType::And,
            WitnessCondition::Or { .. } => WitnessConditionType::Or,
            WitnessCondition::ScriptHash { .. } => WitnessConditionType::ScriptHash,
            WitnessCondition::Group { .. } => WitnessConditionType::Group,
            WitnessCondition::CalledByEntry => WitnessConditionType::CalledByEntry,
            WitnessCondition::CalledByContract { .. } => WitnessConditionType::CalledByContract,
            WitnessCondition::CalledByGroup { .. } => WitnessConditionType::CalledByGroup,
        }
    }

    /// Number of composite nodes on the longest path from this node to a leaf.
    pub fn depth(&self) -> usize {
        match self {
            WitnessCondition::Not { condition } => 1 + condition.depth(),
            WitnessCondition::And { conditions } | WitnessCondition::Or { conditions } => {
                1 + conditions.iter().map(Self::depth).max().unwrap_or(0)
            }
            _ => 0,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate(Self::MAX_NESTING_DEPTH).is_ok()
    }

    /// Checks operand counts and that no path has more than `remaining` composites.
    fn validate(&self, remaining: usize) -> Result<(), String> {
        match self {
            WitnessCondition::Not { condition } => {
                if remaining == 0 {
                    return Err(Self::depth_exceeded());
                }
                condition.validate(remaining - 1)
            }
            WitnessCondition::And { conditions } | WitnessCondition::Or { conditions } => {
                if remaining == 0 {
                    return Err(Self::depth_exceeded());
                }
                if conditions.is_empty() {
                    return Err(format!("{} condition requires at least one operand", self.condition_type()));
                }
                if conditions.len() > Self::MAX_SUBITEMS {
                    return Err(format!(
                        "{} condition has {} operands, maximum is {}",
                        self.condition_type(),
                        conditions.len(),
                        Self::MAX_SUBITEMS
                    ));
                }
                conditions.iter().try_for_each(|c| c.validate(remaining - 1))
            }
            _ => Ok(()),
        }
    }

    fn depth_exceeded() -> String {
        format!(
            "Witness condition exceeds maximum nesting depth {}",
            Self::MAX_NESTING_DEPTH
        )
    }

    fn write_to(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_u8(self.condition_type().to_byte());
        match self {
            WitnessCondition::Boolean { value } => writer.write_bool(*value),
            WitnessCondition::Not { condition } => condition.write_to(writer)?,
            WitnessCondition::And { conditions } | WitnessCondition::Or { conditions } => {
                writer.write_var_int(conditions.len() as u64);
                for condition in conditions {
                    condition.write_to(writer)?;
                }
            }
            WitnessCondition::ScriptHash { hash } | WitnessCondition::CalledByContract { hash } => {
                hash.serialize(writer)?
            }
            WitnessCondition::Group { group } | WitnessCondition::CalledByGroup { group } => {
                group.serialize(writer)?
            }
            WitnessCondition::CalledByEntry => {}
        }
        Ok(())
    }

    /// Reads one condition, allowing at most `max_nest_depth` further composites.
    fn deserialize_from(reader: &mut MemoryReader, max_nest_depth: usize) -> IoResult<Self> {
        let tag = reader.read_u8()?;
        let condition_type = WitnessConditionType::from_byte(tag)
            .ok_or_else(|| IoError::invalid_data(format!("Invalid witness condition type: {tag:#04x}")))?;

        let composite = matches!(
            condition_type,
            WitnessConditionType::Not | WitnessConditionType::And | WitnessConditionType::Or
        );
        if composite && max_nest_depth == 0 {
            return Err(IoError::invalid_data(Self::depth_exceeded()));
        }

        Ok(match condition_type {
            WitnessConditionType::Boolean => Self::Boolean {
                value: reader.read_bool()?,
            },
            WitnessConditionType::Not => Self::Not {
                condition: Box::new(Self::deserialize_from(reader, max_nest_depth - 1)?),
            },
            WitnessConditionType::And => Self::And {
                conditions: Self::deserialize_conditions(reader, max_nest_depth - 1)?,
            },
            WitnessConditionType::Or => Self::Or {
                conditions: Self::deserialize_conditions(reader, max_nest_depth - 1)?,
            },
            WitnessConditionType::ScriptHash => Self::ScriptHash {
                hash: UInt160::deserialize(reader)?,
            },
            WitnessConditionType::Group => Self::Group {
                group: ECPoint::deserialize(reader)?,
            },
            WitnessConditionType::CalledByEntry => Self::CalledByEntry,
            WitnessConditionType::CalledByContract => Self::CalledByContract {
                hash: UInt160::deserialize(reader)?,
            },
            WitnessConditionType::CalledByGroup => Self::CalledByGroup {
                group: ECPoint::deserialize(reader)?,
            },
        })
    }

    fn deserialize_conditions(reader: &mut MemoryReader, max_nest_depth: usize) -> IoResult<Vec<Self>> {
        let count = reader.read_var_int(Self::MAX_SUBITEMS as u64)? as usize;
        if count == 0 {
            return Err(IoError::invalid_data("Composite witness condition has no operands"));
        }
        let mut conditions = Vec::with_capacity(count);
        for _ in 0..count {
            conditions.push(Self::deserialize_from(reader, max_nest_depth)?);
        }
        Ok(conditions)
    }

    pub fn to_json(&self) -> Value {
        let kind = self.condition_type().as_str();
        match self {
            WitnessCondition::Boolean { value } => json!({ "type": kind, "expression": value }),
            WitnessCondition::Not { condition } => {
                json!({ "type": kind, "expression": condition.to_json() })
            }
            WitnessCondition::And { conditions } | WitnessCondition::Or { conditions } => json!({
                "type": kind,
                "expressions": conditions.iter().map(Self::to_json).collect::<Vec<_>>(),
            }),
            WitnessCondition::ScriptHash { hash } | WitnessCondition::CalledByContract { hash } => {
                json!({ "type": kind, "hash": hash.to_string() })
            }
            WitnessCondition::Group { group } | WitnessCondition::CalledByGroup { group } => {
                json!({ "type": kind, "group": group.to_hex() })
            }
            WitnessCondition::CalledByEntry => json!({ "type": kind }),
        }
    }

    pub fn from_json(json: &Value) -> CoreResult<Self> {
        Self::from_json_with_depth(json, Self::MAX_NESTING_DEPTH)
    }

    fn from_json_with_depth(json: &Value, max_nest_depth: usize) -> CoreResult<Self> {
        let kind = json
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| CoreError::invalid_argument("Witness condition type missing"))?;

        let nested = |json: &Value| -> CoreResult<Self> {
            if max_nest_depth == 0 {
                return Err(CoreError::invalid_argument(Self::depth_exceeded()));
            }
            Self::from_json_with_depth(json, max_nest_depth - 1)
        };
        let field = |name: &str| json_field(json, kind, name);
        let hash = || -> CoreResult<UInt160> {
            let text = field("hash")?.as_str().unwrap_or_default();
            UInt160::parse(text).map_err(|e| CoreError::invalid_argument(e.to_string()))
        };
        let group = || -> CoreResult<ECPoint> {
            let text = field("group")?.as_str().unwrap_or_default();
            Ok(ECPoint::from_hex(text)?)
        };

        let condition = match kind {
            "Boolean" => {
                let expression = field("expression")?;
                let value = match expression {
                    Value::Bool(b) => *b,
                    Value::String(s) if s.eq_ignore_ascii_case("true") => true,
                    Value::String(s) if s.eq_ignore_ascii_case("false") => false,
                    _ => return Err(CoreError::invalid_argument("Boolean condition expression must be a bool")),
                };
                Self::Boolean { value }
            }
            "Not" => Self::Not {
                condition: Box::new(nested(field("expression")?)?),
            },
            "And" | "Or" => {
                let expressions = field("expressions")?
                    .as_array()
                    .ok_or_else(|| CoreError::invalid_argument(format!("{kind} expressions must be an array")))?;
                let conditions = expressions.iter().map(nested).collect::<CoreResult<Vec<_>>>()?;
                if kind == "And" {
                    Self::And { conditions }
                } else {
                    Self::Or { conditions }
                }
            }
            "ScriptHash" => Self::ScriptHash { hash: hash()? },
            "Group" => Self::Group { group: group()? },
            "CalledByEntry" => Self::CalledByEntry,
            "CalledByContract" => Self::CalledByContract { hash: hash()? },
            "CalledByGroup" => Self::CalledByGroup { group: group()? },
            other => {
                return Err(CoreError::invalid_argument(format!(
                    "Unsupported witness condition type: {other}"
                )))
            }
        };
        Self::checked_at(condition, max_nest_depth)
    }
}

fn json_field<'a>(json: &'a Value, kind: &str, name: &str) -> CoreResult<&'a Value> {
    json.get(name)
        .ok_or_else(|| CoreError::invalid_argument(format!("{kind} condition missing {name}")))
}

impl Serializable for WitnessCondition {
    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        Self::deserialize_from(reader, Self::MAX_NESTING_DEPTH)
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        self.validate(Self::MAX_NESTING_DEPTH)
            .map_err(IoError::InvalidData)?;
        self.write_to(writer)
    }

    fn size(&self) -> usize {
        let payload = match self {
            WitnessCondition::Boolean { .. } => 1,
            WitnessCondition::Not { condition } => condition.size(),
            WitnessCondition::And { conditions } | WitnessCondition::Or { conditions } => {
                get_var_size(conditions.len() as u64) + conditions.iter().map(Serializable::size).sum::<usize>()
            }
            WitnessCondition::ScriptHash { .. } | WitnessCondition::CalledByContract { .. } => UINT160_SIZE,
            WitnessCondition::Group { .. } | WitnessCondition::CalledByGroup { .. } => COMPRESSED_SIZE,
            WitnessCondition::CalledByEntry => 0,
        };
        1 + payload
    }
}

impl fmt::Display for WitnessCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |conditions: &[WitnessCondition]| {
            conditions
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        match self {
            WitnessCondition::Boolean { value } => write!(f, "Boolean({value})"),
            WitnessCondition::Not { condition } => write!(f, "Not({condition})"),
            WitnessCondition::And { conditions } => write!(f, "And([{}])", join(conditions)),
            WitnessCondition::Or { conditions } => write!(f, "Or([{}])", join(conditions)),
            WitnessCondition::ScriptHash { hash } => write!(f, "ScriptHash({hash})"),
            WitnessCondition::Group { group } => write!(f, "Group({group})"),
            WitnessCondition::CalledByEntry => write!(f, "CalledByEntry"),
            WitnessCondition::CalledByContract { hash } => write!(f, "CalledByContract({hash})"),
            WitnessCondition::CalledByGroup { group } => write!(f, "CalledByGroup({group})"),
        }
    }
}

/// A rule restricting where a signer's witness applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WitnessRule {
    pub action: WitnessRuleAction,
    pub condition: WitnessCondition,
}

impl WitnessRule {
    pub fn new(action: WitnessRuleAction, condition: WitnessCondition) -> Self {
        Self { action, condition }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "action": self.action.to_string(),
            "condition": self.condition.to_json(),
        })
    }

    pub fn from_json(value: &Value) -> CoreResult<Self> {
        let action: WitnessRuleAction = value
            .get("action")
            .and_then(Value::as_str)
            .ok_or_else(|| CoreError::invalid_argument("WitnessRule missing action"))?
            .parse()?;
        let condition = value
            .get("condition")
            .ok_or_else(|| CoreError::invalid_argument("WitnessRule missing condition"))?;
        Ok(Self {
            action,
            condition: WitnessCondition::from_json(condition)?,
        })
    }
}

impl Serializable for WitnessRule {
    fn deserialize(reader: &mut MemoryReader) -> IoResult<Self> {
        let byte = reader.read_u8()?;
        let action = WitnessRuleAction::from_byte(byte)
            .ok_or_else(|| IoError::invalid_data(format!("Invalid witness rule action: {byte}")))?;
        let condition = WitnessCondition::deserialize(reader)?;
        Ok(Self { action, condition })
    }

    fn serialize(&self, writer: &mut BinaryWriter) -> IoResult<()> {
        writer.write_u8(self.action.to_byte());
        self.condition.serialize(writer)
    }

    fn size(&self) -> usize {
        1 + self.condition.size()
    }
}

impl fmt::Display for WitnessRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} if {}", self.action, self.condition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_cryptography::KeyPair;
    use neo_io::SerializableExt;

    fn nested_not(levels: usize) -> WitnessCondition {
        let mut condition = WitnessCondition::boolean(true);
        for _ in 0..levels {
            condition = WitnessCondition::Not {
                condition: Box::new(condition),
            };
        }
        condition
    }

    fn sample_key() -> ECPoint {
        *KeyPair::from_private_key(&[7u8; 32]).unwrap().public_key()
    }

    #[test]
    fn boolean_condition_bytes() {
        let bytes = WitnessCondition::boolean(true).to_array().unwrap();
        assert_eq!(bytes, vec![0x00, 0x01]);
    }

    #[test]
    fn not_condition_wraps_inner_bytes() {
        let condition = WitnessCondition::not(WitnessCondition::boolean(false)).unwrap();
        assert_eq!(condition.to_array().unwrap(), vec![0x01, 0x00, 0x00]);
    }

    #[test]
    fn max_depth_is_accepted() {
        let condition = nested_not(WitnessCondition::MAX_NESTING_DEPTH);
        assert_eq!(condition.depth(), 3);
        assert!(condition.is_valid());
        let bytes = condition.to_array().unwrap();
        assert_eq!(WitnessCondition::from_array(&bytes).unwrap(), condition);
    }

    #[test]
    fn one_level_beyond_max_depth_fails_everywhere() {
        let inner = nested_not(WitnessCondition::MAX_NESTING_DEPTH);
        assert!(matches!(
            WitnessCondition::not(inner.clone()),
            Err(CoreError::InvalidArgument { .. })
        ));

        let too_deep = nested_not(WitnessCondition::MAX_NESTING_DEPTH + 1);
        assert!(too_deep.to_array().is_err());

        let bytes = [0x01, 0x01, 0x01, 0x01, 0x00, 0x01];
        assert!(WitnessCondition::from_array(&bytes).is_err());
    }

    #[test]
    fn depth_counts_longest_branch() {
        let deep = nested_not(2);
        let condition = WitnessCondition::and(vec![WitnessCondition::CalledByEntry, deep]).unwrap();
        assert_eq!(condition.depth(), 3);
        assert!(WitnessCondition::or(vec![condition]).is_err());
    }

    #[test]
    fn and_operand_limit() {
        let sixteen = vec![WitnessCondition::CalledByEntry; 16];
        assert!(WitnessCondition::and(sixteen.clone()).is_ok());

        let mut seventeen = sixteen;
        seventeen.push(WitnessCondition::CalledByEntry);
        assert!(WitnessCondition::and(seventeen).is_err());
        assert!(WitnessCondition::or(Vec::new()).is_err());
    }

    #[test]
    fn composite_with_zero_operands_is_rejected_on_read() {
        assert!(WitnessCondition::from_array(&[0x02, 0x00]).is_err());
        let mut seventeen = vec![0x03, 17];
        seventeen.extend(std::iter::repeat(0x20).take(17));
        assert!(WitnessCondition::from_array(&seventeen).is_err());
    }

    #[test]
    fn hash_and_group_conditions_round_trip() {
        let hash = UInt160::parse("0xd2a4cff31913016155e38e474a2c06d08be276cf").unwrap();
        let group = sample_key();
        let condition = WitnessCondition::or(vec![
            WitnessCondition::script_hash(hash),
            WitnessCondition::called_by_contract(hash),
            WitnessCondition::group(group),
            WitnessCondition::called_by_group(group),
        ])
        .unwrap();

        let bytes = condition.to_array().unwrap();
        assert_eq!(bytes.len(), condition.size());
        assert_eq!(bytes[2], 0x18);
        assert_eq!(&bytes[3..23], hash.as_bytes());
        assert_eq!(WitnessCondition::from_array(&bytes).unwrap(), condition);
    }

    #[test]
    fn unknown_condition_tag_is_rejected() {
        assert!(WitnessCondition::from_array(&[0x04]).is_err());
    }

    #[test]
    fn rule_bytes_and_round_trip() {
        let rule = WitnessRule::new(WitnessRuleAction::Allow, WitnessCondition::CalledByEntry);
        let bytes = rule.to_array().unwrap();
        assert_eq!(bytes, vec![0x01, 0x20]);
        assert_eq!(WitnessRule::from_array(&bytes).unwrap(), rule);
        assert!(WitnessRule::from_array(&[0x02, 0x20]).is_err());
    }

    #[test]
    fn rule_json_round_trip() {
        let rule = WitnessRule::new(
            WitnessRuleAction::Deny,
            WitnessCondition::and(vec![
                WitnessCondition::not(WitnessCondition::group(sample_key())).unwrap(),
                WitnessCondition::boolean(true),
            ])
            .unwrap(),
        );
        let json = rule.to_json();
        assert_eq!(json["action"], "Deny");
        assert_eq!(json["condition"]["type"], "And");
        assert_eq!(WitnessRule::from_json(&json).unwrap(), rule);
    }

    #[test]
    fn json_depth_is_enforced() {
        let json = nested_not(WitnessCondition::MAX_NESTING_DEPTH + 1).to_json();
        assert!(WitnessCondition::from_json(&json).is_err());
    }
}
