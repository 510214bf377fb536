// Engine - Consensus engine section of the chain spec
//
// Exactly one engine is configured per document. The section is an explicit
// tagged union so that an engine whose parameters are all defaults is still
// recognized as configured.

use crate::types::quantity::{hex_u256_opt, hex_u64_opt};
use crate::types::{Address, BlockNumber, Schedule, U256};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// The `engine` section
///
/// Engines the adapter does not model (`null`, `instantSeal`,
/// `authorityRound`, ...) are carried through untouched as `Other`.
#[derive(Debug, Clone, PartialEq)]
pub enum Engine {
    Ethash(EthashEngine),
    Clique(CliqueEngine),
    Other { name: String, section: serde_json::Value },
}

impl Engine {
    pub fn kind(&self) -> ConsensusEngineKind {
        match self {
            Engine::Ethash(_) => ConsensusEngineKind::Ethash,
            Engine::Clique(_) => ConsensusEngineKind::Clique,
            Engine::Other { .. } => ConsensusEngineKind::Unknown,
        }
    }

    /// Key of the section in the document
    pub fn name(&self) -> &str {
        match self {
            Engine::Ethash(_) => "Ethash",
            Engine::Clique(_) => "clique",
            Engine::Other { name, .. } => name,
        }
    }
}

impl Serialize for Engine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Engine::Ethash(ethash) => map.serialize_entry(self.name(), ethash)?,
            Engine::Clique(clique) => map.serialize_entry(self.name(), clique)?,
            Engine::Other { name, section } => map.serialize_entry(name, section)?,
        }
        map.end()
    }
}

struct EngineVisitor;

impl<'de> Visitor<'de> for EngineVisitor {
    type Value = Engine;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an object with exactly one engine key")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Engine, A::Error> {
        let Some(name) = access.next_key::<String>()? else {
            return Err(de::Error::invalid_length(0, &self));
        };
        let engine = if name == "Ethash" || name == "ethash" {
            Engine::Ethash(access.next_value()?)
        } else if name == "clique" {
            Engine::Clique(access.next_value()?)
        } else {
            Engine::Other {
                section: access.next_value()?,
                name,
            }
        };
        if access.next_key::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::custom("engine section must configure exactly one engine"));
        }
        Ok(engine)
    }
}

impl<'de> Deserialize<'de> for Engine {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(EngineVisitor)
    }
}

/// Engine family reported to the canonical configuration model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsensusEngineKind {
    Ethash,
    Clique,
    Unknown,
}

impl fmt::Display for ConsensusEngineKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConsensusEngineKind::Ethash => write!(f, "ethash"),
            ConsensusEngineKind::Clique => write!(f, "clique"),
            ConsensusEngineKind::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EthashEngine {
    #[serde(default)]
    pub params: EthashParams,
}

/// Proof-of-work parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthashParams {
    #[serde(default, with = "hex_u256_opt", skip_serializing_if = "Option::is_none")]
    pub minimum_difficulty: Option<U256>,
    #[serde(default, with = "hex_u256_opt", skip_serializing_if = "Option::is_none")]
    pub difficulty_bound_divisor: Option<U256>,
    #[serde(default, with = "hex_u256_opt", skip_serializing_if = "Option::is_none")]
    pub duration_limit: Option<U256>,

    /// Block reward from each listed block onwards
    #[serde(default, skip_serializing_if = "Schedule::is_empty")]
    pub block_reward: Schedule,
    /// Additional bomb delay contributed at each listed block
    #[serde(default, skip_serializing_if = "Schedule::is_empty")]
    pub difficulty_bomb_delays: Schedule,

    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub homestead_transition: Option<BlockNumber>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub eip100b_transition: Option<BlockNumber>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub ecip1010_pause_transition: Option<BlockNumber>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub ecip1010_continue_transition: Option<BlockNumber>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub ecip1017_era_rounds: Option<u64>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub bomb_defuse_transition: Option<BlockNumber>,

    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub dao_hardfork_transition: Option<BlockNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dao_hardfork_beneficiary: Option<Address>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dao_hardfork_accounts: Vec<Address>,

    /// Keys not modelled above, written back unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliqueEngine {
    #[serde(default)]
    pub params: CliqueParams,
}

/// Proof-of-authority parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliqueParams {
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub period: Option<u64>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub epoch: Option<u64>,

    /// Keys not modelled above, written back unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ethash_section() {
        let engine: Engine = serde_json::from_str(
            r#"{"Ethash": {"params": {
                "minimumDifficulty": "0x020000",
                "blockReward": {"0x0": "0x4563918244f40000", "0x42ae50": "0x29a2241af62c0000"},
                "difficultyBombDelays": {"0x42ae50": "0x2dc6c0"},
                "homesteadTransition": "0x118c30"
            }}}"#,
        )
        .unwrap();
        assert_eq!(engine.kind(), ConsensusEngineKind::Ethash);
        let Engine::Ethash(ethash) = engine else {
            panic!("expected ethash");
        };
        assert_eq!(ethash.params.minimum_difficulty, Some(U256::from(0x020000u64)));
        assert_eq!(ethash.params.block_reward.len(), 2);
        assert_eq!(ethash.params.homestead_transition, Some(1_150_000));
    }

    #[test]
    fn test_empty_clique_is_still_clique() {
        let engine: Engine = serde_json::from_str(r#"{"clique": {"params": {}}}"#).unwrap();
        assert_eq!(engine.kind(), ConsensusEngineKind::Clique);

        let json = serde_json::to_string(&Engine::Clique(CliqueEngine::default())).unwrap();
        assert_eq!(json, r#"{"clique":{"params":{}}}"#);
    }

    #[test]
    fn test_unmodelled_engine_kept() {
        let input = r#"{"authorityRound":{"params":{"stepDuration":5,"validators":{"list":[]}}}}"#;
        let engine: Engine = serde_json::from_str(input).unwrap();
        assert_eq!(engine.kind(), ConsensusEngineKind::Unknown);
        assert_eq!(engine.name(), "authorityRound");
        assert_eq!(serde_json::to_string(&engine).unwrap(), input);

        let engine: Engine = serde_json::from_str(r#"{"null": {"params": {}}}"#).unwrap();
        assert_eq!(engine.kind(), ConsensusEngineKind::Unknown);
    }

    #[test]
    fn test_engine_section_shape() {
        assert!(serde_json::from_str::<Engine>("{}").is_err());
        assert!(serde_json::from_str::<Engine>(r#"{"clique": {}, "Ethash": {}}"#).is_err());
        assert!(serde_json::from_str::<Engine>(r#"{"Ethash": {"params": {"homesteadTransition": "zz"}}}"#).is_err());
    }
}
