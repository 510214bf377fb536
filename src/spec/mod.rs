// Spec - Parity JSON chain specification document
//
// The document is a plain serde model. All translation to and from the
// canonical fork schedule lives in the adapter module.

pub mod account;
pub mod engine;
pub mod genesis;
pub mod params;

pub use account::{Account, Builtin, BuiltinPricing, PriceEntry, Pricing};
pub use engine::{CliqueEngine, CliqueParams, ConsensusEngineKind, Engine, EthashEngine, EthashParams};
pub use genesis::{EthereumSeal, Genesis, Seal, SealingKind};
pub use params::Params;

use crate::adapter::bomb::BombMemo;
use crate::error::ConfigError;
use crate::types::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Parity chain specification
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChainSpec {
    pub name: String,

    #[serde(rename = "dataDir", default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<Engine>,

    #[serde(default)]
    pub params: Params,

    #[serde(default)]
    pub genesis: Genesis,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<String>,

    /// Ordered by address so iteration is deterministic
    #[serde(default)]
    pub accounts: BTreeMap<Address, Account>,

    /// Keys not modelled above, written back unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,

    /// Inferred bomb-schedule transitions; not part of the document
    #[serde(skip)]
    pub(crate) bomb_memo: BombMemo,
}

impl ChainSpec {
    /// Blank document for fresh authoring
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse a document and resolve its derived transitions
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let mut spec: ChainSpec = serde_json::from_str(content)?;
        spec.resolve_bomb_memo();
        debug!(
            "Loaded chain spec '{}' ({} accounts, engine {})",
            spec.name,
            spec.accounts.len(),
            spec.engine_kind()
        );
        Ok(spec)
    }

    /// Serialize with every quantity in canonical hex form
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Save to a JSON file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = self.to_json()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Kind of the configured engine section
    pub fn engine_kind(&self) -> ConsensusEngineKind {
        self.engine
            .as_ref()
            .map(Engine::kind)
            .unwrap_or(ConsensusEngineKind::Unknown)
    }

    pub(crate) fn ethash(&self) -> Option<&EthashParams> {
        match &self.engine {
            Some(Engine::Ethash(ethash)) => Some(&ethash.params),
            _ => None,
        }
    }

    pub(crate) fn clique(&self) -> Option<&CliqueParams> {
        match &self.engine {
            Some(Engine::Clique(clique)) => Some(&clique.params),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_blank_document() {
        let spec = ChainSpec::new("blank");
        assert_eq!(spec.engine_kind(), ConsensusEngineKind::Unknown);
        assert!(spec.ethash().is_none());
        assert!(spec.clique().is_none());

        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["name"], "blank");
        assert!(value.get("engine").is_none());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("spec.json");

        let mut spec = ChainSpec::new("dev");
        spec.params.network_id = Some(1337);
        spec.engine = Some(Engine::Clique(CliqueEngine::default()));
        spec.to_file(&path).unwrap();

        let loaded = ChainSpec::from_file(&path).unwrap();
        assert_eq!(loaded.name, "dev");
        assert_eq!(loaded.params.network_id, Some(1337));
        assert_eq!(loaded.engine_kind(), ConsensusEngineKind::Clique);
    }

    #[test]
    fn test_malformed_document() {
        let result = ChainSpec::from_json(r#"{"name": "bad", "params": {"networkID": "0xzz"}}"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
