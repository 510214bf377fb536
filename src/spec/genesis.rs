// Genesis - Genesis block description of the chain spec
use crate::types::quantity::{hex_u256, hex_u64};
use crate::types::{Address, Bytes, B256, B64, U256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The `genesis` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genesis {
    #[serde(default)]
    pub seal: Seal,
    #[serde(default, with = "hex_u256")]
    pub difficulty: U256,
    #[serde(default)]
    pub author: Address,
    #[serde(default, with = "hex_u64")]
    pub timestamp: u64,
    #[serde(default)]
    pub parent_hash: B256,
    #[serde(default)]
    pub extra_data: Bytes,
    #[serde(default, with = "hex_u64")]
    pub gas_limit: u64,

    /// Keys not modelled above, written back unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Seal of the genesis block; only the ethereum (PoW) seal is modelled
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Seal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethereum: Option<EthereumSeal>,

    /// Keys not modelled above, written back unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EthereumSeal {
    pub nonce: B64,
    pub mix_hash: B256,
}

/// Seal family of the genesis block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SealingKind {
    Ethereum,
    Unknown,
}
