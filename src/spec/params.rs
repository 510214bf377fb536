// Params - Common (engine independent) parameters of the chain spec
use crate::types::quantity::hex_u64_opt;
use crate::types::{BlockNumber, B256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The `params` section
///
/// Keys the adapter does not translate are kept in `extra` so that a
/// read/write cycle does not drop them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub account_start_nonce: Option<u64>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub maximum_extra_data_size: Option<u64>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub min_gas_limit: Option<u64>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub gas_limit_bound_divisor: Option<u64>,
    #[serde(rename = "networkID", default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub network_id: Option<u64>,
    #[serde(rename = "chainID", default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub max_code_size: Option<u64>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub max_code_size_transition: Option<BlockNumber>,

    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub eip150_transition: Option<BlockNumber>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub eip160_transition: Option<BlockNumber>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub eip161abc_transition: Option<BlockNumber>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub eip161d_transition: Option<BlockNumber>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub eip155_transition: Option<BlockNumber>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub eip140_transition: Option<BlockNumber>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub eip211_transition: Option<BlockNumber>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub eip214_transition: Option<BlockNumber>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub eip658_transition: Option<BlockNumber>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub eip145_transition: Option<BlockNumber>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub eip1014_transition: Option<BlockNumber>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub eip1052_transition: Option<BlockNumber>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub eip1283_transition: Option<BlockNumber>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub eip1283_disable_transition: Option<BlockNumber>,
    /// EIP-2200 re-enables net gas metering
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub eip1283_reenable_transition: Option<BlockNumber>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub eip1344_transition: Option<BlockNumber>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub eip1884_transition: Option<BlockNumber>,
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub eip2028_transition: Option<BlockNumber>,

    /// Block whose hash is pinned by `fork_canon_hash`
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub fork_block: Option<BlockNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fork_canon_hash: Option<B256>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}
