// Account - Genesis accounts and builtin (precompile) declarations
use crate::types::quantity::{hex_u256_opt, hex_u64_opt};
use crate::types::{BlockMap, BlockNumber, Bytes, Storage, U256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Genesis account entry of the `accounts` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default, with = "hex_u256_opt", skip_serializing_if = "Option::is_none")]
    pub balance: Option<U256>,

    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,

    #[serde(default, skip_serializing_if = "is_empty_code")]
    pub code: Bytes,

    #[serde(default, skip_serializing_if = "Storage::is_empty")]
    pub storage: Storage,

    /// Present when the account declares a precompile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builtin: Option<Builtin>,

    /// Keys not modelled above, written back unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

fn is_empty_code(code: &Bytes) -> bool {
    code.is_empty()
}

impl Account {
    /// Balance with absence read as zero
    pub fn balance_or_zero(&self) -> U256 {
        self.balance.unwrap_or_default()
    }

    /// Builtin accounts without funds only declare a precompile
    pub fn is_precompile_marker(&self) -> bool {
        self.builtin.is_some() && self.balance_or_zero().is_zero()
    }
}

/// Precompile declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Builtin {
    pub name: String,

    /// Activation of a single-pricing builtin; absent means genesis
    #[serde(default, with = "hex_u64_opt", skip_serializing_if = "Option::is_none")]
    pub activate_at: Option<BlockNumber>,

    pub pricing: BuiltinPricing,

    /// Keys not modelled above, written back unchanged
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Pricing of a builtin: one regime, or a history of regimes keyed by activation block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BuiltinPricing {
    Single(Pricing),
    Scheduled(BlockMap<PriceEntry>),
}

/// One regime of a scheduled builtin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub price: Pricing,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl PriceEntry {
    pub fn new(price: Pricing) -> Self {
        Self { price, info: None }
    }
}

/// Gas pricing shapes of precompiles
///
/// Equality is structural: two pricings match only if the variant and every
/// field agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pricing {
    #[serde(rename = "linear")]
    Linear {
        base: u64,
        #[serde(rename = "word", default)]
        per_word: u64,
    },

    #[serde(rename = "modexp")]
    ModExp { divisor: u64 },

    #[serde(rename = "alt_bn128_pairing")]
    AltBnPairing {
        base: u64,
        #[serde(rename = "pair")]
        per_pair: u64,
    },

    #[serde(rename = "alt_bn128_const_operations")]
    AltBnConstOp { price: u64 },

    #[serde(rename = "blake2_f")]
    Blake2F { gas_per_round: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pricing_json() {
        let builtin: Builtin = serde_json::from_str(
            r#"{"name": "ecrecover", "pricing": {"linear": {"base": 3000, "word": 0}}}"#,
        )
        .unwrap();
        assert_eq!(builtin.activate_at, None);
        assert_eq!(
            builtin.pricing,
            BuiltinPricing::Single(Pricing::Linear { base: 3000, per_word: 0 })
        );
    }

    #[test]
    fn test_scheduled_pricing_json() {
        let builtin: Builtin = serde_json::from_str(
            r#"{
                "name": "alt_bn128_add",
                "pricing": {
                    "0x42ae50": {"price": {"alt_bn128_const_operations": {"price": 500}}},
                    "9069000": {"info": "EIP 1108", "price": {"alt_bn128_const_operations": {"price": 150}}}
                }
            }"#,
        )
        .unwrap();
        match builtin.pricing {
            BuiltinPricing::Scheduled(map) => {
                let entries: Vec<_> = map.iter().collect();
                assert_eq!(entries.len(), 2);
                assert_eq!(*entries[0].0, 4_370_000);
                assert_eq!(entries[1].1.price, Pricing::AltBnConstOp { price: 150 });
                assert_eq!(entries[1].1.info.as_deref(), Some("EIP 1108"));
            }
            other => panic!("expected scheduled pricing, got {:?}", other),
        }
    }

    #[test]
    fn test_precompile_marker() {
        let mut account = Account {
            builtin: Some(Builtin {
                name: "identity".to_string(),
                activate_at: None,
                pricing: BuiltinPricing::Single(Pricing::Linear { base: 15, per_word: 3 }),
                extra: Default::default(),
            }),
            ..Default::default()
        };
        assert!(account.is_precompile_marker());

        account.balance = Some(U256::from(1u64));
        assert!(!account.is_precompile_marker());

        account.builtin = None;
        account.balance = Some(U256::ZERO);
        assert!(!account.is_precompile_marker());
    }
}
