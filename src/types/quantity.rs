// Quantity - Hex-or-decimal numeric encoding of Parity chain specs
//
// Parity accepts JSON numbers, decimal strings and 0x-prefixed hex strings for
// every numeric field. Values are always written back as 0x-prefixed hex.

use super::primitives::U256;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serializer};
use std::fmt;

/// Parse a quantity string: `0x`-prefixed hex or plain decimal
pub fn parse_u256(input: &str) -> Result<U256, String> {
    let trimmed = input.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some("") => Ok(U256::ZERO),
        Some(digits) => U256::from_str_radix(digits, 16),
        None => U256::from_str_radix(trimmed, 10),
    };
    parsed.map_err(|e| format!("invalid quantity {:?}: {}", input, e))
}

/// Parse a quantity string that must fit in 64 bits
pub fn parse_u64(input: &str) -> Result<u64, String> {
    let value = parse_u256(input)?;
    u64::try_from(value).map_err(|_| format!("quantity {:?} overflows u64", input))
}

/// Canonical hex form of a quantity
pub fn to_hex<T: fmt::LowerHex>(value: T) -> String {
    format!("{:#x}", value)
}

/// A numeric value decoded from any of the accepted encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantity(pub U256);

impl Quantity {
    pub fn into_u64<E: de::Error>(self) -> Result<u64, E> {
        u64::try_from(self.0).map_err(|_| E::custom(format!("quantity {} overflows u64", self.0)))
    }
}

struct QuantityVisitor;

impl<'de> Visitor<'de> for QuantityVisitor {
    type Value = Quantity;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number, a decimal string or a 0x-prefixed hex string")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Quantity, E> {
        Ok(Quantity(U256::from(value)))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Quantity, E> {
        u64::try_from(value)
            .map(|v| Quantity(U256::from(v)))
            .map_err(|_| E::custom("negative quantity"))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Quantity, E> {
        parse_u256(value).map(Quantity).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(QuantityVisitor)
    }
}

/// `#[serde(with = "hex_u64")]`
pub mod hex_u64 {
    use super::*;

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_hex(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        Quantity::deserialize(deserializer)?.into_u64()
    }
}

/// `#[serde(with = "hex_u64_opt")]`, pair with `default` and `skip_serializing_if`
pub mod hex_u64_opt {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&to_hex(*v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
        Option::<Quantity>::deserialize(deserializer)?
            .map(Quantity::into_u64)
            .transpose()
    }
}

/// `#[serde(with = "hex_u256")]`
pub mod hex_u256 {
    use super::*;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_hex(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        Ok(Quantity::deserialize(deserializer)?.0)
    }
}

/// `#[serde(with = "hex_u256_opt")]`, pair with `default` and `skip_serializing_if`
pub mod hex_u256_opt {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<U256>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&to_hex(*v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<U256>, D::Error> {
        Ok(Option::<Quantity>::deserialize(deserializer)?.map(|q| q.0))
    }
}
