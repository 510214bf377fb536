// Feature - Registry of every named upgrade with a configurable transition
use super::{ChainConfigurator, ConfigResult};
use crate::types::Transition;
use std::fmt;
use std::str::FromStr;

/// Feature name not present in the registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown feature: {0}")]
pub struct UnknownFeature(pub String);

/// A protocol or engine upgrade addressed by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Homestead DELEGATECALL
    Eip7,
    Eip150,
    /// blake2 compression precompile
    Eip152,
    Eip155,
    Eip160,
    Eip161abc,
    Eip161d,
    /// Contract code size limit
    Eip170,
    Eip140,
    Eip145,
    /// modexp precompile
    Eip198,
    Eip211,
    /// alt_bn128 pairing precompile
    Eip212,
    /// alt_bn128 addition and multiplication precompiles
    Eip213,
    Eip214,
    Eip658,
    Eip1014,
    Eip1052,
    /// alt_bn128 repricing
    Eip1108,
    Eip1283,
    Eip1283Disable,
    Eip1344,
    Eip1884,
    Eip2028,
    Eip2200,

    EthashHomestead,
    EthashEip2,
    /// DAO hard fork
    EthashEip779,
    /// Byzantium bomb delay and reward reduction
    EthashEip649,
    /// Constantinople bomb delay and reward reduction
    EthashEip1234,
    EthashEip100b,
    EthashEcip1010Pause,
    EthashEcip1010Continue,
    EthashEcip1017,
    /// Difficulty bomb removal
    EthashEcip1041,
}

impl Feature {
    pub const ALL: [Feature; 35] = [
        Feature::Eip7,
        Feature::Eip150,
        Feature::Eip152,
        Feature::Eip155,
        Feature::Eip160,
        Feature::Eip161abc,
        Feature::Eip161d,
        Feature::Eip170,
        Feature::Eip140,
        Feature::Eip145,
        Feature::Eip198,
        Feature::Eip211,
        Feature::Eip212,
        Feature::Eip213,
        Feature::Eip214,
        Feature::Eip658,
        Feature::Eip1014,
        Feature::Eip1052,
        Feature::Eip1108,
        Feature::Eip1283,
        Feature::Eip1283Disable,
        Feature::Eip1344,
        Feature::Eip1884,
        Feature::Eip2028,
        Feature::Eip2200,
        Feature::EthashHomestead,
        Feature::EthashEip2,
        Feature::EthashEip779,
        Feature::EthashEip649,
        Feature::EthashEip1234,
        Feature::EthashEip100b,
        Feature::EthashEcip1010Pause,
        Feature::EthashEcip1010Continue,
        Feature::EthashEcip1017,
        Feature::EthashEcip1041,
    ];

    /// Command line name
    pub fn name(self) -> &'static str {
        match self {
            Feature::Eip7 => "eip7",
            Feature::Eip150 => "eip150",
            Feature::Eip152 => "eip152",
            Feature::Eip155 => "eip155",
            Feature::Eip160 => "eip160",
            Feature::Eip161abc => "eip161abc",
            Feature::Eip161d => "eip161d",
            Feature::Eip170 => "eip170",
            Feature::Eip140 => "eip140",
            Feature::Eip145 => "eip145",
            Feature::Eip198 => "eip198",
            Feature::Eip211 => "eip211",
            Feature::Eip212 => "eip212",
            Feature::Eip213 => "eip213",
            Feature::Eip214 => "eip214",
            Feature::Eip658 => "eip658",
            Feature::Eip1014 => "eip1014",
            Feature::Eip1052 => "eip1052",
            Feature::Eip1108 => "eip1108",
            Feature::Eip1283 => "eip1283",
            Feature::Eip1283Disable => "eip1283-disable",
            Feature::Eip1344 => "eip1344",
            Feature::Eip1884 => "eip1884",
            Feature::Eip2028 => "eip2028",
            Feature::Eip2200 => "eip2200",
            Feature::EthashHomestead => "ethash-homestead",
            Feature::EthashEip2 => "ethash-eip2",
            Feature::EthashEip779 => "ethash-eip779",
            Feature::EthashEip649 => "ethash-eip649",
            Feature::EthashEip1234 => "ethash-eip1234",
            Feature::EthashEip100b => "ethash-eip100b",
            Feature::EthashEcip1010Pause => "ethash-ecip1010-pause",
            Feature::EthashEcip1010Continue => "ethash-ecip1010-continue",
            Feature::EthashEcip1017 => "ethash-ecip1017",
            Feature::EthashEcip1041 => "ethash-ecip1041",
        }
    }

    /// Whether the feature lives in the Ethash engine section
    pub fn is_ethash(self) -> bool {
        self.name().starts_with("ethash-")
    }

    pub fn transition<C: ChainConfigurator>(self, config: &C) -> Transition {
        match self {
            Feature::Eip7 => config.eip7_transition(),
            Feature::Eip150 => config.eip150_transition(),
            Feature::Eip152 => config.eip152_transition(),
            Feature::Eip155 => config.eip155_transition(),
            Feature::Eip160 => config.eip160_transition(),
            Feature::Eip161abc => config.eip161abc_transition(),
            Feature::Eip161d => config.eip161d_transition(),
            Feature::Eip170 => config.eip170_transition(),
            Feature::Eip140 => config.eip140_transition(),
            Feature::Eip145 => config.eip145_transition(),
            Feature::Eip198 => config.eip198_transition(),
            Feature::Eip211 => config.eip211_transition(),
            Feature::Eip212 => config.eip212_transition(),
            Feature::Eip213 => config.eip213_transition(),
            Feature::Eip214 => config.eip214_transition(),
            Feature::Eip658 => config.eip658_transition(),
            Feature::Eip1014 => config.eip1014_transition(),
            Feature::Eip1052 => config.eip1052_transition(),
            Feature::Eip1108 => config.eip1108_transition(),
            Feature::Eip1283 => config.eip1283_transition(),
            Feature::Eip1283Disable => config.eip1283_disable_transition(),
            Feature::Eip1344 => config.eip1344_transition(),
            Feature::Eip1884 => config.eip1884_transition(),
            Feature::Eip2028 => config.eip2028_transition(),
            Feature::Eip2200 => config.eip2200_transition(),
            Feature::EthashHomestead => config.ethash_homestead_transition(),
            Feature::EthashEip2 => config.ethash_eip2_transition(),
            Feature::EthashEip779 => config.ethash_eip779_transition(),
            Feature::EthashEip649 => config.ethash_eip649_transition(),
            Feature::EthashEip1234 => config.ethash_eip1234_transition(),
            Feature::EthashEip100b => config.ethash_eip100b_transition(),
            Feature::EthashEcip1010Pause => config.ethash_ecip1010_pause_transition(),
            Feature::EthashEcip1010Continue => config.ethash_ecip1010_continue_transition(),
            Feature::EthashEcip1017 => config.ethash_ecip1017_transition(),
            Feature::EthashEcip1041 => config.ethash_ecip1041_transition(),
        }
    }

    pub fn set_transition<C: ChainConfigurator>(self, config: &mut C, n: Transition) -> ConfigResult {
        match self {
            Feature::Eip7 => config.set_eip7_transition(n),
            Feature::Eip150 => config.set_eip150_transition(n),
            Feature::Eip152 => config.set_eip152_transition(n),
            Feature::Eip155 => config.set_eip155_transition(n),
            Feature::Eip160 => config.set_eip160_transition(n),
            Feature::Eip161abc => config.set_eip161abc_transition(n),
            Feature::Eip161d => config.set_eip161d_transition(n),
            Feature::Eip170 => config.set_eip170_transition(n),
            Feature::Eip140 => config.set_eip140_transition(n),
            Feature::Eip145 => config.set_eip145_transition(n),
            Feature::Eip198 => config.set_eip198_transition(n),
            Feature::Eip211 => config.set_eip211_transition(n),
            Feature::Eip212 => config.set_eip212_transition(n),
            Feature::Eip213 => config.set_eip213_transition(n),
            Feature::Eip214 => config.set_eip214_transition(n),
            Feature::Eip658 => config.set_eip658_transition(n),
            Feature::Eip1014 => config.set_eip1014_transition(n),
            Feature::Eip1052 => config.set_eip1052_transition(n),
            Feature::Eip1108 => config.set_eip1108_transition(n),
            Feature::Eip1283 => config.set_eip1283_transition(n),
            Feature::Eip1283Disable => config.set_eip1283_disable_transition(n),
            Feature::Eip1344 => config.set_eip1344_transition(n),
            Feature::Eip1884 => config.set_eip1884_transition(n),
            Feature::Eip2028 => config.set_eip2028_transition(n),
            Feature::Eip2200 => config.set_eip2200_transition(n),
            Feature::EthashHomestead => config.set_ethash_homestead_transition(n),
            Feature::EthashEip2 => config.set_ethash_eip2_transition(n),
            Feature::EthashEip779 => config.set_ethash_eip779_transition(n),
            Feature::EthashEip649 => config.set_ethash_eip649_transition(n),
            Feature::EthashEip1234 => config.set_ethash_eip1234_transition(n),
            Feature::EthashEip100b => config.set_ethash_eip100b_transition(n),
            Feature::EthashEcip1010Pause => config.set_ethash_ecip1010_pause_transition(n),
            Feature::EthashEcip1010Continue => config.set_ethash_ecip1010_continue_transition(n),
            Feature::EthashEcip1017 => config.set_ethash_ecip1017_transition(n),
            Feature::EthashEcip1041 => config.set_ethash_ecip1041_transition(n),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Feature {
    type Err = UnknownFeature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Feature::ALL
            .iter()
            .copied()
            .find(|feature| feature.name() == wanted)
            .ok_or_else(|| UnknownFeature(s.to_string()))
    }
}
