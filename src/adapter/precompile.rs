// Precompile - Resolution of precompile activations from builtin declarations
//
// One address hosts several pricing regimes over its history, so an
// activation is looked up by address AND pricing payload, never by address
// alone.

use crate::spec::{Builtin, BuiltinPricing, ChainSpec, PriceEntry, Pricing};
use crate::types::{address, Address, BlockMap, Transition};
use tracing::debug;

/// ecrecover precompile address
pub const ECRECOVER: Address = address!("0x0000000000000000000000000000000000000001");

/// sha256 precompile address
pub const SHA256: Address = address!("0x0000000000000000000000000000000000000002");

/// ripemd160 precompile address
pub const RIPEMD160: Address = address!("0x0000000000000000000000000000000000000003");

/// identity precompile address
pub const IDENTITY: Address = address!("0x0000000000000000000000000000000000000004");

/// modexp precompile address (EIP-198)
pub const MODEXP: Address = address!("0x0000000000000000000000000000000000000005");

/// alt_bn128 addition precompile address (EIP-213)
pub const ALT_BN128_ADD: Address = address!("0x0000000000000000000000000000000000000006");

/// alt_bn128 scalar multiplication precompile address (EIP-213)
pub const ALT_BN128_MUL: Address = address!("0x0000000000000000000000000000000000000007");

/// alt_bn128 pairing precompile address (EIP-212)
pub const ALT_BN128_PAIRING: Address = address!("0x0000000000000000000000000000000000000008");

/// blake2 compression precompile address (EIP-152)
pub const BLAKE2_F: Address = address!("0x0000000000000000000000000000000000000009");

/// A precompile together with one of its pricing regimes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecompileRegime {
    pub address: Address,
    pub name: &'static str,
    pub pricing: Pricing,
}

/// Precompiles present since frontier; their pricing never changed
pub const FRONTIER_PRECOMPILES: [PrecompileRegime; 4] = [
    PrecompileRegime {
        address: ECRECOVER,
        name: "ecrecover",
        pricing: Pricing::Linear { base: 3000, per_word: 0 },
    },
    PrecompileRegime {
        address: SHA256,
        name: "sha256",
        pricing: Pricing::Linear { base: 60, per_word: 12 },
    },
    PrecompileRegime {
        address: RIPEMD160,
        name: "ripemd160",
        pricing: Pricing::Linear { base: 600, per_word: 120 },
    },
    PrecompileRegime {
        address: IDENTITY,
        name: "identity",
        pricing: Pricing::Linear { base: 15, per_word: 3 },
    },
];

pub const EIP198_MODEXP: PrecompileRegime = PrecompileRegime {
    address: MODEXP,
    name: "modexp",
    pricing: Pricing::ModExp { divisor: 20 },
};

pub const EIP152_BLAKE2_F: PrecompileRegime = PrecompileRegime {
    address: BLAKE2_F,
    name: "blake2_f",
    pricing: Pricing::Blake2F { gas_per_round: 1 },
};

pub const EIP213_ADD: PrecompileRegime = PrecompileRegime {
    address: ALT_BN128_ADD,
    name: "alt_bn128_add",
    pricing: Pricing::AltBnConstOp { price: 500 },
};

pub const EIP213_MUL: PrecompileRegime = PrecompileRegime {
    address: ALT_BN128_MUL,
    name: "alt_bn128_mul",
    pricing: Pricing::AltBnConstOp { price: 40_000 },
};

pub const EIP212_PAIRING: PrecompileRegime = PrecompileRegime {
    address: ALT_BN128_PAIRING,
    name: "alt_bn128_pairing",
    pricing: Pricing::AltBnPairing { base: 100_000, per_pair: 80_000 },
};

/// EIP-1108 repricing of the three alt_bn128 precompiles
pub const EIP1108_REPRICING: [PrecompileRegime; 3] = [
    PrecompileRegime {
        address: ALT_BN128_ADD,
        name: "alt_bn128_add",
        pricing: Pricing::AltBnConstOp { price: 150 },
    },
    PrecompileRegime {
        address: ALT_BN128_MUL,
        name: "alt_bn128_mul",
        pricing: Pricing::AltBnConstOp { price: 6_000 },
    },
    PrecompileRegime {
        address: ALT_BN128_PAIRING,
        name: "alt_bn128_pairing",
        pricing: Pricing::AltBnPairing { base: 45_000, per_pair: 34_000 },
    },
];

/// Frontier precompile living at `address`, if any
pub fn frontier_precompile(address: &Address) -> Option<&'static PrecompileRegime> {
    FRONTIER_PRECOMPILES.iter().find(|regime| regime.address == *address)
}

/// Common activation of several regimes; absent unless all agree
pub(crate) fn common_activation(activations: &[Transition]) -> Transition {
    let (first, rest) = activations.split_first()?;
    let first = (*first)?;
    rest.iter().all(|t| *t == Some(first)).then_some(first)
}

impl ChainSpec {
    /// Activation block of `pricing` at `address`
    pub fn find_precompile(&self, address: &Address, pricing: &Pricing) -> Transition {
        let builtin = self.accounts.get(address)?.builtin.as_ref()?;
        match &builtin.pricing {
            BuiltinPricing::Single(single) if single == pricing => {
                Some(builtin.activate_at.unwrap_or(0))
            }
            BuiltinPricing::Single(_) => None,
            BuiltinPricing::Scheduled(history) => history
                .iter()
                .find(|(_, entry)| entry.price == *pricing)
                .map(|(block, _)| *block),
        }
    }

    /// Declare `pricing` at `address` from `transition` onwards
    ///
    /// An absent transition writes nothing and leaves existing regimes
    /// untouched. Re-declaring a regime moves it instead of duplicating it.
    /// A block already priced by a different regime keeps that entry and the
    /// write is dropped.
    pub fn upsert_precompile(
        &mut self,
        address: Address,
        name: &str,
        transition: Transition,
        pricing: Pricing,
    ) {
        self.declare_precompile(address, name, transition, pricing, false);
    }

    /// Like `upsert_precompile`, but replaces whatever regime holds the block
    pub(crate) fn supersede_precompile(
        &mut self,
        address: Address,
        name: &str,
        transition: Transition,
        pricing: Pricing,
    ) {
        self.declare_precompile(address, name, transition, pricing, true);
    }

    fn declare_precompile(
        &mut self,
        address: Address,
        name: &str,
        transition: Transition,
        pricing: Pricing,
        supersede: bool,
    ) {
        let Some(block) = transition else {
            return;
        };

        let account = self.accounts.entry(address).or_default();
        let builtin = account.builtin.get_or_insert_with(|| Builtin {
            name: name.to_string(),
            activate_at: None,
            pricing: BuiltinPricing::Scheduled(BlockMap::default()),
            extra: Default::default(),
        });
        builtin.name = name.to_string();

        if let BuiltinPricing::Single(existing) = builtin.pricing {
            let since = builtin.activate_at.take().unwrap_or(0);
            builtin.pricing =
                BuiltinPricing::Scheduled(BlockMap::from_iter([(since, PriceEntry::new(existing))]));
        }

        if let BuiltinPricing::Scheduled(history) = &mut builtin.pricing {
            let info = history
                .iter()
                .find(|(_, entry)| entry.price == pricing)
                .and_then(|(_, entry)| entry.info.clone());
            history.retain(|_, entry| entry.price != pricing);

            if !supersede {
                if let Some(occupant) = history.get(block) {
                    debug!(
                        "Precompile {} at {}: block {} already priced {:?}, keeping it over {:?}",
                        name, address, block, occupant.price, pricing
                    );
                    return;
                }
            }

            if let Some(replaced) = history.insert(block, PriceEntry { price: pricing, info }) {
                debug!(
                    "Precompile {} at {}: {:?} replaced by {:?} at block {}",
                    name, address, replaced.price, pricing, block
                );
            } else {
                debug!("Precompile {} at {} priced {:?} from block {}", name, address, pricing, block);
            }
        }
    }

    pub(crate) fn find_regime(&self, regime: &PrecompileRegime) -> Transition {
        self.find_precompile(&regime.address, &regime.pricing)
    }

    pub(crate) fn upsert_regime(&mut self, regime: &PrecompileRegime, transition: Transition) {
        self.upsert_precompile(regime.address, regime.name, transition, regime.pricing);
    }

    pub(crate) fn supersede_regime(&mut self, regime: &PrecompileRegime, transition: Transition) {
        self.supersede_precompile(regime.address, regime.name, transition, regime.pricing);
    }
}
