// Configurator - Format-agnostic view of a chain configuration
//
// Callers describe a chain as "which feature activates at which block". Any
// document format implementing these traits can be read and written through
// the same calls. Getters report `None` when a fact is unset or cannot be
// inferred; setters fail only on configurations the format cannot express.

pub mod feature;

pub use feature::Feature;

use crate::error::ConfigError;
use crate::spec::{ConsensusEngineKind, SealingKind};
use crate::types::{is_forked, Address, BlockNumber, Bytes, Schedule, Storage, Transition, B256, U256};
use std::collections::BTreeMap;

/// Result of every configurator write
pub type ConfigResult = Result<(), ConfigError>;

// =============================================================================
// PROTOCOL
// =============================================================================

/// Chain parameters and engine independent protocol upgrades
pub trait ProtocolConfigurator {
    fn account_start_nonce(&self) -> Option<u64>;
    /// Fails with `UnsupportedConfig` on `None`
    fn set_account_start_nonce(&mut self, nonce: Option<u64>) -> ConfigResult;
    fn maximum_extra_data_size(&self) -> Option<u64>;
    fn set_maximum_extra_data_size(&mut self, size: Option<u64>) -> ConfigResult;
    fn min_gas_limit(&self) -> Option<u64>;
    fn set_min_gas_limit(&mut self, limit: Option<u64>) -> ConfigResult;
    fn gas_limit_bound_divisor(&self) -> Option<u64>;
    fn set_gas_limit_bound_divisor(&mut self, divisor: Option<u64>) -> ConfigResult;
    fn network_id(&self) -> Option<u64>;
    fn set_network_id(&mut self, id: Option<u64>) -> ConfigResult;
    /// Explicit chain id, falling back to the network id
    fn chain_id(&self) -> Option<u64>;
    fn set_chain_id(&mut self, id: Option<u64>) -> ConfigResult;
    fn max_code_size(&self) -> Option<u64>;
    fn set_max_code_size(&mut self, size: Option<u64>) -> ConfigResult;

    /// Homestead (DELEGATECALL)
    fn eip7_transition(&self) -> Transition;
    fn set_eip7_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip150_transition(&self) -> Transition;
    fn set_eip150_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip152_transition(&self) -> Transition;
    fn set_eip152_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip155_transition(&self) -> Transition;
    fn set_eip155_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip160_transition(&self) -> Transition;
    fn set_eip160_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip161abc_transition(&self) -> Transition;
    fn set_eip161abc_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip161d_transition(&self) -> Transition;
    fn set_eip161d_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip170_transition(&self) -> Transition;
    fn set_eip170_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip140_transition(&self) -> Transition;
    fn set_eip140_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip145_transition(&self) -> Transition;
    fn set_eip145_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip198_transition(&self) -> Transition;
    fn set_eip198_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip211_transition(&self) -> Transition;
    fn set_eip211_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip212_transition(&self) -> Transition;
    fn set_eip212_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip213_transition(&self) -> Transition;
    fn set_eip213_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip214_transition(&self) -> Transition;
    fn set_eip214_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip658_transition(&self) -> Transition;
    fn set_eip658_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip1014_transition(&self) -> Transition;
    fn set_eip1014_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip1052_transition(&self) -> Transition;
    fn set_eip1052_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip1108_transition(&self) -> Transition;
    fn set_eip1108_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip1283_transition(&self) -> Transition;
    fn set_eip1283_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip1283_disable_transition(&self) -> Transition;
    fn set_eip1283_disable_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip1344_transition(&self) -> Transition;
    fn set_eip1344_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip1884_transition(&self) -> Transition;
    fn set_eip1884_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip2028_transition(&self) -> Transition;
    fn set_eip2028_transition(&mut self, n: Transition) -> ConfigResult;
    fn eip2200_transition(&self) -> Transition;
    fn set_eip2200_transition(&mut self, n: Transition) -> ConfigResult;

    /// Canonical hash pinned at `block`, if any
    fn fork_canon_hash(&self, block: BlockNumber) -> Option<B256>;
    fn set_fork_canon_hash(&mut self, block: BlockNumber, hash: B256) -> ConfigResult;
    fn fork_canon_hashes(&self) -> BTreeMap<BlockNumber, B256>;

    /// Whether the transition reported by `transition` is active at `block`
    fn is_forked<F>(&self, transition: F, block: Option<BlockNumber>) -> bool
    where
        F: Fn(&Self) -> Transition,
        Self: Sized,
    {
        is_forked(transition(self), block)
    }
}

// =============================================================================
// ENGINE
// =============================================================================

/// Consensus engine parameters
pub trait EngineConfigurator {
    fn consensus_engine_type(&self) -> ConsensusEngineKind;
    /// Fails with `UnsupportedConfig` for `Unknown`
    fn set_consensus_engine_type(&mut self, kind: ConsensusEngineKind) -> ConfigResult;

    fn ethash_minimum_difficulty(&self) -> Option<U256>;
    fn set_ethash_minimum_difficulty(&mut self, n: Option<U256>) -> ConfigResult;
    fn ethash_difficulty_bound_divisor(&self) -> Option<U256>;
    fn set_ethash_difficulty_bound_divisor(&mut self, n: Option<U256>) -> ConfigResult;
    fn ethash_duration_limit(&self) -> Option<U256>;
    fn set_ethash_duration_limit(&mut self, n: Option<U256>) -> ConfigResult;

    fn ethash_homestead_transition(&self) -> Transition;
    fn set_ethash_homestead_transition(&mut self, n: Transition) -> ConfigResult;
    fn ethash_eip2_transition(&self) -> Transition;
    fn set_ethash_eip2_transition(&mut self, n: Transition) -> ConfigResult;
    /// DAO hard fork
    fn ethash_eip779_transition(&self) -> Transition;
    fn set_ethash_eip779_transition(&mut self, n: Transition) -> ConfigResult;
    fn ethash_dao_hardfork_accounts(&self) -> Vec<Address>;
    fn set_ethash_dao_hardfork_accounts(&mut self, accounts: Vec<Address>) -> ConfigResult;
    fn ethash_eip649_transition(&self) -> Transition;
    fn set_ethash_eip649_transition(&mut self, n: Transition) -> ConfigResult;
    fn ethash_eip1234_transition(&self) -> Transition;
    fn set_ethash_eip1234_transition(&mut self, n: Transition) -> ConfigResult;
    fn ethash_eip100b_transition(&self) -> Transition;
    fn set_ethash_eip100b_transition(&mut self, n: Transition) -> ConfigResult;
    fn ethash_ecip1010_pause_transition(&self) -> Transition;
    fn set_ethash_ecip1010_pause_transition(&mut self, n: Transition) -> ConfigResult;
    fn ethash_ecip1010_continue_transition(&self) -> Transition;
    fn set_ethash_ecip1010_continue_transition(&mut self, n: Transition) -> ConfigResult;
    fn ethash_ecip1017_transition(&self) -> Transition;
    fn set_ethash_ecip1017_transition(&mut self, n: Transition) -> ConfigResult;
    fn ethash_ecip1017_era_rounds(&self) -> Option<u64>;
    fn set_ethash_ecip1017_era_rounds(&mut self, rounds: Option<u64>) -> ConfigResult;
    /// Difficulty bomb defused
    fn ethash_ecip1041_transition(&self) -> Transition;
    fn set_ethash_ecip1041_transition(&mut self, n: Transition) -> ConfigResult;

    /// `None` unless Ethash is configured
    fn ethash_difficulty_bomb_delay_schedule(&self) -> Option<Schedule>;
    fn set_ethash_difficulty_bomb_delay_schedule(&mut self, schedule: Option<Schedule>) -> ConfigResult;
    /// `None` unless Ethash is configured
    fn ethash_block_reward_schedule(&self) -> Option<Schedule>;
    fn set_ethash_block_reward_schedule(&mut self, schedule: Option<Schedule>) -> ConfigResult;

    /// Zero when unset
    fn clique_period(&self) -> u64;
    fn set_clique_period(&mut self, period: u64) -> ConfigResult;
    /// Zero when unset
    fn clique_epoch(&self) -> u64;
    fn set_clique_epoch(&mut self, epoch: u64) -> ConfigResult;
}

// =============================================================================
// GENESIS
// =============================================================================

/// One genesis allocation as seen by `for_each_account`
#[derive(Debug, Clone, Copy)]
pub struct AccountView<'a> {
    pub address: &'a Address,
    pub balance: U256,
    pub nonce: u64,
    pub code: &'a Bytes,
    pub storage: &'a Storage,
}

/// Genesis block and allocations
pub trait GenesisConfigurator {
    fn sealing_type(&self) -> SealingKind;
    /// Fails with `UnsupportedConfig` for anything but `Ethereum`
    fn set_sealing_type(&mut self, kind: SealingKind) -> ConfigResult;
    fn genesis_seal_nonce(&self) -> u64;
    fn set_genesis_seal_nonce(&mut self, nonce: u64) -> ConfigResult;
    fn genesis_seal_mix_hash(&self) -> B256;
    fn set_genesis_seal_mix_hash(&mut self, hash: B256) -> ConfigResult;

    fn genesis_difficulty(&self) -> U256;
    fn set_genesis_difficulty(&mut self, difficulty: U256) -> ConfigResult;
    fn genesis_author(&self) -> Address;
    fn set_genesis_author(&mut self, author: Address) -> ConfigResult;
    fn genesis_timestamp(&self) -> u64;
    fn set_genesis_timestamp(&mut self, timestamp: u64) -> ConfigResult;
    fn genesis_parent_hash(&self) -> B256;
    fn set_genesis_parent_hash(&mut self, hash: B256) -> ConfigResult;
    fn genesis_extra_data(&self) -> Bytes;
    fn set_genesis_extra_data(&mut self, data: Bytes) -> ConfigResult;
    fn genesis_gas_limit(&self) -> u64;
    fn set_genesis_gas_limit(&mut self, limit: u64) -> ConfigResult;

    /// Visit every funded or plain allocation in address order
    ///
    /// Precompile declarations without balance are skipped. The first error
    /// returned by `visit` stops the walk.
    fn for_each_account<E, F>(&self, visit: F) -> Result<(), E>
    where
        F: FnMut(AccountView<'_>) -> Result<(), E>;

    /// Create or overwrite an allocation
    fn update_account(
        &mut self,
        address: Address,
        balance: U256,
        nonce: u64,
        code: Bytes,
        storage: Storage,
    ) -> ConfigResult;
}

/// Complete chain configuration
pub trait ChainConfigurator: ProtocolConfigurator + EngineConfigurator + GenesisConfigurator {}

impl<T> ChainConfigurator for T where T: ProtocolConfigurator + EngineConfigurator + GenesisConfigurator {}
