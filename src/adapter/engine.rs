// Engine - EngineConfigurator for the Parity chain spec
use super::bomb::BombUpgrade;
use crate::configurator::{ConfigResult, EngineConfigurator};
use crate::error::ConfigError;
use crate::spec::{ChainSpec, ConsensusEngineKind};
use crate::types::{address, Address, Schedule, Transition, U256};
use tracing::debug;

/// Withdrawal contract receiving the drained DAO balances
pub const DAO_REFUND_CONTRACT: Address = address!("0xbf4ed7b27f1d666546e30d74d50d173d20bca754");

/// Getter/setter pair projecting onto one Ethash parameter
macro_rules! ethash_field {
    ($get:ident, $set:ident, $field:ident, $ty:ty) => {
        fn $get(&self) -> Option<$ty> {
            self.ethash()?.$field
        }

        fn $set(&mut self, n: Option<$ty>) -> ConfigResult {
            if let Some(ethash) = self.ethash_params_mut(n.is_some()) {
                ethash.$field = n;
            }
            Ok(())
        }
    };
}

impl EngineConfigurator for ChainSpec {
    fn consensus_engine_type(&self) -> ConsensusEngineKind {
        self.engine_kind()
    }

    fn set_consensus_engine_type(&mut self, kind: ConsensusEngineKind) -> ConfigResult {
        if !self.materialize_engine(kind) {
            return Err(ConfigError::unsupported(format!("consensus engine {}", kind)));
        }
        Ok(())
    }

    ethash_field!(ethash_minimum_difficulty, set_ethash_minimum_difficulty, minimum_difficulty, U256);
    ethash_field!(
        ethash_difficulty_bound_divisor,
        set_ethash_difficulty_bound_divisor,
        difficulty_bound_divisor,
        U256
    );
    ethash_field!(ethash_duration_limit, set_ethash_duration_limit, duration_limit, U256);

    ethash_field!(ethash_homestead_transition, set_ethash_homestead_transition, homestead_transition, u64);
    ethash_field!(ethash_eip2_transition, set_ethash_eip2_transition, homestead_transition, u64);
    ethash_field!(ethash_eip100b_transition, set_ethash_eip100b_transition, eip100b_transition, u64);
    ethash_field!(
        ethash_ecip1010_pause_transition,
        set_ethash_ecip1010_pause_transition,
        ecip1010_pause_transition,
        u64
    );
    ethash_field!(
        ethash_ecip1010_continue_transition,
        set_ethash_ecip1010_continue_transition,
        ecip1010_continue_transition,
        u64
    );
    // ECIP-1017 activates after the first era, so the era length doubles as its block
    ethash_field!(ethash_ecip1017_transition, set_ethash_ecip1017_transition, ecip1017_era_rounds, u64);
    ethash_field!(ethash_ecip1017_era_rounds, set_ethash_ecip1017_era_rounds, ecip1017_era_rounds, u64);
    ethash_field!(ethash_ecip1041_transition, set_ethash_ecip1041_transition, bomb_defuse_transition, u64);

    fn ethash_eip779_transition(&self) -> Transition {
        self.ethash()?.dao_hardfork_transition
    }

    fn set_ethash_eip779_transition(&mut self, n: Transition) -> ConfigResult {
        let Some(ethash) = self.ethash_params_mut(n.is_some()) else {
            return Ok(());
        };
        ethash.dao_hardfork_transition = n;
        match n {
            Some(_) => ethash.dao_hardfork_beneficiary = Some(DAO_REFUND_CONTRACT),
            None => {
                ethash.dao_hardfork_beneficiary = None;
                ethash.dao_hardfork_accounts.clear();
            }
        }
        Ok(())
    }

    fn ethash_dao_hardfork_accounts(&self) -> Vec<Address> {
        self.ethash()
            .map(|ethash| ethash.dao_hardfork_accounts.clone())
            .unwrap_or_default()
    }

    fn set_ethash_dao_hardfork_accounts(&mut self, accounts: Vec<Address>) -> ConfigResult {
        if let Some(ethash) = self.ethash_params_mut(!accounts.is_empty()) {
            ethash.dao_hardfork_accounts = accounts;
        }
        Ok(())
    }

    fn ethash_eip649_transition(&self) -> Transition {
        self.bomb_transition(BombUpgrade::Eip649)
    }

    fn set_ethash_eip649_transition(&mut self, n: Transition) -> ConfigResult {
        self.set_bomb_transition(BombUpgrade::Eip649, n);
        Ok(())
    }

    fn ethash_eip1234_transition(&self) -> Transition {
        self.bomb_transition(BombUpgrade::Eip1234)
    }

    fn set_ethash_eip1234_transition(&mut self, n: Transition) -> ConfigResult {
        self.set_bomb_transition(BombUpgrade::Eip1234, n);
        Ok(())
    }

    fn ethash_difficulty_bomb_delay_schedule(&self) -> Option<Schedule> {
        Some(self.ethash()?.difficulty_bomb_delays.clone())
    }

    fn set_ethash_difficulty_bomb_delay_schedule(&mut self, schedule: Option<Schedule>) -> ConfigResult {
        if let Some(ethash) = self.ethash_params_mut(schedule.is_some()) {
            ethash.difficulty_bomb_delays = schedule.unwrap_or_default();
            debug!("Replaced difficulty bomb delay schedule");
            self.bomb_memo.reset();
        }
        Ok(())
    }

    fn ethash_block_reward_schedule(&self) -> Option<Schedule> {
        Some(self.ethash()?.block_reward.clone())
    }

    fn set_ethash_block_reward_schedule(&mut self, schedule: Option<Schedule>) -> ConfigResult {
        if let Some(ethash) = self.ethash_params_mut(schedule.is_some()) {
            ethash.block_reward = schedule.unwrap_or_default();
            debug!("Replaced block reward schedule");
            self.bomb_memo.reset();
        }
        Ok(())
    }

    fn clique_period(&self) -> u64 {
        self.clique().and_then(|clique| clique.period).unwrap_or(0)
    }

    fn set_clique_period(&mut self, period: u64) -> ConfigResult {
        if let Some(clique) = self.clique_params_mut(true) {
            clique.period = Some(period);
        }
        Ok(())
    }

    fn clique_epoch(&self) -> u64 {
        self.clique().and_then(|clique| clique.epoch).unwrap_or(0)
    }

    fn set_clique_epoch(&mut self, epoch: u64) -> ConfigResult {
        if let Some(clique) = self.clique_params_mut(true) {
            clique.epoch = Some(epoch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ether;

    fn ethash_spec() -> ChainSpec {
        let mut spec = ChainSpec::new("test");
        spec.set_consensus_engine_type(ConsensusEngineKind::Ethash).unwrap();
        spec
    }

    #[test]
    fn test_engine_type() {
        let mut spec = ChainSpec::new("test");
        assert_eq!(spec.consensus_engine_type(), ConsensusEngineKind::Unknown);

        spec.set_consensus_engine_type(ConsensusEngineKind::Clique).unwrap();
        assert_eq!(spec.consensus_engine_type(), ConsensusEngineKind::Clique);

        let err = spec.set_consensus_engine_type(ConsensusEngineKind::Unknown).unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(spec.consensus_engine_type(), ConsensusEngineKind::Clique);
    }

    #[test]
    fn test_homestead_aliases() {
        let mut spec = ethash_spec();
        spec.set_ethash_eip2_transition(Some(1_150_000)).unwrap();
        assert_eq!(spec.ethash_homestead_transition(), Some(1_150_000));
        assert_eq!(spec.ethash_eip2_transition(), Some(1_150_000));
    }

    #[test]
    fn test_dao_fork_writes_beneficiary() {
        let mut spec = ethash_spec();
        spec.set_ethash_eip779_transition(Some(1_920_000)).unwrap();
        spec.set_ethash_dao_hardfork_accounts(vec![Address::repeat_byte(0xd4)]).unwrap();

        let ethash = spec.ethash().unwrap();
        assert_eq!(ethash.dao_hardfork_beneficiary, Some(DAO_REFUND_CONTRACT));
        assert_eq!(spec.ethash_eip779_transition(), Some(1_920_000));
        assert_eq!(spec.ethash_dao_hardfork_accounts().len(), 1);

        spec.set_ethash_eip779_transition(None).unwrap();
        let ethash = spec.ethash().unwrap();
        assert_eq!(ethash.dao_hardfork_beneficiary, None);
        assert!(ethash.dao_hardfork_accounts.is_empty());
    }

    #[test]
    fn test_ecip1017_shares_era_rounds() {
        let mut spec = ethash_spec();
        spec.set_ethash_ecip1017_transition(Some(5_000_000)).unwrap();
        assert_eq!(spec.ethash_ecip1017_era_rounds(), Some(5_000_000));
        assert_eq!(spec.ethash().unwrap().ecip1017_era_rounds, Some(5_000_000));
    }

    #[test]
    fn test_schedules_absent_without_ethash() {
        let mut spec = ChainSpec::new("test");
        assert_eq!(spec.ethash_block_reward_schedule(), None);
        assert_eq!(spec.ethash_difficulty_bomb_delay_schedule(), None);

        spec.set_clique_period(15).unwrap();
        spec.set_ethash_block_reward_schedule(Some(Schedule::new())).unwrap();
        assert_eq!(spec.ethash_block_reward_schedule(), None);
        assert_eq!(spec.clique_period(), 15);
        assert_eq!(spec.clique_epoch(), 0);
    }

    #[test]
    fn test_bomb_write_ignored_on_clique() {
        let mut spec = ChainSpec::new("test");
        spec.set_consensus_engine_type(ConsensusEngineKind::Clique).unwrap();
        spec.set_ethash_eip649_transition(Some(100)).unwrap();
        spec.set_ethash_eip1234_transition(Some(200)).unwrap();

        assert_eq!(spec.ethash_eip649_transition(), None);
        assert_eq!(spec.ethash_eip1234_transition(), None);
        assert_eq!(spec.ethash_homestead_transition(), None);

        let reloaded = ChainSpec::from_json(&spec.to_json().unwrap()).unwrap();
        assert_eq!(reloaded.ethash_eip649_transition(), None);
        assert_eq!(reloaded.consensus_engine_type(), ConsensusEngineKind::Clique);
    }

    #[test]
    fn test_bomb_scenario_combined_block() {
        let spec_json = r#"{
            "name": "bomb",
            "engine": {"Ethash": {"params": {
                "difficultyBombDelays": {"0x4c4b40": "0x2dc6c0"},
                "blockReward": {"0x4c4b40": "0x29a2241af62c0000"}
            }}}
        }"#;
        let mut spec = ChainSpec::from_json(spec_json).unwrap();
        assert_eq!(spec.ethash_eip649_transition(), Some(5_000_000));
        assert_eq!(spec.ethash_eip1234_transition(), None);

        spec.set_ethash_eip1234_transition(Some(5_000_000)).unwrap();
        let delays = spec.ethash_difficulty_bomb_delay_schedule().unwrap();
        assert_eq!(delays.get(5_000_000), Some(U256::from(5_000_000u64)));
        assert_eq!(delays.len(), 1);

        let rewards = spec.ethash_block_reward_schedule().unwrap();
        assert_eq!(rewards.get(5_000_000), Some(ether(2)));

        assert_eq!(spec.ethash_eip649_transition(), Some(5_000_000));
        assert_eq!(spec.ethash_eip1234_transition(), Some(5_000_000));
    }

    #[test]
    fn test_bomb_either_order() {
        let expected_delays: Schedule = [(100, U256::from(3_000_000u64)), (200, U256::from(2_000_000u64))]
            .into_iter()
            .collect();

        let mut forward = ethash_spec();
        forward.set_ethash_eip649_transition(Some(100)).unwrap();
        forward.set_ethash_eip1234_transition(Some(200)).unwrap();

        let mut backward = ethash_spec();
        backward.set_ethash_eip1234_transition(Some(200)).unwrap();
        backward.set_ethash_eip649_transition(Some(100)).unwrap();

        for spec in [&forward, &backward] {
            assert_eq!(spec.ethash_difficulty_bomb_delay_schedule(), Some(expected_delays.clone()));
            let rewards = spec.ethash_block_reward_schedule().unwrap();
            assert_eq!(rewards.get(100), Some(ether(3)));
            assert_eq!(rewards.get(200), Some(ether(2)));
            assert_eq!(spec.ethash_eip649_transition(), Some(100));
            assert_eq!(spec.ethash_eip1234_transition(), Some(200));
            assert_eq!(spec.infer_bomb_transition(BombUpgrade::Eip1234), Some(200));
        }
    }

    #[test]
    fn test_bomb_transition_moved_and_unset() {
        let mut spec = ethash_spec();
        spec.set_ethash_eip649_transition(Some(100)).unwrap();
        spec.set_ethash_eip649_transition(Some(150)).unwrap();

        let delays = spec.ethash_difficulty_bomb_delay_schedule().unwrap();
        assert_eq!(delays.get(100), None);
        assert_eq!(delays.get(150), Some(U256::from(3_000_000u64)));

        spec.set_ethash_eip649_transition(None).unwrap();
        assert_eq!(spec.ethash_eip649_transition(), None);
        assert!(spec.ethash_difficulty_bomb_delay_schedule().unwrap().is_empty());
        assert!(spec.ethash_block_reward_schedule().unwrap().is_empty());
    }

    #[test]
    fn test_schedule_replacement_resets_memo() {
        let mut spec = ethash_spec();
        spec.set_ethash_eip649_transition(Some(100)).unwrap();
        spec.set_ethash_difficulty_bomb_delay_schedule(Some(Schedule::new())).unwrap();
        assert_eq!(spec.ethash_eip649_transition(), None);
    }
}
