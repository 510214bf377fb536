// Protocol - ProtocolConfigurator for the Parity chain spec
use super::precompile::{
    common_activation, EIP1108_REPRICING, EIP152_BLAKE2_F, EIP198_MODEXP, EIP212_PAIRING, EIP213_ADD,
    EIP213_MUL,
};
use crate::configurator::{ConfigResult, ProtocolConfigurator};
use crate::error::ConfigError;
use crate::spec::ChainSpec;
use crate::types::{BlockNumber, Transition, B256};
use std::collections::BTreeMap;

/// Getter/setter pair projecting straight onto one `params` field
macro_rules! params_field {
    ($get:ident, $set:ident, $field:ident) => {
        fn $get(&self) -> Option<u64> {
            self.params.$field
        }

        fn $set(&mut self, n: Option<u64>) -> ConfigResult {
            self.params.$field = n;
            Ok(())
        }
    };
}

impl ProtocolConfigurator for ChainSpec {
    fn account_start_nonce(&self) -> Option<u64> {
        self.params.account_start_nonce
    }

    fn set_account_start_nonce(&mut self, nonce: Option<u64>) -> ConfigResult {
        let nonce = nonce.ok_or_else(|| ConfigError::unsupported("account start nonce cannot be unset"))?;
        self.params.account_start_nonce = Some(nonce);
        Ok(())
    }

    params_field!(maximum_extra_data_size, set_maximum_extra_data_size, maximum_extra_data_size);
    params_field!(min_gas_limit, set_min_gas_limit, min_gas_limit);
    params_field!(gas_limit_bound_divisor, set_gas_limit_bound_divisor, gas_limit_bound_divisor);
    params_field!(network_id, set_network_id, network_id);
    params_field!(max_code_size, set_max_code_size, max_code_size);

    fn chain_id(&self) -> Option<u64> {
        self.params.chain_id.or(self.params.network_id)
    }

    fn set_chain_id(&mut self, id: Option<u64>) -> ConfigResult {
        self.params.chain_id = id;
        Ok(())
    }

    fn eip7_transition(&self) -> Transition {
        self.ethash()?.homestead_transition
    }

    fn set_eip7_transition(&mut self, n: Transition) -> ConfigResult {
        if let Some(ethash) = self.ethash_params_mut(n.is_some()) {
            ethash.homestead_transition = n;
        }
        Ok(())
    }

    params_field!(eip150_transition, set_eip150_transition, eip150_transition);
    params_field!(eip155_transition, set_eip155_transition, eip155_transition);
    params_field!(eip160_transition, set_eip160_transition, eip160_transition);
    params_field!(eip161abc_transition, set_eip161abc_transition, eip161abc_transition);
    params_field!(eip161d_transition, set_eip161d_transition, eip161d_transition);
    params_field!(eip170_transition, set_eip170_transition, max_code_size_transition);
    params_field!(eip140_transition, set_eip140_transition, eip140_transition);
    params_field!(eip145_transition, set_eip145_transition, eip145_transition);
    params_field!(eip211_transition, set_eip211_transition, eip211_transition);
    params_field!(eip214_transition, set_eip214_transition, eip214_transition);
    params_field!(eip658_transition, set_eip658_transition, eip658_transition);
    params_field!(eip1014_transition, set_eip1014_transition, eip1014_transition);
    params_field!(eip1052_transition, set_eip1052_transition, eip1052_transition);
    params_field!(eip1283_transition, set_eip1283_transition, eip1283_transition);
    params_field!(eip1283_disable_transition, set_eip1283_disable_transition, eip1283_disable_transition);
    params_field!(eip1344_transition, set_eip1344_transition, eip1344_transition);
    params_field!(eip1884_transition, set_eip1884_transition, eip1884_transition);
    params_field!(eip2028_transition, set_eip2028_transition, eip2028_transition);
    params_field!(eip2200_transition, set_eip2200_transition, eip1283_reenable_transition);

    fn eip152_transition(&self) -> Transition {
        self.find_regime(&EIP152_BLAKE2_F)
    }

    fn set_eip152_transition(&mut self, n: Transition) -> ConfigResult {
        self.upsert_regime(&EIP152_BLAKE2_F, n);
        Ok(())
    }

    fn eip198_transition(&self) -> Transition {
        self.find_regime(&EIP198_MODEXP)
    }

    fn set_eip198_transition(&mut self, n: Transition) -> ConfigResult {
        self.upsert_regime(&EIP198_MODEXP, n);
        Ok(())
    }

    fn eip212_transition(&self) -> Transition {
        self.find_regime(&EIP212_PAIRING)
            .or_else(|| self.eip1108_transition())
    }

    fn set_eip212_transition(&mut self, n: Transition) -> ConfigResult {
        self.upsert_regime(&EIP212_PAIRING, n);
        Ok(())
    }

    fn eip213_transition(&self) -> Transition {
        match (self.find_regime(&EIP213_ADD), self.find_regime(&EIP213_MUL)) {
            (None, None) => self.eip1108_transition(),
            (Some(add), Some(mul)) if add == mul => Some(add),
            _ => None,
        }
    }

    fn set_eip213_transition(&mut self, n: Transition) -> ConfigResult {
        self.upsert_regime(&EIP213_ADD, n);
        self.upsert_regime(&EIP213_MUL, n);
        Ok(())
    }

    fn eip1108_transition(&self) -> Transition {
        common_activation(&EIP1108_REPRICING.map(|regime| self.find_regime(&regime)))
    }

    fn set_eip1108_transition(&mut self, n: Transition) -> ConfigResult {
        for regime in &EIP1108_REPRICING {
            self.supersede_regime(regime, n);
        }
        Ok(())
    }

    fn fork_canon_hash(&self, block: BlockNumber) -> Option<B256> {
        if self.params.fork_block != Some(block) {
            return None;
        }
        self.params.fork_canon_hash
    }

    fn set_fork_canon_hash(&mut self, block: BlockNumber, hash: B256) -> ConfigResult {
        self.params.fork_block = Some(block);
        self.params.fork_canon_hash = Some(hash);
        Ok(())
    }

    fn fork_canon_hashes(&self) -> BTreeMap<BlockNumber, B256> {
        match (self.params.fork_block, self.params.fork_canon_hash) {
            (Some(block), Some(hash)) => BTreeMap::from([(block, hash)]),
            _ => BTreeMap::new(),
        }
    }
}
