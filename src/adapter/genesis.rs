// Genesis - GenesisConfigurator for the Parity chain spec
use super::precompile::frontier_precompile;
use crate::configurator::{AccountView, ConfigResult, GenesisConfigurator};
use crate::error::ConfigError;
use crate::spec::{ChainSpec, EthereumSeal, SealingKind};
use crate::types::{Address, Bytes, Storage, B256, B64, U256};
use tracing::debug;

impl ChainSpec {
    fn ethereum_seal_mut(&mut self) -> &mut EthereumSeal {
        self.genesis.seal.ethereum.get_or_insert_with(EthereumSeal::default)
    }
}

impl GenesisConfigurator for ChainSpec {
    fn sealing_type(&self) -> SealingKind {
        match self.genesis.seal.ethereum {
            Some(_) => SealingKind::Ethereum,
            None => SealingKind::Unknown,
        }
    }

    fn set_sealing_type(&mut self, kind: SealingKind) -> ConfigResult {
        match kind {
            SealingKind::Ethereum => {
                self.ethereum_seal_mut();
                Ok(())
            }
            SealingKind::Unknown => Err(ConfigError::unsupported("unknown genesis sealing type")),
        }
    }

    fn genesis_seal_nonce(&self) -> u64 {
        self.genesis
            .seal
            .ethereum
            .as_ref()
            .map(|seal| u64::from_be_bytes(seal.nonce.0))
            .unwrap_or(0)
    }

    fn set_genesis_seal_nonce(&mut self, nonce: u64) -> ConfigResult {
        self.ethereum_seal_mut().nonce = B64::new(nonce.to_be_bytes());
        Ok(())
    }

    fn genesis_seal_mix_hash(&self) -> B256 {
        self.genesis
            .seal
            .ethereum
            .as_ref()
            .map(|seal| seal.mix_hash)
            .unwrap_or_default()
    }

    fn set_genesis_seal_mix_hash(&mut self, hash: B256) -> ConfigResult {
        self.ethereum_seal_mut().mix_hash = hash;
        Ok(())
    }

    fn genesis_difficulty(&self) -> U256 {
        self.genesis.difficulty
    }

    fn set_genesis_difficulty(&mut self, difficulty: U256) -> ConfigResult {
        self.genesis.difficulty = difficulty;
        Ok(())
    }

    fn genesis_author(&self) -> Address {
        self.genesis.author
    }

    fn set_genesis_author(&mut self, author: Address) -> ConfigResult {
        self.genesis.author = author;
        Ok(())
    }

    fn genesis_timestamp(&self) -> u64 {
        self.genesis.timestamp
    }

    fn set_genesis_timestamp(&mut self, timestamp: u64) -> ConfigResult {
        self.genesis.timestamp = timestamp;
        Ok(())
    }

    fn genesis_parent_hash(&self) -> B256 {
        self.genesis.parent_hash
    }

    fn set_genesis_parent_hash(&mut self, hash: B256) -> ConfigResult {
        self.genesis.parent_hash = hash;
        Ok(())
    }

    fn genesis_extra_data(&self) -> Bytes {
        self.genesis.extra_data.clone()
    }

    fn set_genesis_extra_data(&mut self, data: Bytes) -> ConfigResult {
        self.genesis.extra_data = data;
        Ok(())
    }

    fn genesis_gas_limit(&self) -> u64 {
        self.genesis.gas_limit
    }

    fn set_genesis_gas_limit(&mut self, limit: u64) -> ConfigResult {
        self.genesis.gas_limit = limit;
        Ok(())
    }

    fn for_each_account<E, F>(&self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(AccountView<'_>) -> Result<(), E>,
    {
        for (address, account) in &self.accounts {
            if account.is_precompile_marker() {
                continue;
            }
            visit(AccountView {
                address,
                balance: account.balance_or_zero(),
                nonce: account.nonce.unwrap_or(0),
                code: &account.code,
                storage: &account.storage,
            })?;
        }
        Ok(())
    }

    fn update_account(
        &mut self,
        address: Address,
        balance: U256,
        nonce: u64,
        code: Bytes,
        storage: Storage,
    ) -> ConfigResult {
        let account = self.accounts.entry(address).or_default();
        account.balance = Some(balance);
        account.nonce = Some(nonce);
        account.code = code;
        account.storage = storage;
        debug!("Updated genesis account {} (balance {})", address, balance);

        if let Some(regime) = frontier_precompile(&address) {
            self.supersede_regime(regime, Some(0));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::precompile::{ECRECOVER, FRONTIER_PRECOMPILES, MODEXP};
    use crate::configurator::ProtocolConfigurator;
    use crate::spec::Pricing;

    #[test]
    fn test_sealing_type() {
        let mut spec = ChainSpec::new("test");
        assert_eq!(spec.sealing_type(), SealingKind::Unknown);
        assert!(spec.set_sealing_type(SealingKind::Unknown).unwrap_err().is_fatal());

        spec.set_sealing_type(SealingKind::Ethereum).unwrap();
        assert_eq!(spec.sealing_type(), SealingKind::Ethereum);
    }

    #[test]
    fn test_seal_nonce_round_trip() {
        let mut spec = ChainSpec::new("test");
        assert_eq!(spec.genesis_seal_nonce(), 0);

        spec.set_genesis_seal_nonce(0x42).unwrap();
        assert_eq!(spec.genesis_seal_nonce(), 0x42);
        assert_eq!(spec.sealing_type(), SealingKind::Ethereum);

        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["genesis"]["seal"]["ethereum"]["nonce"], "0x0000000000000042");
    }

    #[test]
    fn test_update_frontier_precompile() {
        let mut spec = ChainSpec::new("test");
        spec.update_account(ECRECOVER, U256::from(1u64), 0, Bytes::new(), Storage::new())
            .unwrap();

        let ecrecover = &FRONTIER_PRECOMPILES[0];
        assert_eq!(spec.find_regime(ecrecover), Some(0));
        assert_eq!(
            spec.find_precompile(&ECRECOVER, &Pricing::Linear { base: 3000, per_word: 0 }),
            Some(0)
        );
        assert_eq!(spec.accounts[&ECRECOVER].builtin.as_ref().unwrap().name, "ecrecover");
        assert_eq!(spec.accounts[&ECRECOVER].balance, Some(U256::from(1u64)));
    }

    #[test]
    fn test_update_keeps_code_and_storage() {
        let mut spec = ChainSpec::new("test");
        let address = Address::repeat_byte(0x11);
        let storage = Storage::from([(B256::with_last_byte(1), B256::with_last_byte(2))]);
        spec.update_account(address, U256::ZERO, 7, Bytes::from_static(&[0x60, 0x00]), storage.clone())
            .unwrap();

        let mut seen = Vec::new();
        spec.for_each_account(|account| {
            seen.push((*account.address, account.nonce, account.code.clone(), account.storage.clone()));
            Ok::<(), ()>(())
        })
        .unwrap();
        assert_eq!(seen, vec![(address, 7, Bytes::from_static(&[0x60, 0x00]), storage)]);
    }

    #[test]
    fn test_iteration_skips_precompile_markers() {
        let mut spec = ChainSpec::new("test");
        spec.set_eip198_transition(Some(0)).unwrap();
        spec.update_account(Address::repeat_byte(0x22), U256::ZERO, 0, Bytes::new(), Storage::new())
            .unwrap();
        assert!(spec.accounts.contains_key(&MODEXP));

        let mut count = 0;
        spec.for_each_account(|account| {
            assert_ne!(*account.address, MODEXP);
            count += 1;
            Ok::<(), ()>(())
        })
        .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_iteration_stops_on_error() {
        let mut spec = ChainSpec::new("test");
        for byte in [0x30, 0x31, 0x32] {
            spec.update_account(Address::repeat_byte(byte), U256::from(1u64), 0, Bytes::new(), Storage::new())
                .unwrap();
        }

        let mut visited = 0;
        let result = spec.for_each_account(|_| {
            visited += 1;
            if visited == 2 {
                return Err("stop");
            }
            Ok(())
        });
        assert_eq!(result, Err("stop"));
        assert_eq!(visited, 2);
    }
}
