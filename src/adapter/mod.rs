// Adapter - Translation between the canonical fork schedule and the document
//
// The configurator traits are implemented for `ChainSpec` in the submodules:
// `protocol` for `params`, `engine` for the engine section, `genesis` for the
// genesis block and allocations.

pub mod bomb;
pub mod precompile;

mod engine;
mod genesis;
mod protocol;

use crate::spec::{ChainSpec, CliqueEngine, CliqueParams, ConsensusEngineKind, Engine, EthashEngine, EthashParams};
use tracing::warn;

impl ChainSpec {
    /// Mutable Ethash parameters
    ///
    /// A missing engine section is created when `materialize` is set. When a
    /// different engine is configured the write is dropped.
    pub(crate) fn ethash_params_mut(&mut self, materialize: bool) -> Option<&mut EthashParams> {
        if self.engine.is_none() && materialize {
            self.engine = Some(Engine::Ethash(EthashEngine::default()));
        }
        match &mut self.engine {
            Some(Engine::Ethash(ethash)) => Some(&mut ethash.params),
            Some(other) => {
                warn!("Ignoring ethash parameter write: engine is {}", other.name());
                None
            }
            None => None,
        }
    }

    /// Mutable Clique parameters, see `ethash_params_mut`
    pub(crate) fn clique_params_mut(&mut self, materialize: bool) -> Option<&mut CliqueParams> {
        if self.engine.is_none() && materialize {
            self.engine = Some(Engine::Clique(CliqueEngine::default()));
        }
        match &mut self.engine {
            Some(Engine::Clique(clique)) => Some(&mut clique.params),
            Some(other) => {
                warn!("Ignoring clique parameter write: engine is {}", other.name());
                None
            }
            None => None,
        }
    }

    /// Replace the engine section unless it already has the requested kind
    pub(crate) fn materialize_engine(&mut self, kind: ConsensusEngineKind) -> bool {
        let engine = match kind {
            ConsensusEngineKind::Ethash => Engine::Ethash(EthashEngine::default()),
            ConsensusEngineKind::Clique => Engine::Clique(CliqueEngine::default()),
            ConsensusEngineKind::Unknown => return false,
        };
        if self.engine_kind() == kind {
            return true;
        }
        self.engine = Some(engine);
        self.bomb_memo.reset();
        true
    }
}
