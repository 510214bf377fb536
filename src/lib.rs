// Chainspec Adapter - Canonical fork schedule over Parity JSON chain specs
//
// `spec` models the document, `adapter` translates it to and from the
// format-agnostic `configurator` traits.

pub mod adapter;
pub mod configurator;
pub mod error;
pub mod spec;
pub mod types;

pub use configurator::{ChainConfigurator, EngineConfigurator, Feature, GenesisConfigurator, ProtocolConfigurator};
pub use error::ConfigError;
pub use spec::ChainSpec;

#[cfg(test)]
mod tests;
