// Runner - Execute a validated command against one chain spec
use crate::cli::config::{Action, CommandConfig, OutputTarget};
use chainspec_adapter::configurator::{ChainConfigurator, Feature, GenesisConfigurator};
use chainspec_adapter::error::ConfigError;
use chainspec_adapter::spec::{ChainSpec, ConsensusEngineKind};
use std::fmt::Write as _;
use tracing::info;

/// Run the command with the given configuration
pub fn run_command(config: CommandConfig) -> Result<(), RunnerError> {
    let mut spec = ChainSpec::from_file(&config.spec_path)?;
    info!("Loaded {} from {}", spec.name, config.spec_path.display());

    let content = match config.action {
        Action::Inspect => render_inspect(&spec),
        Action::Accounts => render_accounts(&spec),
        Action::Normalize => spec.to_json()?,
        Action::Set { feature, block } => {
            feature.set_transition(&mut spec, block)?;
            info!("Set {} to {}", feature, describe(block));
            spec.to_json()?
        }
    };

    emit(&config.output, &content)
}

fn emit(output: &OutputTarget, content: &str) -> Result<(), RunnerError> {
    match output {
        OutputTarget::Stdout => println!("{}", content),
        OutputTarget::File(path) => {
            std::fs::write(path, content)?;
            info!("Wrote {}", path.display());
        }
    }
    Ok(())
}

fn describe(transition: Option<u64>) -> String {
    transition
        .map(|block| block.to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Human readable summary of the chain and every feature transition
pub fn render_inspect<C: ChainConfigurator>(config: &C) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Chain ID:       {}", describe(config.chain_id()));
    let _ = writeln!(out, "Network ID:     {}", describe(config.network_id()));
    let _ = writeln!(out, "Engine:         {}", config.consensus_engine_type());
    let _ = writeln!(out, "Genesis gas:    {}", config.genesis_gas_limit());
    let _ = writeln!(out, "Genesis extra:  0x{}", hex::encode(config.genesis_extra_data()));
    for (block, hash) in config.fork_canon_hashes() {
        let _ = writeln!(out, "Canon hash:     {} at {}", hash, block);
    }

    let _ = writeln!(out);
    for feature in Feature::ALL.iter().filter(|feature| !feature.is_ethash()) {
        let _ = writeln!(out, "{:<26}{}", feature.name(), describe(feature.transition(config)));
    }

    // Engine features only mean something on an Ethash chain
    if config.consensus_engine_type() == ConsensusEngineKind::Ethash {
        let _ = writeln!(out);
        for feature in Feature::ALL.iter().filter(|feature| feature.is_ethash()) {
            let _ = writeln!(out, "{:<26}{}", feature.name(), describe(feature.transition(config)));
        }
    }
    out
}

/// One line per visited genesis allocation
pub fn render_accounts<C: GenesisConfigurator>(config: &C) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = config.for_each_account(|account| {
        writeln!(
            out,
            "{} balance={} nonce={} code={}B storage={}",
            account.address,
            account.balance,
            account.nonce,
            account.code.len(),
            account.storage.len()
        )
    });
    out
}

/// Runner errors
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainspec_adapter::configurator::{EngineConfigurator, ProtocolConfigurator};
    use chainspec_adapter::types::{Address, Bytes, Storage, U256};
    use tempfile::tempdir;

    fn sample_spec() -> ChainSpec {
        let mut spec = ChainSpec::new("sample");
        spec.set_network_id(Some(61)).unwrap();
        spec.set_eip155_transition(Some(3_000_000)).unwrap();
        spec.update_account(Address::repeat_byte(0xaa), U256::from(5u64), 1, Bytes::new(), Storage::new())
            .unwrap();
        spec
    }

    #[test]
    fn test_render_inspect() {
        let report = render_inspect(&sample_spec());
        assert!(report.contains("Chain ID:       61"));
        assert!(report.contains("Engine:         unknown"));
        assert!(report.lines().any(|line| line.starts_with("eip155") && line.ends_with("3000000")));
        assert!(report.lines().any(|line| line.starts_with("eip150") && line.ends_with('-')));
        assert!(!report.contains("ethash-"));
    }

    #[test]
    fn test_render_inspect_ethash_section() {
        let mut spec = sample_spec();
        spec.set_ethash_eip649_transition(Some(4_370_000)).unwrap();

        let report = render_inspect(&spec);
        assert!(report.contains("Engine:         ethash"));
        assert!(report
            .lines()
            .any(|line| line.starts_with("ethash-eip649") && line.ends_with("4370000")));
    }

    #[test]
    fn test_render_accounts() {
        let report = render_accounts(&sample_spec());
        assert_eq!(report.lines().count(), 1);
        assert!(report.contains("balance=5 nonce=1"));
    }

    #[test]
    fn test_run_set_to_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.json");
        let output = dir.path().join("out.json");
        sample_spec().to_file(&input).unwrap();

        run_command(CommandConfig {
            spec_path: input,
            output: OutputTarget::File(output.clone()),
            action: Action::Set {
                feature: Feature::Eip1344,
                block: Some(0x8a61c8),
            },
        })
        .unwrap();

        let written = ChainSpec::from_file(&output).unwrap();
        assert_eq!(written.eip1344_transition(), Some(9_069_000));
        assert_eq!(written.eip155_transition(), Some(3_000_000));

        let raw: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(raw["params"]["eip1344Transition"], "0x8a61c8");
    }

    #[test]
    fn test_run_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = run_command(CommandConfig {
            spec_path: dir.path().join("missing.json"),
            output: OutputTarget::Stdout,
            action: Action::Normalize,
        });
        assert!(matches!(result, Err(RunnerError::Config(ConfigError::Io(_)))));
    }
}
