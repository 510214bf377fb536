// CLI Configuration - Convert CLI args to a validated command
use crate::cli::Commands;
use chainspec_adapter::configurator::feature::UnknownFeature;
use chainspec_adapter::configurator::Feature;
use chainspec_adapter::types::quantity::parse_u64;
use chainspec_adapter::types::Transition;
use std::path::{Path, PathBuf};

/// Where command output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

/// What to do with the loaded spec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Inspect,
    Normalize,
    Set { feature: Feature, block: Transition },
    Accounts,
}

/// Complete command configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct CommandConfig {
    /// Chain spec to load
    pub spec_path: PathBuf,
    pub output: OutputTarget,
    pub action: Action,
}

impl CommandConfig {
    /// Validate the command line and resolve its paths
    pub fn from_cli(command: &Commands) -> Result<Self, CliConfigError> {
        let (spec_path, output, action) = match command {
            Commands::Inspect(cmd) => (&cmd.spec, None, Action::Inspect),
            Commands::Normalize(cmd) => (&cmd.spec, cmd.output.as_ref(), Action::Normalize),
            Commands::Set(cmd) => {
                let feature: Feature = cmd.feature.parse()?;
                let block = cmd
                    .block
                    .as_deref()
                    .map(Self::parse_block)
                    .transpose()?;
                (&cmd.spec, cmd.output.as_ref(), Action::Set { feature, block })
            }
            Commands::Accounts(cmd) => (&cmd.spec, None, Action::Accounts),
        };

        Ok(Self {
            spec_path: Self::resolve_spec(spec_path)?,
            output: output
                .map(|path| OutputTarget::File(path.clone()))
                .unwrap_or(OutputTarget::Stdout),
            action,
        })
    }

    fn resolve_spec(path: &Path) -> Result<PathBuf, CliConfigError> {
        if !path.is_file() {
            return Err(CliConfigError::SpecNotFound(path.display().to_string()));
        }
        Ok(path.to_path_buf())
    }

    /// Block numbers are accepted in hex or decimal
    fn parse_block(input: &str) -> Result<u64, CliConfigError> {
        parse_u64(input).map_err(|_| CliConfigError::InvalidBlock(input.to_string()))
    }
}

/// Command line configuration errors
#[derive(Debug, thiserror::Error)]
pub enum CliConfigError {
    #[error("Chain spec not found: {0}")]
    SpecNotFound(String),

    #[error(transparent)]
    UnknownFeature(#[from] UnknownFeature),

    #[error("Invalid block number: {0}")]
    InvalidBlock(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{InspectCmd, SetCmd};
    use tempfile::NamedTempFile;

    fn set_cmd(spec: PathBuf, feature: &str, block: Option<&str>) -> Commands {
        Commands::Set(SetCmd {
            spec,
            feature: feature.to_string(),
            block: block.map(str::to_string),
            output: None,
        })
    }

    #[test]
    fn test_config_from_inspect() {
        let file = NamedTempFile::new().unwrap();
        let command = Commands::Inspect(InspectCmd {
            spec: file.path().to_path_buf(),
        });

        let config = CommandConfig::from_cli(&command).unwrap();
        assert_eq!(config.action, Action::Inspect);
        assert_eq!(config.output, OutputTarget::Stdout);
        assert_eq!(config.spec_path, file.path());
    }

    #[test]
    fn test_config_from_set() {
        let file = NamedTempFile::new().unwrap();

        let config = CommandConfig::from_cli(&set_cmd(file.path().to_path_buf(), "eip155", Some("0x2dc6c0"))).unwrap();
        assert_eq!(
            config.action,
            Action::Set {
                feature: Feature::Eip155,
                block: Some(3_000_000)
            }
        );

        let config = CommandConfig::from_cli(&set_cmd(file.path().to_path_buf(), "ethash-ecip1041", None)).unwrap();
        assert_eq!(
            config.action,
            Action::Set {
                feature: Feature::EthashEcip1041,
                block: None
            }
        );
    }

    #[test]
    fn test_invalid_set_arguments() {
        let file = NamedTempFile::new().unwrap();

        let result = CommandConfig::from_cli(&set_cmd(file.path().to_path_buf(), "eip9999", Some("1")));
        assert!(matches!(result, Err(CliConfigError::UnknownFeature(_))));

        let result = CommandConfig::from_cli(&set_cmd(file.path().to_path_buf(), "eip155", Some("soon")));
        assert!(matches!(result, Err(CliConfigError::InvalidBlock(_))));
    }

    #[test]
    fn test_missing_spec() {
        let command = Commands::Inspect(InspectCmd {
            spec: PathBuf::from("/nonexistent/spec.json"),
        });
        assert!(matches!(
            CommandConfig::from_cli(&command),
            Err(CliConfigError::SpecNotFound(_))
        ));
    }
}
