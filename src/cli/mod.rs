// CLI - Command line interface of the chainspec tool
// Inspect, normalize and edit Parity chain spec files

pub mod config;
pub mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Chainspec - Parity chain spec adapter
#[derive(Parser, Debug)]
#[command(name = "chainspec")]
#[command(author = "Chainspec Adapter Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Read and edit Parity chain specs through a canonical fork schedule")]
#[command(long_about = r#"
Reads a Parity/OpenEthereum JSON chain spec and reports or edits it in terms
of named protocol upgrades and their activation blocks.

Show every known transition:
  chainspec inspect foundation.json

Re-emit with canonical hex quantities:
  chainspec normalize foundation.json -o normalized.json

Activate a feature at a block (hex or decimal), or clear it:
  chainspec set classic.json --feature eip155 --block 3000000
  chainspec set classic.json --feature ethash-ecip1041
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", env = "CHAINSPEC_LOG")]
    pub log_level: String,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print chain parameters and every feature transition
    Inspect(InspectCmd),

    /// Re-emit the spec in canonical encoding
    Normalize(NormalizeCmd),

    /// Set or clear one feature transition
    Set(SetCmd),

    /// List genesis allocations
    Accounts(AccountsCmd),
}

#[derive(Parser, Debug)]
pub struct InspectCmd {
    /// Chain spec file
    pub spec: PathBuf,
}

#[derive(Parser, Debug)]
pub struct NormalizeCmd {
    /// Chain spec file
    pub spec: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct SetCmd {
    /// Chain spec file
    pub spec: PathBuf,

    /// Feature name, e.g. eip155 or ethash-eip649
    #[arg(long)]
    pub feature: String,

    /// Activation block; the transition is cleared when omitted
    #[arg(long)]
    pub block: Option<String>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct AccountsCmd {
    /// Chain spec file
    pub spec: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_inspect() {
        let cli = Cli::try_parse_from(["chainspec", "inspect", "foundation.json"]).unwrap();
        match cli.command {
            Commands::Inspect(cmd) => assert_eq!(cmd.spec, PathBuf::from("foundation.json")),
            _ => panic!("Expected Inspect command"),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parse_set() {
        let cli = Cli::try_parse_from([
            "chainspec",
            "set",
            "classic.json",
            "--feature",
            "eip155",
            "--block",
            "0x2dc6c0",
            "-o",
            "out.json",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Set(cmd) => {
                assert_eq!(cmd.feature, "eip155");
                assert_eq!(cmd.block.as_deref(), Some("0x2dc6c0"));
                assert_eq!(cmd.output, Some(PathBuf::from("out.json")));
            }
            _ => panic!("Expected Set command"),
        }
    }

    #[test]
    fn test_cli_set_requires_feature() {
        assert!(Cli::try_parse_from(["chainspec", "set", "classic.json"]).is_err());
    }

    #[test]
    fn test_cli_parse_normalize() {
        let cli = Cli::try_parse_from(["chainspec", "normalize", "dev.json"]).unwrap();
        match cli.command {
            Commands::Normalize(cmd) => assert!(cmd.output.is_none()),
            _ => panic!("Expected Normalize command"),
        }
    }
}
