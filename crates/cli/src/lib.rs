use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_PATH: &str = "config/confman.yaml";

#[derive(Parser, Debug)]
#[command(name = "confman")]
#[command(about = "Configuration Manager - versioned instrument configurations and snapshots")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the REST API server
    Start {
        /// Path to the configuration file; defaults are used if it does not exist
        #[arg(short, long, env = "CONFMAN_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Override the bind host
        #[arg(long, env = "CONFMAN_HOST")]
        host: Option<String>,

        /// Override the HTTP port
        #[arg(short, long, env = "CONFMAN_PORT")]
        port: Option<u16>,
    },

    /// Validate configuration without starting the server
    Validate {
        /// Path to the configuration file
        #[arg(short, long, env = "CONFMAN_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },

    /// Write a configuration file with all defaults
    Init {
        /// Output path for the new configuration file
        #[arg(short, long, default_value = "confman.yaml")]
        output: PathBuf,

        /// Overwrite the file if it already exists
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_start_overrides() {
        let cli = Cli::try_parse_from([
            "confman", "start", "--config", "alt.yaml", "--host", "127.0.0.1", "--port", "8100",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Commands::Start {
                config: PathBuf::from("alt.yaml"),
                host: Some("127.0.0.1".to_string()),
                port: Some(8100),
            }
        );
    }

    #[test]
    fn test_init_defaults() {
        let cli = Cli::try_parse_from(["confman", "init"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Init {
                output: PathBuf::from("confman.yaml"),
                force: false,
            }
        );
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["confman", "start", "--port", "99999"]).is_err());
    }
}
