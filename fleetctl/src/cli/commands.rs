//! CLI command and subcommand definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Device fleet management CLI
#[derive(Parser, Debug)]
#[command(name = "fleetctl")]
#[command(version, about = "Device fleet management CLI", long_about = None)]
pub struct Cli {
    /// Fleet API URL (overrides config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Don't load config file
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Config file path (default: ~/.config/fleetctl/config.toml)
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Device commands
    Devices {
        #[command(subcommand)]
        command: DevicesCommands,
    },

    /// List the environment or config variables of an application or device
    ///
    /// The --config option lists "configuration variables", which control
    /// platform and device agent features, instead of user-defined
    /// environment variables.
    ///
    /// Service-specific variables are not supported; the listed variables
    /// apply to all services of the application or device.
    ///
    /// Examples:
    ///
    ///   fleetctl envs --application MyApp
    ///
    ///   fleetctl envs --application MyApp --config
    ///
    ///   fleetctl envs --device 7cf02a6
    Envs(EnvsArgs),

    /// Show or manage CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum DevicesCommands {
    /// List the supported device types (like 'raspberrypi3' or 'intel-nuc')
    ///
    /// The --verbose option adds extra columns/fields to the output, including
    /// the STATE column whose values are one of 'BETA', 'RELEASED' or
    /// 'DISCONTINUED'. Discontinued device types are only listed with the
    /// --discontinued option.
    ///
    /// The --json option is recommended when scripting the output of this
    /// command: it is less likely to change and represents lists and empty
    /// strings faithfully (the aliases field is a list of zero or more
    /// values).
    ///
    /// Examples:
    ///
    ///   fleetctl devices supported
    ///
    ///   fleetctl devices supported --verbose
    ///
    ///   fleetctl devices supported -vj
    Supported {
        /// Include "discontinued" device types
        #[arg(long)]
        discontinued: bool,

        /// Produce JSON output instead of tabular output
        #[arg(short, long)]
        json: bool,

        /// Add extra columns in the tabular output (ALIASES, ARCH, STATE)
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Options of the `envs` command
#[derive(Args, Debug, Clone, Default)]
pub struct EnvsArgs {
    /// Application name or numeric id
    #[arg(short, long, conflicts_with = "device")]
    pub application: Option<String>,

    /// Device UUID, full or abbreviated
    #[arg(short, long)]
    pub device: Option<String>,

    /// Show config variables
    #[arg(short, long)]
    pub config: bool,

    /// Produce JSON output instead of tabular output
    #[arg(short, long)]
    pub json: bool,

    /// Produce verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show {
        /// Produce JSON output instead of tabular output
        #[arg(short, long)]
        json: bool,
    },

    /// Set configuration value (api_url, token, timeout)
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },

    /// Reset configuration to defaults
    Reset,
}
