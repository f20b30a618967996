//! Fleet CLI
//!
//! Command-line interface for inspecting a device fleet.

use anyhow::Result;
use clap::Parser;
use fleetctl::cli::{
    generate_completion, handle_config, handle_devices, handle_envs, Cli, Commands,
};
use fleetctl::client::FleetClient;
use fleetctl::config::CliConfig;
use fleetctl::format::format_error;
use tracing::debug;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let debug = cli.debug;

    init_tracing(debug);

    if let Err(e) = run(cli).await {
        eprintln!("{}", format_error(&format!("{:#}", e)));
        if debug {
            eprintln!("Error details: {:?}", e);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = match cli.config_file {
        Some(ref path) => path.clone(),
        None => CliConfig::default_path()?,
    };

    // Build configuration using priority chain: CLI args → env → file → defaults
    let mut builder = CliConfig::builder();
    if let Some(ref api_url) = cli.api_url {
        builder = builder.with_api_url(api_url)?;
    }
    builder = builder.with_env_overrides();
    if !cli.no_config {
        builder = builder.with_config_file(&config_path)?;
    }
    let config = builder.build()?;

    debug!(
        api_url = %config.api_url,
        timeout = config.timeout,
        authenticated = config.token.is_some(),
        "configuration loaded"
    );

    match cli.command {
        Commands::Completion { shell } => {
            generate_completion(shell);
            Ok(())
        }
        Commands::Config { command } => handle_config(command, &config, &config_path).await,
        Commands::Devices { command } => {
            let client = create_client(&config)?;
            handle_devices(&client, command).await
        }
        Commands::Envs(args) => {
            let client = create_client(&config)?;
            handle_envs(&client, args).await
        }
    }
}

fn create_client(config: &CliConfig) -> Result<FleetClient> {
    FleetClient::with_config(config.api_url.clone(), config.token.clone(), config.timeout)
}

/// Log to stderr so that stdout only carries command output
fn init_tracing(debug: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
