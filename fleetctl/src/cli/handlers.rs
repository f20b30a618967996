//! Command execution handlers

use anyhow::Result;
use fleet_core::env_vars::{resource_name, scope_filter};
use fleet_core::{
    supported_device_types, variable_listing, EnvironmentVariable, Scope, SupportedOptions,
    VariableKind,
};
use std::path::Path;
use tracing::debug;

use crate::client::FleetApi;
use crate::config::CliConfig;
use crate::format::{format_listing, format_success, to_json_pretty, OutputFormat};

use super::commands::*;

/// Handle device commands
pub async fn handle_devices<A: FleetApi + ?Sized>(api: &A, command: DevicesCommands) -> Result<()> {
    match command {
        DevicesCommands::Supported {
            discontinued,
            json,
            verbose,
        } => {
            let options = SupportedOptions {
                discontinued,
                json,
                verbose,
            };
            println!("{}", supported_output(api, &options).await?);
        }
    }

    Ok(())
}

/// Fetch, filter and format the supported device types
pub async fn supported_output<A: FleetApi + ?Sized>(
    api: &A,
    options: &SupportedOptions,
) -> Result<String> {
    let device_types = api.list_device_types().await?;
    debug!(count = device_types.len(), ?options, "fetched device types");

    let listing = supported_device_types(device_types, options);
    format_listing(&listing, OutputFormat::from_json_flag(options.json))
}

/// Handle envs command
pub async fn handle_envs<A: FleetApi + ?Sized>(api: &A, args: EnvsArgs) -> Result<()> {
    println!("{}", envs_output(api, &args).await?);
    Ok(())
}

/// Resolve the scope, fetch its variables and format them
///
/// The scope is checked before anything is sent to the API.
pub async fn envs_output<A: FleetApi + ?Sized>(api: &A, args: &EnvsArgs) -> Result<String> {
    let scope = Scope::from_flags(args.application.clone(), args.device.clone())?;
    let kind = VariableKind::from_config_flag(args.config);

    api.ensure_logged_in().await?;

    let variables = fetch_variables(api, &scope, kind).await?;
    let listing = variable_listing(&variables)?;

    format_listing(&listing, OutputFormat::from_json_flag(args.json))
}

/// Read the variables of `scope` through the matching API operation
pub async fn fetch_variables<A: FleetApi + ?Sized>(
    api: &A,
    scope: &Scope,
    kind: VariableKind,
) -> Result<Vec<EnvironmentVariable>> {
    debug!(
        %scope,
        resource = resource_name(scope, kind),
        filter = %scope_filter(scope),
        "fetching variables"
    );

    let variables = match (scope, kind) {
        (Scope::Application(app), VariableKind::Environment) => {
            api.application_env_vars(app).await?
        }
        (Scope::Application(app), VariableKind::Config) => api.application_config_vars(app).await?,
        (Scope::Device(uuid), VariableKind::Environment) => api.device_env_vars(uuid).await?,
        (Scope::Device(uuid), VariableKind::Config) => api.device_config_vars(uuid).await?,
    };

    debug!(count = variables.len(), "fetched variables");
    Ok(variables)
}

/// Handle config commands
pub async fn handle_config(
    command: ConfigCommands,
    current_config: &CliConfig,
    config_path: &Path,
) -> Result<()> {
    match command {
        ConfigCommands::Show { json } => {
            let mut shown = current_config.clone();
            shown.token = current_config.masked_token();

            match OutputFormat::from_json_flag(json) {
                OutputFormat::Json => {
                    println!("{}", to_json_pretty(&shown)?);
                }
                OutputFormat::Table => {
                    println!("CLI Configuration ({}):", config_path.display());
                    println!("{:<20} Value", "Setting");
                    println!("{}", "-".repeat(40));
                    println!("{:<20} {}", "API URL", shown.api_url);
                    println!(
                        "{:<20} {}",
                        "Token",
                        shown.token.as_deref().unwrap_or("(not set)")
                    );
                    println!("{:<20} {}s", "Timeout", shown.timeout);
                }
            }
        }
        ConfigCommands::Set { key, value } => {
            let config = apply_setting(config_path, &key, &value)?;
            config.save_to(config_path)?;

            let shown = if key == "token" {
                config.masked_token().unwrap_or_default()
            } else {
                value
            };
            println!("{}", format_success(&format!("Set {} = {}", key, shown)));
        }
        ConfigCommands::Reset => {
            CliConfig::default().save_to(config_path)?;
            println!("{}", format_success("Configuration reset to defaults"));
        }
    }

    Ok(())
}

/// Apply a `config set` key/value pair on top of the stored configuration
fn apply_setting(config_path: &Path, key: &str, value: &str) -> Result<CliConfig> {
    let builder = CliConfig::builder();
    let builder = match key {
        "api_url" => builder.with_api_url(value)?,
        "token" => builder.with_token(value.trim()),
        "timeout" => {
            let timeout = value
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid timeout value. Must be a number"))?;
            builder.with_timeout(timeout)?
        }
        _ => return Err(anyhow::anyhow!("Unknown config key: {}", key)),
    };

    builder.with_config_file(config_path)?.build()
}

/// Generate shell completion script
pub fn generate_completion(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
