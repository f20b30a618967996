//! Fleet CLI Library
//!
//! This library provides the core functionality for the `fleetctl` tool.
//!
//! # Public API
//!
//! The primary public API is the [`client::FleetClient`] which provides
//! programmatic access to the fleet API through the [`client::FleetApi`]
//! trait. Configuration types are also available via [`config::CliConfig`]
//! and [`config::ConfigBuilder`].
//!
//! ```no_run
//! use fleetctl::client::{FleetApi, FleetClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = FleetClient::with_config(
//!     "https://api.balena-cloud.com".to_string(),
//!     Some("my-token".to_string()),
//!     30, // timeout in seconds
//! )?;
//!
//! client.ensure_logged_in().await?;
//! for variable in client.device_env_vars("7cf02a6").await? {
//!     println!("{} = {}", variable.name, variable.value);
//! }
//! # Ok(())
//! # }
//! ```

// Internal CLI implementation - not part of public API
#[doc(hidden)]
pub mod cli;

/// HTTP client for the fleet API.
pub mod client;

/// Configuration types for the CLI tool.
pub mod config;

// Internal formatting functions - not part of public API
#[doc(hidden)]
pub mod format;

#[cfg(test)]
pub mod test_utils;
