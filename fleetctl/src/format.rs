//! Output formatting utilities for the CLI
//!
//! Listings are printed either as pretty JSON or as a horizontal table.

use anyhow::{Context, Result};
use colored::*;
use fleet_core::{Field, Listing};
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    /// Format selected by a `--json` flag
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }
}

/// Serialize `value` as JSON indented with four spaces
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .context("Failed to serialize JSON output")?;

    String::from_utf8(buf).context("JSON output is not valid UTF-8")
}

/// Render a listing as a horizontal table, one column per field
///
/// Fields a row does not carry are left blank.
pub fn format_table<F: Field>(listing: &Listing<F>) -> String {
    let mut builder = Builder::default();
    builder.push_record(listing.fields.iter().map(|field| field.heading()));

    for row in &listing.rows {
        builder.push_record(listing.fields.iter().map(|&field| {
            row.get(field)
                .map(|value| value.display())
                .unwrap_or_default()
        }));
    }

    builder.build().with(Style::rounded()).to_string()
}

/// Format a listing
pub fn format_listing<F: Field>(listing: &Listing<F>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json_pretty(&listing.rows),
        OutputFormat::Table => Ok(format_table(listing)),
    }
}

/// Format success message
pub fn format_success(message: &str) -> String {
    format!("{} {}", "✓".green().bold(), message)
}

/// Format an error for stderr
pub fn format_error(message: &str) -> String {
    format!("{} {}", "Error:".red().bold(), message)
}
