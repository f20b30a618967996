//! Environment and configuration variable selection
//!
//! A variable listing is selected by two independent choices: the scope
//! (application or device) and the kind (plain environment variable or
//! configuration variable). Each combination maps to its own remote
//! resource.

use crate::error::{FleetError, Result};
use crate::projection::{Field, FieldValue, Listing, Record};
use crate::types::EnvironmentVariable;
use std::fmt;

/// Which entity a variable set belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// An application, by name or numeric id
    Application(String),
    /// A single device, by full or abbreviated UUID
    Device(String),
}

impl Scope {
    /// Resolve the mutually exclusive `--application` / `--device` flags
    pub fn from_flags(application: Option<String>, device: Option<String>) -> Result<Self> {
        match (application, device) {
            (Some(application), _) => Ok(Scope::Application(application)),
            (None, Some(device)) => Ok(Scope::Device(device)),
            (None, None) => Err(FleetError::MissingScope),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Application(id) => write!(f, "application {}", id),
            Scope::Device(id) => write!(f, "device {}", id),
        }
    }
}

/// Plain environment variables or reserved configuration variables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Environment,
    Config,
}

impl VariableKind {
    /// Kind selected by the `--config` flag
    pub fn from_config_flag(config: bool) -> Self {
        if config {
            VariableKind::Config
        } else {
            VariableKind::Environment
        }
    }
}

pub const APPLICATION_ENV_RESOURCE: &str = "application_environment_variable";
pub const APPLICATION_CONFIG_RESOURCE: &str = "application_config_variable";
pub const DEVICE_ENV_RESOURCE: &str = "device_environment_variable";
pub const DEVICE_CONFIG_RESOURCE: &str = "device_config_variable";

/// Remote resource holding the variables of a scope and variable kind
pub fn resource_name(scope: &Scope, kind: VariableKind) -> &'static str {
    match (scope, kind) {
        (Scope::Application(_), VariableKind::Environment) => APPLICATION_ENV_RESOURCE,
        (Scope::Application(_), VariableKind::Config) => APPLICATION_CONFIG_RESOURCE,
        (Scope::Device(_), VariableKind::Environment) => DEVICE_ENV_RESOURCE,
        (Scope::Device(_), VariableKind::Config) => DEVICE_CONFIG_RESOURCE,
    }
}

/// Length of a full device UUID, short and long form
const DEVICE_UUID_LENGTHS: [usize; 2] = [32, 62];

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Query filter selecting an application's variables
///
/// A numeric identifier selects by id, anything else by application name.
pub fn application_filter(application: &str) -> String {
    if !application.is_empty() && application.chars().all(|c| c.is_ascii_digit()) {
        format!("application eq {}", application)
    } else {
        format!("application/app_name eq {}", quote(application))
    }
}

/// Query filter selecting a device's variables
///
/// Abbreviated UUIDs match by prefix.
pub fn device_filter(uuid: &str) -> String {
    if DEVICE_UUID_LENGTHS.contains(&uuid.len()) {
        format!("device/uuid eq {}", quote(uuid))
    } else {
        format!("startswith(device/uuid,{})", quote(uuid))
    }
}

/// Query filter for `scope`
pub fn scope_filter(scope: &Scope) -> String {
    match scope {
        Scope::Application(id) => application_filter(id),
        Scope::Device(id) => device_filter(id),
    }
}

/// Columns of a variable listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableField {
    Id,
    Name,
    Value,
}

/// The fixed output columns, whatever the scope or kind
pub const VARIABLE_FIELDS: [VariableField; 3] =
    [VariableField::Id, VariableField::Name, VariableField::Value];

impl Field for VariableField {
    fn name(&self) -> &'static str {
        match self {
            VariableField::Id => "id",
            VariableField::Name => "name",
            VariableField::Value => "value",
        }
    }
}

impl Record for EnvironmentVariable {
    type Field = VariableField;

    fn field(&self, field: VariableField) -> Option<FieldValue> {
        match field {
            VariableField::Id => Some(FieldValue::Integer(self.id)),
            VariableField::Name => Some(FieldValue::Text(self.name.clone())),
            VariableField::Value => Some(FieldValue::Text(self.value.clone())),
        }
    }
}

/// Build the `envs` listing, keeping the fetched order
///
/// # Errors
///
/// Returns [`FleetError::NoEnvironmentVariables`] for an empty collection.
pub fn variable_listing(variables: &[EnvironmentVariable]) -> Result<Listing<VariableField>> {
    if variables.is_empty() {
        return Err(FleetError::NoEnvironmentVariables);
    }
    Ok(Listing::new(variables, VARIABLE_FIELDS.to_vec()))
}
