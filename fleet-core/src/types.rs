//! Records returned by the remote fleet API

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Release state of a device type
///
/// States the CLI doesn't know are kept verbatim in [`DeviceTypeState::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceTypeState {
    /// Supported, but not yet considered stable
    Beta,
    /// Generally available
    Released,
    /// No longer supported for new devices
    Discontinued,
    /// Any other state reported by the service
    Other(String),
}

impl DeviceTypeState {
    /// Wire representation of the state
    pub fn as_str(&self) -> &str {
        match self {
            DeviceTypeState::Beta => "BETA",
            DeviceTypeState::Released => "RELEASED",
            DeviceTypeState::Discontinued => "DISCONTINUED",
            DeviceTypeState::Other(state) => state,
        }
    }
}

impl From<String> for DeviceTypeState {
    fn from(state: String) -> Self {
        match state.as_str() {
            "BETA" => DeviceTypeState::Beta,
            "RELEASED" => DeviceTypeState::Released,
            "DISCONTINUED" => DeviceTypeState::Discontinued,
            _ => DeviceTypeState::Other(state),
        }
    }
}

impl From<DeviceTypeState> for String {
    fn from(state: DeviceTypeState) -> Self {
        match state {
            DeviceTypeState::Other(state) => state,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DeviceTypeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode a list that the service may send as `null`
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A hardware platform supported by the fleet service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceType {
    /// Unique identifier, e.g. `raspberrypi3`
    pub slug: String,
    /// Human readable name
    pub name: String,
    /// Alternative slugs the device type is known by
    #[serde(default, deserialize_with = "null_as_empty")]
    pub aliases: Vec<String>,
    /// CPU architecture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    /// Release state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<DeviceTypeState>,
}

impl DeviceType {
    /// Whether the device type is no longer supported
    pub fn is_discontinued(&self) -> bool {
        self.state == Some(DeviceTypeState::Discontinued)
    }
}

/// An environment or configuration variable of an application or device
///
/// Both scopes and both kinds share this shape; association fields the API
/// sends along (`application`, `device`, ...) are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    /// Remote identifier
    pub id: u64,
    /// Variable name
    pub name: String,
    /// Variable value
    pub value: String,
}
