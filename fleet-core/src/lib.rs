//! fleetctl Core Library
//!
//! Shared types, projections and query helpers for the fleetctl CLI.
//! Nothing in this crate performs I/O; the CLI crate fetches the records and
//! prints what these modules produce.

pub mod api;
pub mod device_types;
pub mod env_vars;
pub mod error;
pub mod projection;
pub mod types;

// Re-export commonly used types
pub use device_types::{supported_device_types, DeviceTypeField, SupportedOptions};
pub use env_vars::{variable_listing, Scope, VariableField, VariableKind};
pub use error::*;
pub use projection::{Field, FieldValue, Listing, Record, Row};
pub use types::*;
