//! Listing of supported device types
//!
//! Turns the raw device type collection into the rows printed by
//! `devices supported`: discontinued types are filtered out unless asked
//! for, verbose output adds the aliases/arch/state columns, and the result is
//! sorted by the selected columns.

use crate::projection::{Field, FieldValue, Listing, Record};
use crate::types::DeviceType;

/// Selectable device type columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceTypeField {
    Slug,
    Aliases,
    Arch,
    State,
    Name,
}

impl Field for DeviceTypeField {
    fn name(&self) -> &'static str {
        match self {
            DeviceTypeField::Slug => "slug",
            DeviceTypeField::Aliases => "aliases",
            DeviceTypeField::Arch => "arch",
            DeviceTypeField::State => "state",
            DeviceTypeField::Name => "name",
        }
    }
}

impl Record for DeviceType {
    type Field = DeviceTypeField;

    fn field(&self, field: DeviceTypeField) -> Option<FieldValue> {
        match field {
            DeviceTypeField::Slug => Some(FieldValue::Text(self.slug.clone())),
            DeviceTypeField::Aliases => Some(FieldValue::List(self.aliases.clone())),
            DeviceTypeField::Arch => self.arch.clone().map(FieldValue::Text),
            DeviceTypeField::State => self
                .state
                .as_ref()
                .map(|state| FieldValue::Text(state.to_string())),
            DeviceTypeField::Name => Some(FieldValue::Text(self.name.clone())),
        }
    }
}

/// Options of the `devices supported` command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupportedOptions {
    /// Keep discontinued device types
    pub discontinued: bool,
    /// Output is JSON rather than a table
    pub json: bool,
    /// Add the aliases, arch and state columns
    pub verbose: bool,
}

/// Columns for the given verbosity
///
/// Verbose columns are inserted as one block right after `slug`.
pub fn selected_fields(verbose: bool) -> Vec<DeviceTypeField> {
    let mut fields = vec![DeviceTypeField::Slug, DeviceTypeField::Name];
    if verbose {
        fields.splice(
            1..1,
            [
                DeviceTypeField::Aliases,
                DeviceTypeField::Arch,
                DeviceTypeField::State,
            ],
        );
    }
    fields
}

/// Drop aliases equal to the device type's own slug
///
/// With `collapse` set, any remaining aliases are joined into a single
/// `"a, b"` element for table display. Other duplicates are kept as given.
pub fn normalize_aliases(device_type: &mut DeviceType, collapse: bool) {
    let slug = device_type.slug.as_str();
    device_type.aliases.retain(|alias| alias != slug);

    if collapse && !device_type.aliases.is_empty() {
        device_type.aliases = vec![device_type.aliases.join(", ")];
    }
}

/// Build the sorted `devices supported` listing
pub fn supported_device_types(
    device_types: Vec<DeviceType>,
    options: &SupportedOptions,
) -> Listing<DeviceTypeField> {
    let mut device_types: Vec<DeviceType> = device_types
        .into_iter()
        .filter(|dt| options.discontinued || !dt.is_discontinued())
        .collect();

    if options.verbose {
        for device_type in &mut device_types {
            normalize_aliases(device_type, !options.json);
        }
    }

    Listing::new(&device_types, selected_fields(options.verbose)).sorted()
}
