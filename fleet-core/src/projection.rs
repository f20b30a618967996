//! Typed field projection
//!
//! Commands print a subset of each record's fields, in a fixed column order.
//! Every record type names its fields with an enum implementing [`Field`] and
//! exposes them through [`Record`]; [`project`] then builds a [`Row`] holding
//! exactly the requested fields, in the requested order.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// A named, selectable field of a record type
pub trait Field: Copy + Eq + fmt::Debug {
    /// Key used in JSON output
    fn name(&self) -> &'static str;

    /// Column heading used in table output
    fn heading(&self) -> String {
        self.name().to_uppercase().replace('_', " ")
    }
}

/// Value of a single projected field
///
/// Ordering compares values of the same variant by content; lists compare
/// element by element.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldValue {
    Integer(u64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Render the value for a table cell
    pub fn display(&self) -> String {
        match self {
            FieldValue::Integer(n) => n.to_string(),
            FieldValue::Text(s) => s.clone(),
            FieldValue::List(items) => items.join(", "),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Integer(n) => serializer.serialize_u64(*n),
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::List(items) => items.serialize(serializer),
        }
    }
}

/// A record whose fields can be projected
pub trait Record {
    type Field: Field;

    /// Value of `field`, or `None` when the record does not carry it
    fn field(&self, field: Self::Field) -> Option<FieldValue>;
}

/// A record restricted to an explicit list of fields
///
/// Absent fields are left out entirely, so a row may hold fewer cells than
/// fields were requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<F: Field> {
    cells: Vec<(F, FieldValue)>,
}

impl<F: Field> Row<F> {
    /// Value of `field`, if the row holds it
    pub fn get(&self, field: F) -> Option<&FieldValue> {
        self.cells
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, value)| value)
    }

    /// Cells in projection order
    pub fn cells(&self) -> &[(F, FieldValue)] {
        &self.cells
    }

    /// Number of cells present
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no requested field was present
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<F: Field> Serialize for Row<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (field, value) in &self.cells {
            map.serialize_entry(field.name(), value)?;
        }
        map.end()
    }
}

/// Projected rows together with the column order they were projected with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<F: Field> {
    pub fields: Vec<F>,
    pub rows: Vec<Row<F>>,
}

impl<F: Field> Listing<F> {
    /// Project `records` onto `fields`
    pub fn new<R: Record<Field = F>>(records: &[R], fields: Vec<F>) -> Self {
        let rows = project_all(records, &fields);
        Self { fields, rows }
    }

    /// Sort rows ascending by all fields, in column order
    pub fn sorted(mut self) -> Self {
        sort_rows(&mut self.rows, &self.fields);
        self
    }

    /// Whether the listing holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Restrict `record` to `fields`, keeping their order
pub fn project<R: Record>(record: &R, fields: &[R::Field]) -> Row<R::Field> {
    let cells = fields
        .iter()
        .filter_map(|&field| record.field(field).map(|value| (field, value)))
        .collect();
    Row { cells }
}

/// Project every record in `records`
pub fn project_all<R: Record>(records: &[R], fields: &[R::Field]) -> Vec<Row<R::Field>> {
    records.iter().map(|record| project(record, fields)).collect()
}

/// Compare two rows field by field, in `fields` order
///
/// A present value sorts before an absent one.
pub fn compare_rows<F: Field>(a: &Row<F>, b: &Row<F>, fields: &[F]) -> Ordering {
    for &field in fields {
        let ordering = match (a.get(field), b.get(field)) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Stable ascending sort of `rows` by `fields`
pub fn sort_rows<F: Field>(rows: &mut [Row<F>], fields: &[F]) {
    rows.sort_by(|a, b| compare_rows(a, b, fields));
}
