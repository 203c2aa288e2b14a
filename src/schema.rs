use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::options::SchemaVariant;

/// One cell of an annotation or model-output document.
pub type CellRecord = Map<String, Value>;

pub const DATA_CELL: &str = "data cell";
pub const SERIAL_NUMBER: &str = "serial_number";
pub const LOCATION: &str = "location";
pub const VALUE: &str = "value";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAxis {
    Row,
    Column,
}

impl HeaderAxis {
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::Row => "row header",
            Self::Column => "column header",
        }
    }

    /// Level keys from the coarsest (level-1) to the finest (level-3).
    #[must_use]
    pub const fn level_keys(self) -> [&'static str; 3] {
        match self {
            Self::Row => [
                "row header level-1",
                "row header level-2",
                "row header level-3",
            ],
            Self::Column => [
                "column header level-1",
                "column header level-2",
                "column header level-3",
            ],
        }
    }
}

impl SchemaVariant {
    #[must_use]
    pub const fn key_field(self) -> &'static str {
        match self {
            Self::SerialNumber => SERIAL_NUMBER,
            Self::Location => LOCATION,
        }
    }

    #[must_use]
    pub const fn key_path(self) -> &'static str {
        match self {
            Self::SerialNumber => SERIAL_NUMBER,
            Self::Location => "location.value",
        }
    }

    /// Location documents cannot be aligned without a location on every cell.
    #[must_use]
    pub const fn requires_key(self) -> bool {
        matches!(self, Self::Location)
    }

    pub(crate) fn has_key(self, cell: &CellRecord) -> bool {
        cell.get(self.key_field())
            .and_then(|value| self.leaf(value))
            .is_some()
    }

    pub(crate) fn key_text(self, cell: &CellRecord) -> Option<Cow<'_, str>> {
        self.leaf(cell.get(self.key_field())?).and_then(leaf_text)
    }

    pub(crate) fn data_text(self, cell: &CellRecord) -> Option<Cow<'_, str>> {
        self.leaf(cell.get(DATA_CELL)?).and_then(leaf_text)
    }

    pub(crate) fn header_text(
        self,
        cell: &CellRecord,
        axis: HeaderAxis,
        level: usize,
    ) -> Option<Cow<'_, str>> {
        let key = *axis.level_keys().get(level)?;
        let headers = cell.get(axis.field())?.as_object()?;
        self.leaf(headers.get(key)?).and_then(leaf_text)
    }

    fn leaf(self, value: &Value) -> Option<&Value> {
        match self {
            Self::SerialNumber => Some(value),
            Self::Location => value.as_object()?.get(VALUE),
        }
    }
}

fn leaf_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(text) => Some(Cow::Borrowed(text)),
        Value::Number(number) => Some(Cow::Owned(number.to_string())),
        _ => None,
    }
}
