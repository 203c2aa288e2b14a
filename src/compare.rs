use std::fmt::{Display, Formatter};

use crate::extract::CellSnapshot;

/// A comparable field of a [`CellSnapshot`]; header levels are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellField {
    DataValue,
    RowHeader(usize),
    ColumnHeader(usize),
    Key,
}

/// Comparison order; the first entry that differs decides a mismatch.
pub const COMPARED_FIELDS: [CellField; 8] = [
    CellField::DataValue,
    CellField::RowHeader(1),
    CellField::RowHeader(2),
    CellField::RowHeader(3),
    CellField::ColumnHeader(1),
    CellField::ColumnHeader(2),
    CellField::ColumnHeader(3),
    CellField::Key,
];

impl Display for CellField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DataValue => f.write_str("data cell value"),
            Self::RowHeader(level) => write!(f, "row header level-{level}"),
            Self::ColumnHeader(level) => write!(f, "column header level-{level}"),
            Self::Key => f.write_str("key"),
        }
    }
}

impl CellSnapshot {
    #[must_use]
    pub fn field(&self, field: CellField) -> Option<&str> {
        match field {
            CellField::DataValue => self.data_value.as_deref(),
            CellField::RowHeader(level) => self.row_headers.level(level),
            CellField::ColumnHeader(level) => self.column_headers.level(level),
            CellField::Key => self.key.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDiff {
    pub field: CellField,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

#[must_use]
pub fn first_mismatch(expected: &CellSnapshot, actual: &CellSnapshot) -> Option<CellField> {
    COMPARED_FIELDS
        .into_iter()
        .find(|field| expected.field(*field) != actual.field(*field))
}

#[must_use]
pub fn matches(expected: &CellSnapshot, actual: &CellSnapshot) -> bool {
    first_mismatch(expected, actual).is_none()
}

/// Every differing field, in comparison order.
#[must_use]
pub fn diff(expected: &CellSnapshot, actual: &CellSnapshot) -> Vec<FieldDiff> {
    COMPARED_FIELDS
        .into_iter()
        .filter_map(|field| {
            let left = expected.field(field);
            let right = actual.field(field);
            (left != right).then(|| FieldDiff {
                field,
                expected: left.map(str::to_string),
                actual: right.map(str::to_string),
            })
        })
        .collect()
}
