use crate::normalize::normalize;
use crate::options::CompareOptions;
use crate::schema::{CellRecord, HeaderAxis};

/// Header text for one axis, level-1 (coarsest) first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderLevels([Option<String>; 3]);

impl HeaderLevels {
    #[must_use]
    pub const fn new(levels: [Option<String>; 3]) -> Self {
        Self(levels)
    }

    /// Text at a 1-based level, `None` when absent or out of range.
    #[must_use]
    pub fn level(&self, level: usize) -> Option<&str> {
        self.0.get(level.checked_sub(1)?)?.as_deref()
    }

    #[must_use]
    pub const fn levels(&self) -> &[Option<String>; 3] {
        &self.0
    }

    /// Drop header levels that only repeat a coarser label.
    ///
    /// Level-3 is cleared when it equals level-2 or level-1, then level-2 is
    /// cleared when it equals level-1. Level-2 is never checked against
    /// level-3.
    #[must_use]
    pub fn deduplicated(self) -> Self {
        let [first, mut second, mut third] = self.0;

        if third.is_some() && (third == second || third == first) {
            third = None;
        }
        if second.is_some() && second == first {
            second = None;
        }

        Self([first, second, third])
    }
}

/// Normalized, comparable view of one cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellSnapshot {
    pub data_value: Option<String>,
    pub key: Option<String>,
    pub row_headers: HeaderLevels,
    pub column_headers: HeaderLevels,
}

#[must_use]
pub fn extract(cell: &CellRecord, options: &CompareOptions) -> CellSnapshot {
    let variant = options.variant;

    CellSnapshot {
        data_value: normalize(variant.data_text(cell).as_deref(), options.mode),
        key: normalized_key(cell, options),
        row_headers: extract_headers(cell, HeaderAxis::Row, options),
        column_headers: extract_headers(cell, HeaderAxis::Column, options),
    }
}

pub(crate) fn normalized_key(cell: &CellRecord, options: &CompareOptions) -> Option<String> {
    normalize(options.variant.key_text(cell).as_deref(), options.mode)
}

fn extract_headers(cell: &CellRecord, axis: HeaderAxis, options: &CompareOptions) -> HeaderLevels {
    let levels = HeaderLevels(std::array::from_fn(|level| {
        normalize(
            options.variant.header_text(cell, axis, level).as_deref(),
            options.mode,
        )
    }));

    if options.dedup_headers {
        levels.deduplicated()
    } else {
        levels
    }
}
