use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Which of the two input layouts a document pair uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaVariant {
    /// Scalar leaves, cells identified by a top-level `serial_number`.
    #[default]
    SerialNumber,
    /// `{"value": ...}` wrapped leaves, cells identified by `location.value`.
    Location,
}

impl SchemaVariant {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SerialNumber => "serial",
            Self::Location => "location",
        }
    }
}

impl Display for SchemaVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVariant {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "serial" | "serial_number" | "serial-number" => Ok(Self::SerialNumber),
            "location" => Ok(Self::Location),
            other => Err(format!(
                "unknown schema variant '{other}', expected 'serial' or 'location'"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizeMode {
    /// NFKC plus symbol canonicalization and operator spacing removal.
    #[default]
    Canonical,
    /// Trim and drop every whitespace character, nothing else.
    StripWhitespace,
}

impl FromStr for NormalizeMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "canonical" => Ok(Self::Canonical),
            "strip-whitespace" | "strip_whitespace" | "strip" => Ok(Self::StripWhitespace),
            other => Err(format!(
                "unknown normalize mode '{other}', expected 'canonical' or 'strip-whitespace'"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareOptions {
    pub variant: SchemaVariant,
    pub mode: NormalizeMode,
    pub dedup_headers: bool,
    pub report_recall: bool,
}

impl CompareOptions {
    /// Defaults matching how each layout has historically been scored.
    #[must_use]
    pub const fn for_variant(variant: SchemaVariant) -> Self {
        match variant {
            SchemaVariant::SerialNumber => Self {
                variant,
                mode: NormalizeMode::Canonical,
                dedup_headers: true,
                report_recall: true,
            },
            SchemaVariant::Location => Self {
                variant,
                mode: NormalizeMode::StripWhitespace,
                dedup_headers: false,
                report_recall: false,
            },
        }
    }
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self::for_variant(SchemaVariant::default())
    }
}
