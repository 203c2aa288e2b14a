mod align;
mod clean;
mod compare;
mod error;
mod extract;
mod normalize;
mod options;
mod report;
mod schema;
mod score;

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

pub use align::{AlignedCell, Alignment, align};
pub use clean::{CleanReport, CleanedValue, INVISIBLE_SPACES, clean_cells, clean_text, clean_value};
pub use compare::{COMPARED_FIELDS, CellField, FieldDiff, diff, first_mismatch, matches};
pub use error::EvalError;
pub use extract::{CellSnapshot, HeaderLevels, extract};
pub use normalize::{CHAR_REPLACEMENTS, DIGRAPH_REPLACEMENTS, SPACED_OPERATORS, normalize};
pub use options::{CompareOptions, NormalizeMode, SchemaVariant};
pub use report::{CleanSummary, ComparisonReport};
pub use schema::{CellRecord, HeaderAxis};
pub use score::{AggregateScore, CellOutcome, CellStatus, Evaluation, score};

/// Read a document: a JSON array of cell objects.
///
/// # Errors
///
/// [`EvalError::NotFound`] or [`EvalError::Io`] when the file cannot be read,
/// [`EvalError::Json`] when it is not an array of objects.
pub fn load_cells(path: &Path) -> Result<Vec<CellRecord>, EvalError> {
    let text = fs::read_to_string(path).map_err(|error| EvalError::io(path, error))?;
    let cells = serde_json::from_str::<Vec<CellRecord>>(&text)
        .map_err(|error| EvalError::json(path, error))?;
    debug!(path = %path.display(), cells = cells.len(), "loaded cell document");
    Ok(cells)
}

/// Score a model-output document against its ground truth.
///
/// # Errors
///
/// Propagates load failures and schema errors from alignment.
pub fn compare_files(
    ground_truth: &Path,
    model: &Path,
    options: &CompareOptions,
) -> Result<Evaluation, EvalError> {
    let ground_truth_cells = load_cells(ground_truth)?;
    let model_cells = load_cells(model)?;
    score(&ground_truth_cells, &model_cells, options)
}

/// Clean the text fields of `input` and write the result to `output`.
///
/// The output is only replaced once the whole document has been serialized
/// and written to a temporary file next to it. On Unix the result is
/// created with mode `0644`, like a plain file write under the usual umask.
///
/// # Errors
///
/// Propagates load failures, and I/O failures while writing `output`.
pub fn clean_file(input: &Path, output: &Path) -> Result<CleanReport, EvalError> {
    let cells = load_cells(input)?;
    let (cleaned, report) = clean_cells(&cells);
    write_json_atomically(output, &cleaned)?;
    debug!(
        output = %output.display(),
        changed = report.changed_values,
        "wrote cleaned document"
    );
    Ok(report)
}

fn write_json_atomically(path: &Path, cells: &[CellRecord]) -> Result<(), EvalError> {
    let mut bytes =
        serde_json::to_vec_pretty(cells).map_err(|error| EvalError::json(path, error))?;
    bytes.push(b'\n');

    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir).map_err(|error| EvalError::io(dir, error))?;
    file.write_all(&bytes)
        .and_then(|()| file.flush())
        .map_err(|error| EvalError::io(path, error))?;
    set_output_permissions(&file).map_err(|error| EvalError::io(path, error))?;
    file.persist(path)?;
    Ok(())
}

// Temporary files start out as 0600.
#[cfg(unix)]
fn set_output_permissions(file: &NamedTempFile) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.as_file().set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_output_permissions(_file: &NamedTempFile) -> std::io::Result<()> {
    Ok(())
}
