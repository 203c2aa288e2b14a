use serde::Serialize;
use tracing::debug;

use crate::align::align;
use crate::compare::{FieldDiff, diff};
use crate::error::EvalError;
use crate::extract::extract;
use crate::options::CompareOptions;
use crate::schema::CellRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateScore {
    pub total_cells: usize,
    pub model_cells: usize,
    pub recognized_cells: usize,
    pub correct_cells: usize,
    pub recognition_rate: f64,
    /// Correct cells over model-output cells, not over ground truth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recall: Option<f64>,
    pub accuracy_rate: f64,
}

impl AggregateScore {
    #[must_use]
    pub fn from_counts(
        total_cells: usize,
        model_cells: usize,
        recognized_cells: usize,
        correct_cells: usize,
        report_recall: bool,
    ) -> Self {
        Self {
            total_cells,
            model_cells,
            recognized_cells,
            correct_cells,
            recognition_rate: ratio(recognized_cells, total_cells),
            recall: report_recall.then(|| ratio(correct_cells, model_cells)),
            accuracy_rate: ratio(correct_cells, total_cells),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellStatus {
    Correct,
    Mismatch(Vec<FieldDiff>),
    NotRecognized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellOutcome {
    pub key: Option<String>,
    pub status: CellStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub score: AggregateScore,
    /// One outcome per ground-truth cell, in document order.
    pub cells: Vec<CellOutcome>,
    pub duplicate_model_keys: usize,
}

/// Align, compare and aggregate one ground-truth/model document pair.
///
/// # Errors
///
/// Propagates alignment failures, see [`align`].
pub fn score(
    ground_truth: &[CellRecord],
    model: &[CellRecord],
    options: &CompareOptions,
) -> Result<Evaluation, EvalError> {
    let alignment = align(ground_truth, model, options)?;

    let cells = alignment
        .cells
        .iter()
        .map(|aligned| {
            let status = match aligned.model {
                None => CellStatus::NotRecognized,
                Some(model_cell) => {
                    let differences = diff(
                        &extract(aligned.ground_truth, options),
                        &extract(model_cell, options),
                    );
                    if differences.is_empty() {
                        CellStatus::Correct
                    } else {
                        CellStatus::Mismatch(differences)
                    }
                }
            };
            CellOutcome {
                key: aligned.key.clone(),
                status,
            }
        })
        .collect::<Vec<_>>();

    let recognized_cells = cells
        .iter()
        .filter(|cell| cell.status != CellStatus::NotRecognized)
        .count();
    let correct_cells = cells
        .iter()
        .filter(|cell| cell.status == CellStatus::Correct)
        .count();

    let score = AggregateScore::from_counts(
        ground_truth.len(),
        model.len(),
        recognized_cells,
        correct_cells,
        options.report_recall,
    );
    debug!(
        total = score.total_cells,
        recognized = score.recognized_cells,
        correct = score.correct_cells,
        "scored document pair"
    );

    Ok(Evaluation {
        score,
        cells,
        duplicate_model_keys: alignment.duplicate_model_keys,
    })
}
