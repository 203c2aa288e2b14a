use std::fmt::{Display, Formatter};
use std::path::Path;

use crate::clean::CleanReport;
use crate::score::{CellStatus, Evaluation};

const RULE_WIDTH: usize = 80;

/// Line-per-cell comparison report followed by the final tally.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonReport<'a> {
    evaluation: &'a Evaluation,
}

impl<'a> ComparisonReport<'a> {
    #[must_use]
    pub const fn new(evaluation: &'a Evaluation) -> Self {
        Self { evaluation }
    }
}

impl Display for ComparisonReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "Compare result:")?;
        writeln!(f, "{rule}")?;

        for cell in &self.evaluation.cells {
            let key = cell.key.as_deref().unwrap_or("<no key>");
            match &cell.status {
                CellStatus::Correct => writeln!(f, "{key}: ✓ Correct")?,
                CellStatus::NotRecognized => writeln!(f, "{key}: ✗ Not recognized")?,
                CellStatus::Mismatch(diffs) => {
                    writeln!(f, "{key}: ✗ Difference")?;
                    for diff in diffs {
                        writeln!(
                            f,
                            "  {}: {} vs {}",
                            diff.field,
                            Quoted(diff.expected.as_deref()),
                            Quoted(diff.actual.as_deref())
                        )?;
                    }
                }
            }
        }

        let score = &self.evaluation.score;
        writeln!(f, "{rule}")?;
        writeln!(f, "Results:")?;
        writeln!(f, "Ground-truth cells: {}", score.total_cells)?;
        writeln!(f, "Model output cells: {}", score.model_cells)?;
        writeln!(f, "Recognized cells: {}", score.recognized_cells)?;
        writeln!(f, "Correct cells: {}", score.correct_cells)?;
        if self.evaluation.duplicate_model_keys > 0 {
            writeln!(
                f,
                "Duplicate model keys: {} (later cells kept)",
                self.evaluation.duplicate_model_keys
            )?;
        }
        writeln!(f, "Recognition rate: {}", Rate(score.recognition_rate))?;
        if let Some(recall) = score.recall {
            writeln!(f, "Recall: {}", Rate(recall))?;
        }
        writeln!(f, "Accuracy: {}", Rate(score.accuracy_rate))
    }
}

struct Quoted<'a>(Option<&'a str>);

impl Display for Quoted<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(text) => write!(f, "'{text}'"),
            None => f.write_str("(absent)"),
        }
    }
}

struct Rate(f64);

impl Display for Rate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4} ({:.2}%)", self.0, self.0 * 100.0)
    }
}

/// Summary printed after a cleaning run.
#[derive(Debug, Clone, Copy)]
pub struct CleanSummary<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub report: &'a CleanReport,
}

impl Display for CleanSummary<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Input file: {}", self.input.display())?;
        writeln!(f, "Output file: {}", self.output.display())?;
        writeln!(f, "Processed cells: {}", self.report.processed_cells)?;
        writeln!(f, "Changed values: {}", self.report.changed_values)?;
        if self.report.skipped_values > 0 {
            writeln!(f, "Skipped non-text values: {}", self.report.skipped_values)?;
        }
        Ok(())
    }
}
