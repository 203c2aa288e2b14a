use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::EvalError;
use crate::extract::normalized_key;
use crate::options::CompareOptions;
use crate::schema::CellRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct AlignedCell<'a> {
    /// Normalized key of the ground-truth cell.
    pub key: Option<String>,
    pub ground_truth: &'a CellRecord,
    pub model: Option<&'a CellRecord>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Alignment<'a> {
    pub cells: Vec<AlignedCell<'a>>,
    /// Model cells whose key was already taken; the later cell wins.
    pub duplicate_model_keys: usize,
}

/// Pair every ground-truth cell with the model cell that carries the same key.
///
/// Model cells without a key never become alignment targets.
///
/// # Errors
///
/// Returns [`EvalError::Schema`] when the variant requires a key and a cell
/// on either side lacks it.
pub fn align<'a>(
    ground_truth: &'a [CellRecord],
    model: &'a [CellRecord],
    options: &CompareOptions,
) -> Result<Alignment<'a>, EvalError> {
    let mut by_key: HashMap<String, &'a CellRecord> = HashMap::with_capacity(model.len());
    let mut duplicate_model_keys = 0;

    for (index, cell) in model.iter().enumerate() {
        let Some(key) = cell_key(cell, index, "model", options)? else {
            continue;
        };
        if by_key.insert(key.clone(), cell).is_some() {
            duplicate_model_keys += 1;
            warn!(%key, index, "duplicate model cell key; keeping the later cell");
        }
    }

    let cells = ground_truth
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let key = cell_key(cell, index, "ground truth", options)?;
            let model = key.as_ref().and_then(|key| by_key.get(key).copied());
            Ok(AlignedCell {
                key,
                ground_truth: cell,
                model,
            })
        })
        .collect::<Result<Vec<_>, EvalError>>()?;

    debug!(
        ground_truth = ground_truth.len(),
        model = model.len(),
        keyed_model = by_key.len(),
        recognized = cells.iter().filter(|cell| cell.model.is_some()).count(),
        "aligned cells by key"
    );

    Ok(Alignment {
        cells,
        duplicate_model_keys,
    })
}

fn cell_key(
    cell: &CellRecord,
    index: usize,
    document: &'static str,
    options: &CompareOptions,
) -> Result<Option<String>, EvalError> {
    let variant = options.variant;
    if variant.requires_key() && !variant.has_key(cell) {
        return Err(EvalError::Schema {
            document,
            index,
            field: variant.key_path(),
        });
    }

    Ok(normalized_key(cell, options))
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::align;
    use crate::error::EvalError;
    use crate::options::{CompareOptions, SchemaVariant};
    use crate::schema::CellRecord;

    fn cells(value: Value) -> Vec<CellRecord> {
        serde_json::from_value(value).expect("fixture is an array of objects")
    }

    #[test]
    fn aligns_by_normalized_key() {
        let ground_truth = cells(json!([
            {"serial_number": "A1", "data cell": "5"},
            {"serial_number": "C3", "data cell": "1"}
        ]));
        let model = cells(json!([
            {"serial_number": " A1 ", "data cell": "5"},
            {"serial_number": "B2", "data cell": "9"}
        ]));

        let alignment =
            align(&ground_truth, &model, &CompareOptions::default()).expect("alignment succeeds");
        assert_eq!(alignment.cells.len(), 2);
        assert_eq!(alignment.cells[0].key.as_deref(), Some("A1"));
        assert_eq!(alignment.cells[0].model, Some(&model[0]));
        assert_eq!(alignment.cells[1].model, None);
    }

    #[test]
    fn keyless_model_cells_are_not_targets() {
        let ground_truth = cells(json!([{"data cell": "5"}]));
        let model = cells(json!([{"data cell": "5"}, {"serial_number": "", "data cell": "5"}]));

        let alignment =
            align(&ground_truth, &model, &CompareOptions::default()).expect("alignment succeeds");
        assert_eq!(alignment.cells[0].key, None);
        assert_eq!(alignment.cells[0].model, None);
    }

    #[test]
    fn duplicate_model_keys_keep_the_last_cell() {
        let ground_truth = cells(json!([{"serial_number": "A1"}]));
        let model = cells(json!([
            {"serial_number": "A1", "data cell": "first"},
            {"serial_number": "A1", "data cell": "second"}
        ]));

        let alignment =
            align(&ground_truth, &model, &CompareOptions::default()).expect("alignment succeeds");
        assert_eq!(alignment.duplicate_model_keys, 1);
        assert_eq!(alignment.cells[0].model, Some(&model[1]));
    }

    #[test]
    fn location_variant_requires_location_value() {
        let options = CompareOptions::for_variant(SchemaVariant::Location);
        let ground_truth = cells(json!([{"location": {"value": "R1C1"}}]));
        let model = cells(json!([
            {"location": {"value": "R1C1"}},
            {"data cell": {"value": "3"}}
        ]));

        let error = align(&ground_truth, &model, &options).expect_err("missing location fails");
        assert!(matches!(
            error,
            EvalError::Schema {
                document: "model",
                index: 1,
                field: "location.value"
            }
        ));
    }
}
