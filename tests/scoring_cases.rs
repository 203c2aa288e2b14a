use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use table_cell_eval::{
    CellRecord, CellStatus, CompareOptions, HeaderLevels, NormalizeMode, clean_value, extract,
    matches, normalize, score,
};

fn cells(value: Value) -> Vec<CellRecord> {
    serde_json::from_value(value).expect("fixture is an array of objects")
}

fn canonical(text: &str) -> Option<String> {
    normalize(Some(text), NormalizeMode::Canonical)
}

fn levels(values: [Option<&str>; 3]) -> HeaderLevels {
    HeaderLevels::new(values.map(|value| value.map(str::to_string)))
}

#[test]
fn empty_text_normalizes_to_none() {
    assert_eq!(canonical(""), None);
    assert_eq!(canonical("   "), None);
}

#[test]
fn operator_spacing_is_insignificant() {
    assert_eq!(canonical("3 - 5"), canonical("3-5"));
    assert_eq!(canonical("3-5").as_deref(), Some("3-5"));
}

#[test]
fn digraphs_match_their_glyphs() {
    assert_eq!(canonical("x >= 5"), canonical("x≥5"));
}

#[test]
fn row_header_dedup_cases() {
    let options = CompareOptions::default();
    let repeated_outer = cells(json!([{
        "row header": {
            "row header level-1": "Total",
            "row header level-2": "Male",
            "row header level-3": "Total"
        }
    }]));
    let repeated_middle = cells(json!([{
        "row header": {
            "row header level-1": "Total",
            "row header level-2": "Total",
            "row header level-3": "Sub"
        }
    }]));

    assert_eq!(
        extract(&repeated_outer[0], &options).row_headers,
        levels([Some("Total"), Some("Male"), None])
    );
    assert_eq!(
        extract(&repeated_middle[0], &options).row_headers,
        levels([Some("Total"), None, Some("Sub")])
    );
}

#[test]
fn column_axis_is_deduplicated_independently() {
    let cell = cells(json!([{
        "row header": {"row header level-1": "2024", "row header level-2": "Q1"},
        "column header": {"column header level-1": "Q1", "column header level-2": "Q1"}
    }]));

    let snapshot = extract(&cell[0], &CompareOptions::default());
    assert_eq!(snapshot.row_headers, levels([Some("2024"), Some("Q1"), None]));
    assert_eq!(snapshot.column_headers, levels([Some("Q1"), None, None]));
}

#[test]
fn redundant_header_levels_do_not_cause_mismatch() {
    let options = CompareOptions::default();
    let annotated = cells(json!([{
        "serial_number": "7",
        "data cell": "10",
        "row header": {"row header level-1": "Total", "row header level-2": "Total"}
    }]));
    let predicted = cells(json!([{
        "serial_number": "7",
        "data cell": "10",
        "row header": {"row header level-1": "Total"}
    }]));

    assert!(matches(
        &extract(&annotated[0], &options),
        &extract(&predicted[0], &options)
    ));
}

#[test]
fn label_repeated_on_every_level_matches_level1_only() {
    let options = CompareOptions::default();
    let annotated = cells(json!([{
        "serial_number": "3",
        "data cell": "42",
        "row header": {
            "row header level-1": "Total",
            "row header level-2": "Total",
            "row header level-3": "Total"
        }
    }]));
    let predicted = cells(json!([{
        "serial_number": "3",
        "data cell": "42",
        "row header": {"row header level-1": "Total"}
    }]));

    let expected = extract(&annotated[0], &options);
    assert_eq!(expected.row_headers, levels([Some("Total"), None, None]));
    assert!(matches(&expected, &extract(&predicted[0], &options)));
}

#[test]
fn alignment_by_key() {
    let ground_truth = cells(json!([{"serial_number": "A1", "data cell": "5"}]));
    let model = cells(json!([
        {"serial_number": "A1", "data cell": "5"},
        {"serial_number": "B2", "data cell": "9"}
    ]));

    let evaluation =
        score(&ground_truth, &model, &CompareOptions::default()).expect("scoring succeeds");
    assert_eq!(evaluation.score.recognized_cells, 1);
    assert_eq!(evaluation.score.correct_cells, 1);
    assert_eq!(evaluation.score.recognition_rate, 1.0);
}

#[test]
fn unmatched_key_counts_only_toward_total() {
    let ground_truth = cells(json!([
        {"serial_number": "A1", "data cell": "5"},
        {"serial_number": "Z9", "data cell": "5"}
    ]));
    let model = cells(json!([{"serial_number": "A1", "data cell": "5"}]));

    let evaluation =
        score(&ground_truth, &model, &CompareOptions::default()).expect("scoring succeeds");
    assert_eq!(evaluation.score.total_cells, 2);
    assert_eq!(evaluation.score.recognized_cells, 1);
    assert_eq!(evaluation.score.correct_cells, 1);
    assert_eq!(evaluation.cells[1].status, CellStatus::NotRecognized);
    assert_eq!(evaluation.score.accuracy_rate, 0.5);
}

#[test]
fn empty_ground_truth_scores_zero() {
    let model = cells(json!([{"serial_number": "A1", "data cell": "5"}]));

    let evaluation = score(&[], &model, &CompareOptions::default()).expect("scoring succeeds");
    assert_eq!(evaluation.score.total_cells, 0);
    assert_eq!(evaluation.score.recognition_rate, 0.0);
    assert_eq!(evaluation.score.accuracy_rate, 0.0);
    assert_eq!(evaluation.score.recall, Some(0.0));
}

#[test]
fn non_string_leaf_survives_cleaning() {
    let cleaned = clean_value(&json!({"value": true}), "[0].data cell");
    assert_eq!(cleaned.value, json!({"value": true}));
    assert_eq!(cleaned.skipped, 1);
}
