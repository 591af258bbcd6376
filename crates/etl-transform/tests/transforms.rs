//! Per-stage behavior tests.

use etl_model::{CellValue, Column, ColumnType, Dataset};
use etl_transform::{
    CleanNames, ConvertTypes, DeriveFeatures, DropMissing, EncodeCategoricals, ParseDates,
    RemoveOutliers, ScaleFeatures, TransformStage,
};

fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

fn num(v: f64) -> CellValue {
    CellValue::Number(v)
}

fn text_column(name: &str, values: &[&str]) -> Column {
    Column::from_values(
        name,
        values
            .iter()
            .map(|s| {
                if s.is_empty() {
                    CellValue::Missing
                } else {
                    text(s)
                }
            })
            .collect(),
    )
}

fn numeric_column(name: &str, values: &[f64]) -> Column {
    Column::from_values(name, values.iter().copied().map(CellValue::Number).collect())
}

#[test]
fn clean_names_normalizes_and_dedupes() {
    let ds = Dataset::from_columns(vec![
        text_column(" First Name ", &["ann", "bob", "ann"]),
        text_column("Last Name", &["lee", "ray", "lee"]),
    ])
    .unwrap();

    let cleaned = CleanNames.apply(ds).unwrap();
    let names: Vec<&str> = cleaned.columns().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["first_name", "last_name"]);
    // duplicate row (ann, lee) dropped, first occurrence kept in place
    assert_eq!(cleaned.row_count(), 2);
    assert_eq!(cleaned.column("first_name").unwrap().values()[0], text("ann"));
    assert_eq!(cleaned.column("first_name").unwrap().values()[1], text("bob"));
}

#[test]
fn clean_names_is_idempotent() {
    let ds = Dataset::from_columns(vec![
        text_column("Order Date", &["a", "a", "b"]),
        text_column("total", &["1", "1", "2"]),
    ])
    .unwrap();
    let once = CleanNames.apply(ds).unwrap();
    let twice = CleanNames.apply(once.clone()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn clean_names_resolves_collisions_deterministically() {
    let ds = Dataset::from_columns(vec![
        text_column("value", &["1"]),
        text_column("Value ", &["2"]),
    ])
    .unwrap();
    let cleaned = CleanNames.apply(ds).unwrap();
    let names: Vec<&str> = cleaned.columns().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["value", "value_2"]);
}

#[test]
fn parse_dates_converts_matching_columns() {
    let ds = Dataset::from_columns(vec![
        text_column("order_date", &["2024-01-02", "2024-02-03 10:30:00", ""]),
        text_column("note", &["2024-01-02", "x", "y"]),
    ])
    .unwrap();
    let parsed = ParseDates.apply(ds).unwrap();
    let dates = parsed.column("order_date").unwrap();
    assert_eq!(dates.column_type(), ColumnType::DateTime);
    assert!(dates.values()[2].is_missing());
    // name heuristic: "note" is untouched even though its first value parses
    assert_eq!(parsed.column("note").unwrap().column_type(), ColumnType::Text);
}

#[test]
fn parse_dates_skips_column_on_any_failure() {
    let ds = Dataset::from_columns(vec![text_column(
        "ship_date",
        &["2024-01-02", "not a date"],
    )])
    .unwrap();
    let parsed = ParseDates.apply(ds).unwrap();
    let col = parsed.column("ship_date").unwrap();
    assert_eq!(col.column_type(), ColumnType::Text);
    assert_eq!(col.values()[0], text("2024-01-02"));
}

#[test]
fn convert_types_picks_narrowest() {
    let ds = Dataset::from_columns(vec![
        text_column("n", &["1", "2.5", ""]),
        text_column("flag", &["true", "False", "TRUE"]),
        text_column("mixed", &["1", "x", "2"]),
    ])
    .unwrap();
    let converted = ConvertTypes.apply(ds).unwrap();
    assert_eq!(converted.column("n").unwrap().column_type(), ColumnType::Numeric);
    assert_eq!(converted.column("flag").unwrap().column_type(), ColumnType::Boolean);
    assert_eq!(converted.column("mixed").unwrap().column_type(), ColumnType::Text);
}

#[test]
fn drop_missing_removes_rows_with_any_missing() {
    let ds = Dataset::from_columns(vec![
        text_column("a", &["1", "", "3"]),
        text_column("b", &["x", "y", ""]),
    ])
    .unwrap();
    let filtered = DropMissing.apply(ds).unwrap();
    assert_eq!(filtered.row_count(), 1);
    assert_eq!(filtered.column("b").unwrap().values()[0], text("x"));
}

#[test]
fn drop_missing_can_empty_the_dataset() {
    let ds = Dataset::from_columns(vec![text_column("a", &["", ""])]).unwrap();
    let filtered = DropMissing.apply(ds).unwrap();
    assert_eq!(filtered.row_count(), 0);
    assert_eq!(filtered.column_count(), 1);
}

#[test]
fn remove_outliers_drops_rows_beyond_threshold() {
    // Ten 10s and one 100: the 100 sits at z ~ 3.015 against the sample
    // standard deviation, just over the default threshold.
    let mut values = vec![10.0; 10];
    values.push(100.0);
    let ds = Dataset::from_columns(vec![
        numeric_column("amount", &values),
        text_column("label", &["x"; 11]),
    ])
    .unwrap();

    let filtered = RemoveOutliers::default().apply(ds.clone()).unwrap();
    assert_eq!(filtered.row_count(), 10);
    assert!(filtered
        .column("amount")
        .unwrap()
        .numeric_values()
        .all(|v| v == 10.0));

    // A slightly looser threshold keeps every row.
    let kept = RemoveOutliers::new(3.1).apply(ds).unwrap();
    assert_eq!(kept.row_count(), 11);
}

#[test]
fn remove_outliers_is_a_conjunction_across_columns() {
    let mut a = vec![10.0; 10];
    a.push(100.0);
    // Second numeric column is well-behaved everywhere.
    let b: Vec<f64> = (0..11).map(|i| i as f64).collect();
    let ds = Dataset::from_columns(vec![numeric_column("a", &a), numeric_column("b", &b)]).unwrap();
    let filtered = RemoveOutliers::default().apply(ds).unwrap();
    // The row failing on `a` is dropped even though `b` passes there.
    assert_eq!(filtered.row_count(), 10);
}

#[test]
fn remove_outliers_zero_variance_column_never_drops() {
    let ds = Dataset::from_columns(vec![numeric_column("constant", &[5.0; 8])]).unwrap();
    let filtered = RemoveOutliers::default().apply(ds).unwrap();
    assert_eq!(filtered.row_count(), 8);
}

#[test]
fn scale_features_standardizes_numeric_columns() {
    let ds = Dataset::from_columns(vec![
        numeric_column("x", &[1.0, 2.0, 3.0]),
        text_column("label", &["a", "b", "c"]),
    ])
    .unwrap();
    let scaled = ScaleFeatures.apply(ds).unwrap();
    let values: Vec<f64> = scaled.column("x").unwrap().numeric_values().collect();
    assert!((values[0] + 1.224_744_871_391_589).abs() < 1e-12);
    assert!(values[1].abs() < 1e-12);

    let mean: f64 = values.iter().sum::<f64>() / values.len() as f64;
    let var: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64;
    assert!(mean.abs() < 1e-12);
    assert!((var.sqrt() - 1.0).abs() < 1e-12);
    // Non-numeric columns untouched.
    assert_eq!(scaled.column("label").unwrap().values()[0], text("a"));
}

#[test]
fn scale_features_leaves_zero_variance_unchanged() {
    let ds = Dataset::from_columns(vec![numeric_column("c", &[4.0, 4.0, 4.0])]).unwrap();
    let scaled = ScaleFeatures.apply(ds).unwrap();
    let values: Vec<f64> = scaled.column("c").unwrap().numeric_values().collect();
    assert_eq!(values, vec![4.0, 4.0, 4.0]);
}

#[test]
fn scale_features_keeps_missing_cells_missing() {
    let ds = Dataset::from_columns(vec![Column::from_values(
        "x",
        vec![num(1.0), CellValue::Missing, num(3.0)],
    )])
    .unwrap();
    let scaled = ScaleFeatures.apply(ds).unwrap();
    assert!(scaled.column("x").unwrap().values()[1].is_missing());
}

#[test]
fn encode_categoricals_produces_k_minus_one_indicators() {
    let ds = Dataset::from_columns(vec![
        numeric_column("amount", &[1.0, 2.0, 3.0, 4.0]),
        text_column("color", &["red", "blue", "red", "green"]),
    ])
    .unwrap();
    let encoded = EncodeCategoricals.apply(ds).unwrap();

    let names: Vec<&str> = encoded.columns().iter().map(|c| c.name()).collect();
    // blue is the lexicographically first category and is dropped.
    assert_eq!(names, vec!["amount", "color_green", "color_red"]);

    for row in 0..encoded.row_count() {
        let set: usize = ["color_green", "color_red"]
            .iter()
            .filter(|name| {
                encoded.column(name).unwrap().values()[row] == CellValue::Bool(true)
            })
            .count();
        // Indicators are mutually exclusive; the implicit "is blue" indicator
        // makes the per-row sum exactly one.
        assert!(set <= 1);
    }
    assert_eq!(
        encoded.column("color_red").unwrap().values()[0],
        CellValue::Bool(true)
    );
    assert_eq!(
        encoded.column("color_green").unwrap().values()[3],
        CellValue::Bool(true)
    );
    // Row 1 is blue: both indicators false.
    assert_eq!(
        encoded.column("color_green").unwrap().values()[1],
        CellValue::Bool(false)
    );
    assert_eq!(
        encoded.column("color_red").unwrap().values()[1],
        CellValue::Bool(false)
    );
}

#[test]
fn encode_categoricals_missing_rows_get_all_false() {
    let ds = Dataset::from_columns(vec![text_column("c", &["a", "", "b"])]).unwrap();
    let encoded = EncodeCategoricals.apply(ds).unwrap();
    assert_eq!(
        encoded.column("c_b").unwrap().values()[1],
        CellValue::Bool(false)
    );
}

#[test]
fn encode_categoricals_single_category_drops_column() {
    let ds = Dataset::from_columns(vec![
        numeric_column("n", &[1.0, 2.0]),
        text_column("only", &["same", "same"]),
    ])
    .unwrap();
    let encoded = EncodeCategoricals.apply(ds).unwrap();
    assert_eq!(encoded.column_count(), 1);
    assert!(encoded.column("only").is_none());
}

#[test]
fn derive_features_multiplies_price_and_quantity() {
    let ds = Dataset::from_columns(vec![
        numeric_column("price", &[10.0, 5.0]),
        numeric_column("quantity", &[2.0, 4.0]),
    ])
    .unwrap();
    let derived = DeriveFeatures.apply(ds).unwrap();
    let totals: Vec<f64> = derived
        .column("total_value")
        .unwrap()
        .numeric_values()
        .collect();
    assert_eq!(totals, vec![20.0, 20.0]);
}

#[test]
fn derive_features_requires_both_columns() {
    let ds = Dataset::from_columns(vec![numeric_column("price", &[10.0])]).unwrap();
    let derived = DeriveFeatures.apply(ds).unwrap();
    assert!(derived.column("total_value").is_none());
}

#[test]
fn derive_features_missing_operand_yields_missing() {
    let ds = Dataset::from_columns(vec![
        Column::from_values("price", vec![num(10.0), CellValue::Missing]),
        Column::from_values("quantity", vec![num(2.0), num(4.0)]),
    ])
    .unwrap();
    let derived = DeriveFeatures.apply(ds).unwrap();
    let totals = derived.column("total_value").unwrap();
    assert_eq!(totals.values()[0], num(20.0));
    assert!(totals.values()[1].is_missing());
}
