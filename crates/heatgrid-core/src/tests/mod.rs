use crate::*;
use futures::executor::block_on;
use serde_json::json;

const SAMPLE: &str = r#"{
  "baseTemperature": 8.66,
  "monthlyVariance": [
    { "year": 1753, "month": 1, "variance": -6.1 },
    { "year": 1753, "month": 2, "variance": -4.6 },
    { "year": 1760, "month": 12, "variance": 1.25 }
  ]
}"#;

#[test]
fn load_dataset_normalizes_months_to_zero_based() {
    let src = StaticSource::new("sample", SAMPLE);
    let ds = block_on(load_dataset(&src)).unwrap();

    assert_eq!(ds.base_temperature, 8.66);
    assert_eq!(ds.len(), 3);
    assert_eq!(
        ds.observations[0],
        Observation {
            year: 1753,
            month: MonthIndex::from_zero_based(0).unwrap(),
            variance: -6.1,
        }
    );
    assert_eq!(ds.observations[2].month.get(), 11);
    assert!(ds.observations.iter().all(|o| o.month.get() <= 11));
}

#[test]
fn absolute_temperature_is_base_plus_variance() {
    let ds = parse_document(SAMPLE).unwrap();
    let t = ds.temperature(&ds.observations[0]);
    assert_eq!(t, 8.66 + -6.1);
    assert_eq!(format!("{t:.2}"), "2.56");
}

#[test]
fn extents_and_years() {
    let ds = parse_document(SAMPLE).unwrap();
    let (lo, hi) = ds.temperature_extent().unwrap();
    assert_eq!(lo, 8.66 + -6.1);
    assert_eq!(hi, 8.66 + 1.25);
    assert_eq!(ds.years(), vec![1753, 1760]);
    assert_eq!(ds.year_extent(), Some((1753, 1760)));
}

#[test]
fn normalized_dataset_serializes_zero_based_months() {
    let ds = parse_document(SAMPLE).unwrap();
    let v = serde_json::to_value(&ds).unwrap();
    assert_eq!(
        v["observations"][0],
        json!({ "year": 1753, "month": 0, "variance": -6.1 })
    );

    // Round-tripping the normalized form never shifts months again.
    let back: Dataset = serde_json::from_value(v).unwrap();
    assert_eq!(back, ds);
}

#[test]
fn rejects_out_of_range_month() {
    let text = r#"{"baseTemperature": 8.66, "monthlyVariance": [
        {"year": 1753, "month": 1, "variance": 0.0},
        {"year": 1753, "month": 13, "variance": 0.0}
    ]}"#;
    let err = parse_document(text).unwrap_err().to_string();
    assert_eq!(
        err,
        "Invalid temperature document: monthlyVariance[1]: month 13 is outside 1..=12"
    );
}

#[test]
fn rejects_zero_month_as_already_normalized_input() {
    let text = r#"{"baseTemperature": 8.66, "monthlyVariance": [
        {"year": 1753, "month": 0, "variance": 0.0}
    ]}"#;
    assert!(matches!(
        parse_document(text),
        Err(Error::InvalidDocument { .. })
    ));
}

#[test]
fn rejects_empty_dataset() {
    let text = r#"{"baseTemperature": 8.66, "monthlyVariance": []}"#;
    assert!(matches!(
        parse_document(text),
        Err(Error::InvalidDocument { .. })
    ));
}

#[test]
fn malformed_json_surfaces_as_json_error() {
    let text = r#"{"baseTemperature": "warm"}"#;
    assert!(matches!(parse_document(text), Err(Error::Json(_))));
}

#[test]
fn month_index_deserialization_is_range_checked() {
    assert!(serde_json::from_value::<MonthIndex>(json!(11)).is_ok());
    assert!(serde_json::from_value::<MonthIndex>(json!(12)).is_err());
}
