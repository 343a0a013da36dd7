//! Integration tests for LinalgConfig loading and Tensor (de)serialization.

use linvec::{det_with, equals, equals_with, LinalgConfig, Tensor};

// ---------------------------------------------------------------------------
// LinalgConfig
// ---------------------------------------------------------------------------

#[test]
fn config_defaults() {
    let config = LinalgConfig::default();
    assert_eq!(config.equality_tolerance, 1e-6);
    assert_eq!(config.det_zero_threshold, 1e-12);
    assert_eq!(config.singular_tolerance, 1e-12);
    assert_eq!(config.polar_max_iterations, 100);
    assert!(config.validate().is_ok());
}

#[test]
fn partial_json_keeps_other_defaults() {
    let config = LinalgConfig::from_json_str(r#"{"singular_tolerance": 1e-10}"#).unwrap();
    assert_eq!(config.singular_tolerance, 1e-10);
    assert_eq!(config.equality_tolerance, LinalgConfig::DEFAULT_EQUALITY_TOLERANCE);
    assert_eq!(config.det_zero_threshold, LinalgConfig::DEFAULT_DET_ZERO_THRESHOLD);
}

#[test]
fn empty_json_is_default() {
    let config = LinalgConfig::from_json_str("{}").unwrap();
    assert_eq!(config, LinalgConfig::default());
}

#[test]
fn negative_tolerance_is_rejected() {
    let err = LinalgConfig::from_json_str(r#"{"equality_tolerance": -1.0}"#).unwrap_err();
    assert!(err.to_string().contains("equality_tolerance"), "got: {}", err);
}

#[test]
fn zero_iterations_is_rejected() {
    assert!(LinalgConfig::from_json_str(r#"{"polar_max_iterations": 0}"#).is_err());
}

#[test]
fn malformed_json_is_rejected() {
    let err = LinalgConfig::from_json_str("{ not json").unwrap_err();
    assert!(err.to_string().contains("Failed to parse"), "got: {}", err);
}

#[test]
fn loaded_equality_tolerance_drives_equals_with() {
    let config = LinalgConfig::from_json_str(r#"{"equality_tolerance": 0.5}"#).unwrap();
    let a = Tensor::vector(vec![1.0]);
    let b = Tensor::vector(vec![1.1]);
    assert!(equals_with(&a, &b, &config));
    assert!(!equals(&a, &b));
    assert!(!equals_with(&a, &b, &LinalgConfig::default()));
}

#[test]
fn config_round_trips_through_json() {
    let config = LinalgConfig::new(1e-8, 1e-9);
    let json = serde_json::to_string(&config).unwrap();
    let back = LinalgConfig::from_json_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn config_loads_from_file() {
    let path = std::env::temp_dir().join(format!("linvec-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"det_zero_threshold": 0.5}"#).unwrap();
    let config = LinalgConfig::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.det_zero_threshold, 0.5);

    // a determinant below the threshold reads as zero
    let a = Tensor::matrix(vec![vec![0.5, 0.0], vec![0.0, 0.5]]).unwrap();
    assert_eq!(det_with(&a, &config).unwrap(), 0.0);
}

#[test]
fn missing_config_file_names_the_path() {
    let err = LinalgConfig::from_json_file("/nonexistent/linvec.json").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/linvec.json"));
}

// ---------------------------------------------------------------------------
// Tensor serde
// ---------------------------------------------------------------------------

#[test]
fn vector_serializes_as_flat_sequence() {
    let v = Tensor::vector(vec![1.5, -2.0]);
    assert_eq!(serde_json::to_string(&v).unwrap(), "[1.5,-2.0]");
}

#[test]
fn matrix_serializes_as_nested_rows() {
    let a = Tensor::matrix(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    let json = serde_json::to_string(&a).unwrap();
    assert_eq!(json, "[[1.0,2.0],[3.0,4.0]]");
    let back: Tensor = serde_json::from_str(&json).unwrap();
    assert_eq!(back, a);
}

#[test]
fn transposed_view_serializes_in_logical_order() {
    let a = Tensor::matrix(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
    let json = serde_json::to_string(&a.transpose_view()).unwrap();
    assert_eq!(json, "[[1.0,4.0],[2.0,5.0],[3.0,6.0]]");
}

#[test]
fn deserialize_accepts_integers_and_empty_input() {
    let v: Tensor = serde_json::from_str("[1, 2, 3]").unwrap();
    assert_eq!(v, Tensor::vector(vec![1.0, 2.0, 3.0]));
    let empty: Tensor = serde_json::from_str("[]").unwrap();
    assert!(empty.is_empty());
}

#[test]
fn deserialize_rejects_invalid_structure() {
    assert!(serde_json::from_str::<Tensor>("[1, [2, 3]]").is_err());
    assert!(serde_json::from_str::<Tensor>("[[1, 2], [3]]").is_err());
    assert!(serde_json::from_str::<Tensor>(r#"["a"]"#).is_err());
}
