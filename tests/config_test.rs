//! 設定ファイルの読み書きテスト

use genx_common::ModelName;
use genx_diagnostics::config::{Config, DEFAULT_BASE_URL};
use genx_diagnostics::error::GenxError;
use tempfile::tempdir;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).expect("読み込み失敗");

    assert_eq!(config.model, ModelName::Gemini15Flash);
    assert_eq!(config.precision.value(), 0.2);
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert!(config.api_key.is_none());
}

#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("genx").join("config.json");

    let mut config = Config::default();
    config.api_key = Some("test-key".into());
    config.model = ModelName::Gemini15Pro;
    config.precision = "0.6".parse().unwrap();
    config.save_to(&path).expect("保存失敗");

    let saved = std::fs::read_to_string(&path).unwrap();
    assert!(saved.contains("\"apiKey\""));
    assert!(saved.contains("gemini-1.5-pro"));

    let loaded = Config::load_from(&path).expect("読み込み失敗");
    assert_eq!(loaded.api_key.as_deref(), Some("test-key"));
    assert_eq!(loaded.model, ModelName::Gemini15Pro);
    assert_eq!(loaded.precision.value(), 0.6);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"precision": 0.9}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.precision.value(), 0.9);
    assert_eq!(config.model, ModelName::Gemini15Flash);
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
}

#[test]
fn test_out_of_range_precision_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"precision": 1.5}"#).unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, GenxError::JsonParse(_)));
}

#[test]
fn test_broken_json_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(Config::load_from(&path).is_err());
}
