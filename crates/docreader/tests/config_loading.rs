//! Config file loading and discovery.

use docreader::core::config::CONFIG_FILE_NAME;
use docreader::{ClassifierConfig, DocReaderError, DocumentProcessor, ProcessorConfig};
use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_toml_with_all_sections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("docreader.toml");
    fs::write(
        &path,
        r#"
[ocr]
language = "eng+deu"
tessdata_path = "/opt/tessdata"

[quality]
max_chars = 256
neutral_score = 0.4

[classifier]
model_path = "models/sst2.onnx"
tokenizer_path = "models/tokenizer.json"
intra_threads = 2
"#,
    )
    .unwrap();

    let config = ProcessorConfig::from_file(&path).unwrap();
    assert_eq!(config.ocr.language, "eng+deu");
    assert_eq!(config.ocr.tessdata_path, Some(PathBuf::from("/opt/tessdata")));
    assert_eq!(config.quality.max_chars, 256);
    assert_eq!(config.quality.neutral_score, 0.4);

    let classifier = config.classifier.unwrap();
    assert_eq!(classifier.model_path, PathBuf::from("models/sst2.onnx"));
    assert_eq!(classifier.labels, vec!["NEGATIVE", "POSITIVE"]);
    assert_eq!(classifier.intra_threads, 2);
}

#[test]
fn test_empty_toml_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.toml");
    fs::write(&path, "").unwrap();

    let config = ProcessorConfig::from_file(&path).unwrap();
    assert_eq!(config, ProcessorConfig::default());
    assert_eq!(config.ocr.language, "eng");
    assert_eq!(config.quality.max_chars, 512);
    assert_eq!(config.quality.neutral_score, 0.5);
    assert!(config.classifier.is_none());
}

#[test]
fn test_yaml_and_json() {
    let dir = TempDir::new().unwrap();

    let yaml = dir.path().join("config.yml");
    fs::write(&yaml, "ocr:\n  language: fra\nquality:\n  max_chars: 128\n").unwrap();
    let config = ProcessorConfig::from_file(&yaml).unwrap();
    assert_eq!(config.ocr.language, "fra");
    assert_eq!(config.quality.max_chars, 128);

    let json = dir.path().join("config.json");
    fs::write(
        &json,
        r#"{"classifier": {"model_path": "m.onnx", "tokenizer_path": "t.json", "labels": ["bad", "good", "positive"]}}"#,
    )
    .unwrap();
    let config = ProcessorConfig::from_file(&json).unwrap();
    let classifier = config.classifier.unwrap();
    assert_eq!(classifier.labels.len(), 3);
    assert_eq!(classifier.intra_threads, 1);
}

#[test]
fn test_validation_rejects_bad_values() {
    let dir = TempDir::new().unwrap();
    let cases = [
        ("[quality]\nmax_chars = 0\n", "max_chars"),
        ("[quality]\nneutral_score = 1.5\n", "neutral_score"),
        ("[ocr]\nlanguage = \"  \"\n", "ocr.language"),
        (
            "[classifier]\nmodel_path = \"m\"\ntokenizer_path = \"t\"\nlabels = [\"A\", \"B\"]\n",
            "POSITIVE",
        ),
    ];

    for (i, (content, needle)) in cases.iter().enumerate() {
        let path = dir.path().join(format!("case{}.toml", i));
        fs::write(&path, content).unwrap();
        let err = ProcessorConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, DocReaderError::Validation { .. }));
        assert!(err.to_string().contains(needle), "{} should mention {}", err, needle);
    }
}

#[test]
fn test_malformed_files() {
    let dir = TempDir::new().unwrap();

    let toml = dir.path().join("bad.toml");
    fs::write(&toml, "[ocr\nlanguage = ").unwrap();
    assert!(ProcessorConfig::from_file(&toml).is_err());

    let json = dir.path().join("bad.json");
    fs::write(&json, "{ not json").unwrap();
    assert!(ProcessorConfig::from_file(&json).is_err());

    let missing = dir.path().join("missing.toml");
    let err = ProcessorConfig::from_file(&missing).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
#[serial]
fn test_discover_walks_up_parents() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "[ocr]\nlanguage = \"spa\"\n").unwrap();
    let nested = dir.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();

    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(&nested).unwrap();
    let discovered = ProcessorConfig::discover();
    std::env::set_current_dir(original).unwrap();

    let config = discovered.unwrap().expect("config should be discovered");
    assert_eq!(config.ocr.language, "spa");
}

#[test]
fn test_classifier_config_constructor() {
    let config = ClassifierConfig::new("model.onnx", "tokenizer.json");
    assert_eq!(config.labels, vec!["NEGATIVE", "POSITIVE"]);
    assert_eq!(config.intra_threads, 1);
}

#[test]
fn test_from_config_rejects_invalid() {
    let mut config = ProcessorConfig::default();
    config.quality.neutral_score = -0.1;
    assert!(DocumentProcessor::from_config(&config).is_err());
}

#[test]
fn test_from_config_applies_quality_settings() {
    let mut config = ProcessorConfig::default();
    config.quality.neutral_score = 0.3;
    let processor = DocumentProcessor::from_config(&config).unwrap();

    let result = processor.process(b"hello", Some("a.txt")).unwrap();
    assert!((result.confidence - 0.65).abs() < 1e-9);
}
