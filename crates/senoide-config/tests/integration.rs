//! Integration tests for senoide-config file handling.

use senoide_config::{ConfigError, SynthesisConfig};
use tempfile::tempdir;

#[test]
fn save_then_load_round_trips_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("senoide.toml");

    let config = SynthesisConfig {
        sample_rate: 22050,
        freq_tolerance: 0.03,
        ..SynthesisConfig::default()
    };
    config.save(&path).unwrap();

    let loaded = SynthesisConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/deeper/senoide.toml");

    SynthesisConfig::default().save(&path).unwrap();
    assert!(path.is_file());
}

#[test]
fn loading_a_missing_file_reports_the_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = SynthesisConfig::load(&path).unwrap_err();
    match err {
        ConfigError::ReadFile { path: p, .. } => assert_eq!(p, path),
        other => panic!("expected ReadFile, got {other}"),
    }
}

#[test]
fn loading_a_file_without_tolerance_is_fatal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("partial.toml");
    std::fs::write(&path, "sample_rate = 48000\nn_fft = 4096\n").unwrap();

    assert!(matches!(
        SynthesisConfig::load(&path),
        Err(ConfigError::MissingParameter("freq_tolerance"))
    ));
}

#[test]
fn garbage_toml_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "sample_rate = = 48000").unwrap();

    assert!(matches!(
        SynthesisConfig::load(&path),
        Err(ConfigError::TomlParse(_))
    ));
}
