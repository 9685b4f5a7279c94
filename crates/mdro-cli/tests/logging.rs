//! Subscriber installation. Kept in its own test binary because the global
//! subscriber can only be set once per process.

use std::fs;

use mdro_cli::logging::{LogConfig, LogFormat, REDACTED_VALUE, init_logging, redact_value};
use tempfile::TempDir;
use tracing::level_filters::LevelFilter;

#[test]
fn json_events_append_to_log_file_with_patients_redacted() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("mdro.log");
    fs::write(&path, "earlier run\n").expect("seed log");
    let config = LogConfig {
        use_env_filter: false,
        ..LogConfig::default()
    }
    .with_level_filter(LevelFilter::INFO)
    .with_format(LogFormat::Json)
    .with_log_file(Some(path.clone()))
    .with_log_data(false);
    init_logging(&config).expect("init logging");

    tracing::info!(target: "mdro_cli", patient = redact_value("P-1234"), "isolate loaded");
    tracing::debug!(target: "mdro_cli", "below the configured level");
    tracing::info!(target: "polars", "dependency noise");

    let contents = fs::read_to_string(&path).expect("read log");
    assert!(contents.starts_with("earlier run\n"));
    assert!(contents.contains("isolate loaded"));
    assert!(contents.contains(REDACTED_VALUE));
    assert!(!contents.contains("P-1234"));
    assert!(!contents.contains("below the configured level"));
    assert!(!contents.contains("dependency noise"));
}
