//! Pipeline options from an optional TOML file.
//!
//! Every table and key is optional; missing ones keep their defaults.
//!
//! ```toml
//! resistance_scope = "report"
//! sentinel_period = "month"
//! class_two_period = "year"
//!
//! [columns]
//! patient_id = "PatientID"
//!
//! [specimen_aliases]
//! "Blood(A-line)" = "Whole Blood"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use mdro_model::PipelineOptions;

/// Parse pipeline options from TOML text.
///
/// A `[specimen_aliases]` table replaces the built-in blood culture aliases.
pub fn parse_options(text: &str) -> Result<PipelineOptions> {
    let options: PipelineOptions = toml::from_str(text)?;
    Ok(options)
}

/// Load options from `path`, or the defaults when no file was given.
pub fn load_options(path: Option<&Path>) -> Result<PipelineOptions> {
    let Some(path) = path else {
        return Ok(PipelineOptions::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let options =
        parse_options(&text).with_context(|| format!("parse config {}", path.display()))?;
    debug!(
        path = %path.display(),
        alias_count = options.specimen_aliases.len(),
        "config loaded"
    );
    Ok(options)
}
