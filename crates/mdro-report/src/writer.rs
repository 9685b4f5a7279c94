//! CSV and JSON output.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use serde::Serialize;
use tracing::debug;

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    Ok(())
}

/// Write a frame as CSV with a header row.
pub fn write_frame_csv(path: &Path, frame: &mut DataFrame) -> Result<()> {
    create_parent(path)?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(BufWriter::new(file))
        .include_header(true)
        .with_separator(b',')
        .finish(frame)
        .with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), rows = frame.height(), "csv written");
    Ok(())
}

/// Write a value as pretty-printed JSON.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    create_parent(path)?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), "json written");
    Ok(())
}
