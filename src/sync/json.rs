//! Whole-file JSON array writer.
//!
//! A seed file is one compact JSON array. Writes go to a temporary file in
//! the destination directory which is then renamed over the target, so a
//! reader sees either the old or the new content.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors that can occur while reading or writing seed files.
#[derive(Error, Diagnostic, Debug)]
pub enum JsonError {
    #[error("IO error: {0}")]
    #[diagnostic(code(seedsync::sync::json::io))]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    #[diagnostic(code(seedsync::sync::json::serialize))]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to replace {path}: {source}")]
    #[diagnostic(code(seedsync::sync::json::persist))]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Write `items` as a single JSON array to `path`, replacing any prior content.
///
/// The parent directory is created when missing.
pub fn write_json_array<T: Serialize>(path: &Path, items: &[T]) -> Result<(), JsonError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        serde_json::to_writer(&mut writer, items)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;

    temp.persist(path).map_err(|e| JsonError::Persist {
        path: path.display().to_string(),
        source: e.error,
    })?;

    Ok(())
}

/// Read a JSON array file back into items.
pub fn read_json_array<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>, JsonError> {
    let file = File::open(path)?;
    let items = serde_json::from_reader(BufReader::new(file))?;
    Ok(items)
}
