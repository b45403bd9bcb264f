//! I/O operations for benchmark payloads and records.
//!
//! This module reads raw tool output for the extraction dispatcher and
//! reads/writes normalized [`Benchmark`] records as JSON.

use crate::error::{ExtractError, Result};
use crate::result::Benchmark;
use std::fs;
use std::io;
use std::path::Path;

/// Read a raw benchmark tool payload.
pub fn read_payload(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a benchmark record as pretty-printed JSON.
pub fn write_benchmark_json(bench: &Benchmark, path: impl AsRef<Path>) -> io::Result<()> {
    let json = serde_json::to_string_pretty(bench).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, json)
}

/// Read a benchmark record previously written by [`write_benchmark_json`].
pub fn read_benchmark_json(path: impl AsRef<Path>) -> io::Result<Benchmark> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
