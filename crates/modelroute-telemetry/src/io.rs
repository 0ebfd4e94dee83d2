//! JSONL I/O and atomic file operations

use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Result of scanning a JSONL file: parsed records plus the count of lines that were skipped
#[derive(Debug)]
pub struct JsonlScan<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

impl<T> Default for JsonlScan<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
        }
    }
}

/// Append a JSON record to a JSONL file
///
/// The whole line is written with a single `write_all` on a file opened in
/// append mode, so concurrent appenders interleave at line granularity.
pub fn append_jsonl<T: Serialize>(path: &Path, record: &T) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut line = serde_json::to_string(record)?;
    line.push('\n');

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())?;
    Ok(())
}

/// Scan a JSONL file, skipping blank, malformed, truncated or non-UTF-8 lines
///
/// A missing file yields an empty scan.
pub fn scan_jsonl<T: for<'de> Deserialize<'de>>(path: &Path) -> std::io::Result<JsonlScan<T>> {
    if !path.exists() {
        return Ok(JsonlScan::default());
    }

    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut scan = JsonlScan::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let Ok(line) = std::str::from_utf8(&buf) else {
            scan.skipped += 1;
            continue;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str(line) {
            Ok(record) => scan.records.push(record),
            Err(_) => scan.skipped += 1,
        }
    }

    Ok(scan)
}

/// Read all records from a JSONL file
pub fn read_jsonl<T: for<'de> Deserialize<'de>>(path: &Path) -> std::io::Result<Vec<T>> {
    scan_jsonl(path).map(|scan| scan.records)
}

/// Write data atomically using temp file + rename
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, data)?;
    std::fs::rename(temp_path, path)?;
    Ok(())
}
