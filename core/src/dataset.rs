//! Loading raw corpus texts from disk.
//!
//! Supported inputs: CSV with a `text` column, JSON (one object or an array), JSONL, plain
//! `.txt` files (one document each), or a directory holding any of these.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const EXTENSIONS: &[&str] = &["csv", "json", "jsonl", "txt"];

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(alias = "body")]
    text: String,
}

/// Load every document text under `path`, in file order and then record order.
pub fn load_texts(path: &Path) -> Result<Vec<String>> {
    let files: Vec<PathBuf> = if path.is_dir() {
        let mut files: Vec<PathBuf> = WalkDir::new(path)
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|p| p.is_file() && extension(p).is_some_and(|ext| EXTENSIONS.contains(&ext)))
            .collect();
        files.sort();
        files
    } else if path.is_file() {
        vec![path.to_path_buf()]
    } else {
        bail!("dataset path {} does not exist", path.display());
    };

    let mut texts = Vec::new();
    for file in &files {
        let loaded = load_file(file).with_context(|| format!("loading {}", file.display()))?;
        tracing::debug!(file = %file.display(), count = loaded.len(), "loaded dataset file");
        texts.extend(loaded);
    }
    tracing::info!(path = %path.display(), files = files.len(), num_texts = texts.len(), "loaded dataset");
    Ok(texts)
}

fn extension(path: &Path) -> Option<&str> { path.extension().and_then(|s| s.to_str()) }

fn load_file(file: &Path) -> Result<Vec<String>> {
    match extension(file) {
        Some("csv") => load_csv(file),
        Some("jsonl") => load_jsonl(file),
        Some("json") => load_json(file),
        Some("txt") => Ok(vec![fs::read_to_string(file)?]),
        _ => bail!("unsupported dataset format: {}", file.display()),
    }
}

fn load_csv(file: &Path) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_path(file)?;
    let column = match reader.headers()?.iter().position(|h| h.trim() == "text") {
        Some(column) => column,
        None => bail!("csv file has no `text` column"),
    };
    let mut texts = Vec::new();
    for record in reader.records() {
        let record = record?;
        match record.get(column) {
            Some(text) if !text.trim().is_empty() => texts.push(text.to_string()),
            _ => continue,
        }
    }
    Ok(texts)
}

fn load_jsonl(file: &Path) -> Result<Vec<String>> {
    let reader = BufReader::new(File::open(file)?);
    let mut texts = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let record: RawRecord = serde_json::from_str(&line).with_context(|| format!("line {}", lineno + 1))?;
        texts.push(record.text);
    }
    Ok(texts)
}

fn load_json(file: &Path) -> Result<Vec<String>> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => arr
            .into_iter()
            .map(|v| -> Result<String> { Ok(serde_json::from_value::<RawRecord>(v)?.text) })
            .collect(),
        serde_json::Value::Object(_) => Ok(vec![serde_json::from_value::<RawRecord>(json)?.text]),
        _ => bail!("expected a JSON object or array"),
    }
}
