use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use super::label::{Verdict, NEUTRAL_SYMBOL};
use super::store::{AnnotationRecord, AnnotationStore};
use crate::core::dataset::{strip_bom, ImageGroup};
use crate::core::error::{ExportError, LoadError};

/// Column layout of the annotation export
pub const EXPORT_COLUMNS: [&str; 4] = ["song_id", "image_id", "group", "label"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Row shape shared by the export writer and the prior-export reader
#[derive(Debug, Serialize, Deserialize)]
struct ExportRow {
    song_id: String,
    image_id: String,
    group: String,
    label: String,
}

impl From<&AnnotationRecord> for ExportRow {
    fn from(record: &AnnotationRecord) -> Self {
        Self {
            song_id: record.song_id.clone(),
            image_id: record.image_id.clone(),
            group: record.group.as_str().to_string(),
            label: record.verdict.symbol().to_string(),
        }
    }
}

/// Result of a successful export write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: usize,
}

/// Parse exported annotations. Rows carrying the neutral symbol are skipped.
pub fn read_annotations(text: &str) -> Result<Vec<AnnotationRecord>, LoadError> {
    let text = strip_bom(text);
    if text.trim().is_empty() {
        warn!("Annotation file is empty, treating it as having no records");
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    for column in EXPORT_COLUMNS {
        if !headers.iter().any(|name| name == column) {
            return Err(LoadError::MissingColumn(column.to_string()));
        }
    }

    let mut records = Vec::new();
    for raw in reader.records() {
        let raw = raw?;
        // blank lines are skipped by the reader, so count from the record itself
        let line = raw.position().map(|p| p.line()).unwrap_or(0);
        let row: ExportRow = raw.deserialize(Some(&headers))?;

        let group = ImageGroup::parse(&row.group).ok_or_else(|| LoadError::InvalidRecord {
            line,
            reason: format!("unknown group `{}`", row.group),
        })?;

        let verdict = match Verdict::parse(&row.label) {
            Some(verdict) => verdict,
            None if row.label == NEUTRAL_SYMBOL || row.label.is_empty() => {
                warn!(
                    "Skipping neutral annotation for ({}, {})",
                    row.song_id, row.image_id
                );
                continue;
            }
            None => {
                return Err(LoadError::InvalidRecord {
                    line,
                    reason: format!("unknown label `{}`", row.label),
                })
            }
        };

        records.push(AnnotationRecord::new(row.song_id, row.image_id, group, verdict));
    }

    Ok(records)
}

/// Seed a store from a prior export. A missing file yields an empty store.
pub fn load_prior_annotations(path: &Path) -> Result<AnnotationStore, LoadError> {
    if !path.exists() {
        info!("No prior annotations at {:?}, starting empty", path);
        return Ok(AnnotationStore::new());
    }

    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_annotations(&text)?;
    let row_count = records.len();
    let store = AnnotationStore::seeded(records);

    if store.len() < row_count {
        warn!(
            "Prior annotations contained {} repeated pairs, kept the first of each",
            row_count - store.len()
        );
    }
    info!("Restored {} annotations from {:?}", store.len(), path);
    Ok(store)
}

/// Serialize the store as UTF-8 CSV with a byte order mark.
/// An empty store is refused with [`ExportError::EmptyStore`].
pub fn to_csv_bytes(store: &AnnotationStore) -> Result<Vec<u8>, ExportError> {
    if store.is_empty() {
        return Err(ExportError::EmptyStore);
    }

    let mut buffer = UTF8_BOM.to_vec();
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        for record in store.records() {
            writer.serialize(ExportRow::from(record))?;
        }
        writer.flush().map_err(csv::Error::from)?;
    }
    Ok(buffer)
}

/// Write the export to `path`, replacing any existing file atomically
pub fn write_export(store: &AnnotationStore, path: &Path) -> Result<ExportSummary, ExportError> {
    let bytes = to_csv_bytes(store)?;
    let io_error = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "annotations.csv".to_string());
    let temp_path = path.with_file_name(format!(".{}.tmp", file_name));
    debug!("Writing export to temporary file {:?}", temp_path);

    fs::write(&temp_path, &bytes).map_err(io_error)?;
    if let Err(e) = fs::rename(&temp_path, path) {
        error!("Failed to move export into place at {:?}: {}", path, e);
        let _ = fs::remove_file(&temp_path);
        return Err(io_error(e));
    }

    info!("Exported {} annotations to {:?}", store.len(), path);
    Ok(ExportSummary {
        path: path.to_path_buf(),
        rows: store.len(),
    })
}
