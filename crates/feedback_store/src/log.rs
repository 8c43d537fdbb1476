//! CSV-backed feedback log.

use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use feature_extractor::{FeatureRecord, FeatureValue, FieldKind, SchemaVersion};
use intake_structs::FeedbackLabel;
use tracing::{debug, info};

use crate::record::{
    FeedbackRecord, LABEL_COLUMN, PREDICTED_COLUMN, REAL_COLUMN, TIMESTAMP_COLUMN,
    TIMESTAMP_FORMAT,
};
use crate::FeedbackError;

/// Number of fixed columns around the feature columns.
const FIXED_COLUMNS: usize = 4;

/// Handle to a feedback CSV file.
#[derive(Debug, Clone)]
pub struct FeedbackLog {
    path: PathBuf,
}

impl FeedbackLog {
    /// Creates a handle; the file is created on first append.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one record.
    ///
    /// The first write creates the file (and its parent directories) with a
    /// header. Later writes only append rows, after checking the existing
    /// header matches this record's columns.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure or if the existing header differs.
    pub fn append(&self, record: &FeedbackRecord) -> Result<(), FeedbackError> {
        let header = record.header();
        let existing = self.read_header()?;

        let mut buffer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        match existing {
            Some(found) if found != header => {
                return Err(FeedbackError::HeaderMismatch {
                    path: self.path.clone(),
                    expected: header,
                    found,
                });
            }
            Some(_) => {}
            None => {
                if let Some(parent) = self.path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    std::fs::create_dir_all(parent)?;
                }
                buffer.write_record(&header)?;
                info!(path = %self.path.display(), "Creating feedback log");
            }
        }

        buffer.write_record(record.to_row())?;
        let bytes = buffer
            .into_inner()
            .map_err(|e| FeedbackError::Io(e.into_error()))?;

        // Header (if any) and row go out in one write.
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&bytes)?;
        file.flush()?;

        debug!(path = %self.path.display(), label = %record.label, "Appended feedback");

        Ok(())
    }

    /// Reads every record in the log. A missing or empty file is an empty
    /// log.
    ///
    /// Feature columns are decoded by their kind when the header matches a
    /// known schema, so free text that looks numeric stays text.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure or if a row cannot be parsed.
    pub fn read_all(&self) -> Result<Vec<FeedbackRecord>, FeedbackError> {
        if self.is_empty()? {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)?;
        let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let feature_names = feature_columns(&header)?;
        let kinds = column_kinds(feature_names);

        let mut records = Vec::new();
        for (idx, row) in reader.records().enumerate() {
            let row = row?;
            records.push(parse_row(idx + 1, &row, feature_names, &kinds)?);
        }

        debug!(path = %self.path.display(), rows = records.len(), "Read feedback log");

        Ok(records)
    }

    fn is_empty(&self) -> Result<bool, FeedbackError> {
        Ok(!self.path.exists() || std::fs::metadata(&self.path)?.len() == 0)
    }

    fn read_header(&self) -> Result<Option<Vec<String>>, FeedbackError> {
        if self.is_empty()? {
            return Ok(None);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)?;
        Ok(Some(
            reader.headers()?.iter().map(str::to_string).collect(),
        ))
    }
}

fn feature_columns(header: &[String]) -> Result<&[String], FeedbackError> {
    let malformed = || FeedbackError::MalformedRow {
        row: 0,
        reason: format!("unexpected header {header:?}"),
    };

    if header.len() < FIXED_COLUMNS
        || header[0] != TIMESTAMP_COLUMN
        || header[header.len() - 3..] != [PREDICTED_COLUMN, LABEL_COLUMN, REAL_COLUMN]
    {
        return Err(malformed());
    }

    Ok(&header[1..header.len() - 3])
}

/// Column kinds of the schema the feature columns belong to, if any.
fn column_kinds(feature_names: &[String]) -> Vec<Option<FieldKind>> {
    match SchemaVersion::from_feature_names(feature_names.iter().map(String::as_str)) {
        Some(schema) => {
            debug!(schema = %schema, "Feedback log matches schema");
            schema.fields().into_iter().map(|f| Some(f.kind)).collect()
        }
        None => vec![None; feature_names.len()],
    }
}

fn parse_row(
    row_idx: usize,
    row: &csv::StringRecord,
    feature_names: &[String],
    kinds: &[Option<FieldKind>],
) -> Result<FeedbackRecord, FeedbackError> {
    let malformed = |reason: String| FeedbackError::MalformedRow {
        row: row_idx,
        reason,
    };

    if row.len() != feature_names.len() + FIXED_COLUMNS {
        return Err(malformed(format!(
            "expected {} columns, found {}",
            feature_names.len() + FIXED_COLUMNS,
            row.len()
        )));
    }

    let field = |i: usize| row.get(i).unwrap_or_default();

    let timestamp = NaiveDateTime::parse_from_str(field(0), TIMESTAMP_FORMAT)
        .map_err(|e| malformed(format!("bad timestamp `{}`: {e}", field(0))))?;

    let mut features = FeatureRecord::new();
    for (offset, name) in feature_names.iter().enumerate() {
        let raw = field(offset + 1);
        let value = match kinds.get(offset).and_then(Option::as_ref) {
            Some(kind) => kind
                .decode(raw)
                .ok_or_else(|| malformed(format!("column `{name}` is not a number: `{raw}`")))?,
            None => FeatureValue::parse_lossy(raw),
        };
        features.push(name.as_str(), value);
    }

    let tail = feature_names.len() + 1;
    let predicted_days: f64 = field(tail)
        .parse()
        .map_err(|e| malformed(format!("bad prediction `{}`: {e}", field(tail))))?;
    let label: FeedbackLabel = field(tail + 1)
        .parse()
        .map_err(|e| malformed(format!("{e}")))?;
    let real_days = match field(tail + 2).trim() {
        "" => None,
        raw => Some(
            raw.parse::<f64>()
                .map_err(|e| malformed(format!("bad real days `{raw}`: {e}")))?,
        ),
    };

    Ok(FeedbackRecord {
        timestamp,
        features,
        predicted_days,
        label,
        real_days,
    })
}
