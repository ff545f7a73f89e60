//! # Metadata Module
//!
//! Reads EXIF tags from an image into an ordered key/value record and
//! formats that record for display.
//!
//! ## Record layout
//! - Primary IFD tags at the top level, keyed by tag name (`Make`, `Model`, ...)
//! - Thumbnail IFD tags grouped under `THUMBNAIL`
//! - Decoder-derived facts grouped under `COMPUTED` (`Width`, `Height`,
//!   `ByteOrderMotorola`). These are not original EXIF and are dropped
//!   when the record is formatted.
//!
//! Extraction is best effort: any failure is an `Err` that formatting
//! turns into `"No data"`.

use crate::error::MetadataError;
use exif::{Exif, Field, In, Reader, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Placeholder shown when a file or a tag has no value
pub const NO_DATA: &str = "No data";

/// Key of the synthetic decoder-derived group
pub const COMPUTED_GROUP: &str = "COMPUTED";

/// Key grouping tags from the thumbnail IFD
pub const THUMBNAIL_GROUP: &str = "THUMBNAIL";

/// A single EXIF value
#[derive(Debug, Clone, PartialEq)]
pub enum ExifValue {
    Text(String),
    Number(i64),
    Group(ExifRecord),
}

impl std::fmt::Display for ExifValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExifValue::Text(text) => write!(f, "{}", text),
            ExifValue::Number(n) => write!(f, "{}", n),
            ExifValue::Group(record) => write!(f, "{{{}}}", render_pairs(record)),
        }
    }
}

/// Ordered mapping from tag name to optional value.
///
/// Keys are unique; inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExifRecord {
    entries: Vec<(String, Option<ExifValue>)>,
}

impl ExifRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value, keeping first-insertion order
    pub fn insert(&mut self, key: impl Into<String>, value: Option<ExifValue>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: Option<ExifValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Option<ExifValue>> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in record order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&ExifValue>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }
}

/// Source of EXIF records, one file at a time
pub trait ExifExtractor {
    fn extract(&self, path: &Path) -> Result<ExifRecord, MetadataError>;
}

/// Extractor backed by kamadak-exif
#[derive(Debug, Clone, Copy, Default)]
pub struct KamadakExtractor;

impl ExifExtractor for KamadakExtractor {
    fn extract(&self, path: &Path) -> Result<ExifRecord, MetadataError> {
        let file = File::open(path).map_err(|source| MetadataError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let mut bufreader = BufReader::new(&file);
        let exif = Reader::new()
            .read_from_container(&mut bufreader)
            .map_err(|e| match e {
                exif::Error::NotFound(_) => MetadataError::NotFound {
                    path: path.to_path_buf(),
                },
                exif::Error::Io(source) => MetadataError::Open {
                    path: path.to_path_buf(),
                    source,
                },
                other => MetadataError::Malformed {
                    path: path.to_path_buf(),
                    reason: other.to_string(),
                },
            })?;

        let mut record = ExifRecord::new();
        let mut thumbnail = ExifRecord::new();

        for field in exif.fields() {
            let key = field.tag.to_string();
            let value = field_value(field, &exif);
            if field.ifd_num == In::PRIMARY {
                record.insert(key, value);
            } else {
                thumbnail.insert(key, value);
            }
        }

        if !thumbnail.is_empty() {
            record.insert(THUMBNAIL_GROUP, Some(ExifValue::Group(thumbnail)));
        }
        record.insert(COMPUTED_GROUP, Some(ExifValue::Group(computed_group(path, &exif))));

        Ok(record)
    }
}

/// Facts derived by the decoder rather than read from EXIF
fn computed_group(path: &Path, exif: &Exif) -> ExifRecord {
    let mut computed = ExifRecord::new();
    if let Ok((width, height)) = image::image_dimensions(path) {
        computed.insert("Width", Some(ExifValue::Number(i64::from(width))));
        computed.insert("Height", Some(ExifValue::Number(i64::from(height))));
    }
    computed.insert(
        "ByteOrderMotorola",
        Some(ExifValue::Number(i64::from(!exif.little_endian()))),
    );
    computed
}

/// Convert a kamadak field into a record value
fn field_value(field: &Field, exif: &Exif) -> Option<ExifValue> {
    match &field.value {
        Value::Ascii(strings) => ascii_text(strings).map(ExifValue::Text),
        Value::Short(v) if v.len() == 1 => Some(ExifValue::Number(i64::from(v[0]))),
        Value::Long(v) if v.len() == 1 => Some(ExifValue::Number(i64::from(v[0]))),
        Value::SLong(v) if v.len() == 1 => Some(ExifValue::Number(i64::from(v[0]))),
        Value::Undefined(bytes, _) if bytes.is_empty() => None,
        _ => {
            let text = field.display_value().with_unit(exif).to_string();
            (!text.is_empty()).then_some(ExifValue::Text(text))
        }
    }
}

/// Join the non-empty strings of an ASCII value
fn ascii_text(strings: &[Vec<u8>]) -> Option<String> {
    let parts: Vec<_> = strings
        .iter()
        .map(|bytes| String::from_utf8_lossy(bytes))
        .map(|s| s.trim_end_matches('\0').trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    (!parts.is_empty()).then(|| parts.join(", "))
}

fn render_pairs(record: &ExifRecord) -> String {
    record
        .iter()
        .map(|(key, value)| match value {
            Some(value) => format!("{}: {}", key, value),
            None => format!("{}: {}", key, NO_DATA),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format an extraction result for display.
///
/// - `Err(_)` becomes `"No data"`
/// - the `COMPUTED` group is left out
/// - every other key renders as `key: value` (`key: No data` when the
///   value is missing), joined with `", "`
pub fn format_exif(result: &Result<ExifRecord, MetadataError>) -> String {
    match result {
        Err(_) => NO_DATA.to_string(),
        Ok(record) => {
            let mut visible = record.clone();
            visible.entries.retain(|(key, _)| key != COMPUTED_GROUP);
            render_pairs(&visible)
        }
    }
}
