//! # Reporter Module
//!
//! Lists the EXIF data found in every image of a directory.
//!
//! Used to audit a folder before cleaning it, or to confirm afterwards
//! that the cleaned copies carry nothing. Each file becomes one
//! [`ImageReport`] holding the file name and the formatted EXIF string
//! (`"No data"` when nothing could be read).

mod export;

pub use export::{export_to_file, render_html, render_html_document, render_json, ExportFormat};

use crate::core::metadata::{format_exif, ExifExtractor, KamadakExtractor};
use crate::core::scanner::{normalize_dir, DirectoryLister, ScanConfig};
use crate::error::{ExifCleanerError, ReportError, ScanError};
use crate::events::{null_sender, EventSender, ReportEvent};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// EXIF summary for one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReport {
    /// File name without directory
    pub name: String,
    /// Formatted EXIF data, or `"No data"`
    pub exif: String,
}

/// Collects EXIF reports for a directory
pub struct MetadataReporter<E = KamadakExtractor> {
    directory: PathBuf,
    lister: DirectoryLister,
    extractor: E,
}

impl MetadataReporter<KamadakExtractor> {
    /// Reporter over `directory` using kamadak-exif
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self::with_extractor(directory, KamadakExtractor)
    }
}

impl<E: ExifExtractor> MetadataReporter<E> {
    /// Reporter over `directory` using a custom extractor
    pub fn with_extractor(directory: impl AsRef<Path>, extractor: E) -> Self {
        Self {
            directory: normalize_dir(directory.as_ref()),
            lister: DirectoryLister::new(ScanConfig::default()),
            extractor,
        }
    }

    /// Replace the directory listing options
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.lister = DirectoryLister::new(config);
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// One report per candidate file, in listing order
    pub fn collect(&self) -> Result<Vec<ImageReport>, ScanError> {
        self.collect_with_events(&null_sender())
    }

    /// Like [`collect`](Self::collect), publishing progress events
    pub fn collect_with_events(&self, events: &EventSender) -> Result<Vec<ImageReport>, ScanError> {
        let files = self.lister.list(&self.directory)?;
        events.report(ReportEvent::Started {
            total_files: files.len(),
        });

        let mut reports = Vec::with_capacity(files.len());
        for path in files {
            let extracted = self.extractor.extract(&path);
            if let Err(ref e) = extracted {
                tracing::debug!(path = %path.display(), error = %e, "no EXIF data");
            }

            events.report(ReportEvent::FileRead {
                path: path.clone(),
                has_exif: extracted.is_ok(),
            });

            reports.push(ImageReport {
                name: file_name(&path),
                exif: format_exif(&extracted),
            });
        }

        events.report(ReportEvent::Completed {
            total_files: reports.len(),
        });
        Ok(reports)
    }

    /// Collect and render as an escaped two-column HTML table
    pub fn render(&self) -> Result<String, ExifCleanerError> {
        let reports = self.collect()?;
        let mut output = Vec::new();
        render_html(&reports, &mut output)
            .map_err(|e| ReportError::GenerationFailed(e.to_string()))?;
        String::from_utf8(output)
            .map_err(|e| ReportError::GenerationFailed(e.to_string()).into())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
