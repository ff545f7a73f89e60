//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the cleaner and the reporter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Sanitizer events
    Clean(CleanEvent),
    /// Metadata report events
    Report(ReportEvent),
}

/// Events while stripping a directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CleanEvent {
    /// Cleaning has started
    Started { total_files: usize },
    /// A cleaned copy was written
    FileWritten {
        source: PathBuf,
        destination: PathBuf,
    },
    /// The file's content is not JPEG, PNG or GIF
    Unsupported { path: PathBuf },
    /// A recognized image could not be decoded, encoded or written
    Skipped { path: PathBuf, reason: String },
    /// Cleaning completed
    Completed { summary: CleanSummary },
}

/// Counts for a finished cleaning run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanSummary {
    /// Files listed as candidates
    pub total_files: usize,
    /// Cleaned copies written
    pub written: usize,
    /// Files whose content type is unsupported
    pub unsupported: usize,
    /// Recognized images that failed to decode, encode or write
    pub skipped: usize,
}

/// Events while collecting EXIF data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReportEvent {
    /// Collection has started
    Started { total_files: usize },
    /// A file was inspected
    FileRead { path: PathBuf, has_exif: bool },
    /// Collection completed
    Completed { total_files: usize },
}
