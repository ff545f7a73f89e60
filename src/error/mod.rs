//! # Error Module
//!
//! Error types for the EXIF cleaner.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Contain per-file failures** - only directory-level problems reach the caller

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum ExifCleanerError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Sanitizing error: {0}")]
    Sanitize(#[from] SanitizeError),

    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("Report generation error: {0}")]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that occur while listing candidate images
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while stripping a single image
///
/// Only `OutputDirectory` escapes to callers; the rest are contained
/// inside the per-file routine and logged.
#[derive(Error, Debug)]
pub enum SanitizeError {
    #[error("Failed to create output directory {path}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read image file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Failed to encode image {path}: {reason}")]
    Encode { path: PathBuf, reason: String },

    #[error("Failed to write cleaned image {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while reading EXIF data
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No EXIF data in {path}")]
    NotFound { path: PathBuf },

    #[error("Malformed EXIF data in {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

/// Errors that occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report to {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to generate report: {0}")]
    GenerationFailed(String),
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, ExifCleanerError>;
