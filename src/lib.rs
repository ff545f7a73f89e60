//! # EXIF Cleaner
//!
//! Strips metadata from a directory of images by decoding every file to
//! raw pixels and writing it again from scratch, and reports the EXIF
//! data that a directory still contains.
//!
//! ## Core Philosophy
//! - **Re-encode, never patch** - no byte of the original container is copied
//! - **Trust content, not names** - the real format is sniffed from the bytes
//! - **One bad file never stops a batch** - failures stay with the file that caused them
//!
//! ## Architecture
//! - `core` - Sanitizer and metadata reporter
//! - `events` - Progress events for front ends
//! - `error` - Error types
//! - `cli` - Command-line interface (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use crate::core::{ImageReport, MetadataReporter, Sanitizer};
pub use error::{ExifCleanerError, Result};

/// Initialize tracing for the library
///
/// Reads the filter from `RUST_LOG`. Call once from the binary entry point.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber was already installed");
    }
}
