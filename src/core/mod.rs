//! # Core Module
//!
//! The UI-agnostic cleaning and auditing engine.
//!
//! ## Modules
//! - `scanner` - Lists candidate images in a directory
//! - `sniff` - Detects the real image type from file content
//! - `sanitizer` - Re-encodes images from raw pixels to drop metadata
//! - `metadata` - Extracts and formats EXIF data
//! - `reporter` - Builds per-file EXIF reports and renders them

pub mod metadata;
pub mod reporter;
pub mod sanitizer;
pub mod scanner;
pub mod sniff;

// Re-export commonly used types
pub use metadata::{format_exif, ExifExtractor, ExifRecord, ExifValue, KamadakExtractor};
pub use reporter::{ImageReport, MetadataReporter};
pub use sanitizer::{EncodePolicy, Sanitizer, SanitizerBuilder, StripOutcome};
pub use sniff::{sniff, ImageKind};
