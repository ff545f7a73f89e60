//! # Scanner Module
//!
//! Lists candidate image files in a single directory.
//!
//! The listing is a cheap pre-filter on the file name only. The true
//! content type is decided later by [`crate::core::sniff`].
//!
//! ## Matching rules
//! - Only the top level of the directory is listed (no recursion)
//! - Extensions are matched case-sensitively: `photo.jpg` matches, `photo.JPG` does not
//! - Hidden files (leading `.`) are skipped
//! - Files come back in directory listing order, which is filesystem-dependent
//!
//! ## Example
//! ```rust,ignore
//! use exif_cleaner::core::scanner::{DirectoryLister, ScanConfig};
//!
//! let lister = DirectoryLister::new(ScanConfig::default());
//! let files = lister.list(Path::new("/photos"))?;
//! ```

mod filter;
mod walker;

pub use filter::ImageFilter;
pub use walker::{DirectoryLister, ScanConfig};

use std::path::{Path, PathBuf};

/// Extensions accepted by default
pub const DEFAULT_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Normalize a directory path by dropping trailing separators.
///
/// `photos`, `photos/` and `photos///` all normalize to `photos`, so
/// joining a file name always yields `photos/<name>`. The filesystem
/// root is left untouched.
pub fn normalize_dir(path: &Path) -> PathBuf {
    let raw = path.as_os_str().to_string_lossy();
    let trimmed = raw.trim_end_matches(std::path::is_separator);

    if trimmed.is_empty() {
        if raw.is_empty() {
            PathBuf::from(".")
        } else {
            path.to_path_buf()
        }
    } else {
        PathBuf::from(trimmed)
    }
}
