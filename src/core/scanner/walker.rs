//! Flat directory listing using walkdir.

use super::filter::ImageFilter;
use super::DEFAULT_EXTENSIONS;
use crate::error::ScanError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Configuration for directory listing
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Whether to follow symbolic links to files
    pub follow_symlinks: bool,
    /// Whether to include hidden files
    pub include_hidden: bool,
    /// Extensions to accept, matched case-sensitively
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: true,
            include_hidden: false,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Lists candidate image files at the top level of a directory
pub struct DirectoryLister {
    config: ScanConfig,
    filter: ImageFilter,
}

impl DirectoryLister {
    /// Create a new lister with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let filter = ImageFilter::new()
            .with_hidden(config.include_hidden)
            .with_extensions(config.extensions.clone());

        Self { config, filter }
    }

    /// List matching files in `root`, in directory listing order.
    ///
    /// Failing to open `root` itself is an error. Unreadable entries
    /// inside it are logged and skipped.
    pub fn list(&self, root: &Path) -> Result<Vec<PathBuf>, ScanError> {
        if !root.is_dir() {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.config.follow_symlinks);

        let mut files = Vec::new();

        for entry_result in walker {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(root_error(root, e)),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }

            if self.filter.should_include(path) {
                files.push(path.to_path_buf());
            }
        }

        tracing::debug!(dir = %root.display(), count = files.len(), "listed candidates");
        Ok(files)
    }
}

impl Default for DirectoryLister {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}

fn root_error(root: &Path, error: walkdir::Error) -> ScanError {
    let path = root.to_path_buf();
    match error.io_error().map(|e| e.kind()) {
        Some(ErrorKind::PermissionDenied) => ScanError::PermissionDenied { path },
        Some(ErrorKind::NotFound) => ScanError::DirectoryNotFound { path },
        _ => ScanError::ReadDirectory {
            path,
            source: std::io::Error::new(ErrorKind::Other, error.to_string()),
        },
    }
}
