//! File name filtering for the directory lister.

use super::DEFAULT_EXTENSIONS;
use std::collections::HashSet;
use std::path::Path;

/// Decides whether a file name looks like a supported image
pub struct ImageFilter {
    /// Accepted extensions, compared byte for byte
    extensions: HashSet<String>,
    /// Whether to include hidden files
    include_hidden: bool,
}

impl ImageFilter {
    /// Create a filter accepting `jpg`, `jpeg`, `png` and `gif`
    pub fn new() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            include_hidden: false,
        }
    }

    /// Include hidden files (starting with .)
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Override the list of extensions to accept
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions.into_iter().collect();
        self
    }

    /// Check if a file should be listed
    pub fn should_include(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        if !self.include_hidden && name.starts_with('.') {
            return false;
        }

        // No case folding: the suffix must match exactly.
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.contains(ext))
            .unwrap_or(false)
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::new()
    }
}
