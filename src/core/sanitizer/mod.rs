//! # Sanitizer Module
//!
//! Writes metadata-free copies of every image in a directory.
//!
//! Each file is decoded to raw pixels and encoded again from scratch,
//! so nothing from the original container (EXIF, IPTC, XMP, text
//! chunks) can survive. The output keeps the original file name.
//!
//! ## Per-file flow
//! 1. **Sniff** - read the bytes and detect JPEG, PNG or GIF by content
//! 2. **Decode** - build a pixel buffer under the allocation limit
//! 3. **Encode** - apply the [`EncodePolicy`] for that format
//! 4. **Write** - store the new file in the output directory
//!
//! Unsupported content produces one `Unsupported file type: <path>` line on
//! the diagnostic stream. Decode and encode failures are logged and the
//! file is skipped. Neither stops the batch.
//!
//! ## Example
//! ```rust,ignore
//! let sanitizer = Sanitizer::new("photos/", "photos-clean/")?;
//! sanitizer.clean_all()?;
//! ```

mod codec;
mod policy;

pub use codec::DecodedImage;
pub use policy::{
    EncodePolicy, FormatPolicies, GifPolicy, JpegPolicy, PngCompression, PngPolicy,
    MAX_JPEG_QUALITY,
};

use crate::core::scanner::{normalize_dir, DirectoryLister, ScanConfig};
use crate::core::sniff::{sniff, ImageKind};
use crate::error::{SanitizeError, ScanError};
use crate::events::{null_sender, CleanEvent, CleanSummary, EventSender};
use image::Limits;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default decode allocation ceiling (3 GiB)
pub const DEFAULT_MAX_ALLOC: u64 = 3 * 1024 * 1024 * 1024;

/// Configuration for a sanitizer
#[derive(Debug, Clone)]
pub struct SanitizerConfig {
    /// Encode settings per format
    pub policies: FormatPolicies,
    /// Largest allocation a single decode may make, in bytes
    pub max_alloc: u64,
    /// Directory listing options
    pub scan_config: ScanConfig,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            policies: FormatPolicies::default(),
            max_alloc: DEFAULT_MAX_ALLOC,
            scan_config: ScanConfig::default(),
        }
    }
}

/// What happened to a single file
#[derive(Debug)]
pub enum StripOutcome {
    /// A cleaned copy was written to this path
    Written(PathBuf),
    /// Content is not JPEG, PNG or GIF; nothing written
    Unsupported,
    /// Recognized image that could not be processed; nothing written
    Skipped(SanitizeError),
}

/// Builder for sanitizer configuration
pub struct SanitizerBuilder {
    input_dir: PathBuf,
    output_dir: PathBuf,
    config: SanitizerConfig,
}

impl SanitizerBuilder {
    /// Start a builder for the given input and output directories
    pub fn new(input_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        Self {
            input_dir: input_dir.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
            config: SanitizerConfig::default(),
        }
    }

    /// Set the JPEG quality (clamped to 1-100)
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.config.policies.jpeg.quality = quality.clamp(1, MAX_JPEG_QUALITY);
        self
    }

    /// Set the PNG compression effort
    pub fn png_compression(mut self, compression: PngCompression) -> Self {
        self.config.policies.png.compression = compression;
        self
    }

    /// Replace the whole policy table
    pub fn policies(mut self, policies: FormatPolicies) -> Self {
        self.config.policies = policies;
        self
    }

    /// Set the decode allocation ceiling in bytes
    pub fn max_alloc(mut self, bytes: u64) -> Self {
        self.config.max_alloc = bytes;
        self
    }

    /// Set directory listing options
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.config.scan_config = config;
        self
    }

    /// Create the output directory and build the sanitizer.
    ///
    /// Fails only if the output directory cannot be created.
    pub fn build(self) -> Result<Sanitizer, SanitizeError> {
        let input_dir = normalize_dir(&self.input_dir);
        let output_dir = normalize_dir(&self.output_dir);

        ensure_output_dir(&output_dir)?;

        Ok(Sanitizer {
            lister: DirectoryLister::new(self.config.scan_config.clone()),
            input_dir,
            output_dir,
            config: self.config,
        })
    }
}

/// Strips metadata from every image in a directory
pub struct Sanitizer {
    input_dir: PathBuf,
    output_dir: PathBuf,
    config: SanitizerConfig,
    lister: DirectoryLister,
}

impl Sanitizer {
    /// Create a sanitizer with default settings.
    ///
    /// The output directory is created (recursively) if it is missing.
    pub fn new(
        input_dir: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
    ) -> Result<Self, SanitizeError> {
        SanitizerBuilder::new(input_dir, output_dir).build()
    }

    /// Create a builder
    pub fn builder(input_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> SanitizerBuilder {
        SanitizerBuilder::new(input_dir, output_dir)
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn config(&self) -> &SanitizerConfig {
        &self.config
    }

    /// Files that `clean_all` would process, in listing order
    pub fn candidates(&self) -> Result<Vec<PathBuf>, ScanError> {
        self.lister.list(&self.input_dir)
    }

    /// Clean every candidate, printing diagnostics to stdout
    pub fn clean_all(&self) -> Result<(), ScanError> {
        let stdout = std::io::stdout();
        let mut diagnostics = stdout.lock();
        self.clean_all_with(&mut diagnostics, &null_sender())?;
        Ok(())
    }

    /// Clean every candidate with an explicit diagnostic sink and event sender.
    ///
    /// Only a failure to list the input directory is returned as an
    /// error; per-file problems are counted in the summary.
    pub fn clean_all_with<W: Write>(
        &self,
        diagnostics: &mut W,
        events: &EventSender,
    ) -> Result<CleanSummary, ScanError> {
        let files = self.candidates()?;

        let mut summary = CleanSummary {
            total_files: files.len(),
            ..Default::default()
        };
        events.clean(CleanEvent::Started {
            total_files: files.len(),
        });

        for file in files {
            match self.strip(&file, diagnostics) {
                StripOutcome::Written(destination) => {
                    summary.written += 1;
                    events.clean(CleanEvent::FileWritten {
                        source: file,
                        destination,
                    });
                }
                StripOutcome::Unsupported => {
                    summary.unsupported += 1;
                    events.clean(CleanEvent::Unsupported { path: file });
                }
                StripOutcome::Skipped(error) => {
                    summary.skipped += 1;
                    events.clean(CleanEvent::Skipped {
                        path: file,
                        reason: error.to_string(),
                    });
                }
            }
        }

        events.clean(CleanEvent::Completed { summary });
        Ok(summary)
    }

    /// Strip a single file into the output directory.
    ///
    /// Never fails: every problem is reported through the outcome.
    pub fn strip<W: Write>(&self, file: &Path, diagnostics: &mut W) -> StripOutcome {
        let bytes = match fs::read(file) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(path = %file.display(), error = %e, "could not read file for sniffing");
                report_unsupported(file, diagnostics);
                return StripOutcome::Unsupported;
            }
        };

        let Some(kind) = sniff(&bytes) else {
            report_unsupported(file, diagnostics);
            return StripOutcome::Unsupported;
        };

        let destination = match file.file_name() {
            Some(name) => self.output_dir.join(name),
            None => {
                report_unsupported(file, diagnostics);
                return StripOutcome::Unsupported;
            }
        };

        match self.reencode(file, &bytes, kind, &destination) {
            Ok(()) => {
                tracing::debug!(
                    source = %file.display(),
                    destination = %destination.display(),
                    format = %kind,
                    "wrote cleaned image"
                );
                StripOutcome::Written(destination)
            }
            Err(error) => {
                tracing::warn!(path = %file.display(), error = %error, "skipping image");
                StripOutcome::Skipped(error)
            }
        }
    }

    fn reencode(
        &self,
        file: &Path,
        bytes: &[u8],
        kind: ImageKind,
        destination: &Path,
    ) -> Result<(), SanitizeError> {
        let policy = self.config.policies.policy_for(kind);

        // The pixel buffer lives only inside this block and is dropped
        // as soon as the encode attempt returns, whatever the result.
        let encoded = {
            let decoded = DecodedImage::decode(bytes, kind, self.decode_limits()).map_err(
                |e| SanitizeError::Decode {
                    path: file.to_path_buf(),
                    reason: e.to_string(),
                },
            )?;
            tracing::trace!(
                path = %file.display(),
                width = decoded.width(),
                height = decoded.height(),
                alpha = decoded.has_alpha(),
                "decoded"
            );
            decoded.encode(&policy)
        }
        .map_err(|e| SanitizeError::Encode {
            path: file.to_path_buf(),
            reason: e.to_string(),
        })?;

        fs::write(destination, encoded).map_err(|source| SanitizeError::Write {
            path: destination.to_path_buf(),
            source,
        })
    }

    fn decode_limits(&self) -> Limits {
        let mut limits = Limits::default();
        limits.max_alloc = Some(self.config.max_alloc);
        limits
    }
}

fn report_unsupported<W: Write>(file: &Path, diagnostics: &mut W) {
    if let Err(e) = writeln!(diagnostics, "Unsupported file type: {}", file.display()) {
        tracing::warn!(error = %e, "failed to write diagnostic line");
    }
}

fn ensure_output_dir(path: &Path) -> Result<(), SanitizeError> {
    if path.is_dir() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }

    builder
        .create(path)
        .map_err(|source| SanitizeError::OutputDirectory {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Event, EventChannel};
    use image::{DynamicImage, Rgb, RgbImage};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn write_png(path: &Path) {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 3, Rgb([10, 20, 30])));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        fs::write(path, bytes).unwrap();
    }

    #[test]
    fn new_creates_missing_output_directory() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("a").join("b").join("clean");

        let sanitizer = Sanitizer::new(temp.path(), &output).unwrap();

        assert!(output.is_dir());
        assert_eq!(sanitizer.output_dir(), output.as_path());
    }

    #[cfg(unix)]
    #[test]
    fn output_directory_is_created_with_broad_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let output = temp.path().join("clean");
        Sanitizer::new(temp.path(), &output).unwrap();

        let mode = fs::metadata(&output).unwrap().permissions().mode() & 0o777;
        // umask may remove bits, but the owner always keeps rwx.
        assert_eq!(mode & 0o700, 0o700);
    }

    #[test]
    fn new_fails_when_output_path_is_a_file() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("taken");
        fs::write(&blocker, b"file").unwrap();

        let result = Sanitizer::new(temp.path(), blocker.join("clean"));

        assert!(matches!(result, Err(SanitizeError::OutputDirectory { .. })));
    }

    #[test]
    fn paths_are_normalized() {
        let temp = TempDir::new().unwrap();
        let input = format!("{}/", temp.path().display());
        let output = format!("{}/out//", temp.path().display());

        let sanitizer = Sanitizer::new(&input, &output).unwrap();

        assert_eq!(sanitizer.input_dir(), temp.path());
        assert_eq!(sanitizer.output_dir(), temp.path().join("out").as_path());
    }

    #[test]
    fn builder_clamps_jpeg_quality() {
        let temp = TempDir::new().unwrap();
        let sanitizer = Sanitizer::builder(temp.path(), temp.path().join("out"))
            .jpeg_quality(0)
            .build()
            .unwrap();
        assert_eq!(sanitizer.config().policies.jpeg.quality, 1);
    }

    #[test]
    fn strip_writes_same_basename() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let source = input.path().join("photo.png");
        write_png(&source);

        let sanitizer = Sanitizer::new(input.path(), output.path()).unwrap();
        let mut diagnostics = Vec::new();
        let outcome = sanitizer.strip(&source, &mut diagnostics);

        let expected = output.path().join("photo.png");
        assert!(matches!(outcome, StripOutcome::Written(ref p) if p == &expected));
        assert_eq!(sniff(&fs::read(&expected).unwrap()), Some(ImageKind::Png));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn strip_follows_content_not_extension() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let source = input.path().join("mislabeled.jpg");
        write_png(&source);

        let sanitizer = Sanitizer::new(input.path(), output.path()).unwrap();
        sanitizer.strip(&source, &mut Vec::new());

        let written = fs::read(output.path().join("mislabeled.jpg")).unwrap();
        assert_eq!(sniff(&written), Some(ImageKind::Png));
    }

    #[test]
    fn strip_reports_unsupported_content() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let source = input.path().join("notes.gif");
        fs::write(&source, b"plain text pretending to be a gif").unwrap();

        let sanitizer = Sanitizer::new(input.path(), output.path()).unwrap();
        let mut diagnostics = Vec::new();
        let outcome = sanitizer.strip(&source, &mut diagnostics);

        assert!(matches!(outcome, StripOutcome::Unsupported));
        assert_eq!(
            String::from_utf8(diagnostics).unwrap(),
            format!("Unsupported file type: {}\n", source.display())
        );
        assert!(!output.path().join("notes.gif").exists());
    }

    #[test]
    fn strip_skips_corrupt_image_silently() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let source = input.path().join("broken.png");
        fs::write(&source, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0]).unwrap();

        let sanitizer = Sanitizer::new(input.path(), output.path()).unwrap();
        let mut diagnostics = Vec::new();
        let outcome = sanitizer.strip(&source, &mut diagnostics);

        assert!(matches!(
            outcome,
            StripOutcome::Skipped(SanitizeError::Decode { .. })
        ));
        assert!(diagnostics.is_empty());
        assert!(!output.path().join("broken.png").exists());
    }

    #[test]
    fn clean_all_emits_started_and_completed() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        write_png(&input.path().join("one.png"));
        fs::write(input.path().join("two.jpg"), b"nope").unwrap();

        let sanitizer = Sanitizer::new(input.path(), output.path()).unwrap();
        let (sender, receiver) = EventChannel::new();
        let summary = sanitizer
            .clean_all_with(&mut Vec::new(), &sender)
            .unwrap();
        drop(sender);

        assert_eq!(
            summary,
            CleanSummary {
                total_files: 2,
                written: 1,
                unsupported: 1,
                skipped: 0,
            }
        );

        let events: Vec<_> = receiver.iter().collect();
        assert!(matches!(
            events.first(),
            Some(Event::Clean(CleanEvent::Started { total_files: 2 }))
        ));
        assert!(matches!(
            events.last(),
            Some(Event::Clean(CleanEvent::Completed { .. }))
        ));
    }

    #[test]
    fn clean_all_fails_for_missing_input() {
        let output = TempDir::new().unwrap();
        let sanitizer = Sanitizer::new("/nonexistent/input/12345", output.path()).unwrap();

        let result = sanitizer.clean_all_with(&mut Vec::new(), &null_sender());

        assert!(matches!(result, Err(ScanError::DirectoryNotFound { .. })));
    }
}
