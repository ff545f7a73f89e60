//! Report rendering.
//!
//! HTML output escapes every file name and EXIF value, since both come
//! straight from untrusted files.

use super::ImageReport;
use crate::error::ReportError;
use quick_xml::escape::escape;
use std::io::Write;
use std::path::Path;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Html,
    Json,
}

impl ExportFormat {
    /// Guess the format from a file extension, defaulting to HTML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Html,
        }
    }
}

/// Write a bare two-column table: `Image Name` and `EXIF Data`
pub fn render_html<W: Write>(reports: &[ImageReport], mut writer: W) -> std::io::Result<()> {
    writeln!(writer, r#"<table border="1">"#)?;
    writeln!(writer, "<tr><th>Image Name</th><th>EXIF Data</th></tr>")?;

    for report in reports {
        writeln!(
            writer,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape(report.name.as_str()),
            escape(report.exif.as_str())
        )?;
    }

    writeln!(writer, "</table>")
}

/// Write a standalone HTML page wrapping the table
pub fn render_html_document<W: Write>(
    reports: &[ImageReport],
    mut writer: W,
    title: &str,
) -> std::io::Result<()> {
    let title = escape(title);
    write!(
        writer,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{}</title>
    <style>
        body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; padding: 2rem; }}
        table {{ border-collapse: collapse; }}
        th, td {{ padding: 0.25rem 0.75rem; text-align: left; vertical-align: top; }}
        td:last-child {{ font-family: monospace; font-size: 0.8rem; word-break: break-word; }}
    </style>
</head>
<body>
    <h1>{}</h1>
"#,
        title, title
    )?;

    render_html(reports, &mut writer)?;

    write!(writer, "</body>\n</html>\n")
}

/// Write the reports as a pretty-printed JSON array
pub fn render_json<W: Write>(reports: &[ImageReport], writer: W) -> std::io::Result<()> {
    serde_json::to_writer_pretty(writer, reports).map_err(std::io::Error::from)
}

/// Export reports to a file
pub fn export_to_file(
    reports: &[ImageReport],
    path: &Path,
    format: ExportFormat,
) -> Result<(), ReportError> {
    let to_error = |source| ReportError::Export {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::create(path).map_err(to_error)?;
    let mut writer = std::io::BufWriter::new(file);

    match format {
        ExportFormat::Html => {
            let title = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("EXIF Report");
            render_html_document(reports, &mut writer, title)
        }
        ExportFormat::Json => render_json(reports, &mut writer),
    }
    .and_then(|_| writer.flush())
    .map_err(to_error)
}
