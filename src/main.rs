//! # exif-clean CLI
//!
//! Command-line interface for the EXIF cleaner.
//!
//! ## Usage
//! ```bash
//! exif-clean clean ~/Photos ~/Photos-clean
//! exif-clean report ~/Photos-clean --format html --out audit.html
//! ```

mod cli;

use exif_cleaner::Result;

fn main() -> Result<()> {
    exif_cleaner::init_tracing();
    cli::run()
}
