//! Output rendering module
//!
//! Row-oriented rendering of results: plain rows on stdout, a bordered
//! table, or a timestamped CSV file. The first row of a result set is
//! always the header.

mod csv;
mod table;

pub use csv::file_output;
pub use table::{default_output, pretty_output};

use std::path::Path;

/// How results are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Space-separated rows on stdout
    Default,

    /// Bordered, left-aligned table on stdout
    Pretty,

    /// CSV file in the results directory
    File,
}

/// Renders result rows according to the chosen format
pub fn control_output(
    results: &[Vec<String>],
    format: OutputFormat,
    results_dir: &Path,
    mode: &str,
) -> crate::Result<()> {
    match format {
        OutputFormat::Default => default_output(results),
        OutputFormat::Pretty => pretty_output(results),
        OutputFormat::File => {
            file_output(results, results_dir, mode)?;
        }
    }
    Ok(())
}
