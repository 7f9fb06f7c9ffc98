//! CSV file output

use chrono::Local;
use csv::{QuoteStyle, WriterBuilder};
use std::path::{Path, PathBuf};
use tracing::info;

const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Writes result rows to a timestamped CSV file under `results_dir`
///
/// The file is named `<mode>_<timestamp>.csv`. All fields are quoted,
/// matching the strict CSV dialect the results have always used. Returns
/// the written path.
pub fn file_output(
    results: &[Vec<String>],
    results_dir: &Path,
    mode: &str,
) -> crate::Result<PathBuf> {
    std::fs::create_dir_all(results_dir)?;

    let timestamp = Local::now().format(FILE_TIMESTAMP_FORMAT);
    let file_path = results_dir.join(format!("{mode}_{timestamp}.csv"));

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_path(&file_path)?;
    for row in results {
        writer.write_record(row)?;
    }
    writer.flush()?;

    info!("Results saved to {}", file_path.display());
    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_output_writes_all_rows() {
        let dir = tempfile::tempdir().unwrap();
        let results = vec![
            vec!["Status".to_string(), "Count".to_string()],
            vec!["Active".to_string(), "31".to_string()],
        ];

        let path = file_output(&results, dir.path(), "pep").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        assert_eq!(content, "\"Status\",\"Count\"\n\"Active\",\"31\"\n");
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("pep_"));
    }

    #[test]
    fn test_file_output_creates_results_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("results");
        let results = vec![vec!["a".to_string()]];

        let path = file_output(&results, &nested, "whats-new").unwrap();
        assert!(path.exists());
    }
}
