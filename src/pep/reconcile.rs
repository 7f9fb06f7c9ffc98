//! Reconciliation engine
//!
//! Drives the row processor over every index row in order, builds the status
//! histogram, and collects discrepancies and per-row errors. A failing row
//! never aborts the pass; errors are reported in a batch once the pass
//! completes, so progress output and error output stay separated.

use crate::fetch::Fetcher;
use crate::html::{find_all, locate};
use crate::pep::row::{process_row, IndexRow, RowOutcome};
use indicatif::{ProgressBar, ProgressStyle};
use scraper::Html;
use tracing::{info, warn};
use url::Url;

/// Status counts in first-occurrence order
///
/// The statuses on a pass number fewer than a dozen, so a small ordered vec
/// keeps counting cheap while preserving the order statuses were first seen
/// in, which makes output reproducible for a fixed index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusHistogram {
    counts: Vec<(String, u64)>,
}

impl StatusHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the count for a status, inserting it on first occurrence
    pub fn increment(&mut self, status: &str) {
        match self.counts.iter_mut().find(|(s, _)| s == status) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((status.to_string(), 1)),
        }
    }

    pub fn get(&self, status: &str) -> u64 {
        self.counts
            .iter()
            .find(|(s, _)| s == status)
            .map_or(0, |(_, count)| *count)
    }

    /// Sum of all counts
    pub fn sum(&self) -> u64 {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    /// Iterates entries in first-occurrence order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(s, count)| (s.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// A PEP whose declared status falls outside its expected set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discrepancy {
    pub pep_url: Url,
    pub expected: &'static [&'static str],
    pub real_status: String,
}

/// The sole output of a reconciliation pass
///
/// Invariant: `total == histogram.sum()` == number of successfully
/// processed rows; skipped and failed rows count toward neither.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    pub histogram: StatusHistogram,
    pub discrepancies: Vec<Discrepancy>,
    pub errors: Vec<String>,
    pub total: u64,
}

/// Reconciles every index row against its expected status set
///
/// Rows are processed strictly in order, one fetch at a time. Per-row
/// outcomes are disjoint: skipped rows contribute nothing, failed rows are
/// recorded as error messages, and successful rows feed the histogram and,
/// when the expected set is non-empty and violated, the discrepancy list.
/// The pass always completes; an all-failed pass yields a valid, empty
/// result.
pub async fn reconcile(fetcher: &Fetcher, rows: &[IndexRow], base_url: &Url) -> RunResult {
    let mut histogram = StatusHistogram::new();
    let mut discrepancies = Vec::new();
    let mut errors = Vec::new();
    let mut total = 0u64;

    let pb = progress_bar(rows.len() as u64);

    for row in rows {
        match process_row(fetcher, row, base_url).await {
            RowOutcome::Skipped => {}
            RowOutcome::Failed(e) => errors.push(e.to_string()),
            RowOutcome::Ok {
                real_status,
                expected,
                pep_url,
            } => {
                if !expected.is_empty() && !expected.contains(&real_status.as_str()) {
                    discrepancies.push(Discrepancy {
                        pep_url,
                        expected,
                        real_status: real_status.clone(),
                    });
                }
                histogram.increment(&real_status);
                total += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    // Batched reporting, kept apart from per-row progress
    for error in &errors {
        warn!("Row failed: {error}");
    }
    for d in &discrepancies {
        warn!(
            "Status mismatch for {}\n\texpected one of: {:?}\n\tgot: {:?}",
            d.pep_url, d.expected, d.real_status
        );
    }

    RunResult {
        histogram,
        discrepancies,
        errors,
        total,
    }
}

/// Audits the whole PEP index
///
/// Fetches the index page and locates its table; failure there is fatal for
/// the run and propagates as an error rather than a partial result. The
/// table's first `<tr>` is the header and exactly that one row is skipped.
pub async fn audit_peps(fetcher: &Fetcher, index_url: &str) -> crate::Result<RunResult> {
    let base_url = Url::parse(index_url)?;
    let body = fetcher.fetch(index_url).await?;
    let rows = index_rows(&body)?;

    info!("Auditing {} PEP index rows", rows.len());
    Ok(reconcile(fetcher, &rows, &base_url).await)
}

fn index_rows(body: &str) -> crate::Result<Vec<IndexRow>> {
    let document = Html::parse_document(body);
    let table = locate(document.root_element(), "table", &[])?;

    Ok(find_all(table, "tr", &[])
        .into_iter()
        .skip(1) // header row
        .map(|el| IndexRow::from_element(el))
        .collect())
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec})")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_first_occurrence_order() {
        let mut h = StatusHistogram::new();
        h.increment("Final");
        h.increment("Active");
        h.increment("Final");
        h.increment("Withdrawn");

        let order: Vec<&str> = h.iter().map(|(s, _)| s).collect();
        assert_eq!(order, vec!["Final", "Active", "Withdrawn"]);
        assert_eq!(h.get("Final"), 2);
        assert_eq!(h.get("Active"), 1);
        assert_eq!(h.get("Draft"), 0);
    }

    #[test]
    fn test_histogram_sum() {
        let mut h = StatusHistogram::new();
        for status in ["Final", "Final", "Active"] {
            h.increment(status);
        }
        assert_eq!(h.sum(), 3);
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn test_index_rows_skips_exactly_header() {
        let body = "<html><body><table>\
                    <tr><th>Code</th><th>PEP</th></tr>\
                    <tr><td>PA</td><td><a href='pep-1/'>1</a></td><td>t</td><td>a</td></tr>\
                    <tr><td>PF</td><td><a href='pep-2/'>2</a></td><td>t</td><td>a</td></tr>\
                    </table></body></html>";
        let rows = index_rows(body).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_index_rows_header_only() {
        let body = "<html><body><table><tr><th>Code</th></tr></table></body></html>";
        let rows = index_rows(body).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_index_without_table_is_fatal() {
        let result = index_rows("<html><body><p>not an index</p></body></html>");
        assert!(matches!(
            result,
            Err(crate::AuditError::ElementNotFound { .. })
        ));
    }
}
