//! Index-row processing
//!
//! Takes one row of the PEP index table through the full pipeline: derive
//! the expected status set from the category code, follow the row's link,
//! fetch the PEP page, and extract the declared status.

use crate::fetch::Fetcher;
use crate::html::{find, find_all, text_of};
use crate::pep::status::{expected_statuses, extract_status};
use crate::AuditError;
use scraper::{ElementRef, Html};
use tracing::warn;
use url::Url;

/// One row of the PEP index table
///
/// Rows are serialized out of the index document so they can outlive it;
/// each is parsed back as a fragment when processed, then discarded.
#[derive(Debug, Clone)]
pub struct IndexRow {
    html: String,
}

impl IndexRow {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn from_element(el: ElementRef<'_>) -> Self {
        Self { html: el.html() }
    }
}

/// Outcome of processing one index row
#[derive(Debug)]
pub enum RowOutcome {
    /// Malformed or status-less row; contributes nothing, already logged
    /// where a log entry is warranted
    Skipped,

    /// The row's data could not be retrieved; the error carries detail
    /// for batched reporting
    Failed(AuditError),

    /// The row produced a status to reconcile
    Ok {
        real_status: String,
        expected: &'static [&'static str],
        pep_url: Url,
    },
}

/// Processes one index row
///
/// Malformed rows (fewer than 4 columns, or no usable anchor in the second
/// column) are expected on this page and skipped silently. A fetch failure
/// surfaces as [`RowOutcome::Failed`] for the engine to record. A fetched
/// page without a status is skipped with a warning.
pub async fn process_row(fetcher: &Fetcher, row: &IndexRow, base_url: &Url) -> RowOutcome {
    let Some((category, href)) = parse_row(&row.html) else {
        return RowOutcome::Skipped;
    };

    let expected = expected_statuses(&category);

    let pep_url = match base_url.join(&href) {
        Ok(url) => url,
        Err(e) => return RowOutcome::Failed(e.into()),
    };

    let body = match fetcher.fetch(pep_url.as_str()).await {
        Ok(body) => body,
        Err(e) => return RowOutcome::Failed(e),
    };

    match page_status(&body, &pep_url) {
        Some(real_status) => RowOutcome::Ok {
            real_status,
            expected,
            pep_url,
        },
        None => RowOutcome::Skipped,
    }
}

/// Splits a row into its category code and link target
///
/// The first character of the first column is the PEP type marker and is
/// discarded; the remainder is the category code. `None` for rows with
/// fewer than 4 columns or no anchor with an `href` in the second column.
fn parse_row(row_html: &str) -> Option<(String, String)> {
    // Table elements are dropped by fragment parsing outside a table
    // context, so the row goes back inside one.
    let document = Html::parse_document(&format!("<table>{row_html}</table>"));
    let root = document.root_element();

    let columns = find_all(root, "td", &[]);
    if columns.len() < 4 {
        return None;
    }

    let code = text_of(columns[0]);
    let category: String = code.chars().skip(1).collect();

    let anchor = find(columns[1], "a", &[])?;
    let href = anchor.value().attr("href")?.to_string();

    Some((category, href))
}

/// Extracts the declared status from a fetched PEP page
///
/// Pages occasionally lack the metadata block entirely (deleted or
/// redirected PEPs); both that and a block without a `Status:` label are
/// the "status unavailable" outcome, logged as a warning.
fn page_status(body: &str, pep_url: &Url) -> Option<String> {
    let page = Html::parse_document(body);

    let Some(dl) = find(page.root_element(), "dl", &[]) else {
        warn!("No metadata block on {pep_url}");
        return None;
    };

    match extract_status(dl) {
        Some(status) => Some(status),
        None => {
            warn!("No status found on {pep_url}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(html: &str) -> IndexRow {
        IndexRow::new(html)
    }

    #[test]
    fn test_parse_row_code_and_href() {
        let parsed = parse_row(
            "<tr><td>PA</td><td><a href=\"pep-0001/\">1</a></td>\
             <td>Title</td><td>Author</td></tr>",
        )
        .unwrap();
        assert_eq!(parsed, ("A".to_string(), "pep-0001/".to_string()));
    }

    #[test]
    fn test_parse_row_empty_category() {
        // Only the type marker in the first column: empty category code
        let parsed = parse_row(
            "<tr><td>P</td><td><a href=\"pep-0002/\">2</a></td>\
             <td>Title</td><td>Author</td></tr>",
        )
        .unwrap();
        assert_eq!(parsed.0, "");
    }

    #[test]
    fn test_parse_row_too_few_columns() {
        assert!(parse_row("<tr><td>PA</td><td><a href=\"x\">1</a></td></tr>").is_none());
    }

    #[test]
    fn test_parse_row_missing_anchor() {
        assert!(parse_row(
            "<tr><td>PA</td><td>no link</td><td>Title</td><td>Author</td></tr>"
        )
        .is_none());
    }

    #[test]
    fn test_parse_row_anchor_without_href() {
        assert!(parse_row(
            "<tr><td>PA</td><td><a>1</a></td><td>Title</td><td>Author</td></tr>"
        )
        .is_none());
    }

    #[test]
    fn test_page_status_present() {
        let url = Url::parse("https://peps.python.org/pep-0001/").unwrap();
        let body = "<html><body><dl><dt>Status:</dt><dd>Active</dd></dl></body></html>";
        assert_eq!(page_status(body, &url), Some("Active".to_string()));
    }

    #[test]
    fn test_page_status_without_metadata_block() {
        let url = Url::parse("https://peps.python.org/pep-9999/").unwrap();
        assert_eq!(page_status("<html><body><p>gone</p></body></html>", &url), None);
    }

    #[tokio::test]
    async fn test_process_row_skips_malformed_without_fetching() {
        // A fetcher pointed at nothing: a malformed row must never touch it
        let client = crate::fetch::build_http_client(&crate::config::HttpConfig::default()).unwrap();
        let fetcher = Fetcher::new(client, None, 0, std::time::Duration::from_millis(1));
        let base = Url::parse("http://127.0.0.1:1/index").unwrap();

        let outcome = process_row(&fetcher, &row("<tr><td>PA</td><td>x</td></tr>"), &base).await;
        assert!(matches!(outcome, RowOutcome::Skipped));
    }
}
