//! PEP status table and status extraction
//!
//! The index page marks each PEP with a single-letter category code implying
//! a set of acceptable lifecycle statuses; the detail page declares the real
//! status in its metadata block.

use crate::html::{find_all, text_of};
use scraper::ElementRef;

/// Returns the statuses implied by an index-page category code
///
/// The table is fixed for the lifetime of the process. An unknown code maps
/// to the empty set, meaning no validation is performed for that row and any
/// status is accepted.
pub fn expected_statuses(code: &str) -> &'static [&'static str] {
    match code {
        "A" => &["Active", "Accepted"],
        "D" => &["Deferred"],
        "F" => &["Final"],
        "P" => &["Provisional"],
        "R" => &["Rejected"],
        "S" => &["Superseded"],
        "W" => &["Withdrawn"],
        "" => &["Draft", "Active"],
        _ => &[],
    }
}

/// Extracts the declared status from a PEP page's metadata block
///
/// The block is a definition list of label/value pairs; the value of the
/// first pair labelled `Status:` is returned, trimmed. `None` means the
/// block carries no status at all (deleted or redirected PEPs), which
/// callers treat as "status unavailable" rather than an error.
pub fn extract_status(metadata_block: ElementRef<'_>) -> Option<String> {
    let labels = find_all(metadata_block, "dt", &[]);
    let values = find_all(metadata_block, "dd", &[]);

    labels
        .into_iter()
        .zip(values)
        .find(|(label, _)| text_of(*label) == "Status:")
        .map(|(_, value)| text_of(value))
}
