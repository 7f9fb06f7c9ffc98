//! Documentation-site crawl modes
//!
//! The auditor's sibling modes against docs.python.org:
//! - `whats_new`: one row per "What's New in Python" article
//! - `latest_versions`: the version/status list from the sidebar
//! - `download`: fetch and save the PDF documentation archive

use crate::fetch::Fetcher;
use crate::html::{find, find_all, locate, text_of, AttrMatch};
use crate::AuditError;
use regex::Regex;
use scraper::Html;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use url::Url;

const VERSION_STATUS_PATTERN: &str = r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)";

/// Collects one row per "What's New in Python" article
///
/// Follows each entry of the whatsnew table of contents and extracts the
/// article title and its editor/author line. Articles that fail to fetch or
/// lack the expected structure are skipped with a warning.
pub async fn whats_new(
    fetcher: &Fetcher,
    docs_base: &str,
) -> crate::Result<Vec<(String, String, String)>> {
    let whats_new_url = Url::parse(docs_base)?.join("whatsnew/")?;
    let body = fetcher.fetch(whats_new_url.as_str()).await?;

    let hrefs = article_hrefs(&body)?;
    let mut results = Vec::new();

    for href in hrefs {
        let link = whats_new_url.join(&href)?;
        match version_article(fetcher, &link).await {
            Ok(row) => results.push(row),
            Err(e) => warn!("Skipping {link}: {e}"),
        }
    }

    Ok(results)
}

fn article_hrefs(body: &str) -> crate::Result<Vec<String>> {
    let document = Html::parse_document(body);
    let root = document.root_element();

    let section = locate(
        root,
        "section",
        &[("id", AttrMatch::exact("what-s-new-in-python"))],
    )?;
    let wrapper = locate(
        section,
        "div",
        &[("class", AttrMatch::exact("toctree-wrapper"))],
    )?;
    let entries = find_all(wrapper, "li", &[("class", AttrMatch::exact("toctree-l1"))]);

    Ok(entries
        .into_iter()
        .filter_map(|entry| {
            find(entry, "a", &[])
                .and_then(|a| a.value().attr("href"))
                .map(str::to_string)
        })
        .collect())
}

async fn version_article(fetcher: &Fetcher, link: &Url) -> crate::Result<(String, String, String)> {
    let body = fetcher.fetch(link.as_str()).await?;
    let document = Html::parse_document(&body);
    let root = document.root_element();

    let title = text_of(locate(root, "h1", &[])?);
    let byline = text_of(locate(root, "dl", &[])?).replace('\n', " ");

    Ok((link.to_string(), title, byline))
}

/// Parses the documentation sidebar's "All versions" list
///
/// Each anchor is matched against `Python <version> (<status>)`; anchors
/// that do not match keep their full text as the version with an empty
/// status. No matching `<ul>` in the sidebar is fatal for the mode.
pub async fn latest_versions(
    fetcher: &Fetcher,
    docs_base: &str,
) -> crate::Result<Vec<(String, String, String)>> {
    let body = fetcher.fetch(docs_base).await?;
    let document = Html::parse_document(&body);
    let root = document.root_element();

    let sidebar = locate(
        root,
        "div",
        &[("class", AttrMatch::exact("sphinxsidebarwrapper"))],
    )?;

    let version_list = find_all(sidebar, "ul", &[])
        .into_iter()
        .find(|ul| text_of(*ul).contains("All versions"))
        .ok_or_else(|| AuditError::ElementNotFound {
            tag: "ul".to_string(),
            attrs: String::new(),
        })?;

    let pattern = Regex::new(VERSION_STATUS_PATTERN)?;
    let mut results = Vec::new();

    for anchor in find_all(version_list, "a", &[]) {
        let link = anchor.value().attr("href").unwrap_or_default().to_string();
        let text = text_of(anchor);

        let (version, status) = match pattern.captures(&text) {
            Some(caps) => (caps["version"].to_string(), caps["status"].to_string()),
            None => (text, String::new()),
        };

        results.push((link, version, status));
    }

    Ok(results)
}

/// Downloads the PDF documentation archive
///
/// Locates the download link by its URL suffix (a pattern-valued attribute
/// match), fetches the archive, and saves it under `downloads_dir`. Returns
/// the saved path.
pub async fn download(
    fetcher: &Fetcher,
    docs_base: &str,
    downloads_dir: &Path,
) -> crate::Result<PathBuf> {
    let downloads_url = Url::parse(docs_base)?.join("download.html")?;
    let body = fetcher.fetch(downloads_url.as_str()).await?;

    let archive_url = {
        let document = Html::parse_document(&body);
        let root = document.root_element();

        let table = locate(root, "table", &[("class", AttrMatch::exact("docutils"))])?;
        let link = locate(
            table,
            "a",
            &[("href", AttrMatch::pattern(r".+pdf-a4\.zip$")?)],
        )?;
        let href = link
            .value()
            .attr("href")
            .ok_or_else(|| AuditError::ElementNotFound {
                tag: "a".to_string(),
                attrs: "[href]".to_string(),
            })?;

        downloads_url.join(href)?
    };

    let bytes = fetcher.fetch_bytes(archive_url.as_str()).await?;

    std::fs::create_dir_all(downloads_dir)?;
    let file_name = archive_url
        .path_segments()
        .and_then(|segments| segments.last())
        .filter(|name| !name.is_empty())
        .unwrap_or("archive.zip");
    let archive_path = downloads_dir.join(file_name);
    std::fs::write(&archive_path, &bytes)?;

    info!("Archive saved to {}", archive_path.display());
    Ok(archive_path)
}
