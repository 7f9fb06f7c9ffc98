//! pep-audit main entry point
//!
//! Command-line interface for the PEP status auditor and its sibling
//! documentation crawl modes.

use clap::{Parser, ValueEnum};
use pep_audit::config::load_config_or_default;
use pep_audit::output::{control_output, OutputFormat};
use pep_audit::pep::RunResult;
use pep_audit::{audit_peps, docs, Fetcher};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// pep-audit: Python documentation crawler and PEP status auditor
#[derive(Parser, Debug)]
#[command(name = "pep-audit")]
#[command(version)]
#[command(about = "Audits PEP lifecycle statuses against the PEP index", long_about = None)]
struct Cli {
    /// Crawl mode to run
    #[arg(value_enum)]
    mode: Mode,

    /// Clear the response cache before running
    #[arg(short = 'c', long)]
    clear_cache: bool,

    /// Additional output rendering
    #[arg(short, long, value_enum)]
    output: Option<OutputArg>,

    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Audit PEP statuses against the index
    Pep,
    /// Collect "What's New in Python" articles
    WhatsNew,
    /// List Python versions and their support status
    LatestVersions,
    /// Download the PDF documentation archive
    Download,
}

impl Mode {
    fn as_str(self) -> &'static str {
        match self {
            Mode::Pep => "pep",
            Mode::WhatsNew => "whats-new",
            Mode::LatestVersions => "latest-versions",
            Mode::Download => "download",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputArg {
    /// Bordered table on stdout
    Pretty,
    /// CSV file in the results directory
    File,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    tracing::info!("Parser started");
    tracing::debug!("Command-line arguments: {cli:?}");

    let config = load_config_or_default(cli.config.as_deref())?;
    let fetcher = Fetcher::from_config(&config)?;

    if cli.clear_cache {
        let removed = fetcher.clear_cache()?;
        tracing::info!("Response cache cleared ({removed} entries)");
    }

    let format = match cli.output {
        Some(OutputArg::Pretty) => OutputFormat::Pretty,
        Some(OutputArg::File) => OutputFormat::File,
        None => OutputFormat::Default,
    };
    let results_dir = Path::new(&config.output.results_dir);

    match cli.mode {
        Mode::Pep => {
            let result = audit_peps(&fetcher, &config.urls.pep_index).await?;
            control_output(&pep_rows(&result), format, results_dir, cli.mode.as_str())?;
        }
        Mode::WhatsNew => {
            let articles = docs::whats_new(&fetcher, &config.urls.docs_base).await?;
            let rows = triple_rows(["Link", "Title", "Editor, Author"], articles);
            control_output(&rows, format, results_dir, cli.mode.as_str())?;
        }
        Mode::LatestVersions => {
            let versions = docs::latest_versions(&fetcher, &config.urls.docs_base).await?;
            let rows = triple_rows(["Link", "Version", "Status"], versions);
            control_output(&rows, format, results_dir, cli.mode.as_str())?;
        }
        Mode::Download => {
            let path = docs::download(
                &fetcher,
                &config.urls.docs_base,
                Path::new(&config.output.downloads_dir),
            )
            .await?;
            println!("Archive saved to {}", path.display());
        }
    }

    tracing::info!("Parser finished");
    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("pep_audit=info,warn"),
        1 => EnvFilter::new("pep_audit=debug,info"),
        2 => EnvFilter::new("pep_audit=trace,debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Renders a reconciliation result as Status/Count rows with a Total row
///
/// Statuses are sorted alphabetically for display; the histogram itself
/// keeps first-occurrence order.
fn pep_rows(result: &RunResult) -> Vec<Vec<String>> {
    let mut entries: Vec<(&str, u64)> = result.histogram.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut rows = vec![vec!["Status".to_string(), "Count".to_string()]];
    for (status, count) in entries {
        rows.push(vec![status.to_string(), count.to_string()]);
    }
    rows.push(vec!["Total".to_string(), result.total.to_string()]);
    rows
}

fn triple_rows<const N: usize>(
    header: [&str; N],
    data: Vec<(String, String, String)>,
) -> Vec<Vec<String>> {
    let mut rows = vec![header.iter().map(|s| s.to_string()).collect::<Vec<_>>()];
    for (a, b, c) in data {
        rows.push(vec![a, b, c]);
    }
    rows
}
