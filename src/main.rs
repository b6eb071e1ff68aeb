use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use tempfile::NamedTempFile;
use stats_card::github::{DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT};
use stats_card::{Credentials, GithubClient, RetryPolicy, Retrying, reduce, render_with_title};
use tokio_util::sync::CancellationToken;

/// Generate an SVG card with a GitHub user's contribution statistics.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// GitHub login to fetch statistics for.
    #[arg(long, env = "GITHUB_USERNAME")]
    username: Option<String>,

    /// Token sent as `Authorization: Bearer <token>`.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[arg(long, env = "OUTPUT_DIR", default_value = "output")]
    output_dir: PathBuf,

    #[arg(long, env = "OUTPUT_FILE", default_value = "stats-card.svg")]
    output_file: String,

    #[arg(long, env = "GITHUB_GRAPHQL_URL", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    request_timeout_secs: u64,

    /// Total retry budget in seconds.
    #[arg(long, default_value_t = 120)]
    budget_secs: u64,

    #[arg(short, long, env = "VERBOSE")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let credentials = Credentials::new(args.username.clone(), args.token.clone())?;
    info!(
        "Starting stats card generation for user: {}",
        credentials.username()
    );

    let client = GithubClient::new(
        args.endpoint.clone(),
        Duration::from_secs(args.request_timeout_secs),
    )
    .context("Failed to build HTTP client")?;
    debug!("Using GraphQL endpoint {}", client.endpoint());

    let policy = RetryPolicy::default().with_max_elapsed(Duration::from_secs(args.budget_secs));
    let retrying = Retrying::new(client, policy);
    debug!("Retry budget {:?}", retrying.policy().max_elapsed);

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_ctrl_c(cancel.clone()));

    let raw = retrying
        .fetch_with_retry(&credentials, &cancel)
        .await
        .context("Failed to fetch stats")?;

    let stats = reduce(&raw);
    debug!("Stats fetched successfully: {stats:?}");

    let title = format!("{}'s GitHub Stats", credentials.username());
    let svg = render_with_title(&stats, &title);

    let output_path = args.output_dir.join(&args.output_file);
    write_atomically(&output_path, &svg)
        .with_context(|| format!("Failed to write SVG to {}", output_path.display()))?;

    println!("Stats card generated successfully: {}", output_path.display());

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            warn!("Interrupted, cancelling fetch");
            cancel.cancel();
        }
        Err(e) => warn!("Unable to listen for Ctrl-C: {e}"),
    }
}

/// Write `contents` to a temp file beside `path` and rename it into place.
fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path)?;
    Ok(())
}
