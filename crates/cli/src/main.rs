// ABOUTME: CLI for exporting a Goodreads shelf to the official export's CSV layout.
// ABOUTME: Fetches every page of the review table (or reads saved pages) and writes goodreads_export-YYYYMMDD.csv.

mod settings;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use clap::Parser;
use shelfcopy::{
    export_to_dir, write_records, Exporter, FilePageSource, Record, GOODREADS_FIELDS,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::settings::{Overrides, Settings};

/// Export a Goodreads shelf as CSV.
#[derive(Parser, Debug)]
#[command(name = "shelfcopy")]
#[command(about = "Export a Goodreads shelf to the official export CSV layout", long_about = None)]
struct Args {
    /// Goodreads user id, e.g. 12345-alice (overrides SHELFCOPY_USERNAME)
    #[arg(short = 'u', long)]
    username: Option<String>,

    /// Shelf to export
    #[arg(long)]
    shelf: Option<String>,

    /// Site root the listing URLs are built on
    #[arg(long)]
    base_url: Option<String>,

    /// Directory the dated CSV file is written to
    #[arg(short = 'o', long)]
    output_dir: Option<PathBuf>,

    /// Settings file (default: ./shelfcopy.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long = "timeout")]
    timeout_secs: Option<u64>,

    /// Saved listing pages to export instead of fetching, in page order
    #[arg(long = "html", num_args = 1..)]
    html: Vec<PathBuf>,

    /// Write the CSV to stdout instead of a file
    #[arg(long)]
    stdout: bool,

    /// Log debug output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            username: self.username.clone(),
            shelf: self.shelf.clone(),
            base_url: self.base_url.clone(),
            output_dir: self.output_dir.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn collect_records(args: &Args, settings: &Settings) -> Result<Vec<Record>> {
    if !args.html.is_empty() {
        let source = FilePageSource::new(args.html.clone());
        let pages = source.page_count();
        info!(pages, "exporting saved pages");
        return Exporter::new(source, GOODREADS_FIELDS)
            .collect_pages(pages)
            .context("failed to export saved pages");
    }

    let username = settings.username().ok_or_else(|| {
        anyhow!("no username configured: pass --username or set SHELFCOPY_USERNAME")
    })?;
    info!(username, shelf = %settings.shelf, "exporting shelf");

    Exporter::builder(username)
        .base_url(settings.base_url.as_str())
        .shelf(settings.shelf.as_str())
        .timeout(Duration::from_secs(settings.timeout_secs))
        .user_agent(settings.user_agent.as_str())
        .build()?
        .collect()
        .with_context(|| format!("failed to export shelf {:?} of {}", settings.shelf, username))
}

fn run(args: &Args) -> Result<()> {
    let settings = Settings::load(args.config.as_deref(), &args.overrides())?;
    let records = collect_records(args, &settings)?;

    if args.stdout {
        write_records(io::stdout().lock(), &records, GOODREADS_FIELDS)?;
        info!(records = records.len(), "export written to stdout");
        return Ok(());
    }

    fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!("failed to create output directory {:?}", settings.output_dir)
    })?;
    let today = Local::now().date_naive();
    let path = export_to_dir(&settings.output_dir, &records, GOODREADS_FIELDS, today)?;
    println!("Wrote {} books to {}", records.len(), path.display());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose, args.quiet);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}
