// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tokio::sync::watch;

use crate::config::consts::STATUS_URL_ENV;
use crate::config::options::{ExportFormat, ExportVariant};
use crate::config::{AppOptions, SelectorTable};
use crate::core::pause::TokioPause;
use crate::error::Result;
use crate::export;
use crate::file::{self, Written};
use crate::progress::Progress;
use crate::runner::{FileSource, Orchestrator};
use crate::status::{self, ServiceStatus};

#[derive(Debug, Parser)]
#[command(name = "cal_scrape", version, about = "Scrape calendar cards and connect their videos")]
pub struct Cli {
    /// Debug-level logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// JSON selector table overriding the built-in one
    #[arg(long, global = true, value_name = "FILE")]
    pub selectors: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Capture once and export
    Capture(CaptureArgs),
    /// Re-capture on an interval until Ctrl-C, then export
    Watch(WatchArgs),
    /// Check the service status endpoint
    Status(StatusArgs),
}

#[derive(Debug, Args)]
pub struct CaptureArgs {
    /// Saved page snapshot (HTML)
    #[arg(short, long, value_name = "FILE")]
    pub page: PathBuf,

    /// Output file or directory (trailing `/`)
    #[arg(short, long)]
    pub out: Option<String>,

    #[arg(long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    #[arg(long, value_enum, default_value = "simple")]
    pub variant: ExportVariant,

    #[arg(long)]
    pub no_headers: bool,

    /// Print the export instead of writing a file
    #[arg(long, conflicts_with = "out")]
    pub stdout: bool,

    /// Max seconds between a video's duration and a card's label
    #[arg(long)]
    pub tolerance: Option<u32>,

    /// Let cards labelled 0:00 match videos too
    #[arg(long)]
    pub match_zero: bool,

    #[arg(long, value_name = "MS")]
    pub expand_delay_ms: Option<u64>,

    #[arg(long)]
    pub attempts: Option<u32>,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub capture: CaptureArgs,

    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Stop after this many successful passes
    #[arg(long)]
    pub cycles: Option<usize>,
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    #[arg(long, env = STATUS_URL_ENV)]
    pub url: String,
}

pub async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Capture(args) => run_capture(&cli, args).await,
        Command::Watch(args) => run_watch(&cli, args).await,
        Command::Status(args) => {
            match status::check(&args.url).await {
                ServiceStatus::Available => println!("available"),
                ServiceStatus::Degraded => println!("degraded"),
            }
            Ok(())
        }
    }
}

/// Fold flags over the defaults.
pub fn build_options(cli: &Cli, args: &CaptureArgs) -> Result<AppOptions> {
    let mut opts = AppOptions::default();

    if let Some(path) = &cli.selectors {
        opts.scan.selectors = SelectorTable::from_json_file(path)?;
        logd!("Using selectors from {}", path.display());
    }
    if let Some(t) = args.tolerance {
        opts.scan.policy.tolerance_secs = t;
    }
    if args.match_zero {
        opts.scan.policy.skip_zero_duration = false;
    }
    if let Some(ms) = args.expand_delay_ms {
        opts.scan.expand_delay = Duration::from_millis(ms);
    }
    if let Some(n) = args.attempts {
        opts.capture.max_attempts = n;
    }

    opts.export.format = args.format;
    opts.export.variant = args.variant;
    opts.export.include_headers = !args.no_headers;
    opts.export.to_stdout = args.stdout;
    if let Some(out) = &args.out {
        opts.export.set_path(out);
    }
    Ok(opts)
}

async fn run_capture(cli: &Cli, args: &CaptureArgs) -> Result<()> {
    let opts = build_options(cli, args)?;
    let mut orch = Orchestrator::new(
        FileSource::new(&args.page),
        TokioPause,
        opts.scan.clone(),
        opts.capture.clone(),
    );

    let mut progress = StderrProgress::default();
    let report = orch.capture_with_retry(Some(&mut progress)).await?;
    eprintln!(
        "{} cards, {} videos, {} connected, {} still waiting",
        report.cards, report.videos_total, report.connections, report.unresolved
    );

    export_events(&orch.session().events, &opts)
}

async fn run_watch(cli: &Cli, args: &WatchArgs) -> Result<()> {
    let mut opts = build_options(cli, &args.capture)?;
    if let Some(ms) = args.interval_ms {
        opts.capture.poll_interval = Duration::from_millis(ms);
    }

    let (stop_tx, stop_rx) = watch::channel(false);
    let ctrl_c = stop_tx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = ctrl_c.send(true);
        }
    });

    let mut orch = Orchestrator::new(
        FileSource::new(&args.capture.page),
        TokioPause,
        opts.scan.clone(),
        opts.capture.clone(),
    );

    eprintln!("Watching {} (Ctrl-C to stop)…", args.capture.page.display());
    let mut seen = 0usize;
    let passes = orch
        .live_scan(stop_rx, |_, report| {
            seen += 1;
            eprintln!(
                "#{seen}: {} cards, {} videos (+{}), {} connected, {} waiting",
                report.cards, report.videos_total, report.videos_new, report.connections, report.unresolved
            );
            if args.cycles.is_some_and(|limit| seen >= limit) {
                let _ = stop_tx.send(true);
            }
        })
        .await;

    if passes == 0 {
        logw!("Watch: no successful pass, nothing to export");
        return Ok(());
    }
    export_events(&orch.session().events, &opts)
}

fn export_events(events: &[crate::engine::Event], opts: &AppOptions) -> Result<()> {
    let contents = export::render(events, &opts.export)?;
    match file::write_export(&opts.export, &contents)? {
        Written::File(path) => eprintln!("Wrote {}", path.display()),
        Written::Stdout => {}
    }
    Ok(())
}

/// Card-by-card progress on stderr.
#[derive(Default)]
struct StderrProgress {
    total: usize,
}

impl Progress for StderrProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, card_index: usize) {
        logd!("Card {}/{}", card_index, self.total);
    }
}
