//! CLI entry point for the uptime aggregator.
//!
//! Takes a directory of half-day availability reports, aggregates them in
//! memory, and writes a partials file plus a ranked summary CSV into an
//! `output/` subdirectory.

use anyhow::Result;
use clap::Parser;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use uptime_aggregator::aggregate::{self, Mode};
use uptime_aggregator::report;

#[derive(Parser)]
#[command(name = "uptime_aggregator")]
#[command(about = "Aggregates half-day availability CSV reports into a ranked summary", long_about = None)]
struct Cli {
    /// Directory containing the per-period CSV reports
    #[arg(value_name = "DIRECTORY")]
    directory: PathBuf,

    /// Accumulation mode
    #[arg(short, long, value_enum, default_value_t = Mode::Period)]
    mode: Mode,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Argument errors go to stdout and exit 1, not clap's default status
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err)
            if matches!(
                err.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) =>
        {
            err.exit()
        }
        Err(err) => {
            println!("{err}");
            std::process::exit(1);
        }
    };

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/uptime_aggregator.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("uptime_aggregator.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    report::ensure_output_dir(&cli.directory)?;

    let data = aggregate::collect(&cli.directory, cli.mode)?;
    report::write_reports(&cli.directory, &data)?;

    Ok(())
}
