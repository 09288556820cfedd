use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trip_report::{report::write_report, ReportError};

#[derive(Parser)]
#[command(name = "TripReport")]
#[command(about = "Computes travel metrics from a geolocation check-in log", long_about = None)]
struct Cli {
    /// Path to the check-in log file
    log_file: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    // Log to stderr, the report itself goes to stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(err) = run(&cli.log_file) {
        tracing::error!("Aborting: {err:?}");
        std::process::exit(1);
    }
}

fn run(path: &Path) -> Result<(), ReportError> {
    tracing::info!("Reading check-ins from {}", path.display());

    let file = File::open(path)
        .map_err(|err| ReportError::Io(format!("Failed to open {}: {err}", path.display())))?;

    let stdout = io::stdout();
    write_report(BufReader::new(file), stdout.lock())
}
