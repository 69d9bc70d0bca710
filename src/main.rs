// LogQuery - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. Running one query and writing the result to stdout

use clap::Parser;
use logquery::app;
use logquery::core::export::{self, ExportFormat};
use logquery::core::filter::{QueryCriteria, Since};
use logquery::platform::config::{self, PlatformPaths, SourceSettings};
use logquery::platform::fs::FsSourceReader;
use logquery::util::{
    self,
    error::{ConfigError, LogQueryError, Result},
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// LogQuery - query an engine log file.
///
/// Reads the configured log file, folds stack traces and wrapped messages
/// into their records, and prints the records matching the given filters,
/// newest first.
#[derive(Parser, Debug)]
#[command(name = "logquery", version, about)]
struct Cli {
    /// Config file (defaults to the platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Log file to read, overriding [source] in the config.
    #[arg(short = 'F', long = "file")]
    file: Option<String>,

    /// Only records at or after this date (YYYY-MM-DD) or date-time.
    #[arg(short = 's', long = "since")]
    since: Option<Since>,

    /// Only records with this level (repeatable).
    #[arg(short = 'l', long = "level")]
    levels: Vec<String>,

    /// Only records from this logger, exact name (repeatable).
    #[arg(short = 'n', long = "logger")]
    loggers: Vec<String>,

    /// Only records whose content contains this text (case-insensitive).
    #[arg(short = 'q', long = "search")]
    search: Option<String>,

    /// Output format: text, json, or csv.
    #[arg(short = 'o', long = "format")]
    format: Option<ExportFormat>,

    /// Print at most this many of the newest records.
    #[arg(long = "limit")]
    limit: Option<usize>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

impl Cli {
    fn criteria(&self) -> QueryCriteria {
        QueryCriteria {
            since: self.since,
            levels: self.levels.iter().cloned().collect(),
            loggers: self.loggers.iter().cloned().collect(),
            search: self.search.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            match e {
                LogQueryError::Config(_) | LogQueryError::Criteria(_) => ExitCode::from(2),
                LogQueryError::Export(_) => ExitCode::FAILURE,
            }
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PlatformPaths::resolve().config_file());

    if cli.config.is_some() && !config_path.exists() {
        return Err(ConfigError::Io {
            path: config_path,
            source: io::Error::new(io::ErrorKind::NotFound, "config file not found"),
        }
        .into());
    }

    let (app_config, warnings) = config::load_config(&config_path)?;

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        config = %config_path.display(),
        "LogQuery starting"
    );
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    let settings = match cli.file {
        Some(ref path) => SourceSettings::file(path.clone()),
        None => app_config.source.clone(),
    };

    let mut entries = app::logs::read_logs(&settings, &FsSourceReader, &cli.criteria())
        .map_err(|e| {
            tracing::error!(error = %e, "Log query rejected");
            e
        })?;

    if let Some(limit) = cli.limit {
        entries.truncate(limit);
    }

    let format = cli.format.unwrap_or(app_config.output_format);
    let count = export::export(&entries, format, io::stdout().lock())?;
    tracing::debug!(count, format = %format, "Results written");
    Ok(())
}
