// LogQuery - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Only configuration faults, rejected criteria, and output failures are
// errors. Absent sources and malformed log lines degrade gracefully and
// never appear here.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogQuery operations.
#[derive(Debug)]
pub enum LogQueryError {
    /// Configuration loading or source resolution failed.
    Config(ConfigError),

    /// Query criteria could not be built from caller input.
    Criteria(CriteriaError),

    /// Writing query results failed.
    Export(ExportError),
}

impl fmt::Display for LogQueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Criteria(e) => write!(f, "Invalid query: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
        }
    }
}

impl std::error::Error for LogQueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Criteria(e) => Some(e),
            Self::Export(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading and source resolution.
#[derive(Debug)]
pub enum ConfigError {
    /// File-based logging is declared active but no file path is set.
    /// This is a configuration fault, never an empty result.
    FileLoggingUnconfigured,

    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading the config file or resolving a path.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileLoggingUnconfigured => write!(
                f,
                "File logging is enabled but no log file is configured. \
                 Set [source] file in config.toml or pass --file."
            ),
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::FileLoggingUnconfigured => None,
        }
    }
}

impl From<ConfigError> for LogQueryError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Criteria errors
// ---------------------------------------------------------------------------

/// Errors related to building query criteria from caller input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriteriaError {
    /// The `since` value is neither a date nor a date-time.
    InvalidSince { raw: String },
}

impl fmt::Display for CriteriaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSince { raw } => write!(
                f,
                "Bad date/time format '{raw}'. Expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS[.ffffff]"
            ),
        }
    }
}

impl std::error::Error for CriteriaError {}

impl From<CriteriaError> for LogQueryError {
    fn from(e: CriteriaError) -> Self {
        Self::Criteria(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to writing query results.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the output.
    Io(io::Error),

    /// CSV serialisation error.
    Csv(csv::Error),

    /// JSON serialisation error.
    Json(serde_json::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(source) => write!(f, "Output I/O error: {source}"),
            Self::Csv(source) => write!(f, "CSV output error: {source}"),
            Self::Json(source) => write!(f, "JSON output error: {source}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(source) => Some(source),
            Self::Csv(source) => Some(source),
            Self::Json(source) => Some(source),
        }
    }
}

impl From<ExportError> for LogQueryError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

/// Convenience type alias for LogQuery results.
pub type Result<T> = std::result::Result<T, LogQueryError>;
