// LogQuery - util/constants.rs
//
// Single source of truth for named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogQuery";

/// Application identifier used for config directories.
pub const APP_ID: &str = "LogQuery";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Configuration
// =============================================================================

/// Name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// `[source] handler` value that enables file-based log reading.
/// Any other value (or none) means the source is disabled.
pub const FILE_HANDLER: &str = "file";

/// Diagnostic log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Default diagnostic log level. Kept at `warn` so that stderr stays quiet
/// while query results are written to stdout.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// =============================================================================
// Primary-line grammar
// =============================================================================

/// Byte layout of the fixed-width part of a primary-line timestamp.
/// `d` stands for one ASCII digit; every other byte must match literally.
/// The fractional-seconds digits that follow the comma are variable length.
pub const TIMESTAMP_LAYOUT: &[u8] = b"dddd-dd-dd dd:dd:dd,";

/// chrono format for the date-time portion before the comma.
pub const TIMESTAMP_BASE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Fractional-second digits beyond this count exceed nanosecond precision
/// and are truncated.
pub const MAX_FRACTION_DIGITS: usize = 9;

/// chrono format used when re-rendering a record in the primary-line grammar.
pub const TEXT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%6f";

/// Re-rendering format for timestamps that carry sub-microsecond digits.
pub const TEXT_TIMESTAMP_FORMAT_NANOS: &str = "%Y-%m-%d %H:%M:%S,%9f";
