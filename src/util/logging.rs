// LogQuery - util/logging.rs
//
// Diagnostic logging for the logquery binary.
//
// stdout carries the query result itself (text, JSON, or CSV), and callers
// pipe it into other tools. Any diagnostic line on stdout would corrupt
// that output, so every event goes to stderr.
//
// Level priority: RUST_LOG > --debug > [logging] level > DEFAULT_LOG_LEVEL.

use super::constants;
use tracing_subscriber::EnvFilter;

/// Pick the filter directive from the available level sources.
///
/// `env_directive` is the value of RUST_LOG, if set.
fn filter_directive(
    env_directive: Option<String>,
    debug_flag: bool,
    config_level: Option<&str>,
) -> String {
    match (env_directive, debug_flag, config_level) {
        (Some(env), _, _) => env,
        (None, true, _) => "debug".to_string(),
        (None, false, Some(level)) => level.to_lowercase(),
        (None, false, None) => constants::DEFAULT_LOG_LEVEL.to_string(),
    }
}

/// Initialise the logging subsystem. Call once, after config.toml is loaded.
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let directive = filter_directive(std::env::var("RUST_LOG").ok(), debug_flag, config_level);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&directive))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .init();

    tracing::debug!(
        app = constants::APP_NAME,
        version = constants::APP_VERSION,
        filter = %directive,
        "Logging initialised"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_log_wins() {
        let directive = filter_directive(Some("logquery=trace".to_string()), true, Some("error"));
        assert_eq!(directive, "logquery=trace");
    }

    #[test]
    fn test_debug_flag_beats_config() {
        assert_eq!(filter_directive(None, true, Some("error")), "debug");
    }

    #[test]
    fn test_config_level_is_normalised() {
        assert_eq!(filter_directive(None, false, Some("INFO")), "info");
    }

    #[test]
    fn test_default_level() {
        assert_eq!(filter_directive(None, false, None), constants::DEFAULT_LOG_LEVEL);
    }
}
