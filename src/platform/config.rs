// LogQuery - platform/config.rs
//
// Config directory resolution, config.toml loading with startup validation,
// and log source path resolution.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance, and for home-directory expansion.

use crate::core::export::ExportFormat;
use crate::core::model::LogSource;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::{BaseDirs, ProjectDirs};
use std::io;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogQuery configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logquery/ or %APPDATA%\LogQuery\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[source]` section.
    pub source: SourceSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
    /// `[output]` section.
    pub output: OutputSection,
}

/// `[source]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SourceSection {
    /// Logging handler of the host engine. Only "file" enables queries.
    pub handler: Option<String>,
    /// Path of the log file written by the host engine.
    pub file: Option<String>,
}

/// `[logging]` config section (this tool's own diagnostics).
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// `[output]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Result format: "text", "json", or "csv".
    pub format: Option<String>,
}

/// Where the host engine writes its log, as configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSettings {
    /// Logging handler name.
    pub handler: Option<String>,
    /// Unresolved file path (may start with `~` or be relative).
    pub file: Option<String>,
}

impl SourceSettings {
    /// Settings for file-based logging at `path`.
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            handler: Some(constants::FILE_HANDLER.to_string()),
            file: Some(path.into()),
        }
    }

    /// Whether the host declares file-based logging active.
    pub fn is_file_logging(&self) -> bool {
        self.handler.as_deref() == Some(constants::FILE_HANDLER)
    }

    /// Resolve the settings into a readable source.
    ///
    /// A handler other than "file" means the source is disabled. File
    /// logging with no path is a configuration fault.
    pub fn resolve(&self) -> Result<LogSource, ConfigError> {
        if !self.is_file_logging() {
            return Ok(LogSource::Disabled);
        }
        match self.file.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Ok(LogSource::File(resolve_path(raw)?)),
            _ => Err(ConfigError::FileLoggingUnconfigured),
        }
    }
}

/// Turn a configured path into an absolute, canonical one where possible.
///
/// A leading `~` is expanded to the home directory; relative paths are
/// joined onto the working directory; existing paths are canonicalised so
/// symlinks resolve. A path that does not exist is returned absolute but
/// otherwise untouched.
pub fn resolve_path(raw: &str) -> Result<PathBuf, ConfigError> {
    let expanded = expand_home(raw);

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        let cwd = std::env::current_dir().map_err(|e| ConfigError::Io {
            path: expanded.clone(),
            source: e,
        })?;
        cwd.join(expanded)
    };

    match std::fs::canonicalize(&absolute) {
        Ok(canonical) => Ok(canonical),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(absolute),
        Err(e) => {
            tracing::debug!(path = %absolute.display(), error = %e, "Could not canonicalise path");
            Ok(absolute)
        }
    }
}

fn expand_home(raw: &str) -> PathBuf {
    let rest = if raw == "~" {
        Some("")
    } else {
        raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\"))
    };

    match (rest, BaseDirs::new()) {
        (Some(rest), Some(base)) => base.home_dir().join(rest),
        (Some(_), None) => {
            tracing::warn!(path = raw, "Could not determine home directory; using path as-is");
            PathBuf::from(raw)
        }
        (None, _) => PathBuf::from(raw),
    }
}

/// Validated application configuration derived from `config.toml`.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Log source settings.
    pub source: SourceSettings,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Result format.
    pub output_format: ExportFormat,
}

/// Load and validate a config file.
///
/// Returns `AppConfig` with validated values and a list of non-fatal
/// warnings. If the file does not exist, returns defaults with no warnings
/// (the source is then disabled). An unreadable or unparseable file is an
/// error: guessing defaults would silently turn every query empty.
pub fn load_config(config_path: &Path) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        return Ok((AppConfig::default(), warnings));
    }

    let content = std::fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
        path: config_path.to_path_buf(),
        source: e,
    })?;

    let raw: RawConfig = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: config_path.to_path_buf(),
        source: e,
    })?;

    let mut config = AppConfig::default();

    // -- Source --
    config.source = SourceSettings {
        handler: raw.source.handler.map(|h| h.trim().to_string()),
        file: raw.source.file,
    };
    if let Some(ref handler) = config.source.handler {
        if handler != constants::FILE_HANDLER {
            warnings.push(format!(
                "[source] handler = \"{handler}\" is not file-based. Log queries will return no records.",
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    // -- Output: format --
    if let Some(ref format) = raw.output.format {
        match format.parse::<ExportFormat>() {
            Ok(parsed) => config.output_format = parsed,
            Err(reason) => warnings.push(format!(
                "[output] format: {reason}. Using default ({}).",
                ExportFormat::default(),
            )),
        }
    }

    Ok((config, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join(constants::CONFIG_FILE_NAME);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_missing_config_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(&dir.path().join("absent.toml")).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(config.source, SourceSettings::default());
        assert_eq!(config.output_format, ExportFormat::Text);
        assert_eq!(config.source.resolve().unwrap(), LogSource::Disabled);
    }

    #[test]
    fn test_full_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "[source]\nhandler = \"file\"\nfile = \"/var/log/engine.log\"\n\
             [logging]\nlevel = \"debug\"\n\
             [output]\nformat = \"json\"\n\
             [future]\nunknown = 1\n",
        );
        let (config, warnings) = load_config(&path).unwrap();
        assert!(warnings.is_empty(), "{warnings:?}");
        assert!(config.source.is_file_logging());
        assert_eq!(config.source.file.as_deref(), Some("/var/log/engine.log"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.output_format, ExportFormat::Json);
    }

    #[test]
    fn test_invalid_values_warn_and_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "[source]\nhandler = \"stream\"\n[logging]\nlevel = \"loud\"\n[output]\nformat = \"xml\"\n",
        );
        let (config, warnings) = load_config(&path).unwrap();
        assert_eq!(warnings.len(), 3, "{warnings:?}");
        assert_eq!(config.log_level, None);
        assert_eq!(config.output_format, ExportFormat::Text);
        assert_eq!(config.source.resolve().unwrap(), LogSource::Disabled);
    }

    #[test]
    fn test_unparseable_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[source\nhandler = ");
        assert!(matches!(load_config(&path), Err(ConfigError::TomlParse { .. })));
    }

    #[test]
    fn test_file_handler_without_path_is_a_fault() {
        let settings = SourceSettings {
            handler: Some("file".to_string()),
            file: None,
        };
        assert!(matches!(
            settings.resolve(),
            Err(ConfigError::FileLoggingUnconfigured)
        ));

        let blank = SourceSettings {
            handler: Some("file".to_string()),
            file: Some("  ".to_string()),
        };
        assert!(matches!(
            blank.resolve(),
            Err(ConfigError::FileLoggingUnconfigured)
        ));
    }

    #[test]
    fn test_disabled_handler_ignores_path() {
        let settings = SourceSettings {
            handler: None,
            file: Some("/var/log/engine.log".to_string()),
        };
        assert_eq!(settings.resolve().unwrap(), LogSource::Disabled);
    }

    #[test]
    fn test_resolve_existing_path_is_canonical() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("engine.log");
        fs::write(&log, "").unwrap();
        let with_dots = dir.path().join(".").join("engine.log");

        let resolved = resolve_path(with_dots.to_str().unwrap()).unwrap();
        assert_eq!(resolved, fs::canonicalize(&log).unwrap());
    }

    #[test]
    fn test_resolve_missing_relative_path_is_absolute() {
        let resolved = resolve_path("logquery-test-missing/engine.log").unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("logquery-test-missing/engine.log"));
    }

    #[test]
    fn test_expand_home() {
        let Some(base) = BaseDirs::new() else {
            return;
        };
        assert_eq!(expand_home("~/engine.log"), base.home_dir().join("engine.log"));
        assert_eq!(expand_home("~"), base.home_dir().join(""));
        assert_eq!(expand_home("/tmp/~/x"), PathBuf::from("/tmp/~/x"));
    }
}
