// LogQuery - app/logs.rs
//
// Log read-and-query orchestration.
//
// Only a configuration fault (file logging enabled with no path) crosses
// this boundary as an error. A disabled source, a missing file, and a failed
// read all degrade to an empty result; a failed read is never retried.

use crate::core::filter::QueryCriteria;
use crate::core::model::{LogEntry, LogSource};
use crate::core::query::query_text;
use crate::platform::config::SourceSettings;
use crate::platform::fs::SourceReader;
use crate::util::error::ConfigError;

/// Read the configured log source and answer a query over it.
pub fn read_logs<R>(
    settings: &SourceSettings,
    reader: &R,
    criteria: &QueryCriteria,
) -> Result<Vec<LogEntry>, ConfigError>
where
    R: SourceReader + ?Sized,
{
    let source = settings.resolve()?;
    Ok(read_source(&source, reader, criteria))
}

/// Answer a query over an already-resolved source.
pub fn read_source<R>(source: &LogSource, reader: &R, criteria: &QueryCriteria) -> Vec<LogEntry>
where
    R: SourceReader + ?Sized,
{
    let text = match source {
        LogSource::Disabled => {
            tracing::debug!("File logging is not active");
            None
        }
        LogSource::File(path) => match reader.read_source(path) {
            Ok(Some(text)) => {
                tracing::debug!(path = %path.display(), bytes = text.len(), "Log source read");
                Some(text)
            }
            Ok(None) => {
                tracing::debug!(path = %path.display(), "Log file does not exist yet");
                None
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read log file");
                None
            }
        },
    };

    let entries = query_text(text.as_deref(), criteria);
    tracing::info!(results = entries.len(), "Log query complete");
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::io;
    use std::path::{Path, PathBuf};

    /// In-memory reader that counts how often it was asked.
    #[derive(Default)]
    struct MemoryReader {
        files: HashMap<PathBuf, String>,
        fail: bool,
        reads: Cell<usize>,
    }

    impl SourceReader for MemoryReader {
        fn read_source(&self, path: &Path) -> io::Result<Option<String>> {
            self.reads.set(self.reads.get() + 1);
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            }
            Ok(self.files.get(path).cloned())
        }
    }

    const LOG: &str = "\
2023-10-01 12:00:00,000000 [engine] INFO (a.py:1) one
2023-10-01 12:00:01,000000 [engine] ERROR (a.py:2) two
";

    fn log_path() -> PathBuf {
        PathBuf::from("/srv/engine/engine.log")
    }

    #[test]
    fn test_disabled_source_is_empty_without_reading() {
        let reader = MemoryReader::default();
        let result = read_logs(&SourceSettings::default(), &reader, &QueryCriteria::default());
        assert!(result.unwrap().is_empty());
        assert_eq!(reader.reads.get(), 0);
    }

    #[test]
    fn test_unconfigured_file_logging_is_a_fault() {
        let settings = SourceSettings {
            handler: Some("file".to_string()),
            file: None,
        };
        let reader = MemoryReader::default();
        let result = read_logs(&settings, &reader, &QueryCriteria::default());
        assert!(matches!(result, Err(ConfigError::FileLoggingUnconfigured)));
        assert_eq!(reader.reads.get(), 0);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let reader = MemoryReader::default();
        let result = read_source(&LogSource::File(log_path()), &reader, &QueryCriteria::default());
        assert!(result.is_empty());
    }

    #[test]
    fn test_read_failure_degrades_once() {
        let reader = MemoryReader {
            fail: true,
            ..Default::default()
        };
        let result = read_source(&LogSource::File(log_path()), &reader, &QueryCriteria::default());
        assert!(result.is_empty());
        assert_eq!(reader.reads.get(), 1);
    }

    #[test]
    fn test_reads_and_queries_file() {
        let mut reader = MemoryReader::default();
        reader.files.insert(log_path(), LOG.to_string());

        let criteria = QueryCriteria::default().with_levels(["ERROR"]);
        let result = read_source(&LogSource::File(log_path()), &reader, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].content, "two");
    }

    #[test]
    fn test_each_query_rereads_source() {
        let mut reader = MemoryReader::default();
        reader.files.insert(log_path(), LOG.to_string());
        let source = LogSource::File(log_path());

        let first = read_source(&source, &reader, &QueryCriteria::default());
        let second = read_source(&source, &reader, &QueryCriteria::default());
        assert_eq!(first, second);
        assert_eq!(reader.reads.get(), 2);
    }
}
