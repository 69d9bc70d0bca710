// LogQuery - core/export.rs
//
// Text, CSV, and JSON rendering of query results.
// Core layer: writes to any Write trait object.

use crate::core::model::LogEntry;
use crate::util::constants;
use crate::util::error::ExportError;
use chrono::{NaiveDateTime, Timelike};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Output format for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Records re-rendered in the primary-line grammar.
    #[default]
    Text,
    /// Pretty-printed JSON array.
    Json,
    /// CSV with a header row.
    Csv,
}

impl ExportFormat {
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!(
                "unknown output format \"{other}\". Expected text, json, or csv"
            )),
        }
    }
}

/// Write entries in the requested format. Returns the number written.
pub fn export<W: Write>(
    entries: &[LogEntry],
    format: ExportFormat,
    writer: W,
) -> Result<usize, ExportError> {
    match format {
        ExportFormat::Text => export_text(entries, writer),
        ExportFormat::Json => export_json(entries, writer),
        ExportFormat::Csv => export_csv(entries, writer),
    }
}

/// Render a timestamp with the log's comma-fraction layout.
///
/// Six fractional digits unless the value has sub-microsecond precision,
/// in which case all nine are written so nothing is lost.
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    let format = if timestamp.nanosecond() % 1_000 == 0 {
        constants::TEXT_TIMESTAMP_FORMAT
    } else {
        constants::TEXT_TIMESTAMP_FORMAT_NANOS
    };
    timestamp.format(format).to_string()
}

/// Render one entry back into the primary-line grammar.
///
/// Continuation lines in `content` follow verbatim on their own lines.
pub fn format_entry(entry: &LogEntry) -> String {
    format!(
        "{} [{}] {} ({}:{}) {}",
        format_timestamp(&entry.timestamp),
        entry.logger,
        entry.level,
        entry.file,
        entry.line,
        entry.content
    )
}

/// Export entries as plain text, one record per block.
pub fn export_text<W: Write>(entries: &[LogEntry], mut writer: W) -> Result<usize, ExportError> {
    for entry in entries {
        writeln!(writer, "{}", format_entry(entry)).map_err(ExportError::Io)?;
    }
    writer.flush().map_err(ExportError::Io)?;
    Ok(entries.len())
}

/// Export entries to CSV format.
///
/// Writes: timestamp, logger, level, file, line, content
pub fn export_csv<W: Write>(entries: &[LogEntry], writer: W) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["timestamp", "logger", "level", "file", "line", "content"])
        .map_err(ExportError::Csv)?;

    let mut count = 0;
    for entry in entries {
        csv_writer
            .write_record([
                &format_timestamp(&entry.timestamp),
                &entry.logger,
                &entry.level,
                &entry.file,
                &entry.line.to_string(),
                &entry.content,
            ])
            .map_err(ExportError::Csv)?;
        count += 1;
    }

    csv_writer.flush().map_err(ExportError::Io)?;

    Ok(count)
}

/// Export entries to JSON format (array of objects).
pub fn export_json<W: Write>(entries: &[LogEntry], mut writer: W) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(&mut writer, entries).map_err(ExportError::Json)?;
    writeln!(writer).map_err(ExportError::Io)?;
    Ok(entries.len())
}
