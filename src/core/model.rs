// LogQuery - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies. Shared vocabulary across all layers.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// =============================================================================
// Log Entry (output of record assembly)
// =============================================================================

/// One structured log record.
///
/// Built from exactly one primary line; any continuation lines that followed
/// it in the source are appended to `content`, newline-joined. Once assembly
/// of a read finishes the entry is never modified again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Wall-clock time written by the logging subsystem. No timezone is
    /// recorded in the source, so none is attached here.
    pub timestamp: NaiveDateTime,

    /// Dotted name of the logger that produced the record.
    pub logger: String,

    /// Severity label, preserved verbatim (e.g. `INFO`, `WARNING`, `TRACE`).
    pub level: String,

    /// Source-file label as recorded by the logging subsystem.
    pub file: String,

    /// Reported source line number.
    pub line: u64,

    /// Message text, including any continuation lines.
    pub content: String,
}

impl LogEntry {
    /// Append one continuation line to the message.
    pub(crate) fn push_continuation(&mut self, line: &str) {
        self.content.push('\n');
        self.content.push_str(line);
    }
}

// =============================================================================
// Log Source
// =============================================================================

/// Where the query engine should read its raw text from, as resolved by the
/// configuration provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSource {
    /// File-based logging is not active. Queries return nothing.
    Disabled,

    /// Read the full current contents of this already-resolved path.
    File(PathBuf),
}
