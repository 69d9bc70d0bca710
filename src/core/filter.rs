// LogQuery - core/filter.rs
//
// Query criteria and the filter/rank step.
// All supplied criteria are AND-combined; survivors are returned newest
// first. Core layer: pure logic, no I/O.

use crate::core::model::LogEntry;
use crate::util::error::CriteriaError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::HashSet;
use std::str::FromStr;

// =============================================================================
// Since
// =============================================================================

/// Lower time bound of a query, as the caller supplied it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Since {
    /// A calendar date with no time. Means midnight at the start of that day.
    Date(NaiveDate),

    /// An exact instant.
    DateTime(NaiveDateTime),
}

impl Since {
    /// The inclusive cutoff instant.
    pub fn cutoff(&self) -> NaiveDateTime {
        match *self {
            Since::Date(date) => date.and_time(NaiveTime::MIN),
            Since::DateTime(instant) => instant,
        }
    }
}

impl FromStr for Since {
    type Err = CriteriaError;

    /// Accepts, in order:
    /// `2023-10-02`, `2023-10-02 08:30:00[.f]`, `2023-10-02T08:30:00[.f]`,
    /// the log's own `2023-10-02 08:30:00,f`, and RFC 3339 with an offset
    /// (whose wall-clock time is kept, since log timestamps carry no zone).
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(Since::Date(date));
        }

        let normalised = trimmed.replacen('T', " ", 1).replacen(',', ".", 1);
        for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
            if let Ok(instant) = NaiveDateTime::parse_from_str(&normalised, format) {
                return Ok(Since::DateTime(instant));
            }
        }

        if let Ok(aware) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Since::DateTime(aware.naive_local()));
        }

        Err(CriteriaError::InvalidSince {
            raw: raw.to_string(),
        })
    }
}

// =============================================================================
// Query Criteria
// =============================================================================

/// Filter requested by a caller. Every field is optional; an absent or
/// empty field places no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryCriteria {
    /// Keep entries at or after this instant.
    pub since: Option<Since>,

    /// Acceptable level labels (exact match). Empty = all.
    pub levels: HashSet<String>,

    /// Acceptable logger names (exact match). Empty = all.
    pub loggers: HashSet<String>,

    /// Case-insensitive substring required in the content.
    pub search: Option<String>,
}

impl QueryCriteria {
    /// Returns true if no criterion restricts anything.
    pub fn is_empty(&self) -> bool {
        self.since.is_none()
            && self.levels.is_empty()
            && self.loggers.is_empty()
            && self.search.is_none()
    }

    pub fn with_since(mut self, since: Since) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_levels<I, S>(mut self, levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.levels.extend(levels.into_iter().map(Into::into));
        self
    }

    pub fn with_loggers<I, S>(mut self, loggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.loggers.extend(loggers.into_iter().map(Into::into));
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

/// Filter entries by `criteria` and order the survivors newest first.
///
/// Survivors are stably sorted by timestamp ascending and then reversed, so
/// among equal timestamps the entry that appeared later in the source comes
/// first.
pub fn apply_criteria(entries: Vec<LogEntry>, criteria: &QueryCriteria) -> Vec<LogEntry> {
    let cutoff = criteria.since.map(|s| s.cutoff());
    let search_lower = criteria.search.as_deref().map(str::to_lowercase);
    let total = entries.len();

    let mut kept: Vec<LogEntry> = if criteria.is_empty() {
        entries
    } else {
        entries
            .into_iter()
            .filter(|entry| matches_all(entry, criteria, cutoff, search_lower.as_deref()))
            .collect()
    };

    // sort_by_key is stable.
    kept.sort_by_key(|entry| entry.timestamp);
    kept.reverse();

    tracing::debug!(total, kept = kept.len(), "Criteria applied");
    kept
}

fn matches_all(
    entry: &LogEntry,
    criteria: &QueryCriteria,
    cutoff: Option<NaiveDateTime>,
    search_lower: Option<&str>,
) -> bool {
    if let Some(cutoff) = cutoff {
        if entry.timestamp < cutoff {
            return false;
        }
    }

    if !criteria.levels.is_empty() && !criteria.levels.contains(&entry.level) {
        return false;
    }

    if !criteria.loggers.is_empty() && !criteria.loggers.contains(&entry.logger) {
        return false;
    }

    if let Some(needle) = search_lower {
        if !entry.content.to_lowercase().contains(needle) {
            return false;
        }
    }

    true
}
