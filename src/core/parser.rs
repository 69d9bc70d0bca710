// LogQuery - core/parser.rs
//
// Line classification and record assembly.
// Core layer: works on text already read by the caller, never touches the
// filesystem.
//
// Primary-line grammar, left to right:
//
//   YYYY-MM-DD HH:MM:SS,f+ [logger] LEVEL (file:line) content
//
// logger is [A-Za-z0-9_.]+, LEVEL is [A-Z]+, file is any run without ':',
// line is one or more digits, content is the rest of the line verbatim.
// The grammar is matched with a direct tokenizer over fixed delimiters, so
// the cost per line is linear with no backtracking.

use crate::core::model::LogEntry;
use crate::util::constants;
use chrono::{Datelike, NaiveDateTime, Timelike};

/// Outcome of classifying one physical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// The line is a primary line; the record it opens.
    Matched(LogEntry),

    /// The line is a continuation of the previous record (or noise).
    Unmatched,
}

/// What the assembler did with one physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// A new record was opened.
    Opened,
    /// The line was appended to the open record.
    Continued,
    /// No record was open yet, so the line was dropped.
    Discarded,
}

/// Result of assembling a whole text snapshot.
#[derive(Debug, Default)]
pub struct ParseResult {
    /// Assembled records, in source order.
    pub entries: Vec<LogEntry>,
    /// Total physical lines processed.
    pub lines_processed: u64,
    /// Lines folded into an open record.
    pub continuation_lines: u64,
    /// Leading lines dropped because no record was open yet.
    pub discarded_lines: u64,
}

// =============================================================================
// Line Classifier
// =============================================================================

/// Classify one physical line (line terminator already stripped).
///
/// A line that resembles the grammar but carries an impossible timestamp
/// (month 13, hour 25, ...) is `Unmatched`, never an error.
pub fn classify_line(line: &str) -> LineClass {
    match parse_primary(line) {
        Some(entry) => LineClass::Matched(entry),
        None => LineClass::Unmatched,
    }
}

fn parse_primary(line: &str) -> Option<LogEntry> {
    let (timestamp, rest) = split_timestamp(line)?;

    let rest = rest.strip_prefix(" [")?;
    let (logger, rest) = rest.split_once(']')?;
    if logger.is_empty() || !logger.bytes().all(is_logger_byte) {
        return None;
    }

    let rest = rest.strip_prefix(' ')?;
    let (level, rest) = rest.split_once(' ')?;
    if level.is_empty() || !level.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }

    let rest = rest.strip_prefix('(')?;
    let (file, rest) = rest.split_once(':')?;
    if file.is_empty() {
        return None;
    }

    let (line_number, content) = rest.split_once(") ")?;
    if line_number.is_empty() || !line_number.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Digit runs too long for u64 are not a usable line number.
    let line_number: u64 = line_number.parse().ok()?;

    Some(LogEntry {
        timestamp,
        logger: logger.to_string(),
        level: level.to_string(),
        file: file.to_string(),
        line: line_number,
        content: content.to_string(),
    })
}

fn is_logger_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'.'
}

/// Split the leading timestamp off a line and parse it.
///
/// Returns the parsed instant and the remainder of the line, starting at the
/// first byte after the fractional-seconds digits.
fn split_timestamp(line: &str) -> Option<(NaiveDateTime, &str)> {
    let bytes = line.as_bytes();
    let layout = constants::TIMESTAMP_LAYOUT;
    if bytes.len() <= layout.len() {
        return None;
    }

    let layout_ok = layout.iter().zip(bytes).all(|(&expected, &actual)| {
        if expected == b'd' {
            actual.is_ascii_digit()
        } else {
            actual == expected
        }
    });
    if !layout_ok {
        return None;
    }

    let fraction_start = layout.len();
    let fraction_len = bytes[fraction_start..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if fraction_len == 0 {
        return None;
    }
    let fraction_end = fraction_start + fraction_len;

    // The layout bytes are all ASCII, so these slices are on char boundaries.
    let base = NaiveDateTime::parse_from_str(
        &line[..fraction_start - 1],
        constants::TIMESTAMP_BASE_FORMAT,
    )
    .ok()?;
    // chrono accepts second 60 as a leap second and year 0000; the
    // logging subsystem can produce neither.
    if base.nanosecond() != 0 || base.year() < 1 {
        return None;
    }

    let timestamp = base.with_nanosecond(fraction_to_nanos(&line[fraction_start..fraction_end])?)?;
    Some((timestamp, &line[fraction_end..]))
}

/// Convert a run of fractional-second digits to nanoseconds.
///
/// The number of digits defines the precision: `1` is 100ms, `123456` is
/// 123456us. Digits past nanosecond precision are truncated.
fn fraction_to_nanos(digits: &str) -> Option<u32> {
    let kept = &digits[..digits.len().min(constants::MAX_FRACTION_DIGITS)];
    let value: u32 = kept.parse().ok()?;
    let scale = 10u32.pow((constants::MAX_FRACTION_DIGITS - kept.len()) as u32);
    Some(value * scale)
}

// =============================================================================
// Record Assembler
// =============================================================================

/// Fold one physical line into the records assembled so far.
///
/// The open record is the last element of `entries`. A primary line opens
/// a new record; any other line is appended to the open record, or dropped
/// if nothing has been opened yet.
pub fn fold_line(entries: &mut Vec<LogEntry>, line: &str) -> LineOutcome {
    match classify_line(line) {
        LineClass::Matched(entry) => {
            entries.push(entry);
            LineOutcome::Opened
        }
        LineClass::Unmatched => match entries.last_mut() {
            Some(open) => {
                open.push_continuation(line);
                LineOutcome::Continued
            }
            None => LineOutcome::Discarded,
        },
    }
}

/// Assemble an ordered sequence of physical lines into records.
pub fn assemble<'a, I>(lines: I) -> Vec<LogEntry>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut entries = Vec::new();
    for line in lines {
        fold_line(&mut entries, line);
    }
    entries
}

/// Assemble a whole text snapshot, keeping line statistics.
///
/// Lines are split on `\n`, with a trailing `\r` stripped, so CRLF sources
/// assemble the same as LF sources.
pub fn parse_content(content: &str) -> ParseResult {
    let mut result = ParseResult::default();

    for line in content.lines() {
        result.lines_processed += 1;
        match fold_line(&mut result.entries, line) {
            LineOutcome::Opened => {}
            LineOutcome::Continued => result.continuation_lines += 1,
            LineOutcome::Discarded => result.discarded_lines += 1,
        }
    }

    tracing::debug!(
        lines = result.lines_processed,
        entries = result.entries.len(),
        continuations = result.continuation_lines,
        discarded = result.discarded_lines,
        "Assembly complete"
    );

    result
}
