// LogQuery - platform/fs.rs
//
// File-read capability for log sources.
// The trait lets the app layer be tested without real filesystem access.

use std::io;
use std::path::Path;

/// Provides the full current text of a log source.
pub trait SourceReader {
    /// Read the whole file at `path`.
    ///
    /// Returns `Ok(None)` when the file does not exist. Other failures are
    /// returned as errors for the caller to decide on.
    fn read_source(&self, path: &Path) -> io::Result<Option<String>>;
}

/// `SourceReader` backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSourceReader;

impl SourceReader for FsSourceReader {
    fn read_source(&self, path: &Path) -> io::Result<Option<String>> {
        match read_file_lossy(path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Read the full content of a file as a string in a single bulk read.
///
/// For files with invalid UTF-8, uses lossy conversion.
pub fn read_file_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
