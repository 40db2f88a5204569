//! Utility functions for file parsing.

use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{RegionError, Result};

/// Creates a buffered reader that automatically handles gzip-compressed files.
///
/// This function checks if the file path ends with ".gz" and wraps the file
/// in a MultiGzDecoder if so, so block-gzipped (bgzip) files are read through
/// every member. Otherwise, it returns a plain buffered reader.
pub fn create_buffered_reader(file: File, path: &Path) -> Box<dyn BufRead + Send> {
    if path.to_string_lossy().ends_with(".gz") {
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    }
}

/// Open `path` and wrap it with [`create_buffered_reader`].
pub fn open_reader(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    let file = File::open(path).map_err(|source| RegionError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(create_buffered_reader(file, path))
}

/// Parse a coordinate column as a non-negative integer.
///
/// `which` names the column ("start" or "end") in the error.
pub fn parse_coordinate(field: &str, path: &Path, line: usize, which: &'static str) -> Result<u64> {
    let value: i64 = field.parse().map_err(|_| RegionError::MalformedRecord {
        path: path.to_path_buf(),
        line,
        message: format!("cannot convert {} coordinate '{}'", which, field),
    })?;
    if value < 0 {
        return Err(RegionError::NegativeCoordinate {
            path: path.to_path_buf(),
            line,
            which,
        });
    }
    Ok(value as u64)
}
