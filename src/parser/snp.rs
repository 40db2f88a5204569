//! Streaming reader for sorted SNP positions.
//!
//! Reads `chromosome position` rows (tab or space separated, gzip allowed) in
//! chunks so the scanner can consume large position lists without loading
//! them whole.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::error::{RegionError, Result};
use crate::parser::util::{open_reader, parse_coordinate};

/// One query position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnpPosition {
    pub chrom: String,
    pub pos: u64,
}

impl SnpPosition {
    pub fn new(chrom: impl Into<String>, pos: u64) -> Self {
        SnpPosition {
            chrom: chrom.into(),
            pos,
        }
    }
}

/// Streaming position reader for chunked processing.
pub struct SnpReader {
    reader: Box<dyn BufRead + Send>,
    path: PathBuf,
    line_num: usize,
}

impl SnpReader {
    /// Create a new SnpReader from a file path (supports .gz).
    pub fn new(path: &Path) -> Result<Self> {
        Ok(SnpReader {
            reader: open_reader(path)?,
            path: path.to_path_buf(),
            line_num: 0,
        })
    }

    /// Read the next chunk of positions.
    ///
    /// Returns `None` when EOF is reached. Blank lines and `#` comments are
    /// skipped; any other line must hold a chromosome and a position.
    pub fn read_chunk(&mut self, size: usize) -> Result<Option<Vec<SnpPosition>>> {
        let mut positions = Vec::with_capacity(size);
        let mut line = String::new();

        while positions.len() < size {
            line.clear();
            let bytes_read = self
                .reader
                .read_line(&mut line)
                .map_err(|source| RegionError::Io {
                    path: self.path.clone(),
                    source,
                })?;

            if bytes_read == 0 {
                break;
            }
            self.line_num += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            positions.push(self.parse_line(trimmed)?);
        }

        if positions.is_empty() {
            Ok(None)
        } else {
            Ok(Some(positions))
        }
    }

    fn parse_line(&self, line: &str) -> Result<SnpPosition> {
        let mut fields = line.split_whitespace();
        let (chrom, pos) = match (fields.next(), fields.next()) {
            (Some(c), Some(p)) => (c, p),
            _ => {
                return Err(RegionError::MalformedRecord {
                    path: self.path.clone(),
                    line: self.line_num,
                    message: "expected chromosome and position".to_string(),
                })
            }
        };
        let pos = parse_coordinate(pos, &self.path, self.line_num, "position")?;
        Ok(SnpPosition::new(chrom, pos))
    }
}
