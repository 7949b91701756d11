//! Indexing pass
//!
//! Single forward scan that reads the header block and records the byte
//! offset of every data row's measurement columns.

use std::io::BufRead;

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{MeteoError, Result};
use crate::index::OrderedIndex;
use crate::temporal::TemporalKey;

use super::{COLUMN_TITLE_LINES, DELIMITER, HEADER_LINES};

/// Counters collected while indexing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Data rows inserted into the observation index
    pub rows_indexed: usize,
    /// Empty lines in the data section
    pub blank_lines: usize,
    /// Rows dropped because their timestamp did not parse (lenient mode)
    pub rows_skipped: usize,
    /// Bytes consumed by the pass
    pub bytes_scanned: u64,
}

/// Output of the indexing pass
pub(crate) struct IndexBuild {
    pub metadata: OrderedIndex<String, String>,
    pub observations: OrderedIndex<TemporalKey, u64>,
    pub stats: IndexStats,
}

/// Line reader that tracks the absolute offset of each line start
struct LineCursor<'a, R> {
    reader: &'a mut R,
    buf: Vec<u8>,
    position: u64,
    line_number: usize,
}

impl<'a, R: BufRead> LineCursor<'a, R> {
    fn new(reader: &'a mut R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            position: 0,
            line_number: 0,
        }
    }

    /// Read the next line; returns its start offset, or None at end of file.
    /// The line (without its terminator) is left in `self.buf`.
    fn next_line(&mut self) -> Result<Option<u64>> {
        self.buf.clear();
        let read = self.reader.read_until(b'\n', &mut self.buf)?;
        if read == 0 {
            return Ok(None);
        }

        let start = self.position;
        self.position += read as u64;
        self.line_number += 1;

        while matches!(self.buf.last(), Some(b'\n' | b'\r')) {
            self.buf.pop();
        }

        Ok(Some(start))
    }
}

/// Run the indexing pass over a reader positioned at the start of the file
pub(crate) fn build_index<R: BufRead>(reader: &mut R, config: &Config) -> Result<IndexBuild> {
    let mut cursor = LineCursor::new(reader);
    let mut metadata = OrderedIndex::new();
    let mut observations = OrderedIndex::new();
    let mut stats = IndexStats::default();

    // Step 1: header block
    for _ in 0..HEADER_LINES {
        if cursor.next_line()?.is_none() {
            break;
        }
        let line = String::from_utf8_lossy(&cursor.buf);
        if let Some((key, value)) = parse_header_line(&line) {
            debug!(key = %key, value = %value, "header entry");
            metadata.insert(key, value);
        }
    }

    // Step 2: column titles
    for _ in 0..COLUMN_TITLE_LINES {
        cursor.next_line()?;
    }

    // Step 3: data rows
    while let Some(line_start) = cursor.next_line()? {
        if cursor.buf.is_empty() {
            stats.blank_lines += 1;
            continue;
        }

        match parse_row_key(&cursor.buf) {
            Ok((key, consumed)) => {
                observations.insert(key, line_start + consumed);
                stats.rows_indexed += 1;
            }
            Err(reason) if config.skip_malformed_rows => {
                warn!(line = cursor.line_number, %reason, "skipping row with malformed timestamp");
                stats.rows_skipped += 1;
            }
            Err(reason) => {
                return Err(MeteoError::MalformedTimestamp {
                    line: cursor.line_number,
                    reason,
                });
            }
        }
    }

    stats.bytes_scanned = cursor.position;

    Ok(IndexBuild {
        metadata,
        observations,
        stats,
    })
}

/// Split a header line at its first delimiter
///
/// The key is cut at its first `:`; lines without a delimiter carry no entry.
fn parse_header_line(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once(DELIMITER)?;
    let key = match key.find(':') {
        Some(colon) => &key[..colon],
        None => key,
    };
    Some((key.to_string(), value.to_string()))
}

/// Parse the two timestamp columns of a data row
///
/// Returns the key and the number of bytes up to the first measurement
/// column (capped at the row length when there are no measurements).
fn parse_row_key(row: &[u8]) -> std::result::Result<(TemporalKey, u64), String> {
    let text = std::str::from_utf8(row).map_err(|e| format!("row is not UTF-8: {}", e))?;
    let mut columns = text.splitn(3, DELIMITER);

    let date = columns.next().unwrap_or("");
    let time = columns
        .next()
        .ok_or_else(|| format!("missing time column in {:?}", text))?;

    let key = TemporalKey::parse_columns(date, time).map_err(|e| e.to_string())?;

    // date + ';' + time + ';'
    let consumed = (date.len() + time.len() + 2).min(row.len());
    Ok((key, consumed as u64))
}
