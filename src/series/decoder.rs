//! Row decoder
//!
//! Turns the measurement part of a data row into an [`Observation`].

use std::io::{BufRead, Seek, SeekFrom};

use crate::error::{MeteoError, Result};
use crate::observation::Observation;
use crate::temporal::TemporalKey;

use super::{DELIMITER, FIELD_COUNT, MISSING_VALUE, WIRE_MISSING};

/// Decode one measurement token
///
/// - `""` or `-9999` (exactly) → `Some(MISSING_VALUE)`
/// - `"23,5"` → `Some(23.5)` (only the first comma is a decimal separator)
/// - anything else that is not a number, including a blank token → `None`
pub fn parse_measurement(token: &str) -> Option<f64> {
    if token.is_empty() || token == WIRE_MISSING {
        return Some(MISSING_VALUE);
    }

    token.trim().replacen(',', ".", 1).parse().ok()
}

/// Decode the measurement columns of a row
///
/// `line` starts at the first measurement. Columns missing from the end of a
/// short row decode as missing; columns past the 17th are ignored.
/// `offset` only labels errors.
pub fn decode_fields(line: &str, offset: u64) -> Result<[f64; FIELD_COUNT]> {
    let mut values = [MISSING_VALUE; FIELD_COUNT];
    let mut tokens = line.trim_end_matches(|c: char| c == '\r' || c == '\n').split(DELIMITER);

    for (slot, field) in values.iter_mut().zip(Observation::FIELD_NAMES) {
        let token = tokens.next().unwrap_or("");
        *slot = parse_measurement(token).ok_or_else(|| MeteoError::Decode {
            offset,
            field,
            token: token.to_string(),
        })?;
    }

    Ok(values)
}

/// Seek to `offset`, read the rest of that line, and decode it
///
/// The reader's position is left after the decoded line; nothing is kept
/// between calls.
pub fn read_observation<R>(reader: &mut R, key: TemporalKey, offset: u64) -> Result<Observation>
where
    R: BufRead + Seek,
{
    reader.seek(SeekFrom::Start(offset))?;

    let mut buf = Vec::new();
    reader.read_until(b'\n', &mut buf)?;
    let line = String::from_utf8_lossy(&buf);

    let values = decode_fields(&line, offset)?;
    Ok(Observation::from_values(key, values))
}
