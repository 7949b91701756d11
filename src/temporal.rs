//! Temporal Key
//!
//! Composite date/time key whose fields may each be left unspecified.
//!
//! ## Two Orderings
//! - [`Ord`]: strict lexicographic order over (year, month, day, hour,
//!   minute), wildcards sorting first. A total order, used to shape the
//!   observation index.
//! - [`TemporalKey::compare`]: the query comparison. A field pair only
//!   counts when both sides are concrete, so a key with every field
//!   unspecified is equal to every other key. Not transitive once wildcards
//!   are involved; never use it to sort.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Failure to parse a date or time column
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct KeyParseError(String);

/// Field comparison that ignores a pair unless both sides are set
fn compare_field<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => Ordering::Equal,
    }
}

// =============================================================================
// Date
// =============================================================================

/// Calendar date; `None` fields are wildcards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    pub year: Option<u16>,
    pub month: Option<u8>,
    pub day: Option<u8>,
}

impl Date {
    pub fn new(year: Option<u16>, month: Option<u8>, day: Option<u8>) -> Self {
        Self { year, month, day }
    }

    /// Wildcard-aware comparison, year first
    pub fn compare(&self, other: &Date) -> Ordering {
        compare_field(self.year, other.year)
            .then_with(|| compare_field(self.month, other.month))
            .then_with(|| compare_field(self.day, other.day))
    }

    /// Parse `YYYY-MM-DD` by position; any single-byte separator is accepted
    pub fn parse(column: &str) -> Result<Self, KeyParseError> {
        let column = column.trim();
        let year: u16 = parse_digits(column, 0..4, "year")?;
        let month: u8 = parse_digits(column, 5..7, "month")?;
        let day: u8 = parse_digits(column, 8..10, "day")?;

        if !(1..=12).contains(&month) {
            return Err(KeyParseError(format!("month out of range in {:?}", column)));
        }
        if !(1..=31).contains(&day) {
            return Err(KeyParseError(format!("day out of range in {:?}", column)));
        }

        Ok(Self::new(Some(year), Some(month), Some(day)))
    }

    fn is_concrete(&self) -> bool {
        self.year.is_some() && self.month.is_some() && self.day.is_some()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "{:04}", year)?,
            None => f.write_str("****")?,
        }
        f.write_str("-")?;
        write_field(f, self.month)?;
        f.write_str("-")?;
        write_field(f, self.day)
    }
}

// =============================================================================
// Time of Day
// =============================================================================

/// Hour and minute; `None` fields are wildcards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    pub hour: Option<u8>,
    pub minute: Option<u8>,
}

impl TimeOfDay {
    pub fn new(hour: Option<u8>, minute: Option<u8>) -> Self {
        Self { hour, minute }
    }

    /// Wildcard-aware comparison, hour first
    pub fn compare(&self, other: &TimeOfDay) -> Ordering {
        compare_field(self.hour, other.hour)
            .then_with(|| compare_field(self.minute, other.minute))
    }

    /// Parse `HH:MM` or `HHMM`; anything after the minutes (` UTC`) is ignored
    pub fn parse(column: &str) -> Result<Self, KeyParseError> {
        let digits = column.trim().replacen(':', "", 1);
        let hour: u8 = parse_digits(&digits, 0..2, "hour")?;
        let minute: u8 = parse_digits(&digits, 2..4, "minute")?;

        if hour > 23 {
            return Err(KeyParseError(format!("hour out of range in {:?}", column)));
        }
        if minute > 59 {
            return Err(KeyParseError(format!("minute out of range in {:?}", column)));
        }

        Ok(Self::new(Some(hour), Some(minute)))
    }

    fn is_concrete(&self) -> bool {
        self.hour.is_some() && self.minute.is_some()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_field(f, self.hour)?;
        f.write_str(":")?;
        write_field(f, self.minute)
    }
}

// =============================================================================
// Temporal Key
// =============================================================================

/// Observation timestamp, or a partially specified query bound
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TemporalKey {
    pub date: Date,
    pub time: TimeOfDay,
}

impl TemporalKey {
    pub fn new(date: Date, time: TimeOfDay) -> Self {
        Self { date, time }
    }

    /// Every field unspecified; compares equal to any key
    pub fn any() -> Self {
        Self::default()
    }

    /// Only the year specified
    pub fn year(year: u16) -> Self {
        Self::new(Date::new(Some(year), None, None), TimeOfDay::default())
    }

    /// Fully concrete key
    pub fn at(year: u16, month: u8, day: u8, hour: u8, minute: u8) -> Self {
        Self::new(
            Date::new(Some(year), Some(month), Some(day)),
            TimeOfDay::new(Some(hour), Some(minute)),
        )
    }

    pub fn with_year(mut self, year: u16) -> Self {
        self.date.year = Some(year);
        self
    }

    pub fn with_month(mut self, month: u8) -> Self {
        self.date.month = Some(month);
        self
    }

    pub fn with_day(mut self, day: u8) -> Self {
        self.date.day = Some(day);
        self
    }

    pub fn with_hour(mut self, hour: u8) -> Self {
        self.time.hour = Some(hour);
        self
    }

    pub fn with_minute(mut self, minute: u8) -> Self {
        self.time.minute = Some(minute);
        self
    }

    /// True when no field is a wildcard
    pub fn is_concrete(&self) -> bool {
        self.date.is_concrete() && self.time.is_concrete()
    }

    /// True when the specified fields form a leading run of
    /// (year, month, day, hour, minute) with nothing set after a wildcard
    ///
    /// For such a key, `compare` against concrete keys is monotone in the
    /// strict ordering, so matching keys are contiguous in the index.
    pub fn is_prefix(&self) -> bool {
        let fields = [
            self.date.year.is_some(),
            self.date.month.is_some(),
            self.date.day.is_some(),
            self.time.hour.is_some(),
            self.time.minute.is_some(),
        ];
        fields.windows(2).all(|pair| pair[0] || !pair[1])
    }

    /// Query comparison: date first, then time, skipping wildcard pairs
    pub fn compare(&self, other: &TemporalKey) -> Ordering {
        self.date
            .compare(&other.date)
            .then_with(|| self.time.compare(&other.time))
    }

    /// `from <= self <= to` under [`compare`](Self::compare)
    pub fn within(&self, from: &TemporalKey, to: &TemporalKey) -> bool {
        self.compare(from) != Ordering::Less && self.compare(to) != Ordering::Greater
    }

    /// Build a key from the two leading columns of a data row
    pub fn parse_columns(date: &str, time: &str) -> Result<Self, KeyParseError> {
        Ok(Self::new(Date::parse(date)?, TimeOfDay::parse(time)?))
    }
}

impl fmt::Display for TemporalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.time)
    }
}

impl FromStr for TemporalKey {
    type Err = KeyParseError;

    /// `YYYY-MM-DD HH:MM`, `YYYY-MM-DD;HHMM`, or a bare date (time left open)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once(|c: char| c == ' ' || c == ';' || c == 'T') {
            Some((date, time)) => Self::parse_columns(date, time),
            None => Ok(Self::new(Date::parse(s)?, TimeOfDay::default())),
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn parse_digits<T: FromStr>(
    column: &str,
    range: std::ops::Range<usize>,
    what: &str,
) -> Result<T, KeyParseError> {
    let digits = column
        .get(range)
        .ok_or_else(|| KeyParseError(format!("{} missing in {:?}", what, column)))?;

    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(KeyParseError(format!("invalid {} {:?}", what, digits)));
    }

    digits
        .parse()
        .map_err(|_| KeyParseError(format!("invalid {} {:?}", what, digits)))
}

fn write_field(f: &mut fmt::Formatter<'_>, field: Option<u8>) -> fmt::Result {
    match field {
        Some(value) => write!(f, "{:02}", value),
        None => f.write_str("**"),
    }
}
