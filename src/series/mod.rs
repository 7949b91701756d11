//! Series Module
//!
//! Indexed access to a station's observation file.
//!
//! ## Responsibilities
//! - One forward pass at open: header metadata plus timestamp → offset index
//! - Seek-and-decode on every lookup, no record cache
//! - Single-key and time-range queries
//!
//! ## File Format (fixed)
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Header (8 lines)                                         │
//! │   KEY:;VALUE       (text after the first ':' is dropped) │
//! ├──────────────────────────────────────────────────────────┤
//! │ Column titles (1 line, ignored)                          │
//! ├──────────────────────────────────────────────────────────┤
//! │ Data rows                                                │
//! │   YYYY-MM-DD;HHMM;f1;f2;...;f17                          │
//! │   ^ index offset points here ─┘                          │
//! │   (decimal comma; "" or -9999 means missing)             │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod decoder;
mod indexer;
mod store;

pub use indexer::IndexStats;
pub use store::{ObservationStore, StoreState};

// =============================================================================
// Shared Constants (used by indexer, decoder, store)
// =============================================================================

/// Number of leading `key;value` metadata lines
pub const HEADER_LINES: usize = 8;

/// Column title rows between the header and the data
pub const COLUMN_TITLE_LINES: usize = 1;

/// Column delimiter
pub const DELIMITER: char = ';';

/// Measurement columns per data row
pub const FIELD_COUNT: usize = 17;

/// Missing-value marker as written in the file
pub const WIRE_MISSING: &str = "-9999";

/// Missing-value marker after decoding
pub const MISSING_VALUE: f64 = -1.0;
