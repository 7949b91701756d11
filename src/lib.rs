//! # meteoindex
//!
//! Time-keyed random access into weather station observation files:
//! - One indexing pass maps every row timestamp to a byte offset
//! - Lookups seek straight to the row and decode it on demand
//! - Queries by exact timestamp or by (possibly wildcarded) time range
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ObservationStore                         │
//! │        get_one_record / get_range_records / metadata        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────┐
//!   │OrderedIndex │          │ File (seek)  │
//!   │ key → offset│─────────▶│  + decoder   │
//!   └──────┬──────┘          └──────┬───────┘
//!          │                        │
//!          ▼                        ▼
//!   ┌─────────────┐          ┌──────────────┐
//!   │ TemporalKey │          │   Sequence   │
//!   │ (wildcards) │          │ <Observation>│
//!   └─────────────┘          └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod index;
pub mod sequence;
pub mod temporal;
pub mod observation;
pub mod series;
pub mod summary;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{MeteoError, Result};
pub use config::Config;
pub use index::OrderedIndex;
pub use observation::Observation;
pub use sequence::Sequence;
pub use series::ObservationStore;
pub use temporal::TemporalKey;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of meteoindex
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
