//! Observation Store
//!
//! Owns the source file handle and both indexes; serves lookups by seeking
//! into the file and decoding the row on demand.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{MeteoError, Result};
use crate::index::OrderedIndex;
use crate::observation::Observation;
use crate::sequence::Sequence;
use crate::temporal::TemporalKey;

use super::decoder::read_observation;
use super::indexer::{build_index, IndexStats};

/// Store lifecycle: `Unopened → Indexing → Ready`
///
/// `open` only ever returns a `Ready` store; the earlier states are visible
/// in the debug log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Unopened,
    Indexing,
    Ready,
}

/// Indexed, read-only view over an observation file
///
/// ## Access Model
/// Every lookup seeks the single file cursor owned by the store, so reads
/// take `&mut self`. Share a store across threads only behind a lock.
pub struct ObservationStore {
    /// Source file path
    path: PathBuf,

    /// Store configuration
    config: Config,

    /// Buffered handle; its position is only meaningful during a read
    file: BufReader<File>,

    /// Header key → raw header value
    metadata: OrderedIndex<String, String>,

    /// Row timestamp → offset of the row's first measurement column
    observations: OrderedIndex<TemporalKey, u64>,

    /// Indexing pass counters
    stats: IndexStats,
}

impl ObservationStore {
    /// Open and index a file with the default config
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, Config::default())
    }

    /// Open and index a file
    ///
    /// Steps:
    /// 1. Open the file (fails with `Open`)
    /// 2. Run the indexing pass (header, then one entry per data row)
    /// 3. Rebalance the observation index if configured
    pub fn open_with_config(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!(path = %path.display(), state = ?StoreState::Unopened, "opening observation file");

        // Step 1: Acquire the file handle
        let file = File::open(&path).map_err(|source| MeteoError::Open {
            path: path.clone(),
            source,
        })?;
        let mut file = BufReader::with_capacity(config.read_buffer_capacity, file);

        // Step 2: Indexing pass
        debug!(state = ?StoreState::Indexing, "indexing");
        let started = Instant::now();
        let build = build_index(&mut file, &config)?;
        let mut observations = build.observations;

        // Step 3: Sorted input leaves a chain; rebuild it balanced
        if config.rebalance_index && !observations.is_empty() {
            let skewed_depth = observations.depth();
            observations.rebalance();
            debug!(
                before = skewed_depth,
                after = observations.depth(),
                "rebalanced observation index"
            );
        }

        info!(
            "Indexed {} observations from {} ({} blank lines, {} skipped) in {:?}",
            build.stats.rows_indexed,
            path.display(),
            build.stats.blank_lines,
            build.stats.rows_skipped,
            started.elapsed()
        );

        Ok(Self {
            path,
            config,
            file,
            metadata: build.metadata,
            observations,
            stats: build.stats,
        })
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Read the observation at `key`
    ///
    /// Wildcard fields in `key` are honoured during the descent: the first
    /// indexed key on the search path that compares equal is used.
    pub fn get_one_record(&mut self, key: &TemporalKey) -> Result<Observation> {
        let node = self
            .observations
            .search_by(key, |a, b| a.compare(b))
            .ok_or(MeteoError::KeyNotFound(*key))?;

        debug!(key = %node.key(), offset = *node.value(), "reading observation");
        read_observation(&mut self.file, *node.key(), *node.value())
    }

    /// Read every observation with `from <= key <= to`, in ascending order
    ///
    /// Bounds may contain wildcards. A reversed range matches nothing and so
    /// fails with `EmptyRange`.
    pub fn get_range_records(
        &mut self,
        from: &TemporalKey,
        to: &TemporalKey,
    ) -> Result<Sequence<Observation>> {
        // Prefix-shaped bounds select a contiguous run of the index
        let nodes = if from.is_prefix() && to.is_prefix() {
            self.observations.list_range(from, to, |key, bound| key.compare(bound))
        } else {
            self.observations.list(|key| key.within(from, to))
        };

        if nodes.is_empty() {
            return Err(MeteoError::EmptyRange {
                from: *from,
                to: *to,
            });
        }

        debug!(from = %from, to = %to, matches = nodes.len(), "reading observation range");

        let mut records = Sequence::new();
        for node in &nodes {
            records.push_back(read_observation(&mut self.file, *node.key(), *node.value())?);
        }

        Ok(records)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Header entries
    pub fn metadata(&self) -> &OrderedIndex<String, String> {
        &self.metadata
    }

    /// Single header value
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata.get(&key.to_string()).map(String::as_str)
    }

    /// The timestamp → offset index
    pub fn index(&self) -> &OrderedIndex<TemporalKey, u64> {
        &self.observations
    }

    pub fn observation_count(&self) -> usize {
        self.observations.len()
    }

    /// Earliest indexed timestamp
    pub fn first_key(&self) -> Option<TemporalKey> {
        self.observations.first().map(|node| *node.key())
    }

    /// Latest indexed timestamp
    pub fn last_key(&self) -> Option<TemporalKey> {
        self.observations.last().map(|node| *node.key())
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    /// Always `Ready`: a store only exists once `open` has finished indexing
    pub fn state(&self) -> StoreState {
        StoreState::Ready
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
