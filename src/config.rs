//! Configuration for meteoindex
//!
//! The source file layout is fixed (see [`crate::series`]); only the
//! store's indexing behaviour is configurable here.

use crate::error::{MeteoError, Result};

/// Store configuration
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Index Configuration
    // -------------------------------------------------------------------------
    /// Rebuild the observation index into a balanced shape after the
    /// indexing pass. Sorted input otherwise leaves the tree as a chain.
    pub rebalance_index: bool,

    /// Skip rows whose timestamp columns do not parse instead of failing
    /// the whole indexing pass
    pub skip_malformed_rows: bool,

    // -------------------------------------------------------------------------
    // I/O Configuration
    // -------------------------------------------------------------------------
    /// Capacity of the buffered reader over the source file (bytes)
    pub read_buffer_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rebalance_index: true,
            skip_malformed_rows: false,
            read_buffer_capacity: 64 * 1024, // 64 KiB
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Rebalance the observation index after indexing
    pub fn rebalance_index(mut self, enabled: bool) -> Self {
        self.config.rebalance_index = enabled;
        self
    }

    /// Skip malformed rows instead of failing construction
    pub fn skip_malformed_rows(mut self, enabled: bool) -> Self {
        self.config.skip_malformed_rows = enabled;
        self
    }

    /// Set the read buffer capacity (in bytes)
    pub fn read_buffer_capacity(mut self, bytes: usize) -> Self {
        self.config.read_buffer_capacity = bytes;
        self
    }

    pub fn build(self) -> Result<Config> {
        if self.config.read_buffer_capacity == 0 {
            return Err(MeteoError::Config(
                "read_buffer_capacity must be greater than zero".to_string(),
            ));
        }
        Ok(self.config)
    }
}
