//! Store configuration

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

/// Initial number of slots reserved by a new store
pub const DEFAULT_CAPACITY: usize = 64;

/// Largest initial capacity a configuration may ask for
pub const MAX_INITIAL_CAPACITY: usize = 1 << 20;

/// Configuration for a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Label attached to log records (snapshots inherit it)
    pub name: Option<String>,

    /// Number of entries to reserve up front
    pub initial_capacity: usize,
}

impl StoreConfig {
    /// Parse a configuration from JSON. Missing fields take their default.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: StoreConfig =
            serde_json::from_str(json).context("invalid store configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can build a store
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            bail!(
                "initial_capacity {} exceeds the maximum of {}",
                self.initial_capacity,
                MAX_INITIAL_CAPACITY
            );
        }
        Ok(())
    }

    /// Set the store name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            name: None,
            initial_capacity: DEFAULT_CAPACITY,
        }
    }
}
