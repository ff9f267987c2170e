//! Group cache persistence
//!
//! `list --group` stores the discovered PRs grouped by `package@version`
//! so that later `groups`, `approve` and `merge` invocations can operate on
//! a named group without searching again.
//!
//! The file is JSON shaped as `{"groups": {"<key>": [<pr>, ...]}}`.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::paths;

/// Cached groups, keyed by group key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupCache<T> {
    pub groups: BTreeMap<String, Vec<T>>,
}

impl<T> Default for GroupCache<T> {
    fn default() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }
}

impl<T: Serialize + DeserializeOwned> GroupCache<T> {
    pub fn new(groups: BTreeMap<String, Vec<T>>) -> Self {
        Self { groups }
    }

    /// Load the cache from its default location
    ///
    /// Returns `Ok(None)` if no cache has been written yet.
    pub fn load() -> Result<Option<Self>> {
        Self::load_from_path(&paths::group_cache_path()?)
    }

    /// Save the cache to its default location
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&paths::group_cache_path()?)
    }

    pub fn load_from_path(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            log::debug!("No group cache at {:?}", path);
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read group cache: {:?}", path))?;
        let cache = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse group cache: {:?}", path))?;
        Ok(Some(cache))
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize group cache")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write group cache: {:?}", path))?;

        log::info!("Saved {} groups to {:?}", self.groups.len(), path);
        Ok(())
    }
}
