use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::interface::{KeyValueStore, Result};

/// File-backed key-value store: one JSON object mapping keys to string
/// values, the whole file rewritten on every `set`.
///
/// The rewrite goes through a sibling temp file followed by a rename, so
/// a reader never observes a half-written map even if the process dies
/// mid-write.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        JsonFileStore { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        let map = serde_json::from_str(&contents)?;
        Ok(map)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut map = self.read_map()?;
        Ok(map.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_owned(), value.to_owned());

        let encoded = serde_json::to_string_pretty(&map)?;
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, encoded)?;
        fs::rename(&staging, &self.path)?;
        log::debug!("wrote {} keys to {}", map.len(), self.path.display());
        Ok(())
    }
}
