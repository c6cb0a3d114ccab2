//! Persisted key/value configuration store
//!
//! The core only ever talks to storage through the narrow [`ConfigStore`]
//! trait, so tests can substitute any backend. The shipped backend is a
//! plain-text `key=value` file in the project directory.

use crate::types::{BridgeError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Narrow persisted key/value accessor.
///
/// Keys are flat strings of the form `<namespace>.<property>`; values are
/// opaque strings. `query_pairs` enumerates in stable store order.
pub trait ConfigStore {
    fn get(&self, key: &str) -> Option<&str>;

    /// Durably persist a key/value pair. Existing keys are overwritten in
    /// place; new keys are appended.
    fn set_permanent(&mut self, key: &str, value: &str) -> Result<()>;

    /// All pairs whose key starts with `filter` (all pairs if `None`), in
    /// store order.
    fn query_pairs(&self, filter: Option<&str>) -> Vec<(String, String)>;
}

/// File-backed store: one `key=value` per line, split on the first `=`.
/// Blank lines and `#` comments are ignored on load. Entries keep their
/// file order across rewrites.
pub struct FileConfigStore {
    path: PathBuf,
    entries: Vec<(String, String)>,
}

impl FileConfigStore {
    /// Open the store at `path`, loading existing entries if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut entries = Vec::new();

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                BridgeError::Store(format!("failed to read \"{}\": {}", path.display(), e))
            })?;
            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                match line.split_once('=') {
                    Some((key, value)) => {
                        entries.push((key.trim().to_string(), value.trim().to_string()));
                    }
                    None => {
                        debug!("Ignoring malformed line in {}: {}", path.display(), line);
                    }
                }
            }
            debug!("Loaded {} entries from {}", entries.len(), path.display());
        }

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let mut content = String::new();
        for (key, value) in &self.entries {
            content.push_str(key);
            content.push('=');
            content.push_str(value);
            content.push('\n');
        }
        fs::write(&self.path, content).map_err(|e| {
            BridgeError::Store(format!("failed to write \"{}\": {}", self.path.display(), e))
        })
    }
}

impl ConfigStore for FileConfigStore {
    fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn set_permanent(&mut self, key: &str, value: &str) -> Result<()> {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
        self.flush()
    }

    fn query_pairs(&self, filter: Option<&str>) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter(|(k, _)| filter.map_or(true, |f| k.starts_with(f)))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileConfigStore {
        FileConfigStore::open(dir.path().join("vbridge.cfg")).unwrap()
    }

    #[test]
    fn set_is_durable_across_reopen() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set_permanent("vbridge.package", "myapp").unwrap();
        store.set_permanent("vbridge.ddl_file", "ddl.sql").unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.get("vbridge.package"), Some("myapp"));
        assert_eq!(reopened.get("vbridge.ddl_file"), Some("ddl.sql"));
    }

    #[test]
    fn overwrite_keeps_store_order() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set_permanent("vbridge.b", "1").unwrap();
        store.set_permanent("vbridge.a", "2").unwrap();
        store.set_permanent("vbridge.b", "3").unwrap();

        let pairs = store.query_pairs(None);
        assert_eq!(
            pairs,
            vec![
                ("vbridge.b".to_string(), "3".to_string()),
                ("vbridge.a".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn query_pairs_filters_by_key_prefix() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.set_permanent("vbridge.ddl_file", "ddl.sql").unwrap();
        store.set_permanent("vbridge.deployment_file", "d.xml").unwrap();
        store.set_permanent("other.ddl_file", "x").unwrap();

        let pairs = store.query_pairs(Some("vbridge.ddl"));
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "vbridge.ddl_file");
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vbridge.cfg");
        fs::write(&path, "# comment\n\nvbridge.package = spaced \n").unwrap();

        let store = FileConfigStore::open(&path).unwrap();
        assert_eq!(store.get("vbridge.package"), Some("spaced"));
        assert_eq!(store.query_pairs(None).len(), 1);
    }
}
