//! Bundled resource location
//!
//! Template files ship alongside the binary. The locator searches a fixed
//! list of roots; a required resource that cannot be found anywhere is a
//! packaging defect, not a user error.

use crate::types::{BridgeError, Result};
use std::path::PathBuf;
use tracing::debug;

pub trait ResourceLocator {
    /// Find a bundled resource by its path relative to the install root.
    fn locate(&self, relative: &str) -> Option<PathBuf>;

    /// Like [`locate`](Self::locate), but a missing resource is fatal.
    fn require(&self, relative: &str) -> Result<PathBuf> {
        self.locate(relative)
            .ok_or_else(|| BridgeError::MissingResource(relative.to_string()))
    }
}

/// Searches, in order: `$VBRIDGE_HOME`, the running executable's directory
/// and its `../share/vbridge`, the user data directory, and (for dev runs)
/// the crate manifest directory.
pub struct DiskResourceLocator {
    roots: Vec<PathBuf>,
}

impl DiskResourceLocator {
    pub fn new() -> Self {
        let mut roots = Vec::new();

        if let Ok(home) = std::env::var("VBRIDGE_HOME") {
            roots.push(PathBuf::from(home));
        }

        if let Ok(exe) = std::env::current_exe() {
            if let Some(bin_dir) = exe.parent() {
                roots.push(bin_dir.to_path_buf());
                roots.push(bin_dir.join("../share/vbridge"));
            }
        }

        if let Some(data_dir) = dirs::data_dir() {
            roots.push(data_dir.join("vbridge"));
        }

        roots.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")));

        Self { roots }
    }

    /// A locator rooted at explicit directories, highest priority first.
    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }
}

impl Default for DiskResourceLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceLocator for DiskResourceLocator {
    fn locate(&self, relative: &str) -> Option<PathBuf> {
        for root in &self.roots {
            let candidate = root.join(relative);
            if candidate.is_file() {
                debug!("Found resource {} at {}", relative, candidate.display());
                return Some(candidate);
            }
        }
        None
    }
}
