//! Scoped temporary directories for report captures and materialized inputs
//!
//! Each workspace lives exactly as long as the value: dropping it removes the
//! directory and everything inside, whether the call returned normally or
//! bailed out with `?`.
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::config::WorkspaceConfig;
use crate::Result;

#[derive(Debug)]
pub struct TempWorkspace {
    /// Unique identifier for this workspace
    pub id: String,
    /// Root path of this workspace
    pub root: PathBuf,
}

impl TempWorkspace {
    /// Create a workspace under the default parent directory
    pub fn new(purpose: &str) -> Result<Self> {
        Self::with_config(purpose, &WorkspaceConfig::default())
    }

    pub fn with_config(purpose: &str, config: &WorkspaceConfig) -> Result<Self> {
        let parent = config.parent_dir();
        fs::create_dir_all(&parent)?;

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let id = format!("hmmer-{}-{}_{}", purpose, timestamp, Uuid::new_v4());

        let root = parent.join(&id);
        fs::create_dir(&root)?;
        tracing::debug!(workspace = %root.display(), "created temp workspace");

        Ok(Self { id, root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a file inside the workspace; nothing is created
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Write `contents` to a new file inside the workspace
    pub fn write_file(&self, name: &str, contents: impl AsRef<[u8]>) -> Result<PathBuf> {
        let path = self.file_path(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    fn cleanup(&self) -> std::io::Result<()> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root)?;
        }
        Ok(())
    }
}

impl Drop for TempWorkspace {
    fn drop(&mut self) {
        // Never mask the outcome of the operation that owned the workspace
        if let Err(e) = self.cleanup() {
            tracing::warn!(
                workspace = %self.root.display(),
                error = %e,
                "failed to clean up temp workspace"
            );
        }
    }
}
