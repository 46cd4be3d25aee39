//! A profile database on disk and the sidecar files built from it

use std::cell::Cell;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::Result;

/// Sidecar produced by indexing a flat-text profile file
pub const INDEX_EXTENSION: &str = ".ssi";
/// Sidecar produced by indexing a pressed binary profile file
pub const PRESSED_INDEX_EXTENSION: &str = ".h3m.ssi";
/// Sidecars that together make up a pressed database
pub const PRESS_EXTENSIONS: [&str; 4] = [".h3f", ".h3i", ".h3m", ".h3p"];

/// Cached result of the last index probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexState {
    #[default]
    Unknown,
    Indexed,
    NotIndexed,
}

/// Absolute path of a profile file plus its cached index status
///
/// The index status is probed once and then kept, even if the sidecar files
/// disappear later. Running the indexer does not reset it either.
#[derive(Debug)]
pub struct ProfileDatabase {
    path: PathBuf,
    indexed: Cell<IndexState>,
}

impl ProfileDatabase {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            path: std::path::absolute(path.as_ref())?,
            indexed: Cell::new(IndexState::Unknown),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn index_state(&self) -> IndexState {
        self.indexed.get()
    }

    /// `P` with `ext` appended to its full file name (`Pfam-A.hmm` -> `Pfam-A.hmm.ssi`)
    pub fn sidecar(&self, ext: &str) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(ext);
        PathBuf::from(name)
    }

    pub fn is_indexed(&self) -> bool {
        if self.indexed.get() == IndexState::Unknown {
            let state = if self.sidecar(INDEX_EXTENSION).exists()
                || self.sidecar(PRESSED_INDEX_EXTENSION).exists()
            {
                IndexState::Indexed
            } else {
                IndexState::NotIndexed
            };
            tracing::debug!(profile = %self.path.display(), state = ?state, "probed index");
            self.indexed.set(state);
        }
        self.indexed.get() == IndexState::Indexed
    }

    /// All four press sidecars exist right now (never cached)
    pub fn is_pressed(&self) -> bool {
        PRESS_EXTENSIONS
            .iter()
            .all(|ext| self.sidecar(ext).exists())
    }
}
