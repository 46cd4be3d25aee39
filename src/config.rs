use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::paths;
use crate::HmmerError;

pub const DEFAULT_PIPE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub binaries: BinaryConfig,
    pub pipeline: PipelineConfig,
    pub workspace: WorkspaceConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinaryConfig {
    /// Directory holding the HMMER binaries; `PATH` is searched when unset
    pub dir: Option<PathBuf>,
    /// `dir` uses the prebuilt layout: `v<version>/<binary>_<platform>`
    pub bundled: bool,
    /// Per-binary paths keyed by binary name (e.g. `hmmscan`)
    pub overrides: BTreeMap<String, PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Seconds the second stage of a pipe may run before it is killed
    pub timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_PIPE_TIMEOUT_SECS,
        }
    }
}

impl PipelineConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Parent directory for temp workspaces (system temp dir when unset)
    pub root: Option<PathBuf>,
}

impl WorkspaceConfig {
    pub fn parent_dir(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(std::env::temp_dir)
    }
}

impl Config {
    /// Read `$HMMER_HOME/config.toml` if present, then apply environment overrides
    pub fn load_default() -> Result<Self, HmmerError> {
        let path = paths::default_config_path();
        let config = if path.exists() {
            load_config(&path)?
        } else {
            Config::default()
        };
        config.with_env_overrides()
    }

    /// Apply HMMER_BIN_DIR, HMMER_PIPE_TIMEOUT and HMMER_WORKSPACE_DIR
    pub fn with_env_overrides(mut self) -> Result<Self, HmmerError> {
        if let Ok(dir) = std::env::var("HMMER_BIN_DIR") {
            self.binaries.dir = Some(PathBuf::from(dir));
        }
        if let Ok(secs) = std::env::var("HMMER_PIPE_TIMEOUT") {
            self.pipeline.timeout_secs = secs.trim().parse().map_err(|_| {
                HmmerError::Config(format!("HMMER_PIPE_TIMEOUT is not a number: {}", secs))
            })?;
        }
        if let Ok(dir) = std::env::var("HMMER_WORKSPACE_DIR") {
            self.workspace.root = Some(PathBuf::from(dir));
        }
        Ok(self)
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, HmmerError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| HmmerError::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), HmmerError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| HmmerError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}
