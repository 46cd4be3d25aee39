//! Resolution of binary paths, done once per engine

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::types::{Tool, BINARY_VERSION};
use crate::config::BinaryConfig;
use crate::{HmmerError, Result};

/// Suffix of the prebuilt binaries for the host platform
pub fn platform_suffix() -> Result<&'static str> {
    match (std::env::consts::OS, std::env::consts::ARCH) {
        ("linux", "x86_64") => Ok("manylinux2010_x86_64"),
        // The macOS build runs on Apple silicon through Rosetta
        ("macos", _) => Ok("macosx_10_9_x86_64"),
        (os, arch) => Err(HmmerError::UnsupportedPlatform(format!(
            "no prebuilt HMMER binaries for {}-{}",
            os, arch
        ))),
    }
}

/// Absolute paths of the HMMER binaries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryTable {
    paths: BTreeMap<Tool, PathBuf>,
}

impl BinaryTable {
    /// Resolve every tool: explicit override, then `dir`, then `PATH`
    ///
    /// Tools that cannot be found are left out; asking for one later
    /// fails with `MissingBinary`.
    pub fn resolve(config: &BinaryConfig) -> Result<Self> {
        let bundled_dir = match (&config.dir, config.bundled) {
            (Some(dir), true) => Some((dir.join(format!("v{}", BINARY_VERSION)), platform_suffix()?)),
            _ => None,
        };

        let mut paths = BTreeMap::new();
        for tool in Tool::ALL {
            let found = if let Some(path) = config.overrides.get(tool.binary_name()) {
                Some(path.clone())
            } else if let Some((dir, suffix)) = &bundled_dir {
                Some(dir.join(tool.bundled_name(suffix)))
            } else if let Some(dir) = &config.dir {
                Some(dir.join(tool.binary_name()))
            } else {
                which::which(tool.binary_name()).ok()
            };

            match found {
                Some(path) => {
                    tracing::debug!(tool = %tool, path = %path.display(), "resolved binary");
                    paths.insert(tool, path);
                }
                None => tracing::debug!(tool = %tool, "binary not found on PATH"),
            }
        }

        Ok(Self { paths })
    }

    /// Use binaries named plainly (`hmmscan`, ...) inside one directory
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let paths = Tool::ALL
            .iter()
            .map(|tool| (*tool, dir.join(tool.binary_name())))
            .collect();
        Self { paths }
    }

    pub fn with_path(mut self, tool: Tool, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(tool, path.into());
        self
    }

    pub fn get(&self, tool: Tool) -> Result<&Path> {
        self.paths
            .get(&tool)
            .map(PathBuf::as_path)
            .ok_or(HmmerError::MissingBinary(tool))
    }

    pub fn is_available(&self, tool: Tool) -> bool {
        self.paths.get(&tool).is_some_and(|p| p.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_dir_layout() {
        let config = BinaryConfig {
            dir: Some(PathBuf::from("/opt/hmmer/bin")),
            ..Default::default()
        };
        let table = BinaryTable::resolve(&config).unwrap();
        assert_eq!(
            table.get(Tool::Scan).unwrap(),
            Path::new("/opt/hmmer/bin/hmmscan")
        );
    }

    #[test]
    fn test_override_wins() {
        let mut config = BinaryConfig {
            dir: Some(PathBuf::from("/opt/hmmer/bin")),
            ..Default::default()
        };
        config
            .overrides
            .insert("hmmfetch".to_string(), PathBuf::from("/custom/hmmfetch"));
        let table = BinaryTable::resolve(&config).unwrap();
        assert_eq!(
            table.get(Tool::Fetch).unwrap(),
            Path::new("/custom/hmmfetch")
        );
        assert_eq!(
            table.get(Tool::Press).unwrap(),
            Path::new("/opt/hmmer/bin/hmmpress")
        );
    }

    #[cfg(all(target_os = "linux", target_arch = "x86_64"))]
    #[test]
    fn test_bundled_layout() {
        let config = BinaryConfig {
            dir: Some(PathBuf::from("/pkg/bin")),
            bundled: true,
            ..Default::default()
        };
        let table = BinaryTable::resolve(&config).unwrap();
        assert_eq!(
            table.get(Tool::Emit).unwrap(),
            Path::new("/pkg/bin/v3.3.2/hmmemit_manylinux2010_x86_64")
        );
    }

    #[test]
    fn test_missing_tool() {
        let table = BinaryTable::default();
        assert!(matches!(
            table.get(Tool::Search),
            Err(HmmerError::MissingBinary(Tool::Search))
        ));
        assert!(!table.is_available(Tool::Search));
    }
}
