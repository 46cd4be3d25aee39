//! Flag construction for scan, search and emit invocations

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::workspace::TempWorkspace;
use crate::{HmmerError, Result};

/// Where a report should be written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Capture {
    /// Do not request this report
    #[default]
    Disabled,
    /// Write it to a file inside the call's temp workspace
    DefaultTempFile,
    /// Write it to a caller-owned path that outlives the call
    ExplicitPath(PathBuf),
}

impl Capture {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Capture::Disabled)
    }

    fn resolve(&self, workspace: &TempWorkspace, name: &str) -> Option<PathBuf> {
        match self {
            Capture::Disabled => None,
            Capture::DefaultTempFile => Some(workspace.file_path(name)),
            Capture::ExplicitPath(path) => Some(path.clone()),
        }
    }
}

impl From<bool> for Capture {
    fn from(enabled: bool) -> Self {
        if enabled {
            Capture::DefaultTempFile
        } else {
            Capture::Disabled
        }
    }
}

impl From<PathBuf> for Capture {
    fn from(path: PathBuf) -> Self {
        Capture::ExplicitPath(path)
    }
}

impl From<&Path> for Capture {
    fn from(path: &Path) -> Self {
        Capture::ExplicitPath(path.to_path_buf())
    }
}

/// Concrete report paths for one call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturePaths {
    pub output: Option<PathBuf>,
    pub tblout: Option<PathBuf>,
    pub domtblout: Option<PathBuf>,
}

/// Options shared by `scan` and `search`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    output: Capture,
    tblout: Capture,
    domtblout: Capture,
    heuristic: bool,
    cut_ga: bool,
    background_count: Option<u64>,
    restrict_to: Option<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            output: Capture::Disabled,
            tblout: Capture::Disabled,
            domtblout: Capture::Disabled,
            heuristic: true,
            cut_ga: false,
            background_count: None,
            restrict_to: None,
        }
    }
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Redirect the human-readable report (`-o`)
    pub fn with_output(mut self, capture: impl Into<Capture>) -> Self {
        self.output = capture.into();
        self
    }

    /// Request the summary table (`--tblout`)
    pub fn with_tblout(mut self, capture: impl Into<Capture>) -> Self {
        self.tblout = capture.into();
        self
    }

    /// Request the domain table (`--domtblout`)
    pub fn with_domtblout(mut self, capture: impl Into<Capture>) -> Self {
        self.domtblout = capture.into();
        self
    }

    /// `false` turns all filtering heuristics off (`--max`)
    pub fn with_heuristic(mut self, heuristic: bool) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Use the profiles' gathering thresholds (`--cut_ga`)
    pub fn with_cut_ga(mut self, cut_ga: bool) -> Self {
        self.cut_ga = cut_ga;
        self
    }

    /// Override the database size used for E-values (`-Z`)
    pub fn with_background_count(mut self, count: u64) -> Self {
        self.background_count = Some(count);
        self
    }

    /// Search only the profile stored under `key`
    pub fn restrict_to(mut self, key: impl Into<String>) -> Self {
        self.restrict_to = Some(key.into());
        self
    }

    pub fn is_restricted(&self) -> bool {
        self.restrict_to.is_some()
    }

    pub fn restriction_key(&self) -> Result<&str> {
        self.restrict_to.as_deref().ok_or_else(|| {
            HmmerError::ContractViolation("no restriction key was set".to_string())
        })
    }

    pub fn output(&self) -> &Capture {
        &self.output
    }

    pub fn tblout(&self) -> &Capture {
        &self.tblout
    }

    pub fn domtblout(&self) -> &Capture {
        &self.domtblout
    }

    pub fn resolve_captures(&self, workspace: &TempWorkspace) -> CapturePaths {
        CapturePaths {
            output: self.output.resolve(workspace, "output.txt"),
            tblout: self.tblout.resolve(workspace, "tblout.txt"),
            domtblout: self.domtblout.resolve(workspace, "domtblout.txt"),
        }
    }

    /// Flags in the order the binaries document them
    pub fn build_args(&self, captures: &CapturePaths) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();

        if let Some(path) = &captures.output {
            args.push("-o".into());
            args.push(path.into());
        }
        if let Some(path) = &captures.tblout {
            args.push("--tblout".into());
            args.push(path.into());
        }
        if let Some(path) = &captures.domtblout {
            args.push("--domtblout".into());
            args.push(path.into());
        }
        if !self.heuristic {
            args.push("--max".into());
        }
        if self.cut_ga {
            args.push("--cut_ga".into());
        }
        match self.background_count {
            Some(count) if count > 0 => {
                args.push("-Z".into());
                args.push(count.to_string().into());
            }
            _ => {}
        }

        args
    }
}

/// Options for sampling sequences from a profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitOptions {
    pub sample_count: Option<u32>,
    pub consensus: bool,
    pub seed: Option<u64>,
}

impl EmitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sample_count(mut self, count: u32) -> Self {
        self.sample_count = Some(count);
        self
    }

    pub fn with_consensus(mut self, consensus: bool) -> Self {
        self.consensus = consensus;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Consensus output takes precedence over sampling, so `-N` is dropped with `-c`
    pub fn build_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();

        if self.consensus {
            args.push("-c".into());
        } else if let Some(count) = self.sample_count {
            args.push("-N".into());
            args.push(count.to_string().into());
        }
        if let Some(seed) = self.seed {
            args.push("--seed".into());
            args.push(seed.to_string().into());
        }

        args
    }
}
