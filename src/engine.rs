//! The orchestrator tying one profile database to the HMMER binaries

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::bio::fasta::{parse_fasta_from_bytes, write_fasta_to_writer};
use crate::bio::sequence::Sequence;
use crate::config::{Config, WorkspaceConfig};
use crate::profile::ProfileDatabase;
use crate::result::ResultBundle;
use crate::tables::{read_domtbl, read_tbl};
use crate::tools::{BinaryTable, EmitOptions, Invocation, ProcessRunner, SearchOptions, Tool};
use crate::workspace::TempWorkspace;
use crate::Result;

/// Sequences to scan or search against the profile database
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTarget {
    /// An existing sequence file
    Path(PathBuf),
    /// FASTA text held in memory
    Sequences(String),
    /// Parsed records held in memory
    Records(Vec<Sequence>),
}

impl SearchTarget {
    /// Turn the target into a file the binaries can read
    fn materialize(&self, workspace: &TempWorkspace) -> Result<PathBuf> {
        match self {
            SearchTarget::Path(path) => {
                let path = std::path::absolute(path)?;
                if !path.exists() {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("target sequence file not found: {}", path.display()),
                    )
                    .into());
                }
                Ok(path)
            }
            SearchTarget::Sequences(text) => workspace.write_file("target.fasta", text),
            SearchTarget::Records(records) => {
                let path = workspace.file_path("target.fasta");
                let mut writer = BufWriter::new(File::create(&path)?);
                write_fasta_to_writer(&mut writer, records)?;
                writer.flush()?;
                Ok(path)
            }
        }
    }
}

impl From<PathBuf> for SearchTarget {
    fn from(path: PathBuf) -> Self {
        SearchTarget::Path(path)
    }
}

impl From<&Path> for SearchTarget {
    fn from(path: &Path) -> Self {
        SearchTarget::Path(path.to_path_buf())
    }
}

impl From<&PathBuf> for SearchTarget {
    fn from(path: &PathBuf) -> Self {
        SearchTarget::Path(path.clone())
    }
}

impl From<Vec<Sequence>> for SearchTarget {
    fn from(records: Vec<Sequence>) -> Self {
        SearchTarget::Records(records)
    }
}

/// One profile database plus the binaries that operate on it
///
/// Every call blocks until its external processes exit. The cached index
/// status makes an engine `!Sync`; give each thread its own engine.
#[derive(Debug)]
pub struct Hmmer {
    profile: ProfileDatabase,
    binaries: BinaryTable,
    runner: ProcessRunner,
    workspace: WorkspaceConfig,
}

impl Hmmer {
    /// Open `profile` using `$HMMER_HOME/config.toml` and environment overrides
    pub fn new<P: AsRef<Path>>(profile: P) -> Result<Self> {
        Self::with_config(profile, &Config::load_default()?)
    }

    pub fn with_config<P: AsRef<Path>>(profile: P, config: &Config) -> Result<Self> {
        Ok(Self {
            profile: ProfileDatabase::new(profile)?,
            binaries: BinaryTable::resolve(&config.binaries)?,
            runner: ProcessRunner::new(config.pipeline.timeout()),
            workspace: config.workspace.clone(),
        })
    }

    /// Open `profile` with an already resolved binary table and default settings
    pub fn with_binaries<P: AsRef<Path>>(profile: P, binaries: BinaryTable) -> Result<Self> {
        Ok(Self {
            profile: ProfileDatabase::new(profile)?,
            binaries,
            runner: ProcessRunner::default(),
            workspace: WorkspaceConfig::default(),
        })
    }

    pub fn with_pipe_timeout(mut self, timeout: Duration) -> Self {
        self.runner = ProcessRunner::new(timeout);
        self
    }

    pub fn with_workspace_config(mut self, workspace: WorkspaceConfig) -> Self {
        self.workspace = workspace;
        self
    }

    pub fn profile(&self) -> &Path {
        self.profile.path()
    }

    pub fn database(&self) -> &ProfileDatabase {
        &self.profile
    }

    pub fn binaries(&self) -> &BinaryTable {
        &self.binaries
    }

    fn invocation(&self, tool: Tool) -> Result<Invocation> {
        Ok(Invocation::new(self.binaries.get(tool)?))
    }

    fn fetch_invocation(&self, key: &str) -> Result<Invocation> {
        Ok(self.invocation(Tool::Fetch)?.arg(self.profile()).arg(key))
    }

    fn workspace(&self, purpose: &str) -> Result<TempWorkspace> {
        TempWorkspace::with_config(purpose, &self.workspace)
    }

    /// Build the key index used by `fetch` and restricted searches
    pub fn index(&self) -> Result<()> {
        let invocation = self.invocation(Tool::Fetch)?.arg("--index").arg(self.profile());
        self.runner.run(&invocation)?;
        Ok(())
    }

    pub fn is_indexed(&self) -> bool {
        self.profile.is_indexed()
    }

    /// Convert the database into the binary files `hmmscan` needs
    pub fn press(&self) -> Result<()> {
        let invocation = self.invocation(Tool::Press)?.arg(self.profile());
        self.runner.run(&invocation)?;
        Ok(())
    }

    pub fn is_pressed(&self) -> bool {
        self.profile.is_pressed()
    }

    /// Text of the profile stored under `key`
    pub fn fetch(&self, key: &str) -> Result<String> {
        let output = self.runner.run(&self.fetch_invocation(key)?)?;
        Ok(output.stdout_text())
    }

    /// Concatenated text of several profiles, in key order
    pub fn fetch_many<S: AsRef<str>>(&self, keys: &[S]) -> Result<String> {
        let workspace = self.workspace("fetch")?;
        let mut listing = String::new();
        for key in keys {
            listing.push_str(key.as_ref());
            listing.push('\n');
        }
        let keyfile = workspace.write_file("keys.txt", listing)?;

        let invocation = self
            .invocation(Tool::Fetch)?
            .arg("-f")
            .arg(self.profile())
            .arg(&keyfile);
        let output = self.runner.run(&invocation)?;
        Ok(output.stdout_text())
    }

    /// Sample sequences from the profile stored under `key`
    pub fn emit(&self, key: &str, options: &EmitOptions) -> Result<Vec<Sequence>> {
        let emit = self
            .invocation(Tool::Emit)?
            .args(options.build_args())
            .arg("-");
        let output = self.runner.run_piped(&self.fetch_invocation(key)?, &emit)?;
        parse_fasta_from_bytes(&output.stdout)
    }

    /// Scan target sequences against the pressed profile database
    pub fn scan(&self, target: impl Into<SearchTarget>, options: &SearchOptions) -> Result<ResultBundle> {
        self.scan_search(Tool::Scan, target.into(), options)
    }

    /// Search the profiles against a target sequence database
    pub fn search(&self, target: impl Into<SearchTarget>, options: &SearchOptions) -> Result<ResultBundle> {
        self.scan_search(Tool::Search, target.into(), options)
    }

    fn scan_search(&self, tool: Tool, target: SearchTarget, options: &SearchOptions) -> Result<ResultBundle> {
        // Default captures live here and are parsed before it is dropped
        let workspace = self.workspace(tool.name())?;
        let target = target.materialize(&workspace)?;
        let captures = options.resolve_captures(&workspace);
        let invocation = self
            .invocation(tool)?
            .args(options.build_args(&captures));

        if options.is_restricted() {
            let key = options.restriction_key()?;
            let invocation = invocation.arg("-").arg(&target);
            self.runner
                .run_piped(&self.fetch_invocation(key)?, &invocation)?;
        } else {
            let invocation = invocation.arg(self.profile()).arg(&target);
            self.runner.run(&invocation)?;
        }

        let summary = captures.tblout.as_ref().map(read_tbl).transpose()?;
        let domain = captures.domtblout.as_ref().map(read_domtbl).transpose()?;
        tracing::debug!(
            tool = %tool,
            summary_rows = summary.as_ref().map(Vec::len),
            domain_rows = domain.as_ref().map(Vec::len),
            "parsed result tables"
        );

        Ok(ResultBundle::new(summary, domain))
    }
}
