use std::time::Duration;
use thiserror::Error;

use crate::tables::TableKind;
use crate::tools::Tool;

#[derive(Error, Debug)]
pub enum HmmerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Invalid FASTA: {0}")]
    Fasta(String),

    #[error("Contract violation: {0}")]
    ContractViolation(String),

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} binary not found; set binaries.dir or HMMER_BIN_DIR")]
    MissingBinary(Tool),
}

impl HmmerError {
    /// The process failure behind this error, if any
    pub fn as_process(&self) -> Option<&ProcessError> {
        match self {
            HmmerError::Process(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self, HmmerError::ContractViolation(_))
    }
}

/// An external binary did not complete successfully
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("{program} exited with {}: {stderr}", describe_code(.code))]
    Exit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{program} timed out after {timeout:?}")]
    Timeout { program: String, timeout: Duration },
}

impl ProcessError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProcessError::Timeout { .. })
    }

    /// Exit code of the failed process; `None` for timeouts and signal deaths
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ProcessError::Exit { code, .. } => *code,
            ProcessError::Timeout { .. } => None,
        }
    }

    pub fn program(&self) -> &str {
        match self {
            ProcessError::Exit { program, .. } | ProcessError::Timeout { program, .. } => program,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (killed by signal)".to_string(),
    }
}

/// A malformed data line in a summary or domain table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed {kind} line {line_number} ({reason}): {line}")]
pub struct ParseError {
    pub kind: TableKind,
    pub line_number: usize,
    pub line: String,
    pub reason: ParseFailure,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("found {found} columns, expected at least {expected}")]
    TooFewColumns { found: usize, expected: usize },

    #[error("column {column} is not an integer: {value:?}")]
    InvalidInteger { column: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, HmmerError>;
