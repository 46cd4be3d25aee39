//! The external HMMER binaries driven by this crate

use serde::{Deserialize, Serialize};

use crate::HmmerError;

/// Version of the HMMER suite the bundled binaries are built from
pub const BINARY_VERSION: &str = "3.3.2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tool {
    Fetch,
    Press,
    Scan,
    Search,
    Emit,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::Fetch,
        Tool::Press,
        Tool::Scan,
        Tool::Search,
        Tool::Emit,
    ];

    /// Get the name of the tool
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Fetch => "fetch",
            Tool::Press => "press",
            Tool::Scan => "scan",
            Tool::Search => "search",
            Tool::Emit => "emit",
        }
    }

    /// Get the binary name for the tool
    pub fn binary_name(&self) -> &'static str {
        match self {
            Tool::Fetch => "hmmfetch",
            Tool::Press => "hmmpress",
            Tool::Scan => "hmmscan",
            Tool::Search => "hmmsearch",
            Tool::Emit => "hmmemit",
        }
    }

    /// File name of the prebuilt binary for a platform suffix
    pub fn bundled_name(&self, platform_suffix: &str) -> String {
        format!("{}_{}", self.binary_name(), platform_suffix)
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.binary_name())
    }
}

impl std::str::FromStr for Tool {
    type Err = HmmerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fetch" | "hmmfetch" => Ok(Tool::Fetch),
            "press" | "hmmpress" => Ok(Tool::Press),
            "scan" | "hmmscan" => Ok(Tool::Scan),
            "search" | "hmmsearch" => Ok(Tool::Search),
            "emit" | "hmmemit" => Ok(Tool::Emit),
            _ => Err(HmmerError::Config(format!("Unknown tool: {}", s))),
        }
    }
}
