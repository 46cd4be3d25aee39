//! Host-side driver for the HMMER profile-HMM tools
//!
//! [`Hmmer`] owns one profile database and runs the external binaries
//! against it: indexing, pressing, profile extraction, sequence emission,
//! scans and searches. Scan and search reports are parsed into typed rows by
//! the readers in [`tables`] and handed back as a [`ResultBundle`].

pub mod bio;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod paths;
pub mod profile;
pub mod result;
pub mod tables;
pub mod tools;
pub mod workspace;

pub use crate::config::Config;
pub use crate::engine::{Hmmer, SearchTarget};
pub use crate::error::{HmmerError, ParseError, ParseFailure, ProcessError, Result};
pub use crate::profile::{IndexState, ProfileDatabase};
pub use crate::result::ResultBundle;
pub use crate::tables::{
    read_domtbl, read_domtbl_from, read_tbl, read_tbl_from, DomainRecord, SummaryRecord, TableKind, TableReader,
};
pub use crate::tools::{Capture, EmitOptions, SearchOptions, Tool};
