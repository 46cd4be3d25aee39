//! External HMMER binaries: naming, flag construction and execution

pub mod binaries;
pub mod options;
pub mod runner;
pub mod types;

pub use binaries::{platform_suffix, BinaryTable};
pub use options::{Capture, CapturePaths, EmitOptions, SearchOptions};
pub use runner::{Invocation, ProcessOutput, ProcessRunner};
pub use types::{Tool, BINARY_VERSION};
