//! Command-line parsing and configuration resolution.

pub mod args;
pub mod profile;

pub use args::LaunchArgs;
pub use profile::{resolve_endpoint, split_services, LogLevel, ProcessConfiguration};
