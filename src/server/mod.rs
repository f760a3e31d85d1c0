//! Server identity, lifecycle, and MCP handler.

pub mod config;
pub mod runtime;
