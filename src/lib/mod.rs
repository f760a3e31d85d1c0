//! Shared library modules providing the API client, error types, and telemetry initialization.

pub mod digitalocean;
pub mod errors;
pub mod telemetry;
