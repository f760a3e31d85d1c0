//! MCP server startup, shutdown, and tool registration.
mod server_info;
mod shutdown;
mod startup;
mod tool_registry;

pub use server_info::build_instructions;
pub use shutdown::shutdown_on_signal;
pub use startup::{
    interpret_serve_outcome, prepare_server, run_server, run_with_transport, serve, Lifecycle,
    Phase, RuntimeExit, ServeError, Termination,
};
pub use tool_registry::DigitalOceanServer;
