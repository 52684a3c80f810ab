//! mcp-action: a Model Context Protocol server packaged as a serverless web
//! action, with stdio and HTTP front ends for local use.

pub mod config;
pub mod prompts;
pub mod protocol;
pub mod registry;
pub mod repl;
pub mod resources;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::resolve_options;
pub use protocol::ProtocolHandler;
pub use registry::CapabilityRegistry;
pub use transport::{ActionEvent, ActionHandler, ActionResponse, StdioTransport};
