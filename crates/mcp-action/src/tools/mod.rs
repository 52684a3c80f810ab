//! Tool registry and the bundled example tools.

pub mod calculator;
pub mod echo;
pub mod registry;
pub mod weather;

pub use registry::{Tool, ToolHandler, ToolRegistry};
