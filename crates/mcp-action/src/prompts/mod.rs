//! Prompt registry and the bundled example prompt.

pub mod registry;
pub mod weather_info;

pub use registry::{Prompt, PromptRegistry};
