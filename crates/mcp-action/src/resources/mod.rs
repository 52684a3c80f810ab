//! Resource registry and the bundled example resources.

pub mod examples;
pub mod registry;

pub use registry::{Resource, ResourceBody, ResourceRegistry};
