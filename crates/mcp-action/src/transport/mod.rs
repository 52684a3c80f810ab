//! Transports: the serverless action adapter plus local stdio and HTTP
//! front ends that feed it.

pub mod action;
pub mod event;
pub mod framing;
#[cfg(feature = "http")]
pub mod http;
pub mod stdio;

pub use action::{cors_headers, ActionHandler, LogScope};
pub use event::{parse_log_level, ActionEvent, ActionResponse, Verb};
#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use stdio::StdioTransport;
