//! MCP protocol handling: decoding, validation and method dispatch.

pub mod decoder;
pub mod handler;
pub mod method;
pub mod negotiation;
pub mod reply;
pub mod validator;

pub use decoder::{decode, RawBody};
pub use handler::ProtocolHandler;
pub use method::Method;
pub use reply::JsonRpcReply;
