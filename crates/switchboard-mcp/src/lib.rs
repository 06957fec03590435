//! MCP tool server exposing the gateway over stdio

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod error;
pub mod server;

pub use error::McpError;
pub use server::{GatewayServer, serve_stdio};
