//! DokuWiki Client - typed Rust client for DokuWiki's remote API
//!
//! This crate provides:
//! - Page id model (namespace, name and listing depth of a `a:b:c` id)
//! - Schema-checked decoding of remote responses into typed records
//! - `WikiClient` with page, search and attachment operations, plus
//!   recursive namespace deletion built on top of them
//! - A `Transport` trait and its JSON-RPC over HTTP implementation

pub mod client;
pub mod config;
pub mod constants;
pub mod decode;
pub mod error;
pub mod model;
pub mod page_id;
pub mod transport;

pub use client::{PutAttachmentOptions, PutPageOptions, WikiClient};
pub use config::WikiClientConfig;
pub use error::{FieldProblem, ParseError, Result, WikiError};
pub use model::*;
pub use transport::{JsonRpcTransport, Transport};
