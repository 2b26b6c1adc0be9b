//! Remote call transport
//!
//! The client only needs call-by-name invocation returning an untyped value.
//! Remote rejections must surface as [`WikiError::Fault`](crate::WikiError::Fault) so callers see
//! the wiki's own message.

pub mod jsonrpc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub use jsonrpc::JsonRpcTransport;

/// Executes one remote method call
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        (**self).call(method, params).await
    }
}
