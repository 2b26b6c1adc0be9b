//! JSON-RPC over HTTP transport
//!
//! Talks to DokuWiki's `lib/exe/jsonrpc.php` endpoint. Each call is a single
//! POST; there is no retry and no failover, the wiki is the only server.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::config::WikiClientConfig;
use crate::error::{Result, WikiError};
use crate::transport::Transport;

const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<RpcFault>,
}

/// Older DokuWiki releases always send an `error` member and use code 0 for
/// success.
#[derive(Debug, Deserialize)]
struct RpcFault {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// JSON-RPC client for a single wiki endpoint
pub struct JsonRpcTransport {
    client: Client,
    config: WikiClientConfig,
    next_id: AtomicU64,
}

impl JsonRpcTransport {
    pub fn new(config: WikiClientConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.read_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            config,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn config(&self) -> &WikiClientConfig {
        &self.config
    }

    async fn handle_response(&self, method: &str, response: Response) -> Result<Value> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("{} failed with status {}: {}", method, status, body);
            return Err(WikiError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        let body: RpcResponse = serde_json::from_slice(&response.bytes().await?)?;
        match body.error {
            Some(fault) if fault.code != 0 => {
                debug!("{} returned fault {}: {}", method, fault.code, fault.message);
                Err(WikiError::Fault {
                    code: fault.code,
                    message: fault.message,
                })
            }
            _ => Ok(body.result),
        }
    }
}

#[async_trait]
impl Transport for JsonRpcTransport {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        let request = RpcRequest {
            jsonrpc: JSONRPC_VERSION,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        debug!("Calling {} (request id {})", method, request.id);

        let mut builder = self.client.post(&self.config.url).json(&request);
        if self.config.has_auth() {
            builder = builder.basic_auth(&self.config.username, Some(&self.config.password));
        }

        let response = builder.send().await?;
        self.handle_response(method, response).await
    }
}
