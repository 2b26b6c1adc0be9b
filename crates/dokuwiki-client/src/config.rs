// Configuration for WikiClient

use crate::constants::JSONRPC_PATH;

/// Configuration for the wiki JSON-RPC client
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WikiClientConfig {
    /// Full endpoint URL (e.g. "http://localhost/lib/exe/jsonrpc.php")
    pub url: String,
    /// Username for HTTP basic authentication; empty disables authentication
    pub username: String,
    pub password: String,
    /// Connection timeout in milliseconds (default: 5000)
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds (default: 30000)
    pub read_timeout_ms: u64,
}

impl Default for WikiClientConfig {
    fn default() -> Self {
        Self {
            url: format!("http://localhost{}", JSONRPC_PATH),
            username: String::new(),
            password: String::new(),
            connect_timeout_ms: 5000,
            read_timeout_ms: 30000,
        }
    }
}

impl WikiClientConfig {
    /// Create a config for the given endpoint URL
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Default::default()
        }
    }

    /// Create a config from the wiki base URL, appending the JSON-RPC path
    pub fn from_base_url(base_url: &str) -> Self {
        Self::new(&format!("{}{}", base_url.trim_end_matches('/'), JSONRPC_PATH))
    }

    /// Set authentication credentials
    pub fn with_auth(mut self, username: &str, password: &str) -> Self {
        self.username = username.to_string();
        self.password = password.to_string();
        self
    }

    /// Set timeouts
    pub fn with_timeouts(mut self, connect_ms: u64, read_ms: u64) -> Self {
        self.connect_timeout_ms = connect_ms;
        self.read_timeout_ms = read_ms;
        self
    }

    pub fn has_auth(&self) -> bool {
        !self.username.is_empty()
    }
}
