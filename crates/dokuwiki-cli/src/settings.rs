//! Layered configuration for the command line client
//!
//! Sources, later ones winning: optional YAML file (`conf/dokuwiki.yml` or
//! `--config`), environment variables prefixed `DOKUWIKI_`, then command
//! line flags.

use std::path::Path;

use config::{Config, Environment, File};
use dokuwiki_client::WikiClientConfig;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "conf/dokuwiki.yml";
pub const ENV_PREFIX: &str = "DOKUWIKI";

/// Values the command line may override
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub url: String,
    pub username: String,
    pub password: String,
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        let client = WikiClientConfig::default();
        Self {
            url: client.url,
            username: client.username,
            password: client.password,
            connect_timeout_ms: client.connect_timeout_ms,
            read_timeout_ms: client.read_timeout_ms,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings. An explicit `config_file` must exist; the default one
    /// is optional.
    pub fn load(config_file: Option<&Path>, overrides: &Overrides) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let mut builder = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        for (key, value) in [
            ("url", &overrides.url),
            ("username", &overrides.username),
            ("password", &overrides.password),
            ("log_level", &overrides.log_level),
        ] {
            if let Some(value) = value {
                builder = builder.set_override(key, value.as_str())?;
            }
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn client_config(&self) -> WikiClientConfig {
        WikiClientConfig::new(&self.url)
            .with_auth(&self.username, &self.password)
            .with_timeouts(self.connect_timeout_ms, self.read_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn yaml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.url, "http://localhost/lib/exe/jsonrpc.php");
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.client_config(), WikiClientConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let file = yaml_file(
            "url: https://wiki.example.com/lib/exe/jsonrpc.php\nusername: bot\npassword: pw\nread_timeout_ms: 1000\n",
        );
        let settings = Settings::load(Some(file.path()), &Overrides::default()).unwrap();

        assert_eq!(settings.url, "https://wiki.example.com/lib/exe/jsonrpc.php");
        assert_eq!(settings.username, "bot");
        assert_eq!(settings.password, "pw");
        assert_eq!(settings.read_timeout_ms, 1000);
        assert_eq!(settings.connect_timeout_ms, 5000);

        let client = settings.client_config();
        assert!(client.has_auth());
        assert_eq!(client.read_timeout_ms, 1000);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let file = yaml_file("url: http://from-file/\nlog_level: warn\n");
        let overrides = Overrides {
            url: Some("http://from-flag/".to_string()),
            log_level: Some("debug".to_string()),
            ..Default::default()
        };
        let settings = Settings::load(Some(file.path()), &overrides).unwrap();

        assert_eq!(settings.url, "http://from-flag/");
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let result = Settings::load(
            Some(Path::new("/nonexistent/dokuwiki.yml")),
            &Overrides::default(),
        );
        assert!(result.is_err());
    }
}
