//! Configuration management

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub kodi: KodiConfig,
}

fn default_port() -> u16 {
    3000
}

/// Connection settings for the Kodi instance.
#[derive(Debug, Clone, Deserialize)]
pub struct KodiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_kodi_port")]
    pub port: u16,
    /// JSON-RPC endpoint path on the Kodi web server.
    #[serde(default = "default_rpc_path")]
    pub path: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for KodiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_kodi_port(),
            path: default_rpc_path(),
            username: None,
            password: None,
        }
    }
}

impl KodiConfig {
    /// Base URL of the Kodi web server.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Full JSON-RPC endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url(), self.path)
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_kodi_port() -> u16 {
    8080
}

fn default_rpc_path() -> String {
    "/jsonrpc".to_string()
}

pub fn load_config() -> Result<Config> {
    load_from(None)
}

/// Split out so tests can point at a specific file.
fn load_from(file: Option<&Path>) -> Result<Config> {
    let mut builder = ::config::Config::builder()
        // Start with defaults
        .set_default("port", 3000)?;

    // Load from config file if it exists
    builder = match file {
        Some(path) => builder.add_source(::config::File::from(path).required(true)),
        None => builder.add_source(::config::File::with_name("kodiview").required(false)),
    };

    // Override with environment variables (KODIVIEW_PORT, KODIVIEW_KODI__HOST, etc.)
    let config = builder
        .add_source(
            ::config::Environment::with_prefix("KODIVIEW")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear_env() {
        for (key, _) in std::env::vars() {
            if key.starts_with("KODIVIEW") {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    #[serial]
    fn defaults_apply_without_file_or_env() {
        clear_env();
        let config = load_from(None).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.kodi.host, "localhost");
        assert_eq!(config.kodi.port, 8080);
        assert_eq!(config.kodi.endpoint(), "http://localhost:8080/jsonrpc");
        assert_eq!(config.kodi.username, None);
    }

    #[test]
    #[serial]
    fn environment_overrides_nested_values() {
        clear_env();
        std::env::set_var("KODIVIEW_KODI__HOST", "htpc.local");
        std::env::set_var("KODIVIEW_KODI__PORT", "8081");
        std::env::set_var("KODIVIEW_KODI__USERNAME", "kodi");

        let config = load_from(None).unwrap();
        assert_eq!(config.kodi.host, "htpc.local");
        assert_eq!(config.kodi.port, 8081);
        assert_eq!(config.kodi.username.as_deref(), Some("kodi"));
        assert_eq!(config.kodi.endpoint(), "http://htpc.local:8081/jsonrpc");

        clear_env();
    }

    #[test]
    #[serial]
    fn config_file_is_read_when_present() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kodiview.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "port = 8099").unwrap();
        writeln!(file, "[kodi]").unwrap();
        writeln!(file, "host = \"living-room\"").unwrap();
        writeln!(file, "path = \"/rpc\"").unwrap();

        let config = load_from(Some(&path)).unwrap();
        assert_eq!(config.port, 8099);
        assert_eq!(config.kodi.host, "living-room");
        assert_eq!(config.kodi.endpoint(), "http://living-room:8080/rpc");
    }
}
