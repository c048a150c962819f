//! Server configuration.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `MASTERCLASS_*` environment variables.

use std::net::SocketAddr;

/// Path prefix the content API is mounted under unless overridden.
pub const DEFAULT_API_PREFIX: &str = "/make-server-9d7867d5";

const DEFAULT_PORT: u16 = 8300;

/// Server configuration.
#[derive(Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Storage backend type.
    pub storage_backend: StorageBackendType,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Bearer credential the content API requires. `None` leaves the API open.
    pub api_key: Option<String>,
    /// Path prefix of the content API, with a leading `/` and no trailing `/`.
    pub api_prefix: String,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("storage_backend", &self.storage_backend)
            .field("log_level", &self.log_level)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("api_prefix", &self.api_prefix)
            .finish()
    }
}

/// Supported storage backend types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackendType {
    /// In-memory (development only, data lost on restart).
    Memory,
    /// `RocksDB` persistent storage.
    RocksDb { path: String },
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            storage_backend: StorageBackendType::Memory,
            log_level: "info".to_owned(),
            api_key: None,
            api_prefix: DEFAULT_API_PREFIX.to_owned(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT`: port to bind on (binds to `0.0.0.0`)
    /// - `MASTERCLASS_BIND_ADDR`: full bind address (overrides `PORT`, default: `127.0.0.1:8300`)
    /// - `MASTERCLASS_STORAGE`: `memory` or `rocksdb` (default: `memory`)
    /// - `MASTERCLASS_STORAGE_PATH`: path for persistent backends (default: `./data`)
    /// - `MASTERCLASS_LOG_LEVEL`: log filter (default: `info`)
    /// - `MASTERCLASS_API_KEY`: bearer credential for the content API (optional)
    /// - `MASTERCLASS_API_PREFIX`: content API path prefix (default: `/make-server-9d7867d5`)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Priority: MASTERCLASS_BIND_ADDR > PORT > default
        let bind_addr = if let Some(addr) = lookup("MASTERCLASS_BIND_ADDR") {
            addr.parse().unwrap_or(defaults.bind_addr)
        } else if let Some(port) = lookup("PORT") {
            let port: u16 = port.parse().unwrap_or(DEFAULT_PORT);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            defaults.bind_addr
        };

        let storage_path =
            lookup("MASTERCLASS_STORAGE_PATH").unwrap_or_else(|| "./data".to_owned());

        let storage_backend = match lookup("MASTERCLASS_STORAGE")
            .unwrap_or_else(|| "memory".to_owned())
            .to_lowercase()
            .as_str()
        {
            "rocksdb" => StorageBackendType::RocksDb { path: storage_path },
            _ => StorageBackendType::Memory,
        };

        let log_level = lookup("MASTERCLASS_LOG_LEVEL").unwrap_or(defaults.log_level);

        let api_key = lookup("MASTERCLASS_API_KEY").filter(|k| !k.trim().is_empty());

        let api_prefix = lookup("MASTERCLASS_API_PREFIX")
            .map_or(defaults.api_prefix, |p| normalize_prefix(&p));

        Self {
            bind_addr,
            storage_backend,
            log_level,
            api_key,
            api_prefix,
        }
    }
}

impl ServerConfig {
    /// Reject settings the router cannot mount.
    ///
    /// # Errors
    ///
    /// Returns an error if the API prefix contains anything besides
    /// unreserved URL characters and `/`, or an empty segment. Route syntax
    /// such as `:id`, `*rest` or `{param}` is never a valid prefix.
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(bad) = self.api_prefix.chars().find(|c| !is_prefix_char(*c)) {
            anyhow::bail!(
                "MASTERCLASS_API_PREFIX {:?} contains unsupported character {bad:?}",
                self.api_prefix
            );
        }
        if self.api_prefix.contains("//") {
            anyhow::bail!(
                "MASTERCLASS_API_PREFIX {:?} contains an empty path segment",
                self.api_prefix
            );
        }
        Ok(())
    }
}

fn is_prefix_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~' | '/')
}

/// Force a leading `/` and strip trailing ones. An empty prefix mounts the
/// API at the root.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let cfg = config(&[]);
        assert_eq!(cfg.bind_addr, SocketAddr::from(([127, 0, 0, 1], 8300)));
        assert_eq!(cfg.storage_backend, StorageBackendType::Memory);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.api_key, None);
        assert_eq!(cfg.api_prefix, DEFAULT_API_PREFIX);
    }

    #[test]
    fn bind_addr_beats_port() {
        let cfg = config(&[("MASTERCLASS_BIND_ADDR", "127.0.0.1:9000"), ("PORT", "7000")]);
        assert_eq!(cfg.bind_addr, SocketAddr::from(([127, 0, 0, 1], 9000)));

        let cfg = config(&[("PORT", "7000")]);
        assert_eq!(cfg.bind_addr, SocketAddr::from(([0, 0, 0, 0], 7000)));
    }

    #[test]
    fn rocksdb_uses_storage_path() {
        let cfg = config(&[
            ("MASTERCLASS_STORAGE", "RocksDB"),
            ("MASTERCLASS_STORAGE_PATH", "/var/lib/masterclass"),
        ]);
        assert_eq!(
            cfg.storage_backend,
            StorageBackendType::RocksDb {
                path: "/var/lib/masterclass".to_owned()
            }
        );
    }

    #[test]
    fn blank_api_key_is_ignored() {
        assert_eq!(config(&[("MASTERCLASS_API_KEY", "  ")]).api_key, None);
        assert_eq!(
            config(&[("MASTERCLASS_API_KEY", "s3cret")]).api_key.as_deref(),
            Some("s3cret")
        );
    }

    #[test]
    fn prefix_is_normalized() {
        assert_eq!(config(&[("MASTERCLASS_API_PREFIX", "api/")]).api_prefix, "/api");
        assert_eq!(config(&[("MASTERCLASS_API_PREFIX", "/")]).api_prefix, "");
    }

    #[test]
    fn route_syntax_in_prefix_is_rejected() {
        for prefix in [":v1", "*rest", "{x}", "api/{x}", "a b", "api//v1"] {
            let cfg = config(&[("MASTERCLASS_API_PREFIX", prefix)]);
            assert!(cfg.validate().is_err(), "{prefix} should be rejected");
        }
    }

    #[test]
    fn plain_prefixes_are_accepted() {
        assert!(config(&[]).validate().is_ok());
        for prefix in ["/api/v1", "make-server_1.0", "/"] {
            let cfg = config(&[("MASTERCLASS_API_PREFIX", prefix)]);
            assert!(cfg.validate().is_ok(), "{prefix} should be accepted");
        }
    }

    #[test]
    fn debug_redacts_api_key() {
        let cfg = config(&[("MASTERCLASS_API_KEY", "s3cret")]);
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("[redacted]"));
    }
}
