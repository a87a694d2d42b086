//! Runtime configuration.
//!
//! Configuration is read from a TOML file. Every field has a default, so an
//! empty file (or no file at all) yields a working setup that points at the
//! upstream GLIDE, ioredis, node-redis and Valkey documentation sources.
//!
//! # Examples
//!
//! ```
//! use glide_migrate_core::MigrationConfig;
//!
//! let config = MigrationConfig::from_toml_str("http_timeout_secs = 10").unwrap();
//! assert_eq!(config.http_timeout_secs, 10);
//! assert!(!config.glide_source_urls.is_empty());
//! assert!(config.validate().is_ok());
//! ```

use crate::{ClientKind, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming a config file to load.
pub const CONFIG_ENV_VAR: &str = "GLIDE_MIGRATE_CONFIG";

/// Environment variable overriding [`MigrationConfig::output_dir`].
pub const OUTPUT_DIR_ENV_VAR: &str = "GLIDE_MIGRATE_OUTPUT_DIR";

const GLIDE_RAW_BASE: &str = "https://raw.githubusercontent.com/valkey-io/valkey-glide/main/node";

/// Configuration for fetch sources and artifact locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Directory that receives catalog and validation artifacts.
    pub output_dir: PathBuf,

    /// Documentation page listing command names in code formatting.
    pub commands_doc_url: String,

    /// Raw GLIDE client sources scanned for the method surface.
    pub glide_source_urls: Vec<String>,

    /// ioredis command declarations.
    pub ioredis_declaration_url: String,

    /// node-redis client declarations.
    pub node_redis_declaration_url: String,

    /// GLIDE client declarations.
    pub glide_declaration_url: String,

    /// Per-request timeout for remote fetches.
    pub http_timeout_secs: u64,

    /// User agent sent with remote fetches.
    pub user_agent: String,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            commands_doc_url: "https://valkey.io/commands/".to_string(),
            glide_source_urls: vec![
                format!("{GLIDE_RAW_BASE}/src/BaseClient.ts"),
                format!("{GLIDE_RAW_BASE}/src/GlideClient.ts"),
                format!("{GLIDE_RAW_BASE}/src/GlideClusterClient.ts"),
            ],
            ioredis_declaration_url:
                "https://unpkg.com/ioredis@5/built/utils/RedisCommander.d.ts".to_string(),
            node_redis_declaration_url:
                "https://unpkg.com/@redis/client@1/dist/lib/client/index.d.ts".to_string(),
            glide_declaration_url: "https://unpkg.com/@valkey/valkey-glide/build-ts/BaseClient.d.ts"
                .to_string(),
            http_timeout_secs: 30,
            user_agent: format!("glide-migrate/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl MigrationConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the TOML is malformed or a field has
    /// the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::ConfigError {
            message: format!("Failed to parse configuration: {e}"),
        })
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::ConfigError {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&text)
    }

    /// Resolves the effective configuration.
    ///
    /// Uses `explicit` if given, otherwise the file named by
    /// [`CONFIG_ENV_VAR`], otherwise defaults. [`OUTPUT_DIR_ENV_VAR`] then
    /// overrides the output directory. The result is validated.
    ///
    /// # Errors
    ///
    /// Returns an error if a named file cannot be loaded or the result fails
    /// [`validate`](Self::validate).
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match std::env::var_os(CONFIG_ENV_VAR) {
                Some(path) => Self::from_file(PathBuf::from(path))?,
                None => Self::default(),
            },
        };

        if let Some(dir) = std::env::var_os(OUTPUT_DIR_ENV_VAR) {
            config.output_dir = PathBuf::from(dir);
        }

        config.validate()?;
        tracing::debug!(output_dir = %config.output_dir.display(), "configuration loaded");
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if:
    /// - The HTTP timeout is zero
    /// - The output directory is empty
    /// - No GLIDE source URL is configured, or any of them is blank
    pub fn validate(&self) -> Result<()> {
        if self.http_timeout_secs == 0 {
            return Err(Error::ConfigError {
                message: "http_timeout_secs must be greater than zero".to_string(),
            });
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::ConfigError {
                message: "output_dir cannot be empty".to_string(),
            });
        }

        if self.glide_source_urls.is_empty() {
            return Err(Error::ConfigError {
                message: "at least one glide_source_urls entry is required".to_string(),
            });
        }

        if let Some(index) = self.glide_source_urls.iter().position(|u| u.trim().is_empty()) {
            return Err(Error::ConfigError {
                message: format!("glide_source_urls[{index}] cannot be empty"),
            });
        }

        Ok(())
    }

    /// Returns the declaration URL configured for `client`.
    #[must_use]
    pub fn declaration_url(&self, client: ClientKind) -> &str {
        match client {
            ClientKind::Ioredis => &self.ioredis_declaration_url,
            ClientKind::NodeRedis => &self.node_redis_declaration_url,
            ClientKind::Glide => &self.glide_declaration_url,
        }
    }

    /// Returns the fetch timeout as a [`Duration`].
    #[must_use]
    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn default_output_dir() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from(".glide-migrate"),
        |dir| dir.join("glide-migrate"),
    )
}
