//! Configuration module
//!
//! Loaded from a TOML file (`~/.config/offset-pagination/config.toml` by
//! default, overridable with `PAGINATION_CONFIG`). Every section and field is
//! optional; missing values take the defaults below.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::application::pagination::{
    Limit, Offset, PaginationContext, DEFAULT_LIMIT, DEFAULT_OFFSET,
};
use crate::domain::ContextError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error("invalid pagination settings: {0}")]
    Pagination(#[from] ContextError),
}

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    #[validate(nested)]
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[validate(nested)]
    pub pagination: PaginationSettings,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address
    #[validate(length(min = 1, message = "host is required"))]
    pub host: String,
    /// Server port
    pub port: u16,
    /// Externally visible base URL used for pagination links, e.g. when
    /// running behind a reverse proxy. `None` uses the request `Host` header.
    #[validate(url(message = "public_url must be an absolute URL"))]
    pub public_url: Option<String>,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            public_url: None,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Service-wide pagination defaults, used by routes that do not declare
/// their own parameters.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PaginationSettings {
    #[validate(length(min = 1, message = "offset_param must not be empty"))]
    pub offset_param: String,
    #[validate(length(min = 1, message = "limit_param must not be empty"))]
    pub limit_param: String,
    pub default_offset: u64,
    #[validate(range(min = 1, max = 100, message = "default_limit must be between 1 and 100"))]
    pub default_limit: u32,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            offset_param: "offset".to_string(),
            limit_param: "limit".to_string(),
            default_offset: DEFAULT_OFFSET,
            default_limit: DEFAULT_LIMIT,
        }
    }
}

impl PaginationSettings {
    pub fn context(&self) -> Result<PaginationContext, ContextError> {
        let default_offset =
            Offset::try_new(self.default_offset).map_err(|source| ContextError::InvalidDefault {
                name: self.offset_param.clone(),
                source: source.for_field(&self.offset_param),
            })?;
        let default_limit =
            Limit::try_new(self.default_limit).map_err(|source| ContextError::InvalidDefault {
                name: self.limit_param.clone(),
                source: source.for_field(&self.limit_param),
            })?;

        PaginationContext::new(
            self.offset_param.clone(),
            self.limit_param.clone(),
            default_offset,
            default_limit,
        )
    }
}

impl AppConfig {
    /// Reads and validates the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        config.pagination.context()?;
        Ok(config)
    }
}

/// `<config dir>/offset-pagination/config.toml`, or `./config.toml` when the
/// platform has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("offset-pagination").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::domain::ParameterKind;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.address(), "0.0.0.0:8080");
        assert_eq!(config.pagination.context().unwrap(), PaginationContext::default());
    }

    #[test]
    fn loads_partial_file() {
        let file = write_config(
            r#"
            [server]
            port = 9100
            public_url = "https://api.example.com"

            [pagination]
            limit_param = "per_page"
            default_limit = 50
            "#,
        );

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.logging.level, "info");

        let ctx = config.pagination.context().unwrap();
        assert_eq!(ctx.offset_param(), "offset");
        assert_eq!(ctx.limit_param(), "per_page");
        assert_eq!(ctx.default_limit().get(), 50);
    }

    #[test]
    fn rejects_out_of_range_default_limit() {
        let file = write_config("[pagination]\ndefault_limit = 0\n");
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_shared_parameter_names() {
        let file = write_config("[pagination]\noffset_param = \"limit\"\n");
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::Pagination(ContextError::SharedName(_)))
        ));
    }

    #[test]
    fn rejects_default_offset_beyond_request_range() {
        let settings = PaginationSettings {
            default_offset: u64::MAX,
            ..PaginationSettings::default()
        };
        match settings.context() {
            Err(ContextError::InvalidDefault { name, source }) => {
                assert_eq!(name, "offset");
                assert_eq!(source.kind(), ParameterKind::Offset);
            }
            other => panic!("expected InvalidDefault, got {other:?}"),
        }
    }

    #[test]
    fn rejects_relative_public_url() {
        let file = write_config("[server]\npublic_url = \"api.example.com\"\n");
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn reports_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/offset-pagination.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn reports_malformed_file() {
        let file = write_config("[server\nport = ");
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn default_path_ends_with_crate_dir() {
        assert!(default_config_path().ends_with("config.toml"));
    }
}
