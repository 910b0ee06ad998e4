use std::path::PathBuf;

use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};
use crate::settings::normalize_slug;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | database file and logs |
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | ENVIRONMENT | development | development / production |
/// | DEFAULT_COMPANY_SLUG | restaurant | tenant of the single-tenant guest routes |
/// | PUBLIC_RATE_LIMIT_MAX | 5 | guest creations per window |
/// | PUBLIC_RATE_LIMIT_WINDOW_SECS | 60 | window length |
/// | RATE_LIMIT_CLEANUP_SECS | 300 | sweep interval for expired windows |
/// | LOG_LEVEL | info | tracing level |
/// | LOG_DIR | (unset) | enables daily log files |
///
/// JWT settings are read by [`JwtConfig::from_env`].
///
/// ```ignore
/// WORK_DIR=/srv/table-signal HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub http_port: u16,
    /// development | production
    pub environment: String,
    pub default_company_slug: String,
    pub public_rate_limit_max: u32,
    pub public_rate_limit_window_secs: u64,
    pub rate_limit_cleanup_secs: u64,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub jwt: JwtConfig,
}

impl Config {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: env_parse("HTTP_PORT", 3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            default_company_slug: std::env::var("DEFAULT_COMPANY_SLUG")
                .unwrap_or_else(|_| shared::models::DEFAULT_COMPANY_SLUG.into()),
            public_rate_limit_max: env_parse("PUBLIC_RATE_LIMIT_MAX", 5),
            public_rate_limit_window_secs: env_parse("PUBLIC_RATE_LIMIT_WINDOW_SECS", 60),
            rate_limit_cleanup_secs: env_parse("RATE_LIMIT_CLEANUP_SECS", 300),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            jwt: JwtConfig::default(),
        }
    }

    /// Override the work dir and port, keeping everything else from the environment
    ///
    /// Mostly used by tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("table-signal.redb")
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.public_rate_limit_max == 0 {
            return Err(ServerError::Config(
                "PUBLIC_RATE_LIMIT_MAX must be at least 1".into(),
            ));
        }
        if self.public_rate_limit_window_secs == 0 {
            return Err(ServerError::Config(
                "PUBLIC_RATE_LIMIT_WINDOW_SECS must be at least 1".into(),
            ));
        }
        match normalize_slug(&self.default_company_slug) {
            Ok(slug) if slug == self.default_company_slug => Ok(()),
            _ => Err(ServerError::Config(format!(
                "DEFAULT_COMPANY_SLUG is not a valid slug: {:?}",
                self.default_company_slug
            ))),
        }
    }

    pub fn ensure_work_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
