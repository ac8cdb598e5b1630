//! Configuration management for the extraction server

use std::env;

/// Default listen port
pub const DEFAULT_PORT: u16 = 11037;

/// Default multipart body limit (50 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub phone: PhoneConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body for `/extract`
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct PhoneConfig {
    /// ISO 3166 alpha-2 region used for numbers written without `+<cc>`.
    ///
    /// Unset by default: such numbers are rejected instead of guessed.
    pub default_region: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: DEFAULT_PORT,
                max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            },
            phone: PhoneConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("SERVER_PORT", DEFAULT_PORT),
                max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
            },
            phone: PhoneConfig {
                default_region: env::var("DEFAULT_PHONE_REGION")
                    .ok()
                    .map(|r| r.trim().to_uppercase())
                    .filter(|r| !r.is_empty()),
            },
        }
    }
}

/// Read and parse an environment variable, falling back to `default` when it
/// is missing or malformed.
fn parse_var<T: std::str::FromStr + std::fmt::Display>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value for {}: {:?}, using {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}
