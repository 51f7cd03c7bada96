//! Configuration management for the PDF Render Server

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Token used when `API_TOKEN` is not set. Only suitable for local use.
pub const DEFAULT_API_TOKEN: &str = "changeme";

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub browser: BrowserConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub api_token: ApiToken,
}

#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Explicit Chrome/Chromium executable; auto-detected when unset
    pub chrome_path: Option<PathBuf>,
    /// Launch with `--no-sandbox` (needed when running as root in containers)
    pub no_sandbox: bool,
    /// How long the page must be free of in-flight requests before export
    pub network_idle: Duration,
}

/// The expected bearer secret.
///
/// `Debug` is redacted so the secret never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the insecure built-in default is in effect
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_API_TOKEN
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            auth: AuthConfig {
                api_token: ApiToken::new(DEFAULT_API_TOKEN),
            },
            browser: BrowserConfig {
                chrome_path: None,
                no_sandbox: false,
                network_idle: Duration::from_millis(500),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                var: "SERVER_PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => defaults.server.port,
        };

        let no_sandbox = match lookup("BROWSER_NO_SANDBOX") {
            Some(raw) => parse_bool("BROWSER_NO_SANDBOX", &raw)?,
            None => defaults.browser.no_sandbox,
        };

        let network_idle = match lookup("NETWORK_IDLE_MS") {
            Some(raw) => {
                let ms = raw.trim().parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                    var: "NETWORK_IDLE_MS",
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
                Duration::from_millis(ms)
            }
            None => defaults.browser.network_idle,
        };

        Ok(Config {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or(defaults.server.host),
                port,
            },
            auth: AuthConfig {
                api_token: lookup("API_TOKEN")
                    .map(ApiToken::new)
                    .unwrap_or(defaults.auth.api_token),
            },
            browser: BrowserConfig {
                chrome_path: lookup("CHROME_PATH")
                    .filter(|p| !p.trim().is_empty())
                    .map(PathBuf::from),
                no_sandbox,
                network_idle,
            },
        })
    }
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: raw.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}
