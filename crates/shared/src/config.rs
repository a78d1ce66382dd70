//! Application configuration management.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage directory configuration.
    #[serde(default)]
    pub storage: StorageSettings,
    /// Externally advertised address used in download/view links.
    #[serde(default)]
    pub public: PublicConfig,
    /// Remote fetch configuration.
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Transport label advertised in generated links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Protocol {
    /// Plain HTTP.
    #[default]
    Http,
    /// HTTP over TLS.
    Https,
}

impl Protocol {
    /// Port used when neither the listen nor the advertised port is set.
    #[must_use]
    pub const fn default_port(self) -> u16 {
        match self {
            Self::Http => 3090,
            Self::Https => 3091,
        }
    }

    /// Lowercase scheme name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            other => Err(format!("unsupported protocol '{other}', expected http or https")),
        }
    }
}

impl TryFrom<String> for Protocol {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on. Falls back to the protocol's default port.
    #[serde(default)]
    pub port: Option<u16>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Storage directory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Directory holding every stored artifact.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
    /// Maximum accepted request body for uploads, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from("files")
}

fn default_max_upload_bytes() -> usize {
    100 * 1024 * 1024 // 100 MiB
}

/// Externally advertised address.
#[derive(Debug, Clone, Deserialize)]
pub struct PublicConfig {
    /// Scheme used in generated links.
    #[serde(default)]
    pub protocol: Protocol,
    /// Hostname used in generated links.
    #[serde(default = "default_external_host")]
    pub external_host: String,
    /// Advertised port. Falls back to the listen port.
    #[serde(default)]
    pub port: Option<u16>,
}

impl Default for PublicConfig {
    fn default() -> Self {
        Self {
            protocol: Protocol::default(),
            external_host: default_external_host(),
            port: None,
        }
    }
}

fn default_external_host() -> String {
    "hongyver.iptime.org".to_string()
}

/// Remote fetch configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Maximum number of redirects followed before giving up.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    /// Whole-request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_redirects: default_max_redirects(),
            timeout_secs: None,
        }
    }
}

fn default_max_redirects() -> usize {
    5
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// The bare `PROTOCOL` variable overrides `public.protocol`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("RELAY").separator("__"))
            .set_override_option("public.protocol", std::env::var("PROTOCOL").ok())?
            .build()?;

        config.try_deserialize()
    }

    /// Port the server listens on.
    #[must_use]
    pub fn listen_port(&self) -> u16 {
        self.server
            .port
            .unwrap_or_else(|| self.public.protocol.default_port())
    }

    /// Port advertised in download/view links.
    #[must_use]
    pub fn advertised_port(&self) -> u16 {
        self.public.port.unwrap_or_else(|| self.listen_port())
    }

    /// Base URL advertised to clients, e.g. `http://host:3090`.
    #[must_use]
    pub fn public_base_url(&self) -> String {
        format!(
            "{}://{}:{}",
            self.public.protocol,
            self.public.external_host,
            self.advertised_port()
        )
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
