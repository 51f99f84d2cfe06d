//! Gateway configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default ceiling for upload request bodies (1 MiB)
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 1024 * 1024;

/// Default base of public object URLs
pub const DEFAULT_BASE_URL: &str = "https://resource.jweboy.asia";

/// Gateway server configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GatewayConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base of public object URLs
    pub base_url: String,
    /// Directory for the local object store
    pub data_dir: PathBuf,
    /// Use in-memory storage (for testing/development)
    pub use_memory_store: bool,
    /// Maximum upload request body size (bytes)
    pub max_upload_size: usize,
    /// Enable CORS
    pub cors_enabled: bool,
    /// CORS allowed origins
    pub cors_origins: Vec<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8787,
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: PathBuf::from("./data"),
            use_memory_store: false,
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
            cors_enabled: true,
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl GatewayConfig {
    /// Load a TOML file; keys it omits keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(config::File::from(path.as_ref()).format(config::FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Get the bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether any origin is allowed
    pub fn cors_allows_any(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}
