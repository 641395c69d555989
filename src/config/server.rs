//! Server configuration settings

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Values forced on every request, regardless of profile or request body.
///
/// Zero (or `false`) leaves the resolved value untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForcedParams {
    pub threads: usize,
    pub context_size: usize,
    /// Only ever switches half precision on
    pub f16: bool,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to (host:port)
    #[serde(default = "default_address")]
    pub address: String,

    /// Directory holding model files, templates and profile files
    #[serde(default = "default_models_path")]
    pub models_path: PathBuf,

    /// Optional file holding a list of profiles, loaded before the scan
    #[serde(default)]
    pub config_file: Option<PathBuf>,

    /// Server-wide overrides
    #[serde(default)]
    pub forced: ForcedParams,

    /// Log request bodies and responses
    #[serde(default)]
    pub debug: bool,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,
}

fn default_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_models_path() -> PathBuf {
    PathBuf::from("./models")
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            models_path: default_models_path(),
            config_file: None,
            forced: ForcedParams::default(),
            debug: false,
            cors_enabled: true,
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> &str {
        &self.address
    }
}
