use std::path::PathBuf;
use std::sync::Arc;

/// Default source file, resolved against the working directory
pub const DEFAULT_SOURCE: &str = "hfmea2.csv";

/// Settings for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HFMEA source file read on every request
    pub source_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE),
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Shared, read-only state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub source_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(source_path: PathBuf) -> Self {
        Self {
            source_path: Arc::new(source_path),
        }
    }
}
