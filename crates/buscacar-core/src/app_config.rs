use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Delimited-text vehicle export parsed once at startup.
    pub feed_path: PathBuf,
    /// Brand/model reference list (JSON or YAML).
    pub brands_path: PathBuf,
    pub page_size: usize,
    pub fipe_base_url: String,
    pub fipe_timeout_secs: u64,
    pub fipe_cache_ttl_secs: u64,
    /// Number of upstream brands whose models are fetched for the cached listing.
    pub fipe_brand_limit: usize,
    pub fipe_max_retries: u32,
}
