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

/// Process-wide settings shared by the server and CLI binaries.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Directory that receives exported spreadsheets. Created by the binary at
    /// startup, never implicitly by the library crates.
    pub output_dir: PathBuf,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
    /// Disables TLS certificate verification for page fetches. Off unless
    /// explicitly requested; see `MAILSIFT_ACCEPT_INVALID_CERTS`.
    pub accept_invalid_certs: bool,
    pub max_concurrent_fetches: usize,
}
