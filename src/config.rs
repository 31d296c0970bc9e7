use clap::{Parser, ValueEnum};
use std::time::Duration;

// Log output format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "gist-gateway")]
#[command(about = "Caching proxy for a GitHub user's public gists")]
pub struct Args {
    // Address to bind the server on
    #[arg(long, env = "GISTS_HOST", default_value = "0.0.0.0")]
    pub host: String,

    // Port to run the server on
    #[arg(short, long, env = "GISTS_PORT", default_value_t = 8080)]
    pub port: u16,

    // GitHub REST API base url
    #[arg(short, long, env = "GISTS_GITHUB_URL", default_value = crate::upstream::GITHUB_API_BASE)]
    pub github_url: String,

    // Max distinct (username, per_page, page) results kept in memory
    #[arg(short, long, env = "GISTS_CACHE_CAPACITY", default_value_t = crate::cache::DEFAULT_CAPACITY)]
    pub cache_capacity: usize,

    // Upstream request timeout in seconds
    #[arg(short, long, env = "GISTS_TIMEOUT_SECS", default_value_t = crate::upstream::DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    #[arg(long, env = "GISTS_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Args {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
