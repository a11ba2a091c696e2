//! Application configuration from environment variables

use std::path::PathBuf;
use std::time::Duration;

/// Client configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the merchant REST API (including the `/api` prefix)
    pub api_base_url: String,
    /// Solana RPC endpoint for the local wallet provider
    pub rpc_url: String,
    /// Directory for persistent client state (session file, keypairs)
    pub data_dir: PathBuf,
    /// Timeout for payment creation before falling back to local QR
    pub payment_timeout: Duration,
    /// Timeout for a single transaction-history page fetch
    pub feed_timeout: Duration,
    /// Transactions requested per history page
    pub feed_page_size: u32,
    /// Log directory (for rotation)
    pub log_dir: PathBuf,
    /// Log level filter (e.g., "terminal=debug,info")
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://zapzap666.xyz/api".to_string(),
            rpc_url: "https://api.devnet.solana.com".to_string(),
            data_dir: default_data_dir(),
            payment_timeout: Duration::from_secs(10),
            feed_timeout: Duration::from_secs(15),
            feed_page_size: 10,
            log_dir: PathBuf::from("logs"),
            log_level: "terminal=info,warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_base_url: std::env::var("MERCHANT_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            rpc_url: std::env::var("SOLANA_RPC_URL").unwrap_or(defaults.rpc_url),
            data_dir: std::env::var("CRYPTONOW_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            payment_timeout: env_secs("PAYMENT_TIMEOUT_SECS", defaults.payment_timeout),
            feed_timeout: env_secs("FEED_TIMEOUT_SECS", defaults.feed_timeout),
            feed_page_size: std::env::var("FEED_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(defaults.feed_page_size),
            log_dir: std::env::var("TERMINAL_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }
}

fn env_secs(name: &str, default: Duration) -> Duration {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

fn default_data_dir() -> PathBuf {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(".cryptonow"))
        .unwrap_or_else(|_| PathBuf::from(".cryptonow"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = AppConfig::default();
        assert!(config.api_base_url.ends_with("/api"));
        assert_eq!(config.feed_page_size, 10);
        assert_eq!(config.payment_timeout, Duration::from_secs(10));
        assert_eq!(config.feed_timeout, Duration::from_secs(15));
    }
}
