use std::env;

use crate::service::FetchConcurrency;

#[derive(Debug, Clone)]
pub struct Config {
    pub node_rpc_url: String,
    pub listen_addr: String,
    pub max_concurrent_fetches: usize,
    pub http_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            node_rpc_url: "http://localhost:8545".to_string(),
            listen_addr: "127.0.0.1:8000".to_string(),
            max_concurrent_fetches: 64,
            http_timeout_secs: 15,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let node_rpc_url = lookup("NODE_RPC_URL").unwrap_or(defaults.node_rpc_url);

        let listen_addr = lookup("LISTEN_ADDR").unwrap_or(defaults.listen_addr);

        let max_concurrent_fetches = lookup("MAX_CONCURRENT_FETCHES")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.max_concurrent_fetches);

        let http_timeout_secs = lookup("HTTP_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults.http_timeout_secs);

        Self {
            node_rpc_url,
            listen_addr,
            max_concurrent_fetches,
            http_timeout_secs,
        }
    }

    /// `0` disables the bound and fans out one fetch per transaction at once.
    pub fn fetch_concurrency(&self) -> FetchConcurrency {
        FetchConcurrency::from_limit(self.max_concurrent_fetches)
    }
}
