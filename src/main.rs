use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use eth_tx_gateway::config::Config;
use eth_tx_gateway::rpc::{HttpTransport, NodeClient};
use eth_tx_gateway::server;
use eth_tx_gateway::service::EthGateway;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env();
    info!(
        node_rpc_url = %config.node_rpc_url,
        concurrency = ?config.fetch_concurrency(),
        "Starting eth-tx-gateway"
    );

    let client = NodeClient::new(HttpTransport::new(config.node_rpc_url.clone()));
    let gateway = EthGateway::new(client, config.fetch_concurrency());

    server::serve(&config, Arc::new(gateway)).await
}
