use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::models::{SyncStatus, TransactionBatch};
use crate::rpc::{NodeClient, RpcTransport};

pub mod buffer;
pub mod engine;
pub mod fanout;

pub use engine::EthService;
pub use fanout::{FetchConcurrency, TransactionAggregator};

/// Gateway core: sync status straight from the node, block transactions
/// through the fan-out aggregator.
pub struct EthGateway<T> {
    client: NodeClient<T>,
    aggregator: TransactionAggregator<T>,
}

impl<T: RpcTransport + 'static> EthGateway<T> {
    pub fn new(client: NodeClient<T>, concurrency: FetchConcurrency) -> Self {
        let aggregator = TransactionAggregator::new(client.clone(), concurrency);
        Self { client, aggregator }
    }

    pub fn client(&self) -> &NodeClient<T> {
        &self.client
    }
}

#[async_trait]
impl<T: RpcTransport + 'static> EthService for EthGateway<T> {
    async fn sync_status(&self) -> Result<SyncStatus> {
        let status = self.client.get_sync_status().await?;
        info!(?status, "Read node sync status");
        Ok(status)
    }

    async fn block_transactions(&self, block_hash: &str) -> Result<TransactionBatch> {
        let batch = self.aggregator.fetch_block_transactions(block_hash).await?;
        info!(block_hash, count = batch.len(), "Assembled transactions for block");
        Ok(batch)
    }
}
