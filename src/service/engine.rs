use async_trait::async_trait;

use crate::error::Result;
use crate::models::{SyncStatus, TransactionBatch};

/// What the HTTP and JSON-RPC adapters need from the gateway core.
#[async_trait]
pub trait EthService: Send + Sync {
    async fn sync_status(&self) -> Result<SyncStatus>;
    async fn block_transactions(&self, block_hash: &str) -> Result<TransactionBatch>;
}
