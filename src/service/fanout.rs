use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::error::{GatewayError, Result};
use crate::models::{Transaction, TransactionBatch};
use crate::rpc::{NodeClient, RpcTransport};
use crate::service::buffer::IndexedSlots;

/// How many per-index fetches may hit the node at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchConcurrency {
    /// Every fetch runs at once, one task per transaction.
    #[default]
    Unbounded,
    Limited(NonZeroUsize),
}

impl FetchConcurrency {
    /// `0` means unbounded.
    pub fn from_limit(limit: usize) -> Self {
        NonZeroUsize::new(limit).map_or(Self::Unbounded, Self::Limited)
    }
}

/// Assembles all transactions of a block: one count call, then one
/// concurrent fetch per index, then a join over every fetch.
///
/// The task group and the permit pool live only for one call, so concurrent
/// aggregations never share state. Dropping the returned future aborts every
/// task still in flight.
#[derive(Debug)]
pub struct TransactionAggregator<T> {
    client: NodeClient<T>,
    concurrency: FetchConcurrency,
}

impl<T> Clone for TransactionAggregator<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            concurrency: self.concurrency,
        }
    }
}

impl<T: RpcTransport + 'static> TransactionAggregator<T> {
    pub fn new(client: NodeClient<T>, concurrency: FetchConcurrency) -> Self {
        Self { client, concurrency }
    }

    pub async fn fetch_block_transactions(&self, block_hash: &str) -> Result<TransactionBatch> {
        let count = self.client.get_transaction_count(block_hash).await?;

        if count == 0 {
            debug!(block_hash, "Block has no transactions");
            return Ok(TransactionBatch::new(block_hash, Vec::new()));
        }

        info!(block_hash, count, concurrency = ?self.concurrency, "Fetching block transactions");

        let shared_hash: Arc<str> = Arc::from(block_hash);
        let limiter = match self.concurrency {
            FetchConcurrency::Limited(limit) => Some(Arc::new(Semaphore::new(limit.get()))),
            FetchConcurrency::Unbounded => None,
        };

        let mut tasks = JoinSet::new();
        let mut task_indices = HashMap::new();

        for index in 0..count {
            let client = self.client.clone();
            let block_hash = Arc::clone(&shared_hash);
            let limiter = limiter.clone();

            let handle = tasks.spawn(async move {
                let outcome = fetch_one(client, &block_hash, index, limiter).await;
                (index, outcome)
            });
            task_indices.insert(handle.id(), index);
        }

        let mut slots = IndexedSlots::new(count);

        while let Some(joined) = tasks.join_next().await {
            let (index, outcome) = match joined {
                Ok(result) => result,
                Err(join_error) => {
                    let Some(&index) = task_indices.get(&join_error.id()) else {
                        error!(block_hash, "Joined a task that was never spawned: {}", join_error);
                        continue;
                    };
                    (index, Err(GatewayError::FetchAborted(join_error.to_string())))
                }
            };

            if let Err(e) = &outcome {
                error!(block_hash, index, "Failed to fetch transaction: {}", e);
            }

            if !slots.insert(index, outcome) {
                error!(block_hash, index, "Discarding duplicate fetch outcome");
            }
        }

        let transactions = slots.into_transactions()?;
        debug!(block_hash, count = transactions.len(), "Assembled block transactions");

        Ok(TransactionBatch::new(block_hash, transactions))
    }
}

async fn fetch_one<T: RpcTransport>(
    client: NodeClient<T>,
    block_hash: &str,
    index: usize,
    limiter: Option<Arc<Semaphore>>,
) -> Result<Transaction> {
    let _permit = match limiter {
        Some(limiter) => Some(
            limiter
                .acquire_owned()
                .await
                .map_err(|e| GatewayError::FetchAborted(e.to_string()))?,
        ),
        None => None,
    };

    client.get_transaction_at(block_hash, index).await
}
