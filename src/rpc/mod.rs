use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::error::{GatewayError, Result};
use crate::models::{SyncProgress, SyncStatus, Transaction};

pub mod client;
pub mod request;
#[cfg(test)]
pub(crate) mod testing;

pub use client::{HttpTransport, RpcTransport};
pub use request::RpcRequest;

#[derive(Debug, Deserialize)]
struct RpcResponse<R> {
    result: Option<R>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    #[serde(default)]
    message: String,
}

/// Typed single-call reads against the node.
#[derive(Debug)]
pub struct NodeClient<T> {
    transport: Arc<T>,
}

impl<T> Clone for NodeClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: RpcTransport> NodeClient<T> {
    pub fn new(transport: T) -> Self {
        Self::from_shared(Arc::new(transport))
    }

    pub fn from_shared(transport: Arc<T>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn get_sync_status(&self) -> Result<SyncStatus> {
        let body = self.transport.send(&RpcRequest::syncing()).await?;

        match decode_result::<Value>(&body)? {
            Some(Value::Bool(false)) => Ok(SyncStatus::Synced),
            Some(progress @ Value::Object(_)) => {
                Ok(SyncStatus::Syncing(serde_json::from_value::<SyncProgress>(progress)?))
            }
            other => Err(GatewayError::MalformedResponse(format!(
                "unexpected eth_syncing result: {other:?}"
            ))),
        }
    }

    pub async fn get_transaction_count(&self, block_hash: &str) -> Result<usize> {
        let body = self
            .transport
            .send(&RpcRequest::transaction_count_by_hash(block_hash))
            .await?;

        let raw = decode_result::<String>(&body)?.unwrap_or_default();
        if raw.is_empty() {
            return Err(GatewayError::UnknownBlock);
        }

        let count = parse_count(&raw)?;
        debug!(block_hash, count, "Decoded block transaction count");
        Ok(count)
    }

    pub async fn get_transaction_at(&self, block_hash: &str, index: usize) -> Result<Transaction> {
        let body = self
            .transport
            .send(&RpcRequest::transaction_by_hash_and_index(block_hash, index))
            .await?;

        match decode_result::<Transaction>(&body)? {
            Some(tx) if !tx.is_empty() => Ok(tx),
            _ => Err(GatewayError::UnknownBlock),
        }
    }
}

fn decode_result<R: DeserializeOwned>(body: &[u8]) -> Result<Option<R>> {
    let response: RpcResponse<R> = serde_json::from_slice(body)?;

    if let Some(error) = response.error {
        return Err(GatewayError::NodeError {
            code: error.code,
            message: error.message,
        });
    }

    Ok(response.result)
}

/// Largest per-block transaction count the gateway will fan out over.
pub const MAX_BLOCK_TRANSACTIONS: usize = i16::MAX as usize;

/// Parses a transaction count quantity: `0x`-prefixed hex or plain decimal,
/// at most [`MAX_BLOCK_TRANSACTIONS`].
pub fn parse_count(raw: &str) -> Result<usize> {
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => raw.parse::<usize>(),
    };

    let count = parsed.map_err(|e| GatewayError::InvalidCount(format!("{raw:?}: {e}")))?;
    if count > MAX_BLOCK_TRANSACTIONS {
        return Err(GatewayError::InvalidCount(format!(
            "{raw:?}: exceeds {MAX_BLOCK_TRANSACTIONS} transactions"
        )));
    }
    Ok(count)
}
