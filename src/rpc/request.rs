use serde::{Deserialize, Serialize};

pub const JSONRPC_VERSION: &str = "2.0";
pub const REQUEST_ID: u32 = 1;

pub const METHOD_SYNCING: &str = "eth_syncing";
pub const METHOD_TX_COUNT_BY_HASH: &str = "eth_getBlockTransactionCountByHash";
pub const METHOD_TX_BY_HASH_AND_INDEX: &str = "eth_getTransactionByBlockHashAndIndex";

/// JSON-RPC 2.0 request sent to the node. Params are always strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Vec<String>,
    pub id: u32,
}

impl RpcRequest {
    fn new(method: &str, params: Vec<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.to_string(),
            params,
            id: REQUEST_ID,
        }
    }

    pub fn syncing() -> Self {
        Self::new(METHOD_SYNCING, Vec::new())
    }

    pub fn transaction_count_by_hash(block_hash: &str) -> Self {
        Self::new(METHOD_TX_COUNT_BY_HASH, vec![block_hash.to_string()])
    }

    pub fn transaction_by_hash_and_index(block_hash: &str, index: usize) -> Self {
        Self::new(
            METHOD_TX_BY_HASH_AND_INDEX,
            vec![block_hash.to_string(), encode_index(index)],
        )
    }
}

/// Quantity encoding used by the node: `0x`-prefixed lowercase hex, no padding.
pub fn encode_index(index: usize) -> String {
    format!("{index:#x}")
}
