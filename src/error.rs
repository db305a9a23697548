//! Error types for the gateway core.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Failed to connect to node: {0}")]
    ConnectionFailed(String),

    #[error("Failed to read node response: {0}")]
    ResponseUnreadable(String),

    #[error("Malformed node response: {0}")]
    MalformedResponse(String),

    #[error("Node returned a null result: unknown block or transaction index")]
    UnknownBlock,

    #[error("Invalid transaction count: {0}")]
    InvalidCount(String),

    #[error("Node error {code}: {message}")]
    NodeError { code: i64, message: String },

    #[error("Transaction fetch task aborted: {0}")]
    FetchAborted(String),
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedResponse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
