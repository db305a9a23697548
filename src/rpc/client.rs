use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::error::{GatewayError, Result};
use crate::rpc::request::RpcRequest;

/// Delivers one JSON-RPC request to the node and hands back the raw body.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn send(&self, request: &RpcRequest) -> Result<Bytes>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(http_client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http_client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn send(&self, request: &RpcRequest) -> Result<Bytes> {
        debug!(
            url = %self.url,
            method = %request.method,
            params = ?request.params,
            "Sending node RPC request"
        );

        let response = self
            .http_client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionFailed(e.to_string()))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| GatewayError::ResponseUnreadable(e.to_string()))?;

        debug!(
            method = %request.method,
            body = %String::from_utf8_lossy(&body),
            "Received node RPC response"
        );
        Ok(body)
    }
}
