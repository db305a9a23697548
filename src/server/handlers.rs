//! HTTP and JSON-RPC handlers in front of the gateway core.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::GatewayError;
use crate::models::{SyncStatus, TransactionBatch};
use crate::service::EthService;

pub type SharedService = Arc<dyn EthService>;

pub const METHOD_GET_BLOCK_TRANSACTIONS: &str = "gateway_getBlockTransactions";
pub const METHOD_GET_SYNC_STATUS: &str = "gateway_getSyncStatus";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const UPSTREAM_ERROR: i64 = -32000;
pub const UNKNOWN_BLOCK: i64 = -32001;

// ═══════════════════════════════════════════════════════════════════════════
// HTTP
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Failure body: `{"status":"error","errorMessage":"..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    #[serde(rename = "errorMessage")]
    pub error_message: String,
}

/// A core error on its way out through HTTP.
#[derive(Debug)]
pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(e: GatewayError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            GatewayError::UnknownBlock => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_GATEWAY,
        };
        warn!(status = status.as_u16(), "Request failed: {}", self.0);

        let body = ErrorResponse {
            status: "error".to_string(),
            error_message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handler for `GET /health`.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Handler for `GET /getBlockHashTransactions/{blockHash}`.
pub async fn block_transactions_handler(
    State(service): State<SharedService>,
    Path(block_hash): Path<String>,
) -> Result<Json<TransactionBatch>, ApiError> {
    info!(block_hash = %block_hash, "Received block transactions request");

    let batch = service.block_transactions(&block_hash).await?;
    debug!(block_hash = %block_hash, count = batch.len(), "Sending block transactions response");

    Ok(Json(batch))
}

/// Handler for `GET /getSyncStatus`.
pub async fn sync_status_handler(
    State(service): State<SharedService>,
) -> Result<Json<SyncStatus>, ApiError> {
    info!("Received sync status request");

    let status = service.sync_status().await?;
    debug!(?status, "Sending sync status response");

    Ok(Json(status))
}

// ═══════════════════════════════════════════════════════════════════════════
// JSON-RPC
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Value,
    #[serde(default)]
    pub id: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

impl JsonRpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
            id,
        }
    }
}

impl From<&GatewayError> for JsonRpcError {
    fn from(e: &GatewayError) -> Self {
        let code = match e {
            GatewayError::UnknownBlock => UNKNOWN_BLOCK,
            _ => UPSTREAM_ERROR,
        };
        Self {
            code,
            message: e.to_string(),
        }
    }
}

/// Handler for `POST /rpc`.
pub async fn rpc_handler(
    State(service): State<SharedService>,
    body: Bytes,
) -> Json<JsonRpcResponse> {
    let request: JsonRpcRequest = match serde_json::from_slice::<Value>(&body) {
        Err(e) => {
            return Json(JsonRpcResponse::failure(
                Value::Null,
                PARSE_ERROR,
                format!("Parse error: {e}"),
            ))
        }
        Ok(value) => match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return Json(JsonRpcResponse::failure(
                    Value::Null,
                    INVALID_REQUEST,
                    format!("Invalid request: {e}"),
                ))
            }
        },
    };

    info!(method = %request.method, "Received JSON-RPC request");
    Json(dispatch(service.as_ref(), request).await)
}

async fn dispatch(service: &dyn EthService, request: JsonRpcRequest) -> JsonRpcResponse {
    let JsonRpcRequest { method, params, id, .. } = request;

    let outcome = match method.as_str() {
        METHOD_GET_BLOCK_TRANSACTIONS => {
            let params = match positional(params) {
                Ok(params) => params,
                Err(message) => return JsonRpcResponse::failure(id, INVALID_PARAMS, message),
            };
            let Some(block_hash) = params.first().and_then(Value::as_str) else {
                warn!(?params, "Rejecting block transactions call without a block hash");
                return JsonRpcResponse::failure(id, INVALID_PARAMS, "Expected params: [blockHash]");
            };
            service
                .block_transactions(block_hash)
                .await
                .and_then(|batch| Ok(serde_json::to_value(batch)?))
        }
        METHOD_GET_SYNC_STATUS => {
            if let Err(message) = positional(params) {
                return JsonRpcResponse::failure(id, INVALID_PARAMS, message);
            }
            service
                .sync_status()
                .await
                .and_then(|status| Ok(serde_json::to_value(status)?))
        }
        _ => {
            warn!(method = %method, "Unknown JSON-RPC method");
            let message = format!("Method not found: {method}");
            return JsonRpcResponse::failure(id, METHOD_NOT_FOUND, message);
        }
    };

    match outcome {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err(e) => {
            warn!(method = %method, "JSON-RPC call failed: {}", e);
            let error = JsonRpcError::from(&e);
            JsonRpcResponse::failure(id, error.code, error.message)
        }
    }
}

/// Positional params only; a missing `params` member counts as empty.
fn positional(params: Value) -> Result<Vec<Value>, String> {
    match params {
        Value::Array(params) => Ok(params),
        Value::Null => Ok(Vec::new()),
        other => Err(format!("Expected params to be an array, got {other}")),
    }
}
