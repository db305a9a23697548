//! In-memory node used by the unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::{json, Value};

use crate::error::{GatewayError, Result};
use crate::rpc::client::RpcTransport;
use crate::rpc::request::{RpcRequest, METHOD_TX_BY_HASH_AND_INDEX, METHOD_TX_COUNT_BY_HASH};

type Handler = dyn Fn(&RpcRequest) -> Result<Bytes> + Send + Sync;
type DelayFn = dyn Fn(&RpcRequest) -> Duration + Send + Sync;

/// Answers every request through a closure and records what it was asked.
pub(crate) struct ScriptedTransport {
    handler: Box<Handler>,
    delay: Option<Box<DelayFn>>,
    calls: Mutex<Vec<RpcRequest>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new(handler: impl Fn(&RpcRequest) -> Result<Bytes> + Send + Sync + 'static) -> Self {
        Self {
            handler: Box::new(handler),
            delay: None,
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(
        mut self,
        delay: impl Fn(&RpcRequest) -> Duration + Send + Sync + 'static,
    ) -> Self {
        self.delay = Some(Box::new(delay));
        self
    }

    pub fn calls(&self) -> Vec<RpcRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|r| r.method == method).count()
    }

    pub fn fetch_calls(&self) -> usize {
        self.calls_to(METHOD_TX_BY_HASH_AND_INDEX)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RpcTransport for ScriptedTransport {
    async fn send(&self, request: &RpcRequest) -> Result<Bytes> {
        self.calls.lock().unwrap().push(request.clone());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = &self.delay {
            tokio::time::sleep(delay(request)).await;
        }

        let response = (self.handler)(request);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        response
    }
}

pub(crate) fn rpc_result(result: Value) -> Result<Bytes> {
    Ok(Bytes::from(json!({"jsonrpc": "2.0", "id": 1, "result": result}).to_string()))
}

pub(crate) fn rpc_error(code: i64, message: &str) -> Result<Bytes> {
    Ok(Bytes::from(
        json!({"jsonrpc": "2.0", "id": 1, "error": {"code": code, "message": message}}).to_string(),
    ))
}

/// Index parameter of an `eth_getTransactionByBlockHashAndIndex` request.
pub(crate) fn index_param(request: &RpcRequest) -> Option<usize> {
    let raw = request.params.get(1)?;
    usize::from_str_radix(raw.trim_start_matches("0x"), 16).ok()
}

pub(crate) fn sample_transaction(block_hash: &str, index: usize) -> Value {
    json!({
        "blockHash": block_hash,
        "blockNumber": "0x10",
        "from": format!("0x{:040x}", index + 1),
        "gas": "0x5208",
        "gasPrice": "0x3b9aca00",
        "hash": format!("0x{:064x}", index + 0xaa),
        "input": "0x",
        "nonce": format!("{index:#x}"),
        "to": format!("0x{:040x}", index + 0x100),
        "transactionIndex": format!("{index:#x}"),
        "value": "0xde0b6b3a7640000",
        "v": "0x25",
        "r": "0x1",
        "s": "0x2"
    })
}

/// A node holding one block with `count` transactions. Indices listed in
/// `failing` answer with a connection failure carrying the index.
pub(crate) fn block_node(
    count: usize,
    failing: &'static [usize],
) -> impl Fn(&RpcRequest) -> Result<Bytes> + Send + Sync + 'static {
    move |request| match request.method.as_str() {
        METHOD_TX_COUNT_BY_HASH => rpc_result(json!(format!("{count:#x}"))),
        METHOD_TX_BY_HASH_AND_INDEX => {
            let index = index_param(request).expect("index param");
            if failing.contains(&index) {
                return Err(GatewayError::ConnectionFailed(format!("index {index}")));
            }
            if index >= count {
                return rpc_result(Value::Null);
            }
            rpc_result(sample_transaction(&request.params[0], index))
        }
        other => panic!("unexpected method {other}"),
    }
}
