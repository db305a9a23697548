//! Gateway that serves block transactions from an Ethereum node over HTTP
//! and JSON-RPC.
//!
//! A block's transactions are assembled by asking the node for the block's
//! transaction count, fetching every index concurrently and joining the
//! results into one index-ordered batch. Any failed fetch fails the batch.

pub mod config;
pub mod error;
pub mod models;
pub mod rpc;
pub mod server;
pub mod service;

pub use error::{GatewayError, Result};
