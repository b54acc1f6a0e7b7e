//! # Live Store
//!
//! A thin client for the hosted realtime document-store backend.
//!
//! The backend owns all durable state, conflict resolution and delivery
//! ordering. This crate provides:
//! - declarative queries (`{entity: {"$": {"where": {field: value}}}}`)
//! - atomic write batches of create/update/delete operations
//! - push-style subscriptions delivering full result-set snapshots
//!
//! A subscription is a long-lived registration: it returns immediately and
//! delivers snapshots asynchronously over a `tokio::sync::watch` channel.
//! Consumers must not assume any ordering across independent writes; every
//! delivery is a complete snapshot of the query's result set.

pub mod client;
pub mod error;
pub mod query;
pub mod transact;

pub use client::{LiveStoreClient, Snapshot, Subscription};
pub use error::StoreError;
pub use query::LiveQuery;
pub use transact::{TxBatch, TxOp};
