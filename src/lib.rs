//! Minimal proof-of-work ledger node: an append-only chain of blocks sealed
//! behind a hash puzzle, reconciled with peers by the longest-valid-chain rule.

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod network;
pub mod node;
pub mod transaction;
