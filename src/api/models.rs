use crate::blockchain::Block;
use crate::config::Config;
use crate::node::Node;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

/// Shared application state: the node aggregate behind one mutex.
pub struct AppState {
    pub node: Mutex<Node>,
    pub peer_timeout: Duration,
    pub mine_timeout: Option<Duration>,
    pub chain_path: String,
    /// Raised on shutdown so in-flight mining stops.
    pub shutdown: AtomicBool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            node: Mutex::new(Node::new(config.resolve_node_id())),
            peer_timeout: config.peer_timeout(),
            mine_timeout: config.mine_timeout(),
            chain_path: config.chain_path.clone(),
            shutdown: AtomicBool::new(false),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

/* ---------- Generic ---------- */

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: String,
    pub block: Block,
}

/* ---------- TX API Models ---------- */

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

#[derive(Serialize)]
pub struct PendingResponse<'a> {
    pub size: usize,
    pub transactions: &'a [crate::transaction::Transaction],
}

/* ---------- Nodes API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct RegisterNodesResponse {
    pub message: String,
    pub added: Vec<String>,
    pub rejected: Vec<String>,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct NodesResponse {
    pub nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub message: String,
    pub replaced: bool,
    pub chain: Vec<Block>,
}
