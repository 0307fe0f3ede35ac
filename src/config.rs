use clap::Parser;
use std::time::Duration;
use uuid::Uuid;

/// Node settings. Each flag falls back to an environment variable, which
/// may come from a `.env` file.
#[derive(Debug, Clone, Parser)]
#[command(name = "pow-ledger", about = "Proof-of-work ledger node")]
pub struct Config {
    /// Interface the HTTP API binds to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port the HTTP API listens on
    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// Recipient of mining rewards; a random id when unset
    #[arg(long, env = "NODE_ID")]
    pub node_id: Option<String>,

    /// Per-peer timeout while resolving conflicts
    #[arg(long, env = "PEER_TIMEOUT_SECS", default_value_t = 10)]
    pub peer_timeout_secs: u64,

    /// Abort a mining request after this many seconds (0 = never)
    #[arg(long, env = "MINE_TIMEOUT_SECS", default_value_t = 0)]
    pub mine_timeout_secs: u64,

    /// Path peers serve their chain snapshot on
    #[arg(long, env = "PEER_CHAIN_PATH", default_value = "/api/v1/chain/")]
    pub chain_path: String,
}

impl Config {
    /// The configured node id, or a fresh UUID v4 without dashes.
    pub fn resolve_node_id(&self) -> String {
        self.node_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string())
    }

    pub fn peer_timeout(&self) -> Duration {
        Duration::from_secs(self.peer_timeout_secs)
    }

    pub fn mine_timeout(&self) -> Option<Duration> {
        (self.mine_timeout_secs > 0).then(|| Duration::from_secs(self.mine_timeout_secs))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            node_id: None,
            peer_timeout_secs: 10,
            mine_timeout_secs: 0,
            chain_path: "/api/v1/chain/".to_string(),
        }
    }
}
