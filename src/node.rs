use crate::blockchain::Ledger;
use crate::network::NodeRegistry;

/// Everything one node owns: its ledger, its peers and the id its mining
/// rewards are paid to. Shared behind a single lock by the HTTP layer.
#[derive(Debug)]
pub struct Node {
    pub ledger: Ledger,
    pub peers: NodeRegistry,
    node_id: String,
}

impl Node {
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            ledger: Ledger::new(),
            peers: NodeRegistry::new(),
            node_id: node_id.into(),
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }
}
