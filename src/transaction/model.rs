use serde::{Deserialize, Serialize};

/// Sender used for the block reward; marks coins minted by this node.
pub const REWARD_SENDER: &str = "0";

/// Amount paid to the miner of each block.
pub const MINING_REWARD: i64 = 1;

/// A value transfer. Fields are carried as-is, nothing is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: i64,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: i64) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }

    /// The reward transaction a miner appends before sealing a block.
    pub fn reward(recipient: impl Into<String>) -> Self {
        Self::new(REWARD_SENDER, recipient, MINING_REWARD)
    }
}
