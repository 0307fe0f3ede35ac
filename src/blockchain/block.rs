use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
use crate::error::Result;
use crate::transaction::Transaction;

/// A sealed block. Its position in the chain is `index - 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    #[serde(rename = "timeStamp")]
    pub timestamp: i64, // Unix nanoseconds (UTC)
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    #[serde(rename = "previousHash")]
    pub previous_hash: String,
}

impl Block {
    /// The fixed first block. Its proof is not derived from the puzzle.
    pub fn genesis() -> Self {
        Self {
            index: 1,
            timestamp: now_nanos(),
            transactions: Vec::new(),
            proof: GENESIS_PROOF,
            previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
        }
    }

    /// SHA-256 over the block's JSON encoding, rendered as lowercase hex.
    /// Every field takes part, so two blocks hash equal only if they are equal.
    pub fn compute_hash(&self) -> Result<String> {
        let encoded = serde_json::to_vec(self)?;
        let mut hasher = Sha256::new();
        hasher.update(&encoded);
        Ok(hex::encode(hasher.finalize()))
    }
}

pub(crate) fn now_nanos() -> i64 {
    let now = Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_millis().saturating_mul(1_000_000))
}

#[cfg(test)]
mod tests {
    use super::Block;
    use crate::transaction::Transaction;

    #[test]
    fn genesis_uses_fixed_sentinels() {
        let b = Block::genesis();
        assert_eq!(b.index, 1);
        assert_eq!(b.proof, 100);
        assert_eq!(b.previous_hash, "1");
        assert!(b.transactions.is_empty());
    }

    #[test]
    fn hash_is_hex_sha256_and_stable() {
        let b = Block::genesis();
        let h = b.compute_hash().unwrap();
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(h, b.compute_hash().unwrap());
    }

    #[test]
    fn hash_changes_when_tampered() {
        let mut b = Block::genesis();
        let before = b.compute_hash().unwrap();
        b.transactions.push(Transaction::new("x", "y", 1));
        assert_ne!(before, b.compute_hash().unwrap());
    }

    #[test]
    fn wire_format_uses_peer_field_names() {
        let b = Block::genesis();
        let json = serde_json::to_value(&b).unwrap();
        let obj = json.as_object().unwrap();
        for key in ["index", "timeStamp", "transactions", "proof", "previousHash"] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(obj.len(), 5);
    }
}
