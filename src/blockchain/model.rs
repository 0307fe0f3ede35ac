use log::{debug, info};

use super::Block;
use super::block::now_nanos;
use super::pow::proof_of_work;
use super::validation::is_valid_chain;
use crate::error::{LedgerError, Result};
use crate::transaction::Transaction;

/// In-memory chain plus the pool of transactions waiting for the next block.
///
/// Not synchronized: callers that share a ledger across threads must
/// serialize access themselves.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
}

impl Ledger {
    /// Initialize a ledger holding only the genesis block.
    pub fn new() -> Self {
        Self {
            chain: vec![Block::genesis()],
            pending: Vec::new(),
        }
    }

    /// Queue `tx` for the next block and return that block's index.
    pub fn submit_transaction(&mut self, tx: Transaction) -> u64 {
        debug!(
            "LEDGER - queued tx {} -> {} ({}), pending={}",
            tx.sender,
            tx.recipient,
            tx.amount,
            self.pending.len() + 1
        );
        self.pending.push(tx);
        self.last_block().index + 1
    }

    /// Append a block carrying the whole pending pool and the given proof.
    /// When `previous_hash` is `None` it is computed from the current tail.
    pub fn seal_block(&mut self, proof: u64, previous_hash: Option<String>) -> Result<&Block> {
        let last = self.last_block();
        let last_timestamp = last.timestamp;
        let previous_hash = match previous_hash {
            Some(h) => h,
            None => last.compute_hash()?,
        };

        let block = Block {
            index: self.chain.len() as u64 + 1,
            timestamp: now_nanos().max(last_timestamp),
            transactions: std::mem::take(&mut self.pending),
            proof,
            previous_hash,
        };
        info!(
            "LEDGER - sealed block #{} (proof={}, txs={})",
            block.index,
            block.proof,
            block.transactions.len()
        );
        self.chain.push(block);
        Ok(self.last_block())
    }

    /// Solve the puzzle against the tail, pay `miner` the block reward and
    /// seal. Blocks the calling thread for the whole search.
    pub fn mine_block(&mut self, miner: &str) -> Result<&Block> {
        let (last_proof, tail_hash) = self.mining_target()?;
        let proof = proof_of_work(last_proof);
        self.seal_mined(proof, &tail_hash, miner)
    }

    /// Proof and hash of the tail: what a miner solves against and what
    /// [`Ledger::seal_mined`] later checks the tail still hashes to.
    pub fn mining_target(&self) -> Result<(u64, String)> {
        let last = self.last_block();
        Ok((last.proof, last.compute_hash()?))
    }

    /// Pay `miner` the block reward and seal with `proof`, provided the tail
    /// still hashes to `tail_hash`. Nothing is mutated when it does not.
    pub fn seal_mined(&mut self, proof: u64, tail_hash: &str, miner: &str) -> Result<&Block> {
        if self.last_block().compute_hash()? != tail_hash {
            return Err(LedgerError::StaleTail {
                expected: tail_hash.to_string(),
            });
        }
        self.submit_transaction(Transaction::reward(miner));
        self.seal_block(proof, Some(tail_hash.to_string()))
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("Ledger should always have at least the genesis block")
    }

    /// Swap in a peer's chain wholesale. Empty chains are refused so the
    /// genesis guarantee keeps holding.
    pub fn replace_chain(&mut self, chain: Vec<Block>) -> bool {
        if chain.is_empty() {
            return false;
        }
        info!(
            "LEDGER - chain replaced: {} -> {} blocks",
            self.chain.len(),
            chain.len()
        );
        self.chain = chain;
        true
    }

    /// Self-check of the local chain.
    pub fn is_valid(&self) -> bool {
        is_valid_chain(&self.chain)
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Ledger;
    use crate::blockchain::pow::proof_of_work;
    use crate::error::LedgerError;
    use crate::transaction::Transaction;

    #[test]
    fn fresh_ledger_holds_only_genesis() {
        let ledger = Ledger::new();
        assert_eq!(ledger.len(), 1);
        let g = ledger.last_block();
        assert_eq!(g.index, 1);
        assert_eq!(g.proof, 100);
        assert_eq!(g.previous_hash, "1");
        assert!(ledger.pending().is_empty());
    }

    #[test]
    fn submit_returns_next_block_index() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.submit_transaction(Transaction::new("A", "B", 1)), 2);
        assert_eq!(ledger.submit_transaction(Transaction::new("B", "C", 2)), 2);
        ledger.seal_block(7, None).unwrap();
        assert_eq!(ledger.submit_transaction(Transaction::new("C", "D", 3)), 3);
    }

    #[test]
    fn sealing_embeds_pool_in_order_and_clears_it() {
        let mut ledger = Ledger::new();
        let t1 = Transaction::new("A", "B", 1);
        let t2 = Transaction::new("B", "C", 2);
        ledger.submit_transaction(t1.clone());
        ledger.submit_transaction(t2.clone());

        let block = ledger.seal_block(12, None).unwrap().clone();
        assert_eq!(block.transactions, vec![t1, t2]);
        assert_eq!(block.index, 2);
        assert_eq!(block.proof, 12);
        assert!(ledger.pending().is_empty());
    }

    #[test]
    fn explicit_previous_hash_is_kept() {
        let mut ledger = Ledger::new();
        let block = ledger.seal_block(1, Some("abc".into())).unwrap();
        assert_eq!(block.previous_hash, "abc");
    }

    #[test]
    fn timestamps_never_go_backwards() {
        let mut ledger = Ledger::new();
        for p in 0..5 {
            ledger.seal_block(p, None).unwrap();
        }
        assert!(
            ledger
                .chain()
                .windows(2)
                .all(|w| w[1].timestamp >= w[0].timestamp)
        );
    }

    #[test]
    fn mine_block_end_to_end() {
        let mut ledger = Ledger::new();
        let genesis_hash = ledger.last_block().compute_hash().unwrap();
        ledger.submit_transaction(Transaction::new("A", "B", 10));

        let block = ledger.mine_block("node-id").unwrap().clone();
        assert_eq!(block.index, 2);
        assert_eq!(
            block.transactions,
            vec![
                Transaction::new("A", "B", 10),
                Transaction::new("0", "node-id", 1)
            ]
        );
        assert_eq!(block.previous_hash, genesis_hash);
        assert!(ledger.is_valid());
    }

    #[test]
    fn seal_mined_rejects_a_moved_tail() {
        let mut ledger = Ledger::new();
        ledger.submit_transaction(Transaction::new("A", "B", 10));
        let (last_proof, tail_hash) = ledger.mining_target().unwrap();
        let proof = proof_of_work(last_proof);

        // Someone else extends the chain before our proof is sealed.
        ledger.mine_block("other").unwrap();
        let len = ledger.len();

        let err = ledger.seal_mined(proof, &tail_hash, "me").unwrap_err();
        assert!(matches!(err, LedgerError::StaleTail { .. }));
        assert_eq!(ledger.len(), len);
        assert!(ledger.pending().is_empty());
        assert!(ledger.is_valid());
    }

    #[test]
    fn seal_mined_on_unchanged_tail_appends_reward_last() {
        let mut ledger = Ledger::new();
        ledger.submit_transaction(Transaction::new("A", "B", 10));
        let (last_proof, tail_hash) = ledger.mining_target().unwrap();

        let block = ledger
            .seal_mined(proof_of_work(last_proof), &tail_hash, "me")
            .unwrap()
            .clone();
        assert_eq!(block.previous_hash, tail_hash);
        assert_eq!(block.transactions.last(), Some(&Transaction::reward("me")));
        assert!(ledger.is_valid());
    }

    #[test]
    fn replace_chain_refuses_empty() {
        let mut ledger = Ledger::new();
        assert!(!ledger.replace_chain(Vec::new()));
        assert_eq!(ledger.len(), 1);
    }
}
