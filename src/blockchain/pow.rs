use log::debug;
use sha2::{Digest, Sha256};

use super::PROOF_TARGET_PREFIX;

/// How many guesses run between two polls of the stop predicate.
const STOP_POLL_INTERVAL: u64 = 1024;

/// True iff the hex SHA-256 of `"{last_proof}{proof}"` starts with the target prefix.
pub fn valid_proof(last_proof: u64, proof: u64) -> bool {
    let guess = format!("{last_proof}{proof}");
    let mut hasher = Sha256::new();
    hasher.update(guess.as_bytes());
    hex::encode(hasher.finalize()).starts_with(PROOF_TARGET_PREFIX)
}

/// Smallest `p >= 0` with `valid_proof(last_proof, p)`. Blocks until found.
pub fn proof_of_work(last_proof: u64) -> u64 {
    let mut proof = 0;
    while !valid_proof(last_proof, proof) {
        proof += 1;
    }
    proof
}

/// Same search as [`proof_of_work`], but gives up with `None` once
/// `should_stop` returns true. The predicate is polled every
/// `STOP_POLL_INTERVAL` guesses, starting before the first one.
pub fn proof_of_work_until<F>(last_proof: u64, should_stop: F) -> Option<u64>
where
    F: Fn() -> bool,
{
    let mut proof = 0u64;
    loop {
        if proof % STOP_POLL_INTERVAL == 0 && should_stop() {
            debug!("PoW - search for last_proof={last_proof} stopped at guess {proof}");
            return None;
        }
        if valid_proof(last_proof, proof) {
            return Some(proof);
        }
        proof += 1;
    }
}
