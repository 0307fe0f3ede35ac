use log::{debug, warn};

use super::Block;
use super::pow::valid_proof;

/// Internal consistency of a candidate chain: each block after the first must
/// link to the hash of its predecessor and carry a valid proof against the
/// predecessor's proof. Chains of length 0 or 1 are trivially valid.
///
/// Transaction contents, timestamps and index contiguity are not checked.
pub fn is_valid_chain(chain: &[Block]) -> bool {
    for (height, pair) in chain.windows(2).enumerate() {
        let (prev, block) = (&pair[0], &pair[1]);

        let prev_hash = match prev.compute_hash() {
            Ok(h) => h,
            Err(e) => {
                warn!("VALIDATE - cannot hash block at position {}: {e}", height + 1);
                return false;
            }
        };
        if block.previous_hash != prev_hash {
            debug!("VALIDATE - broken link at position {}", height + 2);
            return false;
        }
        if !valid_proof(prev.proof, block.proof) {
            debug!("VALIDATE - bad proof at position {}", height + 2);
            return false;
        }
    }
    true
}
