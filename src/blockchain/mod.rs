pub mod block;
pub mod model;
pub mod pow;
pub mod validation;

pub use block::Block;
pub use model::Ledger;
pub use validation::is_valid_chain;

/// Proof carried by the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// Sentinel `previous_hash` of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// A proof is valid when its hex digest starts with this. Fixed difficulty.
pub const PROOF_TARGET_PREFIX: &str = "00";
