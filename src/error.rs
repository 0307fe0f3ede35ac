use thiserror::Error;

/// Failures raised by the ledger itself.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("could not compute block digest: {0}")]
    Digest(#[from] serde_json::Error),

    #[error("chain advanced while mining (expected tail {expected})")]
    StaleTail { expected: String },
}

/// Registration given an address that does not parse as a URI with a host.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("malformed peer address: {0}")]
    MalformedAddress(String),
}

/// Per-peer faults during conflict resolution. Never fatal to a resolution pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeerError {
    #[error("peer {peer} unreachable: {reason}")]
    Unreachable { peer: String, reason: String },

    #[error("peer {peer} answered with status {status}")]
    BadResponse { peer: String, status: u16 },

    #[error("peer {peer} sent an undecodable chain: {reason}")]
    MalformedPayload { peer: String, reason: String },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
