use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::blockchain::Block;
use crate::error::PeerError;

/// What a peer reports about its chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub length: usize,
    pub chain: Vec<Block>,
}

impl ChainSnapshot {
    pub fn of(chain: &[Block]) -> Self {
        Self {
            length: chain.len(),
            chain: chain.to_vec(),
        }
    }
}

/// Blocking read of one peer's chain snapshot.
pub trait ChainFetcher {
    fn fetch_chain(&self, peer: &str) -> Result<ChainSnapshot, PeerError>;
}

/// Fetches `http://{peer}{chain_path}` with a blocking reqwest client.
///
/// Must not be built or dropped on an async executor thread; run it from a
/// blocking context such as `actix_web::web::block`.
pub struct HttpChainFetcher {
    client: reqwest::blocking::Client,
    chain_path: String,
}

impl HttpChainFetcher {
    pub fn new(timeout: Duration, chain_path: impl Into<String>) -> reqwest::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            chain_path: chain_path.into(),
        })
    }

    fn url_for(&self, peer: &str) -> String {
        format!("http://{peer}{}", self.chain_path)
    }
}

impl ChainFetcher for HttpChainFetcher {
    fn fetch_chain(&self, peer: &str) -> Result<ChainSnapshot, PeerError> {
        let url = self.url_for(peer);
        debug!("FETCH - GET {url}");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| PeerError::Unreachable {
                peer: peer.to_string(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PeerError::BadResponse {
                peer: peer.to_string(),
                status: status.as_u16(),
            });
        }

        resp.json::<ChainSnapshot>()
            .map_err(|e| PeerError::MalformedPayload {
                peer: peer.to_string(),
                reason: e.to_string(),
            })
    }
}
