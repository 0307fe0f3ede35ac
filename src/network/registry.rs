use actix_web::http::Uri;
use log::{debug, info};
use std::collections::BTreeSet;

use crate::error::RegistryError;

/// Deduplicated set of peers, keyed by normalized `host[:port]`.
#[derive(Debug, Default, Clone)]
pub struct NodeRegistry {
    peers: BTreeSet<String>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self {
            peers: BTreeSet::new(),
        }
    }

    /// Parse `address` as a URI and insert its host (plus port, if any).
    /// Returns `Ok(false)` when the peer was already known.
    pub fn register(&mut self, address: &str) -> Result<bool, RegistryError> {
        let key = normalize(address)?;
        let added = self.peers.insert(key.clone());
        if added {
            info!("REGISTRY - added peer {key} (total={})", self.peers.len());
        } else {
            debug!("REGISTRY - peer {key} already known");
        }
        Ok(added)
    }

    pub fn contains(&self, peer: &str) -> bool {
        self.peers.contains(peer)
    }

    /// Peers in the order resolution visits them.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.peers.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

fn normalize(address: &str) -> Result<String, RegistryError> {
    let malformed = || RegistryError::MalformedAddress(address.to_string());

    let uri: Uri = address.trim().parse().map_err(|_| malformed())?;
    let host = uri.host().filter(|h| !h.is_empty()).ok_or_else(malformed)?;
    let host = host.to_ascii_lowercase();

    Ok(match uri.port_u16() {
        Some(port) => format!("{host}:{port}"),
        None => host,
    })
}
