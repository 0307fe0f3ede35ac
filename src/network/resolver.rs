use log::{debug, info, warn};

use super::fetch::{ChainFetcher, ChainSnapshot};
use super::registry::NodeRegistry;
use crate::blockchain::{Block, Ledger, is_valid_chain};
use crate::error::PeerError;

/// Outcome of a resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Replaced,
    Authoritative,
}

/// Longest-valid-chain reconciliation against every registered peer.
pub struct ConflictResolver<'a, F: ChainFetcher + ?Sized> {
    fetcher: &'a F,
}

impl<'a, F: ChainFetcher + ?Sized> ConflictResolver<'a, F> {
    pub fn new(fetcher: &'a F) -> Self {
        Self { fetcher }
    }

    /// Query `peers` in order and return the longest valid chain strictly
    /// longer than `local_len`, if any. Failing peers are skipped.
    pub fn find_longest<'p, I>(&self, local_len: usize, peers: I) -> Option<Vec<Block>>
    where
        I: IntoIterator<Item = &'p str>,
    {
        let mut best_len = local_len;
        let mut best: Option<Vec<Block>> = None;

        for peer in peers {
            let snapshot = match self.fetch_checked(peer) {
                Ok(s) => s,
                Err(e) => {
                    warn!("RESOLVE - skipping peer: {e}");
                    continue;
                }
            };

            if snapshot.length <= best_len {
                debug!(
                    "RESOLVE - peer {peer} has {} blocks, best so far {best_len}",
                    snapshot.length
                );
                continue;
            }
            if !is_valid_chain(&snapshot.chain) {
                warn!(
                    "RESOLVE - peer {peer} sent an invalid chain of {} blocks",
                    snapshot.length
                );
                continue;
            }

            debug!(
                "RESOLVE - peer {peer} is the new best ({} blocks)",
                snapshot.length
            );
            best_len = snapshot.length;
            best = Some(snapshot.chain);
        }
        best
    }

    /// Full pass: find a longer valid chain among `registry` and adopt it.
    pub fn resolve(&self, ledger: &mut Ledger, registry: &NodeRegistry) -> Resolution {
        let adopted = match self.find_longest(ledger.len(), registry.iter()) {
            Some(chain) => ledger.replace_chain(chain),
            None => false,
        };
        if adopted {
            info!("RESOLVE - our chain was replaced ({} blocks)", ledger.len());
            Resolution::Replaced
        } else {
            debug!("RESOLVE - our chain is authoritative ({} blocks)", ledger.len());
            Resolution::Authoritative
        }
    }

    fn fetch_checked(&self, peer: &str) -> Result<ChainSnapshot, PeerError> {
        let snapshot = self.fetcher.fetch_chain(peer)?;
        if snapshot.length != snapshot.chain.len() {
            return Err(PeerError::MalformedPayload {
                peer: peer.to_string(),
                reason: format!(
                    "reported length {} but sent {} blocks",
                    snapshot.length,
                    snapshot.chain.len()
                ),
            });
        }
        Ok(snapshot)
    }
}
