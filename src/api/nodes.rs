use actix_web::{HttpResponse, Responder, get, post, web};
use log::{error, info, warn};

use super::models::{
    AppState, NodesResponse, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse,
};
use crate::network::{ConflictResolver, HttpChainFetcher};

/// Register a batch of peers. Malformed addresses are reported, not fatal.
#[post("/nodes/")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesRequest>,
) -> impl Responder {
    if body.nodes.is_empty() {
        return HttpResponse::BadRequest().body("please supply a valid list of nodes");
    }

    let mut added = Vec::new();
    let mut rejected = Vec::new();
    let total_nodes = {
        let mut node = state.node.lock().expect("mutex poisoned");
        for address in &body.nodes {
            match node.peers.register(address) {
                Ok(true) => added.push(address.clone()),
                Ok(false) => {}
                Err(e) => {
                    warn!("POST /nodes/ - {e}");
                    rejected.push(address.clone());
                }
            }
        }
        node.peers.iter().map(str::to_owned).collect::<Vec<_>>()
    };

    HttpResponse::Created().json(RegisterNodesResponse {
        message: "New nodes have been added".to_string(),
        added,
        rejected,
        total_nodes,
    })
}

#[get("/nodes/")]
pub async fn list_nodes(state: web::Data<AppState>) -> impl Responder {
    let node = state.node.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(NodesResponse {
        nodes: node.peers.iter().map(str::to_owned).collect(),
    })
}

/// Longest-valid-chain consensus:
/// - snapshot local length and peers, release the lock
/// - query peers on the blocking pool
/// - re-take the lock and adopt the winner only if it is still longer
#[get("/nodes/resolve/")]
pub async fn resolve_conflicts(state: web::Data<AppState>) -> impl Responder {
    let (local_len, peers) = {
        let node = state.node.lock().expect("mutex poisoned");
        let peers = node.peers.iter().map(str::to_owned).collect::<Vec<_>>();
        (node.ledger.len(), peers)
    };

    let timeout = state.peer_timeout;
    let chain_path = state.chain_path.clone();
    let found = web::block(move || {
        let fetcher = HttpChainFetcher::new(timeout, chain_path)?;
        let best = ConflictResolver::new(&fetcher)
            .find_longest(local_len, peers.iter().map(String::as_str));
        Ok::<_, reqwest::Error>(best)
    })
    .await;

    let candidate = match found {
        Ok(Ok(c)) => c,
        Ok(Err(e)) => {
            error!("RESOLVE - could not build HTTP client: {e}");
            return HttpResponse::InternalServerError().body(e.to_string());
        }
        Err(e) => {
            error!("RESOLVE - worker failed: {e}");
            return HttpResponse::InternalServerError().body("resolution worker failed");
        }
    };

    let mut node = state.node.lock().expect("mutex poisoned");
    let replaced = match candidate {
        Some(chain) if chain.len() > node.ledger.len() => node.ledger.replace_chain(chain),
        _ => false,
    };

    let message = if replaced {
        info!("RESOLVE - our chain was replaced ({} blocks)", node.ledger.len());
        "Our chain was replaced"
    } else {
        "Our chain is authoritative"
    };
    HttpResponse::Ok().json(ResolveResponse {
        message: message.to_string(),
        replaced,
        chain: node.ledger.chain().to_vec(),
    })
}
