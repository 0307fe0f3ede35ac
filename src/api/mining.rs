use actix_web::{HttpResponse, Responder, get, web};
use log::{debug, error, info, warn};
use std::sync::atomic::Ordering;
use std::time::Instant;

use super::models::{AppState, MineResponse};
use crate::blockchain::pow::proof_of_work_until;
use crate::error::LedgerError;

/// Mine a block from the pending pool:
/// - snapshot the tail, then release the lock
/// - solve the puzzle on the blocking pool (stops on timeout or shutdown)
/// - re-take the lock, make sure the tail did not move
/// - append the reward transaction and seal
#[get("/mine/")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let target = {
        let node = state.node.lock().expect("mutex poisoned");
        node.ledger.mining_target()
    };
    let (last_proof, tail_hash) = match target {
        Ok(t) => t,
        Err(e) => {
            error!("MINER - cannot hash tail block: {e}");
            return HttpResponse::InternalServerError().body(e.to_string());
        }
    };

    let deadline = state.mine_timeout.map(|t| Instant::now() + t);
    let worker_state = state.clone();
    let t0 = Instant::now();
    let solved = web::block(move || {
        proof_of_work_until(last_proof, || {
            worker_state.shutdown.load(Ordering::Relaxed)
                || deadline.is_some_and(|d| Instant::now() >= d)
        })
    })
    .await;

    let proof = match solved {
        Ok(Some(p)) => p,
        Ok(None) => {
            warn!("MINER - search stopped after {} ms", t0.elapsed().as_millis());
            return HttpResponse::ServiceUnavailable().body("mining was cancelled");
        }
        Err(e) => {
            error!("MINER - worker failed: {e}");
            return HttpResponse::InternalServerError().body("mining worker failed");
        }
    };
    debug!(
        "MINER - proof {proof} for last_proof {last_proof} found in {} ms",
        t0.elapsed().as_millis()
    );

    seal_solution(&state, proof, &tail_hash)
}

/// Seal a solved proof under the lock. 409 when the tail moved meanwhile.
fn seal_solution(state: &AppState, proof: u64, tail_hash: &str) -> HttpResponse {
    let mut node = state.node.lock().expect("mutex poisoned");
    let miner = node.node_id().to_string();

    let block = match node.ledger.seal_mined(proof, tail_hash, &miner) {
        Ok(b) => b.clone(),
        Err(e @ LedgerError::StaleTail { .. }) => {
            warn!("MINER - discarding proof {proof}: {e}");
            return HttpResponse::Conflict().body("chain advanced while mining; retry");
        }
        Err(e) => {
            error!("MINER - sealing failed: {e}");
            return HttpResponse::InternalServerError().body(e.to_string());
        }
    };

    info!(
        "MINER - forged block #{} (proof={}, txs={})",
        block.index,
        block.proof,
        block.transactions.len()
    );
    HttpResponse::Ok().json(MineResponse {
        message: "New Block Forged".to_string(),
        block,
    })
}
