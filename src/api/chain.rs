use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, ValidateResponse};
use crate::network::ChainSnapshot;

/// Get the full chain. This is also the snapshot peers read during resolution.
#[get("/chain/")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let snapshot = {
        let node = state.node.lock().expect("mutex poisoned");
        ChainSnapshot::of(node.ledger.chain())
    };
    HttpResponse::Ok().json(snapshot)
}

/// Validate the whole chain.
#[get("/validate/")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let node = state.node.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(ValidateResponse {
        valid: node.ledger.is_valid(),
        length: node.ledger.len(),
    })
}
