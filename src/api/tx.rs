use actix_web::{HttpResponse, Responder, get, post, web};
use log::info;

use super::models::{AppState, NewTxResponse, PendingResponse};
use crate::transaction::Transaction;

/// Queue a transaction for the next block. Contents are not validated.
#[post("/transaction/")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<Transaction>,
) -> impl Responder {
    let tx = body.into_inner();
    let index = {
        let mut node = state.node.lock().expect("mutex poisoned");
        node.ledger.submit_transaction(tx)
    };
    info!("POST /transaction/ - queued for block {index}");

    HttpResponse::Created().json(NewTxResponse {
        message: format!("Transaction will be added to Block {index}"),
        index,
    })
}

/// Transactions waiting for the next block, in submission order.
#[get("/pending/")]
pub async fn get_pending(state: web::Data<AppState>) -> impl Responder {
    let node = state.node.lock().expect("mutex poisoned");
    let pending = node.ledger.pending();
    HttpResponse::Ok().json(PendingResponse {
        size: pending.len(),
        transactions: pending,
    })
}
