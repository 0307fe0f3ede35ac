use actix_web::{HttpResponse, Responder, get};

use super::models::MessageResponse;

#[get("/health/")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("API is up and running 🦀")
}

#[get("/ping/")]
pub async fn ping() -> impl Responder {
    HttpResponse::Ok().json(MessageResponse {
        message: "pong".to_string(),
    })
}
