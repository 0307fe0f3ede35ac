use actix_web::{App, HttpServer, web};
use clap::Parser;
use dotenvy::dotenv;
use log::info;
use std::sync::atomic::Ordering;

use pow_ledger::api::{self, AppState};
use pow_ledger::config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = Config::parse();
    let state = web::Data::new(AppState::new(&config));
    {
        let node = state.node.lock().expect("mutex poisoned");
        info!("node id {}", node.node_id());
    }

    println!(
        "⛓️ Starting ledger node at http://{}:{}",
        config.host, config.port
    );

    // Let an in-flight mining request bail out instead of holding up shutdown.
    let signal_state = state.clone();
    actix_web::rt::spawn(async move {
        if actix_web::rt::signal::ctrl_c().await.is_ok() {
            signal_state.shutdown.store(true, Ordering::Relaxed);
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
