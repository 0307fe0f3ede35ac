use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, test, web};
use serde_json::Value;

use pow_ledger::api::{AppState, init_routes};
use pow_ledger::error::PeerError;
use pow_ledger::network::{ChainFetcher, ChainSnapshot, HttpChainFetcher};

/// A node served over real HTTP on an ephemeral loopback port, plus two
/// misbehaving routes.
struct LivePeer {
    addr: String,
    state: web::Data<AppState>,
    handle: ServerHandle,
}

fn start_peer(blocks: usize) -> LivePeer {
    let state = web::Data::new(AppState::default());
    {
        let mut node = state.node.lock().unwrap();
        for _ in 0..blocks {
            node.ledger.mine_block("peer").unwrap();
        }
    }

    let app_state = state.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(init_routes)
            .route(
                "/broken/",
                web::get().to(|| async { HttpResponse::InternalServerError().finish() }),
            )
            .route(
                "/garbage/",
                web::get().to(|| async { HttpResponse::Ok().body("definitely not a chain") }),
            )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let port = server.addrs()[0].port();
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    LivePeer {
        addr: format!("127.0.0.1:{port}"),
        state,
        handle,
    }
}

async fn fetch(peer: &str, path: &'static str) -> Result<ChainSnapshot, PeerError> {
    let peer = peer.to_string();
    web::block(move || {
        HttpChainFetcher::new(Duration::from_secs(5), path)
            .unwrap()
            .fetch_chain(&peer)
    })
    .await
    .unwrap()
}

#[actix_web::test]
async fn fetcher_reads_snapshot_and_maps_failures() {
    let peer = start_peer(2);

    let snap = fetch(&peer.addr, "/api/v1/chain/").await.unwrap();
    assert_eq!(snap.length, 3);
    assert_eq!(snap.chain.len(), 3);

    let err = fetch(&peer.addr, "/broken/").await.unwrap_err();
    assert!(matches!(err, PeerError::BadResponse { status: 500, .. }));

    let err = fetch(&peer.addr, "/garbage/").await.unwrap_err();
    assert!(matches!(err, PeerError::MalformedPayload { .. }));

    peer.handle.stop(true).await;
}

#[actix_web::test]
async fn resolve_adopts_longer_live_peer() {
    let peer = start_peer(2);

    let local = web::Data::new(AppState::default());
    local
        .node
        .lock()
        .unwrap()
        .peers
        .register(&format!("http://{}", peer.addr))
        .unwrap();
    let app = test::init_service(
        App::new()
            .app_data(local.clone())
            .configure(init_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/v1/nodes/resolve/")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["replaced"], true);
    assert_eq!(body["message"], "Our chain was replaced");
    assert_eq!(body["chain"].as_array().unwrap().len(), 3);

    let peer_chain = peer.state.node.lock().unwrap().ledger.chain().to_vec();
    assert_eq!(local.node.lock().unwrap().ledger.chain(), peer_chain.as_slice());

    // A second pass finds nothing longer than what we now hold.
    let req = test::TestRequest::get()
        .uri("/api/v1/nodes/resolve/")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["replaced"], false);

    peer.handle.stop(true).await;
}
