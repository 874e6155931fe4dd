use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use warp::Filter;

use crate::coordinator::RoomCoordinator;
use crate::websocket::ConnectionManager;

pub mod config;
pub mod coordinator;
pub mod websocket;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    uptime: u64,
    store: bool,
}

#[derive(Serialize)]
struct WelcomeResponse {
    message: &'static str,
}

pub fn create_routes(
    connection_manager: Arc<ConnectionManager>,
    coordinator: Arc<RoomCoordinator>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let started = Instant::now();

    let connection_manager_filter = warp::any().map({
        let connection_manager = connection_manager.clone();
        move || connection_manager.clone()
    });

    let coordinator_filter = warp::any().map({
        let coordinator = coordinator.clone();
        move || coordinator.clone()
    });

    // WebSocket endpoint
    let websocket = warp::path("ws")
        .and(warp::ws())
        .and(connection_manager_filter)
        .and(coordinator_filter.clone())
        .map(|ws: warp::ws::Ws, conn_mgr, coordinator| {
            ws.on_upgrade(move |socket| websocket::handle_connection(socket, conn_mgr, coordinator))
        });

    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and(coordinator_filter)
        .map(move |coordinator: Arc<RoomCoordinator>| {
            warp::reply::json(&HealthResponse {
                status: "ok",
                timestamp: chrono::Utc::now().to_rfc3339(),
                uptime: started.elapsed().as_secs(),
                store: coordinator.store_available(),
            })
        });

    let root = warp::path::end().and(warp::get()).map(|| {
        warp::reply::json(&WelcomeResponse {
            message: "Welcome to the Chemistry Game API!",
        })
    });

    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST"]);

    websocket
        .or(health)
        .or(root)
        .with(cors)
        .with(warp::log("chemistry_game"))
}
