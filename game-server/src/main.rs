use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use game_core::WordPool;
use game_server::{
    config::Config, coordinator::RoomCoordinator, create_routes, websocket::ConnectionManager,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Chemistry Game server...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let word_pool = match config.words_directory.as_deref() {
        Some(dir) => {
            info!("Loading words from directory: {}", dir);
            match WordPool::from_directory(dir) {
                Ok(pool) => pool,
                Err(e) => {
                    error!("Failed to load words from directory '{}': {:#}", dir, e);
                    error!("Unset WORDS_DIRECTORY to use the built-in word lists.");
                    std::process::exit(1);
                }
            }
        }
        None => WordPool::builtin(),
    };

    let store = game_store::connect(&config.store()).await;
    let cleanup = config.cleanup();
    let coordinator = Arc::new(
        RoomCoordinator::new(store, Arc::new(word_pool), config.rules())
            .with_cleanup(cleanup.clone())
            .with_room_ttl(config.room_ttl()),
    );
    let connection_manager = Arc::new(ConnectionManager::new());

    let routes = create_routes(connection_manager, coordinator.clone());

    // Inactivity sweep
    let cleanup_coordinator = coordinator.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(cleanup.sweep_interval);
        loop {
            interval.tick().await;
            let removed = cleanup_coordinator.cleanup_inactive_rooms().await;
            if removed > 0 {
                info!("Inactivity sweep removed {} rooms", removed);
            }
        }
    });

    let ip = match config.host.parse::<std::net::IpAddr>() {
        Ok(ip) => ip,
        Err(e) => {
            error!("Invalid HOST '{}': {}", config.host, e);
            std::process::exit(1);
        }
    };

    info!("Server starting on {}:{}", config.host, config.port);

    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown((ip, config.port), async {
        #[cfg(unix)]
        {
            let (Ok(mut sigint), Ok(mut sigterm)) = (
                signal::unix::signal(signal::unix::SignalKind::interrupt()),
                signal::unix::signal(signal::unix::SignalKind::terminate()),
            ) else {
                error!("Failed to install signal handlers");
                std::future::pending::<()>().await;
                return;
            };

            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully...");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            if signal::ctrl_c().await.is_ok() {
                info!("Received Ctrl+C, shutting down gracefully...");
            }
        }
    });

    info!("Server started successfully on {}. Press Ctrl+C to stop.", addr);
    server.await;
    info!("Server shutdown complete.");
}
