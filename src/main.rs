//! Main entry point for the quiz matchmaking server.
//!
//! Initializes the actor system, configures application state, and launches
//! the HTTP server with the matchmaking WebSocket endpoint.

use actix::Actor;
use actix_web::{web, App, HttpServer};
use log::info;
use server::matchmaking::server::MatchmakingServer;

use crate::config::server::{DEFAULT_PORT, PORT_ENV_VAR};

pub mod config;
mod server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (default to info level).
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Start the MatchmakingServer actor (registry, waiting pools, pairing).
    let matchmaking_addr = MatchmakingServer::new().start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(matchmaking_addr));

    let port = std::env::var(PORT_ENV_VAR)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    info!("Quiz matchmaking server listening on port {}", port);

    // Start the HTTP server with the WebSocket endpoint.
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*")),
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
