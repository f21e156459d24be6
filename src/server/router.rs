//! HTTP and WebSocket routing configuration.
//!
//! Defines the health endpoint and the matchmaking WebSocket endpoint.

use actix_web::web;
use crate::server::health::health_check;
use crate::server::matchmaking::session::ws_matchmaking;

/// Configure the application's HTTP/WebSocket routes.
///
/// The WebSocket route is handled by a dedicated session actor, which manages
/// the connection lifecycle and relays matchmaking actions.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .to(health_check)
    )
    .service(
        web::resource("/ws/matchmaking")
            .to(ws_matchmaking)
    );
}
