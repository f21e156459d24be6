//! Liveness endpoint.

use actix_web::{HttpResponse, Responder};

/// Plain-text check that the server is up, served on the HTTP root.
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("Quiz matchmaking server running")
}
