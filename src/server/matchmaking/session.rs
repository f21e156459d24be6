//! WebSocket session actor for matchmaking.
//!
//! One actor per connected client. It draws the connection id, announces
//! itself to the matchmaking server, relays parsed client actions and writes
//! server pushes back to the socket. Flood control runs here, before any
//! frame reaches the matchmaking server.

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{debug, warn};
use serde_json::json;
use uuid::Uuid;

use super::messages::{ClientWsMessage, ServerWsMessage};
use super::server::{Connect, Disconnect, JoinQuiz, MatchmakingServer, RegisterPlayer};
use super::types::ConnectionId;
use crate::server::anti_spam::AntiSpamState;
use crate::server::ws_error::ws_error_message;

/// A single client's WebSocket session.
pub struct MatchmakingSession {
    conn_id: ConnectionId,
    matchmaking_addr: Addr<MatchmakingServer>,
    anti_spam: AntiSpamState,
}

impl MatchmakingSession {
    pub fn new(matchmaking_addr: Addr<MatchmakingServer>) -> Self {
        Self {
            conn_id: Uuid::new_v4(),
            matchmaking_addr,
            anti_spam: AntiSpamState::new(),
        }
    }

    /// Tell the client it is banned, then close with a policy violation.
    fn send_ban_and_close(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        let context = json!({ "banRemainingSecs": self.anti_spam.ban_remaining_secs() });
        ctx.text(ws_error_message(
            "BANNED",
            "You have been banned for spamming. Please try again later.",
            Some(context),
        ));
        ctx.close(Some(ws::CloseReason {
            code: ws::CloseCode::Policy,
            description: Some("Banned for spam".into()),
        }));
        ctx.stop();
    }

    /// Send an error frame unless it repeats the previous one.
    fn send_error(&mut self, ctx: &mut ws::WebsocketContext<Self>, code: &str, message: &str) {
        if self.anti_spam.should_send_error(code, &self.conn_id) {
            ctx.text(ws_error_message(code, message, None));
        }
    }
}

impl Actor for MatchmakingSession {
    type Context = ws::WebsocketContext<Self>;

    /// Called when the session starts. Announces the connection to the
    /// matchmaking server.
    fn started(&mut self, ctx: &mut Self::Context) {
        debug!("[Session] {} opened", self.conn_id);
        self.matchmaking_addr.do_send(Connect {
            conn_id: self.conn_id,
            addr: ctx.address().recipient(),
        });
    }

    /// Called when the session stops. Reports the closed connection so all
    /// its matchmaking state is cleaned up.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        debug!("[Session] {} closed", self.conn_id);
        self.matchmaking_addr.do_send(Disconnect {
            conn_id: self.conn_id,
        });
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for MatchmakingSession {
    /// Handles incoming WebSocket frames from the client.
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                if self.anti_spam.record_request(&self.conn_id) {
                    self.send_ban_and_close(ctx);
                    return;
                }
                match serde_json::from_str::<ClientWsMessage>(&text) {
                    Ok(ClientWsMessage::RegisterPlayer(input)) => {
                        self.anti_spam.reset_on_valid_action();
                        self.matchmaking_addr.do_send(RegisterPlayer {
                            conn_id: self.conn_id,
                            input,
                        });
                    }
                    Ok(ClientWsMessage::JoinQuiz(topic)) => {
                        self.anti_spam.reset_on_valid_action();
                        self.matchmaking_addr.do_send(JoinQuiz {
                            conn_id: self.conn_id,
                            topic,
                        });
                    }
                    Ok(ClientWsMessage::Ping) => {
                        // Keepalive only, nothing to forward.
                        self.anti_spam.reset_on_valid_action();
                    }
                    Err(e) => {
                        debug!(
                            "[Session] {} sent an unparseable frame: {}",
                            self.conn_id, e
                        );
                        self.send_error(ctx, "INVALID_MESSAGE", "Invalid client message");
                    }
                }
            }
            Ok(ws::Message::Ping(payload)) => ctx.pong(&payload),
            Ok(ws::Message::Close(_)) => ctx.stop(),
            _ => (),
        }
    }
}

impl Handler<ServerWsMessage> for MatchmakingSession {
    type Result = ();

    /// Writes a server push to the socket.
    fn handle(&mut self, msg: ServerWsMessage, ctx: &mut Self::Context) {
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                warn!("[Session] {} failed to serialize push: {}", self.conn_id, e);
                ctx.text(ws_error_message(
                    "INTERNAL_ERROR",
                    "Internal server error",
                    None,
                ));
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Error,
                    description: Some("Internal server error".into()),
                }));
                ctx.stop();
            }
        }
    }
}

/// WebSocket endpoint for matchmaking.
///
/// The connection needs no parameters; the server assigns each socket a
/// fresh connection id and clients introduce themselves afterwards with a
/// `register-player` action.
pub async fn ws_matchmaking(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    ws::start(
        MatchmakingSession::new(data.matchmaking_addr.clone()),
        &req,
        stream,
    )
}
