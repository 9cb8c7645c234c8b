//! HTTP streaming fallback
//!
//! For clients that cannot open a WebSocket. A client opens an SSE stream,
//! learns its connection id from the first `session` event, and posts its
//! inbound messages to `{ws_path}/{connection_id}/send`. Everything the broker
//! pushes to the connection arrives as one SSE `data` line per message.
//!
//! The same router exposes `POST /internal/notify`, through which a backend
//! process outside this one publishes updates with the inbound schema.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures_util::stream::{self, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::broker::Broker;
use crate::config::Settings;
use crate::connection::{Connection, ConnectionId};
use crate::transport::dispatch::dispatch;
use crate::transport::message::{ClientMessage, Command};
use crate::utils::Result;

/// SSE event name of the first frame, whose data is the connection id.
pub const SESSION_EVENT: &str = "session";

#[derive(Clone)]
struct FallbackState {
    broker: Arc<Broker>,
    keep_alive: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NotifyResponse {
    pub delivered: usize,
}

/// Unregisters its connection when the SSE stream holding it is dropped.
struct SessionGuard {
    broker: Arc<Broker>,
    connection_id: ConnectionId,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        debug!(connection = %self.connection_id, "fallback stream dropped");
        self.broker.unregister(&self.connection_id);
    }
}

/// Create the fallback router.
pub fn create_router(broker: Arc<Broker>, settings: &Settings) -> Router {
    let base = settings.server.ws_path.trim_end_matches('/');
    let state = FallbackState {
        broker,
        keep_alive: Duration::from_secs(settings.fallback.keep_alive_secs),
    };

    Router::new()
        .route(&format!("{base}/stream"), get(open_stream))
        .route(&format!("{base}/{{connection_id}}/send"), post(send_message))
        .route("/internal/notify", post(notify))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the fallback server.
pub async fn start_fallback_server(addr: String, broker: Arc<Broker>, settings: Settings) -> Result<()> {
    let app = create_router(broker, &settings);
    let listener = TcpListener::bind(&addr).await?;
    info!("Fallback server listening on http://{addr}{}/stream", settings.server.ws_path);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn open_stream(
    State(state): State<FallbackState>,
) -> std::result::Result<Sse<impl Stream<Item = std::result::Result<Event, Infallible>>>, StatusCode> {
    let (tx, rx) = mpsc::unbounded_channel::<String>();
    let connection = Connection::new(tx);
    let connection_id = connection.id.clone();
    if !state.broker.try_register(connection) {
        warn!("refusing fallback stream");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    let guard = SessionGuard {
        broker: state.broker.clone(),
        connection_id: connection_id.clone(),
    };

    let session = stream::once(async move {
        Ok::<_, Infallible>(Event::default().event(SESSION_EVENT).data(connection_id))
    });
    let updates = stream::unfold((rx, guard), |(mut rx, guard)| async move {
        let text = rx.recv().await?;
        Some((Ok(Event::default().data(text)), (rx, guard)))
    });

    Ok(Sse::new(session.chain(updates)).keep_alive(KeepAlive::new().interval(state.keep_alive)))
}

async fn send_message(
    State(state): State<FallbackState>,
    Path(connection_id): Path<ConnectionId>,
    body: String,
) -> StatusCode {
    if !state.broker.registry().contains(&connection_id) {
        return StatusCode::NOT_FOUND;
    }
    dispatch(&state.broker, &connection_id, &body);
    StatusCode::ACCEPTED
}

async fn notify(
    State(state): State<FallbackState>,
    Json(message): Json<ClientMessage>,
) -> std::result::Result<Json<NotifyResponse>, StatusCode> {
    let (faculty_id, update) = match Command::from(message) {
        Command::Broadcast { faculty_id, update } => (faculty_id, update),
        Command::Subscribe { .. } => return Err(StatusCode::BAD_REQUEST),
    };
    info!(faculty_id = %faculty_id, kind = update.kind(), "internal notification");
    let delivered = state.broker.broadcast(&faculty_id, update);
    Ok(Json(NotifyResponse { delivered }))
}
