//! WebSocket transport
//!
//! Native endpoint for live updates. Responsibilities:
//! - Accept TCP connections and upgrade those addressed to the configured path
//! - Create a `Connection` per client and admit it through the `Broker`'s cap
//! - Forward the connection's outbound channel to the socket from a writer task
//! - Feed every inbound text frame to the dispatcher
//! - Unregister the connection when either the reader or the writer stops

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::spawn;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_hdr_async;
use tracing::{debug, info, warn};
use tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tungstenite::http::StatusCode;
use tungstenite::protocol::Message as WsMessage;
use tungstenite::protocol::frame::CloseFrame;
use tungstenite::protocol::frame::coding::CloseCode;

use crate::broker::Broker;
use crate::config::Settings;
use crate::connection::Connection;
use crate::transport::dispatch::dispatch;
use crate::utils::Result;

/// Binds `addr` and serves WebSocket clients until the listener fails.
pub async fn start_websocket_server(
    addr: String,
    broker: Arc<Broker>,
    settings: Settings,
) -> Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    info!("WebSocket server listening on ws://{addr}{}", settings.server.ws_path);
    serve(listener, broker, settings).await
}

/// Accept loop over an already bound listener.
pub async fn serve(listener: TcpListener, broker: Arc<Broker>, settings: Settings) -> Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;

        // cheap early refusal; admission after the handshake is authoritative
        if broker.is_full() {
            warn!(%peer, limit = settings.broker.max_connections, "connection limit reached, refusing client");
            drop(stream);
            continue;
        }

        let broker = broker.clone();
        let path = settings.server.ws_path.clone();
        tokio::spawn(async move {
            handle_connection(stream, broker, path).await;
        });
    }
}

async fn handle_connection(stream: TcpStream, broker: Arc<Broker>, path: String) {
    let check_path = |req: &Request, resp: Response| -> std::result::Result<Response, ErrorResponse> {
        if req.uri().path() == path {
            Ok(resp)
        } else {
            let mut err = ErrorResponse::new(Some(format!("no endpoint at {}", req.uri().path())));
            *err.status_mut() = StatusCode::NOT_FOUND;
            Err(err)
        }
    };

    let mut ws_stream = match accept_hdr_async(stream, check_path).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("WebSocket handshake error: {e}");
            return;
        }
    };

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let connection = Connection::new(tx);
    let connection_id = connection.id.clone();
    if !broker.try_register(connection) {
        let frame = CloseFrame {
            code: CloseCode::Again,
            reason: "connection limit reached".into(),
        };
        if let Err(e) = ws_stream.close(Some(frame)).await {
            debug!(connection = %connection_id, "failed to close refused client: {e}");
        }
        return;
    }

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    {
        let broker = broker.clone();
        let connection_id = connection_id.clone();

        spawn(async move {
            while let Some(text) = rx.recv().await {
                if let Err(e) = ws_sender.send(WsMessage::text(text)).await {
                    warn!(connection = %connection_id, "failed to write to socket: {e}");
                    break;
                }
            }

            broker.unregister(&connection_id);
            let _ = ws_sender.close().await;
            debug!(connection = %connection_id, "send loop closed");
        });
    }

    while let Some(frame) = ws_receiver.next().await {
        match frame {
            Ok(WsMessage::Text(text)) => dispatch(&broker, &connection_id, text.as_str()),
            Ok(WsMessage::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(connection = %connection_id, "read error: {e}");
                break;
            }
        }
    }

    info!(connection = %connection_id, "client disconnected");
    broker.unregister(&connection_id);
}
