//! CLI for campus-live
//!
//! Subcommands:
//! - `server`: run the WebSocket endpoint and the HTTP streaming fallback
//! - `client`: connect, subscribe to a faculty and print every update
//!   (useful for smoke tests)

use std::sync::Arc;

use campus_live::broker::Broker;
use campus_live::config::load_config;
use campus_live::transport::{start_fallback_server, start_websocket_server};
use campus_live::utils::{Result, logging};
use clap::Parser;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "campus-live")]
enum Command {
    /// Start the live updates server
    Server,
    /// Subscribe to a faculty and print the updates it receives
    Client {
        /// WebSocket endpoint to connect to
        #[arg(long, default_value = "ws://127.0.0.1:8080/ws/events")]
        url: String,
        /// Faculty to subscribe to
        #[arg(long)]
        faculty: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cmd = Command::parse();

    match cmd {
        Command::Server => {
            if let Err(e) = run_server().await {
                logging::init("info");
                error!("Server failed: {}", e);
            }
        }
        Command::Client { url, faculty } => {
            logging::init("info");
            if let Err(e) = run_client(&url, &faculty).await {
                error!("Client failed: {}", e);
            }
        }
    }
}

async fn run_server() -> Result<()> {
    let config = load_config()?;
    logging::init(&config.logging.level);

    let broker = Arc::new(Broker::new(config.broker.max_connections));
    let fallback_enabled = config.fallback.enabled;

    tokio::select! {
        res = start_websocket_server(config.websocket_addr(), broker.clone(), config.clone()) => {
            error!("WebSocket server exited unexpectedly: {:?}", res);
        }
        res = start_fallback_server(config.fallback_addr(), broker.clone(), config.clone()), if fallback_enabled => {
            error!("Fallback server exited unexpectedly: {:?}", res);
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    broker.shutdown();
    Ok(())
}

async fn run_client(url: &str, faculty: &str) -> Result<()> {
    use futures_util::{SinkExt, StreamExt};
    use serde_json::json;
    use tokio_tungstenite::connect_async;
    use tokio_tungstenite::tungstenite::Message as WsMessage;

    let (mut ws_stream, _response) = connect_async(url).await?;

    let subscribe = json!({ "type": "subscribe", "facultyId": faculty });
    ws_stream
        .send(WsMessage::Text(subscribe.to_string().into()))
        .await?;

    while let Some(msg) = ws_stream.next().await {
        match msg? {
            WsMessage::Text(text) => println!("{text}"),
            WsMessage::Close(_) => break,
            _ => {}
        }
    }

    Ok(())
}
