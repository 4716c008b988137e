use crate::signaling::RelayHandle;
use beacon_core::{ClientMessage, ServerMessage};
use axum::extract::ws::{Message, WebSocket};
use axum::extract::WebSocketUpgrade;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub fn ws_upgrade(ws: WebSocketUpgrade, relay: RelayHandle) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, relay))
}

pub async fn handle_socket(socket: WebSocket, relay: RelayHandle) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    let client_id = match relay.connect(tx).await {
        Ok(id) => id,
        Err(e) => {
            error!("Rejecting WebSocket connection: {}", e);
            return;
        }
    };
    info!("New WebSocket connection: {}", client_id);

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let json = match msg.encode() {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize {} frame: {}", msg.kind(), e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let relay = relay.clone();
        let client_id = client_id.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                let text = match msg {
                    Message::Text(text) => text.to_string(),
                    Message::Binary(data) => match String::from_utf8(data.to_vec()) {
                        Ok(text) => text,
                        Err(_) => {
                            warn!("Non UTF-8 binary frame from {}", client_id);
                            continue;
                        }
                    },
                    Message::Close(_) => break,
                    _ => continue,
                };

                match ClientMessage::decode(&text) {
                    Ok(frame) => {
                        if let Err(e) = relay.dispatch(client_id.clone(), frame).await {
                            error!("Relay died: {}", e);
                            break;
                        }
                    }
                    Err(e) => warn!("Invalid message from {}: {}", client_id, e),
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    if let Err(e) = relay.disconnect(client_id.clone()).await {
        warn!("Could not release {}: {}", client_id, e);
    }
    info!("WebSocket disconnected: {}", client_id);
}
