use crate::error::ClientError;
use crate::events::EventBus;
use crate::reconnect::{ConnectionState, ReconnectPolicy, ReconnectState};
use beacon_core::{
    ClientId, ClientMessage, IceServerConfig, MessageKind, Relay, RoomId, ServerMessage,
};
use futures::{SinkExt, StreamExt};
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::{Mutex, RwLock, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

struct ClientInner {
    url: String,
    policy: ReconnectPolicy,
    outbound: Mutex<Option<mpsc::UnboundedSender<String>>>,
    client_id: RwLock<Option<ClientId>>,
    room_id: RwLock<Option<RoomId>>,
    ice_servers: RwLock<Vec<IceServerConfig>>,
    events: EventBus,
    state: watch::Sender<ConnectionState>,
    shutdown: watch::Sender<bool>,
}

/// Browser-side half of the signaling protocol.
///
/// Cloning is cheap; all clones share one connection. Server frames reach the
/// application through [`SignalingClient::subscribe`].
#[derive(Clone)]
pub struct SignalingClient {
    inner: Arc<ClientInner>,
}

impl SignalingClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_policy(url, ReconnectPolicy::default())
    }

    pub fn with_policy(url: impl Into<String>, policy: ReconnectPolicy) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        let (shutdown, _) = watch::channel(false);

        Self {
            inner: Arc::new(ClientInner {
                url: url.into(),
                policy,
                outbound: Mutex::new(None),
                client_id: RwLock::new(None),
                room_id: RwLock::new(None),
                ice_servers: RwLock::new(Vec::new()),
                events: EventBus::new(),
                state,
                shutdown,
            }),
        }
    }

    /// Spawns the connection loop. It keeps reconnecting per the policy until
    /// it gives up or [`SignalingClient::shutdown`] is called.
    pub fn start(&self) -> JoinHandle<()> {
        tokio::spawn(run(Arc::clone(&self.inner)))
    }

    pub fn shutdown(&self) {
        self.inner.shutdown.send_replace(true);
    }

    pub fn state(&self) -> watch::Receiver<ConnectionState> {
        self.inner.state.subscribe()
    }

    pub async fn subscribe(&self, kind: MessageKind) -> mpsc::UnboundedReceiver<ServerMessage> {
        self.inner.events.subscribe(kind).await
    }

    pub async fn client_id(&self) -> Option<ClientId> {
        self.inner.client_id.read().await.clone()
    }

    pub async fn room_id(&self) -> Option<RoomId> {
        self.inner.room_id.read().await.clone()
    }

    pub async fn ice_servers(&self) -> Vec<IceServerConfig> {
        self.inner.ice_servers.read().await.clone()
    }

    pub async fn create_room(&self, room_id: Option<RoomId>) -> Result<(), ClientError> {
        self.send(ClientMessage::CreateRoom { room_id }).await
    }

    pub async fn join_room(&self, room_id: RoomId) -> Result<(), ClientError> {
        self.send(ClientMessage::JoinRoom { room_id }).await
    }

    pub async fn leave_room(&self) -> Result<(), ClientError> {
        self.send(ClientMessage::LeaveRoom).await
    }

    pub async fn send_signal(&self, to: ClientId, signal: Value) -> Result<(), ClientError> {
        self.send(ClientMessage::Signal(relay(to, "signal", signal)))
            .await
    }

    pub async fn send_offer(&self, to: ClientId, offer: Value) -> Result<(), ClientError> {
        self.send(ClientMessage::Offer(relay(to, "offer", offer)))
            .await
    }

    pub async fn send_answer(&self, to: ClientId, answer: Value) -> Result<(), ClientError> {
        self.send(ClientMessage::Answer(relay(to, "answer", answer)))
            .await
    }

    pub async fn send_ice_candidate(
        &self,
        to: ClientId,
        candidate: Value,
    ) -> Result<(), ClientError> {
        self.send(ClientMessage::IceCandidate(relay(to, "candidate", candidate)))
            .await
    }

    /// Queues a frame on the live socket. Nothing is buffered across reconnects.
    pub async fn send(&self, msg: ClientMessage) -> Result<(), ClientError> {
        let text = msg.encode()?;

        let outbound = self.inner.outbound.lock().await;
        let Some(tx) = outbound.as_ref() else {
            return Err(ClientError::NotConnected);
        };
        tx.send(text).map_err(|_| ClientError::NotConnected)
    }
}

fn relay(to: ClientId, field: &str, value: Value) -> Relay {
    let mut payload = Map::new();
    payload.insert(field.to_string(), value);
    Relay { to, payload }
}

async fn run(inner: Arc<ClientInner>) {
    let mut shutdown = inner.shutdown.subscribe();
    let mut reconnect = ReconnectState::new(inner.policy);

    loop {
        if *shutdown.borrow() {
            break;
        }

        inner.state.send_replace(ConnectionState::Connecting);
        match connect_async(inner.url.as_str()).await {
            Ok((stream, _)) => {
                info!("Connected to signaling server {}", inner.url);
                inner.state.send_replace(reconnect.on_connected());
                inner.session(stream, &mut shutdown).await;
                info!("Disconnected from signaling server");
            }
            Err(e) => warn!("Failed to connect to signaling server {}: {}", inner.url, e),
        }
        inner.reset().await;

        if *shutdown.borrow() {
            break;
        }

        match reconnect.on_closed() {
            ConnectionState::Reconnecting { attempt, delay } => {
                inner
                    .state
                    .send_replace(ConnectionState::Reconnecting { attempt, delay });
                info!("Reconnection attempt {} in {:?}", attempt, delay);

                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = shutdown.changed() => {}
                }
            }
            state => {
                warn!("Giving up on signaling server {}", inner.url);
                inner.state.send_replace(state);
                return;
            }
        }
    }

    inner.state.send_replace(ConnectionState::Disconnected);
}

impl ClientInner {
    async fn session(&self, stream: WsStream, shutdown: &mut watch::Receiver<bool>) {
        let (mut sink, mut stream) = stream.split();
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        *self.outbound.lock().await = Some(tx);

        loop {
            tokio::select! {
                Some(text) = rx.recv() => {
                    if let Err(e) = sink.send(Message::Text(text.into())).await {
                        warn!("Failed to send to signaling server: {}", e);
                        break;
                    }
                }
                frame = stream.next() => match frame {
                    Some(Ok(Message::Text(text))) => self.handle_text(text.as_str()).await,
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("WebSocket error: {}", e);
                        break;
                    }
                },
                _ = shutdown.changed() => {
                    let _ = sink.close().await;
                    break;
                }
            }
        }

        *self.outbound.lock().await = None;
    }

    async fn handle_text(&self, text: &str) {
        let msg = match ServerMessage::decode(text) {
            Ok(msg) => msg,
            Err(e) => {
                warn!("Undecodable frame from signaling server: {}", e);
                return;
            }
        };

        match &msg {
            ServerMessage::Connected {
                client_id,
                ice_servers,
            } => {
                debug!("Assigned client id {}", client_id);
                *self.client_id.write().await = Some(client_id.clone());
                *self.ice_servers.write().await = ice_servers.clone();
            }
            ServerMessage::RoomCreated { room_id } | ServerMessage::RoomJoined { room_id, .. } => {
                *self.room_id.write().await = Some(room_id.clone());
            }
            ServerMessage::RoomLeft { .. } | ServerMessage::HostDisconnected => {
                *self.room_id.write().await = None;
            }
            ServerMessage::Error { message } => warn!("Server error: {}", message),
            _ => {}
        }

        self.events.publish(&msg).await;
    }

    /// A new connection gets a new id and no room.
    async fn reset(&self) {
        *self.outbound.lock().await = None;
        *self.client_id.write().await = None;
        *self.room_id.write().await = None;
    }
}
