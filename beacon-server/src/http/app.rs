use crate::http::StaticFiles;
use crate::signaling::{RelayHandle, ws_upgrade};
use axum::extract::{FromRequestParts, Request, State, WebSocketUpgrade};
use axum::http::Uri;
use axum::response::Response;
use axum::routing::get;

#[derive(Clone)]
pub struct AppState {
    pub relay: RelayHandle,
    pub files: StaticFiles,
}

/// The signaling socket and the static files share one listener.
///
/// `/` upgrades to a WebSocket when asked to and serves the index document
/// otherwise; `/ws` is always the socket.
pub fn app(relay: RelayHandle, files: StaticFiles) -> axum::Router {
    axum::Router::new()
        .route("/", get(root))
        .route("/ws", get(ws_route))
        .fallback(static_file)
        .with_state(AppState { relay, files })
}

async fn root(State(state): State<AppState>, request: Request) -> Response {
    let (mut parts, _body) = request.into_parts();

    match WebSocketUpgrade::from_request_parts(&mut parts, &state).await {
        Ok(ws) => ws_upgrade(ws, state.relay),
        Err(_) => state.files.serve("/").await,
    }
}

async fn ws_route(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws_upgrade(ws, state.relay)
}

async fn static_file(State(state): State<AppState>, uri: Uri) -> Response {
    state.files.serve(uri.path()).await
}
