use crate::{dto::ErrorBody, state::AppState};
use axum::{
    Json,
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use polazak::realtime::VehicleSnapshot;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error};

/// Pull endpoint for consumers without a socket. Serves the held
/// snapshot; only the very first call before the poller has delivered
/// anything fetches synchronously.
pub async fn vehicles(State(state): State<Arc<AppState>>) -> Response {
    if let Some(snapshot) = state.last_snapshot().await {
        return Json(snapshot.as_ref()).into_response();
    }

    match state.ingestor.fetch().await {
        Ok(snapshot) => {
            let snapshot = Arc::new(snapshot);
            state.store_snapshot(snapshot.clone()).await;
            Json(snapshot.as_ref()).into_response()
        }
        Err(err) => {
            error!("Vehicle fetch failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::json("Could not fetch vehicle positions."),
            )
                .into_response()
        }
    }
}

pub async fn vehicles_ws(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// One task per subscriber; a slow or dead socket only ever stalls
/// itself. New subscribers get the last snapshot right away instead of
/// waiting out the poll interval.
async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    // Subscribe before replaying so a snapshot landing in between is
    // not lost.
    let mut updates = state.updates.subscribe();

    if let Some(snapshot) = state.last_snapshot().await
        && send_snapshot(&mut socket, &snapshot).await.is_err()
    {
        return;
    }

    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Ok(snapshot) => {
                    if send_snapshot(&mut socket, &snapshot).await.is_err() {
                        break;
                    }
                }
                // Fell behind the fanout; fresh snapshots supersede
                // missed ones wholesale, so just catch up.
                Err(RecvError::Lagged(skipped)) => {
                    debug!("Subscriber lagged {skipped} snapshots");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                // Nothing to read from clients; drain and move on.
                Some(Ok(_)) => {}
                _ => break,
            },
        }
    }
}

async fn send_snapshot(socket: &mut WebSocket, snapshot: &VehicleSnapshot) -> Result<(), ()> {
    let payload = serde_json::to_string(snapshot).map_err(|err| {
        error!("Failed to serialize snapshot: {err}");
    })?;
    socket
        .send(Message::Text(payload.into()))
        .await
        .map_err(|_| ())
}
