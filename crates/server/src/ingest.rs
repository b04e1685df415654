use polazak::realtime::{self, VehicleSnapshot};
use std::{fmt::Display, sync::Arc, time::Duration};
use tracing::{debug, error};

use crate::state::AppState;

/// Fixed poll cadence. No backoff and no jitter: a failed cycle logs,
/// keeps the last good snapshot and waits for the next tick.
const POLL_INTERVAL: Duration = Duration::from_secs(10);
/// Upstream fetches are bounded so a hung feed can never pile up
/// cycles or wedge the lazy fetch on the pull endpoint.
const FETCH_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug)]
pub enum FetchError {
    Request(reqwest::Error),
    Status(reqwest::StatusCode),
    Decode(realtime::Error),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Request(err) => write!(f, "request failed: {err}"),
            FetchError::Status(status) => write!(f, "feed answered {status}"),
            FetchError::Decode(err) => write!(f, "{err}"),
        }
    }
}

pub struct Ingestor {
    client: reqwest::Client,
    url: String,
}

impl Ingestor {
    pub fn new(url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("failed to build the feed http client");
        Self { client, url }
    }

    pub async fn fetch(&self) -> Result<VehicleSnapshot, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(FetchError::Request)?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body = response.bytes().await.map_err(FetchError::Request)?;
        realtime::decode_snapshot(&body).map_err(FetchError::Decode)
    }
}

/// The poll loop. Runs on its own task forever, fully decoupled from
/// request serving; the first tick fires immediately.
pub async fn run(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(POLL_INTERVAL);
    loop {
        interval.tick().await;
        match state.ingestor.fetch().await {
            Ok(snapshot) => {
                debug!("Feed poll: {} vehicles", snapshot.vehicles.len());
                state.store_snapshot(Arc::new(snapshot)).await;
            }
            Err(err) => error!("Feed poll failed, keeping last snapshot: {err}"),
        }
    }
}
