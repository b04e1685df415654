mod api;
mod dto;
mod ingest;
mod state;

use crate::{ingest::Ingestor, state::AppState};
use axum::routing::get;
use polazak::{gtfs::Gtfs, schedule::Schedule};
use std::{path::PathBuf, sync::Arc, time::Instant};
use tracing::{error, info};

const DEFAULT_PORT: u16 = 3000;
const FEED_URL: &str = "https://www.zet.hr/gtfs-rt-protobuf";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let args: Vec<_> = std::env::args().collect();
    if args.len() < 2 {
        error!("Missing schedule bundle (zip or directory)");
        std::process::exit(1);
    }
    let path = PathBuf::from(&args[1]);

    let feed_url = std::env::var("FEED_URL").unwrap_or_else(|_| FEED_URL.to_string());
    let state = Arc::new(AppState::new(Ingestor::new(feed_url)));

    info!("Loading schedule...");
    let now = Instant::now();
    let gtfs = if path.is_dir() {
        Gtfs::new().from_dir(path)
    } else {
        Gtfs::new().from_zip(path)
    };
    match Schedule::new().with_gtfs(gtfs) {
        Ok(schedule) => {
            state.install_schedule(schedule).await;
            info!("Loading schedule took {:?}", now.elapsed());
        }
        // Keep serving; schedule queries answer 503 until a bundle
        // loads, vehicles keep flowing either way.
        Err(err) => error!("Failed to load schedule, serving degraded: {err}"),
    }

    tokio::spawn(ingest::run(state.clone()));

    let app = axum::Router::new()
        .route("/api/timetable/{trip_id}", get(api::timetable))
        .route("/api/stops", get(api::stops))
        .route("/api/stop-groups", get(api::stop_groups))
        .route("/api/stop-departures/{stop_id}", get(api::stop_departures))
        .route("/api/vehicles", get(api::vehicles))
        .route("/api/vehicles/ws", get(api::vehicles_ws))
        .with_state(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|val| val.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .unwrap();
    info!("Listening to port {port}");
    axum::serve(listener, app).await.unwrap();
}
