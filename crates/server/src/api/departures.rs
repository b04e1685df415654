use crate::{
    dto::{DepartureDto, ErrorBody, StopDeparturesDto},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use polazak::shared::time::ServiceDay;
use std::sync::Arc;

pub async fn stop_departures(
    Path(stop_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Some(generation) = state.generation().await else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            ErrorBody::json("Static schedule is not loaded."),
        )
            .into_response();
    };
    let schedule = &generation.schedule;

    let day = ServiceDay::now();
    let Some(departures) = schedule.upcoming_departures(&stop_id, &day) else {
        return (StatusCode::NOT_FOUND, ErrorBody::json("Unknown stop.")).into_response();
    };

    // The stop resolved above, so the lookup cannot miss here.
    let stop_name = schedule
        .stop_by_id(&stop_id)
        .map(|stop| stop.name.to_string())
        .unwrap_or_default();

    Json(StopDeparturesDto {
        stop_id,
        stop_name,
        departures: departures.iter().map(DepartureDto::from).collect(),
    })
    .into_response()
}
