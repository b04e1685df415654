use crate::{
    dto::{ErrorBody, TimetableDto},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

pub async fn timetable(
    Path(trip_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Some(generation) = state.generation().await else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            ErrorBody::json("Static schedule is not loaded."),
        )
            .into_response();
    };

    match generation.schedule.timetable(&trip_id) {
        Some(timetable) => Json(TimetableDto::from(&timetable)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            ErrorBody::json("No timetable for the given trip id."),
        )
            .into_response(),
    }
}
