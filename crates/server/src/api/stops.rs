use crate::{
    dto::{ErrorBody, StopDto, StopGroupDto},
    state::AppState,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

pub async fn stops(State(state): State<Arc<AppState>>) -> Response {
    let Some(generation) = state.generation().await else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            ErrorBody::json("Static schedule is not loaded."),
        )
            .into_response();
    };

    let stops: Vec<_> = generation.schedule.stops.iter().map(StopDto::from).collect();
    Json(stops).into_response()
}

pub async fn stop_groups(State(state): State<Arc<AppState>>) -> Response {
    let Some(generation) = state.generation().await else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            ErrorBody::json("Static schedule is not loaded."),
        )
            .into_response();
    };

    let groups: Vec<_> = generation.groups.iter().map(StopGroupDto::from).collect();
    Json(groups).into_response()
}
