mod departure;
mod stop;
mod timetable;

pub use departure::*;
pub use stop::*;
pub use timetable::*;

use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn json(message: &str) -> Json<Self> {
        Json(Self {
            error: message.to_string(),
        })
    }
}
