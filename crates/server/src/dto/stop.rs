use polazak::{cluster::StopGroup, schedule::Stop};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct StopDto {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl StopDto {
    pub fn from(stop: &Stop) -> Self {
        Self {
            id: stop.id.to_string(),
            name: stop.name.to_string(),
            lat: stop.coordinate.latitude,
            lon: stop.coordinate.longitude,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopGroupDto {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub stop_ids: Vec<String>,
}

impl StopGroupDto {
    pub fn from(group: &StopGroup) -> Self {
        Self {
            id: group.id.to_string(),
            name: group.name.to_string(),
            lat: group.centroid.latitude,
            lon: group.centroid.longitude,
            stop_ids: group.stop_ids.iter().map(|id| id.to_string()).collect(),
        }
    }
}
