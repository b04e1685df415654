use polazak::schedule::UpcomingDeparture;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopDeparturesDto {
    pub stop_id: String,
    pub stop_name: String,
    pub departures: Vec<DepartureDto>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureDto {
    pub route_id: String,
    pub trip_id: String,
    pub headsign: String,
    pub time: String,
    pub eta_minutes: u32,
}

impl DepartureDto {
    pub fn from(departure: &UpcomingDeparture) -> Self {
        Self {
            route_id: departure.route_id.to_string(),
            trip_id: departure.trip_id.to_string(),
            headsign: departure.headsign.to_string(),
            time: departure.arrival.to_clock_string(),
            eta_minutes: departure.eta_minutes,
        }
    }
}
