use serde::{Deserialize, Serialize};

// Rows deserialize by header name, so the bundle can order
// its columns freely and carry extras we never look at.

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GtfsStop {
    pub stop_id: String,
    pub stop_name: String,
    pub stop_lat: Option<f64>,
    pub stop_lon: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GtfsTrip {
    pub route_id: String,
    pub service_id: String,
    pub trip_id: String,
    pub trip_headsign: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GtfsCalendar {
    pub service_id: String,
    pub monday: u8,
    pub tuesday: u8,
    pub wednesday: u8,
    pub thursday: u8,
    pub friday: u8,
    pub saturday: u8,
    pub sunday: u8,
    pub start_date: u32,
    pub end_date: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GtfsCalendarDate {
    pub service_id: String,
    pub date: u32,
    pub exception_type: u8,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GtfsStopTime {
    pub trip_id: String,
    pub arrival_time: Option<String>,
    pub departure_time: Option<String>,
    pub stop_id: String,
    pub stop_sequence: u32,
}
