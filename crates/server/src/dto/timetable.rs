use polazak::schedule::Timetable;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableDto {
    pub trip_id: String,
    pub stops: Vec<TimetableStopDto>,
    pub path: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableStopDto {
    pub stop_id: String,
    pub stop_name: String,
    pub arrival: String,
    pub departure: String,
}

impl TimetableDto {
    pub fn from(timetable: &Timetable) -> Self {
        let stops = timetable
            .stops
            .iter()
            .map(|stop| TimetableStopDto {
                stop_id: stop.stop_id.to_string(),
                stop_name: stop.stop_name.to_string(),
                arrival: stop.arrival.to_string(),
                departure: stop.departure.to_string(),
            })
            .collect();
        let path = timetable
            .path
            .iter()
            .map(|coordinate| [coordinate.latitude, coordinate.longitude])
            .collect();
        Self {
            trip_id: timetable.trip_id.to_string(),
            stops,
            path,
        }
    }
}
