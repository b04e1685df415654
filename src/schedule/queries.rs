use std::sync::Arc;

use crate::shared::{
    geo::Coordinate,
    time::{ServiceDay, Time},
};

use super::Schedule;

/// Upcoming departures per stop are capped here; the presentation
/// layer never pages past the cap.
const DEPARTURES_CAP: usize = 5;

/// One row of a resolved trip timetable, clock strings as loaded.
#[derive(Debug, Clone)]
pub struct TimetableStop {
    pub stop_id: Arc<str>,
    pub stop_name: Arc<str>,
    pub arrival: Arc<str>,
    pub departure: Arc<str>,
}

#[derive(Debug, Clone)]
pub struct Timetable {
    pub trip_id: Arc<str>,
    pub stops: Vec<TimetableStop>,
    /// Coordinates of the known stops along the trip, traversal order.
    /// Never longer than `stops`.
    pub path: Vec<Coordinate>,
}

#[derive(Debug, Clone)]
pub struct UpcomingDeparture {
    pub route_id: Arc<str>,
    pub trip_id: Arc<str>,
    pub headsign: Arc<str>,
    pub arrival: Time,
    pub eta_minutes: u32,
}

impl Schedule {
    /// Resolves a trip's timetable and path. None when the trip has no
    /// stop time rows. A row whose stop is missing from the stop table
    /// keeps its place in the timetable with the raw id standing in
    /// for the name, but contributes nothing to the path; neither do
    /// stops whose coordinates are zeroed out.
    pub fn timetable(&self, trip_id: &str) -> Option<Timetable> {
        let rows = self.stop_times_by_trip_id(trip_id)?;

        let mut stops = Vec::with_capacity(rows.len());
        let mut path = Vec::new();
        for row in &rows {
            let stop = self.stop_by_id(&row.stop_id);
            let stop_name = match stop {
                Some(stop) => stop.name.clone(),
                None => row.stop_id.clone(),
            };
            if let Some(stop) = stop
                && !stop.coordinate.is_zero()
            {
                path.push(stop.coordinate);
            }
            stops.push(TimetableStop {
                stop_id: row.stop_id.clone(),
                stop_name,
                arrival: row.arrival.clone(),
                departure: row.departure.clone(),
            });
        }

        Some(Timetable {
            trip_id: rows[0].trip_id.clone(),
            stops,
            path,
        })
    }

    /// The next departures from a stop, for the given service day.
    /// None when the stop id is unknown. Rows whose service is not
    /// active on the day, or that already left, are skipped; at most
    /// five survive, ascending by arrival. Departures of the next
    /// calendar day are never pulled in.
    pub fn upcoming_departures(
        &self,
        stop_id: &str,
        day: &ServiceDay,
    ) -> Option<Vec<UpcomingDeparture>> {
        self.stop_by_id(stop_id)?;

        let mut departures = Vec::new();
        for row in self.departures_from_stop(stop_id) {
            if row.arrival < day.now {
                continue;
            }
            if !self.service_active_on(&row.service_id, day.date, day.weekday) {
                continue;
            }
            departures.push(UpcomingDeparture {
                route_id: row.route_id.clone(),
                trip_id: row.trip_id.clone(),
                headsign: row.headsign.clone(),
                arrival: row.arrival,
                eta_minutes: (row.arrival - day.now).as_rounded_minutes(),
            });
            if departures.len() == DEPARTURES_CAP {
                break;
            }
        }
        Some(departures)
    }
}
