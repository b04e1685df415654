use std::{collections::HashMap, sync::Arc};

mod calendar;
mod models;
mod queries;
pub use models::*;
pub use queries::*;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    gtfs::{self, models::GtfsStopTime},
    shared::time::Time,
};

type IdToIndex = HashMap<Arc<str>, usize>;
type IdToIndexes = HashMap<Arc<str>, Box<[usize]>>;

/// One load generation of the static schedule: every table indexed,
/// then frozen. A reload builds a fresh instance off to the side and
/// swaps the reference; nothing in here mutates after `with_gtfs`.
#[derive(Debug, Default)]
pub struct Schedule {
    pub stops: Box<[Stop]>,
    pub trips: Box<[Trip]>,
    pub stop_times: Box<[StopTime]>,

    stop_lookup: IdToIndex,
    trip_lookup: IdToIndex,
    trip_to_stop_times: IdToIndexes,
    stop_to_departures: HashMap<Arc<str>, Box<[Departure]>>,
    calendar_by_service: HashMap<Arc<str>, Calendar>,
    exceptions_by_service: HashMap<Arc<str>, Box<[CalendarException]>>,
}

impl Schedule {
    pub fn new() -> Self {
        Default::default()
    }

    /// Streams the bundle's tables into the snapshot. A missing
    /// mandatory table errors out and leaves the previous generation
    /// (held by the caller) in place; `calendar_dates` alone is
    /// optional. Depending on the size of the bundle this can be a
    /// long blocking function.
    pub fn with_gtfs(mut self, gtfs: gtfs::Gtfs) -> Result<Self, gtfs::Error> {
        // Build stop data set
        let mut stop_lookup: IdToIndex = HashMap::new();
        let mut stops: Vec<Stop> = Vec::new();
        gtfs.stream_stops(|(i, stop)| {
            let mut value: Stop = stop.into();
            value.index = i as u32;
            stop_lookup.insert(value.id.clone(), i);
            stops.push(value);
        })?;
        self.stops = stops.into();
        self.stop_lookup = stop_lookup;
        debug!("Loaded {} stops", self.stops.len());

        // Build trip data set
        let mut trip_lookup: IdToIndex = HashMap::new();
        let mut trips: Vec<Trip> = Vec::new();
        gtfs.stream_trips(|(i, trip)| {
            let mut value: Trip = trip.into();
            value.index = i as u32;
            trip_lookup.insert(value.id.clone(), i);
            trips.push(value);
        })?;
        self.trips = trips.into();
        self.trip_lookup = trip_lookup;
        debug!("Loaded {} trips", self.trips.len());

        // Build base calendar data set
        let mut calendar_by_service: HashMap<Arc<str>, Calendar> = HashMap::new();
        gtfs.stream_calendar(|(_, row)| {
            let value: Calendar = row.into();
            calendar_by_service.insert(value.service_id.clone(), value);
        })?;
        self.calendar_by_service = calendar_by_service;
        debug!("Loaded {} service calendars", self.calendar_by_service.len());

        // Build exception data set. Source order is kept per service:
        // for duplicate dates the last row in the file wins.
        let mut exceptions: HashMap<Arc<str>, Vec<CalendarException>> = HashMap::new();
        gtfs.stream_calendar_dates(|(_, row)| {
            let kind = match row.exception_type {
                1 => ExceptionKind::Added,
                2 => ExceptionKind::Removed,
                _ => return,
            };
            exceptions
                .entry(row.service_id.as_str().into())
                .or_default()
                .push(CalendarException {
                    date: row.date,
                    kind,
                });
        })?;
        self.exceptions_by_service = exceptions
            .into_iter()
            .map(|(key, value)| (key, value.into()))
            .collect();
        debug!(
            "Loaded exceptions for {} services",
            self.exceptions_by_service.len()
        );

        // Build stop_time data set. Rows whose trip never made it into
        // trips still resolve timetables by their raw trip id, but they
        // carry no service, so they produce no departure rows.
        let mut stop_times: Vec<StopTime> = Vec::new();
        let mut trip_to_stop_times: HashMap<Arc<str>, Vec<usize>> = HashMap::new();
        let mut stop_to_departures: HashMap<Arc<str>, Vec<Departure>> = HashMap::new();
        gtfs.stream_stop_times(|(_, row)| {
            let GtfsStopTime {
                trip_id,
                arrival_time,
                departure_time,
                stop_id,
                stop_sequence,
            } = row;
            let (arrival, departure) = match (arrival_time, departure_time) {
                (Some(arrival), Some(departure)) => (arrival, departure),
                (Some(arrival), None) => (arrival.clone(), arrival),
                (None, Some(departure)) => (departure.clone(), departure),
                (None, None) => return,
            };

            let trip = self
                .trip_lookup
                .get(trip_id.as_str())
                .map(|index| &self.trips[*index]);
            let trip_id: Arc<str> = match trip {
                Some(trip) => trip.id.clone(),
                None => trip_id.into(),
            };
            let stop_id: Arc<str> = match self.stop_lookup.get(stop_id.as_str()) {
                Some(index) => self.stops[*index].id.clone(),
                None => stop_id.into(),
            };

            let value = StopTime {
                trip_id: trip_id.clone(),
                stop_id: stop_id.clone(),
                sequence: stop_sequence,
                arrival: arrival.into(),
                departure: departure.into(),
            };

            if let Some(trip) = trip
                && let Some(arrival) = Time::from_clock(&value.arrival)
            {
                stop_to_departures
                    .entry(stop_id)
                    .or_default()
                    .push(Departure {
                        route_id: trip.route_id.clone(),
                        trip_id: trip.id.clone(),
                        service_id: trip.service_id.clone(),
                        headsign: trip.headsign.clone(),
                        arrival,
                    });
            }

            trip_to_stop_times
                .entry(trip_id)
                .or_default()
                .push(stop_times.len());
            stop_times.push(value);
        })?;
        self.stop_times = stop_times.into();

        // Per trip by sequence, stable so equal sequences keep their
        // row order; per stop by arrival.
        trip_to_stop_times.par_iter_mut().for_each(|(_, indexes)| {
            indexes.sort_by_key(|index| self.stop_times[*index].sequence);
        });
        self.trip_to_stop_times = trip_to_stop_times
            .into_iter()
            .map(|(key, value)| (key, value.into()))
            .collect();

        stop_to_departures.par_iter_mut().for_each(|(_, rows)| {
            rows.sort_by_key(|row| row.arrival);
        });
        self.stop_to_departures = stop_to_departures
            .into_iter()
            .map(|(key, value)| (key, value.into()))
            .collect();

        info!(
            "Schedule loaded: {} stops, {} trips, {} services, {} stop times",
            self.stops.len(),
            self.trips.len(),
            self.calendar_by_service.len(),
            self.stop_times.len()
        );
        Ok(self)
    }

    /// Get a stop with the given id.
    /// If no stop is found with the given id None is returned.
    pub fn stop_by_id(&self, id: &str) -> Option<&Stop> {
        let stop_index = self.stop_lookup.get(id)?;
        Some(&self.stops[*stop_index])
    }

    /// Gets a trip with the given id.
    /// If no trip with the given id was found None is returned.
    pub fn trip_by_id(&self, id: &str) -> Option<&Trip> {
        let trip_index = self.trip_lookup.get(id)?;
        Some(&self.trips[*trip_index])
    }

    /// Returns all the stop times for a given trip in traversal order.
    /// None when the trip has no stop time rows at all.
    pub fn stop_times_by_trip_id(&self, trip_id: &str) -> Option<Vec<&StopTime>> {
        let stop_times = self.trip_to_stop_times.get(trip_id)?;
        Some(stop_times.iter().map(|i| &self.stop_times[*i]).collect())
    }

    /// The stop's departure rows, sorted by arrival. Empty for a stop
    /// without any scheduled calls.
    pub fn departures_from_stop(&self, stop_id: &str) -> &[Departure] {
        self.stop_to_departures
            .get(stop_id)
            .map(|rows| rows.as_ref())
            .unwrap_or_default()
    }
}
