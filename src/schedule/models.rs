use std::sync::Arc;

use crate::{
    gtfs::models::{GtfsCalendar, GtfsStop, GtfsTrip},
    shared::{geo::Coordinate, time::Time},
};

#[derive(Debug, Default, Clone)]
pub struct Stop {
    pub index: u32,
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub coordinate: Coordinate,
}

impl From<GtfsStop> for Stop {
    fn from(value: GtfsStop) -> Self {
        Self {
            index: 0,
            id: value.stop_id.into(),
            name: value.stop_name.into(),
            coordinate: Coordinate {
                latitude: value.stop_lat.unwrap_or_default(),
                longitude: value.stop_lon.unwrap_or_default(),
            },
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Trip {
    pub index: u32,
    pub id: Arc<str>,
    pub route_id: Arc<str>,
    pub service_id: Arc<str>,
    pub headsign: Arc<str>,
}

impl From<GtfsTrip> for Trip {
    fn from(value: GtfsTrip) -> Self {
        Self {
            index: 0,
            id: value.trip_id.into(),
            route_id: value.route_id.into(),
            service_id: value.service_id.into(),
            headsign: value.trip_headsign.unwrap_or_default().into(),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Calendar {
    pub service_id: Arc<str>,
    /// Monday first.
    pub weekdays: [bool; 7],
    pub start_date: u32,
    pub end_date: u32,
}

impl From<GtfsCalendar> for Calendar {
    fn from(value: GtfsCalendar) -> Self {
        Self {
            service_id: value.service_id.into(),
            weekdays: [
                value.monday == 1,
                value.tuesday == 1,
                value.wednesday == 1,
                value.thursday == 1,
                value.friday == 1,
                value.saturday == 1,
                value.sunday == 1,
            ],
            start_date: value.start_date,
            end_date: value.end_date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionKind {
    Added,
    Removed,
}

/// A dated override of the base calendar for one service.
#[derive(Debug, Clone)]
pub struct CalendarException {
    pub date: u32,
    pub kind: ExceptionKind,
}

/// One scheduled call of a trip at a stop. The raw clock strings stay
/// as loaded; when the bundle carries only one of the two, the other
/// falls back to it.
#[derive(Debug, Default, Clone)]
pub struct StopTime {
    pub trip_id: Arc<str>,
    pub stop_id: Arc<str>,
    pub sequence: u32,
    pub arrival: Arc<str>,
    pub departure: Arc<str>,
}

/// Pre-resolved departure row for the per-stop index,
/// kept sorted by arrival.
#[derive(Debug, Clone)]
pub struct Departure {
    pub route_id: Arc<str>,
    pub trip_id: Arc<str>,
    pub service_id: Arc<str>,
    pub headsign: Arc<str>,
    pub arrival: Time,
}
