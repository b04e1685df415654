use gtfs_rt::FeedMessage;
use prost::Message;
use serde::Serialize;
use thiserror::Error;

// The raw feed types, for callers that poke at messages directly.
pub use gtfs_rt;
pub use prost;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Feed decode error: {0}")]
    Decode(#[from] prost::DecodeError),
}

/// Rough vehicle category, derived from the route number alone:
/// routes numbered up to 35 run as trams on this network, everything
/// else as a bus. An approximation of the operator's numbering
/// convention, not a general rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Tram,
    Bus,
}

impl VehicleKind {
    pub fn from_route_id(route_id: &str) -> Self {
        match route_id.trim().parse::<i64>() {
            Ok(number) if number <= 35 => Self::Tram,
            _ => Self::Bus,
        }
    }
}

/// One live vehicle, normalized off the wire. Not persisted anywhere;
/// the snapshot it belongs to is superseded wholesale on every poll.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Option<String>,
    pub label: Option<String>,
    pub route_id: Option<String>,
    pub trip_id: Option<String>,
    pub latitude: f32,
    pub longitude: f32,
    pub bearing: Option<f32>,
    pub speed: Option<f32>,
    pub timestamp: Option<u64>,
    #[serde(rename = "type")]
    pub kind: Option<VehicleKind>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VehicleSnapshot {
    /// The feed header's timestamp; some feeds omit it.
    pub updated: Option<u64>,
    pub vehicles: Vec<Vehicle>,
}

pub fn decode_snapshot(bytes: &[u8]) -> Result<VehicleSnapshot, self::Error> {
    let feed = FeedMessage::decode(bytes)?;
    Ok(snapshot_from_feed(feed))
}

/// Normalizes a decoded feed message. Entities without a vehicle or
/// without a position are skipped; the rest of the batch goes through.
/// The vehicle id falls back to the entity id when the descriptor
/// carries none.
pub fn snapshot_from_feed(feed: FeedMessage) -> VehicleSnapshot {
    let updated = feed.header.timestamp;

    let mut vehicles = Vec::with_capacity(feed.entity.len());
    for entity in feed.entity {
        let Some(vehicle) = entity.vehicle else {
            continue;
        };
        let Some(position) = vehicle.position else {
            continue;
        };

        let route_id = vehicle.trip.as_ref().and_then(|trip| trip.route_id.clone());
        let trip_id = vehicle.trip.as_ref().and_then(|trip| trip.trip_id.clone());
        let kind = route_id.as_deref().map(VehicleKind::from_route_id);

        let id = vehicle
            .vehicle
            .as_ref()
            .and_then(|descriptor| descriptor.id.clone())
            .or(Some(entity.id));
        let label = vehicle
            .vehicle
            .as_ref()
            .and_then(|descriptor| descriptor.label.clone());

        vehicles.push(Vehicle {
            id,
            label,
            route_id,
            trip_id,
            latitude: position.latitude,
            longitude: position.longitude,
            bearing: position.bearing,
            speed: position.speed,
            timestamp: vehicle.timestamp,
            kind,
        });
    }

    VehicleSnapshot { updated, vehicles }
}
