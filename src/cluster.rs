use std::sync::Arc;

use crate::{
    schedule::Stop,
    shared::geo::{Coordinate, Distance},
};

/// Platforms that share a name within this distance of the group's
/// running centroid collapse into one group.
const GROUP_THRESHOLD: Distance = Distance::from_meters(40.0);

/// A cluster of stop records presented as one entity. The id is the
/// seeding stop's id, which is what departure lookups key off.
#[derive(Debug, Clone)]
pub struct StopGroup {
    pub id: Arc<str>,
    pub name: Arc<str>,
    pub centroid: Coordinate,
    pub stop_ids: Vec<Arc<str>>,
}

/// Greedy single pass over the stops in input order. Each stop joins
/// the first existing group with the exact same name whose current
/// centroid lies within the threshold, shifting that centroid to the
/// incremental mean; otherwise it seeds a new group. The result is
/// deterministic for a fixed input order, and only for a fixed input
/// order: a stop can anchor its own group when it arrives before its
/// nearer neighbors.
pub fn group_stops(stops: &[Stop]) -> Vec<StopGroup> {
    let mut groups: Vec<StopGroup> = Vec::new();

    for stop in stops {
        if stop.coordinate.is_zero() {
            continue;
        }

        let chosen = groups.iter_mut().find(|group| {
            group.name == stop.name
                && group.centroid.haversine_distance(&stop.coordinate) <= GROUP_THRESHOLD
        });

        match chosen {
            Some(group) => {
                group.stop_ids.push(stop.id.clone());
                let n = group.stop_ids.len() as f64;
                group.centroid.latitude =
                    (group.centroid.latitude * (n - 1.0) + stop.coordinate.latitude) / n;
                group.centroid.longitude =
                    (group.centroid.longitude * (n - 1.0) + stop.coordinate.longitude) / n;
            }
            None => groups.push(StopGroup {
                id: stop.id.clone(),
                name: stop.name.clone(),
                centroid: stop.coordinate,
                stop_ids: vec![stop.id.clone()],
            }),
        }
    }

    groups
}
