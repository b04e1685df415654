use polazak::realtime::{
    VehicleKind, decode_snapshot,
    gtfs_rt::{FeedEntity, Position, TripDescriptor, VehicleDescriptor, VehiclePosition},
    prost::Message,
};

fn entity(id: &str, route_id: Option<&str>, with_position: bool) -> FeedEntity {
    let mut vehicle = VehiclePosition::default();
    if with_position {
        let mut position = Position::default();
        position.latitude = 45.81;
        position.longitude = 15.97;
        position.bearing = Some(90.0);
        position.speed = Some(8.5);
        vehicle.position = Some(position);
    }
    vehicle.trip = Some(TripDescriptor {
        trip_id: Some(format!("{id}-trip")),
        route_id: route_id.map(|val| val.to_string()),
        ..Default::default()
    });
    vehicle.vehicle = Some(VehicleDescriptor {
        id: Some(format!("{id}-vehicle")),
        label: Some("601".to_string()),
        ..Default::default()
    });
    vehicle.timestamp = Some(1_718_600_000);

    let mut entity = FeedEntity::default();
    entity.id = id.to_string();
    entity.vehicle = Some(vehicle);
    entity
}

fn encode(entities: Vec<FeedEntity>, timestamp: Option<u64>) -> Vec<u8> {
    let mut feed = polazak::realtime::gtfs_rt::FeedMessage::default();
    feed.header.gtfs_realtime_version = "2.0".to_string();
    feed.header.timestamp = timestamp;
    feed.entity = entities;
    feed.encode_to_vec()
}

#[test]
fn decode_wire_snapshot_test() {
    let bytes = encode(
        vec![entity("e1", Some("6"), true), entity("e2", Some("109"), true)],
        Some(1_718_600_123),
    );
    let snapshot = decode_snapshot(&bytes).unwrap();

    assert_eq!(snapshot.updated, Some(1_718_600_123));
    assert_eq!(snapshot.vehicles.len(), 2);

    let tram = &snapshot.vehicles[0];
    assert_eq!(tram.id.as_deref(), Some("e1-vehicle"));
    assert_eq!(tram.label.as_deref(), Some("601"));
    assert_eq!(tram.route_id.as_deref(), Some("6"));
    assert_eq!(tram.trip_id.as_deref(), Some("e1-trip"));
    assert_eq!(tram.kind, Some(VehicleKind::Tram));
    assert_eq!(tram.latitude, 45.81);
    assert_eq!(tram.longitude, 15.97);
    assert_eq!(tram.bearing, Some(90.0));
    assert_eq!(tram.speed, Some(8.5));
    assert_eq!(tram.timestamp, Some(1_718_600_000));

    assert_eq!(snapshot.vehicles[1].kind, Some(VehicleKind::Bus));
}

#[test]
fn positionless_entities_skipped_test() {
    // One broken entity never takes the batch down with it.
    let bytes = encode(
        vec![entity("dead", Some("6"), false), entity("live", Some("6"), true)],
        None,
    );
    let snapshot = decode_snapshot(&bytes).unwrap();

    assert_eq!(snapshot.updated, None);
    assert_eq!(snapshot.vehicles.len(), 1);
    assert_eq!(snapshot.vehicles[0].id.as_deref(), Some("live-vehicle"));
}

#[test]
fn tram_bus_boundary_test() {
    let bytes = encode(
        vec![
            entity("a", Some("35"), true),
            entity("b", Some("36"), true),
            entity("c", None, true),
        ],
        None,
    );
    let snapshot = decode_snapshot(&bytes).unwrap();

    assert_eq!(snapshot.vehicles[0].kind, Some(VehicleKind::Tram));
    assert_eq!(snapshot.vehicles[1].kind, Some(VehicleKind::Bus));
    assert_eq!(snapshot.vehicles[2].kind, None);
}

#[test]
fn undecodable_body_errors_test() {
    assert!(decode_snapshot(&[0xff, 0xff, 0xff, 0xff]).is_err());
}
