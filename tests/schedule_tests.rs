use polazak::{
    gtfs::{Error, Gtfs},
    schedule::Schedule,
    shared::time::{ServiceDay, Time},
};
use std::{fs, path::PathBuf};

const STOPS: &str = "\
stop_id,stop_name,stop_lat,stop_lon
A,Trg,45.0,16.0
B,Kolodvor,45.001,16.001
C,Most,,
";

const TRIPS: &str = "\
route_id,service_id,trip_id,trip_headsign
6,WD,T1,Center
36,WD,T2,Airport
109,WD,T3,Depot
";

const CALENDAR: &str = "\
service_id,monday,tuesday,wednesday,thursday,friday,saturday,sunday,start_date,end_date
WD,1,1,1,1,1,0,0,20240101,20241231
";

const CALENDAR_DATES: &str = "\
service_id,date,exception_type
WD,20240617,2
";

// T1 rows arrive out of sequence on purpose; T2 calls at A twice, the
// second time past midnight; T3 exists to overflow the departure cap
// at B.
const STOP_TIMES: &str = "\
trip_id,arrival_time,departure_time,stop_id,stop_sequence
T1,08:10:00,08:10:30,B,2
T1,08:00:00,08:00:30,A,1
T1,08:20:00,,C,3
T2,09:00:00,09:00:00,A,1
T2,25:10:00,25:10:00,A,2
T3,10:00:00,10:00:00,B,1
T3,10:01:00,10:01:00,B,2
T3,10:02:00,10:02:00,B,3
T3,10:03:00,10:03:00,B,4
T3,10:04:00,10:04:00,B,5
T3,10:05:00,10:05:00,B,6
";

fn write_bundle(name: &str, files: &[(&str, &str)]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("polazak-test-{}-{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    for (file_name, content) in files {
        fs::write(dir.join(file_name), content).unwrap();
    }
    dir
}

fn full_bundle(name: &str) -> Schedule {
    let dir = write_bundle(
        name,
        &[
            ("stops.txt", STOPS),
            ("trips.txt", TRIPS),
            ("calendar.txt", CALENDAR),
            ("calendar_dates.txt", CALENDAR_DATES),
            ("stop_times.txt", STOP_TIMES),
        ],
    );
    Schedule::new().with_gtfs(Gtfs::new().from_dir(dir)).unwrap()
}

/// A Tuesday morning inside the calendar's range.
fn tuesday_at(seconds: u32) -> ServiceDay {
    ServiceDay {
        date: 20240618,
        weekday: 1,
        now: Time::from_seconds(seconds),
    }
}

#[test]
fn timetable_sorted_by_sequence_test() {
    let schedule = full_bundle("timetable");
    let timetable = schedule.timetable("T1").unwrap();

    let order: Vec<_> = timetable
        .stops
        .iter()
        .map(|stop| stop.stop_id.as_ref())
        .collect();
    assert_eq!(order, vec!["A", "B", "C"]);
    assert_eq!(timetable.stops[0].stop_name.as_ref(), "Trg");
    assert_eq!(timetable.stops[1].stop_name.as_ref(), "Kolodvor");
}

#[test]
fn timetable_path_skips_unplaced_stops_test() {
    let schedule = full_bundle("path");
    let timetable = schedule.timetable("T1").unwrap();

    // C has no coordinates, so it stays in the timetable but not in
    // the path.
    assert_eq!(timetable.stops.len(), 3);
    assert_eq!(timetable.path.len(), 2);
    assert!(timetable.path.len() <= timetable.stops.len());
    assert_eq!(timetable.path[0].latitude, 45.0);
    assert_eq!(timetable.path[0].longitude, 16.0);
}

#[test]
fn timetable_departure_falls_back_to_arrival_test() {
    let schedule = full_bundle("fallback");
    let timetable = schedule.timetable("T1").unwrap();

    let last = timetable.stops.last().unwrap();
    assert_eq!(last.arrival.as_ref(), "08:20:00");
    assert_eq!(last.departure.as_ref(), "08:20:00");
}

#[test]
fn timetable_unknown_trip_test() {
    let schedule = full_bundle("unknown-trip");
    assert!(schedule.timetable("T9").is_none());
}

#[test]
fn departures_filter_and_sort_test() {
    let schedule = full_bundle("departures");
    // 07:30 on the Tuesday: everything at A is still ahead.
    let departures = schedule
        .upcoming_departures("A", &tuesday_at(7 * 3600 + 1800))
        .unwrap();

    assert_eq!(departures.len(), 3);
    let times: Vec<_> = departures
        .iter()
        .map(|departure| departure.arrival.to_clock_string())
        .collect();
    assert_eq!(times, vec!["08:00", "09:00", "01:10"]);
    assert_eq!(departures[0].eta_minutes, 30);
    assert_eq!(departures[1].eta_minutes, 90);
    // The post-midnight call wraps in display but keeps its real
    // distance from now.
    assert_eq!(departures[2].eta_minutes, 1060);

    for pair in departures.windows(2) {
        assert!(pair[0].eta_minutes <= pair[1].eta_minutes);
    }
}

#[test]
fn departures_skip_already_left_test() {
    let schedule = full_bundle("departed");
    // 08:30: the 08:00 call at A is gone.
    let departures = schedule
        .upcoming_departures("A", &tuesday_at(8 * 3600 + 1800))
        .unwrap();

    assert_eq!(departures.len(), 2);
    assert_eq!(departures[0].arrival.to_clock_string(), "09:00");
}

#[test]
fn departures_capped_at_five_test() {
    let schedule = full_bundle("cap");
    // 09:50 at B: six T3 calls ahead plus nothing else; only the first
    // five survive.
    let departures = schedule
        .upcoming_departures("B", &tuesday_at(9 * 3600 + 50 * 60))
        .unwrap();

    assert_eq!(departures.len(), 5);
    assert_eq!(departures[0].arrival.to_clock_string(), "10:00");
    assert_eq!(departures[4].arrival.to_clock_string(), "10:04");
    for pair in departures.windows(2) {
        assert!(pair[0].eta_minutes <= pair[1].eta_minutes);
    }
}

#[test]
fn departures_respect_removed_exception_test() {
    let schedule = full_bundle("exception");
    // 2024-06-17 is a Monday the calendar covers, removed by the
    // exceptions table.
    let monday = ServiceDay {
        date: 20240617,
        weekday: 0,
        now: Time::from_seconds(7 * 3600),
    };
    let departures = schedule.upcoming_departures("A", &monday).unwrap();
    assert!(departures.is_empty());
}

#[test]
fn departures_inactive_weekday_test() {
    let schedule = full_bundle("weekend");
    // 2024-06-22 is a Saturday; the service only runs weekdays.
    let saturday = ServiceDay {
        date: 20240622,
        weekday: 5,
        now: Time::from_seconds(7 * 3600),
    };
    let departures = schedule.upcoming_departures("A", &saturday).unwrap();
    assert!(departures.is_empty());
}

#[test]
fn departures_unknown_stop_test() {
    let schedule = full_bundle("unknown-stop");
    assert!(
        schedule
            .upcoming_departures("ZZZ", &tuesday_at(0))
            .is_none()
    );
}

#[test]
fn missing_mandatory_table_aborts_test() {
    let dir = write_bundle(
        "missing-calendar",
        &[
            ("stops.txt", STOPS),
            ("trips.txt", TRIPS),
            ("stop_times.txt", STOP_TIMES),
        ],
    );
    let result = Schedule::new().with_gtfs(Gtfs::new().from_dir(dir));
    assert!(matches!(result, Err(Error::FileNotFound(_))));
}

#[test]
fn missing_exceptions_table_is_fine_test() {
    let dir = write_bundle(
        "missing-dates",
        &[
            ("stops.txt", STOPS),
            ("trips.txt", TRIPS),
            ("calendar.txt", CALENDAR),
            ("stop_times.txt", STOP_TIMES),
        ],
    );
    let schedule = Schedule::new().with_gtfs(Gtfs::new().from_dir(dir)).unwrap();
    // Without the exceptions table the removed Monday runs normally.
    let monday = ServiceDay {
        date: 20240617,
        weekday: 0,
        now: Time::from_seconds(7 * 3600),
    };
    let departures = schedule.upcoming_departures("A", &monday).unwrap();
    assert_eq!(departures.len(), 3);
}

#[test]
fn reordered_columns_test() {
    // Header order is not a contract; rows bind by name.
    let stops = "\
stop_name,stop_lon,stop_lat,stop_id
Trg,16.0,45.0,A
";
    let dir = write_bundle(
        "reordered",
        &[
            ("stops.txt", stops),
            ("trips.txt", TRIPS),
            ("calendar.txt", CALENDAR),
            ("stop_times.txt", STOP_TIMES),
        ],
    );
    let schedule = Schedule::new().with_gtfs(Gtfs::new().from_dir(dir)).unwrap();
    let stop = schedule.stop_by_id("A").unwrap();
    assert_eq!(stop.name.as_ref(), "Trg");
    assert_eq!(stop.coordinate.latitude, 45.0);
    assert_eq!(stop.coordinate.longitude, 16.0);
}
