pub struct Config {
    pub stops_path: String,
    pub trips_path: String,
    pub calendar_path: String,
    pub calendar_dates_path: String,
    pub stop_times_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stops_path: "stops.txt".into(),
            trips_path: "trips.txt".into(),
            calendar_path: "calendar.txt".into(),
            calendar_dates_path: "calendar_dates.txt".into(),
            stop_times_path: "stop_times.txt".into(),
        }
    }
}
