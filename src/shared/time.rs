use std::ops::Sub;

use chrono::{DateTime, Datelike, Local, Timelike};

/// Seconds since midnight of the service day.
/// Hours can run past 23 for trips scheduled after midnight,
/// so a value is not bounded by 86400.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Time(u32);

impl From<u32> for Time {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Sub<Time> for Time {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        Duration(self.0 - rhs.0)
    }
}

impl Time {
    pub fn now() -> Self {
        let now = Local::now();
        Self(now.num_seconds_from_midnight())
    }

    pub const fn from_seconds(secs: u32) -> Self {
        Self(secs)
    }

    pub const fn as_seconds(&self) -> u32 {
        self.0
    }

    /// Parses a schedule clock like "07:05:30" or "07:05".
    /// The seconds field is optional and the hour is allowed past 23.
    pub fn from_clock(time: &str) -> Option<Self> {
        const HOUR_TO_SEC: u32 = 60 * 60;
        const MINUTE_TO_SEC: u32 = 60;
        let mut split = time.split(':');
        let hours: u32 = split.next()?.trim().parse().ok()?;
        let minutes: u32 = split.next()?.trim().parse().ok()?;
        let seconds: u32 = match split.next() {
            Some(val) => val.trim().parse().ok()?,
            None => 0,
        };
        Some(Self(hours * HOUR_TO_SEC + minutes * MINUTE_TO_SEC + seconds))
    }

    /// Formats as a zero padded "HH:MM" with the hour wrapped modulo 24.
    /// "25:10" displays as "01:10"; the date is never reinterpreted.
    pub fn to_clock_string(&self) -> String {
        let h = (self.0 / 3600) % 24;
        let m = (self.0 % 3600) / 60;
        format!("{:02}:{:02}", h, m)
    }
}

#[test]
fn valid_clock_test_1() {
    let time = "00:00:00";
    assert_eq!(Time::from_clock(time).unwrap().as_seconds(), 0);
}

#[test]
fn valid_clock_test_2() {
    let time = "00:00:30";
    assert_eq!(Time::from_clock(time).unwrap().as_seconds(), 30);
}

#[test]
fn valid_clock_test_3() {
    let time = "00:01:30";
    assert_eq!(Time::from_clock(time).unwrap().as_seconds(), 90);
}

#[test]
fn valid_clock_test_4() {
    let time = "01:01:30";
    assert_eq!(Time::from_clock(time).unwrap().as_seconds(), 3690);
}

#[test]
fn valid_clock_no_seconds_test() {
    let time = "01:01";
    assert_eq!(Time::from_clock(time).unwrap().as_seconds(), 3660);
}

#[test]
fn valid_clock_past_midnight_test() {
    let time = "25:10:00";
    assert_eq!(Time::from_clock(time).unwrap().as_seconds(), 25 * 3600 + 600);
}

#[test]
fn invalid_clock_test_1() {
    let time = "00:00:0a";
    assert!(Time::from_clock(time).is_none())
}

#[test]
fn invalid_clock_test_2() {
    let time = "0000";
    assert!(Time::from_clock(time).is_none())
}

#[test]
fn clock_string_test() {
    let time = Time::from_clock("07:05:59").unwrap();
    assert_eq!(time.to_clock_string(), "07:05");
}

#[test]
fn clock_string_wrap_test() {
    let time = Time::from_clock("25:10:00").unwrap();
    assert_eq!(time.to_clock_string(), "01:10");
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration(u32);

impl From<u32> for Duration {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Duration {
    pub const fn from_seconds(secs: u32) -> Self {
        Self(secs)
    }

    pub const fn as_seconds(&self) -> u32 {
        self.0
    }

    /// Whole minutes, rounded half up.
    pub const fn as_rounded_minutes(&self) -> u32 {
        (self.0 + 30) / 60
    }
}

#[test]
fn rounded_minutes_test_1() {
    assert_eq!(Duration::from_seconds(0).as_rounded_minutes(), 0);
}

#[test]
fn rounded_minutes_test_2() {
    assert_eq!(Duration::from_seconds(29).as_rounded_minutes(), 0);
}

#[test]
fn rounded_minutes_test_3() {
    assert_eq!(Duration::from_seconds(30).as_rounded_minutes(), 1);
}

#[test]
fn rounded_minutes_test_4() {
    assert_eq!(Duration::from_seconds(150).as_rounded_minutes(), 2);
}

/// A point on the service calendar: the date as a YYYYMMDD integer,
/// the weekday with Monday as 0, and the clock seconds into that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDay {
    pub date: u32,
    pub weekday: usize,
    pub now: Time,
}

impl ServiceDay {
    pub fn now() -> Self {
        Self::from_local(Local::now())
    }

    pub fn from_local(datetime: DateTime<Local>) -> Self {
        let date = datetime.year() as u32 * 10_000 + datetime.month() * 100 + datetime.day();
        let weekday = datetime.weekday().num_days_from_monday() as usize;
        let now = Time::from_seconds(datetime.num_seconds_from_midnight());
        Self { date, weekday, now }
    }
}

#[test]
fn service_day_test() {
    use chrono::TimeZone;
    // 2024-06-17 is a Monday.
    let datetime = Local.with_ymd_and_hms(2024, 6, 17, 8, 30, 15).unwrap();
    let day = ServiceDay::from_local(datetime);
    assert_eq!(day.date, 20240617);
    assert_eq!(day.weekday, 0);
    assert_eq!(day.now.as_seconds(), 8 * 3600 + 30 * 60 + 15);
}

#[test]
fn service_day_sunday_test() {
    use chrono::TimeZone;
    // 2024-06-23 is a Sunday.
    let datetime = Local.with_ymd_and_hms(2024, 6, 23, 0, 0, 0).unwrap();
    let day = ServiceDay::from_local(datetime);
    assert_eq!(day.date, 20240623);
    assert_eq!(day.weekday, 6);
}
