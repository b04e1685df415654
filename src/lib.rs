pub mod cluster;
pub mod gtfs;
pub mod realtime;
pub mod schedule;
pub mod shared;

pub mod prelude {
    pub use crate::cluster::{StopGroup, group_stops};
    pub use crate::gtfs::Gtfs;
    pub use crate::realtime::{Vehicle, VehicleKind, VehicleSnapshot};
    pub use crate::schedule::{Schedule, Stop, Timetable, Trip, UpcomingDeparture};
    pub use crate::shared::geo::{Coordinate, Distance};
    pub use crate::shared::time::{Duration, ServiceDay, Time};
}
