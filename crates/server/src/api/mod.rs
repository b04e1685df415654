mod departures;
mod stops;
mod timetable;
mod vehicles;

pub use departures::*;
pub use stops::*;
pub use timetable::*;
pub use vehicles::*;
