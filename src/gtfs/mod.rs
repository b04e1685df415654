use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{self, Read},
    path::PathBuf,
};
use thiserror::Error;
use zip::{ZipArchive, read::ZipFile};

mod config;
pub mod models;
pub use config::*;
use models::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not find table with name: {0}")]
    FileNotFound(String),
}

#[derive(Default)]
pub enum StorageType {
    #[default]
    None,
    Zip(PathBuf),
    Dir(PathBuf),
}

/// Handle over a schedule bundle, either a zip archive or a plain
/// directory of tables. Rows stream one at a time; rows that fail to
/// deserialize are skipped rather than aborting the table.
#[derive(Default)]
pub struct Gtfs {
    config: Config,
    storage: StorageType,
}

impl Gtfs {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn from_zip(mut self, path: PathBuf) -> Self {
        self.storage = StorageType::Zip(path);
        self
    }

    pub fn from_dir(mut self, path: PathBuf) -> Self {
        self.storage = StorageType::Dir(path);
        self
    }

    pub fn stream_stops<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsStop)),
    {
        self.stream_table(&self.config.stops_path, f)
    }

    pub fn stream_trips<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsTrip)),
    {
        self.stream_table(&self.config.trips_path, f)
    }

    pub fn stream_calendar<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsCalendar)),
    {
        self.stream_table(&self.config.calendar_path, f)
    }

    /// The exceptions table is optional; a bundle without one
    /// streams zero rows instead of failing.
    pub fn stream_calendar_dates<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsCalendarDate)),
    {
        match self.stream_table(&self.config.calendar_dates_path, f) {
            Err(Error::FileNotFound(_)) => Ok(()),
            other => other,
        }
    }

    pub fn stream_stop_times<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, GtfsStopTime)),
    {
        self.stream_table(&self.config.stop_times_path, f)
    }

    fn stream_table<T, F>(&self, file_name: &str, f: F) -> Result<(), self::Error>
    where
        T: DeserializeOwned,
        F: FnMut((usize, T)),
    {
        match &self.storage {
            StorageType::None => Ok(()),
            StorageType::Zip(path) => stream_from_zip(path, file_name, f),
            StorageType::Dir(path) => stream_from_dir(path, file_name, f),
        }
    }
}

fn stream_from_zip<T, F>(zip_path: &PathBuf, file_name: &str, f: F) -> Result<(), self::Error>
where
    T: DeserializeOwned,
    F: FnMut((usize, T)),
{
    let zip_file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(zip_file)?;
    let file = get_file(&mut archive, file_name)?;
    stream_from_reader(file, f)
}

fn stream_from_dir<T, F>(dir_path: &PathBuf, file_name: &str, f: F) -> Result<(), self::Error>
where
    T: DeserializeOwned,
    F: FnMut((usize, T)),
{
    let path = dir_path.join(file_name);
    if !path.is_file() {
        return Err(Error::FileNotFound(file_name.to_string()));
    }
    let file = File::open(path)?;
    stream_from_reader(file, f)
}

fn stream_from_reader<R, T, F>(reader: R, f: F) -> Result<(), self::Error>
where
    R: Read,
    T: DeserializeOwned,
    F: FnMut((usize, T)),
{
    let mut reader = csv::Reader::from_reader(reader);
    reader
        .deserialize()
        .filter_map(|a| a.ok())
        .enumerate()
        .for_each(f);
    Ok(())
}

fn get_file<'a>(
    archive: &'a mut ZipArchive<File>,
    name: &'a str,
) -> Result<ZipFile<'a, File>, self::Error> {
    let index = archive
        .index_for_name(name)
        .ok_or(self::Error::FileNotFound(name.to_string()))?;
    let file = archive.by_index(index)?;
    Ok(file)
}
