use crate::destination::City;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No schedule for {0}")]
pub struct NotFoundError(pub City);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddError {
    #[error("There is a schedule of {0} already.")]
    AlreadyExists(City),

    #[error("Sorry no more free schedules.")]
    PoolExhausted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddFlightError {
    #[error(transparent)]
    CityNotFound(#[from] NotFoundError),

    #[error("Sorry we cannot add more flights on this city.")]
    NoFreeFlightSlot,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoveFlightError {
    #[error(transparent)]
    CityNotFound(#[from] NotFoundError),

    #[error("Sorry there's no flight scheduled on this time.")]
    FlightNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    #[error(transparent)]
    CityNotFound(#[from] NotFoundError),

    #[error("Sorry there's no more seats available!")]
    NoAvailableSeat,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReleaseError {
    #[error(transparent)]
    CityNotFound(#[from] NotFoundError),

    #[error("Sorry there's no flight scheduled on this time.")]
    FlightNotFound,

    #[error("All the seats on this flights are empty!")]
    AllSeatsAlreadyFree,
}

/// Failures that end the program rather than a single command.
#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse scenario JSON: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("Line editor failed: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("Failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("Scenario entry for {destination} rejected: {reason}")]
    Scenario { destination: City, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
