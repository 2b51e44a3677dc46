use crate::destination::City;
use crate::error::{Error, Result};
use crate::registry::ScheduleRegistry;
use crate::time::Minute;
use log::info;
use serde::Deserialize;
use std::path::Path;

/// Schedules to create before the command loop starts.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub schedules: Vec<ScheduleSeed>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleSeed {
    pub destination: City,
    #[serde(default)]
    pub flights: Vec<FlightSeed>,
}

#[derive(Debug, Deserialize)]
pub struct FlightSeed {
    pub time: Minute,
    pub capacity: u32,
}

impl Scenario {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Adds every schedule and flight through the registry's public
    /// operations. Returns the number of flights created.
    pub fn seed(&self, registry: &mut ScheduleRegistry) -> Result<usize> {
        let mut flights = 0;
        for schedule in &self.schedules {
            let destination = schedule.destination.as_str();
            registry
                .add(destination)
                .map_err(|e| rejected(&schedule.destination, e))?;

            for flight in &schedule.flights {
                if flight.capacity == 0 {
                    return Err(rejected(&schedule.destination, "Invalid capacity value"));
                }
                registry
                    .add_flight(destination, flight.time, flight.capacity)
                    .map_err(|e| rejected(&schedule.destination, e))?;
                flights += 1;
            }
        }
        info!(
            "Seeded {} schedules with {} flights",
            self.schedules.len(),
            flights
        );
        Ok(flights)
    }
}

fn rejected(destination: &City, reason: impl ToString) -> Error {
    Error::Scenario {
        destination: destination.clone(),
        reason: reason.to_string(),
    }
}
