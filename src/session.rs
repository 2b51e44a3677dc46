use crate::console::{LineSource, Scanner};
use crate::destination::City;
use crate::error::Result;
use crate::flight::Flight;
use crate::registry::ScheduleRegistry;
use crate::time::Minute;
use colored::Colorize;
use log::debug;
use std::fmt::Display;
use std::io::Write;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

pub const HELP: &str = "Here are the possible commands:
A <city name>     - Add an active empty flight schedule for
                    <city name>
L                 - List cities which have an active schedule
l <city name>     - List the flights for <city name>
a <city name>
<time> <capacity> - Add a flight for <city name> @ <time> time
                    with <capacity> seats
r <city name>
<time>            - Remove a flight from <city name> whose time is
                    <time>
s <city name>
<time>            - Attempt to schedule seat on flight to
                    <city name> at <time> or next closest time on
                    which there is an available seat
u <city name>
<time>            - unschedule a seat from flight to <city name>
                    at <time>
R <city name>     - Remove schedule for <city name>
h                 - print this help message
q                 - quit";

const INVALID_TIME: &str = "Invalid time value";
const INVALID_CAPACITY: &str = "Invalid capacity value";

#[derive(Debug, Clone, Copy, Default)]
pub struct Rendering {
    pub banner: bool,
    pub table: bool,
    pub color: bool,
}

#[derive(Tabled)]
struct DestinationRow {
    destination: String,
}

#[derive(Tabled)]
struct FlightRow {
    departure: String,
    minute: u16,
    available: u32,
    capacity: u32,
}

impl FlightRow {
    fn new(flight: &Flight) -> Option<FlightRow> {
        let time = flight.time?;
        Some(FlightRow {
            departure: time.clock(),
            minute: time.get(),
            available: flight.available,
            capacity: flight.capacity,
        })
    }
}

/// Command loop: reads one command with its arguments, runs it against the
/// registry and writes the outcome.
pub struct Session<S, W> {
    registry: ScheduleRegistry,
    scanner: Scanner<S>,
    out: W,
    rendering: Rendering,
}

impl<S: LineSource, W: Write> Session<S, W> {
    pub fn new(registry: ScheduleRegistry, source: S, out: W, rendering: Rendering) -> Self {
        Session {
            registry,
            scanner: Scanner::new(source),
            out,
            rendering,
        }
    }

    pub fn registry(&self) -> &ScheduleRegistry {
        &self.registry
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn run(&mut self) -> Result<()> {
        if self.rendering.banner {
            writeln!(self.out, "{HELP}")?;
        }
        self.offer_destinations();

        while let Some(command) = self.scanner.next_command()? {
            debug!("Command {command:?}");
            let keep_going = match command {
                'A' => self.add_schedule()?,
                'L' => {
                    self.list_destinations()?;
                    true
                }
                'l' => self.list_flights()?,
                'a' => self.add_flight()?,
                'r' => self.remove_flight()?,
                's' => self.book_seat()?,
                'u' => self.release_seat()?,
                'R' => self.remove_schedule()?,
                'h' | '?' => {
                    writeln!(self.out, "{HELP}")?;
                    true
                }
                'q' => false,
                _ => {
                    self.report("Bad command. Use h to see help.")?;
                    true
                }
            };
            self.out.flush()?;
            if !keep_going {
                break;
            }
            if matches!(command, 'A' | 'R') {
                self.offer_destinations();
            }
        }
        Ok(())
    }

    fn add_schedule(&mut self) -> Result<bool> {
        let Some(city) = self.scanner.read_city()? else {
            return Ok(false);
        };
        if let Err(err) = self.registry.add(city.as_str()) {
            self.report(err)?;
        }
        Ok(true)
    }

    fn remove_schedule(&mut self) -> Result<bool> {
        let Some(city) = self.scanner.read_city()? else {
            return Ok(false);
        };
        if let Err(err) = self.registry.remove(city.as_str()) {
            self.report(err)?;
        }
        Ok(true)
    }

    fn list_destinations(&mut self) -> Result<()> {
        if self.rendering.table {
            let rows = self
                .registry
                .list_destinations()
                .map(|destination| DestinationRow {
                    destination: destination.to_string(),
                })
                .collect::<Vec<_>>();
            if !rows.is_empty() {
                writeln!(self.out, "{}", styled(Table::new(rows)))?;
            }
            return Ok(());
        }
        for destination in self.registry.list_destinations() {
            writeln!(self.out, "{destination}")?;
        }
        Ok(())
    }

    fn list_flights(&mut self) -> Result<bool> {
        let Some(city) = self.scanner.read_city()? else {
            return Ok(false);
        };
        let flights = match self.registry.list_flights(city.as_str()) {
            Ok(flights) => flights,
            Err(err) => {
                self.report(err)?;
                return Ok(true);
            }
        };

        if self.rendering.table {
            writeln!(self.out, "The flights for {city} are:")?;
            if !flights.is_empty() {
                let rows = flights.iter().filter_map(FlightRow::new).collect::<Vec<_>>();
                writeln!(self.out, "{}", styled(Table::new(rows)))?;
            }
            return Ok(true);
        }

        write!(self.out, "The flights for {city} are:")?;
        for flight in &flights {
            if let Some(time) = flight.time {
                write!(
                    self.out,
                    " ({}, {}, {})",
                    time, flight.available, flight.capacity
                )?;
            }
        }
        writeln!(self.out)?;
        Ok(true)
    }

    fn add_flight(&mut self) -> Result<bool> {
        let Some(city) = self.scanner.read_city()? else {
            return Ok(false);
        };
        let time = self.scanner.read_int()?;
        let capacity = self.scanner.read_int()?;
        let Some(time) = self.time_arg(time)? else {
            return Ok(true);
        };
        let Some(capacity) = self.capacity_arg(capacity)? else {
            return Ok(true);
        };
        if let Err(err) = self.registry.add_flight(city.as_str(), time, capacity) {
            self.report(err)?;
        }
        Ok(true)
    }

    fn remove_flight(&mut self) -> Result<bool> {
        let Some((city, time)) = self.read_city_and_time()? else {
            return Ok(false);
        };
        if let Some(time) = time {
            if let Err(err) = self.registry.remove_flight(city.as_str(), time) {
                self.report(err)?;
            }
        }
        Ok(true)
    }

    fn book_seat(&mut self) -> Result<bool> {
        let Some((city, time)) = self.read_city_and_time()? else {
            return Ok(false);
        };
        if let Some(time) = time {
            if let Err(err) = self.registry.book_seat(city.as_str(), time) {
                self.report(err)?;
            }
        }
        Ok(true)
    }

    fn release_seat(&mut self) -> Result<bool> {
        let Some((city, time)) = self.read_city_and_time()? else {
            return Ok(false);
        };
        if let Some(time) = time {
            if let Err(err) = self.registry.release_seat(city.as_str(), time) {
                self.report(err)?;
            }
        }
        Ok(true)
    }

    /// `None` at end of input; an invalid time is reported and yields
    /// `Some((city, None))`.
    fn read_city_and_time(&mut self) -> Result<Option<(City, Option<Minute>)>> {
        let Some(city) = self.scanner.read_city()? else {
            return Ok(None);
        };
        let time = self.scanner.read_int()?;
        let time = self.time_arg(time)?;
        Ok(Some((city, time)))
    }

    fn time_arg(&mut self, value: Option<i64>) -> Result<Option<Minute>> {
        let time = value.and_then(|value| Minute::try_from(value).ok());
        if time.is_none() {
            self.report(INVALID_TIME)?;
        }
        Ok(time)
    }

    fn capacity_arg(&mut self, value: Option<i64>) -> Result<Option<u32>> {
        let capacity = value
            .and_then(|value| u32::try_from(value).ok())
            .filter(|c| *c > 0);
        if capacity.is_none() {
            self.report(INVALID_CAPACITY)?;
        }
        Ok(capacity)
    }

    fn report(&mut self, message: impl Display) -> Result<()> {
        if self.rendering.color {
            writeln!(self.out, "{}", message.to_string().red())?;
        } else {
            writeln!(self.out, "{message}")?;
        }
        Ok(())
    }

    fn offer_destinations(&mut self) {
        let names = self
            .registry
            .list_destinations()
            .map(str::to_string)
            .collect();
        self.scanner.source_mut().offer_destinations(names);
    }
}

fn styled(mut table: Table) -> Table {
    table.with(Style::rounded());
    table.with(Alignment::left());
    table
}
