use crate::destination::City;
use crate::time::Minute;

pub const MAX_FLIGHTS_PER_CITY: usize = 5;

/// One departure towards a destination. `time == None` marks an unused entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flight {
    pub time: Option<Minute>,
    pub capacity: u32,
    pub available: u32,
}

impl Flight {
    pub const UNUSED: Flight = Flight {
        time: None,
        capacity: 0,
        available: 0,
    };

    pub fn scheduled(time: Minute, capacity: u32) -> Flight {
        Flight {
            time: Some(time),
            capacity,
            available: capacity,
        }
    }

    pub fn is_unused(&self) -> bool {
        self.time.is_none()
    }

    pub fn departs_at(&self, time: Minute) -> bool {
        self.time == Some(time)
    }

    pub fn reset(&mut self) {
        *self = Flight::UNUSED;
    }
}

/// A destination's record in the slot pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleSlot {
    pub(crate) destination: City,
    pub(crate) flights: [Flight; MAX_FLIGHTS_PER_CITY],
}

impl ScheduleSlot {
    pub fn destination(&self) -> &City {
        &self.destination
    }

    pub fn flights(&self) -> &[Flight; MAX_FLIGHTS_PER_CITY] {
        &self.flights
    }

    /// Whether the slot is in its empty template state.
    pub fn is_vacant(&self) -> bool {
        self.destination.is_empty() && self.flights.iter().all(Flight::is_unused)
    }

    pub fn reset(&mut self) {
        self.destination.clear();
        self.flights.iter_mut().for_each(Flight::reset);
    }

    pub(crate) fn first_unused_mut(&mut self) -> Option<&mut Flight> {
        self.flights.iter_mut().find(|f| f.is_unused())
    }

    pub(crate) fn departure_mut(&mut self, time: Minute) -> Option<&mut Flight> {
        self.flights.iter_mut().find(|f| f.departs_at(time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minute(m: u16) -> Minute {
        Minute::new(m).unwrap()
    }

    #[test]
    fn test_default_slot_is_vacant() {
        let slot = ScheduleSlot::default();
        assert!(slot.is_vacant());
        assert!(slot.flights().iter().all(|f| *f == Flight::UNUSED));
    }

    #[test]
    fn test_reset_restores_template() {
        let mut slot = ScheduleSlot {
            destination: City::new("Toronto"),
            flights: [Flight::UNUSED; MAX_FLIGHTS_PER_CITY],
        };
        slot.flights[2] = Flight::scheduled(minute(360), 100);
        assert!(!slot.is_vacant());

        slot.reset();
        assert!(slot.is_vacant());
        assert_eq!(slot, ScheduleSlot::default());
    }

    #[test]
    fn test_scheduled_flight_starts_full() {
        let flight = Flight::scheduled(minute(100), 3);
        assert_eq!(flight.available, flight.capacity);
        assert!(flight.departs_at(minute(100)));
        assert!(!flight.is_unused());
    }
}
