use crate::destination::City;
use crate::error::{
    AddError, AddFlightError, BookError, NotFoundError, ReleaseError, RemoveFlightError,
};
use crate::flight::{Flight, ScheduleSlot};
use crate::pool::{SlotHandle, SlotPool};
use crate::time::Minute;
use log::{debug, info};


/// Flight schedules keyed by destination, backed by a fixed [`SlotPool`].
///
/// Destination arguments go through [`City::new`], so names longer than the
/// limit match on their truncated prefix.
pub struct ScheduleRegistry {
    pool: SlotPool,
}

impl ScheduleRegistry {
    pub fn new(capacity: usize) -> ScheduleRegistry {
        ScheduleRegistry {
            pool: SlotPool::new(capacity),
        }
    }

    pub fn pool(&self) -> &SlotPool {
        &self.pool
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Number of destinations with an active schedule.
    pub fn len(&self) -> usize {
        self.pool.active_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find(&self, destination: &str) -> Option<SlotHandle> {
        let city = City::new(destination);
        self.pool
            .active_iter()
            .find(|h| *self.pool.get(*h).destination() == city)
    }

    pub fn add(&mut self, destination: &str) -> Result<(), AddError> {
        let city = City::new(destination);
        if self.find(city.as_str()).is_some() {
            return Err(AddError::AlreadyExists(city));
        }
        let handle = self.pool.allocate().ok_or(AddError::PoolExhausted)?;
        debug!("Slot {handle} bound to {city}");
        self.pool.get_mut(handle).destination = city;
        Ok(())
    }

    pub fn remove(&mut self, destination: &str) -> Result<(), NotFoundError> {
        let handle = self.locate(destination)?;
        self.pool.release(handle);
        info!("Schedule for {destination} removed, slot {handle} freed");
        Ok(())
    }

    pub fn list_destinations(&self) -> impl Iterator<Item = &str> + '_ {
        self.pool
            .active_iter()
            .map(move |h| self.pool.get(h).destination().as_str())
    }

    /// Scheduled flights of a destination in departure order.
    pub fn list_flights(&self, destination: &str) -> Result<Vec<Flight>, NotFoundError> {
        let handle = self.locate(destination)?;
        let mut flights = self
            .pool
            .get(handle)
            .flights()
            .iter()
            .filter(|f| !f.is_unused())
            .copied()
            .collect::<Vec<_>>();
        flights.sort_by_key(|f| f.time);
        Ok(flights)
    }

    /// Places a flight in the first unused entry. An existing flight at the
    /// same time is not detected.
    pub fn add_flight(
        &mut self,
        destination: &str,
        time: Minute,
        capacity: u32,
    ) -> Result<(), AddFlightError> {
        debug_assert!(capacity > 0, "flight capacity must be positive");
        let slot = self.slot_mut(destination)?;
        let entry = slot
            .first_unused_mut()
            .ok_or(AddFlightError::NoFreeFlightSlot)?;
        *entry = Flight::scheduled(time, capacity);
        debug!("Flight to {destination} at {time} with {capacity} seats added");
        Ok(())
    }

    pub fn remove_flight(
        &mut self,
        destination: &str,
        time: Minute,
    ) -> Result<(), RemoveFlightError> {
        let slot = self.slot_mut(destination)?;
        slot.departure_mut(time)
            .ok_or(RemoveFlightError::FlightNotFound)?
            .reset();
        debug!("Flight to {destination} at {time} removed");
        Ok(())
    }

    /// Takes a seat on the earliest flight departing at or after `time` that
    /// still has one. Equal departures resolve to the first in storage order.
    pub fn book_seat(&mut self, destination: &str, time: Minute) -> Result<Minute, BookError> {
        let slot = self.slot_mut(destination)?;

        let mut best: Option<(u16, usize, Minute)> = None;
        for (i, flight) in slot.flights.iter().enumerate() {
            let Some(departure) = flight.time else {
                continue;
            };
            if flight.available == 0 {
                continue;
            }
            let Some(wait) = time.until(departure) else {
                continue;
            };
            if best.is_none_or(|(closest, _, _)| wait < closest) {
                best = Some((wait, i, departure));
            }
        }

        let (_, index, departure) = best.ok_or(BookError::NoAvailableSeat)?;
        let flight = &mut slot.flights[index];
        flight.available -= 1;
        info!(
            "Seat booked to {destination} at {departure}, {} left",
            flight.available
        );
        Ok(departure)
    }

    pub fn release_seat(&mut self, destination: &str, time: Minute) -> Result<(), ReleaseError> {
        let slot = self.slot_mut(destination)?;
        let flight = slot
            .departure_mut(time)
            .ok_or(ReleaseError::FlightNotFound)?;
        if flight.available >= flight.capacity {
            return Err(ReleaseError::AllSeatsAlreadyFree);
        }
        flight.available += 1;
        info!("Seat released to {destination} at {time}");
        Ok(())
    }

    fn locate(&self, destination: &str) -> Result<SlotHandle, NotFoundError> {
        self.find(destination)
            .ok_or_else(|| NotFoundError(City::new(destination)))
    }

    fn slot_mut(&mut self, destination: &str) -> Result<&mut ScheduleSlot, NotFoundError> {
        let handle = self.locate(destination)?;
        Ok(self.pool.get_mut(handle))
    }
}
