use crate::flight::Flight;
use crate::registry::ScheduleRegistry;
use crate::time::Minute;
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;

pub fn minute(m: u16) -> Minute {
    Minute::new(m).unwrap()
}

pub fn registry_with(capacity: usize, cities: &[&str]) -> ScheduleRegistry {
    let mut registry = ScheduleRegistry::new(capacity);
    for city in cities {
        registry.add(city).unwrap();
    }
    registry
}

pub fn add_flights(registry: &mut ScheduleRegistry, city: &str, flights: &[(u16, u32)]) {
    for (time, capacity) in flights {
        registry.add_flight(city, minute(*time), *capacity).unwrap();
    }
}

pub fn flight(registry: &ScheduleRegistry, city: &str, time: u16) -> Flight {
    registry
        .list_flights(city)
        .unwrap()
        .into_iter()
        .find(|f| f.departs_at(minute(time)))
        .unwrap()
}

pub fn times(flights: &[Flight]) -> Vec<u16> {
    flights.iter().filter_map(|f| f.time).map(Minute::get).collect()
}

pub fn arb_city() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("KRK"), Just("WAW"), Just("GDN"), Just("WRO"), Just("POZ")]
}
