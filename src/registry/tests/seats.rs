use crate::destination::City;
use crate::error::{BookError, NotFoundError, ReleaseError};
use crate::registry::tests::utils::{add_flights, flight, minute, registry_with};

#[test]
fn test_book_nearest_later_flight() {
    let mut registry = registry_with(1, &["X"]);
    add_flights(&mut registry, "X", &[(100, 2), (200, 1)]);

    assert_eq!(registry.book_seat("X", minute(150)), Ok(minute(200)));
    assert_eq!(flight(&registry, "X", 200).available, 0);
    assert_eq!(
        registry.book_seat("X", minute(150)),
        Err(BookError::NoAvailableSeat)
    );
    assert_eq!(flight(&registry, "X", 100).available, 2);
}

#[test]
fn test_book_exact_time() {
    let mut registry = registry_with(1, &["X"]);
    add_flights(&mut registry, "X", &[(300, 3), (100, 2), (200, 1)]);
    assert_eq!(registry.book_seat("X", minute(100)), Ok(minute(100)));
    assert_eq!(flight(&registry, "X", 100).available, 1);
}

#[test]
fn test_book_skips_full_flights() {
    let mut registry = registry_with(1, &["X"]);
    add_flights(&mut registry, "X", &[(100, 1), (400, 1), (250, 1)]);

    assert_eq!(registry.book_seat("X", minute(0)), Ok(minute(100)));
    assert_eq!(registry.book_seat("X", minute(0)), Ok(minute(250)));
    assert_eq!(registry.book_seat("X", minute(0)), Ok(minute(400)));
    assert_eq!(registry.book_seat("X", minute(0)), Err(BookError::NoAvailableSeat));
}

#[test]
fn test_book_ties_use_storage_order() {
    let mut registry = registry_with(1, &["X"]);
    add_flights(&mut registry, "X", &[(500, 1), (200, 1), (200, 4)]);

    assert_eq!(registry.book_seat("X", minute(150)), Ok(minute(200)));
    let handle = registry.find("X").unwrap();
    let stored = registry.pool().get(handle).flights();
    assert_eq!(stored[1].available, 0);
    assert_eq!(stored[2].available, 4);
}

#[test]
fn test_book_without_flights() {
    let mut registry = registry_with(1, &["X"]);
    assert_eq!(registry.book_seat("X", minute(0)), Err(BookError::NoAvailableSeat));
    assert_eq!(
        registry.book_seat("Y", minute(0)),
        Err(BookError::CityNotFound(NotFoundError(City::new("Y"))))
    );
}

#[test]
fn test_release_seat() {
    let mut registry = registry_with(1, &["X"]);
    add_flights(&mut registry, "X", &[(100, 2)]);

    assert_eq!(
        registry.release_seat("X", minute(100)),
        Err(ReleaseError::AllSeatsAlreadyFree)
    );
    registry.book_seat("X", minute(100)).unwrap();
    registry.book_seat("X", minute(100)).unwrap();
    assert_eq!(flight(&registry, "X", 100).available, 0);

    assert_eq!(registry.release_seat("X", minute(100)), Ok(()));
    assert_eq!(flight(&registry, "X", 100).available, 1);
}

#[test]
fn test_release_seat_errors() {
    let mut registry = registry_with(1, &["X"]);
    add_flights(&mut registry, "X", &[(100, 2)]);

    assert_eq!(
        registry.release_seat("X", minute(99)),
        Err(ReleaseError::FlightNotFound)
    );
    assert_eq!(
        registry.release_seat("Y", minute(100)),
        Err(ReleaseError::CityNotFound(NotFoundError(City::new("Y"))))
    );
}

#[test]
fn test_full_flight_stays_scheduled() {
    let mut registry = registry_with(1, &["X"]);
    add_flights(&mut registry, "X", &[(100, 1)]);
    registry.book_seat("X", minute(100)).unwrap();

    let full = flight(&registry, "X", 100);
    assert_eq!((full.available, full.capacity), (0, 1));
    assert_eq!(registry.remove_flight("X", minute(100)), Ok(()));
    assert!(registry.list_flights("X").unwrap().is_empty());
}
