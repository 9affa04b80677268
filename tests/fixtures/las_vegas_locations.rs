//! Real Las Vegas locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap via Overpass API. They are
//! routable with OSRM Nevada data.

use courier_dispatch::{Coordinate, Location};

/// A named place; its name doubles as a geocodable address in tests.
#[derive(Debug, Clone, Copy)]
pub struct Place {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Place {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    /// The place given directly as coordinates.
    pub const fn at(&self) -> Location {
        Location::at(self.lat, self.lng)
    }

    /// The place given as an address that needs geocoding.
    pub fn address(&self) -> Location {
        Location::address(self.name)
    }
}

// ============================================================================
// Restaurants (pickups)
// ============================================================================

pub const RESTAURANTS: &[Place] = &[
    Place::new("Hard Rock Cafe", 36.1041592, -115.1722166),
    Place::new("Public House", 36.1219193, -115.1689317),
    Place::new("Brooklyn Bowl", 36.1175388, -115.1695094),
    Place::new("Gordon Ramsay BurGR", 36.1107195, -115.1720818),
    Place::new("Earl of Sandwich Planet Hollywood", 36.1093912, -115.1720087),
    Place::new("Otto Pizzeria", 36.1231219, -115.1684514),
    Place::new("Beijing Noodle No. 9", 36.1158277, -115.1758038),
    Place::new("Il Fornaio", 36.1024474, -115.1740110),
    Place::new("Rivas Mexican Grill North", 36.1450055, -115.0482587),
    Place::new("I Love Sushi Henderson", 35.9916660, -115.1028343),
];

// ============================================================================
// Customers (drop-offs)
// ============================================================================

pub const CUSTOMERS: &[Place] = &[
    Place::new("Wynn Las Vegas", 36.1263781, -115.1658180),
    Place::new("MGM Grand", 36.1023654, -115.1688720),
    Place::new("Bellagio", 36.1126, -115.1767),
    Place::new("Caesars Palace", 36.1162, -115.1745),
    Place::new("Budget Suites South", 36.0366259, -115.1713361),
    Place::new("Green Valley Ranch Area", 36.0308, -115.0825),
    Place::new("Sunset Station Area", 36.0614, -115.0631),
    Place::new("Longhorn Casino", 36.1070664, -115.0591256),
];

// ============================================================================
// Courier positions
// ============================================================================

pub const STRIP_COURIER: Place = Place::new("Encore at Wynn", 36.1289345, -115.1653620);
pub const SOUTH_COURIER: Place = Place::new("Bootlegger Bistro", 36.0492047, -115.1715744);
pub const EAST_COURIER: Place = Place::new("Islander's Grill", 36.0335058, -114.9856162);

pub fn all_places() -> Vec<Place> {
    let mut all = Vec::with_capacity(RESTAURANTS.len() + CUSTOMERS.len() + 3);
    all.extend_from_slice(RESTAURANTS);
    all.extend_from_slice(CUSTOMERS);
    all.extend([STRIP_COURIER, SOUTH_COURIER, EAST_COURIER]);
    all
}

#[test]
fn test_coordinates_in_vegas_area() {
    for place in all_places() {
        assert!(place.lat > 35.9 && place.lat < 36.3, "{} lat out of range: {}", place.name, place.lat);
        assert!(place.lng > -115.4 && place.lng < -114.8, "{} lng out of range: {}", place.name, place.lng);
    }
}
