//! Sample values shared by unit and behaviour tests.

use geo::Coord;

use crate::{Location, LocationId, Page};

/// A well-known saved place used as a preview fixture.
#[must_use]
pub fn example_location() -> Location {
    let coordinate = Coord {
        x: -0.141,
        y: 51.501,
    };
    match Location::new(
        LocationId::generate(),
        "Buckingham Palace",
        "Lit by over 40,000 lightbulbs, the palace is the London residence \
         of the British monarch.",
        coordinate,
    ) {
        Ok(location) => location,
        Err(err) => panic!("example coordinate should be valid: {err}"),
    }
}

/// Build a location with default text at the given latitude and longitude.
///
/// Panics when the coordinate is out of range; intended for fixtures only.
#[must_use]
pub fn location_at(latitude: f64, longitude: f64) -> Location {
    match Location::dropped_at(Coord {
        x: longitude,
        y: latitude,
    }) {
        Ok(location) => location,
        Err(err) => panic!("fixture coordinate should be valid: {err}"),
    }
}

/// Pages in the order a geosearch typically returns them (by page id).
#[must_use]
pub fn unsorted_pages() -> Vec<Page> {
    vec![
        Page::new(1, "Banana").with_description("A yellow fruit"),
        Page::new(2, "Apple"),
    ]
}

/// Every field of `location`, for comparisons that must look past the
/// id-only equality of [`Location`].
///
/// Coordinates are compared by bit pattern, so a round trip has to be exact.
#[must_use]
pub fn location_content(location: &Location) -> (LocationId, String, String, u64, u64) {
    (
        location.id(),
        location.name.clone(),
        location.description.clone(),
        location.latitude().to_bits(),
        location.longitude().to_bits(),
    )
}

/// [`location_content`] for each entry of `locations`, in order.
#[must_use]
pub fn contents(locations: &[Location]) -> Vec<(LocationId, String, String, u64, u64)> {
    locations.iter().map(location_content).collect()
}
