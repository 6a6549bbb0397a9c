use itertools::Itertools;
use log::debug;

/// A `(lng, lat)` pair. Altitude is never kept.
pub type Coordinate = (f64, f64);

fn parse_component(component: &str) -> Option<f64> {
    let value: f64 = component.trim().parse().ok()?;
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

fn parse_tuple(token: &str) -> Option<Coordinate> {
    let (lng, lat) = token.split(',').map(parse_component).next_tuple()?;
    Some((lng?, lat?))
}

/// Parse a KML coordinate string (`lng,lat[,alt] lng,lat[,alt] ...`).
///
/// Tuples are separated by any amount of whitespace. A tuple without two
/// numeric leading components is dropped, the remaining ones are kept in
/// order.
///
/// # Example
///
/// ```
/// use kml2geojson::coordinates::parse_coordinates;
///
/// let coordinates = parse_coordinates(" 1,2,0  3,4,0 bad ");
/// assert_eq!(coordinates, vec![(1., 2.), (3., 4.)]);
/// ```
pub fn parse_coordinates(coordinates: &str) -> Vec<Coordinate> {
    coordinates
        .split_whitespace()
        .filter_map(|token| {
            let coordinate = parse_tuple(token);
            if coordinate.is_none() {
                debug!("dropping malformed coordinate tuple {:?}", token);
            }
            coordinate
        })
        .collect()
}

/// Parse the coordinates of a single point. The whole string is one tuple.
pub fn parse_point(coordinates: &str) -> Option<Coordinate> {
    parse_tuple(coordinates.trim())
}
