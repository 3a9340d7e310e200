//! Great-circle distances between stops.
//!
//! Every ordering decision the optimiser makes is driven by
//! [`haversine_km`], so the formula here is fixed: Earth radius 6371 km and
//! the `atan2` form of the haversine. Coordinates are not validated; NaN or
//! out-of-range inputs produce NaN distances.

use geo::Coord;

use crate::Stop;

/// Mean Earth radius used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres between two WGS84 points given in
/// degrees.
///
/// # Examples
/// ```
/// use dropoff_core::haversine_km;
///
/// let km = haversine_km(5.50, -4.00, 5.40, -4.00);
/// assert!((km - 11.119).abs() < 0.001);
/// assert_eq!(haversine_km(5.4, -4.0, 5.4, -4.0), 0.0);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "haversine is a floating-point formula"
)]
#[must_use]
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let half_lat = (d_lat / 2.0).sin();
    let half_lng = (d_lng / 2.0).sin();
    let a = half_lat * half_lat
        + lat1.to_radians().cos() * lat2.to_radians().cos() * half_lng * half_lng;
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// [`haversine_km`] between two `geo` coordinates (`x = lng`, `y = lat`).
#[must_use]
pub fn coord_distance_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    haversine_km(from.y, from.x, to.y, to.x)
}

/// Symmetric `n×n` matrix of pairwise stop distances in kilometres.
///
/// `distance(i, j)` is the haversine distance between `stops[i]` and
/// `stops[j]`; the diagonal is zero.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use dropoff_core::{DistanceMatrix, Stop};
///
/// let stops = [
///     Stop::new("a", Coord { x: -4.0, y: 5.5 }),
///     Stop::new("b", Coord { x: -4.0, y: 5.4 }),
/// ];
/// let matrix = DistanceMatrix::from_stops(&stops);
/// assert_eq!(matrix.len(), 2);
/// assert_eq!(matrix.distance(0, 0), 0.0);
/// assert_eq!(matrix.distance(0, 1), matrix.distance(1, 0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    cells: Vec<f64>,
}

impl DistanceMatrix {
    /// Build the matrix for `stops` in slice order.
    #[must_use]
    pub fn from_stops(stops: &[Stop]) -> Self {
        let locations: Vec<Coord<f64>> = stops.iter().map(|stop| stop.location).collect();
        Self::from_coords(&locations)
    }

    /// Build the matrix for raw coordinates in slice order.
    #[must_use]
    pub fn from_coords(locations: &[Coord<f64>]) -> Self {
        let size = locations.len();
        let mut cells = vec![0.0; size * size];
        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate().skip(i + 1) {
                let km = coord_distance_km(*from, *to);
                if let Some(cell) = cells.get_mut(i * size + j) {
                    *cell = km;
                }
                if let Some(cell) = cells.get_mut(j * size + i) {
                    *cell = km;
                }
            }
        }
        Self { size, cells }
    }

    /// Number of rows (and columns).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Whether the matrix covers no stops.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Distance in kilometres from stop `from` to stop `to`.
    ///
    /// Indices outside the matrix yield `f64::INFINITY`, so they can never
    /// win a nearest-neighbour comparison.
    #[must_use]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        if from >= self.size || to >= self.size {
            return f64::INFINITY;
        }
        self.cells
            .get(from * self.size + to)
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    /// Total length of the open path visiting `order` in sequence.
    #[must_use]
    pub fn path_length(&self, order: &[usize]) -> f64 {
        order
            .windows(2)
            .map(|pair| match pair {
                [from, to] => self.distance(*from, *to),
                _ => 0.0,
            })
            .sum()
    }
}
