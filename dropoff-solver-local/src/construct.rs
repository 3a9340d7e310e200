//! Initial tour construction.
//!
//! The tour is built over a working list of waypoints whose first entry is
//! the anchor: either a synthetic stop at the driver's position or the first
//! caller stop. Urgent stops follow the anchor in input order, then the
//! remaining stops are appended by nearest neighbour.

use dropoff_core::{CURRENT_LOCATION_ID, DistanceMatrix, Stop};
use geo::Coord;

/// Stops the optimiser works on, anchor first.
#[derive(Debug, Clone)]
pub(crate) struct Waypoints {
    /// Anchor followed by the caller's stops in input order.
    pub(crate) stops: Vec<Stop>,
    /// Whether `stops[0]` was synthesised from a current location.
    pub(crate) synthetic_anchor: bool,
}

impl Waypoints {
    /// Build the working list, prepending a synthetic anchor when a current
    /// location is supplied.
    pub(crate) fn new(stops: &[Stop], current_location: Option<Coord<f64>>) -> Self {
        match current_location {
            Some(position) => {
                let mut working = Vec::with_capacity(stops.len() + 1);
                working.push(
                    Stop::new(CURRENT_LOCATION_ID, position)
                        .with_label("Current location", "")
                        .with_estimated_duration(0.0),
                );
                working.extend_from_slice(stops);
                Self {
                    stops: working,
                    synthetic_anchor: true,
                }
            }
            None => Self {
                stops: stops.to_vec(),
                synthetic_anchor: false,
            },
        }
    }

    /// Pairwise distances over the working list.
    pub(crate) fn matrix(&self) -> DistanceMatrix {
        DistanceMatrix::from_stops(&self.stops)
    }

    /// The unoptimised tour: anchor then the caller's order.
    pub(crate) fn naive_order(&self) -> Vec<usize> {
        (0..self.stops.len()).collect()
    }

    /// Caller stops in tour order, with any synthetic anchor removed.
    pub(crate) fn visible<'a>(
        &'a self,
        order: &'a [usize],
    ) -> impl Iterator<Item = (usize, &'a Stop)> {
        order
            .iter()
            .copied()
            .filter(move |&index| !(self.synthetic_anchor && index == 0))
            .filter_map(move |index| self.stops.get(index).map(|stop| (index, stop)))
    }
}

/// Build the initial tour as indices into `waypoints.stops`.
///
/// The anchor stays at position zero. Urgent stops are placed next in their
/// input order regardless of distance, then each remaining stop is chosen as
/// the closest unplaced stop to the last one placed. Ties go to the stop
/// listed first.
pub(crate) fn construct(waypoints: &Waypoints, matrix: &DistanceMatrix) -> Vec<usize> {
    let count = waypoints.stops.len();
    if count == 0 {
        return Vec::new();
    }

    let mut order = Vec::with_capacity(count);
    let mut placed = vec![false; count];
    place(&mut order, &mut placed, 0);

    for (index, stop) in waypoints.stops.iter().enumerate().skip(1) {
        if stop.is_urgent() {
            place(&mut order, &mut placed, index);
        }
    }
    let urgent = order.len() - 1;

    while order.len() < count {
        let last = order.last().copied().unwrap_or(0);
        let Some(next) = nearest_unplaced(matrix, &placed, last) else {
            break;
        };
        place(&mut order, &mut placed, next);
    }

    log::debug!("constructed tour over {count} waypoints with {urgent} urgent stops first");
    order
}

fn place(order: &mut Vec<usize>, placed: &mut [bool], index: usize) {
    if let Some(flag) = placed.get_mut(index) {
        *flag = true;
        order.push(index);
    }
}

fn nearest_unplaced(matrix: &DistanceMatrix, placed: &[bool], from: usize) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (candidate, _) in placed.iter().enumerate().filter(|(_, done)| !**done) {
        let distance = matrix.distance(from, candidate);
        match best {
            Some((_, best_distance)) if distance >= best_distance || distance.is_nan() => {}
            _ => best = Some((candidate, distance)),
        }
    }
    best.map(|(index, _)| index)
}
