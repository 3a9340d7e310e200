//! Segment, total and savings figures for a refined tour.

use dropoff_core::{DistanceMatrix, OptimizedRoute, Savings, Segment, Stop};

use crate::construct::Waypoints;

/// Speed and on-site assumptions used to turn kilometres into minutes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TravelModel {
    pub(crate) average_speed_kmh: f64,
    pub(crate) default_visit_minutes: f64,
}

impl TravelModel {
    #[expect(
        clippy::float_arithmetic,
        reason = "flat-speed conversion from kilometres to minutes"
    )]
    fn minutes_for(self, km: f64) -> f64 {
        km / self.average_speed_kmh * 60.0
    }

    fn visit_minutes(self, stop: &Stop) -> f64 {
        stop.visit_minutes_or(self.default_visit_minutes)
    }
}

/// Build the caller-facing route for `order` over `waypoints`.
///
/// Segments and totals cover caller stops only; the leg from a synthetic
/// anchor is excluded. Savings compare the full tours, anchor included, of
/// the input order and of `order`.
pub(crate) fn summarise(
    waypoints: &Waypoints,
    order: &[usize],
    matrix: &DistanceMatrix,
    model: TravelModel,
) -> OptimizedRoute {
    let visible: Vec<(usize, &Stop)> = waypoints.visible(order).collect();
    let legs = segments(&visible, matrix, model);

    let total_distance = round_tenths(legs.iter().map(|leg| leg.distance).sum());
    let travel_minutes: f64 = legs.iter().map(|leg| leg.duration).sum();
    let visit_minutes: f64 = visible
        .iter()
        .map(|(_, stop)| model.visit_minutes(stop))
        .sum();

    let naive_km = matrix.path_length(&waypoints.naive_order());
    let optimised_km = matrix.path_length(order);

    OptimizedRoute {
        stops: visible.into_iter().map(|(_, stop)| stop.clone()).collect(),
        total_distance,
        total_duration: add(travel_minutes, visit_minutes),
        savings: savings(naive_km, optimised_km, model),
        segments: legs,
    }
}

fn segments(
    visible: &[(usize, &Stop)],
    matrix: &DistanceMatrix,
    model: TravelModel,
) -> Vec<Segment> {
    visible
        .windows(2)
        .filter_map(|pair| match pair {
            [(from_index, from), (to_index, to)] => {
                let km = matrix.distance(*from_index, *to_index);
                Some(Segment {
                    from: (*from).clone(),
                    to: (*to).clone(),
                    distance: round_tenths(km),
                    duration: model.minutes_for(km).round(),
                })
            }
            _ => None,
        })
        .collect()
}

/// Savings of `optimised_km` over `naive_km`, floored at zero.
///
/// `f64::max` also maps NaN inputs to zero.
#[expect(
    clippy::float_arithmetic,
    reason = "savings are differences and ratios of tour lengths"
)]
fn savings(naive_km: f64, optimised_km: f64, model: TravelModel) -> Savings {
    let saved_km = (naive_km - optimised_km).max(0.0);
    let percentage = if naive_km > 0.0 {
        (saved_km / naive_km * 100.0).round().max(0.0)
    } else {
        0.0
    };
    Savings {
        distance: round_tenths(saved_km).max(0.0),
        time: model.minutes_for(saved_km).round().max(0.0),
        percentage,
    }
}

#[expect(clippy::float_arithmetic, reason = "rounding to one decimal place")]
fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[expect(clippy::float_arithmetic, reason = "summing minutes")]
fn add(lhs: f64, rhs: f64) -> f64 {
    lhs + rhs
}
