#![expect(
    clippy::float_arithmetic,
    reason = "length comparisons allow a small tolerance"
)]

//! Property-based tests for the local-search optimiser.
//!
//! # Invariants tested
//!
//! - **Permutation:** the returned stops are exactly the input stops.
//! - **Anchor hidden:** the synthetic current-location stop never leaks.
//! - **Anchor first:** without a current location the first stop stays first.
//! - **Non-negative figures:** savings and segment values are never negative.
//! - **Shape:** one segment per consecutive pair of stops.
//! - **Refinement:** 2-opt never lengthens the constructed tour.
//! - **Determinism:** identical input yields an identical route.


use dropoff_core::test_support::sorted_ids;
use dropoff_core::{CURRENT_LOCATION_ID, OptimizedRoute, coord_distance_km};
use dropoff_solver_local::{LocalSearchConfig, LocalSearchOptimiser, optimize_route};
use geo::Coord;
use proptest::prelude::*;

use proptest_support::{current_location_strategy, stop_set_strategy};

/// Exact tour length in kilometres, including the leg from `start` when given.
fn tour_km(route: &OptimizedRoute, start: Option<Coord<f64>>) -> f64 {
    let mut points: Vec<Coord<f64>> = start.into_iter().collect();
    points.extend(route.stops.iter().map(|stop| stop.location));
    points
        .windows(2)
        .map(|pair| match pair {
            [from, to] => coord_distance_km(*from, *to),
            _ => 0.0,
        })
        .sum()
}

fn optimiser_with_passes(max_passes: Option<usize>) -> LocalSearchOptimiser {
    LocalSearchOptimiser::with_config(LocalSearchConfig {
        max_passes,
        ..LocalSearchConfig::default()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: the route is a permutation of the input stops.
    #[test]
    fn route_is_a_permutation_of_input(
        stops in stop_set_strategy(0, 20),
        current in current_location_strategy(),
    ) {
        let route = optimize_route(&stops, current);
        prop_assert_eq!(sorted_ids(&route.stops), sorted_ids(&stops));
        prop_assert!(route.stop_ids().all(|id| id != CURRENT_LOCATION_ID));
    }

    /// Property: with no current location, the first input stop anchors the tour.
    #[test]
    fn first_stop_anchors_without_current_location(stops in stop_set_strategy(1, 15)) {
        let route = optimize_route(&stops, None);
        prop_assert_eq!(
            route.stops.first().map(|stop| stop.id.clone()),
            stops.first().map(|stop| stop.id.clone())
        );
    }

    /// Property: savings and segment figures are never negative, and segments
    /// link consecutive stops.
    #[test]
    fn figures_are_non_negative(
        stops in stop_set_strategy(0, 20),
        current in current_location_strategy(),
    ) {
        let route = optimize_route(&stops, current);
        prop_assert!(route.savings.distance >= 0.0);
        prop_assert!(route.savings.time >= 0.0);
        prop_assert!(route.savings.percentage >= 0.0);
        prop_assert!(route.savings.percentage <= 100.0);
        prop_assert_eq!(route.segments.len(), route.stops.len().saturating_sub(1));
        for (segment, pair) in route.segments.iter().zip(route.stops.windows(2)) {
            prop_assert!(segment.distance >= 0.0);
            prop_assert!(segment.duration >= 0.0);
            if let [from, to] = pair {
                prop_assert_eq!(&segment.from.id, &from.id);
                prop_assert_eq!(&segment.to.id, &to.id);
            }
        }
    }

    /// Property: refining never lengthens the constructed tour, and a pass
    /// cap still returns every stop.
    #[test]
    fn refinement_never_lengthens_construction(
        stops in stop_set_strategy(4, 20),
        current in current_location_strategy(),
    ) {
        let (constructed, skipped) = optimiser_with_passes(Some(0)).plan(&stops, current);
        let (capped, capped_stats) = optimiser_with_passes(Some(1)).plan(&stops, current);
        let (refined, _) = optimiser_with_passes(None).plan(&stops, current);

        prop_assert_eq!(skipped.passes, 0);
        prop_assert!(capped_stats.passes <= 1);
        prop_assert_eq!(sorted_ids(&capped.stops), sorted_ids(&stops));

        let constructed_km = tour_km(&constructed, current);
        prop_assert!(tour_km(&capped, current) <= constructed_km + 1e-9);
        prop_assert!(tour_km(&refined, current) <= constructed_km + 1e-9);
    }

    /// Property: the optimiser is deterministic.
    #[test]
    fn identical_input_gives_identical_route(
        stops in stop_set_strategy(0, 15),
        current in current_location_strategy(),
    ) {
        prop_assert_eq!(optimize_route(&stops, current), optimize_route(&stops, current));
    }
}
