//! `LocalSearchOptimiser`: priority-aware nearest neighbour followed by 2-opt.

use std::time::Instant;

use dropoff_core::{
    DEFAULT_VISIT_MINUTES, Diagnostics, OptimiseError, OptimiseRequest, OptimiseResponse,
    OptimizedRoute, RouteOptimiser, Stop,
};
use geo::Coord;

use crate::construct::{Waypoints, construct};
use crate::metrics::{TravelModel, summarise};
use crate::refine::two_opt;

/// Configuration for [`LocalSearchOptimiser`].
#[derive(Debug, Clone, PartialEq)]
pub struct LocalSearchConfig {
    /// Flat average speed used to convert kilometres to minutes.
    pub average_speed_kmh: f64,
    /// Minutes on site for stops without an estimate.
    pub default_visit_minutes: f64,
    /// Upper bound on full 2-opt passes; `None` runs to a local optimum.
    pub max_passes: Option<usize>,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: 30.0,
            default_visit_minutes: DEFAULT_VISIT_MINUTES,
            max_passes: None,
        }
    }
}

impl LocalSearchConfig {
    const fn travel_model(&self) -> TravelModel {
        TravelModel {
            average_speed_kmh: self.average_speed_kmh,
            default_visit_minutes: self.default_visit_minutes,
        }
    }
}

/// Stateless route optimiser.
///
/// Each call builds its own distance matrix and working tour, so one
/// instance can be shared across threads.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use dropoff_core::{OptimiseRequest, RouteOptimiser, Stop};
/// use dropoff_solver_local::LocalSearchOptimiser;
///
/// let request = OptimiseRequest {
///     stops: vec![
///         Stop::new("north", Coord { x: -4.0, y: 5.5 }),
///         Stop::new("south", Coord { x: -4.0, y: 5.3 }),
///         Stop::new("middle", Coord { x: -4.0, y: 5.4 }),
///     ],
///     current_location: None,
/// };
/// let response = LocalSearchOptimiser::default().optimise(&request)?;
/// let ids: Vec<&str> = response.route.stop_ids().collect();
/// assert_eq!(ids, ["north", "middle", "south"]);
/// # Ok::<(), dropoff_core::OptimiseError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocalSearchOptimiser {
    config: LocalSearchConfig,
}

impl LocalSearchOptimiser {
    /// Construct an optimiser using default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an optimiser with explicit configuration.
    #[must_use]
    pub const fn with_config(config: LocalSearchConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &LocalSearchConfig {
        &self.config
    }

    /// Order `stops` without validating identifiers.
    ///
    /// Returns the route together with search diagnostics.
    #[must_use]
    pub fn plan(
        &self,
        stops: &[Stop],
        current_location: Option<Coord<f64>>,
    ) -> (OptimizedRoute, Diagnostics) {
        let started_at = Instant::now();
        if stops.is_empty() {
            return (
                OptimizedRoute::empty(),
                Diagnostics {
                    solve_time: started_at.elapsed(),
                    ..Diagnostics::default()
                },
            );
        }

        let waypoints = Waypoints::new(stops, current_location);
        let matrix = waypoints.matrix();
        let mut order = construct(&waypoints, &matrix);
        let refinement = two_opt(&mut order, &matrix, self.config.max_passes);
        let route = summarise(&waypoints, &order, &matrix, self.config.travel_model());

        let diagnostics = Diagnostics {
            solve_time: started_at.elapsed(),
            passes: refinement.passes,
            reversals: refinement.reversals,
        };
        (route, diagnostics)
    }
}

impl RouteOptimiser for LocalSearchOptimiser {
    fn optimise(&self, request: &OptimiseRequest) -> Result<OptimiseResponse, OptimiseError> {
        request.validate()?;
        let (route, diagnostics) = self.plan(&request.stops, request.current_location);
        Ok(OptimiseResponse { route, diagnostics })
    }
}

/// Order `stops` for a driver at `current_location` using the default
/// configuration.
///
/// When no current location is given the first stop anchors the tour.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use dropoff_core::{Priority, Stop};
/// use dropoff_solver_local::optimize_route;
///
/// let stops = vec![
///     Stop::new("start", Coord { x: -4.0, y: 5.5 }),
///     Stop::new("near", Coord { x: -4.0, y: 5.45 }),
///     Stop::new("urgent", Coord { x: -4.0, y: 5.3 }).with_priority(Priority::High),
/// ];
/// let route = optimize_route(&stops, None);
/// let ids: Vec<&str> = route.stop_ids().collect();
/// assert_eq!(ids, ["start", "urgent", "near"]);
/// ```
#[must_use]
pub fn optimize_route(stops: &[Stop], current_location: Option<Coord<f64>>) -> OptimizedRoute {
    LocalSearchOptimiser::default()
        .plan(stops, current_location)
        .0
}
