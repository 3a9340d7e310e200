//! The `RouteOptimiser` seam and the request, response and error types around it.

use std::collections::HashSet;
use std::time::Duration;

use geo::Coord;
use thiserror::Error;

use crate::{OptimizedRoute, Stop};

/// Identifier given to the synthetic start stop built from a current location.
///
/// It never appears in an [`OptimizedRoute`].
pub const CURRENT_LOCATION_ID: &str = "current-location";

/// Stops to order plus the driver's position, if known.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use dropoff_core::{OptimiseRequest, Stop};
///
/// let request = OptimiseRequest {
///     stops: vec![Stop::new("a", Coord { x: -4.0, y: 5.5 })],
///     current_location: Some(Coord { x: -4.0, y: 5.4 }),
/// };
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "wire::RequestRecord", into = "wire::RequestRecord")
)]
pub struct OptimiseRequest {
    /// Stops in the caller's (naive) order.
    pub stops: Vec<Stop>,
    /// Driver position (`x = lng`, `y = lat`) used as the tour anchor.
    pub current_location: Option<Coord<f64>>,
}

impl OptimiseRequest {
    /// Check the request keeps stop identifiers unambiguous.
    ///
    /// Coordinates are deliberately not inspected; malformed positions flow
    /// through as NaN distances.
    ///
    /// # Errors
    /// [`OptimiseError::DuplicateStopId`] when two stops share an id, and
    /// [`OptimiseError::ReservedStopId`] when a stop uses
    /// [`CURRENT_LOCATION_ID`] while a current location is supplied.
    pub fn validate(&self) -> Result<(), OptimiseError> {
        let mut seen = HashSet::with_capacity(self.stops.len());
        for stop in &self.stops {
            if self.current_location.is_some() && stop.id == CURRENT_LOCATION_ID {
                return Err(OptimiseError::ReservedStopId);
            }
            if !seen.insert(stop.id.as_str()) {
                return Err(OptimiseError::DuplicateStopId {
                    id: stop.id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Statistics gathered while optimising.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Wall-clock time spent.
    pub solve_time: Duration,
    /// Full 2-opt passes executed.
    pub passes: usize,
    /// Improving reversals applied.
    pub reversals: usize,
}

/// Result of a successful optimisation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimiseResponse {
    /// The ordered route and its figures.
    pub route: OptimizedRoute,
    /// Search statistics.
    pub diagnostics: Diagnostics,
}

/// Errors returned by [`OptimiseRequest::validate`] and
/// [`RouteOptimiser::optimise`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimiseError {
    /// Two stops share an identifier.
    #[error("stop id {id:?} appears more than once")]
    DuplicateStopId {
        /// The repeated identifier.
        id: String,
    },
    /// A stop uses the identifier reserved for the current location.
    #[error("stop id \"current-location\" is reserved while a current location is supplied")]
    ReservedStopId,
}

/// Order a set of stops for a single driver.
///
/// Implementations hold no per-call state and must be `Send + Sync` so one
/// instance can serve concurrent callers.
///
/// # Examples
/// ```rust
/// use dropoff_core::{
///     Diagnostics, OptimiseError, OptimiseRequest, OptimiseResponse, OptimizedRoute,
///     RouteOptimiser,
/// };
///
/// struct InputOrder;
///
/// impl RouteOptimiser for InputOrder {
///     fn optimise(&self, request: &OptimiseRequest) -> Result<OptimiseResponse, OptimiseError> {
///         request.validate()?;
///         Ok(OptimiseResponse {
///             route: OptimizedRoute {
///                 stops: request.stops.clone(),
///                 ..OptimizedRoute::empty()
///             },
///             diagnostics: Diagnostics::default(),
///         })
///     }
/// }
///
/// let response = InputOrder.optimise(&OptimiseRequest::default())?;
/// assert!(response.route.stops.is_empty());
/// # Ok::<(), OptimiseError>(())
/// ```
pub trait RouteOptimiser: Send + Sync {
    /// Produce a visiting order for `request`.
    ///
    /// # Errors
    /// Implementations return [`OptimiseError`] for requests that fail
    /// [`OptimiseRequest::validate`].
    fn optimise(&self, request: &OptimiseRequest) -> Result<OptimiseResponse, OptimiseError>;
}

#[cfg(feature = "serde")]
mod wire {
    use geo::Coord;
    use serde::{Deserialize, Serialize};

    use super::OptimiseRequest;
    use crate::Stop;

    #[derive(Serialize, Deserialize)]
    pub(super) struct LatLng {
        lat: f64,
        lng: f64,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub(super) struct RequestRecord {
        #[serde(default)]
        stops: Vec<Stop>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        current_location: Option<LatLng>,
    }

    impl From<RequestRecord> for OptimiseRequest {
        fn from(record: RequestRecord) -> Self {
            Self {
                stops: record.stops,
                current_location: record.current_location.map(|position| Coord {
                    x: position.lng,
                    y: position.lat,
                }),
            }
        }
    }

    impl From<OptimiseRequest> for RequestRecord {
        fn from(request: OptimiseRequest) -> Self {
            Self {
                stops: request.stops,
                current_location: request.current_location.map(|position| LatLng {
                    lat: position.y,
                    lng: position.x,
                }),
            }
        }
    }
}
