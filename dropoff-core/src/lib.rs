//! Core domain types for the Dropoff route-optimisation engine.
//!
//! The crate models delivery stops and optimised routes, computes
//! great-circle distances between stops, formats figures for display and
//! defines the [`RouteOptimiser`] seam implemented by solver crates.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod distance;
mod format;
mod optimiser;
mod route;
mod stop;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use distance::{DistanceMatrix, EARTH_RADIUS_KM, coord_distance_km, haversine_km};
pub use format::{format_distance, format_duration};
pub use optimiser::{
    CURRENT_LOCATION_ID, Diagnostics, OptimiseError, OptimiseRequest, OptimiseResponse,
    RouteOptimiser,
};
pub use route::{OptimizedRoute, Savings, Segment};
pub use stop::{DEFAULT_VISIT_MINUTES, Priority, Stop, StopKind, TimeWindow};
