//! Facade crate for the Dropoff route-optimisation engine.
//!
//! This crate re-exports the core domain types and exposes the local-search
//! optimiser behind the `solver-local` feature flag.

#![forbid(unsafe_code)]

pub use dropoff_core::{
    Diagnostics, DistanceMatrix, OptimiseError, OptimiseRequest, OptimiseResponse, OptimizedRoute,
    Priority, RouteOptimiser, Savings, Segment, Stop, StopKind, TimeWindow, format_distance,
    format_duration, haversine_km,
};

#[cfg(feature = "solver-local")]
pub use dropoff_solver_local::{LocalSearchConfig, LocalSearchOptimiser, optimize_route};
