//! Local-search route optimiser for Dropoff.
//!
//! This crate provides [`LocalSearchOptimiser`], the default implementation of
//! the [`RouteOptimiser`](dropoff_core::RouteOptimiser) trait. A tour is seeded
//! at the driver's position (or the first stop), urgent stops are placed next
//! in the order they were listed, the rest are appended by nearest neighbour,
//! and 2-opt reversals then shorten the tour until no single reversal helps.
//!
//! The optimiser is a pure function of its input: no I/O, no shared state and
//! no randomness, so identical requests produce identical routes.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod construct;
mod metrics;
mod refine;
mod solver;

pub use solver::{LocalSearchConfig, LocalSearchOptimiser, optimize_route};
