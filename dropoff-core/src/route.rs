//! Optimised visiting orders and the figures reported alongside them.

use crate::Stop;

/// One travelled leg between consecutive stops.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// Stop the leg departs from.
    pub from: Stop,
    /// Stop the leg arrives at.
    pub to: Stop,
    /// Kilometres, rounded to one decimal place.
    pub distance: f64,
    /// Minutes, rounded to the nearest whole minute.
    pub duration: f64,
}

/// Improvement of the optimised order over the input order.
///
/// All fields are floored at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Savings {
    /// Kilometres saved.
    pub distance: f64,
    /// Minutes saved.
    pub time: f64,
    /// Share of the naive distance saved, `0..=100`.
    pub percentage: f64,
}

impl Savings {
    /// All-zero savings.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            distance: 0.0,
            time: 0.0,
            percentage: 0.0,
        }
    }
}

/// An ordered tour over the caller's stops.
///
/// `stops` is a permutation of the input stops; a synthetic start position is
/// never included. `segments` has one entry per consecutive pair.
///
/// # Examples
/// ```
/// use dropoff_core::OptimizedRoute;
///
/// let route = OptimizedRoute::empty();
/// assert!(route.stops.is_empty());
/// assert!(route.segments.is_empty());
/// assert_eq!(route.total_distance, 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct OptimizedRoute {
    /// Stops in visiting order.
    pub stops: Vec<Stop>,
    /// Kilometres, rounded to one decimal place.
    pub total_distance: f64,
    /// Travel plus on-site minutes.
    pub total_duration: f64,
    /// Improvement over the input order.
    pub savings: Savings,
    /// Legs between consecutive stops.
    pub segments: Vec<Segment>,
}

impl OptimizedRoute {
    /// Route over no stops.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            stops: Vec::new(),
            total_distance: 0.0,
            total_duration: 0.0,
            savings: Savings::none(),
            segments: Vec::new(),
        }
    }

    /// Identifiers in visiting order.
    pub fn stop_ids(&self) -> impl Iterator<Item = &str> {
        self.stops.iter().map(|stop| stop.id.as_str())
    }
}
