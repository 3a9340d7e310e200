//! Stop builders shared by unit, behaviour and property tests.
//!
//! Available under `cfg(test)` and the `test-support` feature.

use geo::Coord;

use crate::{Priority, Stop};

/// Construct a normal-priority stop at `lat`/`lng`, labelled with its id.
///
/// # Examples
/// ```rust
/// use dropoff_core::test_support::stop;
///
/// let stop = stop("north", 5.5, -4.0);
/// assert_eq!(stop.id, "north");
/// assert_eq!(stop.lat(), 5.5);
/// ```
#[must_use]
pub fn stop(id: &str, lat: f64, lng: f64) -> Stop {
    Stop::new(id, Coord { x: lng, y: lat }).with_label(id, format!("{id} street"))
}

/// Construct a stop tagged [`Priority::High`].
#[must_use]
pub fn urgent_stop(id: &str, lat: f64, lng: f64) -> Stop {
    stop(id, lat, lng).with_priority(Priority::High)
}

/// Identifiers of `stops`, sorted, for multiset comparisons.
#[must_use]
pub fn sorted_ids<'a, I>(stops: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Stop>,
{
    let mut ids: Vec<String> = stops.into_iter().map(|stop| stop.id.clone()).collect();
    ids.sort_unstable();
    ids
}
