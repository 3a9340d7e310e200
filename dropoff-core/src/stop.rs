//! Delivery stops and the tags the optimiser reads from them.

use geo::Coord;

/// Minutes spent at a stop when the caller does not supply an estimate.
pub const DEFAULT_VISIT_MINUTES: f64 = 5.0;

/// Urgency tag attached to a [`Stop`].
///
/// Absence of a tag on the wire means [`Priority::Normal`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Priority {
    /// Visited before any distance-based ordering.
    High,
    /// Ordered purely by distance.
    #[default]
    Normal,
    /// Ordered purely by distance.
    Low,
}

/// Whether a stop collects or drops off parcels. Opaque to the optimiser.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum StopKind {
    /// Parcel collection.
    Pickup,
    /// Parcel drop-off.
    #[default]
    Delivery,
}

/// Customer-facing time window, carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeWindow {
    /// Opening of the window, as supplied by the caller.
    pub start: String,
    /// Close of the window, as supplied by the caller.
    pub end: String,
}

/// A point a driver has to visit.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`, matching
/// the [`geo`] convention.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use dropoff_core::{Priority, Stop};
///
/// let stop = Stop::new("parcel-7", Coord { x: -4.0, y: 5.4 })
///     .with_priority(Priority::High);
///
/// assert_eq!(stop.lat(), 5.4);
/// assert_eq!(stop.lng(), -4.0);
/// assert_eq!(stop.visit_minutes(), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "wire::StopRecord", into = "wire::StopRecord")
)]
pub struct Stop {
    /// Identifier, unique within one optimisation call.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Display address.
    pub address: String,
    /// Geographic position.
    pub location: Coord<f64>,
    /// Urgency tag.
    pub priority: Priority,
    /// Optional delivery window.
    pub time_window: Option<TimeWindow>,
    /// Minutes expected on site; `None` falls back to [`DEFAULT_VISIT_MINUTES`].
    pub estimated_duration: Option<f64>,
    /// Pickup or delivery.
    pub kind: StopKind,
}

impl Stop {
    /// Construct a normal-priority delivery stop with empty display strings.
    #[must_use]
    pub fn new(id: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            address: String::new(),
            location,
            priority: Priority::Normal,
            time_window: None,
            estimated_duration: None,
            kind: StopKind::Delivery,
        }
    }

    /// Set the display name and address.
    #[must_use]
    pub fn with_label(mut self, name: impl Into<String>, address: impl Into<String>) -> Self {
        self.name = name.into();
        self.address = address.into();
        self
    }

    /// Set the urgency tag.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the expected minutes on site.
    #[must_use]
    pub fn with_estimated_duration(mut self, minutes: f64) -> Self {
        self.estimated_duration = Some(minutes);
        self
    }

    /// Set the pickup/delivery kind.
    #[must_use]
    pub fn with_kind(mut self, kind: StopKind) -> Self {
        self.kind = kind;
        self
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.location.x
    }

    /// Whether the stop must be served ahead of distance-based ordering.
    #[must_use]
    pub fn is_urgent(&self) -> bool {
        self.priority == Priority::High
    }

    /// Minutes on site, defaulting to [`DEFAULT_VISIT_MINUTES`].
    #[must_use]
    pub fn visit_minutes(&self) -> f64 {
        self.visit_minutes_or(DEFAULT_VISIT_MINUTES)
    }

    /// Minutes on site, defaulting to `fallback` when no estimate was given.
    #[must_use]
    pub fn visit_minutes_or(&self, fallback: f64) -> f64 {
        self.estimated_duration.unwrap_or(fallback)
    }
}

#[cfg(feature = "serde")]
mod wire {
    use geo::Coord;
    use serde::{Deserialize, Serialize};

    use super::{Priority, Stop, StopKind, TimeWindow};

    /// Flat JSON shape of a stop: `lat`/`lng` instead of a nested coordinate.
    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub(super) struct StopRecord {
        id: String,
        #[serde(default)]
        name: String,
        #[serde(default)]
        address: String,
        lat: f64,
        lng: f64,
        #[serde(default)]
        priority: Priority,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time_window: Option<TimeWindow>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        estimated_duration: Option<f64>,
        #[serde(rename = "type", default)]
        kind: StopKind,
    }

    impl From<StopRecord> for Stop {
        fn from(record: StopRecord) -> Self {
            Self {
                id: record.id,
                name: record.name,
                address: record.address,
                location: Coord {
                    x: record.lng,
                    y: record.lat,
                },
                priority: record.priority,
                time_window: record.time_window,
                estimated_duration: record.estimated_duration,
                kind: record.kind,
            }
        }
    }

    impl From<Stop> for StopRecord {
        fn from(stop: Stop) -> Self {
            Self {
                id: stop.id,
                name: stop.name,
                address: stop.address,
                lat: stop.location.y,
                lng: stop.location.x,
                priority: stop.priority,
                time_window: stop.time_window,
                estimated_duration: stop.estimated_duration,
                kind: stop.kind,
            }
        }
    }
}
