//! Human-readable distance and duration strings for presentation code.

/// Render kilometres as metres below 1 km, otherwise as kilometres to one
/// decimal place.
///
/// # Examples
/// ```
/// use dropoff_core::format_distance;
///
/// assert_eq!(format_distance(0.5), "500 m");
/// assert_eq!(format_distance(3.456), "3.5 km");
/// assert_eq!(format_distance(0.0), "0 m");
/// ```
#[expect(clippy::float_arithmetic, reason = "unit conversion to metres")]
#[must_use]
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{} m", (km * 1000.0).round())
    } else {
        format!("{km:.1} km")
    }
}

/// Render minutes as `"N min"` below an hour, otherwise as `"Hh Mmin"`.
///
/// # Examples
/// ```
/// use dropoff_core::format_duration;
///
/// assert_eq!(format_duration(45.0), "45 min");
/// assert_eq!(format_duration(90.0), "1h 30min");
/// assert_eq!(format_duration(45.7), "46 min");
/// ```
#[expect(clippy::float_arithmetic, reason = "splitting minutes into hours")]
#[must_use]
pub fn format_duration(minutes: f64) -> String {
    if minutes < 60.0 {
        format!("{} min", minutes.round())
    } else {
        let hours = (minutes / 60.0).floor();
        let rest = (minutes % 60.0).round();
        format!("{hours}h {rest}min")
    }
}
