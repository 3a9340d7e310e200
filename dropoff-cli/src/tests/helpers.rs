//! Test helpers for writing optimise requests into temporary workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use dropoff_core::{OptimiseRequest, Priority, Stop, StopKind, TimeWindow};
use geo::Coord;
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

/// Temporary directory plus the UTF-8 path of `request.json` inside it.
pub(super) fn request_workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    let request_path = root.join("request.json");
    (tmp, request_path)
}

/// Three stops on one meridian, listed north, south, middle.
///
/// The stops carry a pickup kind, a time window, a visit estimate and a low
/// priority so the optional wire fields are exercised.
pub(super) fn meridian_request() -> OptimiseRequest {
    OptimiseRequest {
        stops: vec![
            Stop::new("north", Coord { x: -4.0, y: 5.5 })
                .with_label("North depot", "1 North Road")
                .with_kind(StopKind::Pickup),
            Stop {
                time_window: Some(TimeWindow {
                    start: "14:00".to_owned(),
                    end: "16:00".to_owned(),
                }),
                ..Stop::new("south", Coord { x: -4.0, y: 5.3 })
                    .with_label("South market", "9 South Lane")
                    .with_estimated_duration(12.5)
            },
            Stop::new("middle", Coord { x: -4.0, y: 5.4 })
                .with_label("Middle school", "")
                .with_priority(Priority::Low),
        ],
        current_location: None,
    }
}

pub(super) fn write_request(path: &Utf8Path, request: &OptimiseRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialise request");
    write_utf8(path, payload.as_bytes());
}
