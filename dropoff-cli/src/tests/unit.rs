//! Focused unit tests covering optimise configuration, request loading and output.

use super::helpers::{meridian_request, request_workspace, write_request, write_utf8};
use super::*;
use crate::optimise::{
    OptimiseConfig, OptimiserBuilder, OutputFormat, config_from_layers_for_test, load_request,
    run_optimise_with, write_summary,
};
use crate::{ARG_AVERAGE_SPEED, ARG_REQUEST, ENV_REQUEST};
use camino::Utf8PathBuf;
use dropoff_core::{
    Diagnostics, OptimiseError, OptimiseRequest, OptimiseResponse, OptimizedRoute, RouteOptimiser,
    Savings,
};
use dropoff_solver_local::LocalSearchConfig;
use rstest::rstest;
use std::cell::RefCell;

fn config_for(request_path: Utf8PathBuf) -> OptimiseConfig {
    OptimiseConfig {
        request_path,
        optimiser: LocalSearchConfig::default(),
        format: OutputFormat::Json,
    }
}

#[rstest]
fn converting_without_request_errors() {
    let err = OptimiseConfig::try_from(OptimiseArgs::default())
        .expect_err("missing request should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_REQUEST);
            assert_eq!(env, ENV_REQUEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn conversion_applies_defaults() {
    let args = OptimiseArgs {
        request_path: Some(Utf8PathBuf::from("request.json")),
        ..OptimiseArgs::default()
    };

    let config = OptimiseConfig::try_from(args).expect("config should build");
    assert_eq!(config.optimiser, LocalSearchConfig::default());
    assert_eq!(config.format, OutputFormat::Json);
}

#[rstest]
#[case(0.0)]
#[case(-12.0)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn conversion_rejects_unusable_speeds(#[case] speed: f64) {
    let args = OptimiseArgs {
        request_path: Some(Utf8PathBuf::from("request.json")),
        average_speed_kmh: Some(speed),
        ..OptimiseArgs::default()
    };

    match OptimiseConfig::try_from(args) {
        Err(CliError::InvalidSpeed { field, .. }) => assert_eq!(field, ARG_AVERAGE_SPEED),
        other => panic!("expected InvalidSpeed, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_missing_request() {
    let (_tmp, request_path) = request_workspace();

    let err = config_for(request_path.clone())
        .validate_sources()
        .expect_err("missing request should fail validation");
    match err {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, ARG_REQUEST);
            assert_eq!(path, request_path);
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_not_file() {
    let (_tmp, request_path) = request_workspace();
    std::fs::create_dir(&request_path).expect("request directory");

    let err = config_for(request_path.clone())
        .validate_sources()
        .expect_err("expected directory path to fail validation");
    match err {
        CliError::SourcePathNotFile { field, path } => {
            assert_eq!(field, ARG_REQUEST);
            assert_eq!(path, request_path);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn load_request_decodes_json() {
    let (_tmp, request_path) = request_workspace();
    let request = meridian_request();
    write_request(&request_path, &request);

    let decoded = load_request(&request_path).expect("request should decode");
    assert_eq!(decoded, request);
}

#[rstest]
fn written_request_uses_flat_wire_fields() {
    let (_tmp, request_path) = request_workspace();
    write_request(&request_path, &meridian_request());

    let raw = std::fs::read_to_string(&request_path).expect("read request");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("request JSON");
    assert_eq!(value.pointer("/stops/0/type"), Some(&serde_json::json!("pickup")));
    assert_eq!(value.pointer("/stops/0/lat"), Some(&serde_json::json!(5.5)));
    assert_eq!(
        value.pointer("/stops/1/timeWindow"),
        Some(&serde_json::json!({ "start": "14:00", "end": "16:00" }))
    );
    assert_eq!(
        value.pointer("/stops/1/estimatedDuration"),
        Some(&serde_json::json!(12.5))
    );
    assert_eq!(value.pointer("/stops/2/priority"), Some(&serde_json::json!("low")));
}

#[rstest]
fn load_request_rejects_invalid_json() {
    let (_tmp, request_path) = request_workspace();
    write_utf8(&request_path, b"{ not valid json");

    let err = load_request(&request_path).expect_err("invalid json should error");
    match err {
        CliError::ParseRequest { path, .. } => assert_eq!(path, request_path),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "request_path": 42 }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "request_path": "from-file.json",
            "average_speed_kmh": 20.0,
            "format": "summary",
        }),
        None,
    );
    composer.push_environment(json!({
        "request_path": "from-env.json",
        "max_passes": 3,
    }));
    composer.push_cli(json!({ "max_passes": 5 }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.request_path, Utf8PathBuf::from("from-env.json"));
    assert_eq!(config.optimiser.average_speed_kmh, 20.0);
    assert_eq!(config.optimiser.max_passes, Some(5));
    assert_eq!(config.format, OutputFormat::Summary);
}

#[rstest]
fn summary_lists_stops_then_totals() {
    let route = OptimizedRoute {
        stops: meridian_request().stops,
        total_distance: 22.2,
        total_duration: 59.0,
        savings: Savings {
            distance: 11.1,
            time: 22.0,
            percentage: 33.0,
        },
        segments: Vec::new(),
    };
    let mut buffer = Vec::new();

    write_summary(&mut buffer, &route).expect("summary should write");

    let text = String::from_utf8(buffer).expect("utf-8 summary");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "1. North depot (1 North Road)",
            "2. South market (9 South Lane)",
            "3. Middle school",
            "Total: 22.2 km, 59 min",
            "Saved: 11.1 km, 22 min (33%)",
        ]
    );
}

/// Records the configuration it was asked to build with.
#[derive(Default)]
struct RecordingBuilder {
    seen: RefCell<Option<LocalSearchConfig>>,
}

struct InputOrder;

impl RouteOptimiser for InputOrder {
    fn optimise(&self, request: &OptimiseRequest) -> Result<OptimiseResponse, OptimiseError> {
        Ok(OptimiseResponse {
            route: OptimizedRoute {
                stops: request.stops.clone(),
                ..OptimizedRoute::empty()
            },
            diagnostics: Diagnostics::default(),
        })
    }
}

impl OptimiserBuilder for RecordingBuilder {
    fn build(&self, config: &OptimiseConfig) -> Box<dyn RouteOptimiser> {
        self.seen.replace(Some(config.optimiser.clone()));
        Box::new(InputOrder)
    }
}

#[rstest]
fn builder_receives_resolved_settings() {
    let (_tmp, request_path) = request_workspace();
    write_request(&request_path, &meridian_request());
    let args = OptimiseArgs {
        request_path: Some(request_path),
        average_speed_kmh: Some(15.0),
        max_passes: Some(2),
        format: Some(OutputFormat::Json),
    };
    let builder = RecordingBuilder::default();
    let mut buffer = Vec::new();

    run_optimise_with(args, &builder, &mut buffer).expect("optimise should succeed");

    let seen = builder.seen.borrow().clone().expect("builder invoked");
    assert_eq!(seen.average_speed_kmh, 15.0);
    assert_eq!(seen.max_passes, Some(2));
    let response: OptimiseResponse =
        serde_json::from_slice(&buffer).expect("output should be a JSON response");
    let ids: Vec<&str> = response.route.stop_ids().collect();
    assert_eq!(ids, ["north", "south", "middle"]);
}
