//! Optimise command implementation for the Dropoff CLI.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use dropoff_core::{
    OptimiseRequest, OptimiseResponse, OptimizedRoute, RouteOptimiser, format_distance,
    format_duration,
};
use dropoff_solver_local::{LocalSearchConfig, LocalSearchOptimiser};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{ARG_AVERAGE_SPEED, ARG_FORMAT, ARG_MAX_PASSES, ARG_REQUEST, CliError, ENV_REQUEST};

/// How the optimised route is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Pretty-printed JSON response.
    #[default]
    Json,
    /// Numbered stop list followed by totals and savings.
    Summary,
}

/// CLI arguments for the `optimise` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Order the stops of a JSON request so the driver covers the \
                 least distance while visiting urgent stops first. Settings \
                 can come from CLI flags, configuration files, or environment \
                 variables.",
    about = "Optimise the visiting order of a stop list"
)]
#[ortho_config(prefix = "DROPOFF")]
pub(crate) struct OptimiseArgs {
    /// Path to a JSON file containing an optimise request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Flat average travel speed in km/h (default 30).
    #[arg(long = ARG_AVERAGE_SPEED, value_name = "kmh")]
    #[serde(default)]
    pub(crate) average_speed_kmh: Option<f64>,
    /// Stop 2-opt refinement after this many passes.
    #[arg(long = ARG_MAX_PASSES, value_name = "count")]
    #[serde(default)]
    pub(crate) max_passes: Option<usize>,
    /// Output format.
    #[arg(long = ARG_FORMAT, value_enum)]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
}

impl OptimiseArgs {
    pub(crate) fn into_config(self) -> Result<OptimiseConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        OptimiseConfig::try_from(merged)
    }
}

/// Resolved `optimise` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OptimiseConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Optimiser settings.
    pub(crate) optimiser: LocalSearchConfig,
    /// Output format.
    pub(crate) format: OutputFormat,
}

impl OptimiseConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        let path = &self.request_path;
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field: ARG_REQUEST,
                path: path.clone(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field: ARG_REQUEST,
                    path: path.clone(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field: ARG_REQUEST,
                path: path.clone(),
                source,
            }),
        }
    }
}

impl TryFrom<OptimiseArgs> for OptimiseConfig {
    type Error = CliError;

    fn try_from(args: OptimiseArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_REQUEST,
        })?;

        let defaults = LocalSearchConfig::default();
        let average_speed_kmh = args
            .average_speed_kmh
            .unwrap_or(defaults.average_speed_kmh);
        if !(average_speed_kmh.is_finite() && average_speed_kmh > 0.0) {
            return Err(CliError::InvalidSpeed {
                field: ARG_AVERAGE_SPEED,
                value: average_speed_kmh,
            });
        }

        Ok(Self {
            request_path,
            optimiser: LocalSearchConfig {
                average_speed_kmh,
                max_passes: args.max_passes,
                ..defaults
            },
            format: args.format.unwrap_or_default(),
        })
    }
}

/// Builds an optimiser for the current invocation.
pub(crate) trait OptimiserBuilder {
    fn build(&self, config: &OptimiseConfig) -> Box<dyn RouteOptimiser>;
}

pub(crate) struct DefaultOptimiserBuilder;

impl OptimiserBuilder for DefaultOptimiserBuilder {
    fn build(&self, config: &OptimiseConfig) -> Box<dyn RouteOptimiser> {
        Box::new(LocalSearchOptimiser::with_config(config.optimiser.clone()))
    }
}

pub(crate) fn run_optimise(args: OptimiseArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_optimise_with(args, &DefaultOptimiserBuilder, &mut stdout)
}

pub(crate) fn run_optimise_with(
    args: OptimiseArgs,
    builder: &dyn OptimiserBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let response = execute_optimise(&config, builder)?;
    match config.format {
        OutputFormat::Json => write_json(writer, &response),
        OutputFormat::Summary => write_summary(writer, &response.route),
    }
}

fn execute_optimise(
    config: &OptimiseConfig,
    builder: &dyn OptimiserBuilder,
) -> Result<OptimiseResponse, CliError> {
    let request = load_request(&config.request_path)?;
    request
        .validate()
        .map_err(|source| CliError::InvalidRequest {
            path: config.request_path.clone(),
            source,
        })?;
    log::debug!(
        "optimising {} stops from {}",
        request.stops.len(),
        config.request_path
    );
    let optimiser = builder.build(config);
    let response = optimiser
        .optimise(&request)
        .map_err(|source| CliError::Optimise { source })?;
    log::info!(
        "optimised {} stops in {:?} ({} passes, {} reversals)",
        response.route.stops.len(),
        response.diagnostics.solve_time,
        response.diagnostics.passes,
        response.diagnostics.reversals
    );
    Ok(response)
}

/// Loads a JSON-encoded [`OptimiseRequest`] from disk.
pub(crate) fn load_request(path: &Utf8Path) -> Result<OptimiseRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json(writer: &mut dyn Write, response: &OptimiseResponse) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(response).map_err(CliError::SerialiseResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

/// Print one numbered line per stop, then totals and savings.
pub(crate) fn write_summary(writer: &mut dyn Write, route: &OptimizedRoute) -> Result<(), CliError> {
    for (position, stop) in (1_usize..).zip(&route.stops) {
        let name = if stop.name.is_empty() {
            stop.id.as_str()
        } else {
            stop.name.as_str()
        };
        let written = if stop.address.is_empty() {
            writeln!(writer, "{position}. {name}")
        } else {
            writeln!(writer, "{position}. {name} ({})", stop.address)
        };
        written.map_err(CliError::WriteOutput)?;
    }
    writeln!(
        writer,
        "Total: {}, {}",
        format_distance(route.total_distance),
        format_duration(route.total_duration)
    )
    .map_err(CliError::WriteOutput)?;
    writeln!(
        writer,
        "Saved: {}, {} ({}%)",
        format_distance(route.savings.distance),
        format_duration(route.savings.time),
        route.savings.percentage
    )
    .map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<OptimiseConfig, CliError> {
    let merged = OptimiseArgs::merge_from_layers(layers).map_err(CliError::from)?;
    OptimiseConfig::try_from(merged)
}
