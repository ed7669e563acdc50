//! MapLayer CLI - Command-line interface
//!
//! Exercises the maplayer library from the terminal: fetch a map style,
//! run coordinate math, inspect camera and style defaults, and manage the
//! configuration file.

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use maplayer::logging::{init_logging, LoggingConfig};
use maplayer::GeoPoint;
use tracing::debug;

use commands::common::{parse_point, CityArg, RegionArg};
use commands::config::ConfigCommands;
use commands::style::StyleArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "maplayer", version, about = "Map style loading and coordinate utilities")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to FILE
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the map style and print it without the sprite field
    Style(StyleArgs),

    /// Great-circle distance between two points, in kilometers
    Distance {
        /// Start point as lon,lat
        #[arg(value_parser = parse_point, allow_hyphen_values = true)]
        from: GeoPoint,

        /// End point as lon,lat
        #[arg(value_parser = parse_point, allow_hyphen_values = true)]
        to: GeoPoint,
    },

    /// Approximate a circle as a GeoJSON Polygon
    Circle {
        /// Center as lon,lat
        #[arg(value_parser = parse_point, allow_hyphen_values = true)]
        center: GeoPoint,

        /// Radius in kilometers
        radius_km: f64,

        /// Number of segments (default 64)
        #[arg(long)]
        segments: Option<usize>,
    },

    /// Check whether a point lies within a region's bounds
    Bounds {
        /// Point as lon,lat
        #[arg(value_parser = parse_point, allow_hyphen_values = true)]
        point: GeoPoint,

        /// Region to check against (defaults to config)
        #[arg(long, value_enum)]
        region: Option<RegionArg>,
    },

    /// Show the camera configuration
    Camera {
        /// Center on a predefined city instead of the configured one
        #[arg(long, value_enum)]
        city: Option<CityArg>,
    },

    /// List predefined city coordinates
    Cities,

    /// Show the style tables and the brand palette
    Theme,

    /// Show the sample features as GeoJSON
    Features,

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Style(args) => commands::style::run(args),
        Commands::Distance { from, to } => commands::geometry::run_distance(from, to),
        Commands::Circle {
            center,
            radius_km,
            segments,
        } => commands::geometry::run_circle(center, radius_km, segments),
        Commands::Bounds { point, region } => commands::geometry::run_bounds(point, region),
        Commands::Camera { city } => commands::camera::run_camera(city),
        Commands::Cities => commands::camera::run_cities(),
        Commands::Theme => commands::theme::run_theme(),
        Commands::Features => commands::theme::run_features(),
        Commands::Config { command } => commands::config::run(command),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging = LoggingConfig {
        verbose: cli.verbose,
        log_file: cli.log_file.clone(),
    };
    let _guard = match init_logging(&logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", CliError::from(e));
            return ExitCode::FAILURE;
        }
    };

    debug!(command = ?cli.command, "Running command");

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
