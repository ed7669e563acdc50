//! Common types and utilities shared across CLI commands.

use clap::ValueEnum;
use maplayer::camera::City;
use maplayer::config::ConfigFile;
use maplayer::{GeoPoint, Region};
use serde::Serialize;
use tracing::warn;

use crate::error::CliError;

/// Region selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum RegionArg {
    /// Bangladesh (north 26.8, south 20.3, east 92.8, west 88.0)
    Bangladesh,
    /// Saudi Arabia
    SaudiArabia,
}

impl From<RegionArg> for Region {
    fn from(arg: RegionArg) -> Self {
        match arg {
            RegionArg::Bangladesh => Region::Bangladesh,
            RegionArg::SaudiArabia => Region::SaudiArabia,
        }
    }
}

/// City selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum CityArg {
    Riyadh,
    Jeddah,
    Makkah,
    Madinah,
    Dammam,
}

impl From<CityArg> for City {
    fn from(arg: CityArg) -> Self {
        match arg {
            CityArg::Riyadh => City::Riyadh,
            CityArg::Jeddah => City::Jeddah,
            CityArg::Makkah => City::Makkah,
            CityArg::Madinah => City::Madinah,
            CityArg::Dammam => City::Dammam,
        }
    }
}

/// Clap value parser for `lon,lat` arguments.
pub fn parse_point(s: &str) -> Result<GeoPoint, String> {
    s.parse().map_err(|e: maplayer::CoordError| e.to_string())
}

/// Loads the config file, falling back to defaults if it cannot be read.
pub fn load_config() -> ConfigFile {
    ConfigFile::load().unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring unreadable config file");
        ConfigFile::default()
    })
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
