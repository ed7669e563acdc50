//! Camera defaults commands: `camera` and `cities`.

use maplayer::camera::{City, MAX_ZOOM, MIN_ZOOM};

use super::common::{load_config, print_json, CityArg};
use crate::error::CliError;

/// Print the configured camera as the rendering engine expects it.
pub fn run_camera(city: Option<CityArg>) -> Result<(), CliError> {
    let config = load_config();
    let mut camera = config.camera.to_camera_config();

    if let Some(city) = city {
        camera = camera.centered_on(City::from(city).coordinates());
    }

    print_json(&camera)?;
    println!();
    println!("Zoom range: {} - {}", MIN_ZOOM, MAX_ZOOM);
    Ok(())
}

/// List the predefined cities.
pub fn run_cities() -> Result<(), CliError> {
    println!("{:<10} {:>10} {:>10}", "City", "Longitude", "Latitude");
    for city in City::ALL {
        let point = city.coordinates();
        println!("{:<10} {:>10.5} {:>10.5}", city.name(), point.lon, point.lat);
    }
    Ok(())
}
