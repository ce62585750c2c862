use anyhow::Result;
use std::io;
use tracing_subscriber::EnvFilter;

use skitour::SkiTourError;
use skitour::config::{EnvCredentials, SkiTourConfig};
use skitour::dashboard::{self, DashboardParams};
use skitour::models::Tour;
use skitour::recommendation;
use skitour::setup;
use skitour::sources::{CalTopoClient, OpenSnowClient, WeatherClient};

/// Fitness level assumed when none is configured
const DEFAULT_FITNESS_LEVEL: i32 = 7;

const DEFAULT_ZONE: &str = "west-slopes-central";

/// Stevens Pass area, used by the demo
const DEMO_LAT: f64 = 47.745;
const DEMO_LON: f64 = -121.089;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mode = std::env::args().nth(1).unwrap_or_default();
    let result = match mode.as_str() {
        "setup" => run_setup(),
        "dashboard" => run_dashboard(),
        "" | "demo" => run_demo(),
        other => {
            eprintln!("Unknown command '{other}'. Usage: skitour [setup|dashboard|demo]");
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        match e.downcast_ref::<SkiTourError>() {
            Some(err) => eprintln!("{}", err.user_message()),
            None => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
}

fn run_setup() -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let config = setup::run(&mut input, &mut output)?;
    setup::check_weather_connectivity(&config, &mut output)?;
    Ok(())
}

fn run_dashboard() -> Result<()> {
    let mut config = SkiTourConfig::load()?;
    config.merge_env_credentials(&EnvCredentials::from_env());

    let weather_client = WeatherClient::new()?;
    let snow_client = OpenSnowClient::new(config.opensnow_api_key.clone())?;
    let map_client = CalTopoClient::new()?;

    let params = DashboardParams {
        lat: config.home_location.lat,
        lon: config.home_location.lon,
        nwac_zone: config.nwac_zone.as_deref().unwrap_or(DEFAULT_ZONE),
        caltopo_map_id: config.caltopo_map_id.as_deref(),
        fitness_level: DEFAULT_FITNESS_LEVEL,
    };

    let dashboard = dashboard::fetch_dashboard(&weather_client, &snow_client, &map_client, &params);
    println!("{}", serde_json::to_string_pretty(&dashboard)?);
    Ok(())
}

fn run_demo() -> Result<()> {
    let weather_client = WeatherClient::new()?;
    let snow_client = OpenSnowClient::new(None)?;
    let map_client = CalTopoClient::new()?;

    let params = DashboardParams {
        lat: DEMO_LAT,
        lon: DEMO_LON,
        nwac_zone: DEFAULT_ZONE,
        caltopo_map_id: None,
        fitness_level: DEFAULT_FITNESS_LEVEL,
    };

    let dashboard = dashboard::fetch_dashboard(&weather_client, &snow_client, &map_client, &params);
    println!("{}", serde_json::to_string_pretty(&dashboard)?);

    // Sample evaluation against the conditions just fetched
    let snapshot = dashboard.weather.snapshot();
    let tour = Tour {
        name: "Kendall Peak".to_string(),
        elevation_gain: 3200,
        terrain: "Open slopes, exposed".to_string(),
    };

    let rec = recommendation::evaluate(&tour, "MODERATE", DEFAULT_FITNESS_LEVEL, &snapshot);

    println!("{}: {}", tour.name, rec.text);
    println!("Analysis: {}", rec.analysis);
    if !rec.warnings.is_empty() {
        println!("Warnings: {}", rec.warnings.join(", "));
    }
    Ok(())
}
