//! Combined conditions dashboard
//!
//! Invokes each source in turn and assembles the results into one record.
//! Per-source failures stay inside their own section as error records; the
//! dashboard itself always materializes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::sources::caltopo::{CalTopoClient, MapOutcome};
use crate::sources::nwac::{self, AvalancheForecast};
use crate::sources::nws::{WeatherClient, WeatherOutcome};
use crate::sources::opensnow::{OpenSnowClient, SnowOutcome};

/// Coordinates the dashboard was built for
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DashboardLocation {
    pub lat: f64,
    pub lon: f64,
}

/// All data needed to render the decision dashboard
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub location: DashboardLocation,
    pub avalanche: AvalancheForecast,
    pub weather: WeatherOutcome,
    pub opensnow: SnowOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caltopo: Option<MapOutcome>,
    pub fitness_level: i32,
    pub timestamp: DateTime<Utc>,
}

/// Inputs for one dashboard fetch
#[derive(Debug, Clone, Copy)]
pub struct DashboardParams<'a> {
    pub lat: f64,
    pub lon: f64,
    pub nwac_zone: &'a str,
    pub caltopo_map_id: Option<&'a str>,
    pub fitness_level: i32,
}

/// Fetch all sources and assemble the dashboard record.
pub fn fetch_dashboard(
    weather_client: &WeatherClient,
    snow_client: &OpenSnowClient,
    map_client: &CalTopoClient,
    params: &DashboardParams<'_>,
) -> Dashboard {
    info!("Fetching dashboard data for {:.3}, {:.3}", params.lat, params.lon);

    // Sources are independent and fetched one after another.
    // TODO: fetch them concurrently once the clients move to async reqwest.
    let avalanche = nwac::fetch_forecast(params.nwac_zone);
    let weather = weather_client.fetch_forecast(params.lat, params.lon);
    let opensnow = snow_client.fetch_forecast(params.lat, params.lon);
    let caltopo = params
        .caltopo_map_id
        .map(|map_id| map_client.fetch_map_data(map_id));

    Dashboard {
        location: DashboardLocation {
            lat: params.lat,
            lon: params.lon,
        },
        avalanche,
        weather,
        opensnow,
        caltopo,
        fitness_level: params.fitness_level,
        timestamp: Utc::now(),
    }
}
