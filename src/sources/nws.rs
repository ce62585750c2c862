//! Weather.gov (NWS) forecast client
//!
//! Two-step lookup: resolve the forecast grid for a coordinate, then fetch
//! the forecast itself. The API is free and unauthenticated but requires a
//! descriptive User-Agent header on every request.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{FetchError, REQUEST_TIMEOUT};
use crate::SkiTourError;
use crate::models::WeatherSnapshot;

/// Identification header required by api.weather.gov
const NWS_USER_AGENT: &str = "(SkiTourDecisionApp, contact@skitour.example)";

const POINTS_URL: &str = "https://api.weather.gov/points";

/// Number of forecast periods kept in a report
const FORECAST_PERIODS: usize = 7;

/// Number of hourly periods kept in a report
const HOURLY_PERIODS: usize = 24;

/// Weather.gov client
pub struct WeatherClient {
    client: Client,
}

/// Outcome of a weather fetch: a report, or an error record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeatherOutcome {
    Error(FetchError),
    Report(Box<WeatherReport>),
}

impl WeatherOutcome {
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Inputs for the recommendation engine. Error outcomes fall back to the
    /// snapshot defaults.
    #[must_use]
    pub fn snapshot(&self) -> WeatherSnapshot {
        match self {
            Self::Report(report) => report.snapshot(),
            Self::Error(_) => WeatherSnapshot::default(),
        }
    }
}

/// Normalized weather report: current conditions plus upcoming periods
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub temperature: i32,
    pub temperature_unit: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub short_forecast: String,
    pub detailed_forecast: String,
    pub is_daytime: bool,
    /// Next forecast periods, current one first
    pub periods: Vec<ForecastPeriod>,
    /// Hourly detail, empty when the hourly endpoint is unavailable
    pub hourly: Vec<ForecastPeriod>,
    /// Gridded data endpoint for this location
    pub grid_data_url: String,
    pub updated: DateTime<Utc>,
}

impl WeatherReport {
    /// Current conditions as recommendation-engine inputs
    #[must_use]
    pub fn snapshot(&self) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature: self.temperature,
            wind_speed: self.wind_speed.clone(),
        }
    }
}

/// One NWS forecast period, daily or hourly
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    #[serde(default)]
    pub name: String,
    pub temperature: i32,
    pub temperature_unit: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub short_forecast: String,
    #[serde(default)]
    pub detailed_forecast: String,
    pub is_daytime: bool,
}

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointsProperties {
    forecast: String,
    forecast_hourly: String,
    forecast_grid_data: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    periods: Vec<ForecastPeriod>,
}

impl WeatherClient {
    /// Create a new Weather.gov client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(NWS_USER_AGENT)
            .build()
            .map_err(|e| SkiTourError::api(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Fetch the forecast for a coordinate. Upstream failures are converted
    /// into an error record, never propagated.
    #[must_use]
    pub fn fetch_forecast(&self, lat: f64, lon: f64) -> WeatherOutcome {
        match self.try_fetch(lat, lon) {
            Ok(report) => WeatherOutcome::Report(Box::new(report)),
            Err(e) => {
                warn!("NWS fetch failed for {lat:.3},{lon:.3}: {e:#}");
                WeatherOutcome::Error(FetchError::new(
                    e.to_string(),
                    "Failed to fetch weather data from NWS",
                ))
            }
        }
    }

    fn try_fetch(&self, lat: f64, lon: f64) -> Result<WeatherReport> {
        info!("Fetching NWS forecast for {lat:.3}, {lon:.3}");

        let points_url = format!("{POINTS_URL}/{lat},{lon}");
        debug!("NWS points request: {points_url}");
        let points: PointsResponse = self
            .client
            .get(&points_url)
            .send()?
            .error_for_status()?
            .json()
            .with_context(|| "Failed to parse NWS points response")?;

        let forecast: ForecastResponse = self
            .client
            .get(&points.properties.forecast)
            .send()?
            .error_for_status()?
            .json()
            .with_context(|| "Failed to parse NWS forecast response")?;

        // Hourly detail is best-effort; an outage there degrades to an empty
        // list instead of failing the whole call.
        let hourly = self.fetch_hourly(&points.properties.forecast_hourly);

        let mut periods = forecast.properties.periods;
        let current = periods
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("NWS forecast contained no periods"))?;
        periods.truncate(FORECAST_PERIODS);

        info!(
            "NWS forecast retrieved: {} periods, {} hourly",
            periods.len(),
            hourly.len()
        );

        Ok(WeatherReport {
            temperature: current.temperature,
            temperature_unit: current.temperature_unit,
            wind_speed: current.wind_speed,
            wind_direction: current.wind_direction,
            short_forecast: current.short_forecast,
            detailed_forecast: current.detailed_forecast,
            is_daytime: current.is_daytime,
            periods,
            hourly,
            grid_data_url: points.properties.forecast_grid_data,
            updated: Utc::now(),
        })
    }

    fn fetch_hourly(&self, url: &str) -> Vec<ForecastPeriod> {
        let result: Result<ForecastResponse> = (|| {
            let response: ForecastResponse = self
                .client
                .get(url)
                .send()?
                .error_for_status()?
                .json()
                .with_context(|| "Failed to parse NWS hourly response")?;
            Ok(response)
        })();

        match result {
            Ok(response) => {
                let mut hourly = response.properties.periods;
                hourly.truncate(HOURLY_PERIODS);
                hourly
            }
            Err(e) => {
                warn!("NWS hourly fetch failed, continuing without it: {e:#}");
                Vec::new()
            }
        }
    }
}
