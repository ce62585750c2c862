//! OpenSnow snow forecast client
//!
//! The OpenSnow API requires a commercial partnership key. Without one the
//! client returns an informational record with a manual-lookup URL instead
//! of an error.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use super::{FetchError, REQUEST_TIMEOUT};
use crate::SkiTourError;

const FORECAST_URL: &str = "https://api.opensnow.com/forecast";

/// Forecast elevation in feet used for all lookups
const FORECAST_ELEVATION_FT: i32 = 5000;

/// OpenSnow client; the API key is passed in explicitly
pub struct OpenSnowClient {
    client: Client,
    api_key: Option<String>,
}

/// Outcome of a snow forecast fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnowOutcome {
    /// No credential configured; points at the public site instead
    Unavailable(ManualLookup),
    /// Upstream call failed
    Error(FetchError),
    /// Raw forecast payload as returned by the API
    Forecast(Value),
}

impl SnowOutcome {
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Informational record returned when no API key is configured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualLookup {
    pub error: String,
    pub message: String,
    pub manual_check: String,
}

impl OpenSnowClient {
    /// Create a new OpenSnow client with an optional partnership key
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SkiTourError::api(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client, api_key })
    }

    /// Fetch the snow forecast for a coordinate
    #[must_use]
    pub fn fetch_forecast(&self, lat: f64, lon: f64) -> SnowOutcome {
        let Some(api_key) = &self.api_key else {
            return SnowOutcome::Unavailable(ManualLookup {
                error: "No API key".to_string(),
                message: "OpenSnow API requires a commercial partnership. \
                          Contact partnerships@opensnow.com"
                    .to_string(),
                manual_check: format!(
                    "https://opensnow.com/location/closest?lat={lat}&lon={lon}"
                ),
            });
        };

        match self.try_fetch(api_key, lat, lon) {
            Ok(value) => SnowOutcome::Forecast(value),
            Err(e) => {
                warn!("OpenSnow fetch failed for {lat:.3},{lon:.3}: {e:#}");
                SnowOutcome::Error(FetchError::new(
                    e.to_string(),
                    "Failed to fetch OpenSnow data",
                ))
            }
        }
    }

    fn try_fetch(&self, api_key: &str, lat: f64, lon: f64) -> Result<Value> {
        info!("Fetching OpenSnow forecast for {lat:.3}, {lon:.3}");
        let url = format!("{FORECAST_URL}/{lon},{lat}");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", api_key.to_string()),
                ("v", "1".to_string()),
                ("elev", FORECAST_ELEVATION_FT.to_string()),
            ])
            .send()?
            .error_for_status()?;

        response
            .json()
            .with_context(|| "Failed to parse OpenSnow response")
    }
}
