//! Upstream data sources
//!
//! One client per source: NWAC avalanche forecasts, Weather.gov forecasts,
//! OpenSnow snow forecasts and CalTopo map data. Sources are independent of
//! each other and share no state. Upstream failures never surface as errors
//! to the caller; each fetch returns either a success record or a
//! [`FetchError`] record carrying the `error` key.

pub mod caltopo;
pub mod nwac;
pub mod nws;
pub mod opensnow;

pub use caltopo::{CalTopoClient, MapData, MapFeature, MapOutcome};
pub use nwac::{AvalancheForecast, DangerLevels};
pub use nws::{WeatherClient, WeatherOutcome, WeatherReport};
pub use opensnow::{OpenSnowClient, SnowOutcome};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeout applied to every upstream request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error record shared by all fetchers. Serializes with the `error` key,
/// which success records never contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchError {
    pub error: String,
    pub message: String,
}

impl FetchError {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
