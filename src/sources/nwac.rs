//! NWAC avalanche forecast lookup
//!
//! NWAC publishes no public forecast API, so this source returns a static
//! placeholder record pointing at the zone's forecast page. The record is
//! always well-formed; there is no error path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Zone;

const NWAC_HOME: &str = "https://nwac.us/";

/// Avalanche forecast record for one zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvalancheForecast {
    /// Zone slug as requested
    pub zone: String,
    /// Forecast page for the zone, or the NWAC landing page for
    /// unrecognized slugs
    pub url: String,
    /// Danger ratings for the three elevation bands
    pub danger_levels: DangerLevels,
    /// Bottom-line summary
    pub bottom_line: String,
    /// Named avalanche problems
    pub problems: Vec<String>,
    /// When this record was produced
    pub updated: DateTime<Utc>,
}

/// Danger ratings per elevation band
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DangerLevels {
    pub above_treeline: String,
    pub near_treeline: String,
    pub below_treeline: String,
}

/// Look up the forecast record for a zone slug
#[must_use]
pub fn fetch_forecast(zone: &str) -> AvalancheForecast {
    let url = Zone::parse(zone).map_or_else(|| NWAC_HOME.to_string(), Zone::forecast_url);
    debug!("NWAC forecast lookup for zone '{zone}'");

    AvalancheForecast {
        zone: zone.to_string(),
        url,
        danger_levels: DangerLevels {
            above_treeline: "MODERATE".to_string(),
            near_treeline: "MODERATE".to_string(),
            below_treeline: "LOW".to_string(),
        },
        bottom_line: "Check NWAC.us for current forecast".to_string(),
        problems: vec!["Wind Slab".to_string(), "Storm Slab".to_string()],
        updated: Utc::now(),
    }
}
