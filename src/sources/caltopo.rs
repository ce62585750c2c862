//! CalTopo map data client
//!
//! Uses the public offline-map JSON endpoint, which needs no credentials for
//! public maps. Named Shape features (routes and areas) are extracted from
//! the map document; everything else is ignored.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use super::REQUEST_TIMEOUT;
use crate::SkiTourError;

const MAP_URL: &str = "https://caltopo.com/m";
const MAP_JSON_URL: &str = "https://caltopo.com/api/v1/map/offline/latest";

/// CalTopo client
pub struct CalTopoClient {
    client: Client,
}

/// Outcome of a map data fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MapOutcome {
    /// Upstream call failed
    Error(MapError),
    /// Map is not publicly readable
    Restricted(RestrictedMap),
    /// Extracted map data
    Data(MapData),
}

impl MapOutcome {
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Shape features extracted from a public map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapData {
    pub map_id: String,
    pub features: Vec<MapFeature>,
    /// Public map page
    pub url: String,
    pub updated: DateTime<Utc>,
}

/// A named route or area drawn on the map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapFeature {
    pub title: String,
    pub description: String,
    /// GeoJSON coordinate list, nesting depends on the geometry type
    pub coordinates: Value,
}

/// Informational record for maps that need team credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictedMap {
    pub map_id: String,
    pub url: String,
    pub message: String,
    pub note: String,
}

/// Error record carrying the public map URL alongside the shared shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapError {
    pub error: String,
    pub message: String,
    pub map_url: String,
}

impl CalTopoClient {
    /// Create a new CalTopo client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SkiTourError::api(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Fetch shape features for a map identifier
    #[must_use]
    pub fn fetch_map_data(&self, map_id: &str) -> MapOutcome {
        let map_url = format!("{MAP_URL}/{map_id}");

        match self.try_fetch(map_id) {
            Ok(Some(features)) => MapOutcome::Data(MapData {
                map_id: map_id.to_string(),
                features,
                url: map_url,
                updated: Utc::now(),
            }),
            Ok(None) => MapOutcome::Restricted(RestrictedMap {
                map_id: map_id.to_string(),
                url: map_url,
                message: "Map data requires direct API access or team credentials".to_string(),
                note: "For full integration, sign up for CalTopo Team and use the official API"
                    .to_string(),
            }),
            Err(e) => {
                warn!("CalTopo fetch failed for map {map_id}: {e:#}");
                MapOutcome::Error(MapError {
                    error: e.to_string(),
                    message: "Failed to fetch CalTopo data".to_string(),
                    map_url,
                })
            }
        }
    }

    /// Returns `Ok(None)` for non-success statuses (map not public)
    fn try_fetch(&self, map_id: &str) -> Result<Option<Vec<MapFeature>>> {
        info!("Fetching CalTopo map data for {map_id}");
        let json_url = format!("{MAP_JSON_URL}/{map_id}");

        let response = self.client.get(&json_url).send()?;
        if !response.status().is_success() {
            debug!("CalTopo returned {} for map {map_id}", response.status());
            return Ok(None);
        }

        let document: Value = response
            .json()
            .with_context(|| "Failed to parse CalTopo map response")?;
        Ok(Some(extract_shape_features(&document)))
    }
}

/// Pull named Shape features out of a CalTopo map document
#[must_use]
pub fn extract_shape_features(document: &Value) -> Vec<MapFeature> {
    let Some(features) = document.get("features").and_then(Value::as_array) else {
        return Vec::new();
    };

    features
        .iter()
        .filter(|feature| {
            feature.pointer("/properties/class").and_then(Value::as_str) == Some("Shape")
        })
        .map(|feature| MapFeature {
            title: feature
                .pointer("/properties/title")
                .and_then(Value::as_str)
                .unwrap_or("Unnamed")
                .to_string(),
            description: feature
                .pointer("/properties/description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            coordinates: feature
                .pointer("/geometry/coordinates")
                .cloned()
                .unwrap_or_else(|| json!([])),
        })
        .collect()
}
