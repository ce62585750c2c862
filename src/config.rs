//! Configuration management for the `SkiTour` application
//!
//! The configuration is a flat JSON record covering the home location, NWAC
//! zone and optional upstream credentials. Environment credentials are read
//! once, explicitly, and merged in by the caller; the fetchers themselves
//! never touch the environment.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::SkiTourError;
use crate::models::Zone;

/// Default configuration file name
pub const CONFIG_FILE: &str = "ski_tour_config.json";

/// Root configuration record for the `SkiTour` application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkiTourConfig {
    /// Home location used for weather and snow lookups
    pub home_location: HomeLocation,
    /// NWAC forecast zone slug
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nwac_zone: Option<String>,
    /// CalTopo map identifier, stored uppercased
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caltopo_map_id: Option<String>,
    /// OpenSnow partnership API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opensnow_api_key: Option<String>,
    /// CalTopo Team API credential pair
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caltopo_credentials: Option<CalTopoCredentials>,
}

/// Home coordinates in decimal degrees
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeLocation {
    pub lat: f64,
    pub lon: f64,
}

/// CalTopo Team API credential pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalTopoCredentials {
    pub id: String,
    pub secret: String,
}

/// Credentials read from the process environment
#[derive(Debug, Clone, Default)]
pub struct EnvCredentials {
    pub opensnow_api_key: Option<String>,
    pub caltopo_cred_id: Option<String>,
    pub caltopo_cred_secret: Option<String>,
}

impl EnvCredentials {
    /// Read `OPENSNOW_API_KEY`, `CALTOPO_CRED_ID` and `CALTOPO_CRED_SECRET`.
    /// Empty values count as absent.
    #[must_use]
    pub fn from_env() -> Self {
        fn non_empty(key: &str) -> Option<String> {
            env::var(key).ok().filter(|value| !value.is_empty())
        }

        Self {
            opensnow_api_key: non_empty("OPENSNOW_API_KEY"),
            caltopo_cred_id: non_empty("CALTOPO_CRED_ID"),
            caltopo_cred_secret: non_empty("CALTOPO_CRED_SECRET"),
        }
    }
}

impl SkiTourConfig {
    /// Load configuration, preferring a config file in the working directory
    /// over the platform config location.
    pub fn load() -> Result<Self> {
        let local = Path::new(CONFIG_FILE);
        if local.exists() {
            return Self::load_from_path(local);
        }
        Self::load_from_path(&Self::default_path())
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Persist the configuration as pretty-printed JSON. Invalid
    /// configurations are rejected before anything is written.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory: {}", parent.display())
                })?;
            }
        }
        let raw = serde_json::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration")?;
        fs::write(path, raw)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Platform configuration path, falling back to the working directory
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from(CONFIG_FILE),
            |dir| dir.join("skitour").join(CONFIG_FILE),
        )
    }

    /// Merge environment credentials into the configuration. Values already
    /// present in the config file win.
    pub fn merge_env_credentials(&mut self, credentials: &EnvCredentials) {
        if self.opensnow_api_key.is_none() {
            self.opensnow_api_key = credentials.opensnow_api_key.clone();
        }
        if self.caltopo_credentials.is_none() {
            if let (Some(id), Some(secret)) = (
                &credentials.caltopo_cred_id,
                &credentials.caltopo_cred_secret,
            ) {
                self.caltopo_credentials = Some(CalTopoCredentials {
                    id: id.clone(),
                    secret: secret.clone(),
                });
            }
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        let lat = self.home_location.lat;
        let lon = self.home_location.lon;

        if !(-90.0..=90.0).contains(&lat) {
            return Err(SkiTourError::config(format!(
                "Latitude must be between -90 and 90, got: {lat}"
            ))
            .into());
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(SkiTourError::config(format!(
                "Longitude must be between -180 and 180, got: {lon}"
            ))
            .into());
        }

        if let Some(zone) = &self.nwac_zone {
            if Zone::parse(zone).is_none() {
                return Err(SkiTourError::config(format!(
                    "Unknown NWAC zone '{zone}'. Valid zones: {}",
                    Zone::ALL.map(Zone::slug).join(", ")
                ))
                .into());
            }
        }

        if let Some(key) = &self.opensnow_api_key {
            if key.is_empty() {
                return Err(SkiTourError::config(
                    "OpenSnow API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }
        }

        if let Some(credentials) = &self.caltopo_credentials {
            if credentials.id.is_empty() || credentials.secret.is_empty() {
                return Err(SkiTourError::config(
                    "CalTopo credentials require both an id and a secret",
                )
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SkiTourConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.nwac_zone.is_none());
        assert!(config.opensnow_api_key.is_none());
    }

    #[test]
    fn test_validation_rejects_out_of_range_coordinates() {
        let mut config = SkiTourConfig::default();
        config.home_location = HomeLocation { lat: 91.0, lon: 0.0 };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Latitude"));

        config.home_location = HomeLocation {
            lat: 47.6,
            lon: -181.0,
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Longitude"));
    }

    #[test]
    fn test_validation_rejects_unknown_zone() {
        let config = SkiTourConfig {
            nwac_zone: Some("mt-rainier".to_string()),
            ..SkiTourConfig::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown NWAC zone"));
    }

    #[test]
    fn test_validation_rejects_incomplete_caltopo_credentials() {
        let config = SkiTourConfig {
            caltopo_credentials: Some(CalTopoCredentials {
                id: "abc".to_string(),
                secret: String::new(),
            }),
            ..SkiTourConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_env_credentials_prefers_config_values() {
        let mut config = SkiTourConfig {
            opensnow_api_key: Some("from-config".to_string()),
            ..SkiTourConfig::default()
        };
        let credentials = EnvCredentials {
            opensnow_api_key: Some("from-env".to_string()),
            caltopo_cred_id: Some("id".to_string()),
            caltopo_cred_secret: Some("secret".to_string()),
        };

        config.merge_env_credentials(&credentials);
        assert_eq!(config.opensnow_api_key.as_deref(), Some("from-config"));
        assert_eq!(
            config.caltopo_credentials,
            Some(CalTopoCredentials {
                id: "id".to_string(),
                secret: "secret".to_string(),
            })
        );
    }

    #[test]
    fn test_merge_env_credentials_requires_full_caltopo_pair() {
        let mut config = SkiTourConfig::default();
        let credentials = EnvCredentials {
            opensnow_api_key: None,
            caltopo_cred_id: Some("id-only".to_string()),
            caltopo_cred_secret: None,
        };

        config.merge_env_credentials(&credentials);
        assert!(config.caltopo_credentials.is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = env::temp_dir().join("skitour_config_roundtrip.json");
        let config = SkiTourConfig {
            home_location: HomeLocation {
                lat: 47.745,
                lon: -121.089,
            },
            nwac_zone: Some("west-slopes-central".to_string()),
            caltopo_map_id: Some("V106Q".to_string()),
            opensnow_api_key: None,
            caltopo_credentials: None,
        };

        config.save_to_path(&path).unwrap();
        let loaded = SkiTourConfig::load_from_path(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_rejects_invalid_config() {
        let path = env::temp_dir().join("skitour_config_invalid.json");
        let config = SkiTourConfig {
            home_location: HomeLocation {
                lat: 100.0,
                lon: 0.0,
            },
            ..SkiTourConfig::default()
        };

        assert!(config.save_to_path(&path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_optional_fields_omitted_from_json() {
        let config = SkiTourConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("opensnow_api_key"));
        assert!(!json.contains("caltopo_credentials"));
    }
}
