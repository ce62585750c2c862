//! Core data types for tour evaluation

use serde::{Deserialize, Serialize};
use std::fmt;

/// A ski tour objective supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tour {
    /// Tour name
    pub name: String,
    /// Elevation gain in feet
    pub elevation_gain: i32,
    /// Free-text terrain description
    pub terrain: String,
}

/// Weather inputs read by the recommendation engine.
///
/// Fields absent from the source record fall back to 32 °F and "0 mph".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Temperature in °F
    #[serde(default = "default_temperature")]
    pub temperature: i32,
    /// Wind speed as reported, e.g. "15 mph"
    #[serde(default = "default_wind_speed")]
    pub wind_speed: String,
}

fn default_temperature() -> i32 {
    32
}

fn default_wind_speed() -> String {
    "0 mph".to_string()
}

impl Default for WeatherSnapshot {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            wind_speed: default_wind_speed(),
        }
    }
}

/// Avalanche danger rating on the five-point North American scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DangerRating {
    Low,
    Moderate,
    Considerable,
    High,
    Extreme,
}

impl DangerRating {
    /// Parse a rating case-insensitively. Unrecognized strings yield `None`;
    /// surrounding whitespace is not stripped.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.to_ascii_uppercase().as_str() {
            "LOW" => Some(Self::Low),
            "MODERATE" => Some(Self::Moderate),
            "CONSIDERABLE" => Some(Self::Considerable),
            "HIGH" => Some(Self::High),
            "EXTREME" => Some(Self::Extreme),
            _ => None,
        }
    }

    /// Uppercase label as used in forecasts and warnings
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Moderate => "MODERATE",
            Self::Considerable => "CONSIDERABLE",
            Self::High => "HIGH",
            Self::Extreme => "EXTREME",
        }
    }

    /// Additive score contribution of this rating
    #[must_use]
    pub fn score(self) -> i32 {
        match self {
            Self::Low => 2,
            Self::Moderate => 1,
            Self::Considerable => -1,
            Self::High => -3,
            Self::Extreme => -5,
        }
    }

    /// Ratings that warrant an explicit warning
    #[must_use]
    pub fn is_elevated(self) -> bool {
        matches!(self, Self::Considerable | Self::High | Self::Extreme)
    }
}

impl fmt::Display for DangerRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// NWAC avalanche forecast zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Zone {
    #[serde(rename = "west-slopes-north")]
    WestSlopesNorth,
    #[serde(rename = "west-slopes-central")]
    WestSlopesCentral,
    #[serde(rename = "snoqualmie-pass")]
    SnoqualmiePass,
    #[serde(rename = "west-slopes-south")]
    WestSlopesSouth,
    #[serde(rename = "mt-hood")]
    MtHood,
}

impl Zone {
    /// All forecast zones, in menu order
    pub const ALL: [Zone; 5] = [
        Zone::WestSlopesNorth,
        Zone::WestSlopesCentral,
        Zone::SnoqualmiePass,
        Zone::WestSlopesSouth,
        Zone::MtHood,
    ];

    /// Parse a zone slug case-insensitively. Unrecognized slugs yield `None`.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "west-slopes-north" => Some(Self::WestSlopesNorth),
            "west-slopes-central" => Some(Self::WestSlopesCentral),
            "snoqualmie-pass" => Some(Self::SnoqualmiePass),
            "west-slopes-south" => Some(Self::WestSlopesSouth),
            "mt-hood" => Some(Self::MtHood),
            _ => None,
        }
    }

    /// URL path identifier for this zone
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::WestSlopesNorth => "west-slopes-north",
            Self::WestSlopesCentral => "west-slopes-central",
            Self::SnoqualmiePass => "snoqualmie-pass",
            Self::WestSlopesSouth => "west-slopes-south",
            Self::MtHood => "mt-hood",
        }
    }

    /// Human-readable zone name for menus
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::WestSlopesNorth => "West Slopes North (Mt Baker)",
            Self::WestSlopesCentral => "West Slopes Central (Stevens Pass)",
            Self::SnoqualmiePass => "Snoqualmie Pass",
            Self::WestSlopesSouth => "West Slopes South (White Pass)",
            Self::MtHood => "Mt Hood",
        }
    }

    /// Public forecast page for this zone
    #[must_use]
    pub fn forecast_url(self) -> String {
        format!("https://nwac.us/avalanche-forecast/#/{}", self.slug())
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Three-tier go/no-go decision level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationLevel {
    Go,
    Cautious,
    No,
}

impl RecommendationLevel {
    /// Fixed display label for this level
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Self::Go => "\u{2705} Good to Go",
            Self::Cautious => "\u{26a0}\u{fe0f} Cautious Go",
            Self::No => "\u{1f6d1} Skip It",
        }
    }

    /// Fixed analysis sentence for this level
    #[must_use]
    pub fn analysis(self) -> &'static str {
        match self {
            Self::Go => "Conditions and terrain align well. Enjoy responsibly!",
            Self::Cautious => "Feasible but requires careful decision-making. Stay conservative.",
            Self::No => "Consider an easier objective or wait for better conditions.",
        }
    }
}

impl fmt::Display for RecommendationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Go => write!(f, "go"),
            Self::Cautious => write!(f, "cautious"),
            Self::No => write!(f, "no"),
        }
    }
}

/// Result of evaluating a tour against conditions and fitness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Decision level
    pub level: RecommendationLevel,
    /// Display label
    pub text: String,
    /// Analysis sentence
    pub analysis: String,
    /// Additive integer score behind the decision
    pub score: i32,
    /// Warnings in scoring order
    pub warnings: Vec<String>,
}
