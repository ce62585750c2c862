//! `SkiTour` - go/no-go decision support for backcountry ski tours
//!
//! This library combines avalanche, weather, snow and map data from public
//! sources with caller-supplied trip parameters into a single three-tier
//! recommendation.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod recommendation;
pub mod setup;
pub mod sources;

// Re-export core types for public API
pub use config::{EnvCredentials, SkiTourConfig};
pub use dashboard::{Dashboard, DashboardParams};
pub use error::SkiTourError;
pub use models::{DangerRating, Recommendation, RecommendationLevel, Tour, WeatherSnapshot, Zone};
pub use recommendation::evaluate;
pub use sources::{CalTopoClient, OpenSnowClient, WeatherClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SkiTourError>;
