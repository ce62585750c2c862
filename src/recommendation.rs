//! Tour recommendation engine
//!
//! A pure scoring function that maps avalanche danger, elevation gain,
//! fitness, terrain keywords and weather into a three-tier decision. No I/O,
//! no failure paths: any text is accepted for the danger rating and terrain,
//! and missing weather fields arrive as defaults on [`WeatherSnapshot`].

use crate::models::{DangerRating, Recommendation, RecommendationLevel, Tour, WeatherSnapshot};

/// Temperature below which the cold warning fires, in °F
const COLD_TEMPERATURE_F: i32 = 10;

/// Wind speed above which the wind warning fires, in mph
const HIGH_WIND_MPH: i32 = 25;

/// Evaluate a tour against the current danger rating, fitness level and
/// weather. Identical inputs always produce an identical score, level and
/// warning sequence.
#[must_use]
pub fn evaluate(
    tour: &Tour,
    danger: &str,
    fitness_level: i32,
    weather: &WeatherSnapshot,
) -> Recommendation {
    let mut score = 0;
    let mut warnings = Vec::new();

    // Avalanche danger; unrecognized ratings contribute nothing
    if let Some(rating) = DangerRating::parse(danger) {
        score += rating.score();
        if rating.is_elevated() {
            warnings.push(format!("{rating} avalanche danger"));
        }
    }

    // Fitness vs elevation gain. The bands leave a deliberate gap:
    // mid-range gain with borderline fitness (e.g. 3200 ft at 6) adjusts
    // nothing.
    let gain = tour.elevation_gain;
    if gain < 2000 && fitness_level >= 5 {
        score += 2;
    } else if gain < 3000 && fitness_level >= 6 {
        score += 1;
    } else if gain >= 3500 && fitness_level < 7 {
        score -= 2;
        warnings.push("Significant elevation gain vs fitness level".to_string());
    }

    // Terrain keywords, a heuristic substring check rather than semantic
    // parsing. Both adjustments apply when both keyword sets are present.
    let terrain = tour.terrain.to_lowercase();
    if terrain.contains("tree") || terrain.contains("forest") {
        score += 1;
    }
    if terrain.contains("exposed") || terrain.contains("ridge") {
        score -= 1;
        warnings.push("Exposed terrain".to_string());
    }

    // Weather
    if weather.temperature < COLD_TEMPERATURE_F {
        warnings.push("Very cold temperatures".to_string());
        score -= 1;
    }
    if parse_wind_speed(&weather.wind_speed) > HIGH_WIND_MPH {
        warnings.push("High winds".to_string());
        score -= 1;
    }

    let level = if score >= 2 {
        RecommendationLevel::Go
    } else if score >= 0 {
        RecommendationLevel::Cautious
    } else {
        RecommendationLevel::No
    };

    Recommendation {
        level,
        text: level.text().to_string(),
        analysis: level.analysis().to_string(),
        score,
        warnings,
    }
}

/// Extract a wind speed in mph from free text like "15 mph" or "10 to 20 mph".
///
/// Takes the leading run of decimal digits from the first
/// whitespace-delimited token; anything else falls back to 0.
#[must_use]
pub fn parse_wind_speed(wind_speed: &str) -> i32 {
    let Some(token) = wind_speed.split_whitespace().next() else {
        return 0;
    };
    let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}
