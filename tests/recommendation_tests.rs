//! End-to-end properties of the recommendation engine

use rstest::rstest;
use skitour::models::{RecommendationLevel, Tour, WeatherSnapshot};
use skitour::recommendation::evaluate;

fn tour(name: &str, elevation_gain: i32, terrain: &str) -> Tour {
    Tour {
        name: name.to_string(),
        elevation_gain,
        terrain: terrain.to_string(),
    }
}

fn weather(temperature: i32, wind_speed: &str) -> WeatherSnapshot {
    WeatherSnapshot {
        temperature,
        wind_speed: wind_speed.to_string(),
    }
}

#[test]
fn evaluate_is_deterministic() {
    let tour = tour("Kendall Peak", 3200, "Open slopes, exposed");
    let snapshot = weather(18, "12 mph");

    let first = evaluate(&tour, "MODERATE", 7, &snapshot);
    for _ in 0..5 {
        let again = evaluate(&tour, "MODERATE", 7, &snapshot);
        assert_eq!(again, first);
    }
}

#[test]
fn favorable_conditions_score_five_and_go() {
    let rec = evaluate(
        &tour("Low Angle Lap", 1500, "tree forest"),
        "LOW",
        6,
        &weather(20, "10 mph"),
    );

    // 2 (danger) + 2 (elev/fitness) + 1 (terrain) + 0 (weather)
    assert_eq!(rec.score, 5);
    assert_eq!(rec.level, RecommendationLevel::Go);
    assert!(rec.warnings.is_empty());
}

#[test]
fn hostile_conditions_score_minus_eight_with_ordered_warnings() {
    let rec = evaluate(
        &tour("Big Objective", 4000, "exposed ridge"),
        "HIGH",
        5,
        &weather(5, "30 mph"),
    );

    assert_eq!(rec.score, -8);
    assert_eq!(rec.level, RecommendationLevel::No);
    assert_eq!(
        rec.warnings,
        vec![
            "HIGH avalanche danger",
            "Significant elevation gain vs fitness level",
            "Exposed terrain",
            "Very cold temperatures",
            "High winds",
        ]
    );
}

#[rstest]
#[case("LOW", 2, RecommendationLevel::Go)]
#[case("UNKNOWN", 0, RecommendationLevel::Cautious)]
#[case("CONSIDERABLE", -1, RecommendationLevel::No)]
fn decision_boundaries(
    #[case] danger: &str,
    #[case] expected_score: i32,
    #[case] expected_level: RecommendationLevel,
) {
    // Elevation 3200 at fitness 6 sits in the band gap, terrain and weather
    // are neutral, so the danger rating is the whole score.
    let rec = evaluate(
        &tour("Boundary", 3200, "open slopes"),
        danger,
        6,
        &weather(32, "0 mph"),
    );
    assert_eq!(rec.score, expected_score);
    assert_eq!(rec.level, expected_level);
}

#[test]
fn unknown_danger_is_neutral_and_silent() {
    let baseline = evaluate(
        &tour("Mystery", 1500, "trees"),
        "UNKNOWN",
        6,
        &weather(20, "10 mph"),
    );
    assert_eq!(baseline.score, 3);
    assert!(baseline.warnings.is_empty());

    // Same inputs with a recognized rating shift the score by exactly its
    // contribution.
    let with_low = evaluate(
        &tour("Mystery", 1500, "trees"),
        "low",
        6,
        &weather(20, "10 mph"),
    );
    assert_eq!(with_low.score, baseline.score + 2);
}

#[test]
fn missing_wind_speed_never_warns_about_wind() {
    let snapshot: WeatherSnapshot = serde_json::from_str(r#"{"temperature": 5}"#).unwrap();
    assert_eq!(snapshot.wind_speed, "0 mph");

    let rec = evaluate(
        &tour("Calm Day", 4000, "exposed ridge"),
        "EXTREME",
        3,
        &snapshot,
    );
    assert!(!rec.warnings.iter().any(|w| w == "High winds"));
    assert!(rec.warnings.iter().any(|w| w == "Very cold temperatures"));
}

#[test]
fn display_text_matches_level() {
    let go = evaluate(&tour("T", 1500, "trees"), "LOW", 9, &weather(30, "5 mph"));
    assert_eq!(go.text, "\u{2705} Good to Go");
    assert_eq!(
        go.analysis,
        "Conditions and terrain align well. Enjoy responsibly!"
    );

    let no = evaluate(&tour("T", 4000, "ridge"), "EXTREME", 2, &weather(0, "40 mph"));
    assert_eq!(no.text, "\u{1f6d1} Skip It");
    assert_eq!(
        no.analysis,
        "Consider an easier objective or wait for better conditions."
    );
}
