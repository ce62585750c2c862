//! Interactive configuration setup
//!
//! Collects the home location, NWAC zone and optional credentials over a
//! prompt/answer loop, writes the JSON config, and optionally a
//! shell-sourceable env file exporting the credential pairs. Invalid
//! coordinates abort the whole setup with nothing written.

use anyhow::{Context, Result};
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::info;

use crate::SkiTourError;
use crate::config::{CONFIG_FILE, CalTopoCredentials, HomeLocation, SkiTourConfig};
use crate::models::Zone;
use crate::sources::WeatherClient;

/// Default env file name
pub const ENV_FILE: &str = ".env";

/// Run the full interactive setup: collect, save, write env file.
pub fn run<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<SkiTourConfig> {
    let config = collect_config(input, output)?;

    config.save_to_path(Path::new(CONFIG_FILE))?;
    info!("Configuration saved to {CONFIG_FILE}");
    writeln!(output, "Configuration saved to {CONFIG_FILE}")?;

    if write_env_file(&config, Path::new(ENV_FILE))? {
        writeln!(output, "Created {ENV_FILE} with API keys. Run: source {ENV_FILE}")?;
    }

    Ok(config)
}

/// Collect a configuration from the prompt sequence without persisting it.
pub fn collect_config<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<SkiTourConfig> {
    let mut config = SkiTourConfig::default();

    // Home location; both coordinates must parse or setup aborts
    writeln!(output, "Home location (drop a pin in your maps app)")?;
    let lat = prompt(input, output, "Enter latitude (e.g., 47.606): ")?;
    let lat: f64 = lat
        .parse()
        .map_err(|_| SkiTourError::validation(format!("Invalid latitude: {lat}")))?;
    let lon = prompt(input, output, "Enter longitude (e.g., -122.332): ")?;
    let lon: f64 = lon
        .parse()
        .map_err(|_| SkiTourError::validation(format!("Invalid longitude: {lon}")))?;
    config.home_location = HomeLocation { lat, lon };

    // Zone menu; an invalid choice skips the field
    writeln!(output, "NWAC zones:")?;
    for (index, zone) in Zone::ALL.iter().enumerate() {
        writeln!(output, "  {}) {}", index + 1, zone.display_name())?;
    }
    let choice = prompt(input, output, "Choose zone (1-5): ")?;
    match choice.parse::<usize>() {
        Ok(n) if (1..=Zone::ALL.len()).contains(&n) => {
            config.nwac_zone = Some(Zone::ALL[n - 1].slug().to_string());
        }
        _ => writeln!(output, "Invalid choice, skipping zone")?,
    }

    // Optional map id, stored uppercased
    let map_id = prompt(
        input,
        output,
        "CalTopo map ID (find it in the URL caltopo.com/m/XXXXX, Enter to skip): ",
    )?;
    if !map_id.is_empty() {
        config.caltopo_map_id = Some(map_id.to_uppercase());
    }

    // Optional credentials
    let opensnow_key = prompt(input, output, "OpenSnow API key (Enter to skip): ")?;
    if !opensnow_key.is_empty() {
        config.opensnow_api_key = Some(opensnow_key);
    }

    let caltopo_id = prompt(input, output, "CalTopo credential ID (Enter to skip): ")?;
    let caltopo_secret = prompt(input, output, "CalTopo credential secret (Enter to skip): ")?;
    if !caltopo_id.is_empty() && !caltopo_secret.is_empty() {
        config.caltopo_credentials = Some(CalTopoCredentials {
            id: caltopo_id,
            secret: caltopo_secret,
        });
    }

    config.validate()?;
    Ok(config)
}

/// Write `export KEY="value"` lines for the configured credentials.
/// Returns `false` (and writes nothing) when there is nothing to export.
pub fn write_env_file(config: &SkiTourConfig, path: &Path) -> Result<bool> {
    let mut lines = Vec::new();

    if let Some(key) = &config.opensnow_api_key {
        lines.push(format!("export OPENSNOW_API_KEY=\"{key}\""));
    }
    if let Some(credentials) = &config.caltopo_credentials {
        lines.push(format!("export CALTOPO_CRED_ID=\"{}\"", credentials.id));
        lines.push(format!(
            "export CALTOPO_CRED_SECRET=\"{}\"",
            credentials.secret
        ));
    }

    if lines.is_empty() {
        return Ok(false);
    }

    fs::write(path, lines.join("\n"))
        .with_context(|| format!("Failed to write env file: {}", path.display()))?;
    Ok(true)
}

/// Check Weather.gov reachability for the configured home location.
pub fn check_weather_connectivity<W: Write>(
    config: &SkiTourConfig,
    output: &mut W,
) -> Result<()> {
    writeln!(output, "Testing Weather.gov API...")?;
    let client = WeatherClient::new()?;
    let outcome = client.fetch_forecast(config.home_location.lat, config.home_location.lon);

    if outcome.is_error() {
        writeln!(output, "Weather.gov check failed; verify the coordinates and try again")?;
    } else {
        writeln!(output, "Weather.gov API working!")?;
    }
    Ok(())
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> Result<String> {
    write!(output, "{text}")?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .with_context(|| "Failed to read input")?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Cursor;

    fn run_prompts(answers: &[&str]) -> Result<SkiTourConfig> {
        let mut input = Cursor::new(answers.join("\n") + "\n");
        let mut output = Vec::new();
        collect_config(&mut input, &mut output)
    }

    #[test]
    fn test_full_setup_sequence() {
        let config = run_prompts(&[
            "47.606",
            "-122.332",
            "2",
            "v106q",
            "snow-key-123",
            "team-id",
            "team-secret",
        ])
        .unwrap();

        assert_eq!(config.home_location.lat, 47.606);
        assert_eq!(config.home_location.lon, -122.332);
        assert_eq!(config.nwac_zone.as_deref(), Some("west-slopes-central"));
        assert_eq!(config.caltopo_map_id.as_deref(), Some("V106Q"));
        assert_eq!(config.opensnow_api_key.as_deref(), Some("snow-key-123"));
        assert_eq!(
            config.caltopo_credentials,
            Some(CalTopoCredentials {
                id: "team-id".to_string(),
                secret: "team-secret".to_string(),
            })
        );
    }

    #[test]
    fn test_optional_fields_skipped_on_empty_input() {
        let config = run_prompts(&["47.606", "-122.332", "3", "", "", "", ""]).unwrap();

        assert_eq!(config.nwac_zone.as_deref(), Some("snoqualmie-pass"));
        assert!(config.caltopo_map_id.is_none());
        assert!(config.opensnow_api_key.is_none());
        assert!(config.caltopo_credentials.is_none());
    }

    #[test]
    fn test_invalid_zone_choice_is_skipped() {
        let config = run_prompts(&["47.606", "-122.332", "9", "", "", "", ""]).unwrap();
        assert!(config.nwac_zone.is_none());
    }

    #[test]
    fn test_invalid_latitude_aborts_setup() {
        let result = run_prompts(&["not-a-number", "-122.332", "1", "", "", "", ""]);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Invalid latitude"));
    }

    #[test]
    fn test_partial_caltopo_credentials_are_dropped() {
        let config = run_prompts(&["47.606", "-122.332", "1", "", "", "id-only", ""]).unwrap();
        assert!(config.caltopo_credentials.is_none());
    }

    #[test]
    fn test_env_file_written_only_when_credentials_exist() {
        let path = env::temp_dir().join("skitour_setup_env_test");

        let empty = SkiTourConfig::default();
        assert!(!write_env_file(&empty, &path).unwrap());
        assert!(!path.exists());

        let config = SkiTourConfig {
            opensnow_api_key: Some("snow-key".to_string()),
            caltopo_credentials: Some(CalTopoCredentials {
                id: "team-id".to_string(),
                secret: "team-secret".to_string(),
            }),
            ..SkiTourConfig::default()
        };
        assert!(write_env_file(&config, &path).unwrap());

        let contents = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        assert!(contents.contains("export OPENSNOW_API_KEY=\"snow-key\""));
        assert!(contents.contains("export CALTOPO_CRED_ID=\"team-id\""));
        assert!(contents.contains("export CALTOPO_CRED_SECRET=\"team-secret\""));
    }
}
