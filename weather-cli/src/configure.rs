use anyhow::{Result, anyhow};
use inquire::{Password, PasswordDisplayMode, Select, Text};

use cityweather_core::{Config, Coordinates, TemperatureUnit};

/// Prompts for settings and writes them to the config file.
pub fn run() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("WeatherAPI.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }
    config.require_api_key()?;

    let current = config.home.map(|c| c.to_string()).unwrap_or_default();
    let home = Text::new("Home location as \"lat,lon\":")
        .with_initial_value(&current)
        .with_help_message("Used by `here`; leave empty for none")
        .prompt()?;
    config.home = parse_home(&home)?;

    let choice = Select::new("Default unit:", vec!["celsius", "fahrenheit"])
        .with_starting_cursor(match config.unit {
            TemperatureUnit::Celsius => 0,
            TemperatureUnit::Fahrenheit => 1,
        })
        .prompt()?;
    config.unit = TemperatureUnit::try_from(choice)?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

fn parse_home(input: &str) -> Result<Option<Coordinates>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let (lat, lon) = input
        .split_once(',')
        .ok_or_else(|| anyhow!("Expected \"lat,lon\", got '{input}'"))?;
    let coords = Coordinates::new(lat.trim().parse()?, lon.trim().parse()?);

    if !coords.is_valid() {
        return Err(anyhow!("Coordinates out of range: {coords}"));
    }
    Ok(Some(coords))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_home_is_none() {
        assert_eq!(parse_home("  ").unwrap(), None);
    }

    #[test]
    fn parses_home_pair() {
        assert_eq!(parse_home("51.5, -0.12").unwrap(), Some(Coordinates::new(51.5, -0.12)));
    }

    #[test]
    fn rejects_bad_home() {
        assert!(parse_home("london").is_err());
        assert!(parse_home("abc,1").is_err());
        assert!(parse_home("95,0").is_err());
    }
}
