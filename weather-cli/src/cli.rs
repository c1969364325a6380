use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use cityweather_core::{
    Config, FixedLocation, TemperatureUnit, WeatherApiProvider, WeatherController,
};

use crate::{configure, render, session};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Current weather by city or location")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Temperature unit for output ("c" or "f"); defaults to the configured unit.
    #[arg(long, global = true, value_parser = parse_unit)]
    pub unit: Option<TemperatureUnit>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the API key, home location and default unit.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name, e.g. "London" or "São Paulo".
        city: String,
    },

    /// Show current weather at a coordinate pair.
    Coords {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },

    /// Show current weather at the configured home location.
    Here,

    /// Interactive session with a saved-city list.
    Session,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure::run()?,
            Command::Show { city } => {
                let app = Lookup::open(self.unit)?;
                app.controller.fetch_weather_by_city(&city).await;
                app.print_outcome();
            }
            Command::Coords { lat, lon } => {
                let app = Lookup::open(self.unit)?;
                app.controller.fetch_weather_by_coordinates(lat, lon).await;
                app.print_outcome();
            }
            Command::Here => {
                let app = Lookup::open(self.unit)?;
                app.controller.use_current_location().await;
                app.print_outcome();
                if !app.has_home {
                    println!("{HOME_HINT}");
                }
            }
            Command::Session => {
                let app = Lookup::open(self.unit)?;
                session::run(app.controller, app.unit, app.has_home).await?;
            }
        }

        Ok(())
    }
}

pub const HOME_HINT: &str = "Hint: run `cityweather configure` to set a home location.";

/// Everything a lookup command needs, built from the saved configuration.
struct Lookup {
    controller: WeatherController,
    unit: TemperatureUnit,
    has_home: bool,
}

impl Lookup {
    fn open(unit: Option<TemperatureUnit>) -> Result<Self> {
        let config = Config::load()?;
        let provider = WeatherApiProvider::from_config(&config)?;
        let location = FixedLocation::new(config.home);

        Ok(Self {
            controller: WeatherController::new(Arc::new(provider), Arc::new(location)),
            unit: unit.unwrap_or(config.unit),
            has_home: config.home.is_some(),
        })
    }

    fn print_outcome(&self) {
        print!("{}", render::outcome(&self.controller.state(), self.unit));
    }
}

fn parse_unit(value: &str) -> Result<TemperatureUnit, String> {
    TemperatureUnit::try_from(value).map_err(|e| e.to_string())
}
