//! Interactive session: one controller, one saved-city list, until quit.

use anyhow::Result;
use inquire::{InquireError, Text};
use tracing::debug;

use cityweather_core::{TemperatureUnit, WeatherController};

use crate::{cli::HOME_HINT, render};

const HELP: &str = "\
Commands:
  <city> | search <city>   look up a city and save it
  here                     weather at the configured home location
  list                     saved cities
  remove <city>            drop a saved city
  unit                     toggle between °C and °F
  help                     this text
  quit                     leave (saved cities are not kept)
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Search(String),
    Here,
    List,
    Remove(String),
    ToggleUnit,
    Help,
    Quit,
    Nothing,
}

impl SessionCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head.to_lowercase().as_str() {
            "" => Self::Nothing,
            "search" | "s" => Self::Search(rest.to_string()),
            "here" if rest.is_empty() => Self::Here,
            "list" | "ls" if rest.is_empty() => Self::List,
            "remove" | "rm" => Self::Remove(rest.to_string()),
            "unit" | "toggle" if rest.is_empty() => Self::ToggleUnit,
            "help" | "?" if rest.is_empty() => Self::Help,
            "quit" | "exit" | "q" if rest.is_empty() => Self::Quit,
            _ => Self::Search(line.to_string()),
        }
    }
}

pub async fn run(
    controller: WeatherController,
    mut unit: TemperatureUnit,
    has_home: bool,
) -> Result<()> {
    print!("{HELP}");

    loop {
        let line = match tokio::task::spawn_blocking(|| Text::new("weather>").prompt()).await? {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        let command = SessionCommand::parse(&line);
        debug!(?command, "session command");

        match command {
            SessionCommand::Search(city) => {
                controller.fetch_weather_by_city(&city).await;
                print!("{}", render::outcome(&controller.state(), unit));
            }
            SessionCommand::Here => {
                controller.use_current_location().await;
                print!("{}", render::outcome(&controller.state(), unit));
                if !has_home {
                    println!("{HOME_HINT}");
                }
            }
            SessionCommand::List => print!("{}", render::saved_cities(&controller.state(), unit)),
            SessionCommand::Remove(name) => {
                if controller.state().is_saved(&name) {
                    controller.remove_saved_city(&name).await;
                    println!("Removed {name}.");
                } else {
                    println!("{name} is not in the saved list.");
                }
            }
            SessionCommand::ToggleUnit => {
                unit = unit.toggle();
                println!("Showing temperatures in °{}.", unit.symbol());
            }
            SessionCommand::Help => print!("{HELP}"),
            SessionCommand::Quit => break,
            SessionCommand::Nothing => {}
        }
    }

    Ok(())
}
