use std::fmt::Write;

use chrono::Local;
use cityweather_core::{
    AppState, TemperatureUnit, WeatherSnapshot,
    model::format_temperature,
};

/// Error line if the last action failed, otherwise the current weather.
pub fn outcome(state: &AppState, unit: TemperatureUnit) -> String {
    if let Some(message) = &state.error_message {
        return format!("Error: {message}\n");
    }

    match &state.current_weather {
        Some(snapshot) => {
            let mut out = snapshot_card(snapshot, unit);
            if let Some(at) = state.last_updated {
                let _ = writeln!(out, "  Updated {}", at.with_timezone(&Local).format("%H:%M"));
            }
            out
        }
        None => "No weather yet. Search for a city.\n".to_string(),
    }
}

pub fn snapshot_card(snapshot: &WeatherSnapshot, unit: TemperatureUnit) -> String {
    let current = &snapshot.current;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "[{}] {}",
        current.condition.kind().icon_name(),
        snapshot.location.display_name()
    );
    let _ = writeln!(
        out,
        "  {}{}  {}",
        format_temperature(current.temperature_in(unit)),
        unit.symbol(),
        current.condition.text
    );

    let mut details = Vec::new();
    if let Some(wind) = current.wind_kph {
        details.push(format!("Wind {wind:.1} km/h"));
    }
    if let Some(humidity) = current.humidity {
        details.push(format!("Humidity {humidity}%"));
    }
    if let Some(cloud) = current.cloud {
        details.push(format!("Cloud {cloud}%"));
    }
    if !details.is_empty() {
        let _ = writeln!(out, "  {}", details.join("  "));
    }

    out
}

pub fn saved_cities(state: &AppState, unit: TemperatureUnit) -> String {
    if state.saved_cities.is_empty() {
        return "No saved cities yet.\n".to_string();
    }

    let mut out = String::new();
    for snapshot in &state.saved_cities {
        let _ = writeln!(
            out,
            "  {:<20} {:>8}  {}",
            snapshot.name(),
            format_temperature(snapshot.current.temperature_in(unit)),
            snapshot.current.condition.text
        );
    }
    out
}
