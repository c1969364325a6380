use serde::{Deserialize, Serialize};

/// One decoded observation from `current.json`, keyed by `location.name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: Current,
}

impl WeatherSnapshot {
    /// Natural key used to de-duplicate saved cities.
    pub fn name(&self) -> &str {
        &self.location.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl Location {
    /// "London, City of London, United Kingdom", skipping blank parts.
    pub fn display_name(&self) -> String {
        [Some(&self.name), self.region.as_ref(), self.country.as_ref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Current {
    pub temp_c: f64,
    /// Sent by the API but never displayed; Fahrenheit is derived from `temp_c`.
    #[serde(default)]
    pub temp_f: Option<f64>,
    pub condition: Condition,
    #[serde(default)]
    pub wind_kph: Option<f64>,
    #[serde(default)]
    pub humidity: Option<i64>,
    #[serde(default)]
    pub cloud: Option<i64>,
}

impl Current {
    pub fn temperature_fahrenheit(&self) -> f64 {
        celsius_to_fahrenheit(self.temp_c)
    }

    pub fn temperature_in(&self, unit: TemperatureUnit) -> f64 {
        match unit {
            TemperatureUnit::Celsius => self.temp_c,
            TemperatureUnit::Fahrenheit => self.temperature_fahrenheit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    pub code: i64,
}

impl Condition {
    pub fn kind(&self) -> ConditionKind {
        ConditionKind::from_code(self.code)
    }
}

pub fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

/// Renders a temperature with one decimal and a degree sign; NaN becomes "--°".
pub fn format_temperature(value: f64) -> String {
    if value.is_nan() {
        "--°".to_string()
    } else {
        format!("{value:.1}°")
    }
}

/// Display preference for temperatures. Lives in the view, not in `AppState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn toggle(self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }
}

impl TryFrom<&str> for TemperatureUnit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown temperature unit '{value}'. Use 'c' or 'f'."
            )),
        }
    }
}

/// Coarse grouping of WeatherAPI.com condition codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Fog,
    Rain,
    Snow,
    Thunder,
    Unknown,
}

impl ConditionKind {
    /// See https://www.weatherapi.com/docs/weather_conditions.json
    pub fn from_code(code: i64) -> Self {
        match code {
            1000 => Self::Sunny,
            1003 => Self::PartlyCloudy,
            1006 | 1009 => Self::Cloudy,
            1030 | 1135 => Self::Fog,
            1063 | 1180 | 1186 | 1192 => Self::Rain,
            1066 | 1114 | 1210 => Self::Snow,
            1087 | 1273 | 1276 => Self::Thunder,
            _ => Self::Unknown,
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Sunny => "sun",
            Self::PartlyCloudy => "cloud_sun",
            Self::Cloudy => "cloud",
            Self::Fog => "cloud_fog",
            Self::Rain => "cloud_rain",
            Self::Snow => "cloud_snow",
            Self::Thunder => "cloud_bolt",
            Self::Unknown => "unknown",
        }
    }
}

/// A single geographic reading (a "fix").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}
