use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::FetchError,
    model::{Coordinates, WeatherSnapshot},
};

pub mod weatherapi;

pub use weatherapi::WeatherApiProvider;

/// What to look up: a free-form city name or a coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    City(String),
    Coordinates(Coordinates),
}

impl WeatherQuery {
    /// Builds a city query from a typed or pasted name. Surrounding whitespace
    /// is dropped; anything else is percent-encoded as-is.
    pub fn city(name: &str) -> Result<Self, FetchError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FetchError::empty_city());
        }
        Ok(WeatherQuery::City(name.to_string()))
    }

    pub fn coordinates(coords: Coordinates) -> Result<Self, FetchError> {
        if !coords.is_valid() {
            return Err(FetchError::invalid_coordinates());
        }
        Ok(WeatherQuery::Coordinates(coords))
    }

    /// Value for the `q` parameter: percent-encoded name, or a literal `lat,lon`.
    pub fn query_value(&self) -> String {
        match self {
            WeatherQuery::City(name) => {
                url::form_urlencoded::byte_serialize(name.as_bytes()).collect()
            }
            WeatherQuery::Coordinates(coords) => coords.to_string(),
        }
    }

    /// Error reported when no request URL can be built for this query.
    pub(crate) fn invalid(&self) -> FetchError {
        match self {
            WeatherQuery::City(_) => FetchError::invalid_city(),
            WeatherQuery::Coordinates(_) => FetchError::invalid_coordinates(),
        }
    }
}

impl std::fmt::Display for WeatherQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherQuery::City(name) => f.write_str(name),
            WeatherQuery::Coordinates(coords) => write!(f, "{coords}"),
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, query: &WeatherQuery) -> Result<WeatherSnapshot, FetchError>;
}
