use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::{config::Config, error::FetchError, model::WeatherSnapshot};

use super::{WeatherProvider, WeatherQuery};

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// Client for WeatherAPI.com `current.json`.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self { api_key, base_url: DEFAULT_BASE_URL.to_string(), http: Client::new() }
    }

    /// Point the provider at another host (a mock server in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build from configuration. Without `timeout_secs` the transport default applies.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.require_api_key()?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { api_key: api_key.to_owned(), base_url: config.base_url().to_owned(), http })
    }

    fn request_url(&self, query: &WeatherQuery) -> Result<Url, FetchError> {
        let endpoint = format!("{}/current.json", self.base_url.trim_end_matches('/'));
        let mut url = Url::parse(&endpoint).map_err(|_| query.invalid())?;

        let key: String = url::form_urlencoded::byte_serialize(self.api_key.as_bytes()).collect();
        url.set_query(Some(&format!("key={key}&q={}&aqi=no", query.query_value())));

        Ok(url)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn current(&self, query: &WeatherQuery) -> Result<WeatherSnapshot, FetchError> {
        let url = self.request_url(query)?;
        debug!(%query, "requesting current weather");

        let res = self.http.get(url).send().await?;

        let status = res.status();
        if status != StatusCode::OK {
            // The body only feeds the log line.
            let body = res.text().await.unwrap_or_default();
            warn!(
                %query,
                status = status.as_u16(),
                body = %truncate_body(&body),
                "weather lookup rejected"
            );
            return Err(FetchError::NotFound { status: status.as_u16() });
        }

        let body = res.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!(%query, error = %e, "failed to decode weather body");
            FetchError::Decode(e.to_string())
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinates;

    #[test]
    fn city_request_url_has_encoded_query() {
        let provider = WeatherApiProvider::new("KEY".into());
        let url = provider.request_url(&WeatherQuery::city("New York").unwrap()).unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.weatherapi.com/v1/current.json?key=KEY&q=New+York&aqi=no"
        );
    }

    #[test]
    fn coordinate_request_url_keeps_literal_pair() {
        let provider =
            WeatherApiProvider::new("KEY".into()).with_base_url("http://localhost:9000/v1/");
        let query = WeatherQuery::coordinates(Coordinates::new(51.5, -0.12)).unwrap();
        let url = provider.request_url(&query).unwrap();

        assert_eq!(
            url.as_str(),
            "http://localhost:9000/v1/current.json?key=KEY&q=51.5,-0.12&aqi=no"
        );
    }

    #[test]
    fn bad_base_url_maps_to_query_validation_error() {
        let provider = WeatherApiProvider::new("KEY".into()).with_base_url("not a url");

        let city = provider.request_url(&WeatherQuery::city("Oslo").unwrap()).unwrap_err();
        assert_eq!(city, FetchError::invalid_city());

        let coords = WeatherQuery::coordinates(Coordinates::new(1.0, 2.0)).unwrap();
        assert_eq!(provider.request_url(&coords).unwrap_err(), FetchError::invalid_coordinates());
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let out = truncate_body(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
