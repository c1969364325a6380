//! Core library for the `cityweather` app.
//!
//! This crate defines:
//! - The weather snapshot model decoded from WeatherAPI.com
//! - The HTTP provider and the location-service abstraction
//! - The observable app state and the controller that drives it
//! - Configuration & credentials handling
//!
//! It is used by `cityweather-cli`, but any front end that can read
//! [`AppState`] snapshots can drive a [`WeatherController`].

pub mod config;
pub mod controller;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod store;

pub use config::Config;
pub use controller::WeatherController;
pub use error::{AppError, FetchError, LocationError};
pub use location::{AuthorizationStatus, FixedLocation, LocationService};
pub use model::{Coordinates, TemperatureUnit, WeatherSnapshot};
pub use provider::{WeatherApiProvider, WeatherProvider, WeatherQuery};
pub use store::{AppState, Store};
