use chrono::Utc;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    error::{AppError, FetchError, LocationError},
    location::{AuthorizationStatus, LocationService},
    model::Coordinates,
    provider::{WeatherProvider, WeatherQuery},
    store::{Action, AppState, Store},
};

/// Turns user actions into weather lookups and keeps [`AppState`] current.
///
/// Every failure ends up in `AppState::error_message`; nothing here returns
/// an error to the caller. In-flight lookups are never cancelled, so when two
/// overlap the one that completes last wins.
#[derive(Debug, Clone)]
pub struct WeatherController {
    provider: Arc<dyn WeatherProvider>,
    location: Arc<dyn LocationService>,
    store: Store,
}

impl WeatherController {
    /// Must be called inside a tokio runtime; it starts the state task.
    pub fn new(provider: Arc<dyn WeatherProvider>, location: Arc<dyn LocationService>) -> Self {
        Self { provider, location, store: Store::spawn() }
    }

    pub fn state(&self) -> AppState {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.store.subscribe()
    }

    pub async fn fetch_weather_by_city(&self, name: &str) {
        if name.trim().is_empty() {
            self.report(FetchError::empty_city().into()).await;
            return;
        }

        self.store.dispatch(Action::FetchStarted).await;

        match WeatherQuery::city(name) {
            Ok(query) => self.run_fetch(query).await,
            Err(err) => self.fail(err.into()).await,
        }
    }

    pub async fn fetch_weather_by_coordinates(&self, latitude: f64, longitude: f64) {
        self.store.dispatch(Action::FetchStarted).await;

        match WeatherQuery::coordinates(Coordinates::new(latitude, longitude)) {
            Ok(query) => self.run_fetch(query).await,
            Err(err) => self.fail(err.into()).await,
        }
    }

    pub async fn use_current_location(&self) {
        let status = self.location.authorization_status();
        debug!(?status, "current location requested");

        match status {
            AuthorizationStatus::NotDetermined => {
                let updated = self.location.request_permission().await;
                self.on_authorization_changed(updated).await;
            }
            AuthorizationStatus::Denied | AuthorizationStatus::Restricted => {
                self.report(LocationError::PermissionDenied.into()).await;
            }
            AuthorizationStatus::AuthorizedWhenInUse | AuthorizationStatus::AuthorizedAlways => {
                self.request_fix().await;
            }
            AuthorizationStatus::Unknown => {
                self.report(LocationError::UnknownStatus.into()).await;
            }
        }
    }

    /// Entry point for authorization changes pushed by the platform.
    pub async fn on_authorization_changed(&self, status: AuthorizationStatus) {
        debug!(?status, "location authorization changed");

        if status.is_authorized() {
            self.request_fix().await;
        } else if status.is_denied() {
            self.report(LocationError::PermissionRevoked.into()).await;
        }
    }

    pub async fn remove_saved_city(&self, name: &str) {
        self.store.dispatch(Action::RemoveSavedCity(name.to_string())).await;
    }

    async fn request_fix(&self) {
        match self.location.request_fix().await {
            Ok(fixes) => match fixes.last() {
                Some(fix) => {
                    self.fetch_weather_by_coordinates(fix.latitude, fix.longitude).await;
                }
                None => self.fail(LocationError::InvalidData.into()).await,
            },
            Err(err) => {
                warn!(error = %err, "location fix failed");
                self.fail(err.into()).await;
            }
        }
    }

    async fn run_fetch(&self, query: WeatherQuery) {
        match self.provider.current(&query).await {
            Ok(snapshot) => {
                info!(
                    %query,
                    city = snapshot.name(),
                    temp_c = snapshot.current.temp_c,
                    "weather updated"
                );
                self.store
                    .dispatch(Action::FetchSucceeded { snapshot, received_at: Utc::now() })
                    .await;
            }
            Err(err) => {
                warn!(%query, error = %err, "weather lookup failed");
                self.fail(err.into()).await;
            }
        }
    }

    /// Error that ends a started lookup.
    async fn fail(&self, err: AppError) {
        self.store.dispatch(Action::FetchFailed(err.user_message())).await;
    }

    /// Error raised before any lookup started.
    async fn report(&self, err: AppError) {
        self.store.dispatch(Action::ReportError(err.user_message())).await;
    }
}
