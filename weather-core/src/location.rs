//! Location-service collaborator.
//!
//! Platform services answer with futures instead of delegate callbacks:
//! `request_permission` resolves once with the new authorization status and
//! `request_fix` resolves once with the fixes gathered for that request.

use async_trait::async_trait;
use std::fmt::Debug;
use tracing::debug;

use crate::{error::LocationError, model::Coordinates};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    NotDetermined,
    Denied,
    Restricted,
    AuthorizedWhenInUse,
    AuthorizedAlways,
    Unknown,
}

impl AuthorizationStatus {
    pub fn is_authorized(self) -> bool {
        matches!(self, Self::AuthorizedWhenInUse | Self::AuthorizedAlways)
    }

    pub fn is_denied(self) -> bool {
        matches!(self, Self::Denied | Self::Restricted)
    }
}

#[async_trait]
pub trait LocationService: Send + Sync + Debug {
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Ask the user for access. Resolves with the status after they answer.
    async fn request_permission(&self) -> AuthorizationStatus;

    /// One-shot location request. The last fix in the sequence is the freshest.
    async fn request_fix(&self) -> Result<Vec<Coordinates>, LocationError>;
}

/// Reports preconfigured coordinates as the device location.
///
/// Authorized when coordinates are present, denied otherwise; there is no
/// one to prompt, so `request_permission` just reports the same status.
#[derive(Debug, Clone, Default)]
pub struct FixedLocation {
    home: Option<Coordinates>,
}

impl FixedLocation {
    pub fn new(home: Option<Coordinates>) -> Self {
        Self { home }
    }
}

#[async_trait]
impl LocationService for FixedLocation {
    fn authorization_status(&self) -> AuthorizationStatus {
        match self.home {
            Some(_) => AuthorizationStatus::AuthorizedAlways,
            None => AuthorizationStatus::Denied,
        }
    }

    async fn request_permission(&self) -> AuthorizationStatus {
        self.authorization_status()
    }

    async fn request_fix(&self) -> Result<Vec<Coordinates>, LocationError> {
        debug!(home = ?self.home, "fixed location requested");
        self.home
            .map(|c| vec![c])
            .ok_or_else(|| LocationError::Fix("no home location configured".to_string()))
    }
}
