use thiserror::Error;

/// Failures of a single `current.json` lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Bad input caught locally; the network is never touched.
    #[error("{0}")]
    Validation(String),

    /// DNS, connection, timeout or body read failure.
    #[error("{0}")]
    Transport(String),

    /// Any non-200 response. The status is logged, not shown.
    #[error("Weather data not found")]
    NotFound { status: u16 },

    /// 200 with a body that is not a weather snapshot.
    #[error("Failed to decode weather data")]
    Decode(String),
}

impl FetchError {
    pub fn empty_city() -> Self {
        FetchError::Validation("Please enter a city name".to_string())
    }

    pub fn invalid_city() -> Self {
        FetchError::Validation("Invalid city name".to_string())
    }

    pub fn invalid_coordinates() -> Self {
        FetchError::Validation("Invalid location coordinates".to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    /// The request URL carries the API key, so it is stripped from the message.
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.without_url().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location access denied. Please enable in Settings.")]
    PermissionDenied,

    /// Pushed authorization change to denied/restricted.
    #[error("Location access denied")]
    PermissionRevoked,

    #[error("Unknown location status")]
    UnknownStatus,

    #[error("Location error: {0}")]
    Fix(String),

    #[error("Invalid location data")]
    InvalidData,
}

/// Everything the controller can recover from. Only `user_message` leaves it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Location(#[from] LocationError),
}

impl AppError {
    /// The string stored in `AppState::error_message`.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
