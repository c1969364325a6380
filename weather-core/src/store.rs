//! Observable app state.
//!
//! A single task owns the mutable [`AppState`]. Every change arrives as an
//! [`Action`] on one queue and is applied in arrival order by [`reduce`], so
//! network completions never write state from whatever thread they finish on.
//! Readers get immutable snapshots through a `watch` channel.

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, trace, warn};

use crate::model::WeatherSnapshot;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Last successfully fetched snapshot.
    pub current_weather: Option<WeatherSnapshot>,
    /// True between a fetch being dispatched and its completion.
    pub is_loading: bool,
    /// Insertion-ordered, unique by `location.name`, session-only.
    pub saved_cities: Vec<WeatherSnapshot>,
    pub error_message: Option<String>,
    /// When `current_weather` was received.
    pub last_updated: Option<DateTime<Utc>>,
}

impl AppState {
    pub fn is_saved(&self, name: &str) -> bool {
        self.saved_cities.iter().any(|s| s.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A lookup is about to hit the network.
    FetchStarted,
    FetchSucceeded {
        snapshot: WeatherSnapshot,
        received_at: DateTime<Utc>,
    },
    /// A started lookup ended in an error.
    FetchFailed(String),
    /// An error that never started a lookup (validation, permissions).
    ReportError(String),
    RemoveSavedCity(String),
}

pub fn reduce(state: &mut AppState, action: Action) {
    match action {
        Action::FetchStarted => {
            state.is_loading = true;
            state.error_message = None;
        }
        Action::FetchSucceeded { snapshot, received_at } => {
            // An already saved city keeps its first copy.
            if !state.is_saved(snapshot.name()) {
                state.saved_cities.push(snapshot.clone());
            }
            state.current_weather = Some(snapshot);
            state.last_updated = Some(received_at);
            state.error_message = None;
            state.is_loading = false;
        }
        Action::FetchFailed(message) => {
            state.error_message = Some(message);
            state.is_loading = false;
        }
        Action::ReportError(message) => {
            state.error_message = Some(message);
        }
        Action::RemoveSavedCity(name) => {
            if let Some(idx) = state.saved_cities.iter().position(|s| s.name() == name) {
                state.saved_cities.remove(idx);
            }
        }
    }
}

type Envelope = (Action, oneshot::Sender<()>);

/// Handle to the state task. Cloning shares the same state.
#[derive(Debug, Clone)]
pub struct Store {
    actions: mpsc::UnboundedSender<Envelope>,
    state: watch::Receiver<AppState>,
}

impl Store {
    /// Starts the state task on the current tokio runtime.
    pub fn spawn() -> Self {
        let (actions, mut queue) = mpsc::unbounded_channel::<Envelope>();
        let (publisher, state) = watch::channel(AppState::default());

        tokio::spawn(async move {
            let mut current = AppState::default();
            while let Some((action, applied)) = queue.recv().await {
                trace!(?action, "applying action");
                reduce(&mut current, action);
                publisher.send_replace(current.clone());
                let _ = applied.send(());
            }
            debug!("state store stopped");
        });

        Self { actions, state }
    }

    /// Queues an action and waits until it has been applied.
    pub async fn dispatch(&self, action: Action) {
        let (applied, done) = oneshot::channel();
        if self.actions.send((action, applied)).is_err() {
            warn!("state store is gone, dropping action");
            return;
        }
        if done.await.is_err() {
            warn!("state store stopped before applying action");
        }
    }

    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.clone()
    }
}
