//! External lookups: translation, pronunciation and browser pages
//!
//! Requests run on tokio tasks so the interface keeps handling keys while a
//! lookup is in flight. Results come back as [`ServiceEvent`]s on a channel
//! drained by the main loop. Starting a request cancels the previous one of
//! the same kind.

pub mod browser;
pub mod error;
pub mod speech;
pub mod translate;

use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
pub use error::ServiceError;
pub use translate::{TranslateClient, TranslationProvider};

/// Something the reader asked an external service to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceRequest {
    Translate { provider: TranslationProvider, token: String, source: String, target: String },
    Speak { token: String, language_code: String },
    OpenUrl { url: String },
}

/// Requests of the same kind supersede each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Translation,
    Speech,
    Browser,
}

impl ServiceRequest {
    pub fn kind(&self) -> ServiceKind {
        match self {
            Self::Translate { .. } => ServiceKind::Translation,
            Self::Speak { .. } => ServiceKind::Speech,
            Self::OpenUrl { .. } => ServiceKind::Browser,
        }
    }
}

/// Outcome of a finished request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEvent {
    /// Id the request was dispatched with
    pub id: u64,
    pub kind: ServiceKind,
    /// Translated text, for successful translations
    pub translation: Option<String>,
    /// Human-readable failure, if any
    pub error: Option<String>,
}

impl ServiceEvent {
    fn new(id: u64, kind: ServiceKind, result: Result<Option<String>, String>) -> Self {
        match result {
            Ok(translation) => Self { id, kind, translation, error: None },
            Err(error) => Self { id, kind, translation: None, error: Some(error) },
        }
    }
}

/// Spawns service requests and tracks the in-flight one per kind
pub struct ServiceRunner {
    http: Client,
    translator: TranslateClient,
    audio_dir: PathBuf,
    audio_player: Vec<String>,
    tx: mpsc::UnboundedSender<ServiceEvent>,
    in_flight: HashMap<ServiceKind, CancellationToken>,
}

impl ServiceRunner {
    /// Request timeout for HTTP lookups
    const TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a runner and the receiving end of its result channel
    pub fn new(
        config: &Config,
    ) -> Result<(Self, mpsc::UnboundedReceiver<ServiceEvent>), ServiceError> {
        let http = Client::builder()
            .user_agent(concat!("lingo/", env!("CARGO_PKG_VERSION")))
            .timeout(Self::TIMEOUT)
            .build()?;
        let (tx, rx) = mpsc::unbounded_channel();

        let runner = Self {
            translator: TranslateClient::new(http.clone()),
            http,
            audio_dir: config.audio_dir.clone(),
            audio_player: config.audio_player.clone(),
            tx,
            in_flight: HashMap::new(),
        };
        Ok((runner, rx))
    }

    /// Start `request`, cancelling any in-flight request of the same kind
    pub fn dispatch(&mut self, id: u64, request: ServiceRequest) {
        let kind = request.kind();
        tracing::debug!("Dispatching request {} {:?}", id, request);

        match request {
            ServiceRequest::Translate { provider, token, source, target } => {
                let translator = self.translator.clone();
                self.spawn_job(id, kind, async move {
                    let result = translator
                        .translate(provider, &token, &source, &target)
                        .await
                        .map(Some)
                        .map_err(|e| report(id, &e));
                    ServiceEvent::new(id, kind, result)
                });
            }
            ServiceRequest::Speak { token, language_code } => {
                let http = self.http.clone();
                let audio_dir = self.audio_dir.clone();
                let player = self.audio_player.clone();
                self.spawn_job(id, kind, async move {
                    let failure =
                        speech::speak(&http, &token, &language_code, &audio_dir, &player).await;
                    ServiceEvent::new(id, kind, failure.map_or(Ok(None), Err))
                });
            }
            ServiceRequest::OpenUrl { url } => {
                self.spawn_job(id, kind, async move {
                    let result = browser::open_in_browser(&url)
                        .await
                        .map(|_| None)
                        .map_err(|e| report(id, &e));
                    ServiceEvent::new(id, kind, result)
                });
            }
        }
    }

    /// Cancel every in-flight request
    pub fn cancel_all(&mut self) {
        for (kind, token) in self.in_flight.drain() {
            tracing::debug!("Cancelling {:?}", kind);
            token.cancel();
        }
    }

    fn spawn_job<F>(&mut self, id: u64, kind: ServiceKind, job: F)
    where
        F: Future<Output = ServiceEvent> + Send + 'static,
    {
        if let Some(previous) = self.in_flight.remove(&kind) {
            previous.cancel();
        }

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {
                    tracing::debug!("Request {} cancelled", id);
                }
                event = job => {
                    // Receiver gone means the app is shutting down
                    let _ = tx.send(event);
                }
            }
        });

        self.in_flight.insert(kind, token);
    }
}

fn report(id: u64, error: &ServiceError) -> String {
    tracing::warn!("Request {} failed (transient: {}): {}", id, error.is_transient(), error);
    error.to_string()
}
