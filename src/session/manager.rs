//! # Client
//!
//! [`ClientGeneric`] ties the pieces together: it owns the configuration, one
//! HTTP client, a [`Bootstrapper`], a [`Dispatcher`] and at most one
//! [`SessionState`]. Every client instance has its own state; nothing is global.
//!
//! ## Lifecycle
//!
//! - **Uninitialized**: [`generate_token`](ClientGeneric::generate_token) and
//!   [`call_method`](ClientGeneric::call_method) fail with
//!   [`Error::UninitializedSession`].
//! - **Initialized**: after [`init_session`](ClientGeneric::init_session)
//!   succeeds. Calling it again replaces the state as a whole once the new
//!   bootstrap has completed; a failed bootstrap leaves the previous state in place.
//!
//! ## Concurrency
//!
//! The state is published as an `Arc` snapshot. Calls clone the snapshot and
//! release the lock before any I/O, so concurrent calls do not wait on each
//! other and a call in flight keeps the session it started with.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use bbgs_api::{Client, Settings};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let client = Client::new(Settings::default())?;
//! client.init_session().await?;
//!
//! let country = client.call_method("getCountry", json!({})).await?;
//! println!("{}", country);
//! # Ok::<(), bbgs_api::Error>(())
//! # });
//! ```

use crate::{
    Error, Result,
    config::Settings,
    session::{
        bootstrap::Bootstrapper,
        dispatcher::Dispatcher,
        extractor::{Extractor, RegexExtractor},
        network::build_http_client,
        token,
    },
    types::SessionState,
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Client using the regex extractor for the HTML5 client markup
pub type Client = ClientGeneric<RegexExtractor>;

/// API client, generic over the scraping strategy
#[derive(Debug)]
pub struct ClientGeneric<E: Extractor = RegexExtractor> {
    /// Configuration settings
    settings: Arc<Settings>,
    bootstrapper: Bootstrapper<E>,
    dispatcher: Dispatcher,
    /// Current session, if any
    session: RwLock<Option<Arc<SessionState>>>,
}

impl ClientGeneric<RegexExtractor> {
    /// Creates a client for the configured service.
    ///
    /// Validates `settings` and builds the HTTP client; no request is made
    /// until [`init_session`](Self::init_session).
    pub fn new(settings: Settings) -> Result<Self> {
        let extractor = RegexExtractor::new(&settings.service.config_namespace)?;
        Self::with_extractor(settings, extractor)
    }
}

impl<E: Extractor> ClientGeneric<E> {
    /// Creates a client scraping with a custom extractor
    pub fn with_extractor(settings: Settings, extractor: E) -> Result<Self> {
        settings.validate()?;
        let http_client = build_http_client(&settings)?;

        Ok(Self {
            bootstrapper: Bootstrapper::new(
                http_client.clone(),
                settings.service.clone(),
                Arc::new(extractor),
            ),
            dispatcher: Dispatcher::new(http_client, settings.service.clone()),
            settings: Arc::new(settings),
            session: RwLock::new(None),
        })
    }

    /// Bootstraps a new session, replacing the current one on success.
    ///
    /// The service keeps a session alive for about 7 days; it is never
    /// refreshed automatically.
    pub async fn init_session(&self) -> Result<Arc<SessionState>> {
        let session = Arc::new(self.bootstrapper.init_session().await?);

        let mut current = self.session.write().await;
        if current.is_some() {
            tracing::info!("Replacing previous session");
        }
        *current = Some(Arc::clone(&session));

        Ok(session)
    }

    /// Snapshot of the current session
    pub async fn session(&self) -> Option<Arc<SessionState>> {
        self.session.read().await.clone()
    }

    /// Whether a session has been bootstrapped
    pub async fn is_initialized(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Drop the current session
    pub async fn clear_session(&self) {
        *self.session.write().await = None;
        tracing::info!("Session cleared");
    }

    /// Generates a one-time token for `method` from the current session
    pub async fn generate_token(&self, method: &str) -> Result<String> {
        let session = self.require_session().await?;
        Ok(token::generate_token(&session, method))
    }

    /// Calls `method` on the gateway and returns the `result` of the response
    pub async fn call_method(&self, method: &str, parameters: Value) -> Result<Value> {
        let session = self.require_session().await?;
        self.dispatcher
            .call_method(&session, method, parameters)
            .await
    }

    /// Typed variant of [`call_method`](Self::call_method)
    pub async fn call_method_as<P, T>(&self, method: &str, parameters: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let parameters = serde_json::to_value(parameters)?;
        let result = self.call_method(method, parameters).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Configuration this client was built with
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    async fn require_session(&self) -> Result<Arc<SessionState>> {
        self.session().await.ok_or(Error::UninitializedSession)
    }
}
