//! Session bootstrap
//!
//! Builds a [`SessionState`] from scratch:
//! 1. fetch the landing page and parse the embedded config object
//! 2. follow the application script reference found on the same page
//! 3. read the salt and client revision out of the script
//!
//! Every step either succeeds or aborts the whole bootstrap; nothing is retried.

use crate::{
    Error, Result,
    config::ServiceSettings,
    session::extractor::{Extractor, RegexExtractor},
    types::{SessionState, session_id_of},
};
use reqwest::{
    Client,
    header::{ACCEPT_ENCODING, REFERER},
};
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// Scrapes a fresh session from the service
#[derive(Debug)]
pub struct Bootstrapper<E: Extractor = RegexExtractor> {
    http_client: Client,
    service: ServiceSettings,
    extractor: Arc<E>,
}

impl<E: Extractor> Bootstrapper<E> {
    /// Create a bootstrapper for `service`
    pub fn new(http_client: Client, service: ServiceSettings, extractor: Arc<E>) -> Self {
        Self {
            http_client,
            service,
            extractor,
        }
    }

    /// Run the full bootstrap sequence.
    ///
    /// # Errors
    ///
    /// - [`Error::Network`] when either fetch fails or answers with an error status
    /// - [`Error::Parse`] when a marker is missing or the config is not valid JSON
    /// - [`Error::MissingField`] when the config has no `sessionID`
    pub async fn init_session(&self) -> Result<SessionState> {
        let base_url = Url::parse(&self.service.base_url())
            .map_err(|e| Error::config(format!("Invalid base URL: {}", e)))?;

        info!("Bootstrapping session from {}", base_url);
        let page = self.fetch_text(base_url.clone(), None).await?;
        debug!("Landing page: {} bytes", page.len());

        let config = self.extractor.extract_config(&page)?;
        session_id_of(&config)?;

        let script_path = self.extractor.extract_script_path(&page)?;
        let script_url = base_url.join(&script_path).map_err(|e| {
            Error::parse(format!("Invalid script reference {:?}: {}", script_path, e))
        })?;

        debug!("Fetching application script {}", script_url);
        let script = self
            .fetch_text(script_url, Some(self.service.referer()))
            .await?;

        let salt = self.extractor.extract_salt(&script)?;
        let client_revision = self.extractor.extract_client_revision(&script)?;

        let session = SessionState::from_scraped(config, salt, client_revision)?;
        info!(
            client_revision = %session.client_revision,
            uuid = %session.client_instance_id,
            "Session initialized"
        );

        Ok(session)
    }

    /// GET `url` as uncompressed text
    async fn fetch_text(&self, url: Url, referer: Option<String>) -> Result<String> {
        let mut request = self.http_client.get(url).header(ACCEPT_ENCODING, "");
        if let Some(referer) = referer {
            request = request.header(REFERER, referer);
        }

        let response = request.send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
