//! Gateway dispatch
//!
//! Wraps a method call in the request envelope, posts it to the gateway and
//! unwraps the `result` of the answer.

use crate::{
    Error, Result,
    config::ServiceSettings,
    types::{RequestEnvelope, RequestHeader, SessionState, into_result},
};
use reqwest::{
    Client,
    header::{ACCEPT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE, COOKIE, ORIGIN, REFERER},
};
use serde_json::Value;
use tracing::{debug, warn};

/// Issues signed calls against the gateway for a given session
#[derive(Debug, Clone)]
pub struct Dispatcher {
    http_client: Client,
    service: ServiceSettings,
}

impl Dispatcher {
    /// Create a dispatcher for `service`
    pub fn new(http_client: Client, service: ServiceSettings) -> Self {
        Self {
            http_client,
            service,
        }
    }

    /// Build the envelope for `method` without sending it
    pub fn build_envelope(
        &self,
        session: &SessionState,
        method: &str,
        parameters: Value,
    ) -> RequestEnvelope {
        RequestEnvelope::new(
            RequestHeader::new(self.service.client.as_str(), session),
            method,
            parameters,
        )
    }

    /// Call `method` with `parameters` and return the `result` of the response.
    ///
    /// # Errors
    ///
    /// - [`Error::Network`] on transport failures
    /// - [`Error::Json`] when the response body is not JSON
    /// - [`Error::Remote`] on a non-success status, a fault, or a missing `result`
    pub async fn call_method(
        &self,
        session: &SessionState,
        method: &str,
        parameters: Value,
    ) -> Result<Value> {
        let url = self.service.gateway_url(method)?;
        let body = self.build_envelope(session, method, parameters).to_body()?;

        debug!("Calling {} ({} bytes)", method, body.len());

        let response = self
            .http_client
            .post(url)
            .header(ACCEPT_ENCODING, "")
            .header(CONTENT_LENGTH, body.len())
            .header(CONTENT_TYPE, "text/plain")
            .header(COOKIE, session.cookie())
            .header(ORIGIN, self.service.origin())
            .header(REFERER, self.service.referer())
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!("Gateway answered {} to {}", status, method);
            let payload = serde_json::from_str(&text).unwrap_or(Value::String(text));
            return Err(Error::remote(
                format!("gateway returned HTTP {}", status),
                Some(payload),
            ));
        }

        into_result(serde_json::from_str(&text)?)
    }
}
