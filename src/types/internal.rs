//! Session state
//!
//! The only stateful entity of the client: everything scraped during bootstrap
//! plus the locally derived identifiers.

use crate::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use md5::{Digest, Md5};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// How long the service honours a session. Informational only.
pub const SESSION_LIFETIME_DAYS: i64 = 7;

/// Fully populated session, produced by a successful bootstrap
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// PHP session identifier issued by the service
    pub session_id: String,
    /// Lowercase hex MD5 of `session_id`, seed for one-time tokens
    pub secret_key: String,
    /// Random identifier bound to this session instance
    pub client_instance_id: Uuid,
    /// Salt scraped from the application script. Not used for signing.
    pub salt: String,
    /// Client revision scraped from the application script
    pub client_revision: String,
    /// Country object from the scraped config, passed through verbatim
    pub country: Option<Value>,
    /// Complete scraped config object
    pub config: Map<String, Value>,
    /// When the bootstrap completed
    pub created_at: DateTime<Utc>,
}

impl SessionState {
    /// Assemble a session from the scraped config and script constants.
    ///
    /// Fails with [`Error::MissingField`] when `sessionID` is absent or not a string.
    pub fn from_scraped(
        config: Map<String, Value>,
        salt: impl Into<String>,
        client_revision: impl Into<String>,
    ) -> Result<Self> {
        let session_id = session_id_of(&config)?.to_string();

        Ok(Self {
            secret_key: derive_secret_key(&session_id),
            session_id,
            client_instance_id: Uuid::new_v4(),
            salt: salt.into(),
            client_revision: client_revision.into(),
            country: config.get("country").cloned(),
            config,
            created_at: Utc::now(),
        })
    }

    /// When the service is expected to drop this session
    pub fn expires_at_hint(&self) -> DateTime<Utc> {
        self.created_at + Duration::days(SESSION_LIFETIME_DAYS)
    }

    /// Whether the service has most likely dropped this session already
    pub fn is_probably_expired(&self) -> bool {
        Utc::now() > self.expires_at_hint()
    }

    /// Cookie header value carrying the session back to the service
    pub fn cookie(&self) -> String {
        format!("PHPSESSID={}", self.session_id)
    }
}

/// `sessionID` member of a scraped config
pub fn session_id_of(config: &Map<String, Value>) -> Result<&str> {
    config
        .get("sessionID")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::missing_field("sessionID"))
}

/// Secret key for a session: hex MD5 of the session identifier
pub fn derive_secret_key(session_id: &str) -> String {
    hex::encode(Md5::digest(session_id.as_bytes()))
}
