//! Request type definitions
//!
//! Defines the JSON envelope posted to the gateway.

use crate::types::SessionState;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Header section of every gateway request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequestHeader {
    /// Client identifier, e.g. `mobileshark`
    pub client: String,
    /// Scraped client revision
    pub client_revision: String,
    /// Scraped country object, omitted when the config had none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<Value>,
    /// Always 0
    pub privacy: u8,
    /// PHP session identifier
    pub session: String,
    /// Client instance identifier
    pub uuid: String,
}

/// Complete request body for one gateway call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestEnvelope {
    pub header: RequestHeader,
    pub method: String,
    pub parameters: Value,
}

impl RequestHeader {
    /// Build the header for `session` on behalf of `client`
    pub fn new(client: impl Into<String>, session: &SessionState) -> Self {
        Self {
            client: client.into(),
            client_revision: session.client_revision.clone(),
            country: session.country.clone(),
            privacy: 0,
            session: session.session_id.clone(),
            uuid: session.client_instance_id.to_string(),
        }
    }
}

impl RequestEnvelope {
    /// Create a new envelope
    pub fn new(header: RequestHeader, method: impl Into<String>, parameters: Value) -> Self {
        Self {
            header,
            method: method.into(),
            parameters,
        }
    }

    /// UTF-8 JSON body
    pub fn to_body(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
