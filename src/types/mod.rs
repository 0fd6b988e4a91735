//! Type definitions for the API client
//!
//! This module contains the session state, the gateway request envelope and
//! gateway response handling.

pub mod internal;
pub mod request;
pub mod response;

pub use internal::{SESSION_LIFETIME_DAYS, SessionState, derive_secret_key, session_id_of};
pub use request::{RequestEnvelope, RequestHeader};
pub use response::into_result;
