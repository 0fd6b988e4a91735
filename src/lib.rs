//! bbgs-api
//!
//! A barebones async client for the Grooveshark HTML5 internal API.
//!
//! # Architecture
//!
//! - **Bootstrap**: the landing page embeds a `GS.config` object carrying the
//!   PHP session ID, and links the application script that holds the client
//!   revision and token salt. Both are scraped once into a [`SessionState`].
//! - **Tokens**: one-time tokens are derived from the session's secret key
//!   (the MD5 of the session ID) and six random hex digits.
//! - **Dispatch**: every API method is a JSON envelope posted to a single
//!   gateway, answered with a JSON object whose `result` is returned.
//!
//! # Examples
//!
//! ```rust,no_run
//! use bbgs_api::{Client, Settings};
//! use serde_json::json;
//!
//! # async fn example() -> bbgs_api::Result<()> {
//! let client = Client::new(Settings::default())?;
//! client.init_session().await?;
//!
//! let token = client.generate_token("getStreamKeyFromSongIDEx").await?;
//! let results = client
//!     .call_method("getResultsFromSearch", json!({"query": "Daft Punk", "type": "Songs"}))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod session;
pub mod types;
pub mod utils;

pub use config::Settings;
pub use error::{Error, Result};
pub use session::{Client, ClientGeneric};
pub use types::SessionState;
