//! Session bootstrap, one-time tokens and gateway dispatch
//!
//! This module holds the logic that talks to the service: scraping a session
//! out of the landing page and application script, deriving one-time tokens
//! from it, and posting signed calls to the gateway.

pub mod bootstrap;
pub mod dispatcher;
pub mod extractor;
pub mod manager;
pub mod network;
pub mod token;

pub use bootstrap::Bootstrapper;
pub use dispatcher::Dispatcher;
pub use extractor::{Extractor, LandingPageExtractor, RegexExtractor, ScriptExtractor};
pub use manager::{Client, ClientGeneric};
pub use network::build_http_client;
pub use token::{generate_token, verify_token};
