//! Scraping of the landing page and the application script
//!
//! The service exposes its session configuration only through markup: a JSON
//! object assigned in an inline script of the landing page, and two constants
//! baked into the minified application script. Extraction sits behind two
//! traits so the strategy can be replaced or faked without touching the
//! bootstrap or dispatch code.

use crate::{Error, Result};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// Reference to the application script, with its 10-digit cache buster
static SCRIPT_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)src="([^"]*app\.min\.js\?\d{10})"#).expect("valid regex")
});

/// Identifier of the variable holding the token salt
static SALT_HOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"revToken:\s*([A-Za-z_$][\w$]*)").expect("valid regex")
});

static CLIENT_REVISION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"clientRevision:\s*"(\w+)"#).expect("valid regex"));

/// Extracts bootstrap data from the landing page HTML
pub trait LandingPageExtractor: Send + Sync + std::fmt::Debug {
    /// Embedded configuration object
    fn extract_config(&self, page: &str) -> Result<Map<String, Value>>;

    /// Path (or URL) of the application script
    fn extract_script_path(&self, page: &str) -> Result<String>;
}

/// Extracts constants from the application script
pub trait ScriptExtractor: Send + Sync + std::fmt::Debug {
    /// Salt for one-time tokens
    fn extract_salt(&self, script: &str) -> Result<String>;

    /// Client revision sent in every request header
    fn extract_client_revision(&self, script: &str) -> Result<String>;
}

/// Everything the bootstrapper needs to scrape a session
pub trait Extractor: LandingPageExtractor + ScriptExtractor {}

impl<T: LandingPageExtractor + ScriptExtractor> Extractor for T {}

/// Regex based extractor matching the markup served by the HTML5 client
#[derive(Debug, Clone)]
pub struct RegexExtractor {
    /// Namespace owning the config object, e.g. `GS`
    namespace: String,
    /// Matches `<namespace>.config =`
    config_marker: Regex,
}

impl RegexExtractor {
    /// Create an extractor looking for `<namespace>.config = {...};`
    pub fn new(namespace: &str) -> Result<Self> {
        let config_marker = Regex::new(&format!(r"{}\.config\s*=\s*", regex::escape(namespace)))
            .map_err(|e| Error::config(format!("Invalid config namespace: {}", e)))?;

        Ok(Self {
            namespace: namespace.to_string(),
            config_marker,
        })
    }

    /// Namespace owning the config object
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

impl LandingPageExtractor for RegexExtractor {
    fn extract_config(&self, page: &str) -> Result<Map<String, Value>> {
        let marker = self.config_marker.find(page).ok_or_else(|| {
            Error::parse(format!(
                "{}.config marker not found in landing page",
                self.namespace
            ))
        })?;

        // Parse exactly one JSON value; whatever follows it (`;`, more script) is ignored
        let mut values =
            serde_json::Deserializer::from_str(&page[marker.end()..]).into_iter::<Value>();

        match values.next() {
            Some(Ok(Value::Object(config))) => Ok(config),
            Some(Ok(_)) => Err(Error::parse(format!(
                "{}.config is not a JSON object",
                self.namespace
            ))),
            Some(Err(e)) => Err(Error::parse(format!(
                "{}.config is not valid JSON: {}",
                self.namespace, e
            ))),
            None => Err(Error::parse(format!("{}.config has no value", self.namespace))),
        }
    }

    fn extract_script_path(&self, page: &str) -> Result<String> {
        SCRIPT_PATH
            .captures(page)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| Error::parse("application script reference not found in landing page"))
    }
}

impl ScriptExtractor for RegexExtractor {
    fn extract_salt(&self, script: &str) -> Result<String> {
        let holder = SALT_HOLDER
            .captures(script)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| Error::parse("revToken marker not found in application script"))?
            .as_str();

        let declaration = Regex::new(&format!(
            r#"\bvar\s+{}\s*=\s*"([^"]*)""#,
            regex::escape(holder)
        ))
        .map_err(|e| Error::parse(format!("unusable salt variable {:?}: {}", holder, e)))?;

        declaration
            .captures(script)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| {
                Error::parse(format!(
                    "declaration of salt variable {:?} not found in application script",
                    holder
                ))
            })
    }

    fn extract_client_revision(&self, script: &str) -> Result<String> {
        CLIENT_REVISION
            .captures(script)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| Error::parse("clientRevision marker not found in application script"))
    }
}
