//! Configuration settings structure
//!
//! Defines the main settings structure and loading logic for the API client.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default service host
pub const DEFAULT_HOST: &str = "html5.grooveshark.com";
/// Default gateway path
pub const DEFAULT_GATEWAY: &str = "/more.php";
/// Default client identifier sent in every request header
pub const DEFAULT_CLIENT: &str = "mobileshark";
/// Default namespace of the embedded config object (`GS.config = {...}`)
pub const DEFAULT_CONFIG_NAMESPACE: &str = "GS";

/// Main configuration settings for the API client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Remote service configuration
    pub service: ServiceSettings,
    /// Outbound HTTP configuration
    pub network: NetworkSettings,
    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Remote service endpoints and identifiers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Host (optionally with port) serving both the landing page and the gateway
    pub host: String,
    /// Gateway path for authenticated calls
    pub gateway: String,
    /// Client identifier placed in the request header
    pub client: String,
    /// Scheme used to fetch the landing page and the script
    pub bootstrap_scheme: String,
    /// Scheme used for gateway calls
    pub gateway_scheme: String,
    /// Namespace owning the embedded config object
    pub config_namespace: String,
}

/// Outbound HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    /// User agent for every request
    pub user_agent: String,
    /// HTTPS proxy URL
    pub https_proxy: Option<String>,
    /// HTTP proxy URL
    pub http_proxy: Option<String>,
    /// Proxy for all protocols
    pub all_proxy: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level
    pub level: String,
    /// Enable verbose logging
    pub verbose: bool,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            gateway: DEFAULT_GATEWAY.to_string(),
            client: DEFAULT_CLIENT.to_string(),
            bootstrap_scheme: "http".to_string(),
            gateway_scheme: "https".to_string(),
            config_namespace: DEFAULT_CONFIG_NAMESPACE.to_string(),
        }
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            https_proxy: None,
            http_proxy: None,
            all_proxy: None,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            verbose: false,
        }
    }
}

impl ServiceSettings {
    /// Landing page URL, e.g. `http://html5.grooveshark.com/`
    pub fn base_url(&self) -> String {
        format!("{}://{}/", self.bootstrap_scheme, self.host)
    }

    /// Value of the `Origin` header sent to the gateway
    pub fn origin(&self) -> String {
        format!("http://{}", self.host)
    }

    /// Value of the `Referer` header sent with the script fetch and gateway calls
    pub fn referer(&self) -> String {
        format!("http://{}/", self.host)
    }

    /// Gateway URL for `method`, e.g. `https://html5.grooveshark.com/more.php?getCountry`
    pub fn gateway_url(&self, method: &str) -> Result<url::Url> {
        let mut url = url::Url::parse(&format!(
            "{}://{}{}",
            self.gateway_scheme, self.host, self.gateway
        ))
        .map_err(|e| Error::config(format!("Invalid gateway URL: {}", e)))?;
        url.set_query(Some(method));
        Ok(url)
    }
}

impl Settings {
    /// Create new settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        Self::default().merge_with_env()
    }

    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::config(format!("Invalid configuration file {:?}: {}", path, e)))
    }

    /// Override fields with values from the process environment
    pub fn merge_with_env(self) -> Result<Self> {
        self.merge_with(|key| std::env::var(key).ok())
    }

    /// Override fields with values from `lookup`
    pub fn merge_with<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service = &mut self.service;
        for (key, field) in [
            ("BBGS_HOST", &mut service.host),
            ("BBGS_GATEWAY", &mut service.gateway),
            ("BBGS_CLIENT", &mut service.client),
            ("BBGS_BOOTSTRAP_SCHEME", &mut service.bootstrap_scheme),
            ("BBGS_GATEWAY_SCHEME", &mut service.gateway_scheme),
            ("BBGS_CONFIG_NAMESPACE", &mut service.config_namespace),
            ("BBGS_USER_AGENT", &mut self.network.user_agent),
            ("BBGS_LOG_LEVEL", &mut self.logging.level),
        ] {
            if let Some(value) = lookup(key) {
                *field = value;
            }
        }

        if let Some(verbose) = lookup("BBGS_VERBOSE") {
            self.logging.verbose = verbose
                .parse()
                .map_err(|e| Error::config(format!("Invalid BBGS_VERBOSE: {}", e)))?;
        }

        // Check environment variables the way curl does
        if let Some(proxy) = lookup("HTTPS_PROXY") {
            self.network.https_proxy = Some(proxy);
        }
        if let Some(proxy) = lookup("HTTP_PROXY") {
            self.network.http_proxy = Some(proxy);
        }
        if let Some(proxy) = lookup("ALL_PROXY") {
            self.network.all_proxy = Some(proxy);
        }

        Ok(self)
    }

    /// Validate the final configuration
    pub fn validate(&self) -> Result<()> {
        let service = &self.service;
        if service.host.trim().is_empty() {
            return Err(Error::config("Host must not be empty"));
        }
        if !service.gateway.starts_with('/') {
            return Err(Error::config(format!(
                "Gateway path must start with '/': {}",
                service.gateway
            )));
        }
        if service.client.is_empty() {
            return Err(Error::config("Client identifier must not be empty"));
        }
        for scheme in [&service.bootstrap_scheme, &service.gateway_scheme] {
            if scheme != "http" && scheme != "https" {
                return Err(Error::config(format!("Unsupported scheme: {}", scheme)));
            }
        }
        if service.config_namespace.is_empty() {
            return Err(Error::config("Config namespace must not be empty"));
        }

        url::Url::parse(&service.base_url())
            .map_err(|e| Error::config(format!("Invalid host {:?}: {}", service.host, e)))?;
        service.gateway_url("ping")?;

        if let Some(proxy) = self.get_proxy_url() {
            url::Url::parse(proxy)
                .map_err(|e| Error::config(format!("Invalid proxy URL {:?}: {}", proxy, e)))?;
        }

        Ok(())
    }

    /// Effective proxy URL: HTTPS, then HTTP, then ALL
    pub fn get_proxy_url(&self) -> Option<&str> {
        self.network
            .https_proxy
            .as_deref()
            .or(self.network.http_proxy.as_deref())
            .or(self.network.all_proxy.as_deref())
    }
}
