//! Outbound HTTP client construction

use crate::{Error, Result, config::Settings};
use reqwest::Client;

/// Build the HTTP client shared by the bootstrapper and the dispatcher.
///
/// Compression support is not compiled into reqwest, so responses are never
/// negotiated as gzip and scraped bodies arrive as plain text.
pub fn build_http_client(settings: &Settings) -> Result<Client> {
    // Proxies come from Settings only, never implicitly from the environment
    let mut builder = Client::builder()
        .user_agent(settings.network.user_agent.clone())
        .no_proxy();

    if let Some(proxy_url) = settings.get_proxy_url() {
        tracing::debug!("Routing requests through proxy {}", proxy_url);
        let proxy = reqwest::Proxy::all(proxy_url)
            .map_err(|e| Error::config(format!("Invalid proxy {:?}: {}", proxy_url, e)))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_default_client() {
        assert!(build_http_client(&Settings::default()).is_ok());
    }

    #[test]
    fn test_build_client_with_proxy() {
        let mut settings = Settings::default();
        settings.network.http_proxy = Some("http://127.0.0.1:3128".to_string());
        assert!(build_http_client(&settings).is_ok());
    }
}
