//! Session bootstrap integration tests
//!
//! Runs the full scrape sequence against a wiremock double of the service.

mod common;

use bbgs_api::{Client, Error, Settings};
use common::*;
use md5::{Digest, Md5};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_bootstrap_populates_session() {
    let server = MockServer::start().await;
    let (client, session) = initialized_client(&server).await;

    assert_eq!(session.session_id, SESSION_ID);
    assert_eq!(
        session.secret_key,
        hex::encode(Md5::digest(SESSION_ID.as_bytes()))
    );
    assert_eq!(session.salt, SALT);
    assert_eq!(session.client_revision, CLIENT_REVISION);
    assert_eq!(session.country.as_ref().map(|c| &c["ID"]), Some(&json!(223)));
    assert_eq!(session.config.get("lang"), Some(&json!("en")));
    assert!(!session.is_probably_expired());

    let current = client.session().await.unwrap();
    assert_eq!(current.client_instance_id, session.client_instance_id);
}

#[tokio::test]
async fn test_secret_key_is_lowercase_md5_hex() {
    let server = MockServer::start().await;
    mount_service(&server, landing_page("ABCdef123"), app_script()).await;

    let client = Client::new(settings_for(&server)).unwrap();
    let session = client.init_session().await.unwrap();

    assert_eq!(session.secret_key.len(), 32);
    assert!(
        session
            .secret_key
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    );
    assert_eq!(
        session.secret_key,
        hex::encode(Md5::digest(b"ABCdef123"))
    );
}

#[tokio::test]
async fn test_bootstrap_request_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(landing_page(SESSION_ID)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SCRIPT_PATH))
        .and(header("referer", referer_for(&server).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(app_script()))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(settings_for(&server)).unwrap();
    client.init_session().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert_eq!(
            request
                .headers
                .get("accept-encoding")
                .map(|value| value.as_bytes()),
            Some(&b""[..])
        );
    }
    assert_eq!(requests[1].url.query(), Some("1351119412"));
}

#[tokio::test]
async fn test_reinit_replaces_instance_id() {
    let server = MockServer::start().await;
    let (client, first) = initialized_client(&server).await;

    let second = client.init_session().await.unwrap();
    let current = client.session().await.unwrap();

    assert_ne!(first.client_instance_id, second.client_instance_id);
    assert_eq!(current.client_instance_id, second.client_instance_id);
    assert_eq!(first.secret_key, second.secret_key);
}

#[tokio::test]
async fn test_malformed_config_is_a_parse_error() {
    let server = MockServer::start().await;
    mount_service(
        &server,
        landing_page_with(r#"{"sessionID":"abc","country":{"ID":223"#),
        app_script(),
    )
    .await;

    let client = Client::new(settings_for(&server)).unwrap();
    let err = client.init_session().await.unwrap_err();

    assert!(err.is_parse(), "unexpected error: {err}");
    assert!(!client.is_initialized().await);
}

#[tokio::test]
async fn test_missing_config_marker() {
    let server = MockServer::start().await;
    mount_service(
        &server,
        "<html><body>Grooveshark is down for maintenance</body></html>".to_string(),
        app_script(),
    )
    .await;

    let client = Client::new(settings_for(&server)).unwrap();
    assert!(client.init_session().await.unwrap_err().is_parse());
}

#[tokio::test]
async fn test_missing_session_id_stops_before_script_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(landing_page_with(r#"{"lang":"en"}"#)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SCRIPT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(app_script()))
        .expect(0)
        .mount(&server)
        .await;

    let client = Client::new(settings_for(&server)).unwrap();
    let err = client.init_session().await.unwrap_err();

    assert!(matches!(err, Error::MissingField { ref field } if field == "sessionID"));
}

#[tokio::test]
async fn test_missing_script_reference() {
    let server = MockServer::start().await;
    let page = landing_page(SESSION_ID).replace("app.min.js", "main.js");
    mount_service(&server, page, app_script()).await;

    let client = Client::new(settings_for(&server)).unwrap();
    assert!(client.init_session().await.unwrap_err().is_parse());
}

#[tokio::test]
async fn test_script_without_salt_holder() {
    let server = MockServer::start().await;
    let script = app_script().replace("revToken:q,", "");
    mount_service(&server, landing_page(SESSION_ID), script).await;

    let client = Client::new(settings_for(&server)).unwrap();
    assert!(client.init_session().await.unwrap_err().is_parse());
}

#[tokio::test]
async fn test_script_without_client_revision() {
    let server = MockServer::start().await;
    let script = app_script().replace("clientRevision:", "revision:");
    mount_service(&server, landing_page(SESSION_ID), script).await;

    let client = Client::new(settings_for(&server)).unwrap();
    assert!(client.init_session().await.unwrap_err().is_parse());
}

#[tokio::test]
async fn test_landing_page_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = Client::new(settings_for(&server)).unwrap();
    let err = client.init_session().await.unwrap_err();
    assert!(matches!(err, Error::Network(_)));
}

#[tokio::test]
async fn test_connection_failure_is_a_network_error() {
    let mut settings = Settings::default();
    // Nothing listens on the discard port
    settings.service.host = "127.0.0.1:9".to_string();

    let client = Client::new(settings).unwrap();
    let err = client.init_session().await.unwrap_err();
    assert!(matches!(err, Error::Network(_)));
}
