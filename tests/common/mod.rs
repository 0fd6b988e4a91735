//! Common test utilities and helpers
//!
//! Fixtures imitating the HTML5 client's landing page and application script,
//! and helpers wiring them into a wiremock server.

#![allow(dead_code)]

use bbgs_api::{Client, SessionState, Settings};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SESSION_ID: &str = "e8d6f2a01c9b4d3e7a51";
pub const SALT: &str = "gooeyFlubber";
pub const CLIENT_REVISION: &str = "20120830";
pub const SCRIPT_PATH: &str = "/build/app.min.js";

/// Landing page embedding `config_json` as `GS.config`
pub fn landing_page_with(config_json: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>Grooveshark</title>
<script type="text/javascript">
    window.GS = window.GS || {{}};
    GS.config = {config_json};
</script>
<script type="text/javascript" src="/build/vendor.min.js?1351119412"></script>
<script type="text/javascript" src="{SCRIPT_PATH}?1351119412"></script>
</head>
<body></body>
</html>"#
    )
}

/// Landing page for `session_id` with a country object
pub fn landing_page(session_id: &str) -> String {
    landing_page_with(&format!(
        r#"{{"sessionID":"{session_id}","country":{{"ID":223,"CC1":0,"CC2":0,"CC3":0,"CC4":1073741824,"DMA":0,"IPR":0}},"lang":"en"}}"#
    ))
}

/// Minified application script carrying the salt and client revision
pub fn app_script() -> String {
    format!(
        r#"!function(a,b){{"use strict";var c=a.GS||{{}},d="{SALT}",e=null;var q="{SALT}";c.Models.Service=b.Model.extend({{defaults:{{client:"mobileshark",clientRevision:"{CLIENT_REVISION}",revToken:q,privacy:0}}}})}}(window,Backbone);"#
    )
}

/// Settings pointing every request at `server`
pub fn settings_for(server: &MockServer) -> Settings {
    let mut settings = Settings::default();
    settings.service.host = server.address().to_string();
    settings.service.gateway_scheme = "http".to_string();
    settings
}

/// `Referer` expected on the script fetch and gateway calls
pub fn referer_for(server: &MockServer) -> String {
    format!("http://{}/", server.address())
}

/// Serve `page` as the landing page and `script` as the application script
pub async fn mount_service(server: &MockServer, page: String, script: String) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(SCRIPT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(script))
        .mount(server)
        .await;
}

/// Client with a session bootstrapped from the default fixtures
pub async fn initialized_client(server: &MockServer) -> (Client, Arc<SessionState>) {
    mount_service(server, landing_page(SESSION_ID), app_script()).await;
    let client = Client::new(settings_for(server)).expect("valid settings");
    let session = client.init_session().await.expect("bootstrap succeeds");
    (client, session)
}
