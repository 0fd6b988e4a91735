//! Bootstraps a session and asks the gateway for the caller's country
//!
//! ```bash
//! BBGS_VERBOSE=true cargo run --example call_method
//! ```

use bbgs_api::{Client, config::ConfigLoader, utils::init_logging};
use serde_json::json;

const METHOD: &str = "getCountry";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = ConfigLoader::new().load_default()?;
    init_logging(&settings.logging)?;

    let client = Client::new(settings)?;
    let session = client.init_session().await?;
    tracing::info!(
        "Session {} valid until about {}",
        session.client_instance_id,
        session.expires_at_hint()
    );

    let token = client.generate_token(METHOD).await?;
    println!("token: {}", token);

    let result = client.call_method(METHOD, json!({})).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
