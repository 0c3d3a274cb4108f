//! Example: log in, list extensions, log out
//!
//! # Setup
//!
//! 1. Provide the application credentials, either as environment variables
//!    (`RESTSDK_APP_KEY`, `RESTSDK_APP_SECRET`, `RESTSDK_SERVER_URL`), in a
//!    `.env` file, or in `./restsdk.toml`.
//!
//! 2. Provide the user credentials: `RESTSDK_USERNAME`, `RESTSDK_PASSWORD`
//!    and optionally `RESTSDK_EXTENSION`.
//!
//! 3. Run this example: `RUST_LOG=debug cargo run --example session_demo`

use anyhow::Context;
use restsdk_infra::{config, ApiRequest, Session};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let sdk_config = config::load().context("loading SDK configuration")?;
    println!("Server: {}", sdk_config.base_url());

    let username = std::env::var("RESTSDK_USERNAME").context("RESTSDK_USERNAME is not set")?;
    let password = std::env::var("RESTSDK_PASSWORD").context("RESTSDK_PASSWORD is not set")?;
    let extension = std::env::var("RESTSDK_EXTENSION").ok();

    let session = Session::new(sdk_config)?;
    session.authenticate(&username, &password, extension.as_deref(), false).await?;

    let credential = session.credential().await;
    if let Some(expires_at) = credential.access_token_expires_at() {
        println!("Logged in, access token valid until {expires_at}");
    }

    let response = session
        .get(ApiRequest::new("/restapi/v1.0/account/~/extension").query("perPage", "5"))
        .await?;
    println!("GET extension list -> {}", response.status());
    println!("{}", response.body());

    let revoked = session.revoke().await?;
    println!("Revoke -> {}", revoked.status());

    Ok(())
}
