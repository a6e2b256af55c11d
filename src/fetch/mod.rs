// src/fetch/mod.rs

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::error::LoadError;

/// Wikipedia rejects requests without a descriptive user agent.
pub const USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    " (FIFA World Cup finals dashboard)"
);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("building HTTP client")
}

/// GET `url` and return the body. Transport errors and non-success statuses
/// both surface as `LoadError::Fetch`.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String> {
    debug!("Fetching text from {}", url);
    let fetch_err = || LoadError::Fetch {
        url: url.to_string(),
    };
    let body = client
        .get(url.clone())
        .send()
        .await
        .with_context(fetch_err)?
        .error_for_status()
        .with_context(fetch_err)?
        .text()
        .await
        .with_context(fetch_err)?;
    info!(%url, bytes = body.len(), "fetched page");
    Ok(body)
}
