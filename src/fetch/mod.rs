// src/fetch/mod.rs

use chrono::Utc;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

use crate::error::FetchError;

pub mod types;

pub use types::{FetchedTables, RawDataPoint, RawTable};

/// Base of the INE Tempus3 JSON API for full tables.
pub const DATOS_TABLA_BASE: &str = "https://servicios.ine.es/wstempus/js/ES/DATOS_TABLA/";

const USER_AGENT: &str = concat!("inescraper/", env!("CARGO_PKG_VERSION"));

/// `DATOS_TABLA` endpoint for a table id.
pub fn tabla_url(table_id: u32) -> String {
    format!("{}{}", DATOS_TABLA_BASE, table_id)
}

/// Build the HTTP client used for the single GET. The timeout bounds the whole
/// request, connect through body.
pub fn build_client(timeout: Duration) -> Result<Client, FetchError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(FetchError::Client)
}

/// GET `url` once and decode the body as a list of tables. No retry.
#[instrument(level = "info", skip(client))]
pub async fn fetch_tables(client: &Client, url: &str) -> Result<FetchedTables, FetchError> {
    let source_url = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    debug!("GET {}", source_url);
    let resp = client
        .get(source_url.clone())
        .send()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = resp.status();
    if !status.is_success() {
        // dropping `resp` here releases the connection without reading the body
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = resp.bytes().await.map_err(|source| FetchError::Transport {
        url: url.to_string(),
        source,
    })?;

    let tables: Vec<RawTable> =
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })?;

    let fetched = FetchedTables {
        source_url,
        fetched_at: Utc::now(),
        tables,
    };
    info!(
        tables = fetched.tables.len(),
        points = fetched.point_count(),
        bytes = body.len(),
        "received tables"
    );
    log_preview(&body, &fetched.tables);

    Ok(fetched)
}

/// Debug-level dump of the payload structure: keys of the first element and
/// the first two tables pretty-printed.
fn log_preview(body: &[u8], tables: &[RawTable]) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    if let Ok(serde_json::Value::Array(items)) = serde_json::from_slice(body) {
        if let Some(serde_json::Value::Object(first)) = items.first() {
            let keys: Vec<&str> = first.keys().map(String::as_str).collect();
            debug!(?keys, "first table keys");
        }
    }
    let head = &tables[..tables.len().min(2)];
    match serde_json::to_string_pretty(head) {
        Ok(pretty) => debug!("first tables:\n{}", pretty),
        Err(e) => debug!(error = %e, "could not render preview"),
    }
}
