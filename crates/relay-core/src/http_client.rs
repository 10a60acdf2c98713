use std::time::Duration;

use http::{HeaderMap, HeaderValue, header};
use reqwest::Client;

/// Build the HTTP client shared by one feature's provider
///
/// Called once at startup; the resulting client is handed to the provider
/// and cloned cheaply from there.
pub fn http_client() -> reqwest::Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));

    Client::builder()
        .timeout(Duration::from_secs(120))
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .default_headers(headers)
        .build()
}
