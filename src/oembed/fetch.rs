//! Document fetching.
//!
//! One outbound GET per extraction, declared bot identity, hard timeout.
//! No retries: a single failed fetch is terminal for that request.

use std::time::Duration;

use url::Url;

use crate::error::FetchError;

/// Build the HTTP client shared by every document fetch.
///
/// The client carries the bot user-agent and the fetch timeout. It holds no
/// cookie store, so no caller credentials ever reach remote servers.
pub fn build_client(user_agent: &str, timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .expect("Failed to create HTTP client")
}

/// Fetch `url` and return the response body as text.
///
/// Timeouts are reported separately from other transport failures; both are
/// terminal. Retry policy belongs to the caller.
pub async fn fetch_document(client: &reqwest::Client, url: &Url) -> Result<String, FetchError> {
    let response = client.get(url.clone()).send().await.map_err(|e| {
        tracing::warn!(url = %url, error = %e, "Failed to fetch URL for preview");
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                source: e,
            }
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(url = %url, status = %status, "Upstream returned non-success status");
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.text().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Body {
                url: url.to_string(),
                source: e,
            }
        }
    })
}
