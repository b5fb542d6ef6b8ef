use std::net::IpAddr;

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::Json;
use serde::Deserialize;
use url::Url;

use crate::error::{AppError, AppResult};
use crate::models::Preview;
use crate::state::AppState;

/// CDN freshness directive attached to every successful preview: hard-expire
/// after 30 days, allow a five-minute stale-while-revalidate window.
pub const CACHE_MAX_AGE_SECS: u32 = 30 * 24 * 60 * 60;
pub const CACHE_SWR_SECS: u32 = 300;

// ── Public helpers ─────────────────────────────────────────────────────────

/// Returns `true` if `ip` is a private, loopback, or link-local address.
pub fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            let o = v4.octets();
            matches!(
                o,
                [127, ..]
                    | [10, ..]
                    | [169, 254, ..]
                    | [192, 168, ..]
                    | [0, ..]
                    | [255, 255, 255, 255]
            ) || (o[0] == 172 && (16..=31).contains(&o[1]))
        }
        IpAddr::V6(v6) => {
            v6.is_loopback()
                || (v6.segments()[0] & 0xfe00 == 0xfc00)
                || (v6.segments()[0] & 0xffc0 == 0xfe80)
        }
    }
}

/// Cache-Control headers for a successful preview response.
fn cache_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    let value =
        format!("public, max-age={CACHE_MAX_AGE_SECS}, stale-while-revalidate={CACHE_SWR_SECS}");
    if let Ok(val) = HeaderValue::from_str(&value) {
        headers.insert(header::CACHE_CONTROL, val);
    }
    headers
}

// ── Query params ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct PreviewQuery {
    pub url: String,
}

// ── Handler ────────────────────────────────────────────────────────────────

/// GET /oembed?url=<encoded-url>
///
/// Unfurls the given URL into preview metadata. Rejects non-http(s) schemes
/// and hosts resolving to private/loopback addresses (SSRF protection)
/// before any fetch is attempted. Successful responses carry a long-lived
/// Cache-Control directive; the body is deterministic for identical remote
/// content, so CDNs may cache it verbatim.
pub async fn get_preview(
    State(state): State<AppState>,
    Query(params): Query<PreviewQuery>,
) -> AppResult<(HeaderMap, Json<Preview>)> {
    // ── Validate URL ──────────────────────────────────────────────────────
    let parsed =
        Url::parse(&params.url).map_err(|_| AppError::Validation("Invalid URL".into()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        _ => {
            return Err(AppError::Validation(
                "Only http/https URLs are supported".into(),
            ))
        }
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| AppError::Validation("URL has no host".into()))?
        .to_string();

    // ── SSRF: resolve hostname and check all IPs ──────────────────────────
    let lookup_target = format!("{}:80", host);
    let addrs = tokio::net::lookup_host(&lookup_target)
        .await
        .map_err(|_| AppError::Validation("Could not resolve URL host".into()))?;

    for addr in addrs {
        if is_private_ip(addr.ip()) {
            return Err(AppError::Validation(
                "URL resolves to a private or reserved address".into(),
            ));
        }
    }

    // ── Unfurl ────────────────────────────────────────────────────────────
    let preview = state.extractor.extract_preview(&params.url).await?;

    Ok((cache_headers(), Json(preview)))
}

// ── Unit tests ─────────────────────────────────────────────────────────────
