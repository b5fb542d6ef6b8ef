//! The unfurling engine.
//!
//! Pipeline per request: validate, fetch, parse, extract, assemble.
//! The fetch is the single suspension point. Parsing and extraction run
//! synchronously against an immutable document that never crosses an await:
//! concurrent extractions share no mutable state, and dropping the future
//! mid-fetch cancels before any parse begins. Field extractors degrade
//! independently; a missing signal becomes `None`, never a request failure.

pub mod document;
pub mod embed;
pub mod extract;
pub mod fetch;
pub mod relay;

use std::sync::Arc;

use chrono::Utc;
use url::Url;

use crate::error::PreviewError;
use crate::models::Preview;
use crate::oembed::document::ParsedDocument;
use crate::oembed::relay::{FaviconResolver, ImageRelay};

/// The unfurling engine. Owns the shared HTTP client and the injected
/// collaborators; cheap to clone into handler tasks.
#[derive(Clone)]
pub struct PreviewExtractor {
    client: reqwest::Client,
    relay: Arc<dyn ImageRelay>,
    favicons: Arc<dyn FaviconResolver>,
}

impl PreviewExtractor {
    pub fn new(
        client: reqwest::Client,
        relay: Arc<dyn ImageRelay>,
        favicons: Arc<dyn FaviconResolver>,
    ) -> Self {
        Self {
            client,
            relay,
            favicons,
        }
    }

    /// Unfurl `url` into a [`Preview`].
    ///
    /// Fails only when the input is not an absolute http(s) URL (no network
    /// attempt is made in that case) or when the document itself cannot be
    /// fetched. Everything past the fetch degrades field-by-field.
    pub async fn extract_preview(&self, url: &str) -> Result<Preview, PreviewError> {
        let source_url = parse_target(url)?;

        let html = fetch::fetch_document(&self.client, &source_url).await?;

        let preview = self.assemble(url, &html, &source_url);

        tracing::debug!(
            url = %source_url,
            title = preview.title.is_some(),
            image = preview.image.is_some(),
            embed = preview.html.is_some(),
            nft = preview.nft.is_some(),
            "preview extracted"
        );

        Ok(preview)
    }

    /// Parse the document once and run every field extractor against it.
    /// Extractor results are independent; relay and embed generation apply
    /// to their respective fields afterwards.
    fn assemble(&self, requested_url: &str, html: &str, source_url: &Url) -> Preview {
        let doc = ParsedDocument::parse(html);

        let image = extract::image(&doc, source_url).map(|raw| self.relay.relay(&raw));
        let embed_target = extract::embed_url(&doc, source_url);

        Preview {
            url: requested_url.to_string(),
            title: extract::title(&doc),
            description: extract::description(&doc),
            image,
            favicon: self.favicons.resolve(source_url),
            site: extract::site(&doc, source_url),
            html: embed::generate_embed(embed_target.as_deref(), source_url),
            nft: extract::nft(&doc),
            last_indexed_at: Utc::now(),
        }
    }
}

/// Validate the preview target before any network attempt.
///
/// Distinct from a fetch failure: a malformed or non-http(s) input is a
/// caller error and never produces an outbound request.
pub fn parse_target(url: &str) -> Result<Url, PreviewError> {
    let parsed = Url::parse(url)
        .map_err(|_| PreviewError::InvalidUrl(format!("not an absolute URL: {url}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(PreviewError::InvalidUrl(format!(
                "unsupported scheme: {other}"
            )))
        }
    }

    if parsed.host_str().is_none() {
        return Err(PreviewError::InvalidUrl("URL has no host".into()));
    }

    Ok(parsed)
}
