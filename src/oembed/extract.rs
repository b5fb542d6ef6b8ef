//! Per-field extractors.
//!
//! Each field has its own priority-ordered fallback chain over the same
//! parsed document: the first matching, non-empty signal wins, and an
//! exhausted chain yields `None` without affecting sibling fields. Open
//! Graph tags use the `property` attribute; Twitter card tags use `name`.

use url::Url;

use super::document::ParsedDocument;
use crate::models::NftMetadata;

/// Paragraphs shorter than this (after whitespace collapsing) are skipped by
/// the description fallback.
const MIN_PARAGRAPH_CHARS: usize = 40;

/// Declared-dimension floor for `<img>` fallback candidates. Anything
/// declaring a smaller width or height is assumed to be a tracking pixel or
/// an icon; images with no declared dimensions are accepted.
const MIN_IMAGE_DIMENSION: u32 = 100;

/// `og:title` → `twitter:title` → `<title>` text.
pub fn title(doc: &ParsedDocument) -> Option<String> {
    doc.meta_property("og:title")
        .or_else(|| doc.meta_name("twitter:title"))
        .or_else(|| doc.title_text())
}

/// `og:description` → `twitter:description` → `meta[name=description]` →
/// first qualifying paragraph.
pub fn description(doc: &ParsedDocument) -> Option<String> {
    doc.meta_property("og:description")
        .or_else(|| doc.meta_name("twitter:description"))
        .or_else(|| doc.meta_name("description"))
        .or_else(|| doc.first_paragraph(MIN_PARAGRAPH_CHARS))
}

/// `og:image` → `twitter:image` → first qualifying `<img>`.
///
/// Candidates resolve against `source_url`; a candidate that does not
/// resolve to an http(s) URL is discarded. A meta tag, when present, wins
/// the chain outright: an unresolvable meta image yields `None` rather than
/// falling through to an arbitrary body image.
pub fn image(doc: &ParsedDocument, source_url: &Url) -> Option<String> {
    let meta = doc
        .meta_property("og:image")
        .or_else(|| doc.meta_name("twitter:image"));
    if let Some(raw) = meta {
        return absolutize(source_url, &raw);
    }

    doc.images()
        .filter(|img| {
            img.width.map_or(true, |w| w >= MIN_IMAGE_DIMENSION)
                && img.height.map_or(true, |h| h >= MIN_IMAGE_DIMENSION)
        })
        .find_map(|img| absolutize(source_url, &img.src))
}

/// `og:site_name` → hostname of the source URL.
pub fn site(doc: &ParsedDocument, source_url: &Url) -> Option<String> {
    doc.meta_property("og:site_name")
        .or_else(|| source_url.host_str().map(|h| h.to_string()))
}

/// `og:video` → `og:video:url` → `og:video:secure_url` → oEmbed discovery
/// link href. Only http(s) targets are embeddable.
pub fn embed_url(doc: &ParsedDocument, source_url: &Url) -> Option<String> {
    doc.meta_property("og:video")
        .or_else(|| doc.meta_property("og:video:url"))
        .or_else(|| doc.meta_property("og:video:secure_url"))
        .or_else(|| doc.oembed_discovery_href())
        .and_then(|raw| absolutize(source_url, &raw))
}

/// The `eth:nft:*` meta tag cluster.
///
/// All required keys must be present. A partial cluster (say, a contract
/// address without a collection name) yields no NFT metadata at all.
pub fn nft(doc: &ParsedDocument) -> Option<NftMetadata> {
    Some(NftMetadata {
        contract: doc.meta_property("eth:nft:contract_address")?,
        chain: doc.meta_property("eth:nft:chain")?,
        collection: doc.meta_property("eth:nft:collection")?,
        schema: doc.meta_property("eth:nft:schema")?,
        media_url: doc.meta_property("eth:nft:media_url"),
    })
}

/// Resolve `candidate` against `base`, keeping only http(s) results.
fn absolutize(base: &Url, candidate: &str) -> Option<String> {
    let resolved = base.join(candidate).ok()?;
    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}
