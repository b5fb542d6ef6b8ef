use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized link preview returned by `GET /oembed`.
///
/// Every field except `url`, `favicon`, and `last_indexed_at` is optional:
/// a page may have no usable metadata at all and still unfurl. The shape is
/// fully serializable and deterministic for identical remote content
/// (modulo `last_indexed_at`), so callers may cache it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    /// Echo of the requested URL.
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Extracted image URL, rewritten through the image relay.
    pub image: Option<String>,
    pub favicon: String,
    pub site: Option<String>,
    /// Sandboxed embed markup, or `None` when nothing embeddable was found.
    pub html: Option<String>,
    pub nft: Option<NftMetadata>,
    /// Extraction time, not document time.
    pub last_indexed_at: DateTime<Utc>,
}

/// NFT collection metadata advertised through `eth:nft:*` meta tags.
///
/// All-or-nothing: a document missing any of the required keys (contract,
/// chain, collection, schema) yields no `NftMetadata` at all rather than a
/// partially filled value. Only `media_url` is optional within the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftMetadata {
    pub contract: String,
    pub chain: String,
    pub collection: String,
    pub schema: String,
    pub media_url: Option<String>,
}
