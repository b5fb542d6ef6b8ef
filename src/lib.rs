//! Unfurl: link-preview / oEmbed metadata extraction service.
//!
//! Given an arbitrary, untrusted external URL, the engine fetches the
//! document once, parses it defensively (no script execution, no
//! sub-resource fetching), extracts a normalized set of preview fields
//! through priority-ordered fallback chains, and returns a cache-friendly
//! result. Extraction degrades field-by-field: a page with no usable
//! metadata still unfurls, it just unfurls to mostly-empty fields.
//!
//! # Architecture
//!
//! - **oembed**: the extraction engine: fetch, parse, per-field extractors,
//!   sandboxed embed markup, injected image-relay/favicon collaborators
//! - **handlers**: the thin HTTP surface (`GET /oembed?url=...`) with URL
//!   validation, an SSRF guard, and CDN cache headers
//! - **models**: serializable preview DTOs
//!
//! # Security
//!
//! - The HTML parser is a pure markup-tree parser; script execution does not
//!   exist as a capability
//! - Embed markup is sandboxed (no scripts, no top-navigation) and every
//!   interpolated value is attribute-escaped
//! - Hosts resolving to private, loopback, or link-local addresses are
//!   rejected before any fetch

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod oembed;
pub mod state;
