//! Injected collaborators: the image relay and the favicon resolver.
//!
//! Both are synchronous and network-free from the engine's perspective. The
//! image proxy itself (signing, resizing, reachability checks) is an
//! external service; this module only rewrites URLs to point at it.

use std::sync::Arc;

use url::Url;

/// Rewrites an extracted image URL through the external image proxy.
pub trait ImageRelay: Send + Sync {
    fn relay(&self, raw_url: &str) -> String;
}

/// Derives a favicon URL for a source page. Pure string derivation, no
/// network call.
pub trait FaviconResolver: Send + Sync {
    fn resolve(&self, source_url: &Url) -> String;
}

/// Relay used when no image proxy is configured: URLs pass through as-is.
pub struct PassthroughRelay;

impl ImageRelay for PassthroughRelay {
    fn relay(&self, raw_url: &str) -> String {
        raw_url.to_string()
    }
}

/// Relay that rewrites image URLs through a proxy endpoint:
/// `https://proxy.example/img` + `https://a.com/x.png` becomes
/// `https://proxy.example/img?url=https%3A%2F%2Fa.com%2Fx.png`.
pub struct ProxiedRelay {
    base: String,
}

impl ProxiedRelay {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl ImageRelay for ProxiedRelay {
    fn relay(&self, raw_url: &str) -> String {
        format!(
            "{}?url={}",
            self.base.trim_end_matches('/'),
            urlencoding::encode(raw_url)
        )
    }
}

/// Default favicon derivation: the conventional well-known path on the
/// source host, preserving scheme and port.
pub struct WellKnownFavicon;

impl FaviconResolver for WellKnownFavicon {
    fn resolve(&self, source_url: &Url) -> String {
        let mut favicon = source_url.clone();
        favicon.set_path("/favicon.ico");
        favicon.set_query(None);
        favicon.set_fragment(None);
        favicon.to_string()
    }
}

/// Build the relay implied by the configuration.
pub fn relay_from_config(image_proxy_url: Option<&str>) -> Arc<dyn ImageRelay> {
    match image_proxy_url {
        Some(base) => Arc::new(ProxiedRelay::new(base)),
        None => Arc::new(PassthroughRelay),
    }
}
