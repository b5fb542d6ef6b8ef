use crate::oembed::PreviewExtractor;

/// Shared application state passed to all handlers.
/// The extractor owns the outbound HTTP client and the injected
/// collaborators, built once at startup rather than per request.
#[derive(Clone)]
pub struct AppState {
    pub extractor: PreviewExtractor,
}
