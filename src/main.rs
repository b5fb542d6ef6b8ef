use std::sync::Arc;

use axum::{routing::get, Router};
use axum_prometheus::PrometheusMetricLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use unfurl_server::config::Config;
use unfurl_server::handlers;
use unfurl_server::oembed::{fetch, relay, PreviewExtractor};
use unfurl_server::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing — JSON in production, human-readable in dev.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "unfurl_server=info,tower_http=info".parse().unwrap());

    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("🚀 Unfurl server starting...");

    let config = Config::from_env();
    info!("📝 Configuration loaded");

    // One HTTP client for every outbound document fetch.
    let client = fetch::build_client(&config.user_agent, config.fetch_timeout);

    match &config.image_proxy_url {
        Some(base) => info!("🖼️ Image relay: proxied via {base}"),
        None => info!("🖼️ Image relay: passthrough (IMAGE_PROXY_URL not set)"),
    }

    let extractor = PreviewExtractor::new(
        client,
        relay::relay_from_config(config.image_proxy_url.as_deref()),
        Arc::new(relay::WellKnownFavicon),
    );

    // CORS: permissive in dev, restrictive in production.
    let cors = if config.is_dev {
        info!("🔓 CORS: permissive (dev mode)");
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    let addr = config.server_addr();

    let app_state = AppState { extractor };

    // Prometheus metrics layer
    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let app = Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/metrics",
            get(move || async move { metric_handle.render() }),
        )
        .route("/oembed", get(handlers::preview::get_preview))
        .layer(prometheus_layer)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    info!("🎧 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
