use std::env;
use std::time::Duration;

/// User-agent sent with every outbound document fetch, so remote servers can
/// apply bot-specific rules.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; UnfurlBot/1.0; +https://github.com/unfurl/unfurl-server)";

const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 5;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub is_dev: bool,
    /// Identity declared to remote servers on every fetch.
    pub user_agent: String,
    /// Hard deadline for the single outbound document fetch.
    pub fetch_timeout: Duration,
    /// Base URL of the external image proxy. When unset, extracted image
    /// URLs pass through unrewritten.
    pub image_proxy_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            is_dev: env::var("APP_ENV").as_deref() != Ok("production"),
            user_agent: env::var("UNFURL_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            fetch_timeout: Duration::from_secs(
                env::var("FETCH_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS),
            ),
            image_proxy_url: env::var("IMAGE_PROXY_URL").ok().filter(|s| !s.is_empty()),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
