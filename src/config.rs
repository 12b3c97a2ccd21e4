use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::error::ConfigError;

pub const DEFAULT_NEWS_API_BASE_URL: &str = "https://newsapi.org/v2";

#[derive(Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub news_api_key: String,
    /// Overridable so tests can point the client at a local mock server.
    pub news_api_base_url: String,
    /// Day window used when "recent" headlines come back empty.
    pub recent_window_days: i64,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let news_api_key =
            env::var("NEWS_API_KEY").map_err(|_| ConfigError::MissingVar("NEWS_API_KEY"))?;

        let news_api_base_url = env::var("NEWS_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_NEWS_API_BASE_URL.to_string());

        // Clamped so the date arithmetic downstream stays in range.
        let recent_window_days = match env::var("RECENT_WINDOW_DAYS") {
            Ok(raw) => raw
                .parse::<i64>()
                .map_err(|e| ConfigError::Invalid(format!("invalid RECENT_WINDOW_DAYS: {e}")))?
                .clamp(1, 90),
            Err(_) => 10,
        };

        // Server configuration with defaults
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let port = port
            .parse::<u16>()
            .map_err(|e| ConfigError::Invalid(format!("invalid port: {e}")))?;
        let ip = IpAddr::from_str(&host)
            .map_err(|e| ConfigError::Invalid(format!("invalid host address: {e}")))?;

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            news_api_key,
            news_api_base_url,
            recent_window_days,
        })
    }
}
