//! Application configuration parsed from environment variables.
//!
//! `.env` files are honored: the binary calls `dotenvy::dotenv()` before
//! [`AppConfig::from_env`]. Unparseable values fall back to their defaults.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATA_DIR: &str = ".casefile";
pub const DEFAULT_CHAT_REPLY_DELAY_MS: u64 = 1000;
pub const DEFAULT_HIT_RADIUS_PX: f64 = canvas::consts::HIT_RADIUS_PX;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Directory backing the local key/value store.
    pub data_dir: PathBuf,
    /// Delay before the simulated assistant answers in the chat panel.
    pub chat_reply_delay: Duration,
    /// Screen-space radius for landing a connection on a node.
    pub hit_radius_px: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            chat_reply_delay: Duration::from_millis(DEFAULT_CHAT_REPLY_DELAY_MS),
            hit_radius_px: DEFAULT_HIT_RADIUS_PX,
        }
    }
}

impl AppConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `CASEFILE_DATA_DIR`: default `.casefile`
    /// - `CASEFILE_CHAT_REPLY_DELAY_MS`: default 1000
    /// - `CASEFILE_HIT_RADIUS_PX`: default 24
    #[must_use]
    pub fn from_env() -> Self {
        let data_dir = std::env::var("CASEFILE_DATA_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let delay_ms = env_parse("CASEFILE_CHAT_REPLY_DELAY_MS", DEFAULT_CHAT_REPLY_DELAY_MS);
        let hit_radius_px = env_parse("CASEFILE_HIT_RADIUS_PX", DEFAULT_HIT_RADIUS_PX);
        let hit_radius_px = if hit_radius_px.is_finite() && hit_radius_px > 0.0 {
            hit_radius_px
        } else {
            DEFAULT_HIT_RADIUS_PX
        };

        Self { data_dir, chat_reply_delay: Duration::from_millis(delay_ms), hit_radius_px }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
