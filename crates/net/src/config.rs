//! Client configuration from environment variables.

use std::env;
use std::path::PathBuf;

use url::Url;

use crate::term::SceneView;
use crate::types::DEFAULT_SERVER_URL;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// WebSocket address of the game server.
    pub server_url: Url,
    /// Log file; logging is off when unset.
    pub log_path: Option<PathBuf>,
    /// Overlay line height in terminal rows.
    pub line_height: f64,
    /// Draw the damage feed panel.
    pub show_feed: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: Url::parse(DEFAULT_SERVER_URL).expect("default server url is valid"),
            log_path: None,
            line_height: 1.0,
            show_feed: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid server url {0:?}: expected ws:// or wss://")]
    InvalidUrl(String),

    #[error("invalid line height {0:?}: expected a number >= 1")]
    InvalidLineHeight(String),
}

impl ClientConfig {
    /// Read `SKIRMISH_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = non_empty(lookup("SKIRMISH_SERVER_URL")) {
            config = config.with_server_url(&url)?;
        }

        config.log_path = non_empty(lookup("SKIRMISH_LOG_PATH")).map(PathBuf::from);

        if let Some(raw) = non_empty(lookup("SKIRMISH_LINE_HEIGHT")) {
            config.line_height = raw
                .parse::<f64>()
                .ok()
                .filter(|h| h.is_finite() && *h >= 1.0)
                .ok_or(ConfigError::InvalidLineHeight(raw))?;
        }

        config.show_feed = lookup("SKIRMISH_SHOW_FEED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Ok(config)
    }

    /// Replace the server address, accepting only WebSocket schemes.
    pub fn with_server_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(raw).map_err(|_| ConfigError::InvalidUrl(raw.to_string()))?;
        if !matches!(url.scheme(), "ws" | "wss") {
            return Err(ConfigError::InvalidUrl(raw.to_string()));
        }
        self.server_url = url;
        Ok(self)
    }

    pub fn scene_view(&self) -> SceneView {
        SceneView::default()
            .with_line_height(self.line_height)
            .with_damage_feed(self.show_feed)
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
