//! Browser configuration.
//!
//! Loaded from a small TOML file; every field has a default so an empty
//! file (or no file at all) yields a working configuration.

use serde::Deserialize;

use lantern_types::error::{LanternError, Result};

/// User-tunable browser settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    /// Page loaded when no URL is given.
    #[serde(default = "default_home_url")]
    pub home_url: String,
    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Draw the URL header on row 0.
    #[serde(default = "default_true")]
    pub show_header: bool,
    /// Draw the status line on the bottom row.
    #[serde(default = "default_true")]
    pub show_status_bar: bool,
}

fn default_home_url() -> String {
    "http://localhost/".to_string()
}

fn default_user_agent() -> String {
    lantern_net::http::USER_AGENT.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            home_url: default_home_url(),
            user_agent: default_user_agent(),
            show_header: true,
            show_status_bar: true,
        }
    }
}

/// Parse a configuration TOML string.
pub fn parse_config(toml_str: &str) -> Result<BrowserConfig> {
    toml::from_str(toml_str).map_err(|e| LanternError::Config(format!("lantern.toml: {e}")))
}
