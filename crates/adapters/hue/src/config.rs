//! Hue bridge configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the Hue driver.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HueConfig {
    /// Bridge IP address or hostname, optionally with an `http(s)://` scheme.
    pub bridge_address: String,
    /// Whitelisted bridge username (API key).
    pub username: String,
    /// Names of the lights to switch, as shown in the Hue app.
    pub lights: Vec<String>,
    /// Upper bound for every bridge request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for HueConfig {
    fn default() -> Self {
        Self {
            bridge_address: String::new(),
            username: String::new(),
            lights: Vec::new(),
            request_timeout_secs: 10,
        }
    }
}

impl HueConfig {
    /// Base URL of the bridge, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        let address = self.bridge_address.trim().trim_end_matches('/');
        if address.starts_with("http://") || address.starts_with("https://") {
            address.to_string()
        } else {
            format!("http://{address}")
        }
    }

    /// Per-request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
