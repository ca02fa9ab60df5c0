//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `nightlight.toml` in the working directory (or the file named by
//! `NIGHTLIGHT_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use serde::Deserialize;

use nightlight_adapter_hue::HueConfig;
use nightlight_app::override_queue;
use nightlight_domain::device::DeviceState;
use nightlight_domain::error::ValidationError;
use nightlight_domain::time::TimeOfDay;
use nightlight_domain::window::NightWindow;

const DEFAULT_PATH: &str = "nightlight.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Night window settings.
    pub schedule: ScheduleConfig,
    /// Override queue settings.
    pub overrides: OverridesConfig,
    /// Device driver selection.
    pub device: DeviceConfig,
    /// Hue bridge settings, used by the `hue` driver.
    pub hue: HueConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Night window configuration. Times accept `22:00` or `10:00pm`.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Start of the night, inclusive.
    pub night_start: TimeOfDay,
    /// End of the night, exclusive.
    pub night_end: TimeOfDay,
    /// State commanded during the night; the opposite is used by day.
    pub night_state: DeviceState,
}

/// Override queue configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OverridesConfig {
    /// Requests buffered ahead of the loop before new ones are dropped.
    pub queue_capacity: usize,
}

/// Which device driver to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    /// In-memory simulated light.
    #[default]
    Virtual,
    /// Philips Hue bridge.
    Hue,
}

/// Device configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Driver to build at startup.
    pub driver: Driver,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `nightlight.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, if an
    /// environment override holds an invalid time, or if the result fails
    /// validation.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("NIGHTLIGHT_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = var("NIGHTLIGHT_HOST") {
            self.server.host = val;
        }
        if let Some(val) = var("NIGHTLIGHT_PORT")
            && let Ok(port) = val.parse()
        {
            self.server.port = port;
        }
        if let Some(val) = var("NIGHTLIGHT_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("NIGHTLIGHT_NIGHT_START") {
            self.schedule.night_start = val.parse()?;
        }
        if let Some(val) = var("NIGHTLIGHT_NIGHT_END") {
            self.schedule.night_end = val.parse()?;
        }
        if let Some(val) = var("HUE_ID") {
            self.hue.username = val;
        }
        if let Some(val) = var("HUE_BRIDGE_ADDRESS") {
            self.hue.bridge_address = val;
        }
        if let Some(val) = var("NIGHTLIGHT_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.overrides.queue_capacity == 0 {
            return Err(ConfigError::Validation(
                "override queue capacity must be non-zero".to_string(),
            ));
        }
        self.night_window()?;
        if self.device.driver == Driver::Hue {
            if self.hue.bridge_address.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "hue driver requires a bridge address".to_string(),
                ));
            }
            if self.hue.username.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "hue driver requires a username (HUE_ID)".to_string(),
                ));
            }
            if self.hue.lights.is_empty() {
                return Err(ConfigError::Validation(
                    "hue driver requires at least one light".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Build the configured night window.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyWindow`] when start and end are equal.
    pub fn night_window(&self) -> Result<NightWindow, ValidationError> {
        NightWindow::new(self.schedule.night_start, self.schedule.night_end)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8100,
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        let window = NightWindow::default();
        Self {
            night_start: window.start(),
            night_end: window.end(),
            night_state: DeviceState::On,
        }
    }
}

impl Default for OverridesConfig {
    fn default() -> Self {
        Self {
            queue_capacity: override_queue::DEFAULT_CAPACITY,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "nightlightd=info,nightlight=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Invalid night window or time value.
    #[error("invalid schedule")]
    Schedule(#[from] ValidationError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn time(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn hue_config() -> Config {
        let mut config = Config::default();
        config.device.driver = Driver::Hue;
        config.hue.bridge_address = "192.168.1.2".to_string();
        config.hue.username = "abc".to_string();
        config.hue.lights = vec!["Porch".to_string()];
        config
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8100);
        assert_eq!(config.schedule.night_start, time("22:00"));
        assert_eq!(config.schedule.night_end, time("05:30"));
        assert_eq!(config.schedule.night_state, DeviceState::On);
        assert_eq!(config.overrides.queue_capacity, 2);
        assert_eq!(config.device.driver, Driver::Virtual);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [schedule]
            night_start = '10:30pm'
            night_end = '6:00am'
            night_state = 'off'

            [overrides]
            queue_capacity = 8

            [device]
            driver = 'hue'

            [hue]
            bridge_address = '192.168.1.2'
            username = 'abc'
            lights = ['Porch', 'Hallway']
            request_timeout_secs = 3

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.schedule.night_start, time("22:30"));
        assert_eq!(config.schedule.night_end, time("06:00"));
        assert_eq!(config.schedule.night_state, DeviceState::Off);
        assert_eq!(config.overrides.queue_capacity, 8);
        assert_eq!(config.device.driver, Driver::Hue);
        assert_eq!(config.hue.lights, vec!["Porch", "Hallway"]);
        assert_eq!(config.hue.request_timeout_secs, 3);
        assert_eq!(config.logging.filter, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [schedule]
            night_start = '23:00'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.schedule.night_start, time("23:00"));
        assert_eq!(config.schedule.night_end, time("05:30"));
        assert_eq!(config.server.port, 8100);
    }

    #[test]
    fn should_report_parse_error_for_invalid_time() {
        let toml = "
            [schedule]
            night_start = '25:00'
        ";
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn should_report_parse_error_for_unknown_driver() {
        let toml = "
            [device]
            driver = 'zigbee'
        ";
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 8100);
    }

    #[test]
    fn should_apply_env_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(vars(&[
                ("NIGHTLIGHT_HOST", "127.0.0.1"),
                ("NIGHTLIGHT_PORT", "9000"),
                ("NIGHTLIGHT_NIGHT_START", "9:15pm"),
                ("NIGHTLIGHT_NIGHT_END", "06:45"),
                ("HUE_ID", "secret"),
                ("HUE_BRIDGE_ADDRESS", "10.0.0.4"),
                ("NIGHTLIGHT_LOG", "trace"),
            ]))
            .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.schedule.night_start, time("21:15"));
        assert_eq!(config.schedule.night_end, time("06:45"));
        assert_eq!(config.hue.username, "secret");
        assert_eq!(config.hue.bridge_address, "10.0.0.4");
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_prefer_bind_over_host_and_port() {
        let mut config = Config::default();
        config
            .apply_overrides(vars(&[
                ("NIGHTLIGHT_HOST", "127.0.0.1"),
                ("NIGHTLIGHT_PORT", "9000"),
                ("NIGHTLIGHT_BIND", "localhost:7000"),
            ]))
            .unwrap();
        assert_eq!(config.bind_addr(), "localhost:7000");
    }

    #[test]
    fn should_prefer_rust_log_over_nightlight_log() {
        let mut config = Config::default();
        config
            .apply_overrides(vars(&[("NIGHTLIGHT_LOG", "trace"), ("RUST_LOG", "warn")]))
            .unwrap();
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_ignore_unparseable_port_override() {
        let mut config = Config::default();
        config
            .apply_overrides(vars(&[("NIGHTLIGHT_PORT", "http")]))
            .unwrap();
        assert_eq!(config.server.port, 8100);
    }

    #[test]
    fn should_reject_invalid_time_override() {
        let mut config = Config::default();
        let result = config.apply_overrides(vars(&[("NIGHTLIGHT_NIGHT_END", "noon")]));
        assert!(matches!(result, Err(ConfigError::Schedule(_))));
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_queue_capacity() {
        let mut config = Config::default();
        config.overrides.queue_capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_empty_window() {
        let mut config = Config::default();
        config.schedule.night_end = config.schedule.night_start;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Schedule(ValidationError::EmptyWindow(_)))
        ));
    }

    #[test]
    fn should_accept_complete_hue_config() {
        assert!(hue_config().validate().is_ok());
    }

    #[test]
    fn should_reject_hue_without_address() {
        let mut config = hue_config();
        config.hue.bridge_address = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_hue_without_username() {
        let mut config = hue_config();
        config.hue.username = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_hue_without_lights() {
        let mut config = hue_config();
        config.hue.lights.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_format_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8100");
    }

    #[test]
    fn should_build_night_window() {
        let config = Config::default();
        let window = config.night_window().unwrap();
        assert_eq!(window, NightWindow::default());
        assert!(window.is_overnight());
    }
}
