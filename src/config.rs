//! Application-level configuration loading: board layout, topic and publisher endpoint.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::state::relay::LineId;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "RELAY_SKILL_CONFIG_PATH";
/// Base URL of the broker's HTTP publish endpoint.
const PUBLISH_URL_ENV: &str = "RELAY_PUBLISH_URL";
/// Optional bearer token sent along with every publish request.
const PUBLISH_TOKEN_ENV: &str = "RELAY_PUBLISH_TOKEN";

const DEFAULT_TOPIC: &str = "led";
const DEFAULT_DELAY_SECS: u64 = 2;
const DEFAULT_LINES: [LineId; 9] = [31, 30, 29, 33, 27, 26, 25, 24, 23];

/// Bounds applied to spoken port numbers.
///
/// A port is accepted when it is above `lower` OR below `upper`. With
/// `lower < upper` every integer passes; the board firmware ignores ports it
/// does not drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PortBounds {
    /// Ports above this value pass.
    pub lower: LineId,
    /// Ports below this value pass.
    pub upper: LineId,
}

impl PortBounds {
    /// Whether `port` passes the bound check.
    pub fn accepts(&self, port: LineId) -> bool {
        port > self.lower || port < self.upper
    }
}

impl Default for PortBounds {
    fn default() -> Self {
        Self {
            lower: 22,
            upper: 35,
        }
    }
}

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Topic every relay message is published on.
    pub topic: String,
    /// Line registry played by the NIM game, in scan order.
    pub lines: Vec<LineId>,
    /// Seconds the board waits before honouring a delayed command.
    pub delay_secs: u64,
    /// Bound check applied to spoken port numbers.
    pub port_bounds: PortBounds,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(app_config) => {
                    info!(
                        path = %path.display(),
                        lines = app_config.lines.len(),
                        topic = %app_config.topic,
                        "loaded board configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse a JSON document, filling omitted fields with defaults.
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        let raw = serde_json::from_str::<RawConfig>(contents)?;
        Ok(raw.into())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            topic: DEFAULT_TOPIC.to_string(),
            lines: DEFAULT_LINES.to_vec(),
            delay_secs: DEFAULT_DELAY_SECS,
            port_bounds: PortBounds::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    topic: Option<String>,
    lines: Option<Vec<LineId>>,
    delay_secs: Option<u64>,
    port_bounds: Option<PortBounds>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();

        let topic = value
            .topic
            .filter(|topic| !topic.trim().is_empty())
            .unwrap_or(defaults.topic);

        let lines = match value.lines {
            Some(lines) if lines.is_empty() => {
                warn!("configured line registry is empty; using built-in lines");
                defaults.lines
            }
            Some(lines) => lines,
            None => defaults.lines,
        };

        Self {
            topic,
            lines,
            delay_secs: value.delay_secs.unwrap_or(defaults.delay_secs),
            port_bounds: value.port_bounds.unwrap_or(defaults.port_bounds),
        }
    }
}

/// Runtime configuration describing where relay messages are published.
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Broker HTTP bridge base URL.
    pub base_url: String,
    /// Bearer token sent with every request, when set.
    pub token: Option<String>,
}

impl PublisherConfig {
    /// Build a configuration from the environment, or `None` when no endpoint is set.
    pub fn from_env() -> Option<Self> {
        let base_url = env::var(PUBLISH_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())?;
        let token = env::var(PUBLISH_TOKEN_ENV)
            .ok()
            .filter(|value| !value.is_empty());

        Some(Self { base_url, token })
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_dragonboard_layout() {
        let config = AppConfig::default();
        assert_eq!(config.topic, "led");
        assert_eq!(config.lines, vec![31, 30, 29, 33, 27, 26, 25, 24, 23]);
        assert_eq!(config.delay_secs, 2);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = AppConfig::from_json(r#"{ "lines": [4, 5, 6] }"#).unwrap();
        assert_eq!(config.lines, vec![4, 5, 6]);
        assert_eq!(config.topic, "led");
        assert_eq!(config.port_bounds, PortBounds::default());
    }

    #[test]
    fn empty_registry_is_rejected() {
        let config = AppConfig::from_json(r#"{ "lines": [], "topic": "board" }"#).unwrap();
        assert_eq!(config.lines.len(), 9);
        assert_eq!(config.topic, "board");
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(AppConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn default_bounds_accept_every_port() {
        let bounds = PortBounds::default();
        for port in [-100, 0, 5, 22, 23, 34, 35, 1000] {
            assert!(bounds.accepts(port), "port {port} should pass");
        }
    }

    #[test]
    fn disjoint_bounds_can_reject() {
        let bounds = PortBounds {
            lower: 40,
            upper: 10,
        };
        assert!(bounds.accepts(41));
        assert!(bounds.accepts(9));
        assert!(!bounds.accepts(20));
    }
}
