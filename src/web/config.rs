use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::feed::FeedSettings;
use crate::scene::DEFAULT_RADIUS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{0} must be greater than zero")]
    InvalidDuration(&'static str),
    #[error("radius must be finite and positive, got {0}")]
    InvalidRadius(f64),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub path: PathBuf,
    #[serde(default = "default_refresh", deserialize_with = "deserialize_duration")]
    pub refresh: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackConfig {
    #[serde(default = "default_step", deserialize_with = "deserialize_duration")]
    pub step: Duration,
    #[serde(default = "default_radius")]
    pub radius: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            step: default_step(),
            radius: default_radius(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Renderer assets served for any path the API does not claim.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            static_dir: None,
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_refresh() -> Duration {
    Duration::from_secs(5)
}

fn default_step() -> Duration {
    Duration::from_secs(1)
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.source.refresh.is_zero() {
            return Err(ConfigError::InvalidDuration("source.refresh"));
        }
        if self.playback.step.is_zero() {
            return Err(ConfigError::InvalidDuration("playback.step"));
        }
        let radius = self.playback.radius;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(radius));
        }
        Ok(())
    }

    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings {
            source: self.source.path.clone(),
            refresh: self.source.refresh,
            step: self.playback.step,
            radius: self.playback.radius,
        }
    }
}
