use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::beacon::Diagnostic;
use crate::scene::DEFAULT_RADIUS;

#[derive(Debug, Clone)]
pub struct FeedSettings {
    /// Blob re-read on every refresh.
    pub source: PathBuf,
    pub refresh: Duration,
    /// Cursor advance cadence.
    pub step: Duration,
    pub radius: f64,
}

impl FeedSettings {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            refresh: Duration::from_secs(5),
            step: Duration::from_secs(1),
            radius: DEFAULT_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeedMode {
    Idle,
    Running { since: DateTime<Utc> },
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedStatus {
    pub mode: FeedMode,
    pub sample_count: usize,
    pub cursor: usize,
    pub last_refresh: Option<DateTime<Utc>>,
    /// Diagnostics of the most recent decode cycle.
    pub diagnostics: Vec<Diagnostic>,
}
