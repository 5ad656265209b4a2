use chrono::Utc;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::error::FeedError;
use super::types::{FeedMode, FeedSettings, FeedStatus};
use crate::beacon::{decode, BeaconSample, Diagnostic};
use crate::scene::FrameView;

#[derive(Debug)]
struct Shared {
    mode: FeedMode,
    samples: Vec<BeaconSample>,
    cursor: usize,
    last_refresh: Option<chrono::DateTime<Utc>>,
    diagnostics: Vec<Diagnostic>,
}

impl Shared {
    fn status(&self) -> FeedStatus {
        FeedStatus {
            mode: self.mode.clone(),
            sample_count: self.samples.len(),
            cursor: self.cursor,
            last_refresh: self.last_refresh,
            diagnostics: self.diagnostics.clone(),
        }
    }
}

#[derive(Debug)]
struct WorkerHandle {
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

/// Polls the source blob and walks a cursor through the decoded samples.
///
/// Each refresh replaces the whole sample sequence; samples are never
/// carried over from one refresh into the next.
pub struct Feed {
    settings: FeedSettings,
    shared: Arc<StdMutex<Shared>>,
    worker: Option<WorkerHandle>,
}

impl Feed {
    pub fn new(settings: FeedSettings) -> Self {
        Self {
            settings,
            shared: Arc::new(StdMutex::new(Shared {
                mode: FeedMode::Idle,
                samples: Vec::new(),
                cursor: 0,
                last_refresh: None,
                diagnostics: Vec::new(),
            })),
            worker: None,
        }
    }

    pub fn status(&self) -> FeedStatus {
        self.shared.lock().unwrap().status()
    }

    pub fn samples(&self) -> Vec<BeaconSample> {
        self.shared.lock().unwrap().samples.clone()
    }

    /// View of the sample under the cursor, if any samples are loaded.
    pub fn current_view(&self) -> Option<FrameView> {
        let locked = self.shared.lock().unwrap();
        FrameView::at(&locked.samples, locked.cursor, self.settings.radius)
    }

    pub fn view_at(&self, index: usize) -> Option<FrameView> {
        let locked = self.shared.lock().unwrap();
        FrameView::at(&locked.samples, index, self.settings.radius)
    }

    /// Decode `blob` as one refresh cycle.
    pub fn ingest(&self, blob: &str) -> FeedStatus {
        ingest_into(&self.shared, blob)
    }

    /// Read the source file once and ingest it.
    pub async fn refresh(&self) -> Result<FeedStatus, FeedError> {
        refresh_from(&self.shared, &self.settings).await
    }

    pub fn advance(&self) -> usize {
        advance_cursor(&self.shared)
    }

    pub async fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop_tx.send(());
            let _ = worker.join.await;
        }
        let mut locked = self.shared.lock().unwrap();
        locked.mode = FeedMode::Idle;
    }

    pub fn start(&mut self) -> Result<(), FeedError> {
        if self.worker.is_some() {
            return Err(FeedError::AlreadyRunning);
        }

        let shared = self.shared.clone();
        let settings = self.settings.clone();
        let (stop_tx, stop_rx) = oneshot::channel();

        {
            let mut locked = self.shared.lock().unwrap();
            locked.mode = FeedMode::Running { since: Utc::now() };
        }

        let join = tokio::spawn(run_feed_loop(shared, settings, stop_rx));
        self.worker = Some(WorkerHandle { stop_tx, join });

        log::info!(
            "Feed started: {} every {}, step {}",
            self.settings.source.display(),
            humantime::format_duration(self.settings.refresh),
            humantime::format_duration(self.settings.step)
        );
        Ok(())
    }
}

async fn run_feed_loop(
    shared: Arc<StdMutex<Shared>>,
    settings: FeedSettings,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let mut refresh = interval(settings.refresh);
    refresh.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut step = interval(settings.step);
    step.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately; the cursor should hold still
    // until one full step has passed.
    step.tick().await;

    loop {
        tokio::select! {
            _ = refresh.tick() => {
                if let Err(e) = refresh_from(&shared, &settings).await {
                    log::error!("Error fetching beacon data: {}", e);
                }
            }
            _ = step.tick() => {
                advance_cursor(&shared);
            }
            _ = &mut stop_rx => break,
        }
    }

    let mut locked = shared.lock().unwrap();
    locked.mode = FeedMode::Idle;
}

async fn refresh_from(
    shared: &StdMutex<Shared>,
    settings: &FeedSettings,
) -> Result<FeedStatus, FeedError> {
    let blob = tokio::fs::read_to_string(&settings.source)
        .await
        .map_err(|source| FeedError::Read {
            path: settings.source.clone(),
            source,
        })?;
    Ok(ingest_into(shared, &blob))
}

fn ingest_into(shared: &StdMutex<Shared>, blob: &str) -> FeedStatus {
    let decoded = decode(blob);

    for diagnostic in &decoded.diagnostics {
        log::warn!("Dropped beacon data: {}", diagnostic);
    }

    let mut locked = shared.lock().unwrap();
    if decoded.samples.is_empty() {
        log::warn!(
            "No valid beacon data found, keeping {} previous samples",
            locked.samples.len()
        );
    } else {
        log::info!(
            "Decoded {} samples ({} dropped)",
            decoded.samples.len(),
            decoded.diagnostics.len()
        );
        locked.samples = decoded.samples;
        if locked.cursor >= locked.samples.len() {
            locked.cursor = 0;
        }
    }
    locked.diagnostics = decoded.diagnostics;
    locked.last_refresh = Some(Utc::now());
    locked.status()
}

fn advance_cursor(shared: &StdMutex<Shared>) -> usize {
    let mut locked = shared.lock().unwrap();
    let len = locked.samples.len();
    if len > 0 {
        locked.cursor = if locked.cursor + 1 < len {
            locked.cursor + 1
        } else {
            0
        };
    }
    locked.cursor
}
