// Replay worker: cycles one fixture snapshot by snapshot onto the /ws/live broadcast channel.

use crate::fixtures::FixtureSet;
use crate::models::TimeSeriesSnapshot;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::broadcast;
use tokio::time::{Duration, Instant, interval};
use tracing::Instrument;

/// Rate limit for "no receivers" log (avoid logging every tick when no one is on /ws/live)
const NO_RECEIVERS_WARN_INTERVAL: Duration = Duration::from_secs(60);

/// Fixture, channel, counters and shutdown for the worker.
pub struct WorkerDeps {
    pub fixture: Arc<FixtureSet>,
    pub tx: broadcast::Sender<TimeSeriesSnapshot>,
    pub ws_live_connections: Arc<AtomicUsize>,
    pub snapshots_broadcast_total: Arc<AtomicU64>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

pub struct WorkerConfig {
    pub interval_ms: u64,
    /// How often to log app stats (real seconds).
    pub stats_log_interval_secs: u64,
}

/// Position in a fixture that wraps to the first snapshot after the last.
#[derive(Debug, Clone)]
pub struct ReplayCursor {
    fixture: Arc<FixtureSet>,
    next: usize,
    laps: u64,
}

impl ReplayCursor {
    pub fn new(fixture: Arc<FixtureSet>) -> Self {
        Self {
            fixture,
            next: 0,
            laps: 0,
        }
    }

    /// Completed passes over the whole fixture.
    pub fn laps(&self) -> u64 {
        self.laps
    }

    /// Next snapshot in order; `None` only for an empty fixture.
    pub fn advance(&mut self) -> Option<TimeSeriesSnapshot> {
        let snapshots = &self.fixture.snapshots;
        if snapshots.is_empty() {
            return None;
        }
        let snapshot = snapshots[self.next].clone();
        self.next += 1;
        if self.next == snapshots.len() {
            self.next = 0;
            self.laps += 1;
        }
        Some(snapshot)
    }
}

pub fn spawn(deps: WorkerDeps, config: WorkerConfig) -> tokio::task::JoinHandle<()> {
    let worker_span = tracing::span!(
        tracing::Level::DEBUG,
        "replay_worker",
        fixture = %deps.fixture.id,
        interval_ms = config.interval_ms
    );
    tokio::spawn(run(deps, config).instrument(worker_span))
}

async fn run(deps: WorkerDeps, config: WorkerConfig) {
    let WorkerDeps {
        fixture,
        tx,
        ws_live_connections,
        snapshots_broadcast_total,
        mut shutdown_rx,
    } = deps;

    let mut tick = interval(Duration::from_millis(config.interval_ms));
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut stats_log_tick = interval(Duration::from_secs(config.stats_log_interval_secs));
    stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let mut cursor = ReplayCursor::new(fixture);
    let mut last_no_receivers_warn: Option<Instant> = None;

    loop {
        tokio::select! {
            _ = tick.tick() => {
                let Some(snapshot) = cursor.advance() else {
                    tracing::warn!(operation = "replay", "Fixture has no snapshots; worker stopping");
                    break;
                };
                if tx.send(snapshot).is_err() {
                    let should_warn = last_no_receivers_warn
                        .is_none_or(|t| t.elapsed() >= NO_RECEIVERS_WARN_INTERVAL);
                    if should_warn {
                        tracing::debug!(
                            operation = "broadcast_snapshot",
                            "No active WebSocket clients; broadcast channel has no receivers"
                        );
                        last_no_receivers_warn = Some(Instant::now());
                    }
                } else {
                    snapshots_broadcast_total.fetch_add(1, Ordering::Relaxed);
                }
            }
            _ = &mut shutdown_rx => {
                tracing::debug!("Replay worker shutting down");
                break;
            }
            _ = stats_log_tick.tick() => {
                tracing::info!(
                    ws_live_clients = ws_live_connections.load(Ordering::Relaxed),
                    snapshots_broadcast_total = snapshots_broadcast_total.load(Ordering::Relaxed),
                    replay_laps = cursor.laps(),
                    "app stats"
                );
            }
        }
    }
}
