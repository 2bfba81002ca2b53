//! Memory maintenance: decay, consolidation hygiene, association cleanup
//!
//! The scheduler runs independently of request traffic. Each pass ages the
//! short-term tier, re-runs consolidation, and drops associative entries
//! whose record no longer lives in any tier.

use crate::manager::MemoryManager;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Counters from a single maintenance pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaintenanceReport {
    /// Short-term records whose importance was reduced
    pub decayed: usize,
    /// Records demoted into long-term storage
    pub demoted: usize,
    /// Records discarded permanently
    pub discarded: usize,
    /// Dangling ids dropped from the associative index
    pub associations_pruned: usize,
}

/// Handle on the background maintenance task.
///
/// Dropping the handle leaves the task running; call [`shutdown`] for a
/// graceful stop that lets an in-flight pass finish.
///
/// [`shutdown`]: MaintenanceHandle::shutdown
#[derive(Debug)]
pub struct MaintenanceHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl MaintenanceHandle {
    /// Stop accepting new ticks and wait for the task to exit. An in-flight
    /// pass completes before the task observes the signal.
    pub async fn shutdown(self) {
        let _ = self.stop.send(true);
        let _ = self.task.await;
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawn the periodic maintenance task for a manager.
pub(crate) fn spawn(manager: MemoryManager) -> MaintenanceHandle {
    let (stop, mut stopped) = watch::channel(false);
    let period = manager.config().maintenance_interval;

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // interval yields immediately on the first tick; the first real pass
        // should happen one full period in.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let report = manager.run_maintenance().await;
                    tracing::debug!(
                        decayed = report.decayed,
                        demoted = report.demoted,
                        discarded = report.discarded,
                        pruned = report.associations_pruned,
                        "maintenance pass complete"
                    );
                }
                _ = stopped.changed() => break,
            }
        }
    });

    MaintenanceHandle { stop, task }
}
