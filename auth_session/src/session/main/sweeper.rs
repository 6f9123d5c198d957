use std::sync::Arc;
use std::time::Duration as StdDuration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

use super::store::InMemorySessionStore;
use crate::session::config::SESSION_CLEANUP_BATCH_SIZE;

/// Handle to the periodic expired-session sweep.
///
/// Call [`SessionSweeper::shutdown`] for an orderly stop; dropping the handle
/// aborts the task.
#[derive(Debug)]
pub struct SessionSweeper {
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl SessionSweeper {
    pub(crate) fn spawn(store: Arc<InMemorySessionStore>, period: StdDuration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            tracing::info!("Session sweeper started, interval {:?}", period);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        // One batch per lock acquisition; keep going while batches are full.
                        let mut removed = 0;
                        loop {
                            let batch = store.sweep_expired().await;
                            removed += batch;
                            if batch < SESSION_CLEANUP_BATCH_SIZE {
                                break;
                            }
                        }
                        if removed > 0 {
                            tracing::info!("Removed {} expired sessions", removed);
                        }
                    }
                    _ = &mut shutdown_rx => {
                        tracing::info!("Session sweeper stopped");
                        break;
                    }
                }
            }
        });

        Self {
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    /// Signals the sweep task to stop and waits for it to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!("Session sweeper ended abnormally: {}", e);
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }
}

impl Drop for SessionSweeper {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
