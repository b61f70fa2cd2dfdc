//! Background task that expires recency marks and idle sessions on a fixed period.

use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::session::store::SessionStore;

pub struct SessionSweeper {
    handle: JoinHandle<()>,
}

impl SessionSweeper {
    /// Starts sweeping `sessions` every `period`. A zero period is clamped to 1 ms.
    pub fn spawn(sessions: SessionStore, period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        info!("Session sweeper started (period: {}ms)", period.as_millis());

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let now = Instant::now();

                let evicted = sessions.sweep_recency(now).await;
                if evicted > 0 {
                    debug!("Recency sweep evicted {evicted} mark(s)");
                }

                let expired = sessions.evict_idle(now).await;
                if expired > 0 {
                    info!(
                        "Evicted {expired} idle session(s), {} remaining",
                        sessions.len().await
                    );
                }
            }
        });

        Self { handle }
    }

    pub fn stop(self) {
        info!("Session sweeper stopped");
        // Drop aborts the task
    }
}

impl Drop for SessionSweeper {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::DEFAULT_IDLE_TTL;

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_expires_marks_after_ttl() {
        let store = SessionStore::new(Duration::from_millis(3000), DEFAULT_IDLE_TTL);
        let (_, session) = store.create().await;
        session.lock().await.apply_rewrite("Rewritten.", "1", Instant::now());

        let sweeper = SessionSweeper::spawn(store.clone(), Duration::from_millis(500));

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(session.lock().await.is_recently_changed("rb1"));

        tokio::time::sleep(Duration::from_millis(2600)).await;
        assert!(!session.lock().await.is_recently_changed("rb1"));

        sweeper.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_idle_sessions() {
        let store = SessionStore::new(Duration::from_millis(3000), Duration::from_secs(10));
        let (id, _) = store.create().await;
        let sweeper = SessionSweeper::spawn(store.clone(), Duration::from_millis(500));

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(store.get(id).await.is_some());

        tokio::time::sleep(Duration::from_secs(9)).await;
        assert_eq!(store.len().await, 1);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(store.len().await, 0);

        sweeper.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_sweeper_no_longer_evicts() {
        let store = SessionStore::new(Duration::from_millis(100), Duration::from_millis(100));
        let sweeper = SessionSweeper::spawn(store.clone(), Duration::from_millis(50));
        sweeper.stop();

        let (_, session) = store.create().await;
        session.lock().await.apply_rewrite("Rewritten.", "1", Instant::now());
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(session.lock().await.is_recently_changed("rb1"));
        assert_eq!(store.len().await, 1);
    }
}
