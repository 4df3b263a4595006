//! Poll pacing

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Fixed pause between two status polls of a run
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Suspends the caller between polls
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, interval: Duration);
}

/// Pacer backed by the tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, interval: Duration) {
        debug!("Waiting {:?} before next poll", interval);
        tokio::time::sleep(interval).await;
    }
}
