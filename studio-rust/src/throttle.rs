use std::time::Duration;

/// Pause between consecutive generation calls of a batch.
///
/// The orchestrator never sleeps directly; tests substitute an implementation
/// that records the requested pauses instead.
#[async_trait::async_trait]
pub trait Throttle: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Real wall-clock pause on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioThrottle;

#[async_trait::async_trait]
impl Throttle for TokioThrottle {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoThrottle;

#[async_trait::async_trait]
impl Throttle for NoThrottle {
    async fn pause(&self, _duration: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn tokio_throttle_waits_for_the_full_duration() {
        let start = tokio::time::Instant::now();

        TokioThrottle.pause(Duration::from_millis(1500)).await;

        assert!(start.elapsed() >= Duration::from_millis(1500));
    }
}
