use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use quiz_core::Deferred;

/// Runs engine timers on tokio and hands due events back over a channel.
///
/// Events are delivered as-is; the engine decides whether they are stale.
pub struct DeferredScheduler<E> {
    sender: mpsc::UnboundedSender<Deferred<E>>,
    in_flight: Vec<JoinHandle<()>>,
}

impl<E> DeferredScheduler<E>
where
    E: Send + 'static,
{
    /// Returns the scheduler and the receiving end for due events.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Deferred<E>>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                sender,
                in_flight: Vec::new(),
            },
            receiver,
        )
    }

    /// Sleep until `deferred` is due (measured from `now`), then deliver it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, deferred: Deferred<E>, now: DateTime<Utc>) {
        let wait = deferred.remaining(now).to_std().unwrap_or_default();
        let sender = self.sender.clone();
        self.in_flight.retain(|handle| !handle.is_finished());
        self.in_flight.push(tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            if sender.send(deferred).is_err() {
                tracing::debug!("deferred event dropped, receiver closed");
            }
        }));
    }

    /// Abort every timer that has not fired yet. Returns how many were aborted.
    pub fn cancel_all(&mut self) -> usize {
        let mut aborted = 0;
        for handle in self.in_flight.drain(..) {
            if !handle.is_finished() {
                handle.abort();
                aborted += 1;
            }
        }
        if aborted > 0 {
            tracing::debug!(aborted, "cancelled pending timers");
        }
        aborted
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.in_flight.iter().filter(|h| !h.is_finished()).count()
    }
}

impl<E> Drop for DeferredScheduler<E> {
    fn drop(&mut self) {
        for handle in &self.in_flight {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::GenerationCounter;
    use quiz_core::time::fixed_now;

    #[tokio::test(start_paused = true)]
    async fn delivers_in_due_order() {
        let (mut scheduler, mut rx) = DeferredScheduler::new();
        let generation = GenerationCounter::new().advance();
        let now = fixed_now();

        scheduler.schedule(
            Deferred::new(generation, now + Duration::milliseconds(1500), "advance"),
            now,
        );
        scheduler.schedule(
            Deferred::new(generation, now + Duration::milliseconds(1000), "unflip"),
            now,
        );

        assert_eq!(*rx.recv().await.unwrap().event(), "unflip");
        assert_eq!(*rx.recv().await.unwrap().event(), "advance");
    }

    #[tokio::test(start_paused = true)]
    async fn overdue_event_fires_immediately() {
        let (mut scheduler, mut rx) = DeferredScheduler::new();
        let generation = GenerationCounter::new().advance();
        let now = fixed_now();

        scheduler.schedule(Deferred::new(generation, now, 7_u8), now + Duration::seconds(3));

        let delivered = tokio::time::timeout(std::time::Duration::from_millis(1), rx.recv())
            .await
            .expect("fires without waiting");
        assert_eq!(delivered.map(|d| *d.event()), Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_stops_delivery() {
        let (mut scheduler, mut rx) = DeferredScheduler::new();
        let generation = GenerationCounter::new().advance();
        let now = fixed_now();

        scheduler.schedule(
            Deferred::new(generation, now + Duration::seconds(1), ()),
            now,
        );
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.cancel_all(), 1);

        let waited = tokio::time::timeout(std::time::Duration::from_secs(5), rx.recv()).await;
        assert!(waited.is_err());
        assert_eq!(scheduler.pending(), 0);
    }
}
