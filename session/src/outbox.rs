use std::collections::VecDeque;

use crate::walk::SessionSummary;

#[derive(Debug, thiserror::Error)]
#[error("failed to persist session: {0}")]
pub struct PersistenceError(pub String);

/// Remote persistence for finished sessions (a REST backend in practice)
pub trait SessionStore {
    fn submit(&mut self, summary: &SessionSummary) -> Result<(), PersistenceError>;
}

/// Submission with a local fallback.
///
/// A summary whose remote submit fails is appended to an in-memory FIFO
/// pending list instead of being lost. There is no retry scheduling; the
/// embedding decides when connectivity is back and calls [`resync`].
///
/// [`resync`]: SessionOutbox::resync
#[derive(Debug)]
pub struct SessionOutbox<S> {
    store: S,
    pending: VecDeque<SessionSummary>,
}

impl<S: SessionStore> SessionOutbox<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            pending: VecDeque::new(),
        }
    }

    /// Submit a finished session, queueing it on failure
    pub fn submit(&mut self, summary: SessionSummary) {
        if let Err(error) = self.store.submit(&summary) {
            tracing::warn!(%error, "session submit failed, queueing for resync");
            self.pending.push_back(summary);
        }
    }

    /// Replay the pending list in FIFO order, stopping at the first failure
    /// so the still-failing entry and everything behind it stay queued.
    /// Returns how many entries went through.
    pub fn resync(&mut self) -> usize {
        let mut replayed = 0;

        while let Some(front) = self.pending.front() {
            match self.store.submit(front) {
                Ok(()) => {
                    self.pending.pop_front();
                    replayed += 1;
                }
                Err(error) => {
                    tracing::warn!(%error, pending = self.pending.len(), "resync halted");
                    break;
                }
            }
        }

        replayed
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use time::macros::datetime;

    fn summary(steps: u64) -> SessionSummary {
        SessionSummary {
            started_at: datetime!(2024-01-01 08:00:00 UTC),
            ended_at: datetime!(2024-01-01 08:30:00 UTC),
            duration: Duration::from_secs(30 * 60),
            steps,
            distance_km: 2.5,
            calories: 122.5,
            average_speed_kmphr: 5.0,
            pause_count: 0,
            route: Vec::new(),
            linked_goal: None,
        }
    }

    /// Store that fails its first `failures` submits, then accepts
    struct FlakyStore {
        failures: usize,
        accepted: Vec<u64>,
    }

    impl FlakyStore {
        fn new(failures: usize) -> Self {
            Self {
                failures,
                accepted: Vec::new(),
            }
        }
    }

    impl SessionStore for FlakyStore {
        fn submit(&mut self, summary: &SessionSummary) -> Result<(), PersistenceError> {
            if self.failures > 0 {
                self.failures -= 1;
                return Err(PersistenceError("503 from backend".into()));
            }

            self.accepted.push(summary.steps);
            Ok(())
        }
    }

    #[test]
    fn submit_passes_through_on_success() {
        let mut outbox = SessionOutbox::new(FlakyStore::new(0));

        outbox.submit(summary(100));

        assert_eq!(0, outbox.pending());
        assert_eq!(vec![100], outbox.store.accepted);
    }

    #[test]
    fn submit_failure_queues_payload() {
        let mut outbox = SessionOutbox::new(FlakyStore::new(1));

        outbox.submit(summary(100));

        assert_eq!(1, outbox.pending());
        assert!(outbox.store.accepted.is_empty());
    }

    #[test]
    fn resync_replays_fifo() {
        let mut outbox = SessionOutbox::new(FlakyStore::new(3));

        outbox.submit(summary(1));
        outbox.submit(summary(2));
        outbox.submit(summary(3));

        assert_eq!(3, outbox.pending());
        assert_eq!(3, outbox.resync());
        assert_eq!(0, outbox.pending());
        assert_eq!(vec![1, 2, 3], outbox.store.accepted);
    }

    #[test]
    fn resync_halts_at_first_failure() {
        let mut outbox = SessionOutbox::new(FlakyStore::new(3));

        outbox.submit(summary(1));
        outbox.submit(summary(2));

        // one more failure left: the first replay attempt eats it
        assert_eq!(0, outbox.resync());
        assert_eq!(2, outbox.pending());

        // next pass drains everything, still in order
        assert_eq!(2, outbox.resync());
        assert_eq!(vec![1, 2], outbox.store.accepted);
    }

    #[test]
    fn resync_on_empty_outbox_is_noop() {
        let mut outbox = SessionOutbox::new(FlakyStore::new(0));

        assert_eq!(0, outbox.resync());
    }
}
