use route::GeoPoint;
use steps::AccelSample;
use time::OffsetDateTime;

use crate::walk::{GoalId, SessionSummary, UserProfile, WalkSession};
use crate::{StartError, SubscriptionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationPermission {
    Granted,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Tracking,
    Paused,
    Finished,
}

/// Cancellation handle for a platform sensor subscription (location stream,
/// accelerometer stream, aggregation timer). `cancel` must be safe to call
/// more than once.
pub trait Subscription {
    fn cancel(&mut self) -> Result<(), SubscriptionError>;
}

/// Lifecycle state machine for walk tracking.
///
/// `Idle → Tracking ⇄ Paused → Finished`. At most one session is active at a
/// time; event handlers are only live in `Tracking` and discard their input in
/// every other phase. All mutation is `&mut self`: the embedding is expected
/// to deliver the location, motion and timer callbacks serially, and a
/// parallel embedding must wrap the tracker in a mutex or single-writer actor.
pub struct WalkTracker {
    phase: Phase,
    session: Option<WalkSession>,
    subscriptions: Vec<Box<dyn Subscription>>,
}

impl std::fmt::Debug for WalkTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalkTracker")
            .field("phase", &self.phase)
            .field("session", &self.session)
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

impl Default for WalkTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl WalkTracker {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            session: None,
            subscriptions: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The live session, for progress reads while tracking or paused
    pub fn session(&self) -> Option<&WalkSession> {
        self.session.as_ref()
    }

    /// Begin a fresh session with zeroed counters.
    ///
    /// Requires granted location permission; refuses while another session is
    /// tracking or paused. Starting over a finished session is allowed and
    /// replaces it.
    pub fn start(
        &mut self,
        profile: UserProfile,
        linked_goal: Option<GoalId>,
        permission: LocationPermission,
        now: OffsetDateTime,
    ) -> Result<(), StartError> {
        if permission == LocationPermission::Denied {
            return Err(StartError::PermissionDenied);
        }

        if matches!(self.phase, Phase::Tracking | Phase::Paused) {
            return Err(StartError::SessionAlreadyActive);
        }

        self.session = Some(WalkSession::new(profile, linked_goal, now));
        self.phase = Phase::Tracking;
        Ok(())
    }

    /// Hand over a cancellation handle to be torn down on finish
    pub fn register_subscription(&mut self, subscription: Box<dyn Subscription>) {
        self.subscriptions.push(subscription);
    }

    /// Location callback. Fixes arriving while paused or stopped are
    /// discarded, not queued.
    pub fn handle_location(&mut self, point: GeoPoint) {
        if self.phase != Phase::Tracking {
            return;
        }

        if let Some(session) = self.session.as_mut() {
            session.record_location(point);
        }
    }

    /// Accelerometer callback. Samples arriving while paused or stopped are
    /// discarded, not queued.
    pub fn handle_motion(&mut self, sample: &AccelSample) {
        if self.phase != Phase::Tracking {
            return;
        }

        if let Some(session) = self.session.as_mut() {
            session.record_motion(sample);
        }
    }

    /// 1 Hz aggregation timer callback. Suspended while paused, so the active
    /// duration only advances during `Tracking`.
    pub fn tick(&mut self) {
        if self.phase != Phase::Tracking {
            return;
        }

        if let Some(session) = self.session.as_mut() {
            session.tick();
        }
    }

    /// Toggle `Tracking ⇄ Paused`. No-op in any other phase. Returns the
    /// phase after the toggle.
    pub fn toggle_pause(&mut self) -> Phase {
        match self.phase {
            Phase::Tracking => {
                if let Some(session) = self.session.as_mut() {
                    session.count_pause();
                }
                self.phase = Phase::Paused;
            }
            Phase::Paused => self.phase = Phase::Tracking,
            Phase::Idle | Phase::Finished => {}
        }

        self.phase
    }

    /// Stop tracking and assemble the final payload.
    ///
    /// Cancels every registered subscription first; a cancel failure is
    /// logged and swallowed, and the tracker still lands in `Finished`. UI
    /// state consistency takes priority over reporting a platform stop
    /// failure. Idempotent: when no session is active this returns `None`
    /// without touching anything.
    pub fn finish(&mut self, now: OffsetDateTime) -> Option<SessionSummary> {
        if !matches!(self.phase, Phase::Tracking | Phase::Paused) {
            return None;
        }

        for subscription in &mut self.subscriptions {
            if let Err(error) = subscription.cancel() {
                tracing::warn!(%error, "sensor subscription failed to stop, forcing stop");
            }
        }
        self.subscriptions.clear();
        self.phase = Phase::Finished;

        self.session.take().map(|session| session.finalize(now))
    }
}
