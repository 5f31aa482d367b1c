//! # Walk session lifecycle
//!
//! State machine and collaborators around one recorded walk:
//!
//! ```norust
//! idle → tracking ⇄ paused → finished
//! ```
//!
//! Three event producers feed an active session: a location stream (a fix
//! every few seconds or meters), an accelerometer stream (every 0.5 s), and a
//! 1 Hz aggregation timer. The [`WalkTracker`] consumes all three through
//! plain `&mut self` handlers and assumes they are delivered serially;
//! nothing here is fatal, every failure degrades to a log line, a queued
//! payload, or an error the embedding can prompt the user about.

mod goal;
mod outbox;
mod tracker;
mod walk;

pub use goal::{GoalError, GoalProgress, GoalUnit, progress_amount, record_goal_progress};
pub use outbox::{PersistenceError, SessionOutbox, SessionStore};
pub use tracker::{LocationPermission, Phase, Subscription, WalkTracker};
pub use walk::{GoalId, STEP_FALLBACK_THRESHOLD, SessionSummary, UserProfile, WalkSession};

/// Why a session could not start
#[derive(Debug, thiserror::Error)]
pub enum StartError {
    /// Location access refused; prompt the user and retry
    #[error("location permission denied")]
    PermissionDenied,
    /// At most one session may be active per tracker
    #[error("a walk session is already active")]
    SessionAlreadyActive,
}

/// A platform subscription failed to stop. Non-fatal: logged, and the
/// tracker's state is forced to stopped regardless.
#[derive(Debug, thiserror::Error)]
#[error("failed to stop subscription: {0}")]
pub struct SubscriptionError(pub String);
