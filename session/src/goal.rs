use crate::walk::{GoalId, SessionSummary};

/// Unit a linked goal is configured in; decides what a finished walk
/// contributes to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GoalUnit {
    Steps,
    Kilometers,
    Minutes,
    /// Count-based goals get a flat unit per finished walk
    Count,
}

#[derive(Debug, thiserror::Error)]
#[error("failed to update goal progress: {0}")]
pub struct GoalError(pub String);

/// Progress counters of the goal store
pub trait GoalProgress {
    fn increment(&mut self, goal: &GoalId, amount: f64) -> Result<(), GoalError>;
}

/// Increment a finished walk contributes to a goal of the given unit
pub fn progress_amount(summary: &SessionSummary, unit: GoalUnit) -> f64 {
    match unit {
        GoalUnit::Steps => summary.steps as f64,
        GoalUnit::Kilometers => summary.distance_km,
        GoalUnit::Minutes => summary.duration.as_secs_f64() / 60.0,
        GoalUnit::Count => 1.0,
    }
}

/// Push a finished walk's contribution to its linked goal, fire-and-forget:
/// sessions without a linked goal are skipped and increment failures are
/// logged and swallowed.
pub fn record_goal_progress(
    goals: &mut impl GoalProgress,
    summary: &SessionSummary,
    unit: GoalUnit,
) {
    let Some(goal) = &summary.linked_goal else {
        return;
    };

    if let Err(error) = goals.increment(goal, progress_amount(summary, unit)) {
        tracing::warn!(%error, %goal, "goal progress update failed, ignoring");
    }
}
