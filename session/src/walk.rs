use std::time::Duration;

use route::{Distance, DistanceAccumulator, GeoPoint, filter_route};
use steps::{AccelSample, StepDetector, estimated_steps};
use time::OffsetDateTime;

/// Foreign reference to a goal in whatever store the embedding uses
pub type GoalId = String;

/// Sensor counts under this at finalization are treated as "sensor reported
/// nothing usable" and replaced with a distance-based estimate. Kept from the
/// original heuristic; see [`steps::estimated_steps`].
pub const STEP_FALLBACK_THRESHOLD: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserProfile {
    pub weight_kg: f64,
    pub height_m: f64,
}

/// A walk being recorded. Single-writer: every mutation goes through one
/// `&mut` handler, and an embedding with genuine parallelism must put the
/// owning tracker behind a mutex or a single-writer actor.
#[derive(Debug)]
pub struct WalkSession {
    started_at: OffsetDateTime,
    profile: UserProfile,
    linked_goal: Option<GoalId>,

    duration: Duration,
    calories: f64,
    average_speed_kmphr: f64,
    pause_count: u32,

    route: Vec<GeoPoint>,
    distance: DistanceAccumulator,
    steps: StepDetector,
}

impl WalkSession {
    pub(crate) fn new(
        profile: UserProfile,
        linked_goal: Option<GoalId>,
        started_at: OffsetDateTime,
    ) -> Self {
        Self {
            started_at,
            profile,
            linked_goal,
            duration: Duration::ZERO,
            calories: 0.0,
            average_speed_kmphr: calories::DEFAULT_SPEED_KMPHR,
            pause_count: 0,
            route: Vec::new(),
            distance: DistanceAccumulator::new(),
            steps: StepDetector::new(),
        }
    }

    /// Record a location fix: append it to the raw route and run it through
    /// the segment accumulator.
    pub(crate) fn record_location(&mut self, point: GeoPoint) {
        self.distance.push(point.clone());
        self.route.push(point);
    }

    pub(crate) fn record_motion(&mut self, sample: &AccelSample) {
        self.steps.push(sample);
    }

    /// One aggregation tick: advance the active duration by a second and
    /// recompute speed and calories in full from the cumulative totals.
    pub(crate) fn tick(&mut self) {
        self.duration += Duration::from_secs(1);
        self.average_speed_kmphr =
            calories::average_speed_kmphr(self.distance.total(), self.duration);
        self.calories =
            calories::calories_burnt(self.profile.weight_kg, self.duration, self.average_speed_kmphr);
    }

    pub(crate) fn count_pause(&mut self) {
        self.pause_count += 1;
    }

    pub fn started_at(&self) -> OffsetDateTime {
        self.started_at
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn steps(&self) -> u64 {
        self.steps.count()
    }

    pub fn distance(&self) -> Distance {
        self.distance.total()
    }

    pub fn calories(&self) -> f64 {
        self.calories
    }

    pub fn pause_count(&self) -> u32 {
        self.pause_count
    }

    /// Close the session: filter the recorded route exactly once, fall back to
    /// distance-estimated steps if the sensor count is under
    /// [`STEP_FALLBACK_THRESHOLD`], and assemble the immutable payload.
    pub(crate) fn finalize(self, ended_at: OffsetDateTime) -> SessionSummary {
        let distance = self.distance.total();

        let counted = self.steps.count();
        let steps = if counted < STEP_FALLBACK_THRESHOLD {
            estimated_steps(distance, self.profile.height_m)
        } else {
            counted
        };

        let average_speed_kmphr = calories::average_speed_kmphr(distance, self.duration);

        SessionSummary {
            started_at: self.started_at,
            ended_at,
            duration: self.duration,
            steps,
            distance_km: distance.as_kilometers(),
            calories: calories::calories_burnt(
                self.profile.weight_kg,
                self.duration,
                average_speed_kmphr,
            ),
            average_speed_kmphr,
            pause_count: self.pause_count,
            route: filter_route(self.route),
            linked_goal: self.linked_goal,
        }
    }
}

/// Final payload of a finished walk. Immutable; this is what gets persisted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSummary {
    pub started_at: OffsetDateTime,
    pub ended_at: OffsetDateTime,
    /// Active duration, excluding paused intervals
    pub duration: Duration,
    pub steps: u64,
    pub distance_km: f64,
    pub calories: f64,
    pub average_speed_kmphr: f64,
    pub pause_count: u32,
    /// Noise-filtered route
    pub route: Vec<GeoPoint>,
    pub linked_goal: Option<GoalId>,
}
