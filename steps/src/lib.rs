//! Step counting from raw tri-axial accelerometer samples.
//!
//! A step is a magnitude peak inside a fixed band, debounced in time so a
//! single footfall cannot count twice. This is a single-threshold detector,
//! not a full gait-cycle algorithm: the band is not calibrated per device or
//! user, so false negatives and positives are expected and accepted as an
//! approximation.
//!
//! When the sensor reports near-zero steps over a non-trivial distance (no
//! permission, cheap hardware, phone in a bag), [`estimated_steps`] derives a
//! count from the walked distance and the walker's stride length instead.

use std::time::Duration;

use route::Distance;

/// Lower bound of the step magnitude band, in g
pub const MAGNITUDE_LOWER_G: f64 = 1.15;
/// Upper bound of the step magnitude band, in g
pub const MAGNITUDE_UPPER_G: f64 = 2.5;
/// Minimum time between two counted steps
pub const STEP_DEBOUNCE: Duration = Duration::from_millis(300);

/// Stride length as a fraction of body height
const STRIDE_HEIGHT_RATIO: f64 = 0.41;

#[derive(Debug, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccelSample {
    /// UNIX timestamp e.g. duration after [`std::time::UNIX_EPOCH`]
    pub timestamp: Duration,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl AccelSample {
    pub fn magnitude(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt()
    }
}

/// Incremental single-threshold step detector.
///
/// Counts a step when the sample magnitude falls strictly inside
/// `(`[`MAGNITUDE_LOWER_G`]`, `[`MAGNITUDE_UPPER_G`]`)` and at least
/// [`STEP_DEBOUNCE`] has elapsed since the last counted step. The counter
/// never decreases.
#[derive(Debug, Default)]
pub struct StepDetector {
    count: u64,
    last_step: Option<Duration>,
}

impl StepDetector {
    pub fn new() -> Self {
        Self {
            count: 0,
            last_step: None,
        }
    }

    /// Feed the next sample. Returns the running step count.
    pub fn push(&mut self, sample: &AccelSample) -> u64 {
        let magnitude = sample.magnitude();

        if magnitude <= MAGNITUDE_LOWER_G || magnitude >= MAGNITUDE_UPPER_G {
            return self.count;
        }

        let debounced = match self.last_step {
            Some(last) => {
                sample.timestamp >= last && sample.timestamp - last >= STEP_DEBOUNCE
            }
            None => true,
        };

        if debounced {
            self.count += 1;
            self.last_step = Some(sample.timestamp);
        }

        self.count
    }

    pub const fn count(&self) -> u64 {
        self.count
    }
}

/// Estimate a step count from walked distance and body height.
///
/// Fallback for sessions where the motion sensor produced nothing usable.
///
/// # Params
/// - `distance` - distance walked over the session
/// - `height` - height of person in meters
pub fn estimated_steps(distance: Distance, height: f64) -> u64 {
    if height <= 0.0 {
        return 0;
    }

    (distance.as_meters() / (height * STRIDE_HEIGHT_RATIO)).floor() as u64
}
