//! MET-based calorie estimation for walking.
//!
//! Energy expenditure is `MET × weight × hours`, where MET (Metabolic
//! Equivalent of Task) is picked from the average walking speed:
//!
//! - below 3 km/h (strolling) - MET 2.5
//! - 3 to 6 km/h (regular walking) - MET 3.5
//! - above 6 km/h (brisk walking) - MET 5.0
//!
//! The estimate is a full recompute from the cumulative session totals, not an
//! incremental sum, so it stays consistent no matter how often it runs.

use std::time::Duration;

use route::Distance;

/// Assumed walking speed when no distance has been covered yet, in km/h
pub const DEFAULT_SPEED_KMPHR: f64 = 5.0;

const STROLLING_UPPER_KMPHR: f64 = 3.0;
const BRISK_LOWER_KMPHR: f64 = 6.0;

/// MET index for a walking speed in km/h
pub fn met_for_speed(speed_kmphr: f64) -> f64 {
    if speed_kmphr < STROLLING_UPPER_KMPHR {
        return 2.5;
    }

    if speed_kmphr > BRISK_LOWER_KMPHR {
        return 5.0;
    }

    3.5
}

/// Average speed over the session so far, in km/h.
///
/// Falls back to [`DEFAULT_SPEED_KMPHR`] while no distance has accumulated
/// (GPS still settling) or no time has elapsed, so the calorie estimate never
/// divides by zero or reads a standstill as zero effort.
pub fn average_speed_kmphr(distance: Distance, elapsed: Duration) -> f64 {
    let km = distance.as_kilometers();
    let hours = elapsed.as_secs_f64() / 60.0 / 60.0;

    if km <= 0.0 || hours <= 0.0 {
        return DEFAULT_SPEED_KMPHR;
    }

    km / hours
}

/// Simple formula to estimate burnt calories
///
/// # Params
/// - `weight` - weight of person in kilograms
/// - `elapsed` - active (unpaused) session duration
/// - `speed_kmphr` - average walking speed in km/h
pub fn calories_burnt(weight: f64, elapsed: Duration, speed_kmphr: f64) -> f64 {
    let hours = elapsed.as_secs_f64() / 60.0 / 60.0;

    met_for_speed(speed_kmphr) * weight * hours
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn met_bands() {
        assert_eq!(2.5, met_for_speed(0.0));
        assert_eq!(2.5, met_for_speed(2.9));
        assert_eq!(3.5, met_for_speed(3.0));
        assert_eq!(3.5, met_for_speed(5.0));
        assert_eq!(3.5, met_for_speed(6.0));
        assert_eq!(5.0, met_for_speed(6.1));
    }

    #[test]
    fn regular_walk_reference_value() {
        // 70 kg, half an hour, 5 km/h: 3.5 × 70 × 0.5 = 122.5 kcal
        let actual = calories_burnt(70.0, Duration::from_secs(30 * 60), 5.0);

        assert_eq!(122.5, actual);
    }

    #[test]
    fn non_negative_and_monotone_in_time() {
        let mut previous = 0.0;

        for minutes in 0..120 {
            let kcal = calories_burnt(70.0, Duration::from_secs(minutes * 60), 4.2);
            assert!(kcal >= previous);
            previous = kcal;
        }
    }

    #[test]
    fn zero_distance_uses_default_speed() {
        let speed = average_speed_kmphr(Distance::ZERO, Duration::from_secs(600));

        assert_eq!(DEFAULT_SPEED_KMPHR, speed);
    }

    #[test]
    fn zero_elapsed_uses_default_speed() {
        let speed = average_speed_kmphr(Distance::from_kilometers(1.0), Duration::ZERO);

        assert_eq!(DEFAULT_SPEED_KMPHR, speed);
    }

    #[test]
    fn average_speed_from_totals() {
        let speed = average_speed_kmphr(Distance::from_kilometers(2.5), Duration::from_secs(1800));

        assert_eq!(5.0, speed);
    }
}
