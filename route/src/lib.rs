//! Distance over a recorded walking route.
//!
//! Consecutive GPS fixes are reduced to great-circle segment distances with the
//! Haversine formula:
//!
//! ```norust
//! d=2R*sin ^ −1(√(sin^2((Φ2​−Φ1​​)/2)+cos(Φ1​)cos(Φ2​)sin^2((λ2​−λ1​​)/2)))
//! ```
//!
//! where:
//!
//! - R – Earth's radius (R = 6371 km);
//! - λ1, φ₁ – First point longitude and latitude coordinates;
//! - λ2, φ₂ – Second point longitude and latitude coordinates;
//! - d – Distance between them along Earth's surface.
//!
//! Two filters reject GPS noise:
//!
//! - per-segment, while recording: a segment only counts when it is longer than
//!   jitter and shorter than what a sampling interval of a few seconds can
//!   plausibly cover on foot;
//! - per-route, after recording: any fix implying a speed above foot-travel
//!   range against the previously retained fix is dropped.

mod models;

pub use models::*;

/// Radius of Earth in kilometers
pub const R: f64 = 6371.0;

/// Segments shorter than this are zero-distance jitter and are not accumulated
pub const MIN_SEGMENT_KM: f64 = 0.0001;
/// Segments longer than this between two consecutive fixes are GPS jumps
pub const MAX_SEGMENT_KM: f64 = 0.1;
/// Fixes implying a higher speed than this cannot come from foot travel
pub const MAX_WALKING_SPEED_KMPHR: f64 = 30.0;

/// Calculates distance from point A to point B in kilometers
pub fn haversine(longitude_1: f64, latitude_1: f64, longitude_2: f64, latitude_2: f64) -> f64 {
    let d_lat = (std::f64::consts::PI / 180.0) * (latitude_2 - latitude_1);
    let d_lon = (std::f64::consts::PI / 180.0) * (longitude_2 - longitude_1);

    // convert to radians
    let latitude_1 = (std::f64::consts::PI / 180.0) * latitude_1;
    let latitude_2 = (std::f64::consts::PI / 180.0) * latitude_2;

    R * (2.0
        * ((d_lat / 2.0).sin().powi(2)
            + (d_lon / 2.0).sin().powi(2) * latitude_1.cos() * latitude_2.cos())
        .sqrt()
        .asin())
}

/// Great-circle distance between two fixes
pub fn segment_distance(from: &GeoPoint, to: &GeoPoint) -> Distance {
    Distance::from_kilometers(haversine(
        from.longitude,
        from.latitude,
        to.longitude,
        to.latitude,
    ))
}

/// Speed implied by moving between two fixes, in km/h.
///
/// A zero or negative time delta yields [`f64::INFINITY`] so that callers
/// filtering on an upper speed bound reject the pair.
pub fn implied_speed_kmphr(from: &GeoPoint, to: &GeoPoint) -> f64 {
    if to.timestamp <= from.timestamp {
        return f64::INFINITY;
    }

    let hours = (to.timestamp - from.timestamp).as_secs_f64() / 60.0 / 60.0;

    segment_distance(from, to).as_kilometers() / hours
}

/// Incremental distance over a stream of GPS fixes.
///
/// Fixes arrive one at a time from a location callback, so unlike a batch
/// sliding-window pass this keeps the previous fix as an anchor. A segment is
/// accumulated only when its length falls strictly inside
/// `(`[`MIN_SEGMENT_KM`]`, `[`MAX_SEGMENT_KM`]`)`; segments outside the band
/// are dropped without error, but the anchor still advances to the newest fix.
#[derive(Debug, Default)]
pub struct DistanceAccumulator {
    anchor: Option<GeoPoint>,
    total: Distance,
}

impl DistanceAccumulator {
    pub fn new() -> Self {
        Self {
            anchor: None,
            total: Distance::ZERO,
        }
    }

    /// Feed the next fix. Returns the accepted segment distance, or `None`
    /// when the fix only establishes the anchor or falls outside the band.
    pub fn push(&mut self, point: GeoPoint) -> Option<Distance> {
        let segment = self
            .anchor
            .as_ref()
            .map(|anchor| segment_distance(anchor, &point));

        self.anchor = Some(point);

        let segment = segment?;
        let km = segment.as_kilometers();

        if km <= MIN_SEGMENT_KM || km >= MAX_SEGMENT_KM {
            return None;
        }

        self.total += segment;
        Some(segment)
    }

    /// Cumulative accepted distance. Never decreases.
    pub const fn total(&self) -> Distance {
        self.total
    }
}

/// Post-session noise filter over the full recorded route.
///
/// The first fix is always retained. Every later fix is kept only when the
/// speed it implies against the last retained fix does not exceed
/// [`MAX_WALKING_SPEED_KMPHR`]. Runs once, at session finalization.
pub fn filter_route(points: impl IntoIterator<Item = GeoPoint>) -> Vec<GeoPoint> {
    let mut points = points.into_iter();

    let Some(first) = points.next() else {
        return Vec::new();
    };

    let mut retained = vec![first];

    for point in points {
        let last = retained.last().expect("retained starts non-empty");

        if implied_speed_kmphr(last, &point) <= MAX_WALKING_SPEED_KMPHR {
            retained.push(point);
        }
    }

    retained
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    fn fix(sec: u64, latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint {
            timestamp: Duration::from_secs(sec),
            latitude,
            longitude,
            accuracy: 5.0,
        }
    }

    #[test]
    fn haversine_half_millidegree_of_latitude() {
        // 0.0005° of latitude at constant longitude is roughly 55 meters
        let actual = haversine(28.485865, 49.235835, 28.485865, 49.236335);

        assert!(actual > 0.055 && actual < 0.056, "got {actual}");
    }

    #[test]
    fn haversine_zero_for_identical_points() {
        assert_eq!(0.0, haversine(28.485865, 49.235835, 28.485865, 49.235835));
    }

    #[test]
    fn accumulator_first_fix_only_anchors() {
        let mut acc = DistanceAccumulator::new();

        assert_eq!(None, acc.push(fix(0, 49.2358, 28.4858)));
        assert_eq!(0.0, acc.total().as_kilometers());
    }

    #[test]
    fn accumulator_sums_accepted_segments() {
        let mut acc = DistanceAccumulator::new();

        acc.push(fix(0, 49.2358, 28.4858));
        let first = acc.push(fix(60, 49.2363, 28.4858)).expect("~55m segment");
        let second = acc.push(fix(120, 49.2368, 28.4858)).expect("~55m segment");

        let expected = first.as_kilometers() + second.as_kilometers();

        assert_eq!(expected, acc.total().as_kilometers());
        assert!(acc.total().as_meters() > 100.0 && acc.total().as_meters() < 120.0);
    }

    #[test]
    fn accumulator_rejects_jump_above_band() {
        let mut acc = DistanceAccumulator::new();

        acc.push(fix(0, 49.2358, 28.4858));
        // 0.01° of latitude is over a kilometer, far above the 100 m cap
        assert_eq!(None, acc.push(fix(3, 49.2458, 28.4858)));
        assert_eq!(0.0, acc.total().as_kilometers());
    }

    #[test]
    fn accumulator_rejects_jitter_below_band() {
        let mut acc = DistanceAccumulator::new();

        acc.push(fix(0, 49.2358, 28.4858));
        // centimeter-scale wobble, under the 0.1 m floor
        assert_eq!(None, acc.push(fix(3, 49.2358005, 28.4858)));
        assert_eq!(0.0, acc.total().as_kilometers());
    }

    #[test]
    fn accumulator_anchor_advances_past_rejected_fix() {
        let mut acc = DistanceAccumulator::new();

        acc.push(fix(0, 49.2358, 28.4858));
        // rejected jump moves the anchor anyway
        acc.push(fix(3, 49.2458, 28.4858));
        // ~55m from the rejected fix, not from the first one
        let segment = acc.push(fix(63, 49.2463, 28.4858)).expect("~55m segment");

        assert_eq!(segment.as_kilometers(), acc.total().as_kilometers());
    }

    #[test]
    fn filter_route_retains_first_point_always() {
        // second point implies ~200 km/h against the first
        let route = vec![fix(0, 49.2358, 28.4858), fix(1, 49.2363, 28.4858)];

        let filtered = filter_route(route.clone());

        assert_eq!(vec![route[0].clone()], filtered);
    }

    #[test]
    fn filter_route_keeps_walking_pace_points() {
        let route = vec![
            fix(0, 49.2358, 28.4858),
            fix(60, 49.2363, 28.4858),
            fix(120, 49.2368, 28.4858),
        ];

        assert_eq!(route.clone(), filter_route(route));
    }

    #[test]
    fn filter_route_compares_against_last_retained() {
        let teleport = fix(1, 52.0, 13.0);
        let route = vec![
            fix(0, 49.2358, 28.4858),
            // teleport fix is dropped...
            teleport,
            // ...and must not poison this one, which is fine vs. the first fix
            fix(60, 49.2363, 28.4858),
        ];

        let filtered = filter_route(route.clone());

        assert_eq!(vec![route[0].clone(), route[2].clone()], filtered);
    }

    #[test]
    fn filter_route_drops_non_monotonic_timestamps() {
        let route = vec![fix(60, 49.2358, 28.4858), fix(60, 49.2363, 28.4858)];

        assert_eq!(1, filter_route(route).len());
    }

    #[test]
    fn filter_route_empty_input() {
        assert!(filter_route(Vec::new()).is_empty());
    }
}
