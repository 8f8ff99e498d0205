use std::time::Instant;

/// Pointer position in device-independent units (terminal cells for the TUI).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

/// Captured on pointer-down, consumed on pointer-up.
///
/// Deliberately neither `Clone` nor `Copy`: a sample is spent by the gesture
/// that ends it.
#[derive(Debug)]
pub struct GestureSample {
    start_time: Instant,
    start_position: Point,
}

impl GestureSample {
    pub fn new(start_position: Point, start_time: Instant) -> Self {
        Self {
            start_time,
            start_position,
        }
    }

    pub fn start_time(&self) -> Instant {
        self.start_time
    }

    pub fn start_position(&self) -> Point {
        self.start_position
    }
}

/// Minimum horizontal travel and speed for a pointer interaction to count as
/// a swipe. `distance` is in position units, `velocity` in units per
/// millisecond.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeThresholds {
    pub distance: f32,
    pub velocity: f32,
}

impl SwipeThresholds {
    pub fn new(distance: f32, velocity: f32) -> Self {
        Self { distance, velocity }
    }

    /// Derive thresholds from a platform's paging touch slop and minimum
    /// fling velocity (units per second), scaled by display density.
    pub fn from_platform(touch_slop: f32, min_fling_velocity: f32, density: f32) -> Self {
        Self {
            distance: touch_slop * density,
            velocity: min_fling_velocity / 1000.0,
        }
    }

    /// Decide whether the pointer travelling from `sample` to `position` by
    /// `timestamp` was a swipe, and in which direction.
    ///
    /// A zero elapsed time counts as infinite speed, so only the distance
    /// threshold applies.
    pub fn classify(
        &self,
        sample: &GestureSample,
        position: Point,
        timestamp: Instant,
    ) -> Option<SwipeDirection> {
        let distance = position.x - sample.start_position.x;
        let magnitude = distance.abs();
        if magnitude <= self.distance || distance == 0.0 {
            return None;
        }
        let elapsed_ms = timestamp
            .saturating_duration_since(sample.start_time)
            .as_secs_f32()
            * 1000.0;
        if elapsed_ms > 0.0 && magnitude / elapsed_ms <= self.velocity {
            return None;
        }
        if distance < 0.0 {
            Some(SwipeDirection::Left)
        } else {
            Some(SwipeDirection::Right)
        }
    }
}

impl Default for SwipeThresholds {
    fn default() -> Self {
        Self::new(4.0, 0.01)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sample_at(x: f32, t0: Instant) -> GestureSample {
        GestureSample::new(Point::new(x, 0.0), t0)
    }

    #[test]
    fn short_drag_is_not_a_swipe_even_when_fast() {
        let t = SwipeThresholds::new(10.0, 0.1);
        let t0 = Instant::now();
        let s = sample_at(50.0, t0);
        assert_eq!(t.classify(&s, Point::new(45.0, 0.0), t0), None);
        assert_eq!(
            t.classify(&s, Point::new(55.0, 0.0), t0 + Duration::from_millis(1)),
            None
        );
    }

    #[test]
    fn slow_drag_is_not_a_swipe() {
        let t = SwipeThresholds::new(10.0, 0.1);
        let t0 = Instant::now();
        let s = sample_at(0.0, t0);
        // 20 units over 400ms = 0.05 units/ms
        assert_eq!(
            t.classify(&s, Point::new(20.0, 0.0), t0 + Duration::from_millis(400)),
            None
        );
    }

    #[test]
    fn direction_follows_sign_of_travel() {
        let t = SwipeThresholds::new(10.0, 0.1);
        let t0 = Instant::now();
        let later = t0 + Duration::from_millis(50);
        let s = sample_at(100.0, t0);
        assert_eq!(
            t.classify(&s, Point::new(40.0, 3.0), later),
            Some(SwipeDirection::Left)
        );
        assert_eq!(
            t.classify(&s, Point::new(160.0, -2.0), later),
            Some(SwipeDirection::Right)
        );
    }

    #[test]
    fn meeting_a_threshold_exactly_is_not_enough() {
        let t = SwipeThresholds::new(10.0, 0.5);
        let t0 = Instant::now();
        let s = sample_at(0.0, t0);
        assert_eq!(t.classify(&s, Point::new(10.0, 0.0), t0), None);
        assert_eq!(
            t.classify(&s, Point::new(10.5, 0.0), t0),
            Some(SwipeDirection::Right)
        );
        // 250 units over 500ms is exactly 0.5 units/ms
        let half_second = t0 + Duration::from_millis(500);
        assert_eq!(t.classify(&s, Point::new(-250.0, 0.0), half_second), None);
        assert_eq!(
            t.classify(&s, Point::new(-251.0, 0.0), half_second),
            Some(SwipeDirection::Left)
        );
    }

    #[test]
    fn zero_elapsed_counts_as_fast_enough() {
        let t = SwipeThresholds::new(10.0, 1000.0);
        let t0 = Instant::now();
        let s = sample_at(0.0, t0);
        assert_eq!(
            t.classify(&s, Point::new(-30.0, 0.0), t0),
            Some(SwipeDirection::Left)
        );
    }

    #[test]
    fn timestamp_before_start_is_treated_as_zero_elapsed() {
        let t = SwipeThresholds::new(10.0, 1000.0);
        let t0 = Instant::now() + Duration::from_millis(100);
        let s = sample_at(0.0, t0);
        assert_eq!(
            t.classify(&s, Point::new(30.0, 0.0), t0 - Duration::from_millis(50)),
            Some(SwipeDirection::Right)
        );
    }

    #[test]
    fn platform_thresholds_scale_by_density() {
        let t = SwipeThresholds::from_platform(16.0, 50.0, 2.0);
        assert_eq!(t.distance, 32.0);
        assert!((t.velocity - 0.05).abs() < f32::EPSILON);
    }
}
