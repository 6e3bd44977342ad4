use std::time::Duration;
use tokio::time::Instant;

pub const OPAQUE: f64 = 1.0;
pub const TRANSPARENT: f64 = 0.0;

/// Linear opacity transition, evaluated lazily against the clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    start: Instant,
    duration: Duration,
}

impl Tween {
    pub const fn fixed(value: f64, now: Instant) -> Self {
        Self {
            from: value,
            to: value,
            start: now,
            duration: Duration::ZERO,
        }
    }

    pub fn value_at(&self, now: Instant) -> f64 {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to;
        }
        progress_value(self.from, self.to, progress)
    }

    pub const fn target(&self) -> f64 {
        self.to
    }

    pub fn end(&self) -> Instant {
        self.start + self.duration
    }

    /// Retargets the tween, starting from wherever it currently is.
    pub fn retarget(&mut self, to: f64, duration: Duration, now: Instant) {
        self.from = self.value_at(now);
        self.to = to;
        self.start = now;
        self.duration = duration;
    }

    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

pub fn progress_value(from: f64, to: f64, progress: f64) -> f64 {
    (to - from).mul_add(progress.clamp(0.0, 1.0), from)
}

/// Completion signal for a visual transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    end: Instant,
}

impl Transition {
    pub const fn until(end: Instant) -> Self {
        Self { end }
    }

    pub const fn done(now: Instant) -> Self {
        Self { end: now }
    }

    pub const fn end(self) -> Instant {
        self.end
    }

    /// The later of two transitions.
    pub fn join(self, other: Self) -> Self {
        Self {
            end: self.end.max(other.end),
        }
    }

    pub async fn finished(self) {
        tokio::time::sleep_until(self.end).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-9,
            "expected {expected}, got {actual}, diff {diff}"
        );
    }

    #[test]
    fn fixed_tween_never_moves() {
        let now = Instant::now();
        let tween = Tween::fixed(0.4, now);
        assert_close(tween.value_at(now), 0.4);
        assert_close(tween.value_at(now + Duration::from_secs(10)), 0.4);
    }

    #[test]
    fn retarget_interpolates_linearly() {
        let now = Instant::now();
        let mut tween = Tween::fixed(OPAQUE, now);
        tween.retarget(0.0, Duration::from_millis(2000), now);

        assert_close(tween.value_at(now), 1.0);
        assert_close(tween.value_at(now + Duration::from_millis(500)), 0.75);
        assert_close(tween.value_at(now + Duration::from_millis(2000)), 0.0);
        assert_close(tween.value_at(now + Duration::from_secs(60)), 0.0);
    }

    #[test]
    fn retarget_mid_flight_starts_from_current_value() {
        let now = Instant::now();
        let mut tween = Tween::fixed(OPAQUE, now);
        tween.retarget(0.0, Duration::from_millis(1000), now);

        let halfway = now + Duration::from_millis(500);
        tween.retarget(1.0, Duration::from_millis(1000), halfway);

        assert_close(tween.value_at(halfway), 0.5);
        assert_close(tween.value_at(halfway + Duration::from_millis(1000)), 1.0);
    }

    #[test]
    fn progress_is_clamped() {
        assert_close(progress_value(0.0, 1.0, -1.0), 0.0);
        assert_close(progress_value(0.0, 1.0, 2.0), 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn transition_resolves_at_its_end() {
        let start = Instant::now();
        let transition = Transition::until(start + Duration::from_millis(750));
        transition.finished().await;
        assert!(Instant::now() >= start + Duration::from_millis(750));
    }

    #[test]
    fn join_keeps_the_later_end() {
        let now = Instant::now();
        let early = Transition::until(now + Duration::from_millis(10));
        let late = Transition::until(now + Duration::from_millis(20));
        assert_eq!(early.join(late), late);
        assert_eq!(late.join(early), late);
    }
}
