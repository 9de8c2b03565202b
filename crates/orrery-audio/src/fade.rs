//! Pure fade math and the poll-driven step schedule.

use std::time::{Duration, Instant};

/// Volume after `step` of `steps` fade ticks toward `target`.
///
/// Linear ramp: `(step / steps) * target`. At and beyond the final step the
/// result is `target` exactly, so float drift can never leave the volume
/// slightly off after the ramp completes.
pub fn fade_volume(step: u32, steps: u32, target: f32) -> f32 {
    if steps == 0 || step >= steps {
        return target;
    }
    (step as f32 / steps as f32) * target
}

/// Fixed-step schedule polled from the render thread.
///
/// `steps` ticks spread evenly over `duration`; [`poll`](Self::poll)
/// reports how many ticks became due since the last call, so a late poll
/// catches up instead of stretching the fade. The schedule exhausts itself
/// after the final tick.
#[derive(Debug, Clone)]
pub struct FadeTimer {
    started: Instant,
    interval: Duration,
    steps: u32,
    ticked: u32,
}

impl FadeTimer {
    /// Start a schedule of `steps` ticks over `duration`, beginning at `now`.
    pub fn new(duration: Duration, steps: u32, now: Instant) -> Self {
        let interval = if steps == 0 {
            duration
        } else {
            duration / steps
        };
        Self {
            started: now,
            interval,
            steps,
            ticked: 0,
        }
    }

    /// Number of ticks that became due since the last poll, capped so the
    /// lifetime total never exceeds `steps`.
    pub fn poll(&mut self, now: Instant) -> u32 {
        if self.is_finished() {
            return 0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        let due = if self.interval.is_zero() {
            self.steps
        } else {
            u32::try_from(elapsed.as_nanos() / self.interval.as_nanos()).unwrap_or(u32::MAX)
        };
        let due = due.min(self.steps);
        let fired = due - self.ticked;
        self.ticked = due;
        fired
    }

    /// Whether every tick has fired.
    pub fn is_finished(&self) -> bool {
        self.ticked >= self.steps
    }

    /// Ticks fired so far.
    pub fn ticks(&self) -> u32 {
        self.ticked
    }

    /// The per-tick interval (duration / steps).
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_volume_linear_ramp() {
        assert_eq!(fade_volume(0, 60, 0.5), 0.0);
        assert!((fade_volume(30, 60, 0.5) - 0.25).abs() < 1e-6);
        assert!((fade_volume(15, 60, 0.5) - 0.125).abs() < 1e-6);
    }

    #[test]
    fn test_fade_volume_exact_at_final_step() {
        assert_eq!(fade_volume(60, 60, 0.5), 0.5);
        assert_eq!(fade_volume(61, 60, 0.5), 0.5);
        assert_eq!(fade_volume(u32::MAX, 60, 0.5), 0.5);
    }

    #[test]
    fn test_fade_volume_monotonic_and_bounded() {
        let mut prev = -1.0f32;
        for step in 0..=60 {
            let v = fade_volume(step, 60, 0.5);
            assert!(v >= prev, "volume decreased at step {step}");
            assert!(v <= 0.5, "volume exceeded the target at step {step}");
            if step < 60 {
                assert!(
                    v > prev,
                    "volume must strictly increase before the final step"
                );
            }
            prev = v;
        }
    }

    #[test]
    fn test_fade_volume_zero_steps_is_target() {
        assert_eq!(fade_volume(0, 0, 0.5), 0.5);
    }

    #[test]
    fn test_timer_interval_is_duration_over_steps() {
        let timer = FadeTimer::new(Duration::from_millis(3000), 60, Instant::now());
        assert_eq!(timer.interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_timer_fires_one_tick_per_interval() {
        let start = Instant::now();
        let mut timer = FadeTimer::new(Duration::from_millis(3000), 60, start);
        assert_eq!(timer.poll(start), 0);
        assert_eq!(timer.poll(start + Duration::from_millis(50)), 1);
        assert_eq!(timer.poll(start + Duration::from_millis(100)), 1);
        assert_eq!(timer.ticks(), 2);
    }

    #[test]
    fn test_timer_catches_up_after_late_poll() {
        let start = Instant::now();
        let mut timer = FadeTimer::new(Duration::from_millis(3000), 60, start);
        assert_eq!(timer.poll(start + Duration::from_millis(250)), 5);
    }

    #[test]
    fn test_timer_caps_at_total_steps() {
        let start = Instant::now();
        let mut timer = FadeTimer::new(Duration::from_millis(3000), 60, start);
        assert_eq!(timer.poll(start + Duration::from_secs(3600)), 60);
        assert!(timer.is_finished());
        assert_eq!(timer.poll(start + Duration::from_secs(7200)), 0);
    }

    #[test]
    fn test_timer_before_first_interval_fires_nothing() {
        let start = Instant::now();
        let mut timer = FadeTimer::new(Duration::from_millis(3000), 60, start);
        assert_eq!(timer.poll(start + Duration::from_millis(49)), 0);
        assert!(!timer.is_finished());
    }
}
