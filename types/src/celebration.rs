//! The bounded confetti sequence shown after acceptance.
//!
//! Every [`CELEBRATION_PERIOD`] the sequence fires one burst from each side of the
//! screen, each carrying `PEAK_PARTICLES_PER_BURST * time_left / duration` particles,
//! so the shower thins out linearly. The first firing at or past the end of the
//! window stops the sequence for good.

use std::time::Duration;

use crate::ui::Interval;
use crate::{ConfettiBurst, Origin, RandomSource};

pub const CELEBRATION_DURATION: Duration = Duration::from_secs(15);
pub const CELEBRATION_PERIOD: Duration = Duration::from_millis(250);
pub const PEAK_PARTICLES_PER_BURST: f64 = 50.0;

const LEFT_ORIGIN_X: (f64, f64) = (0.1, 0.3);
const RIGHT_ORIGIN_X: (f64, f64) = (0.7, 0.9);
const ORIGIN_Y_LIFT: f64 = 0.2;

/// Particles per burst with `time_left` remaining: `50 * max(0, time_left / duration)`.
#[must_use]
pub fn particle_count(time_left: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 0.0;
    }
    let ratio = (time_left.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0);
    PEAK_PARTICLES_PER_BURST * ratio
}

#[derive(Debug, Clone)]
pub struct CelebrationSequence {
    interval: Interval,
    duration: Duration,
    finished: bool,
}

impl Default for CelebrationSequence {
    fn default() -> Self {
        Self::start()
    }
}

impl CelebrationSequence {
    #[must_use]
    pub fn start() -> Self {
        Self::with_timing(CELEBRATION_DURATION, CELEBRATION_PERIOD)
    }

    #[must_use]
    pub fn with_timing(duration: Duration, period: Duration) -> Self {
        Self {
            interval: Interval::new(period),
            duration,
            finished: false,
        }
    }

    /// Advance by a frame delta, returning the bursts due in that step.
    pub fn advance(&mut self, delta: Duration, rng: &mut dyn RandomSource) -> Vec<ConfettiBurst> {
        let mut bursts = Vec::new();
        if !self.is_running() {
            return bursts;
        }

        for fired_at in self.interval.advance(delta) {
            let time_left = self.duration.saturating_sub(fired_at);
            if time_left.is_zero() {
                self.finish();
                break;
            }

            let count = particle_count(time_left, self.duration);
            bursts.push(ConfettiBurst::celebration(
                count,
                Origin::new(
                    rng.in_range(LEFT_ORIGIN_X.0, LEFT_ORIGIN_X.1),
                    rng.next_unit() - ORIGIN_Y_LIFT,
                ),
            ));
            bursts.push(ConfettiBurst::celebration(
                count,
                Origin::new(
                    rng.in_range(RIGHT_ORIGIN_X.0, RIGHT_ORIGIN_X.1),
                    rng.next_unit() - ORIGIN_Y_LIFT,
                ),
            ));
        }

        bursts
    }

    /// Stop early. Idempotent.
    pub fn cancel(&mut self) {
        self.interval.cancel();
    }

    fn finish(&mut self) {
        self.finished = true;
        self.interval.cancel();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.finished && !self.interval.is_cancelled()
    }

    /// Whether the window ran out on its own (as opposed to being cancelled).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.interval.elapsed()
    }
}
