//! Decorative hearts drifting up the background.

use std::collections::VecDeque;
use std::time::Duration;

use crate::RandomSource;
use crate::ui::{Interval, normalized_progress};

/// How many of the most recent particles are kept.
pub const AMBIANCE_CAPACITY: usize = 16;
pub const AMBIANCE_PERIOD: Duration = Duration::from_millis(1000);

const SIZE_RANGE: (f64, f64) = (15.0, 30.0);
const DURATION_SECS_RANGE: (f64, f64) = (4.0, 8.0);

#[derive(Debug, Clone, PartialEq)]
pub struct DecorativeParticle {
    pub id: u64,
    /// Horizontal position as a percentage of the width, `[0, 100)`.
    pub left_percent: f64,
    pub size: f64,
    /// Time to rise from below the bottom edge to above the top edge.
    pub duration: Duration,
    /// Emitter clock at spawn.
    pub born_at: Duration,
}

impl DecorativeParticle {
    /// Fraction of the rise completed at emitter time `now`, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now: Duration) -> f32 {
        normalized_progress(now.saturating_sub(self.born_at), self.duration)
    }

    #[must_use]
    pub fn is_expired(&self, now: Duration) -> bool {
        now.saturating_sub(self.born_at) >= self.duration
    }
}

/// Periodic spawner with a bounded ring of live particles.
#[derive(Debug, Clone)]
pub struct AmbianceEmitter {
    interval: Interval,
    particles: VecDeque<DecorativeParticle>,
    next_id: u64,
}

impl Default for AmbianceEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl AmbianceEmitter {
    #[must_use]
    pub fn new() -> Self {
        Self::with_period(AMBIANCE_PERIOD)
    }

    #[must_use]
    pub fn with_period(period: Duration) -> Self {
        Self {
            interval: Interval::new(period),
            particles: VecDeque::with_capacity(AMBIANCE_CAPACITY),
            next_id: 0,
        }
    }

    /// Advance the emitter clock, spawning one particle per elapsed period.
    ///
    /// Returns how many particles were spawned.
    pub fn advance(&mut self, delta: Duration, rng: &mut dyn RandomSource) -> usize {
        let mut spawned = 0;
        for born_at in self.interval.advance(delta) {
            let particle = DecorativeParticle {
                id: self.next_id,
                left_percent: rng.in_range(0.0, 100.0),
                size: rng.in_range(SIZE_RANGE.0, SIZE_RANGE.1),
                duration: Duration::from_secs_f64(
                    rng.in_range(DURATION_SECS_RANGE.0, DURATION_SECS_RANGE.1),
                ),
                born_at,
            };
            self.next_id = self.next_id.wrapping_add(1);
            self.push(particle);
            spawned += 1;
        }
        spawned
    }

    fn push(&mut self, particle: DecorativeParticle) {
        while self.particles.len() >= AMBIANCE_CAPACITY {
            self.particles.pop_front();
        }
        self.particles.push_back(particle);
    }

    /// Stop spawning. Particles already in the ring stay until dropped with the emitter.
    pub fn cancel(&mut self) {
        self.interval.cancel();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.interval.is_cancelled()
    }

    /// Oldest first.
    pub fn particles(&self) -> impl Iterator<Item = &DecorativeParticle> {
        self.particles.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Emitter clock.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.interval.elapsed()
    }
}
