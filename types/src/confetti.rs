//! Confetti bursts handed to the particle renderer.
//!
//! A burst is a fire-and-forget request: the renderer spawns `particle_count`
//! particles at `origin`, fanned over `spread` degrees around straight up, each
//! living for `ticks` steps of a 60 Hz simulation.

/// Normalised screen coordinates: `(0, 0)` top-left, `(1, 1)` bottom-right.
///
/// Values outside `[0, 1]` are allowed and place the origin off screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Origin {
    pub x: f64,
    pub y: f64,
}

impl Origin {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfettiBurst {
    pub particle_count: f64,
    /// Fan angle in degrees.
    pub spread: f64,
    pub start_velocity: f64,
    /// Lifetime in 60 Hz simulation ticks.
    pub ticks: u32,
    pub origin: Origin,
}

impl ConfettiBurst {
    const DEFAULT_START_VELOCITY: f64 = 45.0;
    const DEFAULT_TICKS: u32 = 200;

    /// One-shot burst fired the moment the proposal is accepted.
    #[must_use]
    pub const fn acceptance() -> Self {
        Self {
            particle_count: 150.0,
            spread: 70.0,
            start_velocity: Self::DEFAULT_START_VELOCITY,
            ticks: Self::DEFAULT_TICKS,
            origin: Origin::new(0.5, 0.6),
        }
    }

    /// One side of a celebration tick: a full circle of slower, short-lived particles.
    #[must_use]
    pub const fn celebration(particle_count: f64, origin: Origin) -> Self {
        Self {
            particle_count,
            spread: 360.0,
            start_velocity: 30.0,
            ticks: 60,
            origin,
        }
    }

    /// Number of particles actually spawned; fractional counts round down.
    #[must_use]
    pub fn whole_particles(&self) -> usize {
        if !self.particle_count.is_finite() || self.particle_count <= 0.0 {
            return 0;
        }
        self.particle_count.floor() as usize
    }
}
