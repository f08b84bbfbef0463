//! Core domain types for Valentine.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application: the evasion state
//! machine, the timed animation sequences, and the mapping from a text-generation
//! outcome to the message that ends up on screen.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

mod ambiance;
mod celebration;
mod confetti;
mod evasion;
mod message;
pub mod ui;

pub use ambiance::{AMBIANCE_CAPACITY, AMBIANCE_PERIOD, AmbianceEmitter, DecorativeParticle};
pub use celebration::{
    CELEBRATION_DURATION, CELEBRATION_PERIOD, CelebrationSequence, PEAK_PARTICLES_PER_BURST,
    particle_count,
};
pub use confetti::{ConfettiBurst, Origin};
pub use evasion::{
    AFFIRMATIVE_GROWTH, DIM_BELOW_SCALE, DIM_OPACITY, EVASION_PADDING, EvasionState,
    INERT_BELOW_SCALE, MIN_SCALE, NEGATIVE_PHRASES, NEGATIVE_PHRASES_ASCII, SCALE_STEP, phrase_for,
    phrase_index, random_target, scale_after,
};
pub use message::{
    FAILURE_FALLBACK, FailureKind, GenerationError, GenerationOutcome, MESSAGE_PLACEHOLDER,
    NO_ANSWER_FALLBACK, resolve_message,
};

// ============================================================================
// Screen progression
// ============================================================================

/// Which screen the session is on.
///
/// Progression is monotonic: `Question -> Loading -> Celebration`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScreenState {
    #[default]
    Question,
    Loading,
    Celebration,
}

impl ScreenState {
    /// The only state this one may move to, if any.
    #[must_use]
    pub const fn successor(self) -> Option<Self> {
        match self {
            Self::Question => Some(Self::Loading),
            Self::Loading => Some(Self::Celebration),
            Self::Celebration => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::Loading => "loading",
            Self::Celebration => "celebration",
        }
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// A point or displacement in virtual pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Visible area in virtual pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    /// An 80x24 terminal at 8x16 virtual pixels per cell.
    fn default() -> Self {
        Self::new(640.0, 384.0)
    }
}

// ============================================================================
// Randomness
// ============================================================================

/// Source of uniform samples.
///
/// Injected wherever the domain needs randomness so the same code runs against
/// the thread RNG in production and a scripted sequence in tests.
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform sample in `[min, max)`.
    fn in_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_unit() * (max - min)
    }
}

/// Thread-local RNG from `rand`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&mut self) -> f64 {
        rand::random::<f64>()
    }
}

/// Deterministic source cycling through a fixed sequence of samples.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    samples: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Samples are clamped into `[0, 1)`; an empty script always yields `0.0`.
    #[must_use]
    pub fn new(samples: impl Into<Vec<f64>>) -> Self {
        let samples = samples
            .into()
            .into_iter()
            .map(|s| s.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self { samples, cursor: 0 }
    }

    #[must_use]
    pub fn constant(sample: f64) -> Self {
        Self::new(vec![sample])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sample = self.samples[self.cursor % self.samples.len()];
        self.cursor = self.cursor.wrapping_add(1);
        sample
    }
}
