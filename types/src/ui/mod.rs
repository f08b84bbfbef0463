//! UI state types for the TUI layer.
//!
//! Pure data types with no IO, no async, no ratatui dependency.
//! Used by both the engine (state ownership) and tui (rendering/input).

mod animation;
mod hit;

pub(crate) use animation::normalized_progress;
pub use animation::{Firings, Interval};
pub use hit::{HitRegion, HitRegions, HitTarget};

/// UI configuration options derived from config/environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    /// Use ASCII-only glyphs instead of emoji hearts and confetti.
    pub ascii_only: bool,
    /// Hide the decorative and confetti particles.
    pub reduced_motion: bool,
}
