//! The evasive negative control.
//!
//! Every attempt to press the control shrinks it by a constant factor (floored so it
//! never vanishes), bumps the attempt counter, and relocates it to a random point of
//! the viewport inset by [`EVASION_PADDING`]. Everything else shown about the control
//! (its label, its opacity, whether it still takes presses) and the growth of the
//! affirmative control is derived from that state.

use crate::{Point, RandomSource, Viewport};

/// Factor applied to the scale on every attempt.
pub const SCALE_STEP: f64 = 0.8;
/// Scale floor; the control never disappears entirely.
pub const MIN_SCALE: f64 = 0.1;
/// Below this scale the control is drawn nearly transparent.
pub const DIM_BELOW_SCALE: f64 = 0.2;
pub const DIM_OPACITY: f64 = 0.3;
/// Below this scale the control stops taking presses.
pub const INERT_BELOW_SCALE: f64 = 0.15;
/// Inset, in virtual pixels, kept clear on every side when relocating.
pub const EVASION_PADDING: f64 = 100.0;
/// Scale added to the affirmative control per attempt.
pub const AFFIRMATIVE_GROWTH: f64 = 0.05;

/// Labels for the negative control, increasingly plaintive. Saturates at the last one.
pub const NEGATIVE_PHRASES: [&str; 8] = [
    "No 🥺",
    "Segura? 🤨",
    "Pensa-t'ho bé... 😢",
    "De debò? 😭",
    "Ni ho somniïs! 😤",
    "Ets dolenta... 💔",
    "Soc massa petit! 🤏",
    "Adéu! 💨",
];

/// Emoji-free counterparts of [`NEGATIVE_PHRASES`], same order.
pub const NEGATIVE_PHRASES_ASCII: [&str; 8] = [
    "No :(",
    "Segura? o_O",
    "Pensa-t'ho bé... :'(",
    "De debò? T_T",
    "Ni ho somniïs! >:(",
    "Ets dolenta... </3",
    "Soc massa petit! ._.",
    "Adéu! ~>",
];

/// Scale after `count` attempts: `max(MIN_SCALE, SCALE_STEP^count)`.
#[must_use]
pub fn scale_after(count: u32) -> f64 {
    let exponent = i32::try_from(count).unwrap_or(i32::MAX);
    SCALE_STEP.powi(exponent).max(MIN_SCALE)
}

/// Index into the phrase tables after `count` attempts, saturating at the last entry.
#[must_use]
pub fn phrase_index(count: u32) -> usize {
    usize::try_from(count)
        .unwrap_or(usize::MAX)
        .min(NEGATIVE_PHRASES.len() - 1)
}

#[must_use]
pub fn phrase_for(count: u32) -> &'static str {
    NEGATIVE_PHRASES[phrase_index(count)]
}

/// Pick an absolute point inside `viewport` inset by `padding`.
///
/// On each axis the point lands in `[padding/2, extent - 3*padding/2]`, which keeps
/// it within `[padding/2, extent - padding/2]`. Axes shorter than `2 * padding`
/// collapse to `padding/2`; axes shorter than `padding` use their midpoint.
pub fn random_target(viewport: Viewport, padding: f64, rng: &mut dyn RandomSource) -> Point {
    let x = axis_target(viewport.width, padding, rng.next_unit());
    let y = axis_target(viewport.height, padding, rng.next_unit());
    Point::new(x, y)
}

fn axis_target(extent: f64, padding: f64, sample: f64) -> f64 {
    if extent < padding {
        return extent / 2.0;
    }
    let span = (extent - 2.0 * padding).max(0.0);
    padding / 2.0 + sample * span
}

/// State of the negative control.
#[derive(Debug, Clone, PartialEq)]
pub struct EvasionState {
    offset: Point,
    scale: f64,
    interaction_count: u32,
}

impl Default for EvasionState {
    fn default() -> Self {
        Self::new()
    }
}

impl EvasionState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            offset: Point::new(0.0, 0.0),
            scale: 1.0,
            interaction_count: 0,
        }
    }

    /// Register one attempt to press the control.
    ///
    /// Shrinks, counts, and relocates. Total: there is no failure path.
    pub fn attempt(&mut self, viewport: Viewport, rng: &mut dyn RandomSource) {
        self.scale = (self.scale * SCALE_STEP).max(MIN_SCALE);
        self.interaction_count = self.interaction_count.saturating_add(1);

        let target = random_target(viewport, EVASION_PADDING, rng);
        let center = viewport.center();
        self.offset = Point::new(target.x - center.x, target.y - center.y);
    }

    /// Displacement from the viewport centre, in virtual pixels.
    #[must_use]
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Absolute position the control was sent to, for the given viewport.
    #[must_use]
    pub fn position_in(&self, viewport: Viewport) -> Point {
        let center = viewport.center();
        Point::new(center.x + self.offset.x, center.y + self.offset.y)
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn interaction_count(&self) -> u32 {
        self.interaction_count
    }

    /// Whether the control has left its natural layout slot.
    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.interaction_count > 0
    }

    #[must_use]
    pub fn phrase(&self) -> &'static str {
        phrase_for(self.interaction_count)
    }

    #[must_use]
    pub fn ascii_phrase(&self) -> &'static str {
        NEGATIVE_PHRASES_ASCII[phrase_index(self.interaction_count)]
    }

    #[must_use]
    pub fn opacity(&self) -> f64 {
        if self.scale < DIM_BELOW_SCALE {
            DIM_OPACITY
        } else {
            1.0
        }
    }

    #[must_use]
    pub fn is_dimmed(&self) -> bool {
        self.opacity() < 1.0
    }

    /// Whether presses still reach the control.
    #[must_use]
    pub fn accepts_pointer(&self) -> bool {
        self.scale >= INERT_BELOW_SCALE
    }

    /// Scale of the affirmative control, growing in lockstep with the attempts.
    #[must_use]
    pub fn affirmative_scale(&self) -> f64 {
        1.0 + f64::from(self.interaction_count) * AFFIRMATIVE_GROWTH
    }
}
