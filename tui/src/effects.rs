//! Particle effects: confetti bursts and the drifting background hearts.

use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use unicode_width::UnicodeWidthStr;

use valentine_engine::{AmbianceEmitter, ConfettiBurst, RandomSource, ThreadRandom, Viewport};

use crate::theme::{Glyphs, Palette};
use crate::{CELL_HEIGHT_PX, CELL_WIDTH_PX};

/// Simulation step; burst lifetimes are expressed in these ticks.
const SIM_STEP: Duration = Duration::from_micros(16_667);
/// Catch-up bound after a stall, so one slow frame cannot freeze the loop.
const MAX_STEPS_PER_FRAME: u32 = 30;
/// Live particle cap; bursts beyond it are truncated.
const MAX_PARTICLES: usize = 1200;

const GRAVITY: f64 = 3.0;
const DECAY: f64 = 0.9;
/// Remaining-life fraction below which a particle is drawn dim.
const FADE_BELOW: f64 = 0.25;

#[derive(Debug, Clone)]
struct ConfettiParticle {
    x: f64,
    y: f64,
    angle: f64,
    velocity: f64,
    tick: u32,
    total_ticks: u32,
    color: usize,
    glyph: usize,
}

impl ConfettiParticle {
    fn step(&mut self) {
        self.x += self.angle.cos() * self.velocity;
        self.y += self.angle.sin() * self.velocity + GRAVITY;
        self.velocity *= DECAY;
        self.tick = self.tick.saturating_add(1);
    }

    fn is_dead(&self) -> bool {
        self.tick >= self.total_ticks
    }

    fn remaining(&self) -> f64 {
        if self.total_ticks == 0 {
            return 0.0;
        }
        1.0 - f64::from(self.tick) / f64::from(self.total_ticks)
    }
}

/// Confetti in flight, in virtual-pixel coordinates.
///
/// Bursts are fire-and-forget: [`ConfettiField::fire`] spawns the particles and
/// [`ConfettiField::step`] moves them until their lifetime runs out.
pub struct ConfettiField {
    particles: Vec<ConfettiParticle>,
    rng: Box<dyn RandomSource + Send>,
    pending_time: Duration,
    enabled: bool,
}

impl std::fmt::Debug for ConfettiField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfettiField")
            .field("particles", &self.particles.len())
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl Default for ConfettiField {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ConfettiField {
    /// A disabled field swallows bursts (reduced motion).
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self::with_random(enabled, Box::new(ThreadRandom))
    }

    #[must_use]
    pub fn with_random(enabled: bool, rng: Box<dyn RandomSource + Send>) -> Self {
        Self {
            particles: Vec::new(),
            rng,
            pending_time: Duration::ZERO,
            enabled,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Spawn the particles of one burst. Returns how many were spawned.
    pub fn fire(&mut self, burst: &ConfettiBurst, viewport: Viewport) -> usize {
        if !self.enabled {
            return 0;
        }
        let room = MAX_PARTICLES.saturating_sub(self.particles.len());
        let count = burst.whole_particles().min(room);

        let origin_x = burst.origin.x * viewport.width;
        let origin_y = burst.origin.y * viewport.height;
        let spread = burst.spread.to_radians();
        let up = -std::f64::consts::FRAC_PI_2;

        for _ in 0..count {
            let angle = up + (0.5 * spread - self.rng.next_unit() * spread);
            let velocity =
                burst.start_velocity * 0.5 + self.rng.next_unit() * burst.start_velocity;
            let color = self.rng.in_range(0.0, 64.0) as usize;
            let glyph = self.rng.in_range(0.0, 64.0) as usize;
            self.particles.push(ConfettiParticle {
                x: origin_x,
                y: origin_y,
                angle,
                velocity,
                tick: 0,
                total_ticks: burst.ticks,
                color,
                glyph,
            });
        }
        count
    }

    /// Advance the simulation by a frame delta.
    pub fn step(&mut self, delta: Duration) {
        if self.particles.is_empty() {
            self.pending_time = Duration::ZERO;
            return;
        }
        self.pending_time = self.pending_time.saturating_add(delta);

        let mut steps = 0;
        while self.pending_time >= SIM_STEP && steps < MAX_STEPS_PER_FRAME {
            self.pending_time -= SIM_STEP;
            steps += 1;
            for particle in &mut self.particles {
                particle.step();
            }
            self.particles.retain(|particle| !particle.is_dead());
        }
        if steps == MAX_STEPS_PER_FRAME {
            self.pending_time = Duration::ZERO;
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.pending_time = Duration::ZERO;
    }

    pub(crate) fn render(&self, area: Rect, buf: &mut Buffer, palette: &Palette, glyphs: &Glyphs) {
        for particle in &self.particles {
            let Some((x, y)) = cell_at(area, particle.x, particle.y) else {
                continue;
            };
            let color = palette.confetti[particle.color % palette.confetti.len()];
            let mut style = Style::default().fg(color);
            if particle.remaining() < FADE_BELOW {
                style = style.add_modifier(Modifier::DIM);
            }
            let symbol = glyphs.confetti[particle.glyph % glyphs.confetti.len()];
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(symbol).set_style(style);
            }
        }
    }
}

/// Terminal cell holding a virtual-pixel point, if it lies inside `area`.
fn cell_at(area: Rect, x: f64, y: f64) -> Option<(u16, u16)> {
    if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
        return None;
    }
    let col = (x / CELL_WIDTH_PX).floor();
    let row = (y / CELL_HEIGHT_PX).floor();
    if col >= f64::from(area.width) || row >= f64::from(area.height) {
        return None;
    }
    Some((area.x + col as u16, area.y + row as u16))
}

/// Draw the background hearts, rising from below the bottom edge to above the top.
pub(crate) fn render_ambiance(
    ambiance: &AmbianceEmitter,
    area: Rect,
    buf: &mut Buffer,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    if area.is_empty() {
        return;
    }
    let now = ambiance.now();
    let travel = f64::from(area.height) + 2.0;

    for particle in ambiance.particles() {
        if particle.is_expired(now) {
            continue;
        }
        let progress = f64::from(particle.progress(now));
        let row = f64::from(area.height) + 1.0 - progress * travel;
        if row < 0.0 || row >= f64::from(area.height) {
            continue;
        }
        let col = (particle.left_percent / 100.0 * f64::from(area.width)).floor();
        let large = particle.size >= 22.5;
        let symbol = if large { glyphs.heart } else { glyphs.heart_small };
        let width = symbol.width() as u16;
        let x = area.x + col as u16;
        if x.saturating_add(width) > area.right() {
            continue;
        }

        let mut style = Style::default().fg(palette.heart_faint);
        if large {
            style = style.add_modifier(Modifier::BOLD);
        }
        buf.set_string(x, area.y + row as u16, symbol, style);
    }
}

/// Size of a `base` box drawn at `scale`, never below one cell.
#[must_use]
pub fn scaled_size(base_width: u16, base_height: u16, scale: f64) -> (u16, u16) {
    let scale = if scale.is_finite() { scale.max(0.0) } else { 1.0 };
    let width = (f64::from(base_width) * scale).round().clamp(1.0, f64::from(u16::MAX)) as u16;
    let height = (f64::from(base_height) * scale).round().clamp(1.0, f64::from(u16::MAX)) as u16;
    (width, height)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use valentine_engine::{ConfettiBurst, Viewport};
    use valentine_types::{Origin, ScriptedRandom};

    use super::{ConfettiField, SIM_STEP, cell_at, scaled_size};

    fn field() -> ConfettiField {
        ConfettiField::with_random(true, Box::new(ScriptedRandom::new([0.1, 0.5, 0.9])))
    }

    #[test]
    fn fire_spawns_whole_particles() {
        let mut field = field();
        let viewport = Viewport::new(640.0, 384.0);
        assert_eq!(field.fire(&ConfettiBurst::acceptance(), viewport), 150);
        assert_eq!(
            field.fire(&ConfettiBurst::celebration(12.7, Origin::new(0.2, 0.1)), viewport),
            12
        );
        assert_eq!(field.len(), 162);
    }

    #[test]
    fn disabled_field_ignores_bursts() {
        let mut field = ConfettiField::new(false);
        assert_eq!(
            field.fire(&ConfettiBurst::acceptance(), Viewport::default()),
            0
        );
        assert!(field.is_empty());
    }

    #[test]
    fn particles_die_after_their_ticks() {
        let mut field = field();
        field.fire(
            &ConfettiBurst::celebration(10.0, Origin::new(0.5, 0.5)),
            Viewport::default(),
        );
        for _ in 0..59 {
            field.step(SIM_STEP);
        }
        assert_eq!(field.len(), 10);
        field.step(SIM_STEP);
        assert!(field.is_empty());
    }

    #[test]
    fn stalls_do_not_replay_unbounded_steps() {
        let mut field = field();
        field.fire(&ConfettiBurst::acceptance(), Viewport::default());
        // Thirty steps at most; the acceptance burst lives for two hundred.
        field.step(Duration::from_secs(60));
        assert_eq!(field.len(), 150);
    }

    #[test]
    fn gravity_wins_eventually() {
        let mut field = field();
        field.fire(
            &ConfettiBurst::celebration(1.0, Origin::new(0.5, 0.5)),
            Viewport::new(640.0, 384.0),
        );
        let start_y = field.particles[0].y;
        for _ in 0..50 {
            field.step(SIM_STEP);
        }
        assert!(field.particles[0].y > start_y);
    }

    #[test]
    fn render_skips_offscreen_particles() {
        let mut field = field();
        field.fire(
            &ConfettiBurst::celebration(5.0, Origin::new(0.5, -0.2)),
            Viewport::new(80.0, 48.0),
        );
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        let palette = crate::theme::Palette::standard();
        let glyphs = crate::theme::glyphs(valentine_engine::UiOptions::default());
        field.render(area, &mut buf, &palette, &glyphs);
        assert!(buf.content().iter().all(|cell| cell.symbol() == " "));
    }

    #[test]
    fn cell_mapping_uses_virtual_pixels() {
        let area = Rect::new(2, 1, 10, 5);
        assert_eq!(cell_at(area, 0.0, 0.0), Some((2, 1)));
        assert_eq!(cell_at(area, 15.9, 31.9), Some((3, 2)));
        assert_eq!(cell_at(area, 80.0, 0.0), None);
        assert_eq!(cell_at(area, -1.0, 0.0), None);
        assert_eq!(cell_at(area, f64::NAN, 0.0), None);
    }

    #[test]
    fn scaled_size_never_vanishes() {
        assert_eq!(scaled_size(20, 3, 1.0), (20, 3));
        assert_eq!(scaled_size(20, 3, 0.8), (16, 2));
        assert_eq!(scaled_size(20, 3, 0.1), (2, 1));
        assert_eq!(scaled_size(20, 3, 1.5), (30, 5));
        assert_eq!(scaled_size(20, 3, f64::NAN), (20, 3));
    }
}
